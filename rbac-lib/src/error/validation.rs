//! Validation error types

use std::collections::BTreeMap;

use serde::Deserialize;

/// Error information for a specific field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValidationError {
    /// The field that failed validation.
    pub field: String,
    /// Human-readable validation error message.
    pub message: String,
}

impl FieldValidationError {
    /// Creates a new field validation error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Field-level validation errors returned by a create/update endpoint.
///
/// Parsed from the usual `422 Unprocessable Entity` body:
///
/// ```json
/// { "message": "The email field is required.", "errors": { "email": ["The email field is required."] } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    /// Summary message, if the server sent one.
    pub message: Option<String>,
    /// Individual field errors, grouped by field name in sorted order.
    pub fields: Vec<FieldValidationError>,
}

#[derive(Deserialize)]
struct ValidationBody {
    message: Option<String>,
    #[serde(default)]
    errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    /// Parses a validation response body. Returns `None` if the body has no field errors.
    pub fn from_body(body: &str) -> Option<Self> {
        let parsed: ValidationBody = serde_json::from_str(body).ok()?;
        if parsed.errors.is_empty() {
            return None;
        }
        let fields = parsed
            .errors
            .into_iter()
            .flat_map(|(field, messages)| {
                messages
                    .into_iter()
                    .map(move |message| FieldValidationError::new(field.clone(), message))
            })
            .collect();
        Some(Self {
            message: parsed.message,
            fields,
        })
    }

    /// Returns the messages for one field.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.fields
            .iter()
            .filter(move |e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(message) = &self.message {
            return f.write_str(message);
        }
        let parts: Vec<String> = self.fields.iter().map(|e| e.to_string()).collect();
        f.write_str(&parts.join("; "))
    }
}
