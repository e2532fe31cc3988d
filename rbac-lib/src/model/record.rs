//! Dynamic table record

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use super::RecordId;
use crate::error::FieldError;

/// One row of data returned by a list endpoint.
///
/// Records are opaque to the table: fields are kept as JSON values in the
/// order the server sent them. Column definitions decide what is shown.
///
/// # Example
///
/// ```
/// use rbac_lib::model::Record;
///
/// let record = Record::new()
///     .set("id", 7)
///     .set("name", "Administrators");
///
/// assert_eq!(record.get_str("name").unwrap(), Some("Administrators"));
/// assert_eq!(record.id().map(|id| id.to_string()), Some("7".to_string()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    /// Creates a new empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a record from an existing JSON object.
    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Returns the record identifier from its `id` field.
    pub fn id(&self) -> Option<RecordId> {
        self.fields.get("id").and_then(RecordId::from_value)
    }

    // =========================================================================
    // Raw field access
    // =========================================================================

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns `true` if the record contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns all fields in server order.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Consumes the record and returns its fields.
    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Inserts a field value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Returns the display text of a field: strings verbatim, null or missing
    /// as empty, everything else in compact JSON.
    pub fn text(&self, field: &str) -> String {
        self.fields.get(field).map(value_text).unwrap_or_default()
    }

    // =========================================================================
    // Typed getters
    //
    // Return Err if field is missing or wrong type.
    // Return Ok(None) only if the field exists and is null.
    // =========================================================================

    /// Gets a string field value.
    pub fn get_str(&self, field: &str) -> Result<Option<&str>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(FieldError::type_mismatch(field, "string", type_name(other))),
        }
    }

    /// Gets an integer field value.
    pub fn get_i64(&self, field: &str) -> Result<Option<i64>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => n
                .as_i64()
                .map(Some)
                .ok_or_else(|| FieldError::type_mismatch(field, "integer", "float")),
            Some(other) => Err(FieldError::type_mismatch(field, "integer", type_name(other))),
        }
    }

    /// Gets a boolean field value.
    pub fn get_bool(&self, field: &str) -> Result<Option<bool>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(FieldError::type_mismatch(field, "bool", type_name(other))),
        }
    }

    /// Gets an RFC 3339 timestamp field value.
    pub fn get_datetime(&self, field: &str) -> Result<Option<DateTime<Utc>>, FieldError> {
        match self.get_str(field)? {
            None => Ok(None),
            Some(s) => DateTime::parse_from_rfc3339(s)
                .map(|dt| Some(dt.with_timezone(&Utc)))
                .map_err(|_| FieldError::type_mismatch(field, "datetime", "string")),
        }
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

/// Plain-text rendering of a JSON value.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserves_server_field_order() {
        let json = r#"{"zeta": 1, "alpha": 2, "id": 3}"#;
        let record: Record = serde_json::from_str(json).unwrap();
        let keys: Vec<&str> = record.fields().keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, ["zeta", "alpha", "id"]);
    }

    #[test]
    fn test_id_extraction() {
        assert_eq!(Record::new().set("id", 12).id(), Some(RecordId::Int(12)));
        assert_eq!(
            Record::new().set("id", "abc").id(),
            Some(RecordId::Text("abc".into()))
        );
        assert_eq!(Record::new().set("id", Value::Null).id(), None);
        assert_eq!(Record::new().id(), None);
    }

    #[test]
    fn test_typed_getters() {
        let record = Record::new()
            .set("name", "Ayu")
            .set("count", 4)
            .set("email_verified_at", Value::Null)
            .set("created_at", "2024-05-01T10:00:00.000000Z");

        assert_eq!(record.get_str("name").unwrap(), Some("Ayu"));
        assert_eq!(record.get_i64("count").unwrap(), Some(4));
        assert_eq!(record.get_str("email_verified_at").unwrap(), None);
        assert!(record.get_datetime("created_at").unwrap().is_some());
        assert_eq!(
            record.get_bool("name"),
            Err(FieldError::type_mismatch("name", "bool", "string"))
        );
        assert_eq!(record.get_str("missing"), Err(FieldError::missing("missing")));
        assert_eq!(record.get_bool("name").unwrap_err().field(), "name");
    }

    #[test]
    fn test_text_rendering() {
        let record = Record::new()
            .set("a", "x")
            .set("b", 1.5)
            .set("c", Value::Null)
            .set("d", true);
        assert_eq!(record.text("a"), "x");
        assert_eq!(record.text("b"), "1.5");
        assert_eq!(record.text("c"), "");
        assert_eq!(record.text("d"), "true");
        assert_eq!(record.text("nope"), "");
    }
}
