//! Typed views over the RBAC resources
//!
//! The table itself only deals in [`Record`]s. These types are for callers
//! that want typed access to a user, role or permission row.

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::Record;

/// A user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Set once the account has been verified.
    #[serde(default)]
    pub email_verified_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    /// Present only when the endpoint eager-loads roles.
    #[serde(default)]
    pub roles: Vec<Role>,
}

impl User {
    pub fn is_verified(&self) -> bool {
        self.email_verified_at.is_some()
    }
}

/// A named group of permissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub guard_name: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    /// Present only when the endpoint eager-loads permissions.
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

impl Role {
    /// Returns `true` if the role grants the named permission.
    pub fn grants(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p.name == permission)
    }
}

/// A single named capability such as `view-user`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Permission {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub guard_name: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Conversion from a table record into a typed resource.
pub trait FromRecord: Sized {
    fn from_record(record: &Record) -> Result<Self, serde_json::Error>;
}

impl<T: DeserializeOwned> FromRecord for T {
    fn from_record(record: &Record) -> Result<Self, serde_json::Error> {
        serde_json::from_value(serde_json::Value::Object(record.fields().clone()))
    }
}
