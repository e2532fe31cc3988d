//! Admin resources and their routes.

use std::borrow::Cow;

use crate::model::RecordId;

/// An admin resource exposed by the panel (users, roles, permissions).
///
/// A resource is identified by its route path relative to the panel base URL.
/// Its list endpoint lives at `<path>/data`, single records at `<path>/<id>`.
///
/// # Example
///
/// ```
/// use rbac_lib::api::Resource;
/// use rbac_lib::model::RecordId;
///
/// let users = Resource::users();
/// assert_eq!(users.data_path(), "core/users/data");
/// assert_eq!(users.edit_path(&RecordId::Int(4)), "core/users/4/edit");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Resource {
    name: Cow<'static, str>,
    path: Cow<'static, str>,
}

impl Resource {
    /// Creates a custom resource.
    pub fn new(name: impl Into<Cow<'static, str>>, path: impl Into<Cow<'static, str>>) -> Self {
        let path: Cow<'static, str> = path.into();
        let path = match path {
            Cow::Borrowed(p) => Cow::Borrowed(p.trim_matches('/')),
            Cow::Owned(p) => Cow::Owned(p.trim_matches('/').to_string()),
        };
        Self {
            name: name.into(),
            path,
        }
    }

    pub fn users() -> Self {
        Self::new("users", "core/users")
    }

    pub fn roles() -> Self {
        Self::new("roles", "core/roles")
    }

    pub fn permissions() -> Self {
        Self::new("permissions", "core/permissions")
    }

    /// Looks up one of the built-in resources by name.
    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            "users" => Some(Self::users()),
            "roles" => Some(Self::roles()),
            "permissions" => Some(Self::permissions()),
            _ => None,
        }
    }

    /// Short name, used for export file names.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Route path relative to the base URL.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Path of the list endpoint.
    pub fn data_path(&self) -> String {
        format!("{}/data", self.path)
    }

    /// Path of a single record (detail page and delete endpoint).
    pub fn record_path(&self, id: &RecordId) -> String {
        format!("{}/{}", self.path, id)
    }

    /// Path of a record's edit page.
    pub fn edit_path(&self, id: &RecordId) -> String {
        format!("{}/{}/edit", self.path, id)
    }

    /// Path of a record's verification toggle.
    pub fn verify_path(&self, id: &RecordId) -> String {
        format!("{}/{}/verify", self.path, id)
    }
}
