//! Ready-made tables for the panel's users, roles and permissions.

use std::sync::Arc;

use log::error;
use serde_json::Value;

use crate::AdminClient;
use crate::api::DataEndpoint;
use crate::api::Resource;
use crate::api::ResourceEndpoint;
use crate::config::TableConfig;
use crate::error::ColumnError;
use crate::export::ExportFormatter;
use crate::export::ExportRow;
use crate::model::Record;
use crate::render::Column;
use crate::render::Columns;
use crate::render::format;
use crate::table::DataTable;

/// A resource together with its columns, export projection and the fields
/// its server searches.
pub struct ResourceTable {
    pub resource: Resource,
    pub columns: Columns,
    pub formatter: Arc<dyn ExportFormatter>,
    pub search_fields: &'static [&'static str],
}

impl ResourceTable {
    /// HTTP endpoint for this resource.
    pub fn endpoint(&self, client: AdminClient) -> ResourceEndpoint {
        ResourceEndpoint::new(client, self.resource.clone())
    }

    /// Builds the table over `endpoint`, consuming the column set.
    pub fn into_table(self, endpoint: Arc<dyn DataEndpoint>, config: TableConfig) -> (DataTable, TableParts) {
        let table = DataTable::new(endpoint, self.columns, config);
        let parts = TableParts {
            resource: self.resource,
            formatter: self.formatter,
        };
        (table, parts)
    }
}

/// What stays with the caller once the columns move into a [`DataTable`].
#[derive(Clone)]
pub struct TableParts {
    pub resource: Resource,
    pub formatter: Arc<dyn ExportFormatter>,
}

/// Looks up a preset by resource name.
pub fn by_name(name: &str) -> Option<ResourceTable> {
    match name {
        "users" => Some(users()),
        "roles" => Some(roles()),
        "permissions" => Some(permissions()),
        _ => None,
    }
}

/// Users: Name, Email, Verified, Created At, Updated At.
pub fn users() -> ResourceTable {
    let columns = Columns::new([
        Column::new("name", "Name"),
        Column::new("email", "Email"),
        Column::new("email_verified_at", "Verified").cell(format::verification_cell("email_verified_at")),
        date_column("created_at", "Created At"),
        date_column("updated_at", "Updated At"),
    ]);

    ResourceTable {
        resource: Resource::users(),
        columns: fixed_columns(columns),
        formatter: Arc::new(|records: &[Record]| {
            numbered(records, &[("Name", "name"), ("Email", "email"), ("Created At", "created_at"), ("Updated At", "updated_at")])
        }),
        search_fields: &["name", "email"],
    }
}

/// Roles: Name, Created At, Updated At.
pub fn roles() -> ResourceTable {
    named_resource(Resource::roles())
}

/// Permissions: Name, Created At, Updated At.
pub fn permissions() -> ResourceTable {
    named_resource(Resource::permissions())
}

fn named_resource(resource: Resource) -> ResourceTable {
    let columns = Columns::new([
        Column::new("name", "Name"),
        date_column("created_at", "Created At"),
        date_column("updated_at", "Updated At"),
    ]);

    ResourceTable {
        resource,
        columns: fixed_columns(columns),
        formatter: Arc::new(|records: &[Record]| {
            numbered(records, &[("Name", "name"), ("Created At", "created_at"), ("Updated At", "updated_at")])
        }),
        search_fields: &["name"],
    }
}

fn fixed_columns(columns: Result<Columns, ColumnError>) -> Columns {
    columns.unwrap_or_else(|e| {
        error!("preset columns rejected: {}", e);
        Columns::empty()
    })
}

fn date_column(key: &'static str, label: &str) -> Column {
    Column::new(key, label).cell(format::date_cell(key))
}

/// `No` (1-based position in the selection) followed by the mapped fields.
fn numbered(records: &[Record], fields: &[(&str, &str)]) -> Vec<ExportRow> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let mut row = ExportRow::new();
            row.insert("No".to_string(), Value::from(i + 1));
            for (label, field) in fields {
                let value = record.get(field).cloned().unwrap_or(Value::Null);
                row.insert(label.to_string(), value);
            }
            row
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::ColumnSpec;

    #[test]
    fn test_user_columns() {
        let users = users();
        let keys: Vec<_> = users.columns.keys().collect();
        assert_eq!(keys, ["name", "email", "email_verified_at", "created_at", "updated_at"]);
        assert_eq!(users.columns.len(), 5);
        assert_eq!(users.search_fields, ["name", "email"]);
        assert_eq!(users.resource, Resource::users());
    }

    #[test]
    fn test_user_export_projection() {
        let record = Record::new()
            .set("id", 9)
            .set("name", "Ayu")
            .set("email", "ayu@example.com")
            .set("password", "secret")
            .set("created_at", "2024-01-01T00:00:00.000000Z")
            .set("updated_at", "2024-01-02T00:00:00.000000Z");
        let rows = users().formatter.format(&[record.clone(), record]);
        let keys: Vec<_> = rows[0].keys().map(String::as_str).collect();
        assert_eq!(keys, ["No", "Name", "Email", "Created At", "Updated At"]);
        assert_eq!(rows[1]["No"], 2);
        assert!(!rows[0].contains_key("password"));
    }

    #[test]
    fn test_role_and_permission_presets() {
        for preset in [roles(), permissions()] {
            let keys: Vec<_> = preset.columns.keys().collect();
            assert_eq!(keys, ["name", "created_at", "updated_at"]);
            assert_eq!(preset.columns.len(), 3);
            assert_eq!(preset.search_fields, ["name"]);
            let rows = preset.formatter.format(&[Record::new().set("name", "admin")]);
            let labels: Vec<_> = rows[0].keys().map(String::as_str).collect();
            assert_eq!(labels, ["No", "Name", "Created At", "Updated At"]);
        }
        assert!(by_name("teams").is_none());
        assert!(fixed_columns(Columns::new([Column::new("name", "A"), Column::new("name", "B")])).is_empty());
        assert!(by_name("roles").unwrap().columns.get("name").unwrap().sortable());
    }
}
