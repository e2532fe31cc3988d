//! List, delete and row-state operations on admin resources
//!
//! # Example
//!
//! ```ignore
//! use rbac_lib::api::{ListQuery, Resource, SortKey};
//!
//! let query = ListQuery {
//!     page: 2,
//!     per_page: Some(25),
//!     global_search: "example.com".into(),
//!     order: Some(SortKey::asc("name")),
//! };
//! let page = client.list(&Resource::users(), &query).await?;
//!
//! client.delete(&Resource::users(), &RecordId::Int(7)).await?;
//! ```

use log::debug;
use reqwest::Method;
use serde_json::json;

use super::Resource;
use super::query::ListQuery;
use super::query::PageEnvelope;
use crate::AdminClient;
use crate::error::ApiError;
use crate::model::RecordId;

impl AdminClient {
    /// Fetches one page of a resource's list endpoint.
    ///
    /// `GET <resource>/data?page=&perPage=&globalSearch=&orderBy=&orderDirection=`
    pub async fn list(&self, resource: &Resource, query: &ListQuery) -> Result<PageEnvelope, ApiError> {
        let mut url = self.url(&resource.data_path())?;
        query.apply_to(&mut url);

        let response = self.request(Method::GET, url, None, true).await?;
        let body = response.text().await?;
        let page: PageEnvelope = serde_json::from_str(&body)
            .map_err(|e| ApiError::parse_with_body(e.to_string(), body))?;

        debug!(
            "{}: page {} with {} of {} records",
            resource.name(),
            page.current_page(),
            page.len(),
            page.total()
        );
        Ok(page)
    }

    /// Deletes a record.
    ///
    /// `DELETE <resource>/<id>`. Sent once, never retried.
    pub async fn delete(&self, resource: &Resource, id: &RecordId) -> Result<(), ApiError> {
        let url = self.url(&resource.record_path(id))?;
        self.request(Method::DELETE, url, None, false).await?;
        Ok(())
    }

    /// Marks a record as verified.
    ///
    /// `PUT <resource>/<id>/verify` with an empty body.
    pub async fn verify(&self, resource: &Resource, id: &RecordId) -> Result<(), ApiError> {
        let url = self.url(&resource.verify_path(id))?;
        self.request(Method::PUT, url, None, true).await?;
        Ok(())
    }

    /// Replaces the permissions granted to a role.
    ///
    /// `POST core/roles/access` with `{ "role_id": .., "permissions": [..] }`.
    pub async fn assign_role_permissions(&self, role_id: &RecordId, permissions: &[RecordId]) -> Result<(), ApiError> {
        let url = self.url(&format!("{}/access", Resource::roles().path()))?;
        let body = json!({
            "role_id": role_id.to_value(),
            "permissions": permissions.iter().map(RecordId::to_value).collect::<Vec<_>>(),
        });
        self.request(Method::POST, url, Some(&body), false).await?;
        Ok(())
    }
}
