//! DataEndpoint trait and the HTTP implementation

use async_trait::async_trait;

use super::ListQuery;
use super::PageEnvelope;
use super::Resource;
use crate::AdminClient;
use crate::error::ApiError;
use crate::model::RecordId;

/// The remote data source behind one table.
///
/// A data table issues list requests and row actions through this trait and
/// never talks HTTP directly. [`ResourceEndpoint`] is the HTTP
/// implementation, [`MemoryEndpoint`](super::MemoryEndpoint) an in-process
/// one.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use rbac_lib::api::{DataEndpoint, ListQuery, PageEnvelope};
/// use rbac_lib::error::ApiError;
/// use rbac_lib::model::RecordId;
///
/// struct Fixed(PageEnvelope);
///
/// #[async_trait]
/// impl DataEndpoint for Fixed {
///     async fn list(&self, _query: &ListQuery) -> Result<PageEnvelope, ApiError> {
///         Ok(self.0.clone())
///     }
///
///     async fn delete(&self, _id: &RecordId) -> Result<(), ApiError> {
///         Err(ApiError::Unsupported("delete"))
///     }
/// }
/// ```
#[async_trait]
pub trait DataEndpoint: Send + Sync {
    /// Fetches one page of records.
    async fn list(&self, query: &ListQuery) -> Result<PageEnvelope, ApiError>;

    /// Deletes one record.
    async fn delete(&self, id: &RecordId) -> Result<(), ApiError>;

    /// Flips the verification flag of one record.
    ///
    /// Only user endpoints support this; the default rejects it.
    async fn verify(&self, _id: &RecordId) -> Result<(), ApiError> {
        Err(ApiError::Unsupported("verify"))
    }
}

/// A [`DataEndpoint`] backed by an [`AdminClient`] and one [`Resource`].
#[derive(Clone)]
pub struct ResourceEndpoint {
    client: AdminClient,
    resource: Resource,
}

impl ResourceEndpoint {
    pub fn new(client: AdminClient, resource: Resource) -> Self {
        Self { client, resource }
    }

    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    pub fn client(&self) -> &AdminClient {
        &self.client
    }
}

#[async_trait]
impl DataEndpoint for ResourceEndpoint {
    async fn list(&self, query: &ListQuery) -> Result<PageEnvelope, ApiError> {
        self.client.list(&self.resource, query).await
    }

    async fn delete(&self, id: &RecordId) -> Result<(), ApiError> {
        self.client.delete(&self.resource, id).await
    }

    async fn verify(&self, id: &RecordId) -> Result<(), ApiError> {
        self.client.verify(&self.resource, id).await
    }
}
