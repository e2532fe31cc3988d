//! CLI error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Table(#[from] rbac_lib::error::Error),

    #[error(transparent)]
    Settings(#[from] crate::settings::SettingsError),

    #[error("no base URL given; pass --base-url or set base_url in {0}")]
    MissingBaseUrl(String),

    #[error("unknown resource '{0}' (expected users, roles or permissions)")]
    UnknownResource(String),

    #[error("invalid sort '{0}'; expected column:asc or column:desc")]
    InvalidSort(String),

    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

impl From<rbac_lib::error::ApiError> for Error {
    fn from(e: rbac_lib::error::ApiError) -> Self {
        Self::Table(e.into())
    }
}

impl From<rbac_lib::error::ExportError> for Error {
    fn from(e: rbac_lib::error::ExportError) -> Self {
        Self::Table(e.into())
    }
}

impl From<rbac_lib::error::ColumnError> for Error {
    fn from(e: rbac_lib::error::ColumnError) -> Self {
        Self::Table(e.into())
    }
}
