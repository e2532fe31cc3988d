//! Error types

mod api;
mod column;
mod export;
mod field;
mod validation;

pub use api::*;
pub use column::*;
pub use export::*;
pub use field::*;
pub use validation::*;

/// Top-level error for table operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Remote endpoint failure.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Export failure.
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Invalid column definition or column reference.
    #[error(transparent)]
    Column(#[from] ColumnError),
}

impl Error {
    /// Returns the field-level validation errors, if this is a validation failure.
    pub fn validation(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Api(ApiError::Validation(errors)) => Some(errors),
            _ => None,
        }
    }
}
