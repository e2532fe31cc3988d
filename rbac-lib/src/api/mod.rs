//! Remote data endpoint operations

mod crud;
mod endpoint;
mod memory;
pub mod query;
mod resource;

pub use endpoint::*;
pub use memory::*;
pub use query::Direction;
pub use query::ListQuery;
pub use query::PageEnvelope;
pub use query::SortKey;
pub use resource::*;
