//! List query types.
//!
//! - [`ListQuery`] - parameters of one list request
//! - [`SortKey`] / [`Direction`] - requested ordering
//! - [`PageEnvelope`] - a page of records with pagination metadata

mod list;
mod order;
mod page;

pub use list::ListQuery;
pub use order::Direction;
pub use order::SortKey;
pub use page::PageEnvelope;
