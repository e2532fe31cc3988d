//! Table state management.
//!
//! [`DataTable`] owns pagination, sort, search and selection, and orchestrates
//! fetches against a [`DataEndpoint`](crate::api::DataEndpoint).

mod data_table;
mod notice;
mod pagination;
mod selection;
mod sort;

pub use data_table::*;
pub use notice::*;
pub use pagination::*;
pub use selection::*;
pub use sort::*;
