//! Column and row rendering.
//!
//! Turns a [`TableSnapshot`](crate::table::TableSnapshot) into header and
//! body cells. The renderer injects the selection checkbox, the row number
//! and the row actions around the caller's columns.

mod actions;
mod cell;
mod column;
pub mod format;
mod rows;

pub use actions::*;
pub use cell::*;
pub use column::*;
pub use rows::*;
