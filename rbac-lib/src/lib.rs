//! RBAC admin panel data table library
//!
//! The server-driven data table behind the Users, Roles and Permissions
//! screens of an admin panel: a client for the panel's JSON list endpoints,
//! a table state manager, a column/row renderer, an export engine and the
//! pagination/toolbar controls.

pub mod api;
pub mod config;
pub mod controls;
pub mod error;
pub mod export;
pub mod model;
pub mod presets;
pub mod render;
pub mod table;

mod client;
mod retry;

pub use client::*;
pub use retry::RetryConfig;
