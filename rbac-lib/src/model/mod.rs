//! Record and resource models

mod id;
mod rbac;
mod record;

pub use id::*;
pub use rbac::*;
pub use record::*;
