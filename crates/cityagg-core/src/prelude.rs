//! Convenient re-exports for downstream crates.

pub use crate::config::{JobConfig, RunConfig};
pub use crate::decimal::{format_float, format_integer};
pub use crate::entity::Entity;
pub use crate::error::{Error, Result};
pub use crate::hash::Hash256;
pub use crate::operation::{Attribute, Function, Operation, ResultRecord};
pub use crate::report::RunReport;
