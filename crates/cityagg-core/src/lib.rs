#![forbid(unsafe_code)]
//! cityagg-core: records, error taxonomy, configuration, and run reports.
//!
//! Design intent:
//! - Pure data and pure functions; no XML, regex, or filesystem access here.
//! - Records are immutable once built and validated at construction.
//! - Downstream crates (io, operators, exec) convert their errors into
//!   `error::Error` so the top-level policy can classify failures.

pub mod config;
pub mod decimal;
pub mod entity;
pub mod error;
pub mod hash;
pub mod operation;
pub mod prelude;
pub mod report;

/// Engine version string recorded in every `RunReport`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
