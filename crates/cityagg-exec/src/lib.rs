#![forbid(unsafe_code)]
//! cityagg-exec: the run driver and its error policy.
//!
//! A run loads both input documents, evaluates every operation in document
//! order, renders the results document in memory, and writes it in one step.
//! Nothing is written when any step fails.

pub mod metrics;
pub mod runtime;

pub use runtime::{evaluate_all, process, Engine, ExecError, Inputs};
