#![forbid(unsafe_code)]
//! cityagg-operators: the evaluation kernels behind each operation.
//!
//! - `filter`: full-match regex selection over entity names.
//! - `aggregate`: per-function attribute resolution and the four aggregates.
//! - `eval`: filter → dispatch → aggregate → round for one operation.
//!
//! Everything here is pure and synchronous; IO lives in `cityagg-io`.

pub mod aggregate;
pub mod eval;
pub mod filter;
pub mod traits;

pub use aggregate::{compute, resolve_path, Aggregate, AggregatePath};
pub use eval::{describe, evaluate, Evaluation, OperationPlan};
pub use filter::NameFilter;
pub use traits::OpError;
