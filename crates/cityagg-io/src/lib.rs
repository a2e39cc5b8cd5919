#![forbid(unsafe_code)]
//! cityagg-io: XML readers that produce typed records, and the results writer.
//!
//! Readers take the whole document as a string (`parse_*`) or a path
//! (`read_*`); files are read in one call and closed before parsing starts.
//! The writer renders the full document in memory and writes it in one step.

pub mod error;
pub mod names;
pub mod readers;
pub mod writers;

pub use error::{Error, Result};
pub use readers::entities::{parse_entities, read_entities};
pub use readers::operations::{parse_operations, read_operations};
pub use readers::read_source;
pub use writers::results::{render_results, write_output, ResultsWriter};
