//! Document writers.

pub mod results;
