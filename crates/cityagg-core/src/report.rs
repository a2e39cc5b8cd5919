//! Run report emitted after a successful run, for audit and comparison.
//!
//! Identical inputs always produce identical `results` and `outputs_digest`;
//! only `id` and the timestamps differ between runs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;
use crate::hash::Hash256;
use crate::operation::ResultRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(pub Uuid);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub id: ReportId,

    /// Engine version string for provenance.
    pub engine_version: String,

    /// Digest over the entity and operation documents, in that order.
    pub inputs_digest: Hash256,

    /// Digest of the bytes written to the output file.
    pub outputs_digest: Option<Hash256>,

    pub entity_count: usize,

    /// One record per operation, in operation order.
    pub results: Vec<ResultRecord>,

    /// Milliseconds since Unix epoch (UTC).
    pub started_ms: u64,
    pub finished_ms: u64,
}

impl RunReport {
    pub fn new(inputs_digest: Hash256, started_ms: u64) -> Self {
        Self {
            id: ReportId(Uuid::new_v4()),
            engine_version: crate::VERSION.to_string(),
            inputs_digest,
            outputs_digest: None,
            entity_count: 0,
            results: Vec::new(),
            started_ms,
            finished_ms: started_ms,
        }
    }

    pub fn finish(mut self, finished_ms: u64, outputs_digest: Option<Hash256>) -> Self {
        self.finished_ms = finished_ms;
        self.outputs_digest = outputs_digest;
        self
    }

    pub fn duration_ms(&self) -> u64 {
        self.finished_ms.saturating_sub(self.started_ms)
    }

    /// Pretty-printed JSON, as written by `cityagg run --report`.
    pub fn to_json_pretty(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }
}
