//! Tracing hooks for run phases.
//!
//! Only emits `tracing` events; the binary decides where they go.

use std::time::Instant;

/// Emit one trace event carrying `key_values`.
pub fn emit_span(event: &str, key_values: &[(&str, String)]) {
    let span = tracing::span!(tracing::Level::TRACE, "cityagg", event);
    let _entered = span.enter();
    for (k, v) in key_values {
        tracing::trace!(%event, %k, %v, "metric");
    }
}

/// Measures one phase and reports its duration through `emit_span` on drop.
pub struct PhaseTimer {
    phase: &'static str,
    started: Instant,
}

impl PhaseTimer {
    pub fn start(phase: &'static str) -> Self {
        Self {
            phase,
            started: Instant::now(),
        }
    }
}

impl Drop for PhaseTimer {
    fn drop(&mut self) {
        let micros = self.started.elapsed().as_micros();
        emit_span(self.phase, &[("elapsed_us", micros.to_string())]);
    }
}
