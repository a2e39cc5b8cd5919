//! Runtime: load inputs, evaluate operations in order, write results, and
//! emit a `RunReport`.
//!
//! Error policy:
//! - `Engine::run` returns every failure to the caller.
//! - `process` logs and swallows input-class and output-write failures
//!   (clean termination, no output) but lets `UnsupportedOperation` propagate.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

use cityagg_core::hash::{hash_bytes, hash_parts};
use cityagg_core::prelude::{
    Entity, Error as CoreError, Hash256, Operation, ResultRecord, RunConfig, RunReport,
};

use cityagg_io::readers::{entities::parse_entities, operations::parse_operations, read_source};
use cityagg_io::writers::results::{write_output, ResultsWriter};

use cityagg_operators::eval::{evaluate, Evaluation};

use crate::metrics::PhaseTimer;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("invalid configuration: {0}")]
    Config(#[source] CoreError),

    #[error("loading {what} from {path}: {source}")]
    Load {
        what: &'static str,
        path: String,
        #[source]
        source: CoreError,
    },

    #[error("operation #{index} '{operation}': {source}")]
    Operation {
        index: usize,
        operation: String,
        #[source]
        source: CoreError,
    },

    #[error("writing results to {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: CoreError,
    },
}

impl ExecError {
    /// The underlying failure, classified by the core taxonomy.
    pub fn kind(&self) -> &CoreError {
        match self {
            ExecError::Config(e) => e,
            ExecError::Load { source, .. }
            | ExecError::Operation { source, .. }
            | ExecError::Write { source, .. } => source,
        }
    }

    /// Failures that `process` logs and turns into a clean, output-less exit.
    pub fn is_recoverable(&self) -> bool {
        self.kind().is_recoverable()
    }
}

/// Both input documents, parsed, plus their combined digest.
#[derive(Debug, Clone)]
pub struct Inputs {
    pub entities: Vec<Entity>,
    pub operations: Vec<Operation>,
    pub digest: Hash256,
}

/// Owns the run configuration and drives one batch run.
pub struct Engine {
    cfg: RunConfig,
}

impl Engine {
    pub fn new(cfg: RunConfig) -> Self {
        Self { cfg }
    }

    /// Read and parse both inputs. The two loads are independent.
    pub fn load(&self) -> Result<Inputs, ExecError> {
        self.cfg.validate_inputs().map_err(ExecError::Config)?;
        let _timer = PhaseTimer::start("load");

        let data_path = &self.cfg.data_file;
        let data_xml = read_source(data_path).map_err(load_error("entities", data_path))?;
        let entities = parse_entities(&data_xml).map_err(load_error("entities", data_path))?;

        let ops_path = &self.cfg.operations_file;
        let ops_xml = read_source(ops_path).map_err(load_error("operations", ops_path))?;
        let operations =
            parse_operations(&ops_xml).map_err(load_error("operations", ops_path))?;

        tracing::info!(
            entities = entities.len(),
            operations = operations.len(),
            "inputs loaded"
        );

        Ok(Inputs {
            entities,
            operations,
            digest: hash_parts(&[data_xml.as_bytes(), ops_xml.as_bytes()]),
        })
    }

    /// Execute the whole run and return its report.
    pub fn run(&self) -> Result<RunReport, ExecError> {
        self.cfg.validate().map_err(ExecError::Config)?;
        let started_ms = now_ms();

        let inputs = self.load()?;
        let mut report = RunReport::new(inputs.digest, started_ms);
        report.entity_count = inputs.entities.len();

        let records = {
            let _timer = PhaseTimer::start("evaluate");
            evaluate_all(&inputs.operations, &inputs.entities)?
        };

        let output_path = &self.cfg.output_file;
        let write_err = |e: cityagg_io::Error| ExecError::Write {
            path: output_path.display().to_string(),
            source: e.into_output(),
        };
        let bytes = {
            let _timer = PhaseTimer::start("write");
            let bytes = ResultsWriter::new(self.cfg.indent)
                .render(&records)
                .map_err(write_err)?;
            write_output(output_path, &bytes, self.cfg.create_parent_dirs).map_err(write_err)?;
            bytes
        };

        tracing::info!(
            results = records.len(),
            output = %output_path.display(),
            "results written"
        );

        report.results = records;
        Ok(report.finish(now_ms(), Some(hash_bytes(&bytes))))
    }
}

/// Evaluate every operation in order; the first failure stops the run.
pub fn evaluate_all(
    operations: &[Operation],
    entities: &[Entity],
) -> Result<Vec<ResultRecord>, ExecError> {
    operations
        .iter()
        .enumerate()
        .map(|(index, op)| {
            evaluate(op, entities)
                .map(|Evaluation { record, .. }| record)
                .map_err(|e| ExecError::Operation {
                    index,
                    operation: op.name.clone(),
                    source: e.into(),
                })
        })
        .collect()
}

/// Top-level driver with the logging policy applied.
///
/// Returns `Ok(Some(report))` on success and `Ok(None)` after logging a
/// malformed-input, empty-selection, or output-write failure. An unsupported
/// function is returned as `Err` and must fail the process.
pub fn process(cfg: RunConfig) -> Result<Option<RunReport>, ExecError> {
    match Engine::new(cfg).run() {
        Ok(report) => Ok(Some(report)),
        Err(e) if e.is_recoverable() => {
            tracing::error!(error = %e, "run aborted; no output written");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn load_error(what: &'static str, path: &Path) -> impl FnOnce(cityagg_io::Error) -> ExecError {
    let path = path.display().to_string();
    move |e| ExecError::Load {
        what,
        path,
        source: e.into_input(),
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ops() -> Vec<Operation> {
        vec![
            Operation::new("total", "aggregate", "sum", "population", ".*"),
            Operation::new("largest", "aggregate", "max", "area", ".*"),
        ]
    }

    fn cities() -> Vec<Entity> {
        vec![
            Entity::new("A", 100, 10.0).unwrap(),
            Entity::new("B", 300, 30.0).unwrap(),
        ]
    }

    #[test]
    fn evaluate_all_preserves_order() {
        let records = evaluate_all(&ops(), &cities()).unwrap();
        assert_eq!(
            records,
            vec![
                ResultRecord::new("total", "400.00"),
                ResultRecord::new("largest", "30.00"),
            ]
        );
    }

    #[test]
    fn evaluate_all_reports_failing_index() {
        let mut operations = ops();
        operations.push(Operation::new("odd", "aggregate", "median", "area", ".*"));
        let err = evaluate_all(&operations, &cities()).unwrap_err();
        assert!(matches!(err, ExecError::Operation { index: 2, .. }));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn missing_inputs_are_recoverable() {
        let cfg = RunConfig::new("/nope/cities.xml", "/nope/ops.xml", "/nope/out.xml");
        let err = Engine::new(cfg).run().unwrap_err();
        assert!(matches!(err, ExecError::Load { what: "entities", .. }));
        assert!(err.is_recoverable());
    }

    #[test]
    fn empty_paths_are_config_errors() {
        let err = Engine::new(RunConfig::default()).run().unwrap_err();
        assert!(matches!(err, ExecError::Config(_)));
    }

    #[test]
    fn engine_can_run_repeatedly_through_shared_reference() {
        let mut dir = std::env::temp_dir();
        dir.push("cityagg-exec-runtime-tests-rerun");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let data = dir.join("cities.xml");
        let ops = dir.join("operations.xml");
        std::fs::write(
            &data,
            r#"<cities><city name="A" population="100"><area>10</area></city></cities>"#,
        )
        .unwrap();
        std::fs::write(
            &ops,
            r#"<ops><operation name="t" type="x" func="sum" attrib="population" filter=".*"/></ops>"#,
        )
        .unwrap();

        let engine = Engine::new(RunConfig::new(data, ops, dir.join("out.xml")));
        let first = engine.run().unwrap();
        let second = engine.run().unwrap();
        assert_eq!(first.results, vec![ResultRecord::new("t", "100.00")]);
        assert_eq!(first.outputs_digest, second.outputs_digest);
    }
}
