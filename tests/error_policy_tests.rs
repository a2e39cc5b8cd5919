//! How the driver classifies failures: which ones are logged and swallowed,
//! and which propagate.

use cityagg_core::config::RunConfig;
use cityagg_core::error::Error as CoreError;
use cityagg_exec::{process, Engine, ExecError};
use std::fs;
use std::path::{Path, PathBuf};

const CITIES: &str = r#"<cities>
    <city name="Springfield" population="30720"><area>12.5</area></city>
    <city name="Shelbyville" population="21000"><area>9.25</area></city>
</cities>
"#;

fn temp_dir(name: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!("cityagg-error-policy-tests-{name}"));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn single_op(func: &str, attrib: &str, filter: &str) -> String {
    format!(
        "<operations>\n    <operation name=\"op\" type=\"aggregate\" func=\"{func}\" attrib=\"{attrib}\" filter=\"{filter}\"/>\n</operations>\n"
    )
}

fn setup(dir: &Path, cities: &str, operations: &str) -> RunConfig {
    let data = dir.join("cities.xml");
    let ops = dir.join("operations.xml");
    fs::write(&data, cities).unwrap();
    fs::write(&ops, operations).unwrap();
    RunConfig::new(data, ops, dir.join("output.xml"))
}

#[test]
fn test_unsupported_function_propagates() {
    let dir = temp_dir("median");
    let cfg = setup(&dir, CITIES, &single_op("median", "population", ".*"));

    let err = process(cfg).unwrap_err();
    assert!(matches!(err.kind(), CoreError::UnsupportedOperation(f) if f.contains("median")));
    assert!(!dir.join("output.xml").exists());
}

#[test]
fn test_malformed_entities_abort_without_output() {
    let dir = temp_dir("malformed");
    let cfg = setup(
        &dir,
        "<cities><city name=\"X\" population=\"10\"><area>1.0</area>",
        &single_op("sum", "population", ".*"),
    );

    let outcome = process(cfg).expect("input errors are logged, not returned");
    assert!(outcome.is_none());
    assert!(!dir.join("output.xml").exists());
}

#[test]
fn test_missing_area_child_is_malformed_input() {
    let dir = temp_dir("no-area");
    let cfg = setup(
        &dir,
        "<cities><city name=\"X\" population=\"10\"/></cities>",
        &single_op("sum", "population", ".*"),
    );

    let err = Engine::new(cfg).run().unwrap_err();
    assert!(matches!(err, ExecError::Load { what: "entities", .. }));
    assert!(err.kind().is_input());
}

#[test]
fn test_missing_operations_file_is_recoverable() {
    let dir = temp_dir("missing-ops");
    let mut cfg = setup(&dir, CITIES, "");
    cfg.operations_file = dir.join("does-not-exist.xml");

    let err = Engine::new(cfg.clone()).run().unwrap_err();
    assert!(matches!(err, ExecError::Load { what: "operations", .. }));
    assert!(process(cfg).unwrap().is_none());
}

#[test]
fn test_invalid_filter_is_malformed_input() {
    let dir = temp_dir("bad-regex");
    let cfg = setup(&dir, CITIES, &single_op("sum", "area", "(unclosed"));

    let err = Engine::new(cfg.clone()).run().unwrap_err();
    assert!(matches!(err.kind(), CoreError::MalformedInput(_)));
    assert!(process(cfg).unwrap().is_none());
}

#[test]
fn test_zero_matches_is_empty_selection() {
    let dir = temp_dir("empty-selection");
    let cfg = setup(&dir, CITIES, &single_op("average", "area", "Spring"));

    let err = Engine::new(cfg.clone()).run().unwrap_err();
    assert!(matches!(
        err.kind(),
        CoreError::EmptySelection { operation, filter } if operation == "op" && filter == "Spring"
    ));
    assert!(process(cfg).unwrap().is_none());
    assert!(!dir.join("output.xml").exists());
}

#[test]
fn test_failure_after_first_operation_leaves_no_partial_output() {
    let dir = temp_dir("no-partial");
    let ops = "<operations>\n    <operation name=\"ok\" type=\"aggregate\" func=\"sum\" attrib=\"population\" filter=\".*\"/>\n    <operation name=\"bad\" type=\"aggregate\" func=\"mode\" attrib=\"population\" filter=\".*\"/>\n</operations>\n";
    let cfg = setup(&dir, CITIES, ops);

    let err = Engine::new(cfg).run().unwrap_err();
    assert!(matches!(err, ExecError::Operation { index: 1, .. }));
    assert!(!dir.join("output.xml").exists());
}

#[test]
fn test_unwritable_output_is_recoverable() {
    let dir = temp_dir("unwritable");
    let mut cfg = setup(&dir, CITIES, &single_op("sum", "population", ".*"));
    cfg.output_file = dir.join("missing-parent/output.xml");

    let err = Engine::new(cfg.clone()).run().unwrap_err();
    assert!(matches!(err.kind(), CoreError::OutputWrite(_)));
    assert!(process(cfg).unwrap().is_none());
}

#[test]
fn test_second_root_element_aborts_without_output() {
    let dir = temp_dir("two-roots");
    let two_roots = format!("{CITIES}<cities><city name=\"Ogdenville\" population=\"5\"><area>1</area></city></cities>\n");
    let cfg = setup(&dir, &two_roots, &single_op("sum", "population", ".*"));

    let err = Engine::new(cfg.clone()).run().unwrap_err();
    assert!(matches!(err, ExecError::Load { what: "entities", .. }));
    assert!(err.to_string().contains("more than one root"));
    assert!(process(cfg).unwrap().is_none());
    assert!(!dir.join("output.xml").exists());
}

#[test]
fn test_trailing_text_after_root_aborts_without_output() {
    let dir = temp_dir("trailing-text");
    let ops = format!("{}garbage", single_op("sum", "population", ".*"));
    let cfg = setup(&dir, CITIES, &ops);

    let err = Engine::new(cfg.clone()).run().unwrap_err();
    assert!(matches!(err, ExecError::Load { what: "operations", .. }));
    assert!(process(cfg).unwrap().is_none());
    assert!(!dir.join("output.xml").exists());
}
