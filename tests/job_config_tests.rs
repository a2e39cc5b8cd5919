//! YAML job file parsing and its effect on a run

use cityagg_core::config::{JobConfig, RunConfig};
use cityagg_core::error::Error;
use cityagg_exec::Engine;
use std::fs;
use std::path::PathBuf;

fn fixture(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
        .display()
        .to_string()
}

#[test]
fn test_parse_full_job() {
    let yaml = r#"
data_file: "input/cities.xml"
operations_file: "input/operations.xml"
output_file: "out/results.xml"
indent: 2
create_parent_dirs: true
"#;

    let job = JobConfig::from_yaml(yaml).unwrap();
    let mut cfg = RunConfig::default();
    cfg.apply_job(&job);

    assert_eq!(cfg.data_file, PathBuf::from("input/cities.xml"));
    assert_eq!(cfg.operations_file, PathBuf::from("input/operations.xml"));
    assert_eq!(cfg.output_file, PathBuf::from("out/results.xml"));
    assert_eq!(cfg.indent, 2);
    assert!(cfg.create_parent_dirs);
    assert!(cfg.validate().is_ok());
}

#[test]
fn test_empty_job_keeps_defaults() {
    let job = JobConfig::from_yaml("{}").unwrap();
    let mut cfg = RunConfig::new("a.xml", "b.xml", "c.xml");
    cfg.apply_job(&job);
    assert_eq!(cfg, RunConfig::new("a.xml", "b.xml", "c.xml"));
}

#[test]
fn test_unknown_key_is_rejected() {
    let yaml = r#"
data_file: "input/cities.xml"
threads: 4
"#;
    let err = JobConfig::from_yaml(yaml).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn test_wrong_type_is_rejected() {
    let err = JobConfig::from_yaml("indent: wide").unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn test_job_file_drives_a_run() {
    let mut dir = std::env::temp_dir();
    dir.push("cityagg-job-config-tests-run");
    let _ = fs::remove_dir_all(&dir);
    let output = dir.join("nested/results.xml");

    let yaml = format!(
        "data_file: \"{}\"\noperations_file: \"{}\"\noutput_file: \"{}\"\nindent: 2\ncreate_parent_dirs: true\n",
        fixture("input_city.xml"),
        fixture("input_operations.xml"),
        output.display()
    );
    let job = JobConfig::from_yaml(&yaml).unwrap();
    let mut cfg = RunConfig::default();
    cfg.apply_job(&job);

    let report = Engine::new(cfg).run().expect("run");
    assert_eq!(report.results.len(), 4);

    let xml = fs::read_to_string(&output).unwrap();
    assert!(xml.contains("\n  <result name=\"average-population-east\">4030418.67</result>\n"));
}
