//! Run configuration that downstream crates can serialize/deserialize.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Entity (city) input document.
    pub data_file: PathBuf,

    /// Operation input document.
    pub operations_file: PathBuf,

    /// Destination of the results document.
    pub output_file: PathBuf,

    /// Spaces per nesting level in the written document.
    pub indent: usize,

    /// Create missing parent directories of `output_file` before writing.
    pub create_parent_dirs: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::new(),
            operations_file: PathBuf::new(),
            output_file: PathBuf::new(),
            indent: 4,
            create_parent_dirs: false,
        }
    }
}

impl RunConfig {
    pub fn new(
        data_file: impl Into<PathBuf>,
        operations_file: impl Into<PathBuf>,
        output_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            data_file: data_file.into(),
            operations_file: operations_file.into(),
            output_file: output_file.into(),
            ..Self::default()
        }
    }

    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `CITYAGG_DATA_FILE`: entity input path
    /// - `CITYAGG_OPERATIONS_FILE`: operation input path
    /// - `CITYAGG_OUTPUT_FILE`: output path
    /// - `CITYAGG_INDENT`: spaces per indentation level
    /// - `CITYAGG_CREATE_PARENT_DIRS`: `true`/`false`
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var("CITYAGG_DATA_FILE") {
            cfg.data_file = s.into();
        }

        if let Ok(s) = std::env::var("CITYAGG_OPERATIONS_FILE") {
            cfg.operations_file = s.into();
        }

        if let Ok(s) = std::env::var("CITYAGG_OUTPUT_FILE") {
            cfg.output_file = s.into();
        }

        if let Ok(s) = std::env::var("CITYAGG_INDENT") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.indent = v;
            }
        }

        if let Ok(s) = std::env::var("CITYAGG_CREATE_PARENT_DIRS") {
            if let Ok(v) = s.parse::<bool>() {
                cfg.create_parent_dirs = v;
            }
        }

        cfg
    }

    /// Overlay the fields a job file sets.
    pub fn apply_job(&mut self, job: &JobConfig) {
        if let Some(p) = &job.data_file {
            self.data_file = p.clone();
        }
        if let Some(p) = &job.operations_file {
            self.operations_file = p.clone();
        }
        if let Some(p) = &job.output_file {
            self.output_file = p.clone();
        }
        if let Some(indent) = job.indent {
            self.indent = indent;
        }
        if let Some(create) = job.create_parent_dirs {
            self.create_parent_dirs = create;
        }
    }

    /// Check that all three paths are set.
    pub fn validate(&self) -> Result<()> {
        self.validate_inputs()?;
        if self.output_file.as_os_str().is_empty() {
            return Err(Error::Config("output file path is empty".into()));
        }
        Ok(())
    }

    /// Check only the two input paths (enough for validate/explain).
    pub fn validate_inputs(&self) -> Result<()> {
        if self.data_file.as_os_str().is_empty() {
            return Err(Error::Config("data file path is empty".into()));
        }
        if self.operations_file.as_os_str().is_empty() {
            return Err(Error::Config("operations file path is empty".into()));
        }
        Ok(())
    }
}

/// YAML job file. Every field is optional; set fields override the env config.
///
/// ```yaml
/// data_file: "input/cities.xml"
/// operations_file: "input/operations.xml"
/// output_file: "out/results.xml"
/// indent: 2
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JobConfig {
    pub data_file: Option<PathBuf>,
    pub operations_file: Option<PathBuf>,
    pub output_file: Option<PathBuf>,
    pub indent: Option<usize>,
    pub create_parent_dirs: Option<bool>,
}

impl JobConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}
