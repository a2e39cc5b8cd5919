//! Operation records, the closed set of aggregation functions, and results.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A declarative aggregation request, exactly as read from the operation file.
///
/// All fields are verbatim strings. `function` and `attribute` are resolved at
/// evaluation time, so an unknown function only fails the run when reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Output label; not required to be unique.
    pub name: String,
    /// The input `type` attribute. Carried through, never consulted.
    pub kind: String,
    pub function: String,
    pub attribute: String,
    /// Regular expression matched against the whole entity name.
    pub filter: String,
}

impl Operation {
    pub fn new(
        name: impl Into<String>,
        kind: impl Into<String>,
        function: impl Into<String>,
        attribute: impl Into<String>,
        filter: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            function: function.into(),
            attribute: attribute.into(),
            filter: filter.into(),
        }
    }

    /// Resolve the function name (case-insensitive).
    pub fn resolve_function(&self) -> Result<Function, Error> {
        self.function.parse()
    }
}

/// The four supported aggregation functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Function {
    Average,
    Sum,
    Min,
    Max,
}

impl Function {
    pub const ALL: [Function; 4] = [Function::Average, Function::Sum, Function::Min, Function::Max];

    pub fn as_str(&self) -> &'static str {
        match self {
            Function::Average => "average",
            Function::Sum => "sum",
            Function::Min => "min",
            Function::Max => "max",
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Function {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Function::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnsupportedOperation(format!("unknown function '{}'", s)))
    }
}

/// Entity attribute an aggregate was computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attribute {
    Population,
    Area,
}

impl Attribute {
    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::Population => "population",
            Attribute::Area => "area",
        }
    }

    /// Case-insensitive comparison against an operation's `attribute` string.
    pub fn is_named(&self, raw: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(raw)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One computed, rounded output value paired with its operation name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub name: String,
    pub value: String,
}

impl ResultRecord {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}
