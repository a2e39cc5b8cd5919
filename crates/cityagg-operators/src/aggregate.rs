//! Aggregation kernels.
//!
//! Attribute resolution differs per function and is written out per function:
//! `average` takes the area path only for `area` and otherwise averages
//! populations, while `sum`, `max`, and `min` take the population path only
//! for `population` and otherwise work on areas. Population paths of `sum`,
//! `max`, and `min` are exact integers; everything else is floating point.

use cityagg_core::decimal::{format_float, format_integer};
use cityagg_core::entity::Entity;
use cityagg_core::error::Result;
use cityagg_core::operation::{Attribute, Function};
use serde::{Deserialize, Serialize};

/// The concrete computation an operation resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatePath {
    pub function: Function,
    pub attribute: Attribute,
}

impl AggregatePath {
    fn new(function: Function, attribute: Attribute) -> Self {
        Self {
            function,
            attribute,
        }
    }

    /// True when the result is an exact integer rather than a float.
    pub fn is_integral(&self) -> bool {
        self.attribute == Attribute::Population && self.function != Function::Average
    }
}

/// Pick the attribute path for `function` given the raw `attrib` string.
pub fn resolve_path(function: Function, attribute: &str) -> AggregatePath {
    match function {
        Function::Average => {
            if Attribute::Area.is_named(attribute) {
                AggregatePath::new(Function::Average, Attribute::Area)
            } else {
                AggregatePath::new(Function::Average, Attribute::Population)
            }
        }
        Function::Sum => {
            if Attribute::Population.is_named(attribute) {
                AggregatePath::new(Function::Sum, Attribute::Population)
            } else {
                AggregatePath::new(Function::Sum, Attribute::Area)
            }
        }
        Function::Max => {
            if Attribute::Population.is_named(attribute) {
                AggregatePath::new(Function::Max, Attribute::Population)
            } else {
                AggregatePath::new(Function::Max, Attribute::Area)
            }
        }
        Function::Min => {
            if Attribute::Population.is_named(attribute) {
                AggregatePath::new(Function::Min, Attribute::Population)
            } else {
                AggregatePath::new(Function::Min, Attribute::Area)
            }
        }
    }
}

/// An unrounded aggregate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Aggregate {
    Integer(u128),
    Float(f64),
}

impl Aggregate {
    /// Two-decimal, half-up, fixed-point rendering.
    pub fn render(&self) -> Result<String> {
        match self {
            Aggregate::Integer(v) => Ok(format_integer(*v)),
            Aggregate::Float(v) => format_float(*v),
        }
    }
}

/// Compute the aggregate over `entities`. `None` when the selection is empty.
pub fn compute(path: AggregatePath, entities: &[&Entity]) -> Option<Aggregate> {
    if entities.is_empty() {
        return None;
    }
    let populations = || entities.iter().map(|e| e.population());
    let areas = || entities.iter().map(|e| e.area());
    let count = entities.len() as f64;

    let value = match (path.function, path.attribute) {
        (Function::Average, Attribute::Area) => Aggregate::Float(compensated_sum(areas()) / count),
        (Function::Average, Attribute::Population) => {
            let total: u128 = populations().map(u128::from).sum();
            Aggregate::Float(total as f64 / count)
        }
        (Function::Sum, Attribute::Population) => {
            Aggregate::Integer(populations().map(u128::from).sum())
        }
        (Function::Sum, Attribute::Area) => Aggregate::Float(compensated_sum(areas())),
        (Function::Max, Attribute::Population) => {
            Aggregate::Integer(u128::from(populations().max()?))
        }
        (Function::Max, Attribute::Area) => Aggregate::Float(areas().fold(f64::MIN, f64::max)),
        (Function::Min, Attribute::Population) => {
            Aggregate::Integer(u128::from(populations().min()?))
        }
        (Function::Min, Attribute::Area) => Aggregate::Float(areas().fold(f64::MAX, f64::min)),
    };
    Some(value)
}

/// Kahan-compensated summation, so long area columns do not drift.
fn compensated_sum(values: impl Iterator<Item = f64>) -> f64 {
    let mut sum = 0.0f64;
    let mut compensation = 0.0f64;
    for v in values {
        let y = v - compensation;
        let t = sum + y;
        compensation = (t - sum) - y;
        sum = t;
    }
    sum
}
