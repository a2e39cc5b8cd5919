//! Entity records loaded from the entity input file.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One city: a name plus its numeric attributes. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    name: String,
    population: u64,
    area: f64,
}

impl Entity {
    /// Build a validated entity.
    ///
    /// Rejects an empty name and a negative or non-finite area. Population is
    /// unsigned, so callers parsing text must reject negative values first.
    pub fn new(name: impl Into<String>, population: u64, area: f64) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::MalformedInput("entity name must not be empty".into()));
        }
        if !area.is_finite() {
            return Err(Error::MalformedInput(format!(
                "entity '{}' has non-finite area {}",
                name, area
            )));
        }
        if area < 0.0 {
            return Err(Error::MalformedInput(format!(
                "entity '{}' has negative area {}",
                name, area
            )));
        }
        Ok(Self {
            name,
            population,
            area,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn population(&self) -> u64 {
        self.population
    }

    pub fn area(&self) -> f64 {
        self.area
    }
}
