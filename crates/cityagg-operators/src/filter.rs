//! Name filter with whole-string regex semantics.
//!
//! The pattern must match the entire entity name: `Spring` does not select
//! `Springfield`, `Spring.*` does.

use cityagg_core::entity::Entity;
use regex::Regex;

use crate::traits::OpError;

#[derive(Debug, Clone)]
pub struct NameFilter {
    regex: Regex,
}

impl NameFilter {
    /// Compile `pattern` anchored at both ends.
    ///
    /// Lookaround and backreferences are not supported and are reported as
    /// an invalid filter.
    pub fn new(pattern: &str) -> Result<Self, OpError> {
        let regex = Regex::new(&format!("^(?:{})$", pattern)).map_err(|e| OpError::InvalidFilter {
            filter: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { regex })
    }

    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    /// Entities whose name fully matches, in input order.
    pub fn select<'a>(&self, entities: &'a [Entity]) -> Vec<&'a Entity> {
        entities.iter().filter(|e| self.matches(e.name())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cities() -> Vec<Entity> {
        vec![
            Entity::new("Springfield", 30_720, 12.5).unwrap(),
            Entity::new("Spring", 100, 1.0).unwrap(),
            Entity::new("Shelbyville", 12_000, 8.25).unwrap(),
        ]
    }

    #[test]
    fn requires_full_match() {
        let f = NameFilter::new("Spring").unwrap();
        assert!(!f.matches("Springfield"));
        assert!(f.matches("Spring"));
        assert!(NameFilter::new("Spring.*").unwrap().matches("Springfield"));
    }

    #[test]
    fn no_implicit_substring_match() {
        let f = NameFilter::new("field").unwrap();
        assert!(!f.matches("Springfield"));
    }

    #[test]
    fn alternation_is_anchored_as_a_whole() {
        // Without grouping, `^a|b$` would match "abc" via the first branch.
        let f = NameFilter::new("Spring|Shelbyville").unwrap();
        assert!(f.matches("Spring"));
        assert!(!f.matches("Springfield"));
        assert!(f.matches("Shelbyville"));
    }

    #[test]
    fn select_preserves_order() {
        let entities = cities();
        let picked = NameFilter::new("S.*").unwrap().select(&entities);
        let names: Vec<_> = picked.iter().map(|e| e.name()).collect();
        assert_eq!(names, ["Springfield", "Spring", "Shelbyville"]);
    }

    #[test]
    fn select_can_be_empty() {
        let entities = cities();
        assert!(NameFilter::new("X.*").unwrap().select(&entities).is_empty());
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let err = NameFilter::new("(unclosed").unwrap_err();
        assert!(matches!(err, OpError::InvalidFilter { .. }));
        assert!(err.to_string().contains("(unclosed"));
    }

    #[test]
    fn lookaround_and_backreferences_are_invalid() {
        for pattern in ["(?!Spring).*", "(?<=S)pring.*", r"(a)\1"] {
            let err = NameFilter::new(pattern).unwrap_err();
            assert!(matches!(err, OpError::InvalidFilter { .. }), "{}", pattern);
        }
    }
}
