//! Identifier universe — the closed set of selectable series.
//!
//! Stored as a TOML config file with a flat identifier list. The session
//! only ever offers identifiers from this set, and the two chooser slots
//! stay mutually exclusive via `excluding`.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// The closed universe of series identifiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Universe {
    pub identifiers: Vec<String>,
}

impl Universe {
    /// Load a universe from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("read universe file: {e}"))?;
        Self::from_toml(&content)
    }

    /// Parse a universe from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("parse universe TOML: {e}"))
    }

    /// The compiled-in default set.
    pub fn default_set() -> Self {
        Self {
            identifiers: ["AAPL", "GOOG", "INTC", "BRCM", "YHOO"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.identifiers.iter().any(|id| id == identifier)
    }

    /// All identifiers except the given one — the allowed set for the other
    /// chooser slot.
    pub fn excluding(&self, identifier: &str) -> Vec<String> {
        self.identifiers
            .iter()
            .filter(|id| id.as_str() != identifier)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excluding_drops_exactly_one() {
        let universe = Universe::default_set();
        let allowed = universe.excluding("GOOG");

        assert_eq!(allowed.len(), universe.len() - 1);
        assert!(!allowed.contains(&"GOOG".to_string()));
        assert!(allowed.contains(&"AAPL".to_string()));
    }

    #[test]
    fn toml_roundtrip() {
        let universe = Universe::from_toml(r#"identifiers = ["AAPL", "GOOG"]"#).unwrap();
        assert_eq!(universe.len(), 2);
        assert!(universe.contains("AAPL"));
        assert!(!universe.contains("INTC"));
    }
}
