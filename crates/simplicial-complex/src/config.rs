use serde::{Deserialize, Serialize};
use simplicial_core::SchemaVersion;

/// Configuration options that control the behaviour of
/// [`SimplicialComplex`](crate::SimplicialComplex).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexConfig {
    /// Highest order the complex accepts; insertions above it are rejected.
    #[serde(default)]
    pub max_order: Option<usize>,
    /// Schema version stored alongside serialized payloads.
    #[serde(default)]
    pub schema_version: SchemaVersion,
}

impl ComplexConfig {
    /// Configuration limited to points and edges.
    pub fn graph() -> Self {
        Self {
            max_order: Some(1),
            ..Self::default()
        }
    }

    /// Returns the effective limit given a backend's own limit.
    pub fn effective_limit(&self, backend: Option<usize>) -> Option<usize> {
        match (self.max_order, backend) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}

impl Default for ComplexConfig {
    fn default() -> Self {
        Self {
            max_order: None,
            schema_version: SchemaVersion::new(1, 0, 0),
        }
    }
}
