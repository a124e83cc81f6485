//! Solver-agnostic configuration knobs.

use std::collections::HashMap;

/// Parameters shared by every selector call that are not specific to any one strategy.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Number of epochs traffic volumes and decisions are defined over.
    pub epochs: usize,
    /// Default per-resource weights used by the resource-aware scoring functions when a selector
    /// is not given an explicit weight map.
    pub default_weights: HashMap<String, f64>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            epochs: 1,
            default_weights: HashMap::new(),
        }
    }
}
