// Copyright 2025 QNF Contributors
// SPDX-License-Identifier: Apache-2.0

//! Network configuration, fixed at construction.

use serde::{Deserialize, Serialize};

/// Immutable network parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Hard cap on the neuron count; creation beyond it is rejected.
    pub max_neurons: usize,
    /// Radius within which a new neuron connects and may entangle.
    pub entanglement_radius: f64,
    /// Radius within which neighbors contribute interference each tick.
    pub interference_radius: f64,
    /// Default decoherence time constant in ms.
    pub coherence_time: f64,
    /// Global plasticity rate.
    pub plasticity_rate: f64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            max_neurons: 10_000,
            entanglement_radius: 0.3,
            interference_radius: 0.2,
            coherence_time: 3000.0,
            plasticity_rate: 0.1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = NetworkConfig::default();
        assert_eq!(config.max_neurons, 10_000);
        assert_eq!(config.entanglement_radius, 0.3);
        assert_eq!(config.interference_radius, 0.2);
    }
}
