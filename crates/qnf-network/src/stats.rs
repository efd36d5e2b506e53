// Copyright 2025 QNF Contributors
// SPDX-License-Identifier: Apache-2.0

//! Aggregate network statistics.
//!
//! Always recomputed from the neuron collection, never independently
//! mutated. The load-driven creation policy consumes these through
//! `QuantumNetwork::stats`.

use serde::{Deserialize, Serialize};

/// Derived network-wide aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NetworkStats {
    pub total_neurons: usize,
    pub total_connections: usize,
    pub total_entanglements: usize,
    /// Mean decoherence factor across all neurons at the last refresh.
    pub average_coherence: f64,
    /// Fraction of neurons whose activation probability exceeded 0.5.
    pub network_activity: f64,
}
