// Copyright 2025 QNF Contributors
// SPDX-License-Identifier: Apache-2.0

//! # Network Snapshots
//!
//! A snapshot is a plain, fully self-describing structure handed to an
//! external persistence layer. `import_state` reconstructs an equivalent
//! network: exporting the reconstruction yields a structurally equal
//! snapshot, modulo the declared non-persistent state (activation histories
//! and the RNG stream).

use std::collections::BTreeMap;

use ahash::{AHashMap, AHashSet};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use qnf_neural::{NeuronId, NeuronSnapshot, NeuronType, QuantumNeuron};

use crate::config::NetworkConfig;
use crate::error::NetworkResult;
use crate::field::{FieldSnapshot, QuantumField};
use crate::network::QuantumNetwork;
use crate::stats::NetworkStats;

use serde::{Deserialize, Serialize};

/// Complete exported network state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    /// Sorted by id for deterministic output.
    pub neurons: Vec<NeuronSnapshot>,
    /// Type label → sorted member ids.
    pub groups: BTreeMap<String, Vec<NeuronId>>,
    pub stats: NetworkStats,
    pub field: FieldSnapshot,
    pub config: NetworkConfig,
    pub next_id: u64,
    /// Export time in ms.
    pub timestamp: u64,
}

impl QuantumNetwork {
    /// Export the complete network state at `now`.
    pub fn export_state(&self, now: u64) -> NetworkSnapshot {
        let mut neurons: Vec<NeuronSnapshot> = self
            .units
            .values()
            .map(|neuron| neuron.export_state(now))
            .collect();
        neurons.sort_by_key(|snapshot| snapshot.id);

        let mut groups = BTreeMap::new();
        for (kind, members) in &self.groups {
            let mut ids: Vec<NeuronId> = members.iter().copied().collect();
            ids.sort();
            groups.insert(kind.label().to_string(), ids);
        }

        NetworkSnapshot {
            neurons,
            groups,
            stats: self.stats,
            field: self.field.export(),
            config: self.config.clone(),
            next_id: self.next_id,
            timestamp: now,
        }
    }

    /// Reconstruct a network from a snapshot, seeded from OS entropy.
    pub fn import_state(snapshot: &NetworkSnapshot) -> NetworkResult<QuantumNetwork> {
        Self::import_state_with_rng(snapshot, StdRng::from_entropy())
    }

    /// Reconstruct a network from a snapshot with a caller-chosen seed, for
    /// reproducible continuation.
    pub fn import_state_with_seed(
        snapshot: &NetworkSnapshot,
        seed: u64,
    ) -> NetworkResult<QuantumNetwork> {
        Self::import_state_with_rng(snapshot, StdRng::seed_from_u64(seed))
    }

    fn import_state_with_rng(
        snapshot: &NetworkSnapshot,
        mut rng: StdRng,
    ) -> NetworkResult<QuantumNetwork> {
        let mut units: AHashMap<NeuronId, QuantumNeuron> = AHashMap::new();
        let mut groups: AHashMap<NeuronType, AHashSet<NeuronId>> = AHashMap::new();

        // Group membership is derived from each neuron's own type, which
        // keeps the reconstruction consistent even if the snapshot's group
        // table disagrees.
        for neuron_snapshot in &snapshot.neurons {
            let neuron = QuantumNeuron::from_snapshot(neuron_snapshot, &mut rng);
            groups.entry(neuron.kind()).or_default().insert(neuron.id());
            units.insert(neuron.id(), neuron);
        }

        info!(neurons = units.len(), "network imported from snapshot");
        Ok(QuantumNetwork {
            units,
            groups,
            field: QuantumField::restore(&snapshot.field),
            config: snapshot.config.clone(),
            stats: snapshot.stats,
            rng,
            next_id: snapshot.next_id,
        })
    }
}
