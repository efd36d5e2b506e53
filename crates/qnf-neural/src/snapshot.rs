// Copyright 2025 QNF Contributors
// SPDX-License-Identifier: Apache-2.0

//! Self-describing neuron snapshots for the external persistence layer.
//!
//! The snapshot is plain data: the persistence collaborator serializes it
//! (serde) without reaching into live simulation state. The activation
//! history is deliberately non-persistent; only its derived activity summary
//! is exported, and a reimported neuron starts with an empty history.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::activity::ActivityPattern;
use crate::amplitude::Amplitude;
use crate::connection::Connection;
use crate::neuron::{InterferencePattern, QuantumNeuron};
use crate::specialization::NeuronType;
use crate::types::{NeuronId, Position};

/// Exported state of a single neuron.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeuronSnapshot {
    pub id: NeuronId,
    pub kind: NeuronType,
    pub position: Position,
    pub amplitude: Amplitude,
    pub phase: f64,
    pub coherence_time: f64,
    pub last_measurement: u64,
    pub last_activation: Option<u64>,
    /// Coherence at export time, for external consumers.
    pub coherence: f64,
    /// Sorted by target id for deterministic output.
    pub connections: Vec<ConnectionSnapshot>,
    /// Sorted for deterministic output.
    pub entanglements: Vec<NeuronId>,
    pub last_interference: InterferencePattern,
    /// `None` when the history was too short to analyze. Derived, not restored.
    pub activity: Option<ActivityPattern>,
    pub properties: NeuronProperties,
}

/// One exported connection entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionSnapshot {
    pub target: NeuronId,
    #[serde(flatten)]
    pub connection: Connection,
}

/// Tunable biological properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeuronProperties {
    pub activation_threshold: f64,
    pub refractory_period: f64,
    pub plasticity: f64,
    pub learning_rate: f64,
}

impl QuantumNeuron {
    /// Export this neuron's complete persistent state.
    pub fn export_state(&self, now: u64) -> NeuronSnapshot {
        let mut connections: Vec<ConnectionSnapshot> = self
            .connections()
            .iter()
            .map(|(&target, connection)| ConnectionSnapshot {
                target,
                connection: connection.clone(),
            })
            .collect();
        connections.sort_by_key(|entry| entry.target);

        let mut entanglements: Vec<NeuronId> = self.entanglements().iter().copied().collect();
        entanglements.sort();

        NeuronSnapshot {
            id: self.id(),
            kind: self.kind(),
            position: self.position(),
            amplitude: self.amplitude(),
            phase: self.phase(),
            coherence_time: self.coherence_time(),
            last_measurement: self.last_measurement(),
            last_activation: self.last_activation(),
            coherence: self.coherence(now),
            connections,
            entanglements,
            last_interference: self.last_interference(),
            activity: self.analyze_activity(now),
            properties: NeuronProperties {
                activation_threshold: self.activation_threshold(),
                refractory_period: self.refractory_period(),
                plasticity: self.plasticity(),
                learning_rate: self.learning_rate(),
            },
        }
    }

    /// Reconstruct a neuron from a snapshot.
    ///
    /// The freshly sampled parameters from `new` are overwritten with the
    /// persisted ones; the activation history starts empty.
    pub fn from_snapshot(snapshot: &NeuronSnapshot, rng: &mut impl Rng) -> Self {
        let mut neuron = QuantumNeuron::new(
            snapshot.id,
            snapshot.kind,
            snapshot.position,
            snapshot.last_measurement,
            rng,
        );
        neuron.restore(snapshot);
        neuron
    }

    fn restore(&mut self, snapshot: &NeuronSnapshot) {
        self.restore_quantum_state(
            snapshot.amplitude,
            snapshot.phase,
            snapshot.coherence_time,
            snapshot.last_measurement,
            snapshot.last_activation,
        );
        self.restore_properties(
            snapshot.properties.activation_threshold,
            snapshot.properties.refractory_period,
            snapshot.properties.plasticity,
            snapshot.properties.learning_rate,
        );
        self.set_last_interference(snapshot.last_interference);
        for entry in &snapshot.connections {
            self.restore_connection(entry.target, entry.connection.clone());
        }
        for &partner in &snapshot.entanglements {
            self.restore_entanglement(partner);
        }
    }
}
