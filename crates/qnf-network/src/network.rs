// Copyright 2025 QNF Contributors
// SPDX-License-Identifier: Apache-2.0

//! # Quantum Network Engine
//!
//! Owns the neuron collection and the global field, forms connectivity at
//! creation time, drives the per-tick superposition update, and aggregates
//! network-wide statistics. Signal propagation lives in the sibling
//! `propagation` module; snapshots in `snapshot`.
//!
//! The network is single-threaded and tick-driven: `update_network` and
//! `propagate` are each atomic with respect to neuron state. A multi-threaded
//! host must serialize all calls into one network instance.

use ahash::{AHashMap, AHashSet};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use qnf_neural::{Influence, NeuronId, NeuronType, Position, QuantumNeuron};

use crate::config::NetworkConfig;
use crate::error::{NetworkError, NetworkResult};
use crate::field::QuantumField;
use crate::stats::NetworkStats;

/// Probability that a freshly formed local connection also entangles the
/// pair.
const ENTANGLEMENT_PROBABILITY: f64 = 0.3;

/// The network of stochastic, phase-bearing neurons.
pub struct QuantumNetwork {
    pub(crate) units: AHashMap<NeuronId, QuantumNeuron>,
    pub(crate) groups: AHashMap<NeuronType, AHashSet<NeuronId>>,
    pub(crate) field: QuantumField,
    pub(crate) config: NetworkConfig,
    pub(crate) stats: NetworkStats,
    /// Single seedable generator threaded through every stochastic
    /// operation, so a seeded network is reproducible.
    pub(crate) rng: StdRng,
    pub(crate) next_id: u64,
}

impl QuantumNetwork {
    /// Create a network seeded from OS entropy.
    pub fn new(config: NetworkConfig) -> Self {
        Self::from_rng(config, StdRng::from_entropy())
    }

    /// Create a reproducible network from an explicit seed.
    pub fn with_seed(config: NetworkConfig, seed: u64) -> Self {
        Self::from_rng(config, StdRng::seed_from_u64(seed))
    }

    fn from_rng(config: NetworkConfig, mut rng: StdRng) -> Self {
        let field = QuantumField::new(&mut rng);
        info!(max_neurons = config.max_neurons, "quantum network created");
        Self {
            units: AHashMap::new(),
            groups: AHashMap::new(),
            field,
            config,
            stats: NetworkStats::default(),
            rng,
            next_id: 0,
        }
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn field(&self) -> &QuantumField {
        &self.field
    }

    /// Aggregates as of the last refresh (`update_network` or
    /// `refresh_stats`).
    pub fn stats(&self) -> &NetworkStats {
        &self.stats
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn neuron(&self, id: NeuronId) -> Option<&QuantumNeuron> {
        self.units.get(&id)
    }

    /// Mutable access for the creation policy's tuning hooks.
    pub fn neuron_mut(&mut self, id: NeuronId) -> Option<&mut QuantumNeuron> {
        self.units.get_mut(&id)
    }

    pub fn neurons(&self) -> impl Iterator<Item = &QuantumNeuron> {
        self.units.values()
    }

    /// Ids registered under one type group.
    pub fn group(&self, kind: NeuronType) -> Option<&AHashSet<NeuronId>> {
        self.groups.get(&kind)
    }

    /// Create a neuron and bootstrap its local connectivity.
    ///
    /// Fails with `CapacityExceeded` at the configured limit and
    /// `InvalidPosition` for a position outside the unit cube, both without
    /// any state change. A missing position is drawn uniformly from the
    /// cube. This is the only place connections and entanglements form.
    pub fn create_neuron(
        &mut self,
        kind: NeuronType,
        position: Option<Position>,
        now: u64,
    ) -> NetworkResult<NeuronId> {
        if self.units.len() >= self.config.max_neurons {
            warn!(max = self.config.max_neurons, "neuron creation rejected at capacity");
            return Err(NetworkError::CapacityExceeded {
                max: self.config.max_neurons,
            });
        }

        let position = match position {
            Some(p) if !p.in_unit_cube() => {
                return Err(NetworkError::InvalidPosition {
                    x: p.x,
                    y: p.y,
                    z: p.z,
                })
            }
            Some(p) => p,
            None => Position::random(&mut self.rng),
        };

        let id = NeuronId(self.next_id);
        self.next_id += 1;

        let neuron = QuantumNeuron::new(id, kind, position, now, &mut self.rng);
        self.units.insert(id, neuron);
        self.groups.entry(kind).or_default().insert(id);

        self.form_local_connections(id);
        info!(%id, %kind, "neuron created");
        Ok(id)
    }

    /// Connect a new neuron to spatial neighbors within the entanglement
    /// radius: connection probability `exp(-3·distance)`, then entanglement
    /// with a fixed probability per formed connection.
    fn form_local_connections(&mut self, id: NeuronId) {
        let neighbors = self.find_nearby(id, self.config.entanglement_radius);
        let position = self.units[&id].position();

        for neighbor_id in neighbors {
            let distance = position.distance(&self.units[&neighbor_id].position());
            let connection_probability = (-3.0 * distance).exp();
            if self.rng.gen::<f64>() < connection_probability {
                if let Some(neuron) = self.units.get_mut(&id) {
                    neuron.add_connection(neighbor_id, None, &mut self.rng);
                }
                debug!(%id, neighbor = %neighbor_id, distance, "local connection formed");

                if self.rng.gen::<f64>() < ENTANGLEMENT_PROBABILITY {
                    self.entangle(id, neighbor_id);
                }
            }
        }
    }

    /// Symmetrically entangle two neurons across the map.
    pub(crate) fn entangle(&mut self, a: NeuronId, b: NeuronId) {
        if a == b {
            return;
        }
        // Split borrow: lift one side out of the map for the duration.
        let Some(mut unit_a) = self.units.remove(&a) else {
            return;
        };
        if let Some(unit_b) = self.units.get_mut(&b) {
            if unit_a.entangle_with(unit_b, &mut self.rng) {
                debug!(a = %a, b = %b, "entanglement formed");
            }
        }
        self.units.insert(a, unit_a);
    }

    /// Ids of all neurons within `radius` of the given neuron, in id order
    /// so that downstream stochastic draws are reproducible under a seed.
    pub fn find_nearby(&self, id: NeuronId, radius: f64) -> Vec<NeuronId> {
        let Some(center) = self.units.get(&id) else {
            return Vec::new();
        };
        let position = center.position();
        let mut nearby: Vec<NeuronId> = self
            .units
            .values()
            .filter(|other| other.id() != id && position.distance(&other.position()) <= radius)
            .map(|other| other.id())
            .collect();
        nearby.sort();
        nearby
    }

    /// Advance the whole network by `delta_ms`.
    ///
    /// Evolves the field, then per neuron: computes the field influence at
    /// its position and the interference from neighbors within the
    /// interference radius, and mixes the field influence into the neuron's
    /// superposition. The interference result is cached on the neuron and
    /// exported, but deliberately not mixed into the superposition; see the
    /// crate docs for this preserved quirk of the model. Finally the
    /// aggregate statistics are refreshed.
    pub fn update_network(&mut self, delta_ms: f64, now: u64) {
        self.field.update(delta_ms, &mut self.rng);

        // Influences and interference read the whole collection, so gather
        // first and mutate after. Sorted id order keeps the per-neuron RNG
        // draws reproducible under a seed.
        let mut ids: Vec<NeuronId> = self.units.keys().copied().collect();
        ids.sort();

        let mut updates = Vec::with_capacity(ids.len());
        for &id in &ids {
            let neuron = &self.units[&id];
            let field_influence = self.field.influence_at(neuron.position());
            let neighbor_ids = self.find_nearby(id, self.config.interference_radius);
            let interference =
                neuron.interference(neighbor_ids.iter().map(|nid| &self.units[nid]));
            updates.push((id, field_influence, interference));
        }

        for (id, field_influence, interference) in updates {
            let rng = &mut self.rng;
            if let Some(neuron) = self.units.get_mut(&id) {
                neuron.set_last_interference(interference);
                neuron.enter_superposition(
                    &[Influence {
                        amplitude: field_influence.amplitude,
                        weight: field_influence.strength,
                    }],
                    rng,
                );
            }
        }

        self.refresh_stats(now);
        debug!(
            neurons = self.stats.total_neurons,
            activity = self.stats.network_activity,
            "network updated"
        );
    }

    /// Recompute the derived aggregates at `now`.
    pub fn refresh_stats(&mut self, now: u64) {
        let total_neurons = self.units.len();
        let total_connections = self.units.values().map(|n| n.connections().len()).sum();
        // Entanglement edges are stored on both endpoints.
        let total_entanglements: usize =
            self.units.values().map(|n| n.entanglements().len()).sum::<usize>() / 2;

        let (mut coherence_sum, mut active) = (0.0, 0usize);
        for neuron in self.units.values() {
            coherence_sum += neuron.coherence(now);
            if neuron.activation_probability(now) > 0.5 {
                active += 1;
            }
        }

        self.stats = NetworkStats {
            total_neurons,
            total_connections,
            total_entanglements,
            average_coherence: if total_neurons > 0 {
                coherence_sum / total_neurons as f64
            } else {
                0.0
            },
            network_activity: if total_neurons > 0 {
                active as f64 / total_neurons as f64
            } else {
                0.0
            },
        };
    }

    /// Apply a Hebbian reinforcement to the `source → target` connection.
    pub fn update_plasticity(
        &mut self,
        source: NeuronId,
        target: NeuronId,
        reinforcement: f64,
    ) -> NetworkResult<()> {
        let neuron = self
            .units
            .get_mut(&source)
            .ok_or(NetworkError::NeuronNotFound(source))?;
        neuron.update_synaptic_plasticity(target, reinforcement)?;
        Ok(())
    }

    /// Measure one neuron's state, collapsing its amplitude.
    pub fn measure_neuron(&mut self, id: NeuronId, now: u64) -> NetworkResult<bool> {
        let rng = &mut self.rng;
        let neuron = self
            .units
            .get_mut(&id)
            .ok_or(NetworkError::NeuronNotFound(id))?;
        Ok(neuron.measure_state(now, rng))
    }
}
