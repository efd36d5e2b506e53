// Copyright 2025 QNF Contributors
// SPDX-License-Identifier: Apache-2.0

//! # Quantum-Inspired Neuron Model
//!
//! One computational node of the simulation: a normalized two-component
//! amplitude plus a phase angle, a fixed spatial position, an outgoing
//! connection table, a symmetric entanglement set, and a bounded activation
//! history.
//!
//! ## Model Dynamics
//!
//! ```text
//! Activation Probability:
//!     p(now) = |amplitude|² × exp(-(now - last_measurement) / coherence_time)
//!
//! Measurement (collapse):
//!     draw uniform < p(now)
//!       active   → amplitude = (1, 0), last_activation = now
//!       inactive → amplitude = (0, 1)
//!     last_measurement = now, record appended either way
//!
//! Superposition (between measurements):
//!     amplitude = normalize(Σ influence.amplitude × influence.weight)
//!     phase    += 0.1 × uniform[0,1)
//! ```
//!
//! Every time-sensitive operation takes `now` (milliseconds) explicitly and
//! every stochastic operation takes the caller's RNG, so a neuron is a pure
//! function of (state, inputs, now, rng).

use std::collections::VecDeque;
use std::f64::consts::FRAC_PI_2;

use ahash::{AHashMap, AHashSet};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::activity::{
    activation_intervals, push_bounded, rhythmicity, ActivationRecord, ActivityPattern,
    ANALYSIS_WINDOW, MIN_HISTORY_FOR_ANALYSIS,
};
use crate::amplitude::Amplitude;
use crate::connection::Connection;
use crate::specialization::NeuronType;
use crate::types::{NeuralError, NeuralResult, NeuronId, Position};

/// One external contribution mixed into a neuron's superposition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Influence {
    pub amplitude: Amplitude,
    pub weight: f64,
}

/// Constructive/destructive interference scores against nearby neurons.
///
/// The network computes this every tick and exports it, but does not feed it
/// back into the superposition update; see the snapshot documentation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InterferencePattern {
    pub constructive: f64,
    pub destructive: f64,
}

/// One signal emitted along an outgoing connection during propagation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalOutput {
    pub target: NeuronId,
    pub signal: f64,
    /// Arrival time: emission time plus a random synaptic delay of 1-6 ms.
    pub timestamp: u64,
}

/// A stochastic, phase-bearing computational unit.
#[derive(Debug, Clone)]
pub struct QuantumNeuron {
    id: NeuronId,
    kind: NeuronType,
    position: Position,
    amplitude: Amplitude,
    phase: f64,
    /// Decoherence time constant in ms, type-dependent, fixed at creation.
    coherence_time: f64,
    last_measurement: u64,
    activation_threshold: f64,
    /// Milliseconds a neuron stays unresponsive after an accepted activation.
    refractory_period: f64,
    last_activation: Option<u64>,
    plasticity: f64,
    learning_rate: f64,
    connections: AHashMap<NeuronId, Connection>,
    entanglements: AHashSet<NeuronId>,
    activation_history: VecDeque<ActivationRecord>,
    last_interference: InterferencePattern,
}

impl QuantumNeuron {
    /// Create a neuron of the given type at `position`, drawing its
    /// biological parameters from the type's ranges.
    pub fn new(
        id: NeuronId,
        kind: NeuronType,
        position: Position,
        now: u64,
        rng: &mut impl Rng,
    ) -> Self {
        let params = kind.ranges().sample(rng);
        Self {
            id,
            kind,
            position,
            amplitude: Amplitude::random(rng),
            phase: rng.gen::<f64>() * core::f64::consts::TAU,
            coherence_time: params.coherence_time,
            last_measurement: now,
            activation_threshold: params.activation_threshold,
            refractory_period: params.refractory_period,
            last_activation: None,
            plasticity: params.plasticity,
            learning_rate: params.learning_rate,
            connections: AHashMap::new(),
            entanglements: AHashSet::new(),
            activation_history: VecDeque::new(),
            last_interference: InterferencePattern::default(),
        }
    }

    pub fn id(&self) -> NeuronId {
        self.id
    }

    pub fn kind(&self) -> NeuronType {
        self.kind
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn amplitude(&self) -> Amplitude {
        self.amplitude
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn coherence_time(&self) -> f64 {
        self.coherence_time
    }

    pub fn last_measurement(&self) -> u64 {
        self.last_measurement
    }

    pub fn last_activation(&self) -> Option<u64> {
        self.last_activation
    }

    pub fn activation_threshold(&self) -> f64 {
        self.activation_threshold
    }

    pub fn refractory_period(&self) -> f64 {
        self.refractory_period
    }

    pub fn plasticity(&self) -> f64 {
        self.plasticity
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn connections(&self) -> &AHashMap<NeuronId, Connection> {
        &self.connections
    }

    pub fn entanglements(&self) -> &AHashSet<NeuronId> {
        &self.entanglements
    }

    pub fn activation_history(&self) -> &VecDeque<ActivationRecord> {
        &self.activation_history
    }

    pub fn last_interference(&self) -> InterferencePattern {
        self.last_interference
    }

    /// Externally tunable by the creation policy only.
    pub fn set_activation_threshold(&mut self, threshold: f64) {
        self.activation_threshold = threshold;
    }

    /// Externally tunable by the creation policy only.
    pub fn set_plasticity(&mut self, plasticity: f64) {
        self.plasticity = plasticity;
    }

    /// Cache the interference pattern computed by the network this tick.
    pub fn set_last_interference(&mut self, pattern: InterferencePattern) {
        self.last_interference = pattern;
    }

    /// Probability of collapsing to the active state at `now`.
    ///
    /// `|amplitude|²` is structurally ≈1 under the normalization invariant,
    /// so the decoherence term carries the useful signal. Kept as written.
    pub fn activation_probability(&self, now: u64) -> f64 {
        self.amplitude.probability() * self.coherence(now)
    }

    /// Exponentially decaying coherence since the last measurement.
    pub fn coherence(&self, now: u64) -> f64 {
        let elapsed = now.saturating_sub(self.last_measurement) as f64;
        (-elapsed / self.coherence_time).exp()
    }

    /// Collapse the amplitude to one of the two canonical basis states.
    ///
    /// The sole place where collapse occurs. Always appends a history record.
    pub fn measure_state(&mut self, now: u64, rng: &mut impl Rng) -> bool {
        let probability = self.activation_probability(now);
        let is_active = rng.gen::<f64>() < probability;

        self.last_measurement = now;
        if is_active {
            self.amplitude = Amplitude::ACTIVE;
            self.last_activation = Some(now);
        } else {
            self.amplitude = Amplitude::INACTIVE;
        }
        self.record_activation(now, is_active);
        trace!(id = %self.id, probability, is_active, "state measured");
        is_active
    }

    /// Continuous-time mixing between measurements: weighted vector sum of
    /// the influences, renormalized. No-op on the amplitude when the summed
    /// magnitude is zero; the phase walk happens regardless.
    pub fn enter_superposition(&mut self, influences: &[Influence], rng: &mut impl Rng) {
        let mut total = Amplitude::new(0.0, 0.0);
        for influence in influences {
            total.re += influence.amplitude.re * influence.weight;
            total.im += influence.amplitude.im * influence.weight;
        }

        if total.magnitude() > 0.0 {
            self.amplitude = total.normalized();
        }
        self.phase += 0.1 * rng.gen::<f64>();
    }

    /// Entangle this neuron with another. Idempotent; registers each side in
    /// the other's entanglement set and pulls both phases toward their mean
    /// plus/minus a random correlation offset. Returns false when the pair
    /// was already entangled.
    pub fn entangle_with(&mut self, other: &mut QuantumNeuron, rng: &mut impl Rng) -> bool {
        if self.entanglements.contains(&other.id) {
            return false;
        }
        self.entanglements.insert(other.id);
        other.entanglements.insert(self.id);

        let correlation = 0.5 + rng.gen::<f64>() * 0.5;
        let average_phase = (self.phase + other.phase) / 2.0;
        self.phase = average_phase + correlation * 0.1;
        other.phase = average_phase - correlation * 0.1;
        true
    }

    /// Constructive/destructive interference against the given neighbors.
    ///
    /// A phase difference below 90° scores constructive
    /// (inverse-distance-weighted cosine), otherwise destructive
    /// (inverse-distance-weighted sine). Side-effect free.
    pub fn interference<'a, I>(&self, nearby: I) -> InterferencePattern
    where
        I: IntoIterator<Item = &'a QuantumNeuron>,
    {
        let mut pattern = InterferencePattern::default();
        for neighbor in nearby {
            let distance = self.position.distance(&neighbor.position);
            let phase_difference = (self.phase - neighbor.phase).abs();

            if phase_difference < FRAC_PI_2 {
                pattern.constructive += phase_difference.cos() / (1.0 + distance);
            } else {
                pattern.destructive += phase_difference.sin() / (1.0 + distance);
            }
        }
        pattern
    }

    /// Insert or overwrite an outgoing connection. A missing weight draws a
    /// uniform value in [-1, 1).
    pub fn add_connection(
        &mut self,
        target: NeuronId,
        weight: Option<f64>,
        rng: &mut impl Rng,
    ) {
        let weight = weight.unwrap_or_else(|| (rng.gen::<f64>() - 0.5) * 2.0);
        self.connections.insert(target, Connection::new(weight));
    }

    /// Emit the signal along every outgoing connection, modulated by the
    /// connection weight and the current activation probability, with a
    /// random synaptic delay per edge. Updates connection usage counters;
    /// leaves the amplitude untouched.
    pub fn propagate_signal(
        &mut self,
        signal: f64,
        now: u64,
        rng: &mut impl Rng,
    ) -> Vec<SignalOutput> {
        let modulation = self.activation_probability(now);
        let mut outputs = Vec::with_capacity(self.connections.len());

        // Target order fixed so the per-edge delay draws are reproducible
        // under a seed.
        let mut targets: Vec<NeuronId> = self.connections.keys().copied().collect();
        targets.sort();

        for target in targets {
            if let Some(connection) = self.connections.get_mut(&target) {
                let delay_ms = 1.0 + rng.gen::<f64>() * 5.0;
                outputs.push(SignalOutput {
                    target,
                    signal: signal * connection.weight * modulation,
                    timestamp: now + delay_ms.round() as u64,
                });
                connection.record_use(now);
            }
        }
        outputs
    }

    /// Hebbian reinforcement of one outgoing connection.
    ///
    /// Unlike the historical silent no-op, a missing connection is a typed
    /// error so callers and tests can assert on it.
    pub fn update_synaptic_plasticity(
        &mut self,
        target: NeuronId,
        reinforcement: f64,
    ) -> NeuralResult<()> {
        let connection = self
            .connections
            .get_mut(&target)
            .ok_or(NeuralError::MissingConnection(target))?;
        connection.reinforce(self.learning_rate, reinforcement);
        Ok(())
    }

    /// Whether an input signal can activate this neuron at `now`: it must be
    /// out of its refractory window and the signal magnitude must exceed the
    /// coherence-modulated threshold `threshold / (1 + p(now))`.
    pub fn can_activate(&self, input_signal: f64, now: u64) -> bool {
        if let Some(last) = self.last_activation {
            if (now.saturating_sub(last) as f64) < self.refractory_period {
                return false;
            }
        }
        let modulation = self.activation_probability(now);
        let effective_threshold = self.activation_threshold / (1.0 + modulation);
        input_signal.abs() > effective_threshold
    }

    /// Stamp an accepted activation during network propagation.
    pub fn mark_activated(&mut self, now: u64) {
        self.last_activation = Some(now);
    }

    /// Summarize recent activity over the analysis window.
    ///
    /// Returns `None` until at least 10 records have accumulated.
    pub fn analyze_activity(&self, now: u64) -> Option<ActivityPattern> {
        if self.activation_history.len() < MIN_HISTORY_FOR_ANALYSIS {
            return None;
        }

        let skip = self.activation_history.len().saturating_sub(ANALYSIS_WINDOW);
        let window: Vec<&ActivationRecord> = self.activation_history.iter().skip(skip).collect();

        let active_count = window.iter().filter(|record| record.active).count();
        let intervals = activation_intervals(&window);
        let average_interval = if intervals.is_empty() {
            0.0
        } else {
            intervals.iter().sum::<f64>() / intervals.len() as f64
        };

        Some(ActivityPattern {
            activation_rate: active_count as f64 / window.len() as f64,
            average_interval,
            rhythmicity: rhythmicity(&intervals),
            coherence: self.coherence(now),
        })
    }

    /// Overwrite the quantum state with persisted values (snapshot restore).
    pub(crate) fn restore_quantum_state(
        &mut self,
        amplitude: Amplitude,
        phase: f64,
        coherence_time: f64,
        last_measurement: u64,
        last_activation: Option<u64>,
    ) {
        self.amplitude = amplitude;
        self.phase = phase;
        self.coherence_time = coherence_time;
        self.last_measurement = last_measurement;
        self.last_activation = last_activation;
    }

    /// Overwrite the biological parameters with persisted values.
    pub(crate) fn restore_properties(
        &mut self,
        activation_threshold: f64,
        refractory_period: f64,
        plasticity: f64,
        learning_rate: f64,
    ) {
        self.activation_threshold = activation_threshold;
        self.refractory_period = refractory_period;
        self.plasticity = plasticity;
        self.learning_rate = learning_rate;
    }

    /// Reinsert a persisted connection entry verbatim.
    pub(crate) fn restore_connection(&mut self, target: NeuronId, connection: Connection) {
        self.connections.insert(target, connection);
    }

    /// Reinsert a persisted entanglement edge. The matching edge on the
    /// partner comes from the partner's own snapshot, so symmetry holds for
    /// any snapshot that was produced by export.
    pub(crate) fn restore_entanglement(&mut self, partner: NeuronId) {
        self.entanglements.insert(partner);
    }

    fn record_activation(&mut self, now: u64, active: bool) {
        push_bounded(
            &mut self.activation_history,
            ActivationRecord {
                timestamp: now,
                active,
                amplitude: self.amplitude,
                phase: self.phase,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn neuron(id: u64, position: Position, rng: &mut StdRng) -> QuantumNeuron {
        QuantumNeuron::new(NeuronId(id), NeuronType::Processing, position, 0, rng)
    }

    #[test]
    fn test_new_neuron_is_normalized() {
        let mut rng = rng();
        let n = neuron(1, Position::new(0.5, 0.5, 0.5), &mut rng);
        assert!((n.amplitude().probability() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_measure_collapses_to_basis_state() {
        let mut rng = rng();
        let mut n = neuron(1, Position::new(0.5, 0.5, 0.5), &mut rng);
        let active = n.measure_state(0, &mut rng);
        if active {
            assert_eq!(n.amplitude(), Amplitude::ACTIVE);
            assert_eq!(n.last_activation(), Some(0));
        } else {
            assert_eq!(n.amplitude(), Amplitude::INACTIVE);
            assert_eq!(n.last_activation(), None);
        }
        assert_eq!(n.activation_history().len(), 1);
    }

    #[test]
    fn test_immediate_measurement_frequency_matches_probability() {
        // Elapsed ≈ 0 right after creation, so decoherence ≈ 1 and the
        // observed frequency should track |amplitude|² ≈ 1.
        let mut rng = rng();
        let mut active = 0u32;
        for i in 0..1000 {
            let mut n = neuron(i, Position::new(0.5, 0.5, 0.5), &mut rng);
            if n.measure_state(0, &mut rng) {
                active += 1;
            }
        }
        assert!(active >= 990, "expected near-certain activation, got {active}");
    }

    #[test]
    fn test_decoherence_suppresses_activation() {
        let mut rng = rng();
        let mut active = 0u32;
        for i in 0..200 {
            let mut n = neuron(i, Position::new(0.5, 0.5, 0.5), &mut rng);
            // Far beyond any coherence time in the processing range.
            if n.measure_state(1_000_000, &mut rng) {
                active += 1;
            }
        }
        assert!(active < 5, "decohered neurons should rarely fire, got {active}");
    }

    #[test]
    fn test_superposition_renormalizes() {
        let mut rng = rng();
        let mut n = neuron(1, Position::new(0.5, 0.5, 0.5), &mut rng);
        n.enter_superposition(
            &[
                Influence {
                    amplitude: Amplitude::new(0.3, 0.4),
                    weight: 2.0,
                },
                Influence {
                    amplitude: Amplitude::new(-0.1, 0.2),
                    weight: 0.5,
                },
            ],
            &mut rng,
        );
        assert!((n.amplitude().probability() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_superposition_with_zero_influence_keeps_amplitude() {
        let mut rng = rng();
        let mut n = neuron(1, Position::new(0.5, 0.5, 0.5), &mut rng);
        let before = n.amplitude();
        let phase_before = n.phase();
        n.enter_superposition(&[], &mut rng);
        assert_eq!(n.amplitude(), before);
        assert!(n.phase() >= phase_before);
    }

    #[test]
    fn test_entanglement_is_symmetric_and_idempotent() {
        let mut rng = rng();
        let mut a = neuron(1, Position::new(0.1, 0.1, 0.1), &mut rng);
        let mut b = neuron(2, Position::new(0.2, 0.2, 0.2), &mut rng);

        assert!(a.entangle_with(&mut b, &mut rng));
        assert!(a.entanglements().contains(&b.id()));
        assert!(b.entanglements().contains(&a.id()));

        // Second call is a no-op.
        assert!(!a.entangle_with(&mut b, &mut rng));
        assert_eq!(a.entanglements().len(), 1);
        assert_eq!(b.entanglements().len(), 1);
    }

    #[test]
    fn test_entanglement_synchronizes_phases() {
        let mut rng = rng();
        let mut a = neuron(1, Position::new(0.1, 0.1, 0.1), &mut rng);
        let mut b = neuron(2, Position::new(0.2, 0.2, 0.2), &mut rng);
        a.entangle_with(&mut b, &mut rng);
        // Both phases sit within the correlation offset of their mean.
        assert!((a.phase() - b.phase()).abs() <= 0.2 + 1e-12);
    }

    #[test]
    fn test_interference_splits_by_phase_difference() {
        let mut rng = rng();
        let mut a = neuron(1, Position::new(0.0, 0.0, 0.0), &mut rng);
        let mut near = neuron(2, Position::new(0.1, 0.0, 0.0), &mut rng);
        let mut far = neuron(3, Position::new(0.9, 0.0, 0.0), &mut rng);

        // Force phases directly through superposition-free construction.
        a.phase = 0.0;
        near.phase = 0.1; // < π/2 apart → constructive
        far.phase = 3.0; // > π/2 apart → destructive

        let pattern = a.interference([&near, &far]);
        assert!(pattern.constructive > 0.0);
        assert!(pattern.destructive > 0.0);

        let only_near = a.interference([&near]);
        assert_eq!(only_near.destructive, 0.0);
    }

    #[test]
    fn test_closer_neighbors_interfere_more() {
        let mut rng = rng();
        let mut a = neuron(1, Position::new(0.0, 0.0, 0.0), &mut rng);
        let mut near = neuron(2, Position::new(0.05, 0.0, 0.0), &mut rng);
        let mut far = neuron(3, Position::new(0.95, 0.0, 0.0), &mut rng);
        a.phase = 0.0;
        near.phase = 0.2;
        far.phase = 0.2;

        let near_pattern = a.interference([&near]);
        let far_pattern = a.interference([&far]);
        assert!(near_pattern.constructive > far_pattern.constructive);
    }

    #[test]
    fn test_propagate_signal_modulates_and_counts_usage() {
        let mut rng = rng();
        let mut n = neuron(1, Position::new(0.5, 0.5, 0.5), &mut rng);
        n.add_connection(NeuronId(2), Some(0.5), &mut rng);
        n.add_connection(NeuronId(3), Some(-1.0), &mut rng);

        let outputs = n.propagate_signal(2.0, 100, &mut rng);
        assert_eq!(outputs.len(), 2);

        let modulation = n.activation_probability(100);
        for output in &outputs {
            let weight = n.connections()[&output.target].weight;
            assert!((output.signal - 2.0 * weight * modulation).abs() < 1e-9);
            // Delay bounded in (1, 6) ms.
            assert!(output.timestamp > 100 && output.timestamp <= 106);
        }
        for connection in n.connections().values() {
            assert_eq!(connection.usage_count, 1);
            assert_eq!(connection.last_used, 100);
        }
    }

    #[test]
    fn test_plasticity_missing_target_is_typed_error() {
        let mut rng = rng();
        let mut n = neuron(1, Position::new(0.5, 0.5, 0.5), &mut rng);
        let err = n.update_synaptic_plasticity(NeuronId(99), 1.0).unwrap_err();
        assert_eq!(err, NeuralError::MissingConnection(NeuronId(99)));
    }

    #[test]
    fn test_plasticity_updates_existing_connection() {
        let mut rng = rng();
        let mut n = neuron(1, Position::new(0.5, 0.5, 0.5), &mut rng);
        n.add_connection(NeuronId(2), Some(0.5), &mut rng);
        let before = n.connections()[&NeuronId(2)].weight;
        n.update_synaptic_plasticity(NeuronId(2), 1.0).unwrap();
        assert!(n.connections()[&NeuronId(2)].weight > before);
    }

    #[test]
    fn test_fresh_neuron_passes_refractory_gate() {
        let mut rng = rng();
        let n = neuron(1, Position::new(0.5, 0.5, 0.5), &mut rng);
        // Threshold is halved by full coherence; a strong signal passes.
        assert!(n.can_activate(1.0, 0));
    }

    #[test]
    fn test_refractory_period_blocks_activation() {
        let mut rng = rng();
        let mut n = neuron(1, Position::new(0.5, 0.5, 0.5), &mut rng);
        n.mark_activated(1000);
        assert!(!n.can_activate(10.0, 1001));
        let after_refractory = 1000 + n.refractory_period().ceil() as u64;
        assert!(n.can_activate(10.0, after_refractory));
    }

    #[test]
    fn test_analysis_requires_ten_records() {
        let mut rng = rng();
        let mut n = neuron(1, Position::new(0.5, 0.5, 0.5), &mut rng);
        for t in 0..9u64 {
            n.measure_state(t, &mut rng);
        }
        assert!(n.analyze_activity(9).is_none());
        n.measure_state(9, &mut rng);
        assert!(n.analyze_activity(9).is_some());
    }

    #[test]
    fn test_analysis_rates_and_coherence() {
        let mut rng = rng();
        let mut n = neuron(1, Position::new(0.5, 0.5, 0.5), &mut rng);
        for t in 0..50u64 {
            n.measure_state(t, &mut rng);
        }
        let pattern = n.analyze_activity(49).unwrap();
        assert!((0.0..=1.0).contains(&pattern.activation_rate));
        // Last measurement was at t=49, so coherence at 49 is exactly 1.
        assert!((pattern.coherence - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_policy_tuning_hooks() {
        let mut rng = rng();
        let mut n = neuron(1, Position::new(0.5, 0.5, 0.5), &mut rng);
        n.set_activation_threshold(0.42);
        n.set_plasticity(0.33);
        assert_eq!(n.activation_threshold(), 0.42);
        assert_eq!(n.plasticity(), 0.33);
    }
}
