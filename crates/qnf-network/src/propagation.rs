// Copyright 2025 QNF Contributors
// SPDX-License-Identifier: Apache-2.0

//! # Signal Propagation
//!
//! Bounded breadth-first traversal of the connection graph. Each neuron is
//! visited at most once: *unvisited → queued → activated* or
//! *unvisited → queued → rejected*, both terminal, which guarantees
//! termination within `max_hops` rounds on any finite network.

use std::collections::VecDeque;

use ahash::AHashSet;
use tracing::debug;

use qnf_neural::NeuronId;

use crate::network::QuantumNetwork;

/// One accepted activation along the signal path.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalTrace {
    pub neuron: NeuronId,
    pub signal: f64,
    pub hop: u32,
    pub timestamp: u64,
}

/// Aggregate response of the activated set.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NetworkResponse {
    /// Σ activation probability over activated neurons.
    pub total: f64,
    /// Σ probability × coherence over activated neurons.
    pub coherent: f64,
    /// `coherent / total`, 0 when nothing activated.
    pub coherence_ratio: f64,
}

/// Result of one propagation run.
#[derive(Debug, Clone, PartialEq)]
pub struct PropagationOutcome {
    /// Ids accepted for activation, in acceptance order.
    pub activated: Vec<NeuronId>,
    /// Ordered trace of accepted activations.
    pub signal_path: Vec<SignalTrace>,
    pub response: NetworkResponse,
}

#[derive(Debug, Clone, Copy)]
struct QueueEntry {
    neuron: NeuronId,
    signal: f64,
    hop: u32,
    timestamp: u64,
}

impl QuantumNetwork {
    /// Propagate a signal breadth-first from `source`.
    ///
    /// A dequeued neuron is skipped when missing or already visited. It is
    /// accepted iff it is outside its refractory window and the signal
    /// magnitude beats its coherence-modulated threshold; accepted neurons
    /// are stamped, traced, and their modulated outputs enqueue at the next
    /// hop. The traversal stops when the queue drains or the next entry's
    /// hop reaches `max_hops`.
    pub fn propagate(
        &mut self,
        source: NeuronId,
        signal: f64,
        max_hops: u32,
        now: u64,
    ) -> PropagationOutcome {
        let mut queue = VecDeque::new();
        queue.push_back(QueueEntry {
            neuron: source,
            signal,
            hop: 0,
            timestamp: now,
        });

        let mut visited: AHashSet<NeuronId> = AHashSet::new();
        let mut activated: Vec<NeuronId> = Vec::new();
        let mut signal_path: Vec<SignalTrace> = Vec::new();

        while let Some(entry) = queue.pop_front() {
            // Hops are non-decreasing along the queue, so the first entry at
            // the hop bound ends the traversal.
            if entry.hop >= max_hops {
                break;
            }
            if !visited.insert(entry.neuron) {
                continue;
            }

            let rng = &mut self.rng;
            let Some(neuron) = self.units.get_mut(&entry.neuron) else {
                continue;
            };
            if !neuron.can_activate(entry.signal, entry.timestamp) {
                continue;
            }

            neuron.mark_activated(entry.timestamp);
            activated.push(entry.neuron);
            signal_path.push(SignalTrace {
                neuron: entry.neuron,
                signal: entry.signal,
                hop: entry.hop,
                timestamp: entry.timestamp,
            });

            for output in neuron.propagate_signal(entry.signal, entry.timestamp, rng) {
                queue.push_back(QueueEntry {
                    neuron: output.target,
                    signal: output.signal,
                    hop: entry.hop + 1,
                    timestamp: output.timestamp,
                });
            }
        }

        let response = self.network_response(&activated, now);
        debug!(
            source = %source,
            activated = activated.len(),
            coherence_ratio = response.coherence_ratio,
            "propagation finished"
        );
        PropagationOutcome {
            activated,
            signal_path,
            response,
        }
    }

    fn network_response(&self, activated: &[NeuronId], now: u64) -> NetworkResponse {
        let mut total = 0.0;
        let mut coherent = 0.0;
        for id in activated {
            if let Some(neuron) = self.units.get(id) {
                let probability = neuron.activation_probability(now);
                total += probability;
                coherent += probability * neuron.coherence(now);
            }
        }
        NetworkResponse {
            total,
            coherent,
            coherence_ratio: if total > 0.0 { coherent / total } else { 0.0 },
        }
    }
}
