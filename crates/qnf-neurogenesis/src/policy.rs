// Copyright 2025 QNF Contributors
// SPDX-License-Identifier: Apache-2.0

//! # Load-Driven Neurogenesis Policy
//!
//! An external collaborator of the network: it reads aggregate and
//! per-neuron activity, decides *when* a new neuron is warranted and *what
//! type and where* it should be, and calls the network's creation operation.
//! It never touches simulation state directly.
//!
//! Creation is gated on four conditions evaluated together: sustained high
//! load, spare capacity, available resources, and a rising load trend.

use std::collections::VecDeque;

use ahash::AHashMap;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use qnf_network::{NetworkError, QuantumNetwork};
use qnf_neural::{NeuronId, NeuronType, Position, QuantumNeuron};

use crate::error::{NeurogenesisError, NeurogenesisResult};

/// Number of load samples retained for trend analysis.
const LOAD_HISTORY_LEN: usize = 100;

/// Samples considered by the trend gate.
const TREND_WINDOW: usize = 5;

/// Most recent history records considered when scoring a neuron's activity.
const ACTIVITY_WINDOW: usize = 20;

/// Minimum history length before a neuron contributes to the load estimate.
const MIN_ACTIVITY_HISTORY: usize = 5;

/// Fraction of overloaded neurons that counts as an overload event.
const OVERLOAD_FRACTION: f64 = 0.3;

/// Policy parameters, fixed at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeurogenesisConfig {
    /// Policy-side cap; the network enforces its own as well.
    pub max_neurons: usize,
    /// Neurons per second at sustained high activity.
    pub neurogenesis_rate: f64,
    /// Network load above which creation is considered.
    pub activity_threshold: f64,
    /// Resource usage above which creation is suppressed.
    pub resource_threshold: f64,
}

impl Default for NeurogenesisConfig {
    fn default() -> Self {
        Self {
            max_neurons: 1000,
            neurogenesis_rate: 0.1,
            activity_threshold: 0.8,
            resource_threshold: 0.9,
        }
    }
}

/// One load observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadSample {
    pub timestamp: u64,
    /// Mean per-neuron activity in [0,1].
    pub load: f64,
    /// Neurons with activity above 0.5.
    pub active: usize,
    /// Neurons with activity above 0.9.
    pub overloaded: usize,
    pub total: usize,
}

/// Load summary returned by `monitor_load`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadReport {
    pub current_load: f64,
    pub active: usize,
    pub overloaded: usize,
    pub needs_neurogenesis: bool,
}

/// Why a creation attempt was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    BelowActivityThreshold,
    AtCapacity,
    ResourcesExhausted,
    NoGrowthTrend,
}

/// Outcome of one policy run.
#[derive(Debug, Clone, PartialEq)]
pub enum NeurogenesisOutcome {
    Created {
        id: NeuronId,
        kind: NeuronType,
        position: Position,
    },
    Skipped(SkipReason),
}

/// Cumulative creation statistics.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NeurogenesisStats {
    pub total_created: u64,
    pub created_by_type: AHashMap<NeuronType, u64>,
    /// Neurons per second since the first creation.
    pub creation_rate: f64,
    pub first_creation: Option<u64>,
    pub last_creation: Option<u64>,
}

/// Retrospective view of how well the growth policy is coping with load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectivenessReport {
    pub total_created: u64,
    pub creation_rate: f64,
    /// Share of created neurons per type, in percent.
    pub type_distribution: AHashMap<NeuronType, f64>,
    /// Mean load over the last 20 samples.
    pub average_load: f64,
    /// Load trend over the last 5 samples.
    pub load_trend: f64,
    pub overload_events: u64,
    pub resource_usage: f64,
    pub queue_length: usize,
    /// Composite score in [0, 1]: high when the load sits below the
    /// activity threshold, the trend is flat or falling, and resources
    /// remain available.
    pub score: f64,
}

/// A queued creation request, processed in priority order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CreationRequest {
    pub kind: NeuronType,
    pub priority: u32,
    pub timestamp: u64,
}

/// Maximum pending creation requests.
const MAX_QUEUE_LEN: usize = 10;

/// Requests drained per `process_queue` cycle.
const MAX_PER_CYCLE: usize = 3;

/// The load-driven creation policy.
pub struct NeurogenesisPolicy {
    config: NeurogenesisConfig,
    rng: StdRng,
    load_history: VecDeque<LoadSample>,
    overload_events: u64,
    stats: NeurogenesisStats,
    queue: Vec<CreationRequest>,
}

impl NeurogenesisPolicy {
    pub fn new(config: NeurogenesisConfig) -> Self {
        Self::from_rng(config, StdRng::from_entropy())
    }

    pub fn with_seed(config: NeurogenesisConfig, seed: u64) -> Self {
        Self::from_rng(config, StdRng::seed_from_u64(seed))
    }

    fn from_rng(config: NeurogenesisConfig, rng: StdRng) -> Self {
        Self {
            config,
            rng,
            load_history: VecDeque::new(),
            overload_events: 0,
            stats: NeurogenesisStats::default(),
            queue: Vec::new(),
        }
    }

    pub fn config(&self) -> &NeurogenesisConfig {
        &self.config
    }

    pub fn stats(&self) -> &NeurogenesisStats {
        &self.stats
    }

    pub fn overload_events(&self) -> u64 {
        self.overload_events
    }

    pub fn load_history(&self) -> &VecDeque<LoadSample> {
        &self.load_history
    }

    /// Activity score of one neuron: fraction of its recent history records
    /// that were active. Zero until enough history accumulates.
    pub fn neuron_activity(neuron: &QuantumNeuron) -> f64 {
        let history = neuron.activation_history();
        if history.len() < MIN_ACTIVITY_HISTORY {
            return 0.0;
        }
        let skip = history.len().saturating_sub(ACTIVITY_WINDOW);
        let window = history.iter().skip(skip);
        let (mut total, mut active) = (0usize, 0usize);
        for record in window {
            total += 1;
            if record.active {
                active += 1;
            }
        }
        active as f64 / total as f64
    }

    /// Observe the network's load at `now` and record a sample.
    pub fn monitor_load(&mut self, network: &QuantumNetwork, now: u64) -> LoadReport {
        if network.is_empty() {
            return LoadReport {
                current_load: 0.0,
                active: 0,
                overloaded: 0,
                needs_neurogenesis: false,
            };
        }

        let (mut total_activity, mut active, mut overloaded) = (0.0, 0usize, 0usize);
        for neuron in network.neurons() {
            let activity = Self::neuron_activity(neuron);
            total_activity += activity;
            if activity > 0.5 {
                active += 1;
            }
            if activity > 0.9 {
                overloaded += 1;
            }
        }

        let total = network.len();
        let load = total_activity / total as f64;

        if self.load_history.len() == LOAD_HISTORY_LEN {
            self.load_history.pop_front();
        }
        self.load_history.push_back(LoadSample {
            timestamp: now,
            load,
            active,
            overloaded,
            total,
        });

        if (overloaded as f64) > (total as f64) * OVERLOAD_FRACTION {
            self.overload_events += 1;
        }

        let report = LoadReport {
            current_load: load,
            active,
            overloaded,
            needs_neurogenesis: self.should_trigger(network).is_ok(),
        };
        debug!(load, active, overloaded, "network load sampled");
        report
    }

    /// Evaluate the four creation gates against the latest samples.
    pub fn should_trigger(&self, network: &QuantumNetwork) -> Result<(), SkipReason> {
        let current_load = self
            .load_history
            .back()
            .map(|sample| sample.load)
            .unwrap_or(0.0);
        if current_load < self.config.activity_threshold {
            return Err(SkipReason::BelowActivityThreshold);
        }
        if network.len() >= self.config.max_neurons
            || network.len() >= network.config().max_neurons
        {
            return Err(SkipReason::AtCapacity);
        }
        if self.resource_usage(network) > self.config.resource_threshold {
            return Err(SkipReason::ResourcesExhausted);
        }
        if self.load_history.len() >= TREND_WINDOW {
            let recent: Vec<f64> = self
                .load_history
                .iter()
                .rev()
                .take(TREND_WINDOW)
                .rev()
                .map(|sample| sample.load)
                .collect();
            if Self::trend(&recent) <= 0.0 {
                return Err(SkipReason::NoGrowthTrend);
            }
        }
        Ok(())
    }

    /// Mean successive difference; positive means the load is rising.
    pub fn trend(values: &[f64]) -> f64 {
        if values.len() < 2 {
            return 0.0;
        }
        let sum: f64 = values.windows(2).map(|pair| pair[1] - pair[0]).sum();
        sum / (values.len() - 1) as f64
    }

    /// Fraction of the policy's capacity already in use.
    pub fn resource_usage(&self, network: &QuantumNetwork) -> f64 {
        network.len() as f64 / self.config.max_neurons as f64
    }

    /// Baseline demand for a type before any deficit is considered.
    /// Processing capacity is always in demand; the rest taper off.
    fn baseline_need(kind: NeuronType) -> f64 {
        match kind {
            NeuronType::Processing => 0.5,
            NeuronType::Memory => 0.3,
            NeuronType::Sensory | NeuronType::Motor => 0.1,
        }
    }

    /// Pick the type whose deficit against the target mix scores highest.
    pub fn select_type(&self, network: &QuantumNetwork) -> NeuronType {
        let total = network.len();
        let mut best = NeuronType::Processing;
        let mut best_score = f64::MIN;

        for kind in NeuronType::ALL {
            let target = kind.target_fraction();
            // Baseline need plus a deficit boost when underrepresented.
            let mut need = Self::baseline_need(kind);
            if total > 0 {
                let count = network.group(kind).map_or(0, |group| group.len());
                let current = count as f64 / total as f64;
                if current < target {
                    need += (target - current) * 2.0;
                }
            }
            let score = need * target;
            if score > best_score {
                best_score = score;
                best = kind;
            }
        }
        best
    }

    /// Place the new neuron near its type's home region with random jitter,
    /// clamped to the unit cube.
    pub fn select_position(&mut self, kind: NeuronType) -> Position {
        let anchor = match kind {
            NeuronType::Sensory => Position::new(0.0, 0.0, 0.0),
            NeuronType::Motor => Position::new(1.0, 1.0, 1.0),
            NeuronType::Memory | NeuronType::Processing => Position::new(0.5, 0.5, 0.5),
        };
        let mut jitter = || (self.rng.gen::<f64>() - 0.5) * 0.2;
        Position::new(anchor.x + jitter(), anchor.y + jitter(), anchor.z + jitter()).clamped()
    }

    /// Run one policy cycle: sample the load, evaluate the gates, and create
    /// one neuron when they all pass.
    pub fn run(
        &mut self,
        network: &mut QuantumNetwork,
        now: u64,
    ) -> NeurogenesisResult<NeurogenesisOutcome> {
        self.monitor_load(network, now);
        if let Err(reason) = self.should_trigger(network) {
            return Ok(NeurogenesisOutcome::Skipped(reason));
        }

        let kind = self.select_type(network);
        let position = self.select_position(kind);
        let id = network.create_neuron(kind, Some(position), now)?;
        self.record_creation(kind, now);
        info!(%id, %kind, "neurogenesis created a neuron");
        Ok(NeurogenesisOutcome::Created { id, kind, position })
    }

    fn record_creation(&mut self, kind: NeuronType, now: u64) {
        self.stats.total_created += 1;
        *self.stats.created_by_type.entry(kind).or_insert(0) += 1;
        self.stats.last_creation = Some(now);

        let first = *self.stats.first_creation.get_or_insert(now);
        let span_seconds = now.saturating_sub(first) as f64 / 1000.0;
        if span_seconds > 0.0 {
            self.stats.creation_rate = self.stats.total_created as f64 / span_seconds;
        }
    }

    /// Queue a creation request. Rejected when the queue is full.
    pub fn queue_creation(&mut self, kind: NeuronType, priority: u32, now: u64) -> bool {
        if self.queue.len() >= MAX_QUEUE_LEN {
            return false;
        }
        self.queue.push(CreationRequest {
            kind,
            priority,
            timestamp: now,
        });
        self.queue.sort_by(|a, b| b.priority.cmp(&a.priority));
        true
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Drain up to a few queued requests, re-checking the gates per request.
    pub fn process_queue(
        &mut self,
        network: &mut QuantumNetwork,
        now: u64,
    ) -> NeurogenesisResult<usize> {
        let mut processed = 0;
        while !self.queue.is_empty() && processed < MAX_PER_CYCLE {
            self.queue.remove(0);
            match self.run(network, now) {
                Ok(NeurogenesisOutcome::Created { .. }) => processed += 1,
                Ok(NeurogenesisOutcome::Skipped(_)) => {}
                Err(NeurogenesisError::Network(NetworkError::CapacityExceeded { .. })) => break,
                Err(err) => return Err(err),
            }
        }
        Ok(processed)
    }

    /// Retrospective effectiveness analysis. `None` until at least five
    /// neurons have been created.
    pub fn effectiveness(&self, network: &QuantumNetwork) -> Option<EffectivenessReport> {
        if self.stats.total_created < 5 {
            return None;
        }

        let total = self.stats.total_created as f64;
        let type_distribution: AHashMap<NeuronType, f64> = self
            .stats
            .created_by_type
            .iter()
            .map(|(&kind, &count)| (kind, count as f64 / total * 100.0))
            .collect();

        let recent: Vec<f64> = self
            .load_history
            .iter()
            .rev()
            .take(20)
            .rev()
            .map(|sample| sample.load)
            .collect();
        let average_load = if recent.is_empty() {
            0.0
        } else {
            recent.iter().sum::<f64>() / recent.len() as f64
        };
        let load_trend = if recent.len() >= TREND_WINDOW {
            Self::trend(&recent[recent.len() - TREND_WINDOW..])
        } else {
            0.0
        };

        let resource_usage = self.resource_usage(network);
        let load_management = if average_load < self.config.activity_threshold {
            1.0
        } else {
            0.5
        };
        let trend_management = if load_trend <= 0.0 { 1.0 } else { 0.5 };
        let score = (load_management + trend_management + (1.0 - resource_usage)) / 3.0;

        Some(EffectivenessReport {
            total_created: self.stats.total_created,
            creation_rate: self.stats.creation_rate,
            type_distribution,
            average_load,
            load_trend,
            overload_events: self.overload_events,
            resource_usage,
            queue_length: self.queue.len(),
            score,
        })
    }

    /// Reset all monitoring and creation state.
    pub fn reset(&mut self) {
        self.load_history.clear();
        self.overload_events = 0;
        self.stats = NeurogenesisStats::default();
        self.queue.clear();
        info!("neurogenesis policy reset");
    }
}
