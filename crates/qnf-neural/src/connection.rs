// Copyright 2025 QNF Contributors
// SPDX-License-Identifier: Apache-2.0

//! Synaptic connection entries and the Hebbian reinforcement rule.

use serde::{Deserialize, Serialize};

/// Hard bounds on the connection weight.
pub const WEIGHT_MIN: f64 = -2.0;
pub const WEIGHT_MAX: f64 = 2.0;

/// Bounds on the per-connection plasticity factor.
pub const PLASTICITY_FACTOR_MIN: f64 = 0.1;
pub const PLASTICITY_FACTOR_MAX: f64 = 2.0;

/// One outgoing synaptic connection.
///
/// Invariants: `weight` stays in [-2, 2] and `strength == |weight|` across
/// any sequence of reinforcement calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub weight: f64,
    pub strength: f64,
    pub last_used: u64,
    pub usage_count: u64,
    pub plasticity_factor: f64,
}

impl Connection {
    pub fn new(weight: f64) -> Self {
        let weight = weight.clamp(WEIGHT_MIN, WEIGHT_MAX);
        Self {
            weight,
            strength: weight.abs(),
            last_used: 0,
            usage_count: 0,
            plasticity_factor: 1.0,
        }
    }

    /// Record one use of this connection at `now`.
    pub fn record_use(&mut self, now: u64) {
        self.last_used = now;
        self.usage_count += 1;
    }

    /// Hebbian update: "neurons that fire together, wire together".
    ///
    /// The weight moves by `learning_rate × reinforcement × plasticity_factor`
    /// and is clamped back into [-2, 2]; the plasticity factor itself is
    /// nudged multiplicatively and clamped into [0.1, 2.0].
    pub fn reinforce(&mut self, learning_rate: f64, reinforcement: f64) {
        let hebbian_update = learning_rate * reinforcement * self.plasticity_factor;
        self.weight = (self.weight + hebbian_update).clamp(WEIGHT_MIN, WEIGHT_MAX);
        self.strength = self.weight.abs();

        self.plasticity_factor = (self.plasticity_factor * (1.0 + reinforcement * 0.01))
            .clamp(PLASTICITY_FACTOR_MIN, PLASTICITY_FACTOR_MAX);
    }
}
