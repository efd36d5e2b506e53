// Copyright 2025 QNF Contributors
// SPDX-License-Identifier: Apache-2.0

//! Neuron type specialization.
//!
//! Each neuron belongs to exactly one of a closed set of types. A type
//! carries its parameter ranges as data; creation samples every biological
//! parameter uniformly from the type's range through a single lookup instead
//! of scattered per-type conditionals.

use core::ops::Range;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Closed set of neuron specializations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NeuronType {
    Sensory,
    Motor,
    Memory,
    Processing,
}

impl NeuronType {
    pub const ALL: [NeuronType; 4] = [
        NeuronType::Sensory,
        NeuronType::Motor,
        NeuronType::Memory,
        NeuronType::Processing,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            NeuronType::Sensory => "sensory",
            NeuronType::Motor => "motor",
            NeuronType::Memory => "memory",
            NeuronType::Processing => "processing",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "sensory" => Some(NeuronType::Sensory),
            "motor" => Some(NeuronType::Motor),
            "memory" => Some(NeuronType::Memory),
            "processing" => Some(NeuronType::Processing),
            _ => None,
        }
    }

    /// Target share of this type in a balanced network, used by the
    /// creation policy when scoring deficits.
    pub fn target_fraction(&self) -> f64 {
        match self {
            NeuronType::Processing => 0.6,
            NeuronType::Memory => 0.2,
            NeuronType::Sensory => 0.1,
            NeuronType::Motor => 0.1,
        }
    }

    /// Parameter ranges for this specialization.
    pub fn ranges(&self) -> ParameterRanges {
        let base = ParameterRanges {
            activation_threshold: 0.5..0.8,
            refractory_period: 50.0..150.0,
            plasticity: 0.1..0.3,
            learning_rate: 0.01..0.06,
            coherence_time: 1000.0..6000.0,
        };

        match self {
            NeuronType::Sensory => ParameterRanges {
                activation_threshold: 0.2..0.4,
                learning_rate: 0.04..0.06,
                ..base
            },
            NeuronType::Motor => ParameterRanges {
                activation_threshold: 0.7..0.9,
                refractory_period: 20.0..50.0,
                ..base
            },
            NeuronType::Memory => ParameterRanges {
                plasticity: 0.3..0.5,
                coherence_time: 5000.0..10000.0,
                ..base
            },
            NeuronType::Processing => ParameterRanges {
                learning_rate: 0.015..0.025,
                ..base
            },
        }
    }
}

impl core::fmt::Display for NeuronType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-type bounds on the randomized biological parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterRanges {
    pub activation_threshold: Range<f64>,
    /// Milliseconds.
    pub refractory_period: Range<f64>,
    pub plasticity: Range<f64>,
    pub learning_rate: Range<f64>,
    /// Milliseconds.
    pub coherence_time: Range<f64>,
}

impl ParameterRanges {
    /// Draw one concrete parameter set from these ranges.
    pub fn sample(&self, rng: &mut impl Rng) -> NeuronParameters {
        NeuronParameters {
            activation_threshold: rng.gen_range(self.activation_threshold.clone()),
            refractory_period: rng.gen_range(self.refractory_period.clone()),
            plasticity: rng.gen_range(self.plasticity.clone()),
            learning_rate: rng.gen_range(self.learning_rate.clone()),
            coherence_time: rng.gen_range(self.coherence_time.clone()),
        }
    }
}

/// Concrete parameter set drawn at neuron creation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NeuronParameters {
    pub activation_threshold: f64,
    pub refractory_period: f64,
    pub plasticity: f64,
    pub learning_rate: f64,
    pub coherence_time: f64,
}
