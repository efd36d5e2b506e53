// Copyright 2025 QNF Contributors
// SPDX-License-Identifier: Apache-2.0

//! # QNF Neural Model
//!
//! The neuron-level half of the simulation core:
//! - **Types**: `NeuronId`, `Position`, error types
//! - **Amplitude**: normalized two-component state vectors
//! - **Neuron**: measurement/collapse, superposition, entanglement,
//!   interference, signal emission
//! - **Connection**: weighted edges with Hebbian plasticity
//! - **Activity**: bounded history and pattern analysis
//! - **Specialization**: the closed set of neuron types with their
//!   parameter ranges as data
//!
//! Everything here is deterministic given (state, inputs, `now`, rng): time
//! is passed explicitly in milliseconds and randomness comes from the
//! caller's generator, never from an ambient source.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod activity;
pub mod amplitude;
pub mod connection;
pub mod neuron;
pub mod snapshot;
pub mod specialization;
pub mod types;

pub use activity::{ActivationRecord, ActivityPattern, ANALYSIS_WINDOW, MAX_HISTORY_LEN};
pub use amplitude::Amplitude;
pub use connection::{
    Connection, PLASTICITY_FACTOR_MAX, PLASTICITY_FACTOR_MIN, WEIGHT_MAX, WEIGHT_MIN,
};
pub use neuron::{Influence, InterferencePattern, QuantumNeuron, SignalOutput};
pub use snapshot::{ConnectionSnapshot, NeuronProperties, NeuronSnapshot};
pub use specialization::{NeuronParameters, NeuronType, ParameterRanges};
pub use types::{NeuralError, NeuralResult, NeuronId, Position};
