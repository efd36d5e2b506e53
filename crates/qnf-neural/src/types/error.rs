// Copyright 2025 QNF Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for neuron-level operations.

use super::ids::NeuronId;

/// Result type for neuron-level operations.
pub type NeuralResult<T> = Result<T, NeuralError>;

/// Errors that can occur during neuron-level operations.
///
/// All of these are local to the offending call; none poisons the neuron.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NeuralError {
    /// A plasticity update referenced a target this neuron is not connected to.
    #[error("no connection to target {0}")]
    MissingConnection(NeuronId),
}
