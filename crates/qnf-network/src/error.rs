// Copyright 2025 QNF Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for network-level operations.
//!
//! No error here is fatal to the network as a whole; each is local to the
//! offending call and leaves the network state unchanged.

use qnf_neural::{NeuralError, NeuronId};

/// Result type for network-level operations.
pub type NetworkResult<T> = Result<T, NetworkError>;

/// Errors that can occur during network-level operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NetworkError {
    /// `create_neuron` was called at capacity. Recoverable; no state change.
    #[error("network at capacity: {max} neurons")]
    CapacityExceeded { max: usize },

    /// An operation referenced a neuron id the network does not contain.
    #[error("neuron not found: {0}")]
    NeuronNotFound(NeuronId),

    /// A supplied position fell outside the unit cube. Rejected, not clamped.
    #[error("position ({x}, {y}, {z}) outside the unit cube")]
    InvalidPosition { x: f64, y: f64, z: f64 },

    /// A neuron-level failure surfaced through a network operation.
    #[error(transparent)]
    Neural(#[from] NeuralError),
}
