// Copyright 2025 QNF Contributors
// SPDX-License-Identifier: Apache-2.0

//! Core type definitions shared by the neuron model.

pub mod error;
pub mod ids;
pub mod spatial;

pub use error::{NeuralError, NeuralResult};
pub use ids::NeuronId;
pub use spatial::Position;
