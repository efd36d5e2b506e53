// Copyright 2025 QNF Contributors
// SPDX-License-Identifier: Apache-2.0

//! Identifier newtypes shared across the simulation core.

use core::fmt;
use serde::{Deserialize, Serialize};

/// Unique neuron identifier.
///
/// Assigned sequentially by the owning network at creation and never reused.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct NeuronId(pub u64);

impl NeuronId {
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for NeuronId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "neuron_{}", self.0)
    }
}
