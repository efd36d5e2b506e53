// Copyright 2025 QNF Contributors
// SPDX-License-Identifier: Apache-2.0

//! Spatial types for the unit-cube simulation space.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// 3D position inside the unit cube [0,1]³.
///
/// Positions are fixed at neuron creation and never mutated afterward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Uniform random position inside the unit cube.
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            x: rng.gen::<f64>(),
            y: rng.gen::<f64>(),
            z: rng.gen::<f64>(),
        }
    }

    /// Whether every coordinate lies in [0,1].
    pub fn in_unit_cube(&self) -> bool {
        let in_range = |v: f64| (0.0..=1.0).contains(&v);
        in_range(self.x) && in_range(self.y) && in_range(self.z)
    }

    /// Euclidean distance to another position.
    pub fn distance(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Clamp every coordinate into [0,1].
    pub fn clamped(&self) -> Self {
        Self {
            x: self.x.clamp(0.0, 1.0),
            y: self.y.clamp(0.0, 1.0),
            z: self.z.clamp(0.0, 1.0),
        }
    }
}
