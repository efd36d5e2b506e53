// Copyright 2025 QNF Contributors
// SPDX-License-Identifier: Apache-2.0

//! Two-component amplitude state.
//!
//! The amplitude is a real (re, im) pair kept at unit magnitude everywhere
//! except inside an in-flight superposition recombination, after which it is
//! renormalized. Its squared magnitude is nominally an activation
//! probability.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Normalized two-component state vector of a neuron.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Amplitude {
    pub re: f64,
    pub im: f64,
}

impl Amplitude {
    /// Canonical collapsed "active" basis state.
    pub const ACTIVE: Amplitude = Amplitude { re: 1.0, im: 0.0 };

    /// Canonical collapsed "inactive" basis state.
    pub const INACTIVE: Amplitude = Amplitude { re: 0.0, im: 1.0 };

    pub fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Random unit-magnitude amplitude.
    pub fn random(rng: &mut impl Rng) -> Self {
        loop {
            let re = (rng.gen::<f64>() - 0.5) * 2.0;
            let im = (rng.gen::<f64>() - 0.5) * 2.0;
            let candidate = Amplitude { re, im };
            // A zero draw cannot be normalized; redraw.
            if candidate.magnitude() > f64::EPSILON {
                return candidate.normalized();
            }
        }
    }

    pub fn magnitude(&self) -> f64 {
        (self.re * self.re + self.im * self.im).sqrt()
    }

    /// Squared magnitude, nominally an activation probability.
    pub fn probability(&self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    /// Unit-magnitude copy. Returns `self` unchanged when the magnitude is
    /// zero, so a degenerate vector never produces NaN components.
    pub fn normalized(&self) -> Self {
        let magnitude = self.magnitude();
        if magnitude > 0.0 {
            Amplitude {
                re: self.re / magnitude,
                im: self.im / magnitude,
            }
        } else {
            *self
        }
    }
}
