// Copyright 2025 QNF Contributors
// SPDX-License-Identifier: Apache-2.0

//! # Global Quantum Field
//!
//! A spatially discretized perturbation source shared by all neurons. The
//! field carries a fixed-resolution 3D grid of coherence scalars in [-1, 1]
//! plus a global oscillation phase, and evolves each tick independently of
//! any single neuron.

use ndarray::Array3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use qnf_neural::{Amplitude, Position};

/// Grid cells per axis.
pub const GRID_RESOLUTION: usize = 10;

/// Magnitude of the per-cell stochastic perturbation applied each tick.
const EVOLUTION_RATE: f64 = 0.001;

/// The field's contribution at one position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldInfluence {
    pub amplitude: Amplitude,
    pub strength: f64,
}

/// Global coherence field.
#[derive(Debug, Clone)]
pub struct QuantumField {
    field_strength: f64,
    /// Oscillation frequency in Hz.
    oscillation_frequency: f64,
    phase: f64,
    coherence_grid: Array3<f64>,
}

impl QuantumField {
    /// Create a field with a wave-interference seed pattern and a random
    /// oscillation frequency in [0.1, 0.6) Hz.
    pub fn new(rng: &mut impl Rng) -> Self {
        let coherence_grid = Array3::from_shape_fn(
            (GRID_RESOLUTION, GRID_RESOLUTION, GRID_RESOLUTION),
            |(x, y, z)| {
                (x as f64 * 0.5).sin() * (y as f64 * 0.5).cos() * (z as f64 * 0.5).sin()
            },
        );
        Self {
            field_strength: 1.0,
            oscillation_frequency: 0.1 + rng.gen::<f64>() * 0.5,
            phase: 0.0,
            coherence_grid,
        }
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn oscillation_frequency(&self) -> f64 {
        self.oscillation_frequency
    }

    pub fn field_strength(&self) -> f64 {
        self.field_strength
    }

    pub fn grid(&self) -> &Array3<f64> {
        &self.coherence_grid
    }

    /// Advance the oscillation phase and apply a small bounded stochastic
    /// perturbation to every grid cell, clamped into [-1, 1].
    pub fn update(&mut self, delta_ms: f64, rng: &mut impl Rng) {
        self.phase += self.oscillation_frequency * delta_ms / 1000.0;

        for cell in self.coherence_grid.iter_mut() {
            let noise = (rng.gen::<f64>() - 0.5) * EVOLUTION_RATE;
            *cell = (*cell + noise).clamp(-1.0, 1.0);
        }
    }

    /// Field influence at a continuous position, mapped to the nearest grid
    /// cell. Positions outside the unit cube see zero influence.
    pub fn influence_at(&self, position: Position) -> FieldInfluence {
        let cell = self
            .cell_index(position)
            .map(|index| self.coherence_grid[index])
            .unwrap_or(0.0);

        let time_modulation = self.phase.sin() * self.field_strength;
        FieldInfluence {
            amplitude: Amplitude::new(cell * self.phase.cos(), cell * self.phase.sin()),
            strength: (cell * time_modulation).abs(),
        }
    }

    fn cell_index(&self, position: Position) -> Option<(usize, usize, usize)> {
        if !position.in_unit_cube() {
            return None;
        }
        let scale = (GRID_RESOLUTION - 1) as f64;
        Some((
            (position.x * scale).floor() as usize,
            (position.y * scale).floor() as usize,
            (position.z * scale).floor() as usize,
        ))
    }

    pub(crate) fn restore(snapshot: &FieldSnapshot) -> Self {
        Self {
            field_strength: snapshot.field_strength,
            oscillation_frequency: snapshot.oscillation_frequency,
            phase: snapshot.phase,
            coherence_grid: snapshot.coherence_grid.clone(),
        }
    }

    pub(crate) fn export(&self) -> FieldSnapshot {
        FieldSnapshot {
            field_strength: self.field_strength,
            oscillation_frequency: self.oscillation_frequency,
            phase: self.phase,
            coherence_grid: self.coherence_grid.clone(),
        }
    }
}

/// Exported field state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSnapshot {
    pub field_strength: f64,
    pub oscillation_frequency: f64,
    pub phase: f64,
    pub coherence_grid: Array3<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(3)
    }

    #[test]
    fn test_initial_grid_is_bounded() {
        let field = QuantumField::new(&mut rng());
        assert!(field.grid().iter().all(|&v| (-1.0..=1.0).contains(&v)));
        assert!(field.oscillation_frequency() >= 0.1);
        assert!(field.oscillation_frequency() < 0.6);
    }

    #[test]
    fn test_update_advances_phase() {
        let mut rng = rng();
        let mut field = QuantumField::new(&mut rng);
        let frequency = field.oscillation_frequency();
        field.update(500.0, &mut rng);
        assert!((field.phase() - frequency * 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_update_keeps_grid_bounded() {
        let mut rng = rng();
        let mut field = QuantumField::new(&mut rng);
        for _ in 0..1000 {
            field.update(16.0, &mut rng);
        }
        assert!(field.grid().iter().all(|&v| (-1.0..=1.0).contains(&v)));
    }

    #[test]
    fn test_out_of_range_position_yields_zero_influence() {
        let field = QuantumField::new(&mut rng());
        let influence = field.influence_at(Position::new(1.5, 0.5, 0.5));
        assert_eq!(influence.strength, 0.0);
        assert_eq!(influence.amplitude, Amplitude::new(0.0, 0.0));
    }

    #[test]
    fn test_influence_derives_from_cell_and_phase() {
        let mut rng = rng();
        let mut field = QuantumField::new(&mut rng);
        field.update(1000.0, &mut rng);

        let position = Position::new(0.45, 0.45, 0.45);
        let influence = field.influence_at(position);
        let cell = field.grid()[(4, 4, 4)];
        let phase = field.phase();
        assert!((influence.amplitude.re - cell * phase.cos()).abs() < 1e-12);
        assert!((influence.amplitude.im - cell * phase.sin()).abs() < 1e-12);
        assert!(
            (influence.strength - (cell * phase.sin() * field.field_strength()).abs()).abs()
                < 1e-12
        );
    }

    #[test]
    fn test_field_snapshot_round_trip() {
        let mut rng = rng();
        let mut field = QuantumField::new(&mut rng);
        field.update(250.0, &mut rng);
        let restored = QuantumField::restore(&field.export());
        assert_eq!(restored.export(), field.export());
    }
}
