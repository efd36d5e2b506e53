// Copyright 2025 QNF Contributors
// SPDX-License-Identifier: Apache-2.0

//! Property-based checks of the neuron-level invariants.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use qnf_neural::{
    Connection, Influence, NeuronId, NeuronType, Position, QuantumNeuron, MAX_HISTORY_LEN,
    PLASTICITY_FACTOR_MAX, PLASTICITY_FACTOR_MIN, WEIGHT_MAX, WEIGHT_MIN,
};

proptest! {
    /// weight ∈ [-2,2] and strength == |weight| after any reinforcement
    /// sequence.
    #[test]
    fn prop_weight_bounds_hold(
        initial in -2.0f64..2.0,
        learning_rate in 0.001f64..0.1,
        reinforcements in prop::collection::vec(-5.0f64..5.0, 0..200),
    ) {
        let mut connection = Connection::new(initial);
        for reinforcement in reinforcements {
            connection.reinforce(learning_rate, reinforcement);
            prop_assert!(connection.weight >= WEIGHT_MIN);
            prop_assert!(connection.weight <= WEIGHT_MAX);
            prop_assert!((connection.strength - connection.weight.abs()).abs() < 1e-12);
            prop_assert!(connection.plasticity_factor >= PLASTICITY_FACTOR_MIN);
            prop_assert!(connection.plasticity_factor <= PLASTICITY_FACTOR_MAX);
        }
    }

    /// The amplitude stays normalized across any superposition sequence.
    #[test]
    fn prop_amplitude_stays_normalized(
        seed in 0u64..10_000,
        influences in prop::collection::vec((-1.0f64..1.0, -1.0f64..1.0, -3.0f64..3.0), 0..50),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut neuron = QuantumNeuron::new(
            NeuronId(1),
            NeuronType::Processing,
            Position::new(0.5, 0.5, 0.5),
            0,
            &mut rng,
        );
        for (re, im, weight) in influences {
            neuron.enter_superposition(
                &[Influence {
                    amplitude: qnf_neural::Amplitude::new(re, im),
                    weight,
                }],
                &mut rng,
            );
            prop_assert!((neuron.amplitude().probability() - 1.0).abs() < 1e-9);
        }
    }

    /// The history never exceeds its bound no matter how many measurements
    /// happen.
    #[test]
    fn prop_history_stays_bounded(seed in 0u64..1000, extra in 0usize..64) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut neuron = QuantumNeuron::new(
            NeuronId(1),
            NeuronType::Sensory,
            Position::new(0.5, 0.5, 0.5),
            0,
            &mut rng,
        );
        let total = MAX_HISTORY_LEN + extra;
        for t in 0..total as u64 {
            neuron.measure_state(t, &mut rng);
            prop_assert!(neuron.activation_history().len() <= MAX_HISTORY_LEN);
        }
        // Oldest-first eviction: the surviving records are the most recent
        // ones, still in ascending time order.
        let history = neuron.activation_history();
        prop_assert_eq!(history.len(), MAX_HISTORY_LEN);
        prop_assert_eq!(history.front().unwrap().timestamp, extra as u64);
        prop_assert!(history
            .iter()
            .zip(history.iter().skip(1))
            .all(|(a, b)| a.timestamp < b.timestamp));
    }
}
