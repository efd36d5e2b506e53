// Copyright 2025 QNF Contributors
// SPDX-License-Identifier: Apache-2.0

//! Scenario tests for the network engine: capacity enforcement,
//! proximity-driven connectivity, measurement statistics, propagation
//! bounds, and snapshot round-trips.

use qnf_network::{NetworkConfig, NetworkError, QuantumNetwork};
use qnf_neural::{NeuronType, Position};

fn seeded(max_neurons: usize, seed: u64) -> QuantumNetwork {
    QuantumNetwork::with_seed(
        NetworkConfig {
            max_neurons,
            ..NetworkConfig::default()
        },
        seed,
    )
}

#[test]
fn scenario_capacity_of_one() {
    let mut net = seeded(1, 1);
    net.create_neuron(NeuronType::Processing, None, 0)
        .expect("first creation fits");
    let err = net
        .create_neuron(NeuronType::Processing, None, 0)
        .expect_err("second creation exceeds capacity");
    assert_eq!(err, NetworkError::CapacityExceeded { max: 1 });
    assert_eq!(net.len(), 1);
}

#[test]
fn scenario_identical_positions_always_connect() {
    // exp(-3·0) = 1, so the connection is certain regardless of seed.
    for seed in 0..20 {
        let mut net = seeded(10, seed);
        let position = Position::new(0.3, 0.3, 0.3);
        let first = net
            .create_neuron(NeuronType::Processing, Some(position), 0)
            .unwrap();
        let second = net
            .create_neuron(NeuronType::Processing, Some(position), 0)
            .unwrap();
        assert!(
            net.neuron(second)
                .unwrap()
                .connections()
                .contains_key(&first),
            "seed {seed}: co-located neurons must connect"
        );
    }
}

#[test]
fn scenario_immediate_measurements_track_amplitude() {
    // Right after creation elapsed ≈ 0, decoherence ≈ 1, and the amplitude
    // is normalized, so the activation frequency should be near 1.
    let mut net = seeded(2000, 3);
    let mut ids = Vec::new();
    for _ in 0..1000 {
        ids.push(net.create_neuron(NeuronType::Processing, None, 0).unwrap());
    }
    let mut active = 0u32;
    for id in ids {
        if net.measure_neuron(id, 0).unwrap() {
            active += 1;
        }
    }
    let frequency = active as f64 / 1000.0;
    assert!(
        frequency > 0.98,
        "observed activation frequency {frequency} far from |amplitude|² ≈ 1"
    );
}

#[test]
fn scenario_isolated_neuron_propagation() {
    let mut net = seeded(10, 4);
    let id = net
        .create_neuron(NeuronType::Sensory, Some(Position::new(0.9, 0.9, 0.9)), 0)
        .unwrap();
    assert!(net.neuron(id).unwrap().connections().is_empty());

    let outcome = net.propagate(id, 5.0, 10, 0);
    assert!(outcome.activated.len() <= 1);
    assert!(outcome.signal_path.len() <= 1);
    assert!(outcome
        .activated
        .first()
        .map_or(true, |&activated| activated == id));
}

#[test]
fn scenario_propagation_bounded_by_population() {
    let mut net = seeded(100, 5);
    let position = Position::new(0.5, 0.5, 0.5);
    let source = net
        .create_neuron(NeuronType::Sensory, Some(position), 0)
        .unwrap();
    for _ in 0..60 {
        net.create_neuron(NeuronType::Processing, Some(position), 0)
            .unwrap();
    }
    let outcome = net.propagate(source, 10.0, 1000, 0);
    assert!(outcome.activated.len() <= net.len());
}

#[test]
fn scenario_snapshot_round_trip_after_activity() {
    let mut net = seeded(50, 6);
    let cluster = Position::new(0.5, 0.5, 0.5);
    let source = net
        .create_neuron(NeuronType::Sensory, Some(cluster), 0)
        .unwrap();
    for kind in [NeuronType::Processing, NeuronType::Memory, NeuronType::Motor] {
        net.create_neuron(kind, Some(cluster), 0).unwrap();
    }

    // Drive the network through ticks and a propagation before export.
    for tick in 1..=10u64 {
        net.update_network(16.0, tick * 16);
    }
    net.propagate(source, 5.0, 5, 200);
    net.refresh_stats(200);

    let exported = net.export_state(200);
    let restored = QuantumNetwork::import_state(&exported).unwrap();
    let re_exported = restored.export_state(200);

    assert_eq!(exported.neurons, re_exported.neurons);
    assert_eq!(exported.groups, re_exported.groups);
    assert_eq!(exported.field, re_exported.field);
    assert_eq!(exported.stats, re_exported.stats);
}

#[test]
fn scenario_stats_reflect_population() {
    let mut net = seeded(50, 7);
    let cluster = Position::new(0.5, 0.5, 0.5);
    for _ in 0..20 {
        net.create_neuron(NeuronType::Processing, Some(cluster), 0)
            .unwrap();
    }
    net.refresh_stats(0);
    let stats = *net.stats();
    assert_eq!(stats.total_neurons, 20);
    // Co-located cluster: every later neuron connects to every earlier one.
    assert!(stats.total_connections >= 19);
    assert!(stats.average_coherence > 0.99);
}
