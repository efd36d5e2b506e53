// Copyright 2025 QNF Contributors
// SPDX-License-Identifier: Apache-2.0

//! # QNF - Quantum Neural Foundation
//!
//! A discrete-time simulation engine for networks of quantum-inspired
//! stochastic neurons. Each neuron carries a normalized two-component
//! amplitude and a phase; a global coherence field modulates per-tick
//! superposition updates; signals spread through bounded breadth-first
//! propagation; Hebbian plasticity shapes connection weights; and a
//! load-driven policy grows the population under sustained demand.
//!
//! This umbrella crate re-exports the three member crates:
//! - [`neural`]: single-neuron state, connections, specialization, activity
//! - [`network`]: the field, the network engine, propagation, snapshots
//! - [`neurogenesis`]: the load-driven creation policy
//!
//! ## Quick Start
//!
//! ```
//! use qnf::prelude::*;
//!
//! let mut net = QuantumNetwork::with_seed(NetworkConfig::default(), 42);
//! let id = net.create_neuron(NeuronType::Sensory, None, 0)?;
//! net.update_network(16.0, 16);
//! let outcome = net.propagate(id, 5.0, 10, 32);
//! assert!(outcome.activated.len() <= net.len());
//! # Ok::<(), qnf::network::NetworkError>(())
//! ```
//!
//! Every operation that depends on time takes an explicit `now` in
//! milliseconds, and every source of randomness is a seedable injected
//! generator, so whole simulations replay deterministically.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use qnf_neural as neural;
pub use qnf_network as network;
pub use qnf_neurogenesis as neurogenesis;

/// Common imports for working with the engine.
pub mod prelude {
    pub use qnf_neural::{
        ActivityPattern, Amplitude, Connection, NeuronId, NeuronType, Position, QuantumNeuron,
    };

    pub use qnf_network::{
        NetworkConfig, NetworkSnapshot, NetworkStats, PropagationOutcome, QuantumField,
        QuantumNetwork,
    };

    pub use qnf_neurogenesis::{NeurogenesisConfig, NeurogenesisOutcome, NeurogenesisPolicy};
}
