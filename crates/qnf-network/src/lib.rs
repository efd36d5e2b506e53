// Copyright 2025 QNF Contributors
// SPDX-License-Identifier: Apache-2.0

//! # QNF Network Engine
//!
//! The network-level half of the simulation core:
//! - **Field**: the global, spatially discretized coherence field
//! - **Network**: neuron ownership, creation-time connectivity, the
//!   per-tick superposition update, and aggregate statistics
//! - **Propagation**: bounded breadth-first signal spread
//! - **Snapshot**: self-describing export/import for external persistence
//!
//! One known modeling quirk is preserved on purpose: the per-tick
//! interference pattern is computed and exported but not fed back into the
//! superposition update. Downstream consumers read it from snapshots.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod error;
pub mod field;
pub mod network;
pub mod propagation;
pub mod snapshot;
pub mod stats;

pub use config::NetworkConfig;
pub use error::{NetworkError, NetworkResult};
pub use field::{FieldInfluence, FieldSnapshot, QuantumField, GRID_RESOLUTION};
pub use network::QuantumNetwork;
pub use propagation::{NetworkResponse, PropagationOutcome, SignalTrace};
pub use snapshot::NetworkSnapshot;
pub use stats::NetworkStats;
