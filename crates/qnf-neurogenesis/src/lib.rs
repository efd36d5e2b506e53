// Copyright 2025 QNF Contributors
// SPDX-License-Identifier: Apache-2.0

//! # QNF Neurogenesis
//!
//! Load-driven structural growth for a quantum-inspired network. The policy
//! observes network activity over time, detects sustained overload with a
//! rising trend, and creates new neurons of the most-needed type in their
//! home regions. It owns its monitoring state and random source and acts on
//! the network only through its public creation operation.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod policy;

pub use error::{NeurogenesisError, NeurogenesisResult};
pub use policy::{
    CreationRequest, EffectivenessReport, LoadReport, LoadSample, NeurogenesisConfig,
    NeurogenesisOutcome, NeurogenesisPolicy, NeurogenesisStats, SkipReason,
};
