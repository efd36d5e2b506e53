// Copyright 2025 QNF Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for the neurogenesis policy.

use thiserror::Error;

use qnf_network::NetworkError;

pub type NeurogenesisResult<T> = Result<T, NeurogenesisError>;

#[derive(Debug, Error)]
pub enum NeurogenesisError {
    /// A network operation the policy delegated to failed.
    #[error(transparent)]
    Network(#[from] NetworkError),
}
