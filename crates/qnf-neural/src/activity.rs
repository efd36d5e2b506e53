// Copyright 2025 QNF Contributors
// SPDX-License-Identifier: Apache-2.0

//! Bounded activation history and activity-pattern analysis.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::amplitude::Amplitude;

/// Maximum number of records retained per neuron; oldest evicted first.
pub const MAX_HISTORY_LEN: usize = 1000;

/// Number of most recent records considered by pattern analysis.
pub const ANALYSIS_WINDOW: usize = 100;

/// Minimum history length before pattern analysis produces a result.
pub const MIN_HISTORY_FOR_ANALYSIS: usize = 10;

/// One measurement outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivationRecord {
    pub timestamp: u64,
    pub active: bool,
    /// Amplitude snapshot taken right after the collapse.
    pub amplitude: Amplitude,
    pub phase: f64,
}

/// Summary of recent activity derived from the history window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityPattern {
    /// Fraction of window records that were active.
    pub activation_rate: f64,
    /// Mean inter-activation interval in ms (0 when fewer than 2 activations).
    pub average_interval: f64,
    /// `1 / (1 + variance/mean²)`; 0 below 3 intervals.
    pub rhythmicity: f64,
    /// Decoherence factor at analysis time.
    pub coherence: f64,
}

/// Append a record, evicting the oldest once the bound is reached.
pub(crate) fn push_bounded(history: &mut VecDeque<ActivationRecord>, record: ActivationRecord) {
    if history.len() == MAX_HISTORY_LEN {
        history.pop_front();
    }
    history.push_back(record);
}

/// Inter-activation intervals over a time-ascending record window.
pub(crate) fn activation_intervals(window: &[&ActivationRecord]) -> Vec<f64> {
    let mut intervals = Vec::new();
    let mut last_activation: Option<u64> = None;
    for record in window {
        if record.active {
            if let Some(previous) = last_activation {
                intervals.push(record.timestamp.saturating_sub(previous) as f64);
            }
            last_activation = Some(record.timestamp);
        }
    }
    intervals
}

/// Rhythmicity score of an interval sequence.
pub(crate) fn rhythmicity(intervals: &[f64]) -> f64 {
    if intervals.len() < 3 {
        return 0.0;
    }
    let mean = intervals.iter().sum::<f64>() / intervals.len() as f64;
    if mean <= 0.0 {
        return 0.0;
    }
    let variance = intervals
        .iter()
        .map(|interval| (interval - mean).powi(2))
        .sum::<f64>()
        / intervals.len() as f64;
    1.0 / (1.0 + variance / (mean * mean))
}
