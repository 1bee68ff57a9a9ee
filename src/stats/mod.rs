//! Aggregation arithmetic for benchmark runs
//!
//! Per-worker times are combined commutatively (mean, sum), so the order in
//! which workers finish never affects the reported numbers.

use crate::error::{AppError, Result};

/// Every simulated transfer counts as a send plus a receive
pub const BIDIRECTIONAL_FACTOR: f64 = 2.0;

pub const MICROS_PER_SECOND: f64 = 1e6;

/// Arithmetic mean of a non-empty sample
pub fn mean(samples: &[f64]) -> Result<f64> {
    if samples.is_empty() {
        return Err(AppError::statistics("Cannot average an empty sample"));
    }
    Ok(samples.iter().sum::<f64>() / samples.len() as f64)
}

/// Population standard deviation of a non-empty sample
pub fn std_dev(samples: &[f64]) -> Result<f64> {
    let avg = mean(samples)?;
    let variance = samples
        .iter()
        .map(|sample| (sample - avg).powi(2))
        .sum::<f64>()
        / samples.len() as f64;
    Ok(variance.sqrt())
}

/// Aggregate bidirectional throughput in GB/s
///
/// `(world_size * payload_gb * 2) / elapsed_seconds`
pub fn aggregate_throughput_gbps(world_size: usize, payload_gb: f64, elapsed_seconds: f64) -> Result<f64> {
    if !(elapsed_seconds.is_finite() && elapsed_seconds > 0.0) {
        return Err(AppError::statistics(format!(
            "Elapsed time must be positive to compute throughput, got {}s",
            elapsed_seconds
        )));
    }
    Ok(world_size as f64 * payload_gb * BIDIRECTIONAL_FACTOR / elapsed_seconds)
}

/// Convert seconds to microseconds
pub fn to_microseconds(seconds: f64) -> f64 {
    seconds * MICROS_PER_SECOND
}
