//! Per-transfer time model
//!
//! A transfer costs the transport's fixed latency plus the payload divided by
//! peak bandwidth. There is no queueing or contention term.

use crate::{
    error::{AppError, Result},
    transport::TransportProfile,
};
use std::time::Duration;

/// Reject payloads that are not strictly positive and finite
pub fn validate_payload(payload_gb: f64) -> Result<()> {
    if !payload_gb.is_finite() {
        return Err(AppError::invalid_payload(format!(
            "payload must be a finite number of GB, got {}",
            payload_gb
        )));
    }
    if payload_gb <= 0.0 {
        return Err(AppError::invalid_payload(format!(
            "payload must be greater than 0 GB, got {}",
            payload_gb
        )));
    }
    Ok(())
}

/// Modeled transfer time in seconds, without any real delay
pub fn modeled_transfer_time(profile: &TransportProfile, payload_gb: f64) -> Result<f64> {
    validate_payload(payload_gb)?;
    Ok(profile.fixed_latency_seconds() + payload_gb / profile.peak_bandwidth_gbps())
}

/// Modeled transfer time, blocking the calling task for that long first
///
/// The delay lets a caller's wall-clock measurement reflect the modeled cost
/// even though nothing is transferred. A valid payload whose modeled time does
/// not fit in a [`Duration`] is a driver error; analytic timing has no such limit.
pub async fn compute_transfer_time(profile: &TransportProfile, payload_gb: f64) -> Result<f64> {
    let seconds = modeled_transfer_time(profile, payload_gb)?;
    let delay = Duration::try_from_secs_f64(seconds).map_err(|e| {
        AppError::driver(format!(
            "modeled transfer of {}s for {} GB exceeds the wall-clock timer range ({}); use --analytic",
            seconds, payload_gb, e
        ))
    })?;
    tokio::time::sleep(delay).await;
    Ok(seconds)
}
