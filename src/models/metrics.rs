//! Transfer results and benchmark summary data models

use crate::{
    error::Result,
    stats,
    types::{TimingMode, Transport},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of one simulated transfer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransferResult {
    /// Index of the simulated worker, starting at 0
    pub rank: usize,

    /// Modeled transfer time in seconds
    pub elapsed_seconds: f64,
}

impl TransferResult {
    pub fn new(rank: usize, elapsed_seconds: f64) -> Self {
        Self { rank, elapsed_seconds }
    }

    pub fn elapsed_us(&self) -> f64 {
        stats::to_microseconds(self.elapsed_seconds)
    }
}

/// Distribution of per-worker latencies within one run (microseconds)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatencyStatistics {
    pub mean_us: f64,
    pub min_us: f64,
    pub max_us: f64,
    pub std_dev_us: f64,
    /// Number of worker results included
    pub sample_count: usize,
}

impl LatencyStatistics {
    /// Calculate statistics from the results of every worker in a run
    pub fn from_results(results: &[TransferResult]) -> Result<Self> {
        let samples: Vec<f64> = results.iter().map(TransferResult::elapsed_us).collect();

        let mean_us = stats::mean(&samples)?;
        let std_dev_us = stats::std_dev(&samples)?;
        let min_us = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let max_us = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Ok(Self {
            mean_us,
            min_us,
            max_us,
            std_dev_us,
            sample_count: samples.len(),
        })
    }
}

/// Aggregate outcome of one benchmark run for one transport
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkSummary {
    pub transport: Transport,
    pub world_size: usize,
    pub payload_gb: f64,
    pub timing_mode: TimingMode,

    /// Mean per-worker transfer time in microseconds
    pub mean_latency_microseconds: f64,

    /// Bidirectional throughput over the whole fan-out, GB/s
    pub aggregate_throughput_gbps: f64,

    /// Duration the throughput was derived from, in seconds
    pub elapsed_seconds: f64,

    pub latency: LatencyStatistics,

    /// Per-worker results ordered by rank
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub workers: Vec<TransferResult>,

    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl BenchmarkSummary {
    /// Total data moved in both directions, GB
    pub fn total_traffic_gb(&self) -> f64 {
        self.world_size as f64 * self.payload_gb * stats::BIDIRECTIONAL_FACTOR
    }

    /// Throughput relative to a single link's peak bandwidth
    pub fn speedup_over(&self, peak_bandwidth_gbps: f64) -> f64 {
        self.aggregate_throughput_gbps / peak_bandwidth_gbps
    }
}
