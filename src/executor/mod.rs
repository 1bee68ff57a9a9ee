//! Benchmark driver
//!
//! This module contains the benchmark execution components including:
//! - A per-run worker pool that fans transfers out concurrently
//! - A wall-clock executor where workers really wait out their transfer time
//! - An analytic executor that derives elapsed time from the model alone

pub mod pool;

pub use pool::WorkerPool;

use crate::{
    error::{AppError, Result},
    models::{BenchmarkSummary, LatencyStatistics, TransferResult},
    stats,
    transfer::{compute_transfer_time, modeled_transfer_time, validate_payload},
    transport::{TransportProfile, TransportRegistry},
    types::TimingMode,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Instant;

/// Reject world sizes below one participant
pub fn validate_world_size(world_size: usize) -> Result<()> {
    if world_size < 1 {
        return Err(AppError::driver(format!(
            "world size must be at least 1, got {}",
            world_size
        )));
    }
    Ok(())
}

/// High-level benchmark executor interface
#[async_trait]
pub trait BenchmarkExecutor {
    /// Run `world_size` identical transfers of `payload_gb` over one transport
    async fn run_benchmark(
        &self,
        transport_name: &str,
        world_size: usize,
        payload_gb: f64,
    ) -> Result<BenchmarkSummary>;

    /// How this executor accounts for elapsed time
    fn timing_mode(&self) -> TimingMode;
}

/// Checks shared by every executor, done before any worker starts
fn prepare_run(
    registry: &TransportRegistry,
    transport_name: &str,
    world_size: usize,
    payload_gb: f64,
) -> Result<TransportProfile> {
    let profile = registry.lookup(transport_name)?;
    validate_world_size(world_size)?;
    validate_payload(payload_gb)?;
    Ok(profile)
}

/// Fold collected worker results into a summary
fn summarize(
    profile: &TransportProfile,
    payload_gb: f64,
    timing_mode: TimingMode,
    workers: Vec<TransferResult>,
    elapsed_seconds: f64,
    started_at: DateTime<Utc>,
) -> Result<BenchmarkSummary> {
    let world_size = workers.len();
    let latency = LatencyStatistics::from_results(&workers)?;
    let aggregate_throughput_gbps =
        stats::aggregate_throughput_gbps(world_size, payload_gb, elapsed_seconds)?;

    Ok(BenchmarkSummary {
        transport: profile.transport(),
        world_size,
        payload_gb,
        timing_mode,
        mean_latency_microseconds: latency.mean_us,
        aggregate_throughput_gbps,
        elapsed_seconds,
        latency,
        workers,
        started_at,
        completed_at: Utc::now(),
    })
}

/// Executor whose workers block for their modeled transfer time
///
/// Throughput is computed from the measured wall-clock span of the fan-out,
/// which includes real scheduling overhead.
pub struct WallClockExecutor {
    registry: Arc<TransportRegistry>,
}

impl WallClockExecutor {
    pub fn new(registry: Arc<TransportRegistry>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl BenchmarkExecutor for WallClockExecutor {
    async fn run_benchmark(
        &self,
        transport_name: &str,
        world_size: usize,
        payload_gb: f64,
    ) -> Result<BenchmarkSummary> {
        let profile = prepare_run(&self.registry, transport_name, world_size, payload_gb)?;

        let started_at = Utc::now();
        let start = Instant::now();

        let mut pool = WorkerPool::new(world_size)?;
        for rank in 0..world_size {
            pool.spawn(async move {
                let elapsed_seconds = compute_transfer_time(&profile, payload_gb).await?;
                Ok(TransferResult::new(rank, elapsed_seconds))
            });
        }
        let workers = pool.join().await?;

        let elapsed_seconds = start.elapsed().as_secs_f64();

        summarize(&profile, payload_gb, TimingMode::WallClock, workers, elapsed_seconds, started_at)
    }

    fn timing_mode(&self) -> TimingMode {
        TimingMode::WallClock
    }
}

/// Executor that never sleeps
///
/// Workers still run concurrently on the pool, but elapsed time is the modeled
/// span of the fan-out: the longest per-worker transfer time, since all workers
/// start together.
pub struct AnalyticExecutor {
    registry: Arc<TransportRegistry>,
}

impl AnalyticExecutor {
    pub fn new(registry: Arc<TransportRegistry>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl BenchmarkExecutor for AnalyticExecutor {
    async fn run_benchmark(
        &self,
        transport_name: &str,
        world_size: usize,
        payload_gb: f64,
    ) -> Result<BenchmarkSummary> {
        let profile = prepare_run(&self.registry, transport_name, world_size, payload_gb)?;

        let started_at = Utc::now();

        let mut pool = WorkerPool::new(world_size)?;
        for rank in 0..world_size {
            pool.spawn(async move {
                let elapsed_seconds = modeled_transfer_time(&profile, payload_gb)?;
                Ok(TransferResult::new(rank, elapsed_seconds))
            });
        }
        let workers = pool.join().await?;

        let elapsed_seconds = workers
            .iter()
            .map(|worker| worker.elapsed_seconds)
            .fold(0.0, f64::max);

        summarize(&profile, payload_gb, TimingMode::Analytic, workers, elapsed_seconds, started_at)
    }

    fn timing_mode(&self) -> TimingMode {
        TimingMode::Analytic
    }
}

/// Create the appropriate executor for a timing mode
pub fn create_executor_for_mode(
    registry: Arc<TransportRegistry>,
    mode: TimingMode,
) -> Box<dyn BenchmarkExecutor + Send + Sync> {
    match mode {
        TimingMode::WallClock => Box::new(WallClockExecutor::new(registry)),
        TimingMode::Analytic => Box::new(AnalyticExecutor::new(registry)),
    }
}

/// Run one wall-clock benchmark against the standard transport table
pub async fn run_benchmark(
    transport_name: &str,
    world_size: usize,
    payload_gb: f64,
) -> Result<BenchmarkSummary> {
    WallClockExecutor::new(Arc::new(TransportRegistry::standard()))
        .run_benchmark(transport_name, world_size, payload_gb)
        .await
}
