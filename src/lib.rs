//! RDMA Latency Simulator
//!
//! Models GPU-to-GPU data transfers over PCIe, NVLink, InfiniBand and
//! GPUDirect RDMA with a fixed-latency plus bandwidth cost model, fans a
//! transfer out to every simulated GPU concurrently and reports mean latency
//! and aggregate bidirectional throughput per transport.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod stats;
pub mod executor;
pub mod output;
pub mod models;
pub mod transfer;
pub mod transport;
pub mod types;

// Re-export commonly used types
pub use error::{AppError, Result};
pub use models::{Config, BenchmarkSummary, LatencyStatistics, TransferResult};
pub use transport::{Transport, TransportProfile, TransportRegistry};
pub use executor::{run_benchmark, BenchmarkExecutor, AnalyticExecutor, WallClockExecutor};
pub use transfer::{compute_transfer_time, modeled_transfer_time};
pub use output::{OutputFormatter, ColoredFormatter, PlainFormatter, JsonFormatter, OutputFormatterFactory};

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");

/// Default configuration values
pub mod defaults {
    pub const DEFAULT_WORLD_SIZE: usize = 8;
    pub const DEFAULT_PAYLOAD_GB: f64 = 1.0;
    pub const DEFAULT_ENABLE_COLOR: bool = true;
    /// Upper bound on simulated participants per run
    pub const MAX_WORLD_SIZE: usize = 4096;
}
