//! Data models and structures for the transfer latency simulator

pub mod config;
pub mod metrics;

// Re-export main model types
pub use config::Config;
pub use metrics::{BenchmarkSummary, LatencyStatistics, TransferResult};
