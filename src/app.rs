//! Main application orchestration and execution

use crate::{
    config::{validate_config, ValidationLevel},
    error::Result,
    executor::{create_executor_for_mode, BenchmarkExecutor},
    logging::LoggerFactory,
    models::{BenchmarkSummary, Config},
    output::OutputFormatterFactory,
    transport::TransportRegistry,
    log_debug, log_info, log_warn,
};
use std::sync::Arc;

/// Main application struct that coordinates all components
pub struct App {
    config: Config,
    registry: Arc<TransportRegistry>,
    executor: Box<dyn BenchmarkExecutor + Send + Sync>,
    loggers: LoggerFactory,
}

impl App {
    /// Create an application using the standard transport table
    pub fn new(config: Config) -> Self {
        Self::with_registry(config, Arc::new(TransportRegistry::standard()))
    }

    /// Create an application around an existing registry
    pub fn with_registry(config: Config, registry: Arc<TransportRegistry>) -> Self {
        let executor = create_executor_for_mode(Arc::clone(&registry), config.timing_mode);
        let loggers = LoggerFactory::new(config.clone());
        Self {
            config,
            registry,
            executor,
            loggers,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run every selected transport once, in canonical order
    ///
    /// The first failing run aborts the whole benchmark; nothing is returned
    /// for transports that already completed.
    pub async fn run(&self) -> Result<Vec<BenchmarkSummary>> {
        let logger = self.loggers.create_logger("APP").await;
        let bench_logger = self.loggers.create_benchmark_logger().await;

        for warning in validate_config(&self.config, &self.registry)? {
            match warning.level {
                ValidationLevel::Warning => log_warn!(logger, "{}", warning.message),
                ValidationLevel::Info => log_info!(logger, "{}", warning.message),
            }
        }

        let transports = self.config.selected_transports()?;
        log_debug!(
            logger,
            "Running {} transport(s) with {} workers in {} mode",
            transports.len(),
            self.config.world_size,
            self.executor.timing_mode()
        );

        let mut summaries = Vec::with_capacity(transports.len());
        for transport in transports {
            let name = transport.as_str();
            bench_logger
                .log_run_started(name, self.config.world_size, self.config.payload_gb)
                .await;

            match self
                .executor
                .run_benchmark(name, self.config.world_size, self.config.payload_gb)
                .await
            {
                Ok(summary) => {
                    bench_logger.log_workers(name, &summary.workers).await;
                    bench_logger.log_run_completed(&summary).await;
                    summaries.push(summary);
                }
                Err(e) => {
                    bench_logger.log_run_failed(name, &e).await;
                    return Err(e);
                }
            }
        }

        Ok(summaries)
    }

    /// Render a finished benchmark the way the configuration asks for
    pub fn render(&self, summaries: &[BenchmarkSummary]) -> Result<String> {
        let formatter = OutputFormatterFactory::for_config(&self.config, Arc::clone(&self.registry));
        formatter.format_report(self.config.world_size, self.config.payload_gb, summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::types::{TimingMode, Transport};

    fn analytic_config() -> Config {
        Config {
            world_size: 4,
            payload_gb: 0.5,
            timing_mode: TimingMode::Analytic,
            enable_color: false,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_runs_all_transports_in_canonical_order() {
        let app = App::new(analytic_config());
        let summaries = app.run().await.unwrap();

        let order: Vec<Transport> = summaries.iter().map(|s| s.transport).collect();
        assert_eq!(order, Transport::ALL.to_vec());
        assert!(summaries.iter().all(|s| s.world_size == 4));
    }

    #[tokio::test]
    async fn test_transport_filter_keeps_canonical_order() {
        let config = Config {
            transports: vec!["gpudirect_rdma".to_string(), "pcie_gen5".to_string()],
            ..analytic_config()
        };
        let summaries = App::new(config).run().await.unwrap();

        let order: Vec<Transport> = summaries.iter().map(|s| s.transport).collect();
        assert_eq!(order, vec![Transport::PcieGen5, Transport::GpudirectRdma]);
    }

    #[tokio::test]
    async fn test_unknown_transport_fails_whole_run() {
        let config = Config {
            transports: vec!["nvlink4".to_string(), "usb4".to_string()],
            ..analytic_config()
        };
        let err = App::new(config).run().await.unwrap_err();
        assert!(matches!(err, AppError::UnknownTransport(_)));
    }

    #[tokio::test]
    async fn test_render_text_report() {
        let app = App::new(analytic_config());
        let summaries = app.run().await.unwrap();
        let report = app.render(&summaries).unwrap();
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "RDMA Sim: 4 GPUs, 0.5GB payload");
        assert_eq!(lines.len(), 5);
        // 0.6us + 0.5GB / 64GB/s
        assert_eq!(lines[1], "pcie_gen5: 7813us latency, 512.0 GB/s TP");
    }
}
