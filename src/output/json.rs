//! JSON formatter for machine-readable reports

use crate::{
    error::Result,
    models::BenchmarkSummary,
    types::TimingMode,
};
use super::formatter::{header_text, summary_text, OutputFormatter};
use serde::Serialize;

/// Top-level JSON document
#[derive(Debug, Serialize)]
struct JsonReport {
    version: &'static str,
    world_size: usize,
    payload_gb: f64,
    timing_mode: Option<TimingMode>,
    results: Vec<BenchmarkSummary>,
}

/// Formatter that renders the whole report as one JSON document
///
/// Per-worker results are only included in verbose mode.
pub struct JsonFormatter {
    verbose_mode: bool,
}

impl JsonFormatter {
    pub fn new(verbose_mode: bool) -> Self {
        Self { verbose_mode }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_header(&self, world_size: usize, payload_gb: f64) -> Result<String> {
        Ok(header_text(world_size, payload_gb))
    }

    fn format_summary(&self, summary: &BenchmarkSummary) -> Result<String> {
        Ok(summary_text(summary))
    }

    fn format_details(&self, summary: &BenchmarkSummary) -> Result<String> {
        Ok(serde_json::to_string_pretty(&summary.latency)?)
    }

    fn verbose(&self) -> bool {
        self.verbose_mode
    }

    fn format_report(&self, world_size: usize, payload_gb: f64, summaries: &[BenchmarkSummary]) -> Result<String> {
        let results = summaries
            .iter()
            .cloned()
            .map(|mut summary| {
                if !self.verbose_mode {
                    summary.workers.clear();
                }
                summary
            })
            .collect();

        let report = JsonReport {
            version: crate::VERSION,
            world_size,
            payload_gb,
            timing_mode: summaries.first().map(|summary| summary.timing_mode),
            results,
        };

        Ok(serde_json::to_string_pretty(&report)?)
    }
}
