//! Core formatting traits and implementations
//!
//! This module defines the output formatting interface and provides
//! the plain text implementation the other formatters build on.

use crate::{
    error::Result,
    models::BenchmarkSummary,
    transport::TransportRegistry,
};
use std::sync::Arc;

/// Main trait for output formatting
pub trait OutputFormatter {
    /// Format the report header
    fn format_header(&self, world_size: usize, payload_gb: f64) -> Result<String>;

    /// Format the one-line result for a single transport
    fn format_summary(&self, summary: &BenchmarkSummary) -> Result<String>;

    /// Format the per-run statistics shown in verbose mode
    fn format_details(&self, summary: &BenchmarkSummary) -> Result<String>;

    /// Whether verbose details are included in the report
    fn verbose(&self) -> bool;

    /// Format a complete report, header first, transports in the given order
    fn format_report(&self, world_size: usize, payload_gb: f64, summaries: &[BenchmarkSummary]) -> Result<String> {
        let mut lines = vec![self.format_header(world_size, payload_gb)?];

        for summary in summaries {
            lines.push(self.format_summary(summary)?);
            if self.verbose() {
                lines.push(self.format_details(summary)?);
            }
        }

        Ok(lines.join("\n"))
    }
}

/// Configuration options for formatting
#[derive(Debug, Clone, Default)]
pub struct FormattingOptions {
    /// Enable colored output
    pub enable_color: bool,
    /// Enable verbose mode with per-run statistics
    pub verbose_mode: bool,
}

/// Render a payload the way a float literal prints (`1.0`, `0.5`)
///
/// Very small and very large values use scientific notation with a signed,
/// two-digit exponent (`1e-05`, `1.5e+16`).
pub fn format_payload(payload_gb: f64) -> String {
    let shortest = format!("{:?}", payload_gb);
    let Some((mantissa, exponent)) = shortest.split_once('e') else {
        return shortest;
    };
    match exponent.parse::<i32>() {
        Ok(exponent) => format!(
            "{}e{}{:02}",
            mantissa,
            if exponent < 0 { '-' } else { '+' },
            exponent.unsigned_abs()
        ),
        Err(_) => shortest,
    }
}

/// Report header text
pub fn header_text(world_size: usize, payload_gb: f64) -> String {
    format!("RDMA Sim: {} GPUs, {}GB payload", world_size, format_payload(payload_gb))
}

/// Per-transport result line text
pub fn summary_text(summary: &BenchmarkSummary) -> String {
    format!(
        "{}: {:.0}us latency, {:.1} GB/s TP",
        summary.transport, summary.mean_latency_microseconds, summary.aggregate_throughput_gbps
    )
}

/// Plain text formatter implementation
pub struct PlainFormatter {
    options: FormattingOptions,
    registry: Arc<TransportRegistry>,
}

impl PlainFormatter {
    /// Create a new plain formatter with options
    pub fn new(options: FormattingOptions, registry: Arc<TransportRegistry>) -> Self {
        Self { options, registry }
    }

    /// Format a duration in seconds with a unit that keeps it readable
    pub(crate) fn format_duration(seconds: f64) -> String {
        if seconds < 1e-3 {
            format!("{:.3}us", seconds * 1e6)
        } else if seconds < 1.0 {
            format!("{:.3}ms", seconds * 1e3)
        } else {
            format!("{:.3}s", seconds)
        }
    }

    /// Detail lines shared by the plain and colored formatters
    pub(crate) fn detail_lines(&self, summary: &BenchmarkSummary) -> Result<Vec<String>> {
        let peak = self.registry.profile(summary.transport)?.peak_bandwidth_gbps();
        let latency = &summary.latency;

        Ok(vec![
            format!(
                "  latency min/max/std-dev: {:.1}/{:.1}/{:.1}us over {} workers",
                latency.min_us, latency.max_us, latency.std_dev_us, latency.sample_count
            ),
            format!(
                "  elapsed: {} ({})",
                Self::format_duration(summary.elapsed_seconds),
                summary.timing_mode
            ),
            format!(
                "  traffic: {:.1} GB, {:.1}x single-link peak of {:.0} GB/s",
                summary.total_traffic_gb(),
                summary.speedup_over(peak),
                peak
            ),
        ])
    }
}

impl OutputFormatter for PlainFormatter {
    fn format_header(&self, world_size: usize, payload_gb: f64) -> Result<String> {
        Ok(header_text(world_size, payload_gb))
    }

    fn format_summary(&self, summary: &BenchmarkSummary) -> Result<String> {
        Ok(summary_text(summary))
    }

    fn format_details(&self, summary: &BenchmarkSummary) -> Result<String> {
        Ok(self.detail_lines(summary)?.join("\n"))
    }

    fn verbose(&self) -> bool {
        self.options.verbose_mode
    }
}
