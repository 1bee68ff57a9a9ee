//! Colored formatter implementation with terminal color support
//!
//! Same text as [`PlainFormatter`], with ANSI colors keyed to how fast each
//! transport completed its transfer.

use crate::{
    error::Result,
    models::BenchmarkSummary,
    transport::TransportRegistry,
};
use super::formatter::{header_text, FormattingOptions, OutputFormatter, PlainFormatter};
use colored::*;
use std::sync::Arc;

/// Latency classification for color coding
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PerformanceLevel {
    Excellent,  // < 10us
    Good,       // 10us-1ms
    Fair,       // 1-10ms
    Slow,       // > 10ms
}

impl PerformanceLevel {
    /// Determine performance level from a mean latency in microseconds
    pub fn from_latency_us(latency_us: f64) -> Self {
        if latency_us < 10.0 {
            Self::Excellent
        } else if latency_us < 1_000.0 {
            Self::Good
        } else if latency_us < 10_000.0 {
            Self::Fair
        } else {
            Self::Slow
        }
    }

    /// Get color for this performance level
    pub fn color(&self) -> Color {
        match self {
            Self::Excellent => Color::Green,
            Self::Good => Color::Cyan,
            Self::Fair => Color::Yellow,
            Self::Slow => Color::Red,
        }
    }
}

/// Color scheme configuration
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub header: Color,
    pub transport: Color,
    pub throughput: Color,
    pub muted: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            header: Color::Blue,
            transport: Color::White,
            throughput: Color::Magenta,
            muted: Color::BrightBlack,
        }
    }
}

/// Colored formatter implementation
pub struct ColoredFormatter {
    plain_formatter: PlainFormatter,
    options: FormattingOptions,
    color_scheme: ColorScheme,
}

impl ColoredFormatter {
    /// Create a new colored formatter with options
    pub fn new(options: FormattingOptions, registry: Arc<TransportRegistry>) -> Self {
        let plain_formatter = PlainFormatter::new(options.clone(), registry);
        Self {
            plain_formatter,
            options,
            color_scheme: ColorScheme::default(),
        }
    }

    /// Apply color to text if colors are enabled
    fn colorize(&self, text: &str, color: Color) -> ColoredString {
        if self.options.enable_color {
            text.color(color)
        } else {
            text.normal()
        }
    }

    /// Colored and bold, or plain when colors are disabled
    fn emphasize(&self, text: &str, color: Color) -> ColoredString {
        if self.options.enable_color {
            text.color(color).bold()
        } else {
            text.normal()
        }
    }
}

impl OutputFormatter for ColoredFormatter {
    fn format_header(&self, world_size: usize, payload_gb: f64) -> Result<String> {
        let header = header_text(world_size, payload_gb);
        Ok(self.emphasize(&header, self.color_scheme.header).to_string())
    }

    fn format_summary(&self, summary: &BenchmarkSummary) -> Result<String> {
        let level = PerformanceLevel::from_latency_us(summary.mean_latency_microseconds);
        let latency = format!("{:.0}us", summary.mean_latency_microseconds);
        let throughput = format!("{:.1} GB/s", summary.aggregate_throughput_gbps);

        Ok(format!(
            "{}: {} latency, {} TP",
            self.emphasize(summary.transport.as_str(), self.color_scheme.transport),
            self.colorize(&latency, level.color()),
            self.colorize(&throughput, self.color_scheme.throughput),
        ))
    }

    fn format_details(&self, summary: &BenchmarkSummary) -> Result<String> {
        let lines: Vec<String> = self
            .plain_formatter
            .detail_lines(summary)?
            .iter()
            .map(|line| self.colorize(line, self.color_scheme.muted).to_string())
            .collect();
        Ok(lines.join("\n"))
    }

    fn verbose(&self) -> bool {
        self.options.verbose_mode
    }
}
