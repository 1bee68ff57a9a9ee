//! Output formatting and display system
//!
//! This module turns benchmark summaries into the report printed on stdout,
//! as plain text, colored text or JSON.

mod formatter;
mod colored;
mod json;

pub use formatter::{
    OutputFormatter,
    PlainFormatter,
    FormattingOptions,
    format_payload,
};
pub use colored::{
    ColoredFormatter,
    ColorScheme,
    PerformanceLevel,
};
pub use json::JsonFormatter;

use crate::{
    models::Config,
    transport::TransportRegistry,
};
use std::sync::Arc;

/// Output formatting factory for creating appropriate formatters
pub struct OutputFormatterFactory;

impl OutputFormatterFactory {
    /// Create a formatter based on color support and preferences
    pub fn create_formatter(
        enable_color: bool,
        verbose: bool,
        registry: Arc<TransportRegistry>,
    ) -> Box<dyn OutputFormatter> {
        let options = FormattingOptions {
            enable_color,
            verbose_mode: verbose,
        };

        if enable_color {
            Box::new(ColoredFormatter::new(options, registry))
        } else {
            Box::new(PlainFormatter::new(options, registry))
        }
    }

    /// Create the formatter a configuration asks for
    pub fn for_config(config: &Config, registry: Arc<TransportRegistry>) -> Box<dyn OutputFormatter> {
        if config.json_output {
            Box::new(JsonFormatter::new(config.verbose))
        } else {
            Self::create_formatter(config.enable_color, config.verbose, registry)
        }
    }
}
