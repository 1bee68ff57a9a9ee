//! Command-line interface

use clap::{ArgAction, Parser};

/// RDMA latency simulator - analytic GPU-to-GPU transfer benchmarks
#[derive(Parser, Debug, Clone)]
#[command(name = "rdma-sim")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Number of simulated GPUs per benchmark run [default: 8]
    #[arg(short = 'w', long, value_name = "N")]
    pub world_size: Option<usize>,

    /// Payload per transfer in GB [default: 1.0]
    #[arg(short, long, value_name = "GB", allow_negative_numbers = true)]
    pub payload: Option<f64>,

    /// Transport to benchmark (can be used multiple times; default: all)
    #[arg(short, long = "transport", value_name = "NAME", action = ArgAction::Append)]
    pub transports: Vec<String>,

    /// Derive elapsed time from the model instead of sleeping
    #[arg(long)]
    pub analytic: bool,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    /// Force colored output
    #[arg(long, conflicts_with = "no_color")]
    pub color: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Check if colors should be enabled
    pub fn use_colors(&self) -> bool {
        if self.color {
            true  // Force color output when --color is specified
        } else if self.no_color {
            false // Disable color output when --no-color is specified
        } else {
            supports_color() // Use automatic detection
        }
    }

    /// Get configuration summary for display
    pub fn get_config_summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("Command line:\n");
        if let Some(world_size) = self.world_size {
            summary.push_str(&format!("  World size: {}\n", world_size));
        }
        if let Some(payload) = self.payload {
            summary.push_str(&format!("  Payload: {} GB\n", payload));
        }
        if !self.transports.is_empty() {
            summary.push_str(&format!("  Transports: {}\n", self.transports.join(", ")));
        }
        summary.push_str(&format!("  Analytic timing: {}\n", self.analytic));
        summary.push_str(&format!("  JSON output: {}\n", self.json));
        summary.push_str(&format!("  Colored output: {}\n", self.use_colors()));
        summary.push_str(&format!("  Verbose mode: {}\n", self.verbose));
        summary.push_str(&format!("  Debug mode: {}\n", self.debug));

        summary
    }
}

/// Check if the terminal supports color output
fn supports_color() -> bool {
    if let Ok(term) = std::env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    use std::io::IsTerminal;
    std::io::stdout().is_terminal()
}
