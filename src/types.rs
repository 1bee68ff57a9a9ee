//! Type definitions and aliases

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Re-export commonly used types
pub use crate::error::{AppError, Result};
pub use crate::transport::{Transport, TransportProfile};

/// How a benchmark run accounts for elapsed time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingMode {
    /// Workers really wait out their transfer time; elapsed time is measured
    #[default]
    WallClock,
    /// Nothing sleeps; elapsed time is the modeled duration of the fan-out
    Analytic,
}

impl TimingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimingMode::WallClock => "wall_clock",
            TimingMode::Analytic => "analytic",
        }
    }
}

impl fmt::Display for TimingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimingMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "wall_clock" | "wallclock" => Ok(TimingMode::WallClock),
            "analytic" => Ok(TimingMode::Analytic),
            other => Err(AppError::parse(format!(
                "Invalid timing mode '{}': expected wall_clock or analytic",
                other
            ))),
        }
    }
}
