//! Configuration data model and validation

use crate::{
    executor::validate_world_size,
    transfer::validate_payload,
    types::{AppError, Result, TimingMode, Transport},
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Number of simulated participants per benchmark run
    #[serde(default = "default_world_size")]
    pub world_size: usize,

    /// Per-transfer payload in GB
    #[serde(default = "default_payload_gb")]
    pub payload_gb: f64,

    /// Transports to benchmark; empty means all of them
    #[serde(default)]
    pub transports: Vec<String>,

    /// Measured or modeled elapsed time
    #[serde(default)]
    pub timing_mode: TimingMode,

    /// Enable colored terminal output
    #[serde(default = "default_enable_color")]
    pub enable_color: bool,

    /// Emit a JSON document instead of text lines
    #[serde(default)]
    pub json_output: bool,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,

    /// Enable debug output
    #[serde(default)]
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            world_size: default_world_size(),
            payload_gb: default_payload_gb(),
            transports: Vec::new(),
            timing_mode: TimingMode::default(),
            enable_color: default_enable_color(),
            json_output: false,
            verbose: false,
            debug: false,
        }
    }
}

impl Config {
    /// Validate the configuration and return any errors
    ///
    /// Uses the same checks, in the same order, as the benchmark driver so
    /// that a bad value is rejected before anything is printed.
    pub fn validate(&self) -> Result<()> {
        for name in &self.transports {
            Transport::from_str(name)?;
        }

        validate_world_size(self.world_size)?;

        if self.world_size > crate::defaults::MAX_WORLD_SIZE {
            return Err(AppError::config(format!(
                "World size cannot exceed {}, got {}",
                crate::defaults::MAX_WORLD_SIZE,
                self.world_size
            )));
        }

        validate_payload(self.payload_gb)?;

        Ok(())
    }

    /// Transports to run, deduplicated and in canonical order
    pub fn selected_transports(&self) -> Result<Vec<Transport>> {
        if self.transports.is_empty() {
            return Ok(Transport::ALL.to_vec());
        }

        let mut selected = self
            .transports
            .iter()
            .map(|name| Transport::from_str(name))
            .collect::<Result<Vec<_>>>()?;
        selected.sort();
        selected.dedup();
        Ok(selected)
    }

    /// Merge environment variables into this configuration
    pub fn merge_from_env(&mut self) -> Result<()> {
        if let Ok(world_size) = std::env::var("WORLD_SIZE") {
            self.world_size = world_size.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid WORLD_SIZE value '{}': {}", world_size, e)))?;
        }

        if let Ok(payload) = std::env::var("PAYLOAD_GB") {
            self.payload_gb = payload.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid PAYLOAD_GB value '{}': {}", payload, e)))?;
        }

        if let Ok(transports) = std::env::var("TRANSPORTS") {
            self.transports = transports
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        if let Ok(mode) = std::env::var("TIMING_MODE") {
            self.timing_mode = mode.parse()
                .map_err(|e| AppError::config(format!("Invalid TIMING_MODE value '{}': {}", mode, e)))?;
        }

        if let Ok(enable_color) = std::env::var("ENABLE_COLOR") {
            self.enable_color = enable_color.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid ENABLE_COLOR value '{}': {}", enable_color, e)))?;
        }

        Ok(())
    }
}

// Default value functions for serde
fn default_world_size() -> usize {
    crate::defaults::DEFAULT_WORLD_SIZE
}

fn default_payload_gb() -> f64 {
    crate::defaults::DEFAULT_PAYLOAD_GB
}

fn default_enable_color() -> bool {
    crate::defaults::DEFAULT_ENABLE_COLOR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.world_size, 8);
        assert_eq!(config.payload_gb, 1.0);
        assert!(config.transports.is_empty());
        assert_eq!(config.timing_mode, TimingMode::WallClock);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_error_types() {
        let config = Config { world_size: 0, ..Default::default() };
        assert!(matches!(config.validate().unwrap_err(), AppError::Driver(_)));

        let config = Config { payload_gb: 0.0, ..Default::default() };
        assert!(matches!(config.validate().unwrap_err(), AppError::InvalidPayload(_)));

        let config = Config { payload_gb: -2.5, ..Default::default() };
        assert!(matches!(config.validate().unwrap_err(), AppError::InvalidPayload(_)));

        let config = Config { transports: vec!["usb4".to_string()], ..Default::default() };
        assert!(matches!(config.validate().unwrap_err(), AppError::UnknownTransport(_)));

        let config = Config { world_size: crate::defaults::MAX_WORLD_SIZE + 1, ..Default::default() };
        assert!(matches!(config.validate().unwrap_err(), AppError::Config(_)));
    }

    #[test]
    fn test_selected_transports_canonical_order() {
        let config = Config::default();
        assert_eq!(config.selected_transports().unwrap(), Transport::ALL.to_vec());

        let config = Config {
            transports: vec![
                "gpudirect_rdma".to_string(),
                "pcie_gen5".to_string(),
                "gpudirect_rdma".to_string(),
            ],
            ..Default::default()
        };
        assert_eq!(
            config.selected_transports().unwrap(),
            vec![Transport::PcieGen5, Transport::GpudirectRdma]
        );
    }

    #[test]
    fn test_serde_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.world_size, crate::defaults::DEFAULT_WORLD_SIZE);
        assert_eq!(config.payload_gb, crate::defaults::DEFAULT_PAYLOAD_GB);

        let config: Config = serde_json::from_str(r#"{"timing_mode": "analytic", "world_size": 2}"#).unwrap();
        assert_eq!(config.timing_mode, TimingMode::Analytic);
        assert_eq!(config.world_size, 2);
    }
}
