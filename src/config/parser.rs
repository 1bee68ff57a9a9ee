//! Configuration parsing from CLI arguments and environment variables

use crate::{
    cli::Cli,
    config::env::EnvManager,
    error::Result,
    models::Config,
    types::TimingMode,
};

/// Configuration parser that combines CLI arguments with environment variables
pub struct ConfigParser {
    cli: Cli,
}

impl ConfigParser {
    /// Create a new configuration parser with CLI arguments
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Parse and build the complete configuration
    ///
    /// Precedence, lowest first: defaults, `.env`, environment, command line.
    pub fn parse(&self) -> Result<Config> {
        let mut config = Config::default();

        self.load_env_file()?;

        config.merge_from_env()?;

        self.apply_cli_overrides(&mut config);

        config.validate()?;

        Ok(config)
    }

    /// Load .env file if it exists
    fn load_env_file(&self) -> Result<()> {
        EnvManager::load_env_file(self.cli.debug)
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(&self, config: &mut Config) {
        if let Some(world_size) = self.cli.world_size {
            config.world_size = world_size;
        }

        if let Some(payload) = self.cli.payload {
            config.payload_gb = payload;
        }

        if !self.cli.transports.is_empty() {
            config.transports = self.cli.transports.clone();
        }

        if self.cli.analytic {
            config.timing_mode = TimingMode::Analytic;
        }

        if self.cli.color {
            config.enable_color = true;
        } else if self.cli.no_color {
            config.enable_color = false;
        } else if config.enable_color {
            config.enable_color = self.cli.use_colors();
        }

        // CLI-only flags
        config.json_output = self.cli.json;
        config.verbose = self.cli.verbose;
        config.debug = self.cli.debug;
    }
}

/// Convenience function to load complete configuration from CLI arguments
pub fn load_config(cli: Cli) -> Result<Config> {
    ConfigParser::new(cli).parse()
}

/// Display configuration summary for debug purposes
pub fn display_config_summary(config: &Config) -> String {
    let transports = if config.transports.is_empty() {
        "all".to_string()
    } else {
        config.transports.join(", ")
    };

    let summary = [
        format!("World Size: {}", config.world_size),
        format!("Payload: {} GB", config.payload_gb),
        format!("Transports: {}", transports),
        format!("Timing Mode: {}", config.timing_mode),
        format!("Color Output: {}", config.enable_color),
        format!("JSON Output: {}", config.json_output),
        format!("Verbose: {}", config.verbose),
        format!("Debug: {}", config.debug),
    ];

    summary.join("\n")
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::AppError;
    use clap::Parser;
    use std::env;
    use std::sync::{Mutex, MutexGuard};

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const ENV_KEYS: [&str; 5] = ["WORLD_SIZE", "PAYLOAD_GB", "TRANSPORTS", "TIMING_MODE", "ENABLE_COLOR"];

    /// Serialize tests that touch the process environment and start clean
    pub(crate) fn clean_env() -> MutexGuard<'static, ()> {
        let guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        for key in ENV_KEYS {
            env::remove_var(key);
        }
        guard
    }

    #[test]
    fn test_config_parser_defaults() {
        let _guard = clean_env();
        let cli = Cli::parse_from(["rdma-sim", "--no-color"]);
        let config = ConfigParser::new(cli).parse().unwrap();

        assert_eq!(config.world_size, crate::defaults::DEFAULT_WORLD_SIZE);
        assert_eq!(config.payload_gb, crate::defaults::DEFAULT_PAYLOAD_GB);
        assert_eq!(config.timing_mode, TimingMode::WallClock);
        assert!(!config.enable_color);
    }

    #[test]
    fn test_cli_overrides() {
        let _guard = clean_env();
        let cli = Cli::parse_from([
            "rdma-sim", "--world-size", "2", "--payload", "0.25", "--analytic", "--json", "--verbose",
        ]);
        let config = ConfigParser::new(cli).parse().unwrap();

        assert_eq!(config.world_size, 2);
        assert_eq!(config.payload_gb, 0.25);
        assert_eq!(config.timing_mode, TimingMode::Analytic);
        assert!(config.json_output);
        assert!(config.verbose);
    }

    #[test]
    fn test_environment_then_cli_precedence() {
        let _guard = clean_env();
        env::set_var("WORLD_SIZE", "4");
        env::set_var("PAYLOAD_GB", "2.5");
        env::set_var("TIMING_MODE", "analytic");

        let cli = Cli::parse_from(["rdma-sim", "--world-size", "8"]);
        let config = ConfigParser::new(cli).parse().unwrap();

        // Explicit CLI value wins even when it equals the default
        assert_eq!(config.world_size, 8);
        assert_eq!(config.payload_gb, 2.5);
        assert_eq!(config.timing_mode, TimingMode::Analytic);

        for key in ENV_KEYS {
            env::remove_var(key);
        }
    }

    #[test]
    fn test_transports_from_environment() {
        let _guard = clean_env();
        env::set_var("TRANSPORTS", "nvlink4, ib_nic");

        let cli = Cli::parse_from(["rdma-sim"]);
        let config = ConfigParser::new(cli).parse().unwrap();
        assert_eq!(config.transports, vec!["nvlink4", "ib_nic"]);

        env::remove_var("TRANSPORTS");
    }

    #[test]
    fn test_invalid_environment_value() {
        let _guard = clean_env();
        env::set_var("WORLD_SIZE", "lots");

        let cli = Cli::parse_from(["rdma-sim"]);
        let err = ConfigParser::new(cli).parse().unwrap_err();
        assert!(matches!(err, AppError::Config(_)));

        env::remove_var("WORLD_SIZE");
    }

    #[test]
    fn test_invalid_values_keep_their_error_kind() {
        let _guard = clean_env();

        let err = load_config(Cli::parse_from(["rdma-sim", "--world-size", "0"])).unwrap_err();
        assert!(matches!(err, AppError::Driver(_)));

        let err = load_config(Cli::parse_from(["rdma-sim", "--payload", "0"])).unwrap_err();
        assert!(matches!(err, AppError::InvalidPayload(_)));

        let err = load_config(Cli::parse_from(["rdma-sim", "--transport", "usb4"])).unwrap_err();
        assert!(matches!(err, AppError::UnknownTransport(_)));
    }

    #[test]
    fn test_display_config_summary() {
        let config = Config { world_size: 4, ..Default::default() };
        let summary = display_config_summary(&config);
        assert!(summary.contains("World Size: 4"));
        assert!(summary.contains("Transports: all"));
        assert!(summary.contains("Timing Mode: wall_clock"));
    }
}
