//! Environment variable handling and .env file management

use crate::{
    error::{AppError, Result},
    transport::Transport,
    types::TimingMode,
};
use std::path::Path;

/// Environment variable configuration manager
pub struct EnvManager;

impl EnvManager {
    /// Load .env file if it exists
    pub fn load_env_file(debug: bool) -> Result<()> {
        Self::load_env_file_from(Path::new(".env"), debug)
    }

    /// Load a specific env file if it exists
    pub fn load_env_file_from(path: &Path, debug: bool) -> Result<()> {
        if path.exists() {
            dotenv::from_path(path)
                .map_err(|e| AppError::config(format!("Failed to load {}: {}", path.display(), e)))?;

            if debug {
                eprintln!("Loaded configuration from {}", path.display());
            }
        } else if debug {
            eprintln!("No {} file found, using defaults and CLI arguments", path.display());
        }

        Ok(())
    }

    /// Validate environment variable format before parsing
    pub fn validate_env_var(key: &str, value: &str) -> Result<()> {
        match key {
            "WORLD_SIZE" => {
                let world_size: usize = value.trim().parse()
                    .map_err(|e| AppError::config(format!("Invalid WORLD_SIZE value '{}': {}", value, e)))?;
                if world_size == 0 || world_size > crate::defaults::MAX_WORLD_SIZE {
                    return Err(AppError::config(format!(
                        "WORLD_SIZE must be between 1 and {}, got: {}",
                        crate::defaults::MAX_WORLD_SIZE,
                        world_size
                    )));
                }
            }
            "PAYLOAD_GB" => {
                let payload: f64 = value.trim().parse()
                    .map_err(|e| AppError::config(format!("Invalid PAYLOAD_GB value '{}': {}", value, e)))?;
                if !(payload.is_finite() && payload > 0.0) {
                    return Err(AppError::config(format!("PAYLOAD_GB must be a positive number, got: {}", payload)));
                }
            }
            "TRANSPORTS" => {
                for name in value.split(',') {
                    let name = name.trim();
                    if !name.is_empty() {
                        name.parse::<Transport>()
                            .map_err(|_| AppError::config(format!("Invalid TRANSPORTS entry '{}'", name)))?;
                    }
                }
            }
            "TIMING_MODE" => {
                value.parse::<TimingMode>()
                    .map_err(|e| AppError::config(format!("Invalid TIMING_MODE value '{}': {}", value, e)))?;
            }
            "ENABLE_COLOR" => {
                value.trim().parse::<bool>()
                    .map_err(|e| AppError::config(format!("Invalid ENABLE_COLOR value '{}': {}", value, e)))?;
            }
            _ => {
                // Unknown environment variable, ignore
            }
        }

        Ok(())
    }

    /// Get list of all supported environment variables with descriptions
    pub fn get_supported_env_vars() -> Vec<(&'static str, &'static str, &'static str)> {
        vec![
            ("WORLD_SIZE", "Number of simulated GPUs per run", "8"),
            ("PAYLOAD_GB", "Payload per transfer in GB", "1.0"),
            ("TRANSPORTS", "Comma-separated transports to benchmark", "nvlink4,gpudirect_rdma"),
            ("TIMING_MODE", "wall_clock or analytic", "wall_clock"),
            ("ENABLE_COLOR", "Enable colored output", "true"),
        ]
    }

    /// Display environment variable help
    pub fn display_env_help() -> String {
        let mut help = String::new();
        help.push_str("Supported Environment Variables:\n\n");

        for (var, description, example) in Self::get_supported_env_vars() {
            help.push_str(&format!("  {:<14} {}\n", var, description));
            help.push_str(&format!("  {:<14} Example: {}\n\n", "", example));
        }

        help.push_str("Configuration Priority (highest to lowest):\n");
        help.push_str("  1. Command-line arguments\n");
        help.push_str("  2. Environment variables\n");
        help.push_str("  3. .env file values\n");
        help.push_str("  4. Default values\n");

        help
    }

    /// Validate the entries of an env file, returning one warning per bad line
    pub fn check_env_file(path: &Path) -> Result<Option<Vec<String>>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::config(format!("Failed to read {}: {}", path.display(), e)))?;

        let mut warnings = Vec::new();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                if let Err(e) = Self::validate_env_var(key.trim(), value.trim()) {
                    warnings.push(format!("Line '{}': {}", line, e));
                }
            }
        }

        Ok(Some(warnings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_env_manager_validate_env_var() {
        // Valid cases
        assert!(EnvManager::validate_env_var("WORLD_SIZE", "8").is_ok());
        assert!(EnvManager::validate_env_var("PAYLOAD_GB", "0.5").is_ok());
        assert!(EnvManager::validate_env_var("TRANSPORTS", "nvlink4,ib_nic").is_ok());
        assert!(EnvManager::validate_env_var("TIMING_MODE", "analytic").is_ok());
        assert!(EnvManager::validate_env_var("ENABLE_COLOR", "false").is_ok());

        // Invalid cases
        assert!(EnvManager::validate_env_var("WORLD_SIZE", "0").is_err());
        assert!(EnvManager::validate_env_var("WORLD_SIZE", "-1").is_err());
        assert!(EnvManager::validate_env_var("PAYLOAD_GB", "0").is_err());
        assert!(EnvManager::validate_env_var("PAYLOAD_GB", "inf").is_err());
        assert!(EnvManager::validate_env_var("TRANSPORTS", "nvlink4,usb4").is_err());
        assert!(EnvManager::validate_env_var("TIMING_MODE", "sampled").is_err());
        assert!(EnvManager::validate_env_var("ENABLE_COLOR", "maybe").is_err());

        // Unknown keys are ignored
        assert!(EnvManager::validate_env_var("HOME", "/root").is_ok());
    }

    #[test]
    fn test_get_supported_env_vars() {
        let vars = EnvManager::get_supported_env_vars();
        assert_eq!(vars.len(), 5);
        for (name, _, example) in vars {
            assert!(EnvManager::validate_env_var(name, example).is_ok(), "{} example rejected", name);
        }
    }

    #[test]
    fn test_display_env_help() {
        let help = EnvManager::display_env_help();
        assert!(help.contains("Supported Environment Variables:"));
        assert!(help.contains("WORLD_SIZE"));
        assert!(help.contains("Configuration Priority"));
    }

    #[test]
    fn test_check_env_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# simulator settings").unwrap();
        writeln!(file, "WORLD_SIZE=4").unwrap();
        writeln!(file, "PAYLOAD_GB=-2").unwrap();
        writeln!(file, "TRANSPORTS=usb4").unwrap();

        let warnings = EnvManager::check_env_file(file.path()).unwrap().unwrap();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("PAYLOAD_GB"));
        assert!(warnings[1].contains("usb4"));
    }

    #[test]
    fn test_check_missing_env_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join(".env");
        assert!(EnvManager::check_env_file(&missing).unwrap().is_none());
        assert!(EnvManager::load_env_file_from(&missing, false).is_ok());
    }
}
