//! Configuration validation utilities and rules
//!
//! Hard errors come from [`Config::validate`]; this module adds non-fatal
//! warnings about settings that make the reported numbers less meaningful.

use crate::{
    error::Result,
    models::Config,
    transfer::modeled_transfer_time,
    transport::TransportRegistry,
    types::TimingMode,
};

/// Modeled transfers shorter than this are dominated by timer resolution
const TIMER_RESOLUTION_SECONDS: f64 = 1e-3;

/// Wall-clock runs longer than this are worth warning about
const LONG_RUN_SECONDS: f64 = 60.0;

/// World sizes above this spawn an unusually large number of tasks
const LARGE_WORLD_SIZE: usize = 1024;

/// Configuration validator with advanced validation rules
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate configuration with comprehensive checks
    pub fn validate_comprehensive(config: &Config, registry: &TransportRegistry) -> Result<Vec<ValidationWarning>> {
        let mut warnings = Vec::new();

        config.validate()?;

        warnings.extend(Self::validate_world_size(config));
        warnings.extend(Self::validate_payload(config, registry)?);
        warnings.extend(Self::validate_run_duration(config, registry)?);

        Ok(warnings)
    }

    /// Check the number of simulated participants
    fn validate_world_size(config: &Config) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        if config.world_size > LARGE_WORLD_SIZE {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Warning,
                format!("World size of {} spawns one task per simulated GPU for every transport", config.world_size)
            ));
        }

        let cpu_cores = num_cpus::get();
        if config.timing_mode == TimingMode::WallClock && config.world_size > cpu_cores {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Info,
                format!(
                    "World size of {} exceeds {} logical CPUs; wall-clock throughput includes host scheduling overhead",
                    config.world_size, cpu_cores
                )
            ));
        }

        warnings
    }

    /// Check whether the payload is large enough for bandwidth to matter
    fn validate_payload(config: &Config, registry: &TransportRegistry) -> Result<Vec<ValidationWarning>> {
        let mut warnings = Vec::new();

        for transport in config.selected_transports()? {
            let profile = registry.profile(transport)?;
            let bandwidth_seconds = config.payload_gb / profile.peak_bandwidth_gbps();
            if bandwidth_seconds < profile.fixed_latency_seconds() {
                warnings.push(ValidationWarning::new(
                    ValidationLevel::Info,
                    format!(
                        "Payload of {} GB is latency-dominated on {}",
                        config.payload_gb, transport
                    )
                ));
            }
        }

        Ok(warnings)
    }

    /// Check how long a wall-clock run will take and how precise it will be
    fn validate_run_duration(config: &Config, registry: &TransportRegistry) -> Result<Vec<ValidationWarning>> {
        let mut warnings = Vec::new();

        if config.timing_mode != TimingMode::WallClock {
            return Ok(warnings);
        }

        let mut total_seconds = 0.0;
        for transport in config.selected_transports()? {
            let seconds = modeled_transfer_time(&registry.profile(transport)?, config.payload_gb)?;
            total_seconds += seconds;

            if seconds < TIMER_RESOLUTION_SECONDS {
                warnings.push(ValidationWarning::new(
                    ValidationLevel::Warning,
                    format!(
                        "Modeled {} transfer of {:.3}us is below timer resolution; consider --analytic",
                        transport,
                        seconds * 1e6
                    )
                ));
            }
        }

        if total_seconds > LONG_RUN_SECONDS {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Warning,
                format!("Wall-clock run will take about {:.0}s; consider --analytic", total_seconds)
            ));
        }

        Ok(warnings)
    }
}

/// Validation warning levels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValidationLevel {
    Info,
    Warning,
}

/// Configuration validation warning
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub level: ValidationLevel,
    pub message: String,
}

impl ValidationWarning {
    /// Create a new validation warning
    pub fn new(level: ValidationLevel, message: String) -> Self {
        Self { level, message }
    }
}

/// Convenience function for comprehensive configuration validation
pub fn validate_config(config: &Config, registry: &TransportRegistry) -> Result<Vec<ValidationWarning>> {
    ConfigValidator::validate_comprehensive(config, registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn registry() -> TransportRegistry {
        TransportRegistry::standard()
    }

    fn messages(warnings: &[ValidationWarning]) -> Vec<&str> {
        warnings.iter().map(|w| w.message.as_str()).collect()
    }

    #[test]
    fn test_hard_errors_propagate() {
        let config = Config { world_size: 0, ..Default::default() };
        assert!(matches!(validate_config(&config, &registry()), Err(AppError::Driver(_))));
    }

    #[test]
    fn test_large_world_size_warning() {
        let config = Config {
            world_size: 2048,
            timing_mode: TimingMode::Analytic,
            ..Default::default()
        };
        let warnings = validate_config(&config, &registry()).unwrap();
        assert!(warnings
            .iter()
            .any(|w| w.level == ValidationLevel::Warning && w.message.contains("2048")));
    }

    #[test]
    fn test_latency_dominated_payload() {
        // 1 KB: the bandwidth term is below every fixed latency
        let config = Config {
            payload_gb: 1e-6,
            timing_mode: TimingMode::Analytic,
            world_size: 1,
            ..Default::default()
        };
        let warnings = validate_config(&config, &registry()).unwrap();
        let latency_warnings: Vec<_> = messages(&warnings)
            .into_iter()
            .filter(|m| m.contains("latency-dominated"))
            .collect();
        assert_eq!(latency_warnings.len(), 4);
    }

    #[test]
    fn test_sub_millisecond_wall_clock_warning() {
        let config = Config {
            payload_gb: 1e-3,
            transports: vec!["nvlink4".to_string()],
            world_size: 1,
            ..Default::default()
        };
        let warnings = validate_config(&config, &registry()).unwrap();
        assert!(messages(&warnings).iter().any(|m| m.contains("below timer resolution")));

        // Analytic runs have no timer to worry about
        let config = Config { timing_mode: TimingMode::Analytic, ..config };
        let warnings = validate_config(&config, &registry()).unwrap();
        assert!(!messages(&warnings).iter().any(|m| m.contains("below timer resolution")));
    }

    #[test]
    fn test_long_run_warning() {
        // 64 GB over PCIe alone takes a full second per transport; 6400 GB takes 100s
        let config = Config {
            payload_gb: 6400.0,
            transports: vec!["pcie_gen5".to_string()],
            world_size: 1,
            ..Default::default()
        };
        let warnings = validate_config(&config, &registry()).unwrap();
        assert!(messages(&warnings).iter().any(|m| m.contains("about 100s")));
    }

    #[test]
    fn test_single_worker_default_run_has_no_warnings() {
        let config = Config { world_size: 1, ..Default::default() };
        let warnings = validate_config(&config, &registry()).unwrap();
        assert!(warnings.is_empty(), "unexpected warnings: {:?}", messages(&warnings));
    }
}
