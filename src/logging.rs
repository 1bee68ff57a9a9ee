//! Structured logging system for the transfer latency simulator
//!
//! This module provides:
//! - Structured log entries with levels, named loggers and arbitrary fields
//! - Console and JSON output formats
//! - A session ID shared by every logger created from one factory
//! - Benchmark-specific helpers for run and worker events
//!
//! Log output always goes to stderr so that stdout carries only the report.

use crate::error::AppError;
use crate::models::{BenchmarkSummary, Config, TransferResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Log level enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    /// Debug level - detailed information for debugging
    Debug = 1,
    /// Info level - general application information
    Info = 2,
    /// Warning level - potentially harmful situations
    Warn = 3,
    /// Error level - error events but application can continue
    Error = 4,
}

impl LogLevel {
    /// Get log level name as string
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    /// Get ANSI color code for console output
    pub fn color_code(&self) -> &'static str {
        match self {
            LogLevel::Debug => "\x1b[36m",    // Cyan
            LogLevel::Info => "\x1b[32m",     // Green
            LogLevel::Warn => "\x1b[33m",     // Yellow
            LogLevel::Error => "\x1b[31m",    // Red
        }
    }

    /// Reset ANSI color code
    pub fn reset_code() -> &'static str {
        "\x1b[0m"
    }

    /// Level implied by the verbosity flags of a configuration
    pub fn for_config(config: &Config) -> Self {
        if config.debug {
            LogLevel::Debug
        } else if config.verbose {
            LogLevel::Info
        } else {
            LogLevel::Warn
        }
    }
}

/// Log entry structure for structured logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// Timestamp when log entry was created
    pub timestamp: DateTime<Utc>,
    /// Log level
    pub level: LogLevel,
    /// Log message
    pub message: String,
    /// Logger name/component
    pub logger: String,
    /// Additional structured fields
    pub fields: HashMap<String, serde_json::Value>,
    /// File and line information
    pub location: Option<LogLocation>,
}

/// Source code location information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogLocation {
    pub file: String,
    pub line: u32,
    pub module: Option<String>,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogFormat {
    /// Human-readable console format
    Console,
    /// JSON format for structured logging
    Json,
}

/// Shared logging context
#[derive(Debug, Default)]
struct LogContext {
    /// Session ID stamped on every entry
    session_id: Option<String>,
}

/// Logger implementation with multiple output formats
pub struct Logger {
    /// Minimum log level to output
    min_level: LogLevel,
    /// Whether to use colored output
    use_color: bool,
    /// Whether to include location information
    include_location: bool,
    /// Output format
    format: LogFormat,
    /// Logger name
    name: String,
    /// Shared context storage
    context: Arc<RwLock<LogContext>>,
}

impl Logger {
    /// Create a logger with specific configuration
    pub fn with_config(name: String, config: &Config) -> Self {
        Self {
            min_level: LogLevel::for_config(config),
            // JSON reports keep stderr machine-readable as well
            use_color: config.enable_color && !config.json_output,
            include_location: config.debug,
            format: if config.json_output { LogFormat::Json } else { LogFormat::Console },
            name,
            context: Arc::new(RwLock::new(LogContext::default())),
        }
    }

    /// Set session ID
    pub async fn set_session_id(&self, session_id: String) {
        let mut context = self.context.write().await;
        context.session_id = Some(session_id);
    }

    /// Create a log entry builder
    pub fn log(&self, level: LogLevel, message: &str) -> LogEntryBuilder<'_> {
        LogEntryBuilder::new(self, level, message.to_string())
    }

    pub fn debug(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Debug, message)
    }

    pub fn info(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Info, message)
    }

    pub fn warn(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Warn, message)
    }

    pub fn error(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Error, message)
    }

    /// Check if a log level would be output
    pub fn would_log(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    /// Render an entry, or None if it is below the minimum level
    async fn render_entry(&self, mut entry: LogEntry) -> Option<String> {
        if entry.level < self.min_level {
            return None;
        }

        if let Some(session_id) = &self.context.read().await.session_id {
            entry.fields.insert("session_id".to_string(), serde_json::Value::String(session_id.clone()));
        }

        Some(match self.format {
            LogFormat::Console => self.format_console(&entry),
            LogFormat::Json => self.format_json(&entry),
        })
    }

    async fn write_entry(&self, entry: LogEntry) {
        if let Some(output) = self.render_entry(entry).await {
            let _ = writeln!(io::stderr(), "{}", output);
        }
    }

    /// Format log entry for console output
    fn format_console(&self, entry: &LogEntry) -> String {
        let timestamp = entry.timestamp.format("%Y-%m-%d %H:%M:%S%.3f");
        let level_str = entry.level.as_str();

        let formatted_level = if self.use_color {
            format!("{}{:>5}{}", entry.level.color_code(), level_str, LogLevel::reset_code())
        } else {
            format!("{:>5}", level_str)
        };

        let mut output = format!("{} {} [{}] {}",
            timestamp,
            formatted_level,
            entry.logger,
            entry.message
        );

        if !entry.fields.is_empty() {
            let mut fields_str: Vec<String> = entry.fields.iter()
                .filter(|(k, _)| k.as_str() != "session_id")
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            fields_str.sort();
            if !fields_str.is_empty() {
                output.push_str(&format!(" {{{}}}", fields_str.join(", ")));
            }
        }

        if self.include_location {
            if let Some(location) = &entry.location {
                output.push_str(&format!(" @ {}:{}", location.file, location.line));
            }
        }

        output
    }

    /// Format log entry as JSON
    fn format_json(&self, entry: &LogEntry) -> String {
        match serde_json::to_string(entry) {
            Ok(json) => json,
            Err(_) => format!("{{\"error\": \"Failed to serialize log entry\", \"message\": \"{}\"}}", entry.message),
        }
    }
}

/// Builder pattern for creating log entries
pub struct LogEntryBuilder<'a> {
    logger: &'a Logger,
    entry: LogEntry,
}

impl<'a> LogEntryBuilder<'a> {
    fn new(logger: &'a Logger, level: LogLevel, message: String) -> Self {
        Self {
            logger,
            entry: LogEntry {
                timestamp: Utc::now(),
                level,
                message,
                logger: logger.name.clone(),
                fields: HashMap::new(),
                location: None,
            },
        }
    }

    /// Add a structured field
    pub fn field<T: Serialize>(mut self, key: &str, value: T) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.entry.fields.insert(key.to_string(), json_value);
        }
        self
    }

    /// Add location information
    pub fn location(mut self, file: &str, line: u32, module: Option<&str>) -> Self {
        self.entry.location = Some(LogLocation {
            file: file.to_string(),
            line,
            module: module.map(String::from),
        });
        self
    }

    /// Add error information
    pub fn error_info(self, error: &AppError) -> Self {
        self.field("error_category", error.category())
            .field("error_exit_code", error.exit_code())
    }

    /// Finalize and write the log entry
    pub async fn log(self) {
        self.logger.write_entry(self.entry).await;
    }
}

/// Logger for benchmark run events
pub struct BenchmarkLogger {
    logger: Logger,
}

impl BenchmarkLogger {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }

    /// Log the start of a run for one transport
    pub async fn log_run_started(&self, transport: &str, world_size: usize, payload_gb: f64) {
        self.logger.info(&format!("Starting benchmark: {}", transport))
            .field("transport", transport)
            .field("world_size", world_size)
            .field("payload_gb", payload_gb)
            .log()
            .await;
    }

    /// Log per-worker results at debug level
    pub async fn log_workers(&self, transport: &str, workers: &[TransferResult]) {
        if !self.logger.would_log(LogLevel::Debug) {
            return;
        }
        for worker in workers {
            self.logger.debug(&format!("Worker {} finished", worker.rank))
                .field("transport", transport)
                .field("rank", worker.rank)
                .field("elapsed_us", worker.elapsed_us())
                .log()
                .await;
        }
    }

    /// Log a completed run with its summary figures
    pub async fn log_run_completed(&self, summary: &BenchmarkSummary) {
        self.logger.info(&format!(
            "Completed benchmark: {} in {:.3}ms",
            summary.transport,
            summary.elapsed_seconds * 1000.0
        ))
            .field("transport", summary.transport)
            .field("timing_mode", summary.timing_mode)
            .field("world_size", summary.world_size)
            .field("mean_latency_us", summary.mean_latency_microseconds)
            .field("throughput_gbps", summary.aggregate_throughput_gbps)
            .field("elapsed_seconds", summary.elapsed_seconds)
            .log()
            .await;
    }

    /// Log a failed run
    pub async fn log_run_failed(&self, transport: &str, error: &AppError) {
        self.logger.error(&format!("Benchmark failed for {}: {}", transport, error))
            .field("transport", transport)
            .error_info(error)
            .log()
            .await;
    }
}

/// Logger factory sharing one session ID across loggers
pub struct LoggerFactory {
    config: Config,
    session_id: String,
}

impl LoggerFactory {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            session_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create a logger with a specific name
    pub async fn create_logger(&self, name: &str) -> Logger {
        let logger = Logger::with_config(name.to_string(), &self.config);
        logger.set_session_id(self.session_id.clone()).await;
        logger
    }

    /// Create a benchmark logger
    pub async fn create_benchmark_logger(&self) -> BenchmarkLogger {
        BenchmarkLogger::new(self.create_logger("BENCH").await)
    }
}

/// Convenience macros for logging with location information
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)*) => {
        $logger.debug(&format!($($arg)*))
            .location(file!(), line!(), Some(module_path!()))
            .log()
            .await
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {
        $logger.info(&format!($($arg)*))
            .location(file!(), line!(), Some(module_path!()))
            .log()
            .await
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)*) => {
        $logger.warn(&format!($($arg)*))
            .location(file!(), line!(), Some(module_path!()))
            .log()
            .await
    };
}
