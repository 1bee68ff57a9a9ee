//! Error handling for the transfer latency simulator

use thiserror::Error;

/// Custom error types for the transfer latency simulator
#[derive(Error, Debug)]
pub enum AppError {
    /// Transport name outside the supported set
    #[error("Unknown transport: {0}")]
    UnknownTransport(String),

    /// Non-positive or non-finite payload size
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Invalid world size or worker pool failure
    #[error("Benchmark driver error: {0}")]
    Driver(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(String),

    /// Parsing errors (numbers, JSON, etc.)
    #[error("Parsing error: {0}")]
    Parse(String),

    /// Statistics calculation errors
    #[error("Statistics error: {0}")]
    Statistics(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Create a new unknown transport error
    pub fn unknown_transport<S: Into<String>>(name: S) -> Self {
        Self::UnknownTransport(name.into())
    }

    /// Create a new invalid payload error
    pub fn invalid_payload<S: Into<String>>(message: S) -> Self {
        Self::InvalidPayload(message.into())
    }

    /// Create a new driver error
    pub fn driver<S: Into<String>>(message: S) -> Self {
        Self::Driver(message.into())
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io(message.into())
    }

    /// Create a new parsing error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse(message.into())
    }

    /// Create a new statistics error
    pub fn statistics<S: Into<String>>(message: S) -> Self {
        Self::Statistics(message.into())
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Get error category for logging and reporting
    pub fn category(&self) -> &'static str {
        match self {
            Self::UnknownTransport(_) => "TRANSPORT",
            Self::InvalidPayload(_) => "PAYLOAD",
            Self::Driver(_) => "DRIVER",
            Self::Config(_) => "CONFIG",
            Self::Validation(_) => "VALIDATION",
            Self::Io(_) => "IO",
            Self::Parse(_) => "PARSE",
            Self::Statistics(_) => "STATS",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Get user-friendly error message with suggestions
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::UnknownTransport(name) => {
                format!(
                    "Unsupported transport '{}'\n\nSuggestion: Use one of: {}.",
                    name,
                    crate::transport::Transport::names().join(", ")
                )
            }
            Self::InvalidPayload(msg) => {
                format!("Invalid payload: {}\n\nSuggestion: Pass a positive size in GB with --payload.", msg)
            }
            Self::Driver(msg) => {
                format!("Benchmark could not run: {}\n\nSuggestion: Use --world-size with a value of at least 1.", msg)
            }
            Self::Config(msg) => {
                format!("Configuration problem: {}\n\nSuggestion: Check your .env file or command line arguments.", msg)
            }
            Self::Validation(msg) => {
                format!("Invalid input: {}\n\nSuggestion: Check the values passed on the command line.", msg)
            }
            Self::Io(msg) => {
                format!("File operation failed: {}\n\nSuggestion: Check file permissions and disk space.", msg)
            }
            Self::Parse(msg) => {
                format!("Failed to parse data: {}\n\nSuggestion: Check the format of your input data or configuration files.", msg)
            }
            Self::Statistics(msg) => {
                format!("Statistics calculation failed: {}\n\nSuggestion: This indicates an empty or degenerate benchmark run.", msg)
            }
            Self::Internal(msg) => {
                format!("Internal error: {}\n\nThis is likely a bug. Please report this issue with the error details.", msg)
            }
        }
    }

    /// Get exit code for this error type
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::UnknownTransport(_) | Self::InvalidPayload(_) => 1,  // Invalid input
            Self::Config(_) | Self::Validation(_) | Self::Parse(_) => 1,  // Invalid configuration/usage
            Self::Io(_) => 5,
            Self::Driver(_) | Self::Statistics(_) => 6,  // Benchmark execution issues
            Self::Internal(_) => 99,
        }
    }

    /// Format error for console display with color coding
    pub fn format_for_console(&self, use_color: bool) -> String {
        let category = self.category();
        let message = self.to_string();

        if use_color {
            use colored::Colorize;
            match self {
                Self::UnknownTransport(_) | Self::InvalidPayload(_) => {
                    format!("[{}] {}", category.yellow().bold(), message.yellow())
                }
                Self::Config(_) | Self::Validation(_) | Self::Parse(_) => {
                    format!("[{}] {}", category.red().bold(), message.red())
                }
                Self::Io(_) | Self::Driver(_) | Self::Statistics(_) => {
                    format!("[{}] {}", category.cyan().bold(), message.cyan())
                }
                Self::Internal(_) => {
                    format!("[{}] {}", category.bright_red().bold(), message.bright_red())
                }
            }
        } else {
            format!("[{}] {}", category, message)
        }
    }
}

// Standard library error conversions
impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::parse(format!("JSON error: {}", error))
    }
}

impl From<dotenv::Error> for AppError {
    fn from(error: dotenv::Error) -> Self {
        Self::config(format!("Environment file error: {}", error))
    }
}

impl From<std::num::ParseIntError> for AppError {
    fn from(error: std::num::ParseIntError) -> Self {
        Self::parse(format!("Integer parse error: {}", error))
    }
}

impl From<std::num::ParseFloatError> for AppError {
    fn from(error: std::num::ParseFloatError) -> Self {
        Self::parse(format!("Float parse error: {}", error))
    }
}

impl From<std::str::ParseBoolError> for AppError {
    fn from(error: std::str::ParseBoolError) -> Self {
        Self::parse(format!("Boolean parse error: {}", error))
    }
}

// A worker task that panicked or was cancelled takes the whole run down
impl From<tokio::task::JoinError> for AppError {
    fn from(error: tokio::task::JoinError) -> Self {
        if error.is_panic() {
            Self::driver(format!("Worker panicked: {}", error))
        } else {
            Self::driver(format!("Worker cancelled: {}", error))
        }
    }
}

impl From<tokio::sync::AcquireError> for AppError {
    fn from(error: tokio::sync::AcquireError) -> Self {
        Self::driver(format!("Worker pool closed: {}", error))
    }
}

// Anyhow integration
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::internal(error.to_string())
    }
}

/// Custom Result type for the application
pub type Result<T> = std::result::Result<T, AppError>;

/// Error reporter for user-facing error output
pub struct ErrorReporter {
    pub use_color: bool,
    pub verbose: bool,
}

impl ErrorReporter {
    /// Create a new error reporter
    pub fn new(use_color: bool, verbose: bool) -> Self {
        Self { use_color, verbose }
    }

    /// Render an error the way it is shown on stderr
    pub fn render(&self, error: &AppError) -> String {
        let mut rendered = error.format_for_console(self.use_color);
        if self.verbose {
            rendered.push_str("\n\n");
            rendered.push_str(&error.user_friendly_message());
        }
        rendered
    }

    /// Report an error to the user
    pub fn report_error(&self, error: &AppError) {
        eprintln!("{}", self.render(error));
    }
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}
