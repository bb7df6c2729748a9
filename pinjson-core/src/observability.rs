//! Logging configuration and initialization
//!
//! The codec reports registrations at `debug` level and individual
//! marshal/unmarshal calls at `trace` level through `tracing`. Nothing is
//! printed unless the host application installs a subscriber; this module
//! provides a ready-made one built on `tracing-subscriber`.
//!
//! # Usage Pattern
//!
//! Initialize logging once at start-up, before building registries:
//!
//! ```rust,no_run
//! use pinjson_core::LogConfig;
//!
//! let config = LogConfig::new()
//!     .with_log_level("pinjson_core=debug")
//!     .with_json(true);
//!
//! pinjson_core::init_logging(config).expect("Failed to init logging");
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: filter directives (e.g. "info", "pinjson_core=trace").
//!   When set, it takes precedence over the configured level.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging configuration
///
/// # Defaults
///
/// - Log level: `$RUST_LOG` or "info"
/// - Plain text output
/// - Targets and line numbers included
///
/// # Examples
///
/// ```rust
/// use pinjson_core::LogConfig;
///
/// let config = LogConfig::new()
///     .with_log_level("debug")
///     .with_line_numbers(false);
/// assert_eq!(config.log_level, "debug");
/// ```
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Filter directives, in `EnvFilter` syntax
    ///
    /// Standard levels are "error", "warn", "info", "debug" and "trace".
    pub log_level: String,

    /// Emit one JSON object per event instead of plain text
    pub json: bool,

    /// Include the event target (module path)
    pub with_target: bool,

    /// Include the source line number
    pub with_line_numbers: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            json: false,
            with_target: true,
            with_line_numbers: true,
        }
    }
}

impl LogConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the filter directives
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Switch between JSON and plain text output
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Include or omit event targets
    pub fn with_target(mut self, enable: bool) -> Self {
        self.with_target = enable;
        self
    }

    /// Include or omit source line numbers
    pub fn with_line_numbers(mut self, enable: bool) -> Self {
        self.with_line_numbers = enable;
        self
    }

    fn env_filter(&self) -> Result<EnvFilter, Box<dyn std::error::Error + Send + Sync>> {
        Ok(EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&self.log_level))?)
    }
}

/// Install a global `tracing` subscriber
///
/// Builds a `tracing_subscriber::registry()` with an `EnvFilter` and a `fmt`
/// layer, JSON or plain according to the configuration.
///
/// # Errors
///
/// - The filter directives do not parse
/// - A global subscriber is already installed
pub fn init_logging(config: LogConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter = config.env_filter()?;

    if config.json {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(config.with_target)
            .with_line_number(config.with_line_numbers)
            .json();

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(config.with_target)
            .with_line_number(config.with_line_numbers);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    tracing::debug!(
        log_level = %config.log_level,
        json = config.json,
        "logging initialized"
    );

    Ok(())
}
