//! Logging setup for quva
//!
//! The validation crates emit `tracing` events. This crate turns a small set
//! of environment variables into a `tracing-subscriber` stack.
//!
//! # Usage
//!
//! ```rust,no_run
//! // Install the global subscriber once, early in `main`.
//! quva_log::init().expect("logger already installed");
//! ```
//!
//! # Environment Variables
//!
//! - `QUVA_DEBUG=1` - Enable debug logging
//! - `QUVA_LOG_LEVEL=trace|debug|info|warn|error|off` - Set log level
//! - `QUVA_LOG_FORMAT=pretty|compact|json` - Set output format
//! - `QUVA_LOG_COLOR=1|0` - Enable/disable colors
//! - `QUVA_LOG_TIMESTAMPS=1|0` - Include timestamps
//! - `QUVA_LOG_TARGET=1|0` - Include the module path
//! - `RUST_LOG` - Full filter directives, overrides the level

use once_cell::sync::Lazy;
use std::env;
use std::fmt;
use tracing::Subscriber;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, Layer, Registry};

// ============================================================================
// Log Levels
// ============================================================================

/// Minimum level of events that are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// Trace level (most verbose)
    Trace,
    Debug,
    Info,
    Warn,
    /// Error level (least verbose)
    Error,
    /// Off (no logging)
    Off,
}

impl Level {
    /// Parse a level name, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Some(Level::Trace),
            "debug" => Some(Level::Debug),
            "info" => Some(Level::Info),
            "warn" | "warning" => Some(Level::Warn),
            "error" => Some(Level::Error),
            "off" | "none" => Some(Level::Off),
            _ => None,
        }
    }

    /// Directive understood by `EnvFilter`
    pub fn as_directive(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Off => "off",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_directive().to_uppercase())
    }
}

// ============================================================================
// Log Format
// ============================================================================

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Multi-line, human oriented
    Pretty,
    /// Single line per event
    Compact,
    /// One JSON object per event
    Json,
}

impl Format {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Some(Format::Pretty),
            "compact" => Some(Format::Compact),
            "json" => Some(Format::Json),
            _ => None,
        }
    }
}

// ============================================================================
// Configuration
// ============================================================================

static CONFIG: Lazy<LogConfig> = Lazy::new(LogConfig::from_env);

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Whether debug mode is enabled
    pub debug: bool,
    /// Minimum log level
    pub level: Level,
    pub format: Format,
    /// Whether ANSI colors are enabled
    pub color: bool,
    pub timestamps: bool,
    /// Whether to include the event target
    pub target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            debug: false,
            level: Level::Info,
            format: Format::Compact,
            color: false,
            timestamps: true,
            target: true,
        }
    }
}

impl LogConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let flag = |key: &str| {
            lookup(key).map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        };
        let defaults = Self::default();

        let debug = flag("QUVA_DEBUG").unwrap_or(false);

        let level = lookup("QUVA_LOG_LEVEL")
            .and_then(|s| Level::parse(&s))
            .unwrap_or(defaults.level);
        // Debug mode never raises the threshold above debug.
        let level = if debug { level.min(Level::Debug) } else { level };

        let format = lookup("QUVA_LOG_FORMAT")
            .and_then(|s| Format::parse(&s))
            .unwrap_or(defaults.format);

        let color = flag("QUVA_LOG_COLOR")
            .unwrap_or_else(|| lookup("NO_COLOR").is_none() && lookup("TERM").is_some());

        Self {
            debug,
            level,
            format,
            color,
            timestamps: flag("QUVA_LOG_TIMESTAMPS").unwrap_or(defaults.timestamps),
            target: flag("QUVA_LOG_TARGET").unwrap_or(defaults.target),
        }
    }
}

/// The process-wide configuration, read from the environment on first use.
pub fn config() -> &'static LogConfig {
    &CONFIG
}

// ============================================================================
// Subscriber
// ============================================================================

/// Filter for `config`; `RUST_LOG` takes precedence when set and valid.
pub fn env_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_directive()))
}

fn format_layer<S>(config: &LogConfig) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a> + 'static,
{
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(config.color)
        .with_target(config.target);

    match (config.format, config.timestamps) {
        (Format::Pretty, true) => layer.pretty().boxed(),
        (Format::Pretty, false) => layer.pretty().without_time().boxed(),
        (Format::Compact, true) => layer.compact().boxed(),
        (Format::Compact, false) => layer.compact().without_time().boxed(),
        (Format::Json, true) => layer.json().boxed(),
        (Format::Json, false) => layer.json().without_time().boxed(),
    }
}

/// Build a subscriber for `config` without installing it.
pub fn subscriber(config: &LogConfig) -> impl Subscriber + Send + Sync + use<> {
    tracing_subscriber::registry()
        .with(format_layer::<Registry>(config))
        .with(env_filter(config))
}

/// Install the global subscriber using the environment configuration.
///
/// Fails if a global subscriber is already set.
pub fn init() -> Result<(), TryInitError> {
    subscriber(config()).try_init()
}

// ============================================================================
// Tests
// ============================================================================
