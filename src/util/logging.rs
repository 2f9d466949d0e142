//! Structured logging setup for sitesmith
//!
//! Initializes a `tracing` subscriber with pretty or JSON output. Logs go to
//! stderr so command output on stdout stays machine-readable.
//!
//! # Example
//!
//! ```no_run
//! use sitesmith::util::logging;
//! use tracing::{debug, info};
//!
//! logging::init_from_env();
//!
//! info!("Application started");
//! debug!(rule = "direct_recolor", "Rule matched");
//! ```

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Ensures logging is only initialized once
static INIT: Once = Once::new();

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum log level for sitesmith's own events
    pub level: Level,

    /// Use JSON output format
    pub use_json: bool,

    /// Include the module target (e.g., sitesmith::intent::rules) in logs
    pub include_target: bool,

    /// Include file and line number information
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: true,
            include_location: false,
        }
    }
}

impl LoggingConfig {
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// Reads `SITESMITH_LOG_LEVEL` and `SITESMITH_LOG_JSON`
    pub fn from_env() -> Self {
        let level_str = env::var("SITESMITH_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            level: parse_level(&level_str),
            use_json: env_flag("SITESMITH_LOG_JSON"),
            ..Default::default()
        }
    }
}

fn env_flag(key: &str) -> bool {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().to_lowercase().parse::<bool>().ok())
        .unwrap_or(false)
}

/// Parses a log level from a string, defaulting to INFO
///
/// ```
/// use sitesmith::util::logging::parse_level;
/// use tracing::Level;
///
/// assert_eq!(parse_level("debug"), Level::DEBUG);
/// assert_eq!(parse_level("WARN"), Level::WARN);
/// assert_eq!(parse_level("invalid"), Level::INFO);
/// ```
pub fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::INFO
        }
    }
}

/// Picks the level for a CLI run
///
/// An explicit `--log-level` wins, then `-v` (debug) and `-q` (error), then
/// `SITESMITH_LOG_LEVEL`.
pub fn resolve_level(log_level: Option<&str>, verbose: bool, quiet: bool) -> Level {
    if let Some(level_str) = log_level {
        parse_level(level_str)
    } else if verbose {
        Level::DEBUG
    } else if quiet {
        Level::ERROR
    } else {
        LoggingConfig::from_env().level
    }
}

fn build_filter(level: Level) -> EnvFilter {
    if env::var("RUST_LOG").is_ok() {
        return EnvFilter::from_default_env();
    }

    EnvFilter::default()
        .add_directive(
            format!("sitesmith={}", level)
                .parse()
                .expect("Invalid sitesmith log directive"),
        )
        .add_directive("h2=warn".parse().expect("Invalid h2 log directive"))
        .add_directive("hyper=warn".parse().expect("Invalid hyper log directive"))
        .add_directive("reqwest=warn".parse().expect("Invalid reqwest log directive"))
}

/// Initializes the logging system; later calls are ignored
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = build_filter(config.level);

        if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(std::io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location),
                )
                .init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location),
                )
                .init();
        }
    });
}

pub fn init_default() {
    init_logging(LoggingConfig::default());
}

/// Initializes logging from `SITESMITH_LOG_LEVEL`, `SITESMITH_LOG_JSON` and `RUST_LOG`
pub fn init_from_env() {
    init_logging(LoggingConfig::from_env());
}
