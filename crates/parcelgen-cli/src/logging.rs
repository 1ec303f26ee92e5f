//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! Log events go to stderr so that generated source printed to stdout stays clean.
//!
//! # Log Levels
//!
//! - `error`: a schema failed to load or generate
//! - `warn`: ignored options, deprecated layouts
//! - `info`: files written and skipped
//! - `debug`: per-artifact details from the assembler
//!
//! `RUST_LOG` overrides the level chosen on the command line.

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level filter
    pub level: Level,
    /// Whether to include the target (module path) in log output
    pub with_target: bool,
    /// Whether to use ANSI colors in output
    pub with_ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            with_target: false,
            with_ansi: true,
        }
    }
}

impl LogConfig {
    /// Create a `LogConfig` from CLI flags.
    ///
    /// - `-q`: warn level
    /// - no flag: info level
    /// - `-v`: debug level
    /// - `-vv` and more: trace level
    #[must_use]
    pub fn from_verbosity(verbosity: u8, quiet: bool) -> Self {
        let level = match (quiet, verbosity) {
            (true, _) => Level::WARN,
            (false, 0) => Level::INFO,
            (false, 1) => Level::DEBUG,
            (false, _) => Level::TRACE,
        };
        Self {
            level,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_ansi(mut self, enable: bool) -> Self {
        self.with_ansi = enable;
        self
    }
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(config: &LogConfig) -> anyhow::Result<()> {
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(config.with_ansi)
        .with_target(config.with_target)
        .without_time();

    tracing_subscriber::registry()
        .with(build_env_filter(config.level))
        .with(layer)
        .try_init()?;

    Ok(())
}

fn build_env_filter(level: Level) -> EnvFilter {
    let level = level.as_str().to_lowercase();

    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        // other crates stay at warn
        EnvFilter::new(format!(
            "warn,parcelgen={level},parcelgen_cli={level},parcelgen_core={level}"
        ))
    })
}
