//! crates/logging/src/tracing_bridge.rs
//! Installs a `tracing-subscriber` pipeline driven by [`VerbosityConfig`].
//!
//! The engine crates only emit events; binaries and tests decide whether a
//! subscriber exists. The filter maps each subsystem target to the level
//! chosen in the configuration and keeps warnings from everything else.
//! `RUST_LOG`, when set, is layered on top of the configured directive.
//!
//! # Usage
//!
//! ```rust,ignore
//! use logging::{VerbosityConfig, init_tracing};
//!
//! let config = VerbosityConfig::from_verbose_level(2);
//! init_tracing(&config)?;
//! ```

use super::config::VerbosityConfig;
use tracing_subscriber::EnvFilter;

/// Error raised when a subscriber cannot be installed.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    /// A directive did not parse.
    #[error("invalid tracing directive: {0}")]
    Directive(#[from] tracing_subscriber::filter::ParseError),
    /// Another global subscriber is already installed.
    #[error("tracing subscriber already installed: {0}")]
    AlreadyInstalled(#[from] tracing_subscriber::util::TryInitError),
}

/// Builds the filter for `config`, merged with `RUST_LOG` when present.
pub fn env_filter(config: &VerbosityConfig) -> Result<EnvFilter, InitError> {
    let mut directive = config.directive();
    if let Ok(extra) = std::env::var(EnvFilter::DEFAULT_ENV) {
        if !extra.trim().is_empty() {
            directive.push(',');
            directive.push_str(&extra);
        }
    }
    Ok(EnvFilter::try_new(directive)?)
}

/// Initialize a global fmt subscriber filtered by `config`.
pub fn init_tracing(config: &VerbosityConfig) -> Result<(), InitError> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = env_filter(config)?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init()?;
    Ok(())
}
