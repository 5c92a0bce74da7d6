//! Diagnostic logging setup.
//!
//! User-facing output goes through `ui::messages`; this only configures
//! the `tracing` subscriber that writes diagnostics to stderr.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_LEVEL: &str = "warn";

/// Pick the filter directive: command line, then `RUST_LOG`, then the
/// config file, then [`DEFAULT_LEVEL`].
pub fn resolve_filter(
    cli_level: Option<&str>,
    env_level: Option<&str>,
    config_level: Option<&str>,
) -> String {
    [cli_level, env_level, config_level]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or(DEFAULT_LEVEL)
        .to_string()
}

/// Install the global subscriber. Calling it twice is harmless.
pub fn enable_logging(cli_level: Option<&str>, config_level: Option<&str>) {
    let env_level = std::env::var("RUST_LOG").ok();
    let directive = resolve_filter(cli_level, env_level.as_deref(), config_level);

    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();

    tracing::debug!(%directive, "logging enabled");
}
