use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Crates that are too chatty at the default level.
const QUIET_TARGETS: &[(&str, &str)] = &[
    ("sqlx", "warn"),
    ("sea_orm_migration", "warn"),
    ("hyper", "warn"),
];

fn build_filter(level: &str) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    let mut directives = vec![level.to_owned()];
    directives.extend(QUIET_TARGETS.iter().map(|(t, l)| format!("{t}={l}")));
    let joined = directives.join(",");
    EnvFilter::try_new(&joined).map_err(|e| anyhow!("invalid log filter '{joined}': {e}"))
}

/// Install the global subscriber. `RUST_LOG` overrides the configured level.
///
/// # Errors
/// Returns an error if the filter is invalid or a subscriber is already set.
pub fn init(cfg: &LoggingConfig) -> Result<()> {
    let filter = build_filter(&cfg.level)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = if cfg.json {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };
    installed.map_err(|e| anyhow!(e))
}
