//! Logging initialization.
//!
//! Logs go to stderr; stdout carries only command output (mnemonic,
//! addresses, paths).

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. `RUST_LOG` wins over `log_level`.
pub fn init_telemetry(log_level: &str) -> anyhow::Result<()> {
    let filter = build_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok(), log_level)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init()?;

    Ok(())
}

fn build_filter(env_directives: Option<String>, log_level: &str) -> anyhow::Result<EnvFilter> {
    let directives = match env_directives {
        Some(d) if !d.trim().is_empty() => d,
        _ => log_level.to_string(),
    };
    Ok(EnvFilter::try_new(directives)?)
}
