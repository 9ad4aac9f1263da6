use crate::config::Config;

/// Install the global `tracing` subscriber. `RUST_LOG` wins over the
/// configured filter. Fails if a subscriber is already installed.
pub fn init_tracing(config: &Config) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.log_filter.as_str().into());

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = if config.log_json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {}", e))?;
    tracing::debug!(json = config.log_json, "Tracing initialized");
    Ok(())
}
