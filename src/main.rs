use anyhow::{Context, Result, bail};
use house_price_form::{config, server};
use tracing::info;
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

/// `RUST_LOG` when set, otherwise the configured level. Only plain levels are accepted.
fn resolve_log_level(configured: &str) -> Result<String> {
    let level = std::env::var("RUST_LOG").unwrap_or_else(|_| configured.to_string());
    if level.parse::<LevelFilter>().is_err() {
        bail!("Unknown log level '{level}' (expected error, warn, info, debug or trace)");
    }
    Ok(level)
}

fn init_tracing(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level).context("Failed to build log filter")?;
    tracing_subscriber::fmt().with_env_filter(filter).json().init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logging is not up yet, so startup failures go to stderr.
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let log_level = match resolve_log_level(&config.server.logs.level).and_then(|level| {
        init_tracing(&level)?;
        Ok(level)
    }) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("{:#}", e);
            std::process::exit(1);
        }
    };

    info!(
        log_level = %log_level,
        api_url = %config.api.url,
        "House price form starting"
    );

    server::run(config).await?;

    Ok(())
}
