use anyhow::Result;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Initialize tracing and logging
///
/// This sets up:
/// - Structured JSON logging (for production, or `format = "json"`)
/// - Console logging (for development)
/// - Environment-based log level filtering
pub fn init_observability(
    service_name: &str,
    service_version: &str,
    logging: &LoggingConfig,
) -> Result<()> {
    // RUST_LOG wins over the configured level
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    if use_json(logging) {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_filter(env_filter))
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_line_number(true)
                    .with_filter(env_filter),
            )
            .try_init()?;
    }

    tracing::info!(
        service.name = service_name,
        service.version = service_version,
        "Observability initialized"
    );

    Ok(())
}

fn use_json(logging: &LoggingConfig) -> bool {
    let is_production = std::env::var("ENVIRONMENT")
        .map(|env| env == "production")
        .unwrap_or(false);

    is_production || logging.format.eq_ignore_ascii_case("json")
}
