use color_eyre::eyre::{Result, WrapErr};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};
use tracing_tree::HierarchicalLayer;

use crate::config::Config;

/// Installs the global subscriber.
///
/// Debug mode prints an indented tree for humans, otherwise JSON lines at info.
/// `RUST_LOG` overrides the level either way. The returned guard keeps Sentry
/// flushing and must live until shutdown.
pub fn init(config: &Config) -> Result<Option<sentry::ClientInitGuard>> {
    let guard = match &config.sentry_dsn {
        Some(dsn) => {
            let dsn: sentry::types::Dsn = dsn.parse().wrap_err("SENTRY_DSN is not a valid DSN")?;
            Some(sentry::init(sentry::ClientOptions {
                dsn: Some(dsn),
                release: sentry::release_name!(),
                ..Default::default()
            }))
        }
        None => None,
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if config.debug { "debug" } else { "info" }));

    tracing_subscriber::registry()
        .with(filter)
        .with(config.debug.then(|| {
            HierarchicalLayer::new(2)
                .with_targets(true)
                .with_bracketed_fields(true)
        }))
        .with((!config.debug).then(|| fmt::layer().json()))
        .with(guard.as_ref().map(|_| sentry_tracing::layer()))
        .try_init()
        .wrap_err("failed to install tracing subscriber")?;

    Ok(guard)
}
