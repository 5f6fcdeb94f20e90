use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "info";

/// Installs the global fmt subscriber.
///
/// An explicit `filter` wins over `RUST_LOG`; with neither set the level is
/// `info`. Calling this twice is harmless, only the first call takes effect.
pub fn init(filter: Option<&str>) {
    let filter = match filter {
        Some(directive) => EnvFilter::try_new(directive).unwrap_or_else(|e| {
            eprintln!("ignoring log filter {directive:?}: {e}");
            EnvFilter::new(DEFAULT_FILTER)
        }),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init();
}
