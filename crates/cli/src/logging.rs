use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs a stderr subscriber; `RUST_LOG` wins over `default_level`.
pub(crate) fn setup_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,connprobe={default_level},connprobe_core={default_level},connprobe_driver_mysql={default_level}"
        ))
    });

    // Ignored when a subscriber is already installed.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init();
}
