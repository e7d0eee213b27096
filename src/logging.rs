use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Console logging to stderr so stdout stays free for the preview tables.
///
/// `RUST_LOG` overrides the default `housing_sampler=info` filter.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("housing_sampler=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
