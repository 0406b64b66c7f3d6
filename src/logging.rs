use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber for a binary. Logs go to stderr; stdout is
/// reserved for the status lines the commands print.
///
/// `bin_crate` is the calling binary's `CARGO_CRATE_NAME`, so its own events
/// share the library's level.
pub fn init(bin_crate: &str, level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,{lib}={level},{bin_crate}={level}",
            lib = env!("CARGO_CRATE_NAME"),
        ))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .ok();
}
