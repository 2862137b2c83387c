use tracing_subscriber::{EnvFilter, fmt};

/// Initialize logging to stderr, so report output on stdout stays clean.
///
/// `RUST_LOG` takes precedence over the requested level when set.
pub fn init_logging(log_level: &str) -> color_eyre::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(log_level)?,
    };

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    Ok(())
}
