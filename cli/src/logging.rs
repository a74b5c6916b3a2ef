use tracing_subscriber::EnvFilter;

/// Overrides `RUST_LOG` for the intuition binaries only.
pub const LOG_ENV: &str = "INTUITION_LOG";

/// Diagnostics go to stderr so they never mix with command output.
pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV)
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
