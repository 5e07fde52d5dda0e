use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.  Logs go to stderr so that rendered output on stdout
/// stays clean.
pub fn setup(env_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(env_filter))
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
