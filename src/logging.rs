// Logging setup.
// Plain progress lines on stdout; RUST_LOG overrides the -v level.

use tracing_subscriber::EnvFilter;

/// Filter directive for a `-v` count.
fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Call once, before any logging.
pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("horn={}", level_for(verbose))));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stdout)
        .with_target(false)
        .with_level(false)
        .without_time()
        .init();
}
