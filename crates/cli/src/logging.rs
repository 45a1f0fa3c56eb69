//! Logging setup, powered by tracing-subscriber.
//!
//! `RUST_LOG` wins when set; otherwise the configured level applies to
//! tablebridge and noisy dependencies are held at `warn`.

use tracing_subscriber::EnvFilter;

fn build_env_filter(level: &str) -> anyhow::Result<EnvFilter> {
    let mut directives = vec![level.to_string()];

    // Suppress noisy third-party crates
    let noisy: &[(&str, &str)] = &[
        ("actix_server", "warn"),
        ("actix_web", "warn"),
        ("ureq", "warn"),
        ("rustls", "warn"),
    ];
    for (target, lvl) in noisy {
        directives.push(format!("{}={}", target, lvl));
    }

    let filter_str = directives.join(",");
    EnvFilter::try_new(&filter_str)
        .map_err(|e| anyhow::anyhow!("Invalid tracing filter '{}': {}", filter_str, e))
}

/// Install the global subscriber writing to stderr.
pub fn init_logging(level: &str) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => build_env_filter(level)?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}
