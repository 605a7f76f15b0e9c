//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Filter used when `RUST_LOG` is unset: `gex_engine=<level>`.
#[must_use]
pub fn default_directive(logging: &LoggingConfig) -> String {
    format!("gex_engine={}", logging.level.trim().to_lowercase())
}

/// Install the global fmt subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Events go to
/// stderr so stdout stays free for the prompt and the summary. Calling this
/// twice is a no-op.
pub fn init_tracing(logging: &LoggingConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(logging)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = if logging.format == "compact" {
        builder.compact().try_init()
    } else {
        builder.try_init()
    };

    if installed.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}
