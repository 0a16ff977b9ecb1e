//! Tracing subscriber setup
//!
//! Shared between the binary and tests. Everything goes to a log file; the
//! terminal belongs to the UI.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the global tracing subscriber writing to `log_file_path`.
///
/// Returns false if the file could not be created or a subscriber was
/// already installed.
pub fn init_global(log_file_path: &Path) -> bool {
    let Ok(log_file) = File::create(log_file_path) else {
        return false;
    };
    build_subscriber(log_file).try_init().is_ok()
}

/// Build a subscriber with file logging and `RUST_LOG` filtering, DEBUG by default.
pub fn build_subscriber(log_file: File) -> impl tracing::Subscriber + Send + Sync {
    let env_filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::DEBUG.into())
        .from_env_lossy();

    let fmt_layer = fmt::layer().with_ansi(false).with_writer(Arc::new(log_file));

    tracing_subscriber::registry().with(fmt_layer).with(env_filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_subscriber_writes_to_file() {
        let log_file = NamedTempFile::new().unwrap();
        let subscriber = build_subscriber(log_file.reopen().unwrap());

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!("console could not find #nowhere");
        });

        let contents = std::fs::read_to_string(log_file.path()).unwrap();
        assert!(contents.contains("WARN"));
        assert!(contents.contains("console could not find #nowhere"));
    }
}
