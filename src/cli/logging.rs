//! Tracing setup.
//!
//! Logs always go to `<log_dir>/roborally.log` at `RUST_LOG` or info. The
//! headless runner also sends warnings to stderr; the TUI owns the terminal
//! so it only writes the file.

use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Install the global subscriber. Keep the guard alive until exit so the
/// file writer flushes.
pub(crate) fn init(log_dir: &Path, to_stderr: bool) -> anyhow::Result<WorkerGuard> {
    fs::create_dir_all(log_dir)?;

    let file = tracing_appender::rolling::never(log_dir, "roborally.log");
    let (writer, guard) = tracing_appender::non_blocking(file);

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_filter(filter("info"));

    let stderr_layer = to_stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_filter(filter("warn"))
    });

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .init();

    Ok(guard)
}

/// `RUST_LOG` if set, otherwise `default`.
fn filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}
