use std::path::Path;

use tracing::debug;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

/// Install a file-backed subscriber. The terminal is owned by the TUI, so
/// nothing is written to stdout or stderr.
///
/// `RUST_LOG` wins over `default_level`. Keep the returned guard alive for
/// the life of the program or buffered lines are lost.
pub fn init_tracing(log_dir: &Path, default_level: &str) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("typer={default_level}")));

    let file_appender = tracing_appender::rolling::daily(log_dir, "typer.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_writer(non_blocking_file);

    if let Err(err) = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
    {
        // the subscriber that is already installed keeps receiving events
        debug!(%err, "tracing subscriber already installed");
    }

    Ok(guard)
}
