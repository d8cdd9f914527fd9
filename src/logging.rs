//! Tracing setup: stderr plus a daily-rolling file in the app data directory.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::app_data_dir;

/// Environment variable holding an `EnvFilter` directive, e.g. `debug`.
pub const LOG_ENV_VAR: &str = "NECK_PROTECTOR_LOG";

const LOG_FILE_PREFIX: &str = "neck-protector";

fn default_directive() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

/// Installs the global subscriber.
///
/// The returned guard flushes the file writer on drop and must live until
/// exit. File logging is skipped, with a note on stderr, if the log
/// directory cannot be created.
pub fn init() -> Option<WorkerGuard> {
    init_in(&app_data_dir().join("logs"))
}

pub fn init_in(log_dir: &Path) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_directive()));

    let appender = std::fs::create_dir_all(log_dir)
        .map_err(|e| e.to_string())
        .and_then(|()| {
            RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix(LOG_FILE_PREFIX)
                .filename_suffix("log")
                .build(log_dir)
                .map_err(|e| e.to_string())
        });

    let (file_layer, guard) = match appender {
        Ok(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_writer(writer).with_ansi(false)),
                Some(guard),
            )
        }
        Err(e) => {
            eprintln!(
                "Failed to set up file logging in {}: {}",
                log_dir.display(),
                e
            );
            (None, None)
        }
    };

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init();

    if let Err(e) = installed {
        eprintln!("Logging already initialized: {}", e);
    }

    guard
}
