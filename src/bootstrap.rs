//! Startup sequence.

use std::error::Error;
use std::sync::Arc;

use tracing_appender::non_blocking::WorkerGuard;

use crate::app::AppContext;
use crate::config::{app_data_dir, IntervalStore};
use crate::i18n::Lang;
use crate::instance::SingleInstance;
use crate::notifier::{DesktopNotifier, Reminder};
use crate::scheduler::Scheduler;
use crate::{autostart, gui, icon};

/// Starts hidden in the tray instead of showing the main window.
pub const BACKGROUND_FLAG: &str = "--background";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LaunchOptions {
    pub background: bool,
}

impl LaunchOptions {
    /// Parses arguments, excluding the program name. Unknown arguments are
    /// logged and ignored.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        for arg in args {
            match arg.as_ref() {
                BACKGROUND_FLAG => options.background = true,
                other => tracing::warn!(arg = other, "Ignoring unknown argument"),
            }
        }
        options
    }
}

/// Runs the app until the user exits from the tray.
///
/// Returns immediately when another instance is already running. Exit from
/// the tray ends the process without returning, after flushing `log_guard`.
pub fn run(
    options: LaunchOptions,
    log_guard: Option<WorkerGuard>,
) -> Result<(), Box<dyn Error>> {
    let _instance = match SingleInstance::acquire() {
        Ok(Some(guard)) => guard,
        Ok(None) => {
            tracing::info!("Another instance is already running, exiting");
            return Ok(());
        }
        Err(e) => {
            tracing::error!(error = %e, "Single-instance check failed, exiting");
            return Ok(());
        }
    };

    tracing::info!(
        version = option_env!("NECK_PROTECTOR_VERSION").unwrap_or(env!("CARGO_PKG_VERSION")),
        background = options.background,
        "Starting Neck Protector"
    );

    let strings = Lang::detect().strings();
    let icon_path = icon::prepare_notification_icon(&app_data_dir());

    if let Err(e) = autostart::enable() {
        tracing::warn!(error = %e, "Failed to register autostart");
    }

    let scheduler = Scheduler::new(
        Arc::new(DesktopNotifier),
        Reminder::stretch(strings, icon_path),
    );
    let mut app = AppContext::new(strings, IntervalStore::user_default(), scheduler);
    app.start_reminders()?;

    gui::run(app, !options.background, log_guard)?;

    tracing::info!("Neck Protector exited");
    Ok(())
}
