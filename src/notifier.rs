//! Desktop notifications.

use std::path::PathBuf;
use std::time::Duration;

use notify_rust::{Notification, Timeout};
use thiserror::Error;

use crate::i18n::Strings;

/// How long a reminder stays on screen.
pub const REMINDER_TIMEOUT: Duration = Duration::from_secs(10);

/// Payload of a stretch reminder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub title: String,
    pub body: String,
    pub timeout: Duration,
    pub icon: Option<PathBuf>,
}

impl Reminder {
    /// The fixed reminder: app title, localized body, 10 second timeout.
    pub fn stretch(strings: &Strings, icon: Option<PathBuf>) -> Self {
        Self {
            title: strings.app_title.to_string(),
            body: strings.reminder_body.to_string(),
            timeout: REMINDER_TIMEOUT,
            icon,
        }
    }
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification backend failed: {0}")]
    Backend(String),
}

/// Something that can put a reminder on screen.
pub trait Notifier: Send + Sync {
    fn notify(&self, reminder: &Reminder) -> Result<(), NotifyError>;
}

/// OS notifications through `notify-rust` (toast on Windows, D-Bus on Linux,
/// Notification Center on macOS).
#[derive(Debug, Default, Clone, Copy)]
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn notify(&self, reminder: &Reminder) -> Result<(), NotifyError> {
        let mut notification = Notification::new();
        notification
            .summary(&reminder.title)
            .body(&reminder.body)
            .timeout(Timeout::Milliseconds(
                u32::try_from(reminder.timeout.as_millis()).unwrap_or(u32::MAX),
            ));

        // On Windows the app name doubles as the toast AUMID, which must be registered
        #[cfg(not(target_os = "windows"))]
        notification.appname(&reminder.title);

        if let Some(icon) = reminder.icon.as_deref().and_then(|p| p.to_str()) {
            notification.icon(icon);
        }

        notification
            .show()
            .map(|_| ())
            .map_err(|e| NotifyError::Backend(e.to_string()))
    }
}
