//! Application context shared by every UI callback.
//!
//! Owns the current interval, the interval store and the live secondary
//! windows. The UI thread holds the only instance and passes it by reference.
//! The reminder scheduler is shared so tray requests can stop it without
//! waiting for a frame.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::{IntervalStore, ReminderInterval};
use crate::i18n::Strings;
use crate::scheduler::{Scheduler, SchedulerError};
use crate::settings::{CloseDecision, SettingsEvent, SettingsWindow, Transition};

/// Result of asking for a singleton window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    Created,
    /// Already live, focus was requested instead.
    Refocused,
}

/// The usage window carries no state beyond focus.
#[derive(Debug)]
pub struct UsageWindow {
    focus_requested: bool,
}

impl UsageWindow {
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }
}

pub struct AppContext {
    strings: &'static Strings,
    store: IntervalStore,
    interval: ReminderInterval,
    scheduler: Arc<Mutex<Scheduler>>,
    settings: Option<SettingsWindow>,
    usage: Option<UsageWindow>,
}

impl AppContext {
    /// Loads the saved interval from `store`. Reminders are not started yet.
    pub fn new(strings: &'static Strings, store: IntervalStore, scheduler: Scheduler) -> Self {
        let interval = store.load();
        tracing::info!(minutes = interval.minutes(), "Loaded reminder interval");

        Self {
            strings,
            store,
            interval,
            scheduler: Arc::new(Mutex::new(scheduler)),
            settings: None,
            usage: None,
        }
    }

    pub fn strings(&self) -> &'static Strings {
        self.strings
    }

    pub fn interval(&self) -> ReminderInterval {
        self.interval
    }

    /// Interval the reminder timer is currently running with.
    pub fn scheduled_interval(&self) -> Option<ReminderInterval> {
        self.lock_scheduler().interval()
    }

    pub fn start_reminders(&mut self) -> Result<(), SchedulerError> {
        self.lock_scheduler().start(self.interval)
    }

    /// Shared handle to the reminder scheduler, for code that has to stop it
    /// from outside the UI thread.
    pub fn scheduler_handle(&self) -> Arc<Mutex<Scheduler>> {
        Arc::clone(&self.scheduler)
    }

    fn lock_scheduler(&self) -> MutexGuard<'_, Scheduler> {
        self.scheduler.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Opens the settings window, or refocuses it if it is already live.
    pub fn open_settings(&mut self) -> OpenOutcome {
        match self.settings.as_mut() {
            Some(window) => {
                window.request_focus();
                tracing::debug!("Settings window already open, refocusing");
                OpenOutcome::Refocused
            }
            None => {
                self.settings = Some(SettingsWindow::new(self.interval));
                tracing::debug!("Settings window opened");
                OpenOutcome::Created
            }
        }
    }

    pub fn settings(&self) -> Option<&SettingsWindow> {
        self.settings.as_ref()
    }

    pub fn settings_mut(&mut self) -> Option<&mut SettingsWindow> {
        self.settings.as_mut()
    }

    /// Feeds `event` to the live settings window and applies its outcome.
    ///
    /// Returns the decision when the window closed, `None` when it stays open
    /// or no settings window is live.
    pub fn handle_settings_event(&mut self, event: SettingsEvent) -> Option<CloseDecision> {
        let window = self.settings.as_mut()?;
        let Transition::Close(decision) = window.handle(event) else {
            return None;
        };

        self.settings = None;
        if let CloseDecision::Save(selected) = decision {
            self.apply_interval(selected);
        }
        tracing::debug!(?decision, "Settings window closed");
        Some(decision)
    }

    fn apply_interval(&mut self, selected: ReminderInterval) {
        if let Err(e) = self.store.save(selected) {
            tracing::error!(error = %e, "Failed to save reminder interval");
        }

        if selected == self.interval {
            return;
        }

        tracing::info!(
            from = self.interval.minutes(),
            to = selected.minutes(),
            "Reminder interval changed, restarting scheduler"
        );
        self.interval = selected;
        if let Err(e) = self.lock_scheduler().start(selected) {
            tracing::error!(error = %e, "Failed to restart reminder scheduler");
        }
    }

    /// Opens the usage window, or refocuses it if it is already live.
    pub fn open_usage(&mut self) -> OpenOutcome {
        match self.usage.as_mut() {
            Some(window) => {
                window.focus_requested = true;
                OpenOutcome::Refocused
            }
            None => {
                self.usage = Some(UsageWindow {
                    focus_requested: true,
                });
                OpenOutcome::Created
            }
        }
    }

    pub fn usage_mut(&mut self) -> Option<&mut UsageWindow> {
        self.usage.as_mut()
    }

    pub fn close_usage(&mut self) {
        self.usage = None;
    }

    /// Stops reminders. Safe to call more than once.
    pub fn shutdown(&mut self) {
        self.lock_scheduler().stop();
    }
}
