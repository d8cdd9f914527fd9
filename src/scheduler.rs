//! Periodic stretch reminders on a cancellable background thread.
//!
//! A running scheduler owns exactly one timer thread. The thread counts down
//! one tick at a time, checking its cancellation flag before every tick, and
//! shows a reminder each time the countdown completes. [`Scheduler::start`]
//! and [`Scheduler::stop`] both join the previous thread before returning, so
//! two reminder streams never overlap and nothing fires after `stop` returns.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use thiserror::Error;

use crate::config::ReminderInterval;
use crate::notifier::{Notifier, Reminder};

/// Granularity of the countdown, and the upper bound on how long a stop
/// request can go unnoticed.
pub const TICK: Duration = Duration::from_secs(1);

const TIMER_THREAD_NAME: &str = "reminder-timer";

/// Source of the countdown's sleeps.
pub trait Clock: Send + Sync {
    fn sleep(&self, duration: Duration);
}

/// Real wall-clock sleeping.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn sleep(&self, duration: Duration) {
        thread::sleep(duration);
    }
}

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("failed to spawn reminder timer thread: {0}")]
    Spawn(#[from] io::Error),
}

struct Worker {
    interval: ReminderInterval,
    cancel: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

pub struct Scheduler {
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    reminder: Arc<Reminder>,
    worker: Option<Worker>,
}

impl Scheduler {
    pub fn new(notifier: Arc<dyn Notifier>, reminder: Reminder) -> Self {
        Self::with_clock(notifier, reminder, Arc::new(SystemClock))
    }

    pub fn with_clock(
        notifier: Arc<dyn Notifier>,
        reminder: Reminder,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            notifier,
            clock,
            reminder: Arc::new(reminder),
            worker: None,
        }
    }

    /// Stops any running timer, then starts a new one for `interval`.
    pub fn start(&mut self, interval: ReminderInterval) -> Result<(), SchedulerError> {
        self.stop();

        let cancel = Arc::new(AtomicBool::new(false));
        let timer = TimerLoop {
            ticks: interval.as_secs(),
            cancel: Arc::clone(&cancel),
            notifier: Arc::clone(&self.notifier),
            clock: Arc::clone(&self.clock),
            reminder: Arc::clone(&self.reminder),
        };

        let handle = thread::Builder::new()
            .name(TIMER_THREAD_NAME.into())
            .spawn(move || timer.run())?;

        self.worker = Some(Worker {
            interval,
            cancel,
            handle,
        });

        tracing::info!(minutes = interval.minutes(), "Reminder scheduler started");
        Ok(())
    }

    /// Cancels the timer and waits for its thread to exit. No-op when idle.
    pub fn stop(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };

        worker.cancel.store(true, Ordering::SeqCst);
        if worker.handle.join().is_err() {
            tracing::error!("Reminder timer thread panicked");
        }

        tracing::info!(
            minutes = worker.interval.minutes(),
            "Reminder scheduler stopped"
        );
    }

    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    /// Interval of the running timer, if any.
    pub fn interval(&self) -> Option<ReminderInterval> {
        self.worker.as_ref().map(|w| w.interval)
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

struct TimerLoop {
    ticks: u64,
    cancel: Arc<AtomicBool>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    reminder: Arc<Reminder>,
}

impl TimerLoop {
    fn run(self) {
        loop {
            for _ in 0..self.ticks {
                if self.is_cancelled() {
                    return;
                }
                self.clock.sleep(TICK);
            }

            if self.is_cancelled() {
                return;
            }

            // A failed notification must not end the reminder stream
            match self.notifier.notify(&self.reminder) {
                Ok(()) => tracing::debug!("Stretch reminder shown"),
                Err(e) => tracing::warn!(
                    error = %e,
                    "Failed to show stretch reminder, continuing with the next interval"
                ),
            }
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::SeqCst)
    }
}
