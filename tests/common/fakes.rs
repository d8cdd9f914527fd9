// Virtual clock and recording notifier for driving the scheduler without real waits
#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, ThreadId};
use std::time::Duration;

use neck_protector::i18n::Lang;
use neck_protector::notifier::{NotifyError, Notifier, Reminder};
use neck_protector::scheduler::Clock;

/// Clock whose sleeps advance a counter instead of waiting.
#[derive(Debug, Default)]
pub struct VirtualClock {
    elapsed_nanos: AtomicU64,
}

impl VirtualClock {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Total virtual time slept so far, across every timer thread.
    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.elapsed_nanos.load(Ordering::SeqCst))
    }
}

impl Clock for VirtualClock {
    fn sleep(&self, duration: Duration) {
        self.elapsed_nanos
            .fetch_add(duration.as_nanos() as u64, Ordering::SeqCst);
        // Yield so the test thread can observe and cancel between ticks
        thread::sleep(Duration::from_micros(20));
    }
}

/// One call to [`RecordingNotifier::notify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    /// Virtual time at which the reminder fired.
    pub at: Duration,
    pub thread: ThreadId,
    pub body: String,
}

/// Notifier that records every reminder, optionally failing each one.
#[derive(Debug)]
pub struct RecordingNotifier {
    clock: Arc<VirtualClock>,
    calls: Mutex<Vec<Call>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new(clock: Arc<VirtualClock>) -> Arc<Self> {
        Arc::new(Self {
            clock,
            calls: Mutex::new(Vec::new()),
            fail: false,
        })
    }

    pub fn failing(clock: Arc<VirtualClock>) -> Arc<Self> {
        Arc::new(Self {
            clock,
            calls: Mutex::new(Vec::new()),
            fail: true,
        })
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, reminder: &Reminder) -> Result<(), NotifyError> {
        self.calls.lock().unwrap().push(Call {
            at: self.clock.elapsed(),
            thread: thread::current().id(),
            body: reminder.body.clone(),
        });
        if self.fail {
            Err(NotifyError::Backend("toast service unavailable".into()))
        } else {
            Ok(())
        }
    }
}

/// The English stretch reminder without an icon.
pub fn test_reminder() -> Reminder {
    Reminder::stretch(Lang::English.strings(), None)
}
