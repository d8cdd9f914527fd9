// Tests for Scheduler in src/scheduler.rs

mod common;

use std::thread;
use std::time::Duration;

use common::fakes::{test_reminder, RecordingNotifier, VirtualClock};
use common::{wait_until, WAIT_TIMEOUT};
use neck_protector::config::ReminderInterval;
use neck_protector::scheduler::Scheduler;

fn minutes(n: u32) -> ReminderInterval {
    ReminderInterval::new(n).unwrap()
}

// ============================================================================
// Timing Tests
// ============================================================================

#[test]
fn test_first_reminder_fires_after_one_full_interval() {
    let clock = VirtualClock::new();
    let notifier = RecordingNotifier::new(clock.clone());
    let mut scheduler = Scheduler::with_clock(notifier.clone(), test_reminder(), clock.clone());

    scheduler.start(minutes(2)).unwrap();
    assert!(wait_until(WAIT_TIMEOUT, || notifier.count() >= 2));
    scheduler.stop();

    let calls = notifier.calls();
    assert_eq!(calls[0].at, Duration::from_secs(120));
    assert_eq!(calls[1].at, Duration::from_secs(240));
    assert_eq!(calls[0].body, "Time to stretch your neck!");
}

#[test]
fn test_nothing_fires_before_interval_elapses() {
    let clock = VirtualClock::new();
    let notifier = RecordingNotifier::new(clock.clone());
    let mut scheduler = Scheduler::with_clock(notifier.clone(), test_reminder(), clock.clone());

    scheduler.start(minutes(30)).unwrap();
    assert!(wait_until(WAIT_TIMEOUT, || {
        clock.elapsed() >= Duration::from_secs(60)
    }));
    scheduler.stop();

    for call in notifier.calls() {
        assert!(call.at >= Duration::from_secs(1800));
    }
}

// ============================================================================
// Start / Stop Tests
// ============================================================================

#[test]
fn test_no_reminders_after_stop_returns() {
    let clock = VirtualClock::new();
    let notifier = RecordingNotifier::new(clock.clone());
    let mut scheduler = Scheduler::with_clock(notifier.clone(), test_reminder(), clock.clone());

    scheduler.start(minutes(2)).unwrap();
    assert!(wait_until(WAIT_TIMEOUT, || notifier.count() >= 1));
    scheduler.stop();

    let count = notifier.count();
    let elapsed = clock.elapsed();
    thread::sleep(Duration::from_millis(50));

    assert_eq!(notifier.count(), count);
    assert_eq!(clock.elapsed(), elapsed);
    assert!(!scheduler.is_running());
    assert_eq!(scheduler.interval(), None);
}

#[test]
fn test_dropping_running_scheduler_stops_timer() {
    let clock = VirtualClock::new();
    let notifier = RecordingNotifier::new(clock.clone());
    let mut scheduler = Scheduler::with_clock(notifier.clone(), test_reminder(), clock.clone());

    scheduler.start(minutes(2)).unwrap();
    assert!(wait_until(WAIT_TIMEOUT, || notifier.count() >= 1));
    drop(scheduler);

    let count = notifier.count();
    let elapsed = clock.elapsed();
    thread::sleep(Duration::from_millis(50));

    assert_eq!(notifier.count(), count);
    assert_eq!(clock.elapsed(), elapsed);
}

#[test]
fn test_stop_when_idle_is_noop() {
    let clock = VirtualClock::new();
    let notifier = RecordingNotifier::new(clock.clone());
    let mut scheduler = Scheduler::with_clock(notifier.clone(), test_reminder(), clock.clone());

    scheduler.stop();
    scheduler.stop();

    assert!(!scheduler.is_running());
    assert_eq!(notifier.count(), 0);
}

#[test]
fn test_restart_replaces_the_running_timer() {
    let clock = VirtualClock::new();
    let notifier = RecordingNotifier::new(clock.clone());
    let mut scheduler = Scheduler::with_clock(notifier.clone(), test_reminder(), clock.clone());

    scheduler.start(minutes(2)).unwrap();
    assert!(wait_until(WAIT_TIMEOUT, || notifier.count() >= 1));
    let old_thread = notifier.calls()[0].thread;

    scheduler.start(minutes(3)).unwrap();
    assert_eq!(scheduler.interval(), Some(minutes(3)));
    let before = notifier.count();
    assert!(wait_until(WAIT_TIMEOUT, || notifier.count() >= before + 2));
    scheduler.stop();

    let after_restart = &notifier.calls()[before..];
    let new_thread = after_restart[0].thread;
    assert_ne!(new_thread, old_thread);
    assert!(after_restart.iter().all(|call| call.thread == new_thread));
    assert_eq!(
        after_restart[1].at - after_restart[0].at,
        Duration::from_secs(180)
    );
}

#[test]
fn test_timer_runs_off_the_calling_thread() {
    let clock = VirtualClock::new();
    let notifier = RecordingNotifier::new(clock.clone());
    let mut scheduler = Scheduler::with_clock(notifier.clone(), test_reminder(), clock.clone());

    scheduler.start(minutes(2)).unwrap();
    assert!(wait_until(WAIT_TIMEOUT, || notifier.count() >= 1));
    scheduler.stop();

    assert_ne!(notifier.calls()[0].thread, thread::current().id());
}

// ============================================================================
// Failure Tests
// ============================================================================

#[test]
fn test_failed_notification_does_not_end_the_stream() {
    let clock = VirtualClock::new();
    let notifier = RecordingNotifier::failing(clock.clone());
    let mut scheduler = Scheduler::with_clock(notifier.clone(), test_reminder(), clock.clone());

    scheduler.start(minutes(2)).unwrap();
    assert!(wait_until(WAIT_TIMEOUT, || notifier.count() >= 3));
    assert!(scheduler.is_running());
    scheduler.stop();

    let calls = notifier.calls();
    assert_eq!(calls[2].at, Duration::from_secs(360));
}
