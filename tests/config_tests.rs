// Tests for ReminderInterval and IntervalStore in src/config.rs

use std::fs;

use neck_protector::config::{IntervalStore, ParseIntervalError, ReminderInterval};
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> IntervalStore {
    IntervalStore::at(dir.path().join("saved_time.txt"))
}

// ============================================================================
// ReminderInterval Tests
// ============================================================================

#[test]
fn test_interval_range_bounds() {
    assert_eq!(ReminderInterval::new(1), None);
    assert_eq!(ReminderInterval::new(2).map(|i| i.minutes()), Some(2));
    assert_eq!(ReminderInterval::new(30).map(|i| i.minutes()), Some(30));
    assert_eq!(ReminderInterval::new(31), None);
}

#[test]
fn test_interval_default_is_two_minutes() {
    assert_eq!(ReminderInterval::default().minutes(), 2);
    assert_eq!(ReminderInterval::DEFAULT.as_secs(), 120);
}

#[test]
fn test_interval_clamped() {
    assert_eq!(ReminderInterval::clamped(0).minutes(), 2);
    assert_eq!(ReminderInterval::clamped(17).minutes(), 17);
    assert_eq!(ReminderInterval::clamped(500).minutes(), 30);
}

#[test]
fn test_interval_parse_trims_whitespace() {
    let interval: ReminderInterval = " 15\n".parse().unwrap();
    assert_eq!(interval.minutes(), 15);
}

#[test]
fn test_interval_parse_errors() {
    assert_eq!(
        "".parse::<ReminderInterval>(),
        Err(ParseIntervalError::NotANumber(String::new()))
    );
    assert_eq!(
        "ten".parse::<ReminderInterval>(),
        Err(ParseIntervalError::NotANumber("ten".to_string()))
    );
    assert_eq!(
        "2.5".parse::<ReminderInterval>(),
        Err(ParseIntervalError::NotANumber("2.5".to_string()))
    );
    assert_eq!(
        "31".parse::<ReminderInterval>(),
        Err(ParseIntervalError::OutOfRange(31))
    );
}

#[test]
fn test_interval_display_is_plain_decimal() {
    assert_eq!(ReminderInterval::new(9).unwrap().to_string(), "9");
}

// ============================================================================
// IntervalStore Tests
// ============================================================================

#[test]
fn test_save_then_load_every_valid_interval() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    for minutes in ReminderInterval::MIN_MINUTES..=ReminderInterval::MAX_MINUTES {
        let interval = ReminderInterval::new(minutes).unwrap();
        store.save(interval).unwrap();
        assert_eq!(store.load(), interval);
    }
}

#[test]
fn test_save_writes_decimal_text() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    store.save(ReminderInterval::new(12).unwrap()).unwrap();

    assert_eq!(fs::read_to_string(store.path()).unwrap(), "12");
}

#[test]
fn test_save_creates_missing_directories() {
    let dir = TempDir::new().unwrap();
    let store = IntervalStore::at(dir.path().join("Neck Protector").join("saved_time.txt"));

    store.save(ReminderInterval::new(4).unwrap()).unwrap();

    assert_eq!(store.load().minutes(), 4);
}

#[test]
fn test_load_missing_file_returns_default() {
    let dir = TempDir::new().unwrap();

    assert_eq!(store_in(&dir).load(), ReminderInterval::DEFAULT);
}

#[test]
fn test_load_invalid_contents_returns_default() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    for contents in ["", "abc", "-3", "1", "31", "99999999999"] {
        fs::write(store.path(), contents).unwrap();
        assert_eq!(store.load(), ReminderInterval::DEFAULT, "contents: {contents:?}");
    }
}

#[test]
fn test_load_tolerates_trailing_newline() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    fs::write(store.path(), "20\r\n").unwrap();

    assert_eq!(store.load().minutes(), 20);
}

#[test]
fn test_save_into_unwritable_location_fails() {
    let dir = TempDir::new().unwrap();
    // A regular file where the parent directory should be
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "").unwrap();
    let store = IntervalStore::at(blocker.join("saved_time.txt"));

    assert!(store.save(ReminderInterval::DEFAULT).is_err());
}
