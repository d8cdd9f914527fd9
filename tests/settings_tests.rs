// Tests for SettingsWindow in src/settings.rs

use neck_protector::config::ReminderInterval;
use neck_protector::settings::{CloseDecision, SettingsEvent, SettingsWindow, Transition};

fn minutes(n: u32) -> ReminderInterval {
    ReminderInterval::new(n).unwrap()
}

// ============================================================================
// Button Tests
// ============================================================================

#[test]
fn test_new_window_starts_at_current_interval() {
    let mut window = SettingsWindow::new(minutes(7));

    assert_eq!(window.selected(), minutes(7));
    assert_eq!(*window.slider_mut(), 7);
    assert!(!window.is_confirming());
}

#[test]
fn test_save_closes_with_slider_value() {
    let mut window = SettingsWindow::new(minutes(2));
    *window.slider_mut() = 12;

    assert_eq!(window.selected(), minutes(12));
    assert_eq!(
        window.handle(SettingsEvent::Save),
        Transition::Close(CloseDecision::Save(minutes(12)))
    );
}

#[test]
fn test_save_without_changes_still_saves() {
    let mut window = SettingsWindow::new(minutes(5));

    assert_eq!(
        window.handle(SettingsEvent::Save),
        Transition::Close(CloseDecision::Save(minutes(5)))
    );
}

#[test]
fn test_cancel_discards_slider_value() {
    let mut window = SettingsWindow::new(minutes(2));
    *window.slider_mut() = 20;

    assert_eq!(
        window.handle(SettingsEvent::Cancel),
        Transition::Close(CloseDecision::Discard)
    );
}

#[test]
fn test_out_of_range_slider_value_is_clamped() {
    let mut window = SettingsWindow::new(minutes(10));

    *window.slider_mut() = 0;
    assert_eq!(window.selected(), minutes(2));

    *window.slider_mut() = 99;
    assert_eq!(window.selected(), minutes(30));
}

// ============================================================================
// Close Confirmation Tests
// ============================================================================

#[test]
fn test_close_request_opens_confirmation() {
    let mut window = SettingsWindow::new(minutes(2));

    assert_eq!(window.handle(SettingsEvent::CloseRequested), Transition::Stay);
    assert!(window.is_confirming());
}

#[test]
fn test_close_request_prompts_even_without_changes() {
    let mut window = SettingsWindow::new(minutes(4));

    assert_eq!(window.selected(), minutes(4));
    assert_eq!(window.handle(SettingsEvent::CloseRequested), Transition::Stay);
    assert!(window.is_confirming());
}

#[test]
fn test_confirm_yes_saves() {
    let mut window = SettingsWindow::new(minutes(2));
    *window.slider_mut() = 15;
    window.handle(SettingsEvent::CloseRequested);

    assert_eq!(
        window.handle(SettingsEvent::ConfirmSave),
        Transition::Close(CloseDecision::Save(minutes(15)))
    );
    assert!(!window.is_confirming());
}

#[test]
fn test_confirm_no_discards() {
    let mut window = SettingsWindow::new(minutes(2));
    *window.slider_mut() = 15;
    window.handle(SettingsEvent::CloseRequested);

    assert_eq!(
        window.handle(SettingsEvent::ConfirmDiscard),
        Transition::Close(CloseDecision::Discard)
    );
}

#[test]
fn test_buttons_ignored_while_confirming() {
    let mut window = SettingsWindow::new(minutes(2));
    window.handle(SettingsEvent::CloseRequested);

    assert_eq!(window.handle(SettingsEvent::Save), Transition::Stay);
    assert_eq!(window.handle(SettingsEvent::Cancel), Transition::Stay);
    assert_eq!(window.handle(SettingsEvent::CloseRequested), Transition::Stay);
    assert!(window.is_confirming());
}

#[test]
fn test_confirm_answers_ignored_without_prompt() {
    let mut window = SettingsWindow::new(minutes(2));

    assert_eq!(window.handle(SettingsEvent::ConfirmSave), Transition::Stay);
    assert_eq!(window.handle(SettingsEvent::ConfirmDiscard), Transition::Stay);
    assert!(!window.is_confirming());
}

// ============================================================================
// Focus Tests
// ============================================================================

#[test]
fn test_focus_request_is_taken_once() {
    let mut window = SettingsWindow::new(minutes(2));

    assert!(window.take_focus_request());
    assert!(!window.take_focus_request());

    window.request_focus();
    assert!(window.take_focus_request());
    assert!(!window.take_focus_request());
}
