//! Settings window state, independent of the UI toolkit.
//!
//! The window holds a slider value and resolves to one of two outcomes: keep
//! the slider value ([`CloseDecision::Save`]) or throw it away
//! ([`CloseDecision::Discard`]). A window-manager close does not resolve on
//! its own; it opens a yes/no confirmation first.

use crate::config::ReminderInterval;

/// Input from the settings window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsEvent {
    /// Save button.
    Save,
    /// Cancel button.
    Cancel,
    /// Window-manager close button.
    CloseRequested,
    /// "Yes" in the save confirmation.
    ConfirmSave,
    /// "No" in the save confirmation.
    ConfirmDiscard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseDecision {
    Save(ReminderInterval),
    Discard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Window stays open.
    Stay,
    /// Window must be destroyed after applying the decision.
    Close(CloseDecision),
}

#[derive(Debug)]
pub struct SettingsWindow {
    slider: u32,
    confirming: bool,
    focus_requested: bool,
}

impl SettingsWindow {
    /// A freshly opened window. It asks for focus on its first frame.
    pub fn new(current: ReminderInterval) -> Self {
        Self {
            slider: current.minutes(),
            confirming: false,
            focus_requested: true,
        }
    }

    /// Raw slider value for the toolkit to bind to.
    pub fn slider_mut(&mut self) -> &mut u32 {
        &mut self.slider
    }

    pub fn selected(&self) -> ReminderInterval {
        ReminderInterval::clamped(self.slider)
    }

    /// Whether the "Save changes?" prompt is showing.
    pub fn is_confirming(&self) -> bool {
        self.confirming
    }

    pub fn request_focus(&mut self) {
        self.focus_requested = true;
    }

    /// Returns a pending focus request once, clearing it.
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }

    pub fn handle(&mut self, event: SettingsEvent) -> Transition {
        match (self.confirming, event) {
            (false, SettingsEvent::Save) => Transition::Close(CloseDecision::Save(self.selected())),
            (false, SettingsEvent::Cancel) => Transition::Close(CloseDecision::Discard),
            (false, SettingsEvent::CloseRequested) => {
                self.confirming = true;
                Transition::Stay
            }
            (true, SettingsEvent::ConfirmSave) => {
                self.confirming = false;
                Transition::Close(CloseDecision::Save(self.selected()))
            }
            (true, SettingsEvent::ConfirmDiscard) => {
                self.confirming = false;
                Transition::Close(CloseDecision::Discard)
            }
            // The prompt is modal; everything else waits for an answer
            (true, _) | (false, SettingsEvent::ConfirmSave | SettingsEvent::ConfirmDiscard) => {
                Transition::Stay
            }
        }
    }
}
