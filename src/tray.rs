//! System tray implementation using tray-icon (Windows/macOS).
//!
//! This module is only compiled on non-Linux platforms.
//! Linux uses the ksni-based implementation in tray_linux.rs.
//!
//! `TrayIcon` is tied to the thread running the event loop, so the icon itself
//! lives in a thread-local there and [`Tray`] is only a handle to it. Menu
//! callbacks run on that same thread.

use std::cell::RefCell;

use thiserror::Error;
use tray_icon::{
    menu::{Menu, MenuEvent, MenuItem},
    Icon, TrayIcon, TrayIconBuilder,
};

use crate::config::ReminderInterval;
use crate::control::{UiRequest, UiSender};
use crate::i18n::Strings;
use crate::icon::{self, IconError};

#[derive(Debug, Error)]
pub enum TrayError {
    #[error("failed to load tray icon: {0}")]
    Icon(#[from] IconError),
    #[error("invalid tray icon pixels: {0}")]
    BadIcon(#[from] tray_icon::BadIcon),
    #[error("failed to build tray menu: {0}")]
    Menu(#[from] tray_icon::menu::Error),
    #[error("failed to create tray icon: {0}")]
    Build(#[from] tray_icon::Error),
}

thread_local! {
    static TRAY_ICON: RefCell<Option<TrayIcon>> = const { RefCell::new(None) };
}

fn tooltip(strings: &Strings, interval: ReminderInterval) -> String {
    format!("{} ({} min)", strings.app_title, interval.minutes())
}

/// Handle to the process's single tray icon. Create it on the event loop
/// thread; every method is a no-op when called from any other thread.
#[derive(Debug)]
pub struct Tray {
    strings: &'static Strings,
}

impl Tray {
    /// Creates the icon with "Open" and "Exit" items that post to `sender`.
    pub fn new(
        strings: &'static Strings,
        interval: ReminderInterval,
        sender: UiSender,
    ) -> Result<Self, TrayError> {
        let open_item = MenuItem::new(strings.open, true, None);
        let exit_item = MenuItem::new(strings.exit, true, None);
        let open_item_id = open_item.id().clone();
        let exit_item_id = exit_item.id().clone();

        let menu = Menu::new();
        menu.append(&open_item)?;
        menu.append(&exit_item)?;

        let tray_icon = TrayIconBuilder::new()
            .with_menu(Box::new(menu))
            .with_tooltip(tooltip(strings, interval))
            .with_icon(Self::load_icon()?)
            .build()?;

        // Runs on the event loop thread even while every window is hidden
        MenuEvent::set_event_handler(Some(move |event: MenuEvent| {
            if event.id == open_item_id {
                tracing::debug!("Open requested from tray menu");
                sender.post(UiRequest::ShowMain);
            } else if event.id == exit_item_id {
                tracing::info!("Exit requested from tray menu");
                sender.post(UiRequest::Exit);
            }
        }));

        TRAY_ICON.with_borrow_mut(|slot| *slot = Some(tray_icon));
        tracing::info!("System tray initialized");

        Ok(Tray { strings })
    }

    fn load_icon() -> Result<Icon, TrayError> {
        let image = icon::resized(&icon::bundled_rgba()?, icon::ICON_SIZE);
        let (width, height) = image.dimensions();
        Ok(Icon::from_rgba(image.into_raw(), width, height)?)
    }

    pub fn set_interval(&self, interval: ReminderInterval) {
        TRAY_ICON.with_borrow(|slot| {
            if let Some(tray_icon) = slot {
                let _ = tray_icon.set_tooltip(Some(tooltip(self.strings, interval)));
            }
        });
    }

    /// Removes the icon from the notification area.
    ///
    /// Hidden rather than dropped: this runs inside the icon's own menu
    /// callback, and the process ends right after.
    pub fn shutdown(&self) {
        let removed = TRAY_ICON.with_borrow(|slot| match slot {
            Some(tray_icon) => {
                if let Err(e) = tray_icon.set_visible(false) {
                    tracing::warn!(error = %e, "Failed to hide tray icon");
                }
                true
            }
            None => false,
        });
        if removed {
            tracing::info!("System tray removed");
        }
    }
}
