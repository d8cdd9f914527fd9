//! Linux-specific tray implementation using ksni (KDE StatusNotifierItem).
//!
//! ksni serves the icon from its own D-Bus thread. Menu activations run on
//! that thread and are carried out there, without waiting for a UI frame.

use ksni::blocking::TrayMethods;
use ksni::menu::{MenuItem, StandardItem};
use thiserror::Error;

use crate::config::ReminderInterval;
use crate::control::{UiRequest, UiSender};
use crate::i18n::Strings;
use crate::icon::{self, IconError};

#[derive(Debug, Error)]
pub enum TrayError {
    #[error("failed to load tray icon: {0}")]
    Icon(#[from] IconError),
    #[error("ksni spawn failed: {0}")]
    Spawn(String),
}

/// The ksni tray implementation.
struct NeckTray {
    strings: &'static Strings,
    interval: ReminderInterval,
    pixmap: Vec<ksni::Icon>,
    sender: UiSender,
}

impl ksni::Tray for NeckTray {
    // Make left-click open the menu (same as right-click)
    const MENU_ON_ACTIVATE: bool = true;

    fn id(&self) -> String {
        "neck-protector".into()
    }

    fn icon_name(&self) -> String {
        "neck-protector".into()
    }

    fn icon_pixmap(&self) -> Vec<ksni::Icon> {
        self.pixmap.clone()
    }

    fn title(&self) -> String {
        self.strings.app_title.into()
    }

    fn tool_tip(&self) -> ksni::ToolTip {
        ksni::ToolTip {
            icon_name: String::new(),
            icon_pixmap: vec![],
            title: self.strings.app_title.into(),
            description: format!("{} min", self.interval.minutes()),
        }
    }

    fn menu(&self) -> Vec<MenuItem<Self>> {
        vec![
            StandardItem {
                label: self.strings.open.into(),
                activate: Box::new(|tray: &mut Self| {
                    tracing::debug!("Open requested from tray menu");
                    tray.sender.post(UiRequest::ShowMain);
                }),
                ..Default::default()
            }
            .into(),
            MenuItem::Separator,
            StandardItem {
                label: self.strings.exit.into(),
                activate: Box::new(|tray: &mut Self| {
                    tracing::info!("Exit requested from tray menu");
                    tray.sender.post(UiRequest::Exit);
                }),
                ..Default::default()
            }
            .into(),
        ]
    }
}

fn load_pixmap() -> Result<Vec<ksni::Icon>, IconError> {
    let image = icon::resized(&icon::bundled_rgba()?, icon::ICON_SIZE);
    let (width, height) = image.dimensions();
    Ok(vec![ksni::Icon {
        width: width as i32,
        height: height as i32,
        data: icon::to_argb32(&image),
    }])
}

/// Handle to the tray icon, usable from any thread.
pub struct Tray {
    handle: ksni::blocking::Handle<NeckTray>,
}

impl Tray {
    /// Spawns the StatusNotifierItem service with "Open" and "Exit" items that
    /// post to `sender`.
    pub fn new(
        strings: &'static Strings,
        interval: ReminderInterval,
        sender: UiSender,
    ) -> Result<Self, TrayError> {
        let tray = NeckTray {
            strings,
            interval,
            pixmap: load_pixmap()?,
            sender,
        };

        let handle = tray
            .spawn()
            .map_err(|e| TrayError::Spawn(e.to_string()))?;

        tracing::info!("System tray initialized (ksni/StatusNotifierItem)");

        Ok(Tray { handle })
    }

    pub fn set_interval(&self, interval: ReminderInterval) {
        let _ = self.handle.update(|tray| tray.interval = interval);
    }

    /// Stops the tray service and removes the icon. Does not wait for the
    /// service thread, so it is safe to call from a menu activation.
    pub fn shutdown(&self) {
        let _ = self.handle.shutdown();
        tracing::info!("System tray removed");
    }
}
