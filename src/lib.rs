pub mod app;
pub mod autostart;
pub mod bootstrap;
pub mod config;
pub mod control;
pub mod gui;
pub mod i18n;
pub mod icon;
pub mod instance;
pub mod logging;
pub mod notifier;
pub mod scheduler;
pub mod settings;

// Platform-specific tray implementations:
// - Linux: ksni (KDE StatusNotifierItem) for native KDE/freedesktop support
// - Windows/macOS: tray-icon crate
#[cfg(target_os = "linux")]
#[path = "tray_linux.rs"]
pub mod tray;

#[cfg(not(target_os = "linux"))]
pub mod tray;
