//! eframe front end.
//!
//! The root viewport is the main window. Settings and usage are immediate
//! child viewports shown while [`AppContext`] reports them live; dropping
//! them from the context is what destroys them.
//!
//! Tray requests never wait for a frame: a window hidden in the tray may not
//! be repainted at all. [`DesktopShell`] carries them out from the tray's
//! thread, raising the native window directly where the platform allows and
//! ending the process itself on Exit.

use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use eframe::egui::{
    self, RichText, ViewportBuilder, ViewportClass, ViewportCommand, ViewportId,
};
use tracing_appender::non_blocking::WorkerGuard;

use crate::app::AppContext;
use crate::config::ReminderInterval;
use crate::control::{Controller, Shell, UiSender};
use crate::icon;
use crate::scheduler::Scheduler;
use crate::settings::{CloseDecision, SettingsEvent};
use crate::tray::Tray;

const MAIN_SIZE: [f32; 2] = [600.0, 600.0];
const SETTINGS_SIZE: [f32; 2] = [400.0, 300.0];
const USAGE_SIZE: [f32; 2] = [420.0, 320.0];
const LOGO_SIZE: f32 = 128.0;

#[cfg(target_os = "windows")]
const PRIORITY_SETTINGS_URI: &str = "ms-settings:quiethours-priorities-apps";

// egui's bundled fonts have no Hangul glyphs
const FALLBACK_FONT_PATHS: &[&str] = &[
    r"C:\Windows\Fonts\malgun.ttf",
    "/System/Library/Fonts/AppleSDGothicNeo.ttc",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
];

/// Runs the UI event loop on the current thread until exit.
///
/// `log_guard` is flushed before the process ends from the tray's Exit, which
/// does not return here.
pub fn run(
    app: AppContext,
    start_visible: bool,
    log_guard: Option<WorkerGuard>,
) -> eframe::Result<()> {
    let title = app.strings().app_title;

    let mut viewport = ViewportBuilder::default()
        .with_title(title)
        .with_inner_size(MAIN_SIZE)
        .with_resizable(false)
        .with_maximize_button(false)
        .with_visible(start_visible);
    if let Some(icon) = window_icon() {
        viewport = viewport.with_icon(icon);
    }

    let options = eframe::NativeOptions {
        viewport,
        centered: true,
        ..Default::default()
    };

    eframe::run_native(
        title,
        options,
        Box::new(move |cc| Ok(Box::new(NeckProtectorApp::new(cc, app, log_guard)))),
    )
}

fn window_icon() -> Option<egui::IconData> {
    match icon::bundled_rgba() {
        Ok(image) => Some(egui::IconData {
            width: image.width(),
            height: image.height(),
            rgba: image.into_raw(),
        }),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load window icon");
            None
        }
    }
}

fn install_fallback_font(ctx: &egui::Context) {
    let Some((path, bytes)) = FALLBACK_FONT_PATHS
        .iter()
        .find_map(|path| std::fs::read(path).ok().map(|bytes| (*path, bytes)))
    else {
        tracing::debug!("No CJK fallback font found");
        return;
    };

    let mut fonts = egui::FontDefinitions::default();
    fonts.font_data.insert(
        "cjk-fallback".to_owned(),
        Arc::new(egui::FontData::from_owned(bytes)),
    );
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .push("cjk-fallback".to_owned());
    }
    ctx.set_fonts(fonts);
    tracing::debug!(path, "Installed CJK fallback font");
}

fn settings_viewport_id() -> ViewportId {
    ViewportId::from_hash_of("neck-protector-settings")
}

fn usage_viewport_id() -> ViewportId {
    ViewportId::from_hash_of("neck-protector-usage")
}

/// Positions a child viewport in the middle of the current monitor.
fn centered(ctx: &egui::Context, builder: ViewportBuilder, size: [f32; 2]) -> ViewportBuilder {
    match ctx.input(|i| i.viewport().monitor_size) {
        Some(monitor) => builder.with_position(egui::pos2(
            ((monitor.x - size[0]) / 2.0).max(0.0),
            ((monitor.y - size[1]) / 2.0).max(0.0),
        )),
        None => builder,
    }
}

fn child_viewport(ctx: &egui::Context, title: &str, size: [f32; 2]) -> ViewportBuilder {
    centered(
        ctx,
        ViewportBuilder::default()
            .with_title(title)
            .with_inner_size(size)
            .with_resizable(false)
            .with_minimize_button(false)
            .with_maximize_button(false),
        size,
    )
}

/// Draws a child viewport's contents. Backends without multi-window support
/// embed it as an `egui::Window` instead.
///
/// Returns whether the user asked to close it.
fn viewport_body(
    ctx: &egui::Context,
    class: ViewportClass,
    title: &str,
    add_contents: impl FnOnce(&mut egui::Ui),
) -> bool {
    if matches!(class, ViewportClass::Embedded) {
        let mut open = true;
        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .open(&mut open)
            .show(ctx, add_contents);
        !open
    } else {
        egui::CentralPanel::default().show(ctx, add_contents);
        let close_requested = ctx.input(|i| i.viewport().close_requested());
        if close_requested {
            ctx.send_viewport_cmd(ViewportCommand::CancelClose);
        }
        close_requested
    }
}

fn menu_button(text: &str) -> egui::Button<'static> {
    egui::Button::new(RichText::new(text).size(14.0).strong()).min_size(egui::vec2(120.0, 36.0))
}

/// Queues the commands that show and focus the main window. Safe from any
/// thread; they take effect on the next frame.
fn show_main(ctx: &egui::Context) {
    for command in [
        ViewportCommand::Visible(true),
        ViewportCommand::Minimized(false),
        ViewportCommand::Focus,
    ] {
        ctx.send_viewport_cmd_to(ViewportId::ROOT, command);
    }
    ctx.request_repaint();
}

#[cfg(target_os = "windows")]
fn native_window(cc: &eframe::CreationContext<'_>) -> Option<isize> {
    use raw_window_handle::{HasWindowHandle, RawWindowHandle};

    match cc.window_handle().map(|handle| handle.as_raw()) {
        Ok(RawWindowHandle::Win32(handle)) => Some(handle.hwnd.get()),
        Ok(_) => None,
        Err(e) => {
            tracing::warn!(error = %e, "No native handle for the main window");
            None
        }
    }
}

/// Shows, restores and raises the main window without going through winit.
#[cfg(target_os = "windows")]
fn raise_native(hwnd: isize) {
    use windows::Win32::Foundation::HWND;
    use windows::Win32::UI::WindowsAndMessaging::{
        SetForegroundWindow, ShowWindow, SW_RESTORE, SW_SHOW,
    };

    let hwnd = HWND(hwnd as _);
    // SAFETY: hwnd is the root window, which lives as long as the event loop
    // this is called from.
    unsafe {
        let _ = ShowWindow(hwnd, SW_SHOW);
        let _ = ShowWindow(hwnd, SW_RESTORE);
        let _ = SetForegroundWindow(hwnd);
    }
}

#[cfg(target_os = "windows")]
fn open_priority_settings() {
    use std::os::windows::process::CommandExt;
    const CREATE_NO_WINDOW: u32 = 0x0800_0000;

    let spawned = std::process::Command::new("cmd")
        .args(["/C", "start", "", PRIORITY_SETTINGS_URI])
        .creation_flags(CREATE_NO_WINDOW)
        .spawn();
    if let Err(e) = spawned {
        tracing::warn!(error = %e, "Failed to open notification priority settings");
    }
}

/// The running desktop app as seen from the tray.
struct DesktopShell {
    ctx: egui::Context,
    reminders: Arc<Mutex<Scheduler>>,
    tray: OnceLock<Tray>,
    #[cfg(target_os = "windows")]
    hwnd: Option<isize>,
    log_guard: Mutex<Option<WorkerGuard>>,
}

impl DesktopShell {
    fn tray(&self) -> Option<&Tray> {
        self.tray.get()
    }
}

impl Shell for DesktopShell {
    fn show_main(&self) {
        #[cfg(target_os = "windows")]
        if let Some(hwnd) = self.hwnd {
            raise_native(hwnd);
        }
        // Also keeps egui's idea of the window state in sync
        show_main(&self.ctx);
    }

    fn stop_reminders(&self) {
        self.reminders
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .stop();
    }

    fn remove_tray(&self) {
        if let Some(tray) = self.tray() {
            tray.shutdown();
        }
    }

    fn close_ui(&self) {
        tracing::info!("Neck Protector exited");
        drop(
            self.log_guard
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .take(),
        );
        std::process::exit(0);
    }
}

struct NeckProtectorApp {
    app: AppContext,
    controller: Arc<Controller<DesktopShell>>,
    logo: Option<egui::TextureHandle>,
    quitting: bool,
}

impl NeckProtectorApp {
    fn new(
        cc: &eframe::CreationContext<'_>,
        app: AppContext,
        log_guard: Option<WorkerGuard>,
    ) -> Self {
        let ctx = cc.egui_ctx.clone();
        ctx.set_visuals(egui::Visuals::dark());
        install_fallback_font(&ctx);

        let controller = Arc::new(Controller::new(DesktopShell {
            ctx: ctx.clone(),
            reminders: app.scheduler_handle(),
            tray: OnceLock::new(),
            #[cfg(target_os = "windows")]
            hwnd: native_window(cc),
            log_guard: Mutex::new(log_guard),
        }));

        // Created here so the tray lives on the event loop thread
        let sender = UiSender::to_controller(&controller);
        match Tray::new(app.strings(), app.interval(), sender) {
            Ok(tray) => {
                let _ = controller.shell().tray.set(tray);
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to create tray icon, showing main window");
                show_main(&ctx);
            }
        }

        let logo = match icon::bundled_rgba() {
            Ok(image) => {
                let size = [image.width() as usize, image.height() as usize];
                Some(ctx.load_texture(
                    "logo",
                    egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw()),
                    egui::TextureOptions::LINEAR,
                ))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load logo");
                None
            }
        };

        Self {
            app,
            controller,
            logo,
            quitting: false,
        }
    }

    fn main_window(&mut self, ctx: &egui::Context) {
        let strings = self.app.strings();
        let mut open_settings = false;
        let mut open_usage = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(30.0);
                ui.label(RichText::new(strings.app_title).size(28.0).strong());
                ui.add_space(30.0);
                if let Some(logo) = &self.logo {
                    ui.add(
                        egui::Image::new(logo).fit_to_exact_size(egui::vec2(LOGO_SIZE, LOGO_SIZE)),
                    );
                    ui.add_space(30.0);
                }
                open_usage = ui.add(menu_button(strings.usage)).clicked();
                ui.add_space(10.0);
                open_settings = ui.add(menu_button(strings.settings)).clicked();
            });
        });

        if open_settings {
            self.app.open_settings();
        }
        if open_usage {
            self.app.open_usage();
        }
    }

    fn settings_window(&mut self, ctx: &egui::Context) {
        let strings = self.app.strings();
        let builder = child_viewport(ctx, strings.settings, SETTINGS_SIZE);
        let Some(window) = self.app.settings_mut() else {
            return;
        };

        let mut event = None;
        ctx.show_viewport_immediate(settings_viewport_id(), builder, |ctx, class| {
            if window.take_focus_request() {
                ctx.send_viewport_cmd(ViewportCommand::Focus);
            }

            let confirming = window.is_confirming();
            let close_requested = viewport_body(ctx, class, strings.settings, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(30.0);
                    ui.label(RichText::new(strings.interval_label).size(16.0));
                    ui.add_space(10.0);
                    ui.add_enabled(
                        !confirming,
                        egui::Slider::new(
                            window.slider_mut(),
                            ReminderInterval::MIN_MINUTES..=ReminderInterval::MAX_MINUTES,
                        ),
                    );
                    ui.add_space(30.0);
                    ui.horizontal(|ui| {
                        if ui.add_enabled(!confirming, menu_button(strings.save)).clicked() {
                            event = Some(SettingsEvent::Save);
                        }
                        if ui.add_enabled(!confirming, menu_button(strings.cancel)).clicked() {
                            event = Some(SettingsEvent::Cancel);
                        }
                    });
                });
            });
            if close_requested {
                event = Some(SettingsEvent::CloseRequested);
            }

            if confirming {
                egui::Window::new(strings.save_confirm_title)
                    .collapsible(false)
                    .resizable(false)
                    .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                    .show(ctx, |ui| {
                        ui.label(strings.save_confirm);
                        ui.horizontal(|ui| {
                            if ui.button(strings.yes).clicked() {
                                event = Some(SettingsEvent::ConfirmSave);
                            }
                            if ui.button(strings.no).clicked() {
                                event = Some(SettingsEvent::ConfirmDiscard);
                            }
                        });
                    });
            }
        });

        let Some(event) = event else {
            return;
        };
        if let Some(CloseDecision::Save(_)) = self.app.handle_settings_event(event) {
            if let Some(tray) = self.controller.shell().tray() {
                tray.set_interval(self.app.interval());
            }
        }
    }

    fn usage_window(&mut self, ctx: &egui::Context) {
        let strings = self.app.strings();
        let builder = child_viewport(ctx, strings.usage_title, USAGE_SIZE);
        let Some(window) = self.app.usage_mut() else {
            return;
        };

        let mut close = false;
        ctx.show_viewport_immediate(usage_viewport_id(), builder, |ctx, class| {
            if window.take_focus_request() {
                ctx.send_viewport_cmd(ViewportCommand::Focus);
            }

            let close_requested = viewport_body(ctx, class, strings.usage_title, |ui| {
                ui.add_space(24.0);
                ui.label(RichText::new(strings.usage_text).size(14.0));
                ui.add_space(16.0);
                ui.vertical_centered(|ui| {
                    #[cfg(target_os = "windows")]
                    if ui.add(menu_button(strings.open_priority)).clicked() {
                        open_priority_settings();
                    }
                    if ui.add(menu_button(strings.close)).clicked() {
                        close = true;
                    }
                });
            });
            if close_requested {
                close = true;
            }
        });

        if close {
            self.app.close_usage();
        }
    }
}

impl eframe::App for NeckProtectorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.quitting || self.controller.is_exiting() {
            return;
        }

        if ctx.input(|i| i.viewport().close_requested()) {
            if self.controller.shell().tray().is_some() {
                // The main window only hides; Exit lives in the tray menu
                ctx.send_viewport_cmd(ViewportCommand::CancelClose);
                ctx.send_viewport_cmd(ViewportCommand::Visible(false));
            } else {
                // Without a tray a hidden window would be unreachable
                self.quitting = true;
                self.app.shutdown();
                return;
            }
        }

        self.main_window(ctx);
        self.settings_window(ctx);
        self.usage_window(ctx);
    }
}
