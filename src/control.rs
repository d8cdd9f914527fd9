//! Tray requests and the code that carries them out.
//!
//! Requests are handled on whatever thread the tray reports them from, without
//! waiting for a UI frame. A hidden window may never be repainted, so anything
//! that has to work while the app sits in the tray goes through a [`Shell`]
//! that can act on the native window and the process directly.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiRequest {
    /// Show, raise and focus the main window.
    ShowMain,
    /// Stop reminders, remove the tray icon and end the app.
    Exit,
}

/// The parts of the running app a tray request can touch.
///
/// Called from the tray's thread: the event loop thread on Windows and macOS,
/// ksni's D-Bus thread on Linux.
pub trait Shell: Send + Sync {
    fn show_main(&self);
    fn stop_reminders(&self);
    fn remove_tray(&self);
    /// Ends the UI. The real shell does not return from this.
    fn close_ui(&self);
}

impl<S: Shell + ?Sized> Shell for Arc<S> {
    fn show_main(&self) {
        (**self).show_main()
    }

    fn stop_reminders(&self) {
        (**self).stop_reminders()
    }

    fn remove_tray(&self) {
        (**self).remove_tray()
    }

    fn close_ui(&self) {
        (**self).close_ui()
    }
}

/// Dispatches tray requests to a [`Shell`].
pub struct Controller<S> {
    shell: S,
    exiting: AtomicBool,
}

impl<S: Shell> Controller<S> {
    pub fn new(shell: S) -> Self {
        Self {
            shell,
            exiting: AtomicBool::new(false),
        }
    }

    pub fn shell(&self) -> &S {
        &self.shell
    }

    /// Whether Exit has started. Every later request is ignored.
    pub fn is_exiting(&self) -> bool {
        self.exiting.load(Ordering::SeqCst)
    }

    pub fn handle(&self, request: UiRequest) {
        match request {
            UiRequest::ShowMain => {
                if self.is_exiting() {
                    tracing::debug!("Ignoring Open while exiting");
                    return;
                }
                tracing::debug!("Showing main window");
                self.shell.show_main();
            }
            UiRequest::Exit => {
                if self.exiting.swap(true, Ordering::SeqCst) {
                    tracing::debug!("Exit already in progress");
                    return;
                }
                tracing::info!("Exiting: stopping reminders, removing tray, closing UI");
                self.shell.stop_reminders();
                self.shell.remove_tray();
                self.shell.close_ui();
            }
        }
    }
}

type Handler = Arc<dyn Fn(UiRequest) + Send + Sync>;

/// Cloneable handle the tray uses to report menu activations.
#[derive(Clone)]
pub struct UiSender {
    handler: Handler,
}

impl fmt::Debug for UiSender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiSender").finish_non_exhaustive()
    }
}

impl UiSender {
    pub fn new(handler: impl Fn(UiRequest) + Send + Sync + 'static) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }

    /// Sender that hands every request to `controller` while it is alive.
    ///
    /// Holds a weak reference: the shell owns the tray, which owns the sender.
    pub fn to_controller<S: Shell + 'static>(controller: &Arc<Controller<S>>) -> Self {
        let controller = Arc::downgrade(controller);
        Self::new(move |request| match controller.upgrade() {
            Some(controller) => controller.handle(request),
            None => tracing::debug!(?request, "Tray request after shutdown, ignoring"),
        })
    }

    pub fn post(&self, request: UiRequest) {
        (self.handler)(request);
    }
}
