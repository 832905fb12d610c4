//! Notifying the application that the map must be redrawn.

/// Requests a repaint from the windowing shell.
///
/// The engine never draws on its own schedule. Whenever its state changes in
/// a way that affects the picture it calls [`Messenger::request_redraw`], and
/// the shell coalesces those requests into actual paint events. Background
/// threads hold their own handle to the messenger, so the bound is
/// `Send + Sync`.
pub trait Messenger: Send + Sync {
    /// Notifies the application that the map image must be redrawn.
    fn request_redraw(&self);
}

/// Messenger that ignores all requests.
///
/// Useful for tests and for headless rendering, where frames are composed on
/// demand and nobody is listening for repaint requests.
#[derive(Debug, Default, Clone, Copy)]
pub struct DummyMessenger;

impl Messenger for DummyMessenger {
    fn request_redraw(&self) {}
}
