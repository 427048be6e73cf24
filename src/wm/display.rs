//! Display Module
//!
//! The requests the window manager sends to the display server. The X11
//! implementation lives in `wm::x11`; tests use a recording fake.

use crate::error::WmError;
use crate::shared::Vector2D;
use crate::wm::client::WindowId;

/// Which pair of values a configure request carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigAxes {
    /// `[width, height]`
    Size,
    /// `[x, y]`, each an `i32` stored as its bit pattern
    Position,
}

/// Display server operations used by the window manager.
///
/// Write requests are queued until [`DisplayServer::flush`]. A request that
/// fails because the connection broke must make [`DisplayServer::has_error`]
/// return `true` from then on.
pub trait DisplayServer {
    /// The connection is unusable
    fn has_error(&self) -> bool;

    fn configure(&self, window: WindowId, axes: ConfigAxes, values: &[u32; 2]) -> Result<(), WmError>;

    fn set_input_focus(&self, window: WindowId) -> Result<(), WmError>;

    fn map_window(&self, window: WindowId) -> Result<(), WmError>;

    /// Ask for enter notifications on `window`
    fn select_enter_events(&self, window: WindowId) -> Result<(), WmError>;

    /// Current `(position, size)` as known by the server
    fn geometry(&self, window: WindowId) -> Result<(Vector2D, Vector2D), WmError>;

    /// Whether `window` declares itself transient for another window
    fn is_transient(&self, window: WindowId) -> Result<bool, WmError>;

    /// WM_CLASS instance and class names
    fn window_class(&self, window: WindowId) -> Result<Vec<String>, WmError>;

    fn flush(&self) -> Result<(), WmError>;
}
