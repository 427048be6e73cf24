use std::fmt;

use crate::shared::Vector2D;

/// X11 window handle.
///
/// Opaque and copyable. The WM never owns the underlying window and never
/// destroys it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WindowId(pub u32);

impl WindowId {
    /// The null handle (X11 `None`)
    pub const NONE: Self = Self(0);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

/// Window Manager client state
/// Represents a window being managed by the WM
#[derive(Debug, Clone, PartialEq)]
pub struct Client {
    /// X11 window ID
    pub id: WindowId,

    /// Top-left corner in root coordinates
    pub position: Vector2D,

    pub size: Vector2D,

    /// Floating windows are skipped by the tiler
    pub floating: bool,

    /// Geometry differs from what the X server has
    pub dirty: bool,
}

impl Client {
    pub fn new(id: WindowId) -> Self {
        Self {
            id,
            position: Vector2D::ZERO,
            size: Vector2D::ZERO,
            floating: false,
            dirty: false,
        }
    }

    pub fn floating(id: WindowId, position: Vector2D, size: Vector2D) -> Self {
        Self {
            id,
            position,
            size,
            floating: true,
            dirty: false,
        }
    }

    /// Bottom-right corner
    pub fn far_corner(&self) -> Vector2D {
        self.position + self.size
    }
}
