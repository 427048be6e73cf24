//! Screen Module
//!
//! Root window and screen dimensions used as the tiling area.

use crate::shared::Vector2D;
use crate::wm::client::WindowId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenInfo {
    pub root: WindowId,
    pub width: u16,
    pub height: u16,
}

impl ScreenInfo {
    pub fn new(root: WindowId, width: u16, height: u16) -> Self {
        Self { root, width, height }
    }

    pub fn size(&self) -> Vector2D {
        Vector2D::from((self.width, self.height))
    }

    /// Half-screen rectangle in the middle of the screen
    pub fn centered_half(&self) -> (Vector2D, Vector2D) {
        let size = self.size() / 2.0;
        ((self.size() - size) / 2.0, size)
    }
}
