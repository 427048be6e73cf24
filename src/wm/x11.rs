//! X11 Module
//!
//! `DisplayServer` implementation on top of an x11rb connection, and the
//! startup steps that make this client the window manager.

use std::cell::Cell;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};
use x11rb::connection::Connection;
use x11rb::protocol::xproto::*;
use x11rb::rust_connection::RustConnection;

use crate::error::WmError;
use crate::shared::Vector2D;
use crate::wm::client::WindowId;
use crate::wm::display::{ConfigAxes, DisplayServer};
use crate::wm::screen::ScreenInfo;

/// AnyKey for key (un)grabs
const ANY_KEY: u8 = 0;

pub struct X11Display {
    conn: Arc<RustConnection>,
    /// Latched once any request fails with a connection error
    broken: Cell<bool>,
}

impl X11Display {
    pub fn new(conn: Arc<RustConnection>) -> Self {
        Self {
            conn,
            broken: Cell::new(false),
        }
    }

    fn check<T, E: Into<WmError>>(&self, result: Result<T, E>) -> Result<T, WmError> {
        result.map_err(|e| {
            let e = e.into();
            if e.is_connection_error() && !self.broken.replace(true) {
                warn!("X11 connection broken: {}", e);
            }
            e
        })
    }
}

impl DisplayServer for X11Display {
    fn has_error(&self) -> bool {
        self.broken.get()
    }

    fn configure(&self, window: WindowId, axes: ConfigAxes, values: &[u32; 2]) -> Result<(), WmError> {
        let aux = match axes {
            ConfigAxes::Size => ConfigureWindowAux::new().width(values[0]).height(values[1]),
            ConfigAxes::Position => ConfigureWindowAux::new()
                .x(values[0] as i32)
                .y(values[1] as i32),
        };
        self.check(self.conn.configure_window(window.0, &aux))?;
        Ok(())
    }

    fn set_input_focus(&self, window: WindowId) -> Result<(), WmError> {
        self.check(self.conn.set_input_focus(
            InputFocus::POINTER_ROOT,
            window.0,
            x11rb::CURRENT_TIME,
        ))?;
        Ok(())
    }

    fn map_window(&self, window: WindowId) -> Result<(), WmError> {
        self.check(self.conn.map_window(window.0))?;
        Ok(())
    }

    fn select_enter_events(&self, window: WindowId) -> Result<(), WmError> {
        let aux = ChangeWindowAttributesAux::new()
            .event_mask(EventMask::ENTER_WINDOW | EventMask::FOCUS_CHANGE);
        self.check(self.conn.change_window_attributes(window.0, &aux))?;
        Ok(())
    }

    fn geometry(&self, window: WindowId) -> Result<(Vector2D, Vector2D), WmError> {
        let cookie = self.check(self.conn.get_geometry(window.0))?;
        let reply = self.check(cookie.reply())?;
        Ok((
            Vector2D::from((reply.x, reply.y)),
            Vector2D::from((reply.width, reply.height)),
        ))
    }

    fn is_transient(&self, window: WindowId) -> Result<bool, WmError> {
        let cookie = self.check(self.conn.get_property(
            false,
            window.0,
            AtomEnum::WM_TRANSIENT_FOR,
            AtomEnum::WINDOW,
            0,
            1,
        ))?;
        let reply = self.check(cookie.reply())?;
        let parent = reply.value32().and_then(|mut values| values.next());
        Ok(parent.is_some_and(|parent| parent != 0))
    }

    fn window_class(&self, window: WindowId) -> Result<Vec<String>, WmError> {
        let cookie = self.check(self.conn.get_property(
            false,
            window.0,
            AtomEnum::WM_CLASS,
            AtomEnum::STRING,
            0,
            1024,
        ))?;
        let reply = self.check(cookie.reply())?;
        Ok(parse_wm_class(&reply.value))
    }

    fn flush(&self) -> Result<(), WmError> {
        self.check(self.conn.flush())
    }
}

/// WM_CLASS format: "res_name\0res_class\0"
fn parse_wm_class(value: &[u8]) -> Vec<String> {
    value
        .split(|b| *b == 0)
        .filter(|part| !part.is_empty())
        .map(|part| String::from_utf8_lossy(part).into_owned())
        .collect()
}

/// Become the window manager of `screen_num`.
///
/// Selecting SubstructureRedirect on the root window fails if another
/// window manager holds it.
pub fn become_wm(conn: &RustConnection, screen_num: usize) -> Result<ScreenInfo> {
    let screen = &conn.setup().roots[screen_num];
    let root = screen.root;

    info!("Screen size: {}x{}", screen.width_in_pixels, screen.height_in_pixels);

    let mask = EventMask::SUBSTRUCTURE_REDIRECT
        | EventMask::STRUCTURE_NOTIFY
        | EventMask::SUBSTRUCTURE_NOTIFY
        | EventMask::PROPERTY_CHANGE;

    conn.change_window_attributes(root, &ChangeWindowAttributesAux::new().event_mask(mask))?
        .check()
        .map_err(|e| {
            debug!("Selecting SubstructureRedirect failed: {}", e);
            WmError::AnotherWmRunning(screen_num)
        })?;

    conn.ungrab_key(ANY_KEY, root, ModMask::ANY)?;
    conn.flush().context("Failed to flush X11 setup requests")?;

    info!("Registered as window manager on root window 0x{:x}", root);

    Ok(ScreenInfo::new(
        WindowId(root),
        screen.width_in_pixels,
        screen.height_in_pixels,
    ))
}

/// Mapped, non-override-redirect children of the root window
pub fn existing_windows(conn: &RustConnection, root: WindowId) -> Result<Vec<WindowId>> {
    let tree = conn
        .query_tree(root.0)?
        .reply()
        .context("Failed to query root window children")?;

    let mut windows = Vec::new();
    for &child in &tree.children {
        let Ok(attrs) = conn.get_window_attributes(child)?.reply() else {
            continue;
        };
        if attrs.override_redirect || attrs.map_state != MapState::VIEWABLE {
            debug!("Skipping existing window 0x{:x}", child);
            continue;
        }
        windows.push(WindowId(child));
    }

    Ok(windows)
}
