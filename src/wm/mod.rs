//! Window Manager Module
//!
//! Manager state and the event loop: wait for a notification, dispatch it,
//! then push the geometry of every dirty window to the X server in one batch.

pub mod client;
pub mod display;
pub mod events;
pub mod registry;
pub mod screen;
pub mod tiling;
pub mod x11;

#[cfg(test)]
pub(crate) mod testing;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::config::{Config, RulesConfig};
use crate::wm::client::WindowId;
use crate::wm::display::{ConfigAxes, DisplayServer};
use crate::wm::events::Notification;
use crate::wm::registry::ClientList;
use crate::wm::screen::ScreenInfo;
use crate::wm::tiling::Tiler;

/// Whether the event loop keeps going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

/// Source of display server notifications
pub trait EventSource {
    /// Wait for the next notification
    async fn next_notification(&mut self) -> Result<Notification>;
}

pub struct WindowManager<D: DisplayServer> {
    display: D,
    screen: ScreenInfo,
    clients: ClientList,
    tiler: Tiler,
    rules: RulesConfig,
    /// Scratch values for configure requests, overwritten by every request
    values: [u32; 2],
    /// Anchor for the next split
    last_focused: WindowId,
}

impl<D: DisplayServer> WindowManager<D> {
    pub fn new(display: D, screen: ScreenInfo, config: &Config) -> Self {
        Self {
            display,
            screen,
            clients: ClientList::new(),
            tiler: Tiler::new(&config.tiling),
            rules: config.rules.clone(),
            values: [0; 2],
            last_focused: WindowId::NONE,
        }
    }

    pub fn clients(&self) -> &ClientList {
        &self.clients
    }

    pub fn last_focused(&self) -> WindowId {
        self.last_focused
    }

    /// Run until the connection breaks or the event source fails
    pub async fn run<E: EventSource>(&mut self, events: &mut E) -> Result<()> {
        info!("Entering event loop");
        loop {
            if self.display.has_error() {
                info!("X11 connection lost, exiting event loop");
                return Ok(());
            }

            let notification = events.next_notification().await?;
            if self.handle_event(notification) == LoopControl::Stop {
                info!("X11 connection lost, exiting event loop");
                return Ok(());
            }
        }
    }

    /// Handle one notification, then write back dirty geometry and flush.
    pub fn handle_event(&mut self, notification: Notification) -> LoopControl {
        if self.display.has_error() {
            return LoopControl::Stop;
        }

        self.dispatch(notification);

        self.refresh_dirty_windows();

        if let Err(e) = self.display.flush() {
            warn!("Failed to flush X11 requests: {}", e);
        }

        LoopControl::Continue
    }

    /// Send size and position of every dirty window, then mark it clean
    pub fn refresh_dirty_windows(&mut self) {
        for client in self.clients.iter_mut().filter(|c| c.dirty) {
            self.values = [client.size.x as u32, client.size.y as u32];
            if let Err(e) = self.display.configure(client.id, ConfigAxes::Size, &self.values) {
                warn!("Failed to resize window {}: {}", client.id, e);
            }

            // X11 carries x/y as INT32 in a CARD32 slot
            self.values = [client.position.x as i32 as u32, client.position.y as i32 as u32];
            if let Err(e) = self.display.configure(client.id, ConfigAxes::Position, &self.values) {
                warn!("Failed to move window {}: {}", client.id, e);
            }

            client.dirty = false;

            debug!("Refreshed dirty window {}", client.id);
        }
    }

    /// Give input focus to `window` and make it the next split anchor.
    ///
    /// The null window and the root window are ignored.
    pub fn set_focused_window(&mut self, window: WindowId) {
        if window.is_none() || window == self.screen.root {
            return;
        }

        if let Err(e) = self.display.set_input_focus(window) {
            warn!("Failed to focus window {}: {}", window, e);
        }
        self.last_focused = window;
    }
}
