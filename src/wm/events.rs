//! Events Module
//!
//! Classifies X11 events and routes the ones the window manager acts on.

use tracing::{debug, info, warn};
use x11rb::protocol::Event;

use crate::wm::client::{Client, WindowId};
use crate::wm::display::DisplayServer;
use crate::wm::WindowManager;

/// Set on events generated through SendEvent
pub const SEND_EVENT_MASK: u8 = 0x80;

/// Event type with the SendEvent bit removed
pub fn event_type(response_type: u8) -> u8 {
    response_type & !SEND_EVENT_MASK
}

/// A display server event, reduced to what the window manager handles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    /// Pointer entered `window`
    Enter { window: WindowId },
    /// `window` was destroyed
    Destroy { window: WindowId },
    /// A client asked for `window` to be mapped
    MapRequest { window: WindowId },
    /// Anything else, by event type
    Unrecognized { kind: u8 },
}

impl Notification {
    pub fn from_event(event: &Event) -> Self {
        match event {
            Event::EnterNotify(e) => Self::Enter {
                window: WindowId(e.event),
            },
            Event::DestroyNotify(e) => Self::Destroy {
                window: WindowId(e.window),
            },
            Event::MapRequest(e) => Self::MapRequest {
                window: WindowId(e.window),
            },
            other => Self::Unrecognized {
                kind: event_type(other.raw_response_type()),
            },
        }
    }
}

impl<D: DisplayServer> WindowManager<D> {
    /// Route a notification to its handler
    pub(crate) fn dispatch(&mut self, notification: Notification) {
        match notification {
            Notification::Enter { window } => {
                self.handle_enter(window);
                debug!("Event dispatched ENTER");
            }
            Notification::Destroy { window } => {
                self.handle_destroy(window);
                debug!("Event dispatched DESTROY");
            }
            Notification::MapRequest { window } => {
                self.handle_map_request(window);
                debug!("Event dispatched MAP");
            }
            Notification::Unrecognized { kind } => {
                warn!("Unknown event: {}", kind);
            }
        }
    }

    fn handle_enter(&mut self, window: WindowId) {
        self.set_focused_window(window);
    }

    fn handle_destroy(&mut self, window: WindowId) {
        let Some(closed) = self.clients.remove(window) else {
            debug!("DestroyNotify for unmanaged window {}", window);
            return;
        };

        info!("Window {} destroyed", window);
        self.tiler.fix_window_on_close(&mut self.clients, &closed);
    }

    fn handle_map_request(&mut self, window: WindowId) {
        if window == self.screen.root {
            return;
        }

        if let Err(e) = self.display.map_window(window) {
            warn!("Failed to map window {}: {}", window, e);
        }

        if !self.clients.contains(window) {
            let mut client = self.new_client(window);
            self.tiler.calculate_new_window_params(
                &mut self.clients,
                &mut client,
                self.last_focused,
                self.screen.size(),
            );
            info!(
                "Managing window {} (floating={}) at {:?} size {:?}",
                window, client.floating, client.position, client.size
            );
            self.clients.add(client);
        }

        if let Err(e) = self.display.select_enter_events(window) {
            warn!("Failed to select enter events on window {}: {}", window, e);
        }

        self.set_focused_window(window);
    }

    /// Build the client for a newly mapped window, deciding whether it floats
    fn new_client(&self, window: WindowId) -> Client {
        if !self.should_float(window) {
            return Client::new(window);
        }

        let (position, size) = match self.display.geometry(window) {
            Ok(geometry) => geometry,
            Err(e) => {
                debug!("No geometry for floating window {}: {}", window, e);
                self.screen.centered_half()
            }
        };
        Client::floating(window, position, size)
    }

    fn should_float(&self, window: WindowId) -> bool {
        match self.display.is_transient(window) {
            Ok(true) => return true,
            Ok(false) => {}
            Err(e) => debug!("Failed to read WM_TRANSIENT_FOR of {}: {}", window, e),
        }

        match self.display.window_class(window) {
            Ok(names) => names.iter().any(|n| self.rules.is_floating_class(n)),
            Err(e) => {
                debug!("Failed to read WM_CLASS of {}: {}", window, e);
                false
            }
        }
    }
}
