//! Recording display server for tests

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

use x11rb::errors::ConnectionError;

use crate::config::Config;
use crate::error::WmError;
use crate::shared::Vector2D;
use crate::wm::client::WindowId;
use crate::wm::display::{ConfigAxes, DisplayServer};
use crate::wm::screen::ScreenInfo;
use crate::wm::WindowManager;

pub const ROOT: WindowId = WindowId(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    Configure(WindowId, ConfigAxes, [u32; 2]),
    Focus(WindowId),
    Map(WindowId),
    SelectEnter(WindowId),
    Flush,
}

#[derive(Default)]
pub struct FakeDisplay {
    broken: Cell<bool>,
    requests: RefCell<Vec<Request>>,
    transient: RefCell<HashSet<WindowId>>,
    geometry: RefCell<HashMap<WindowId, (Vector2D, Vector2D)>>,
    classes: RefCell<HashMap<WindowId, Vec<String>>>,
}

impl FakeDisplay {
    pub fn set_broken(&self) {
        self.broken.set(true);
    }

    pub fn set_transient(&self, window: WindowId) {
        self.transient.borrow_mut().insert(window);
    }

    pub fn set_geometry(&self, window: WindowId, position: Vector2D, size: Vector2D) {
        self.geometry.borrow_mut().insert(window, (position, size));
    }

    pub fn set_class(&self, window: WindowId, names: &[&str]) {
        self.classes
            .borrow_mut()
            .insert(window, names.iter().map(|n| n.to_string()).collect());
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.borrow().clone()
    }

    pub fn clear_requests(&self) {
        self.requests.borrow_mut().clear();
    }

    pub fn configures(&self) -> Vec<(WindowId, ConfigAxes, [u32; 2])> {
        self.requests
            .borrow()
            .iter()
            .filter_map(|r| match *r {
                Request::Configure(w, axes, values) => Some((w, axes, values)),
                _ => None,
            })
            .collect()
    }

    pub fn mapped(&self) -> Vec<WindowId> {
        self.windows(|r| match r {
            Request::Map(w) => Some(*w),
            _ => None,
        })
    }

    pub fn focused(&self) -> Vec<WindowId> {
        self.windows(|r| match r {
            Request::Focus(w) => Some(*w),
            _ => None,
        })
    }

    pub fn enter_selected(&self) -> Vec<WindowId> {
        self.windows(|r| match r {
            Request::SelectEnter(w) => Some(*w),
            _ => None,
        })
    }

    pub fn flushes(&self) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|r| **r == Request::Flush)
            .count()
    }

    fn windows(&self, pick: impl Fn(&Request) -> Option<WindowId>) -> Vec<WindowId> {
        self.requests.borrow().iter().filter_map(pick).collect()
    }

    fn record(&self, request: Request) {
        self.requests.borrow_mut().push(request);
    }
}

impl DisplayServer for FakeDisplay {
    fn has_error(&self) -> bool {
        self.broken.get()
    }

    fn configure(&self, window: WindowId, axes: ConfigAxes, values: &[u32; 2]) -> Result<(), WmError> {
        self.record(Request::Configure(window, axes, *values));
        Ok(())
    }

    fn set_input_focus(&self, window: WindowId) -> Result<(), WmError> {
        self.record(Request::Focus(window));
        Ok(())
    }

    fn map_window(&self, window: WindowId) -> Result<(), WmError> {
        self.record(Request::Map(window));
        Ok(())
    }

    fn select_enter_events(&self, window: WindowId) -> Result<(), WmError> {
        self.record(Request::SelectEnter(window));
        Ok(())
    }

    fn geometry(&self, window: WindowId) -> Result<(Vector2D, Vector2D), WmError> {
        self.geometry
            .borrow()
            .get(&window)
            .copied()
            .ok_or(WmError::Connection(ConnectionError::UnknownError))
    }

    fn is_transient(&self, window: WindowId) -> Result<bool, WmError> {
        Ok(self.transient.borrow().contains(&window))
    }

    fn window_class(&self, window: WindowId) -> Result<Vec<String>, WmError> {
        Ok(self.classes.borrow().get(&window).cloned().unwrap_or_default())
    }

    fn flush(&self) -> Result<(), WmError> {
        self.record(Request::Flush);
        Ok(())
    }
}

pub fn screen() -> ScreenInfo {
    ScreenInfo::new(ROOT, 1920, 1080)
}

pub fn manager() -> WindowManager<FakeDisplay> {
    manager_with_config(FakeDisplay::default(), &Config::default())
}

pub fn manager_with_config(display: FakeDisplay, config: &Config) -> WindowManager<FakeDisplay> {
    WindowManager::new(display, screen(), config)
}
