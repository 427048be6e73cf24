//! Registry Module
//!
//! Ordered list of managed clients, unique by window id.

use tracing::debug;

use crate::wm::client::{Client, WindowId};

/// Managed clients in creation order
#[derive(Debug, Default)]
pub struct ClientList {
    clients: Vec<Client>,
}

impl ClientList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a client. Returns `false` without touching the list if the id is already tracked.
    pub fn add(&mut self, client: Client) -> bool {
        if self.contains(client.id) {
            debug!("Window {} already managed, ignoring", client.id);
            return false;
        }
        self.clients.push(client);
        true
    }

    /// Stop tracking a window. Absent ids and the null handle are ignored.
    pub fn remove(&mut self, id: WindowId) -> Option<Client> {
        if id.is_none() {
            return None;
        }
        let index = self.clients.iter().position(|c| c.id == id)?;
        debug!("Removing window {}", id);
        Some(self.clients.remove(index))
    }

    pub fn find_by_id(&mut self, id: WindowId) -> Option<&mut Client> {
        self.clients.iter_mut().find(|c| c.id == id)
    }

    pub fn get(&self, id: WindowId) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == id)
    }

    pub fn contains(&self, id: WindowId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Client> {
        self.clients.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Client> {
        self.clients.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}
