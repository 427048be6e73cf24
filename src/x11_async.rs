//! X11 Async Event Stream
//!
//! Waits for X11 events on the current tokio runtime. The X11 socket is
//! registered with the reactor, so waiting for events suspends the single
//! event loop task instead of blocking a thread.

use std::os::unix::io::{AsRawFd, RawFd};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::Interest;
use tokio::io::unix::AsyncFd;
use x11rb::connection::Connection;
use x11rb::rust_connection::RustConnection;

use crate::wm::EventSource;
use crate::wm::events::Notification;

pub struct X11EventStream {
    conn: Arc<RustConnection>,
    fd: AsyncFd<RawFd>,
}

impl X11EventStream {
    /// Register the connection's socket with the tokio reactor
    pub fn new(conn: Arc<RustConnection>) -> Result<Self> {
        let raw = conn.stream().as_raw_fd();
        let fd = AsyncFd::with_interest(raw, Interest::READABLE)
            .context("Failed to register X11 socket with tokio")?;

        Ok(Self { conn, fd })
    }
}

impl EventSource for X11EventStream {
    /// Return the next queued event, waiting for the socket when the queue is empty.
    ///
    /// Requests must be flushed before calling this, or the server may never
    /// answer.
    async fn next_notification(&mut self) -> Result<Notification> {
        loop {
            if let Some(event) = self
                .conn
                .poll_for_event()
                .context("Error polling for X11 events")?
            {
                return Ok(Notification::from_event(&event));
            }

            let mut guard = self
                .fd
                .readable()
                .await
                .context("Failed waiting for X11 socket")?;
            guard.clear_ready();
        }
    }
}
