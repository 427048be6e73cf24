//! Error types

use thiserror::Error;
use x11rb::errors::{ConnectError, ConnectionError, ReplyError};

#[derive(Debug, Error)]
pub enum WmError {
    #[error("failed to connect to X server: {0}")]
    Connect(#[from] ConnectError),

    #[error("X11 connection error: {0}")]
    Connection(#[from] ConnectionError),

    #[error("X11 request failed: {0}")]
    Reply(#[from] ReplyError),

    #[error("another window manager is already running on screen {0}")]
    AnotherWmRunning(usize),
}

impl WmError {
    /// Whether the connection itself is unusable (as opposed to a single failed request)
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            Self::Connect(_) | Self::Connection(_) | Self::Reply(ReplyError::ConnectionError(_))
        )
    }
}
