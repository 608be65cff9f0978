//! High-level error types

use std::time::Duration;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Core protocol error: {0}")]
    Core(#[from] vinsteon_core::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] vinsteon_transport::Error),

    #[error("Invalid argument: {0}")]
    Types(#[from] vinsteon_types::Error),

    #[error("Controller not connected")]
    NotConnected,

    #[error("No reply within {deadline:?} deadline")]
    Timeout { deadline: Duration },
}

impl Error {
    /// Call abandoned locally or rejected by the server for its deadline
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            Self::Transport(e) => e.is_deadline_exceeded(),
            _ => false,
        }
    }

    /// Channel to the controller could not be established
    pub fn is_connect_failure(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_connect_failure())
    }
}
