//! Error types for vinsteon-core

/// Result type alias for vinsteon-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core protocol errors
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// `CmdMsg` carried no command
    #[error("Command message has no command set")]
    MissingCommand,

    /// A field failed value validation
    #[error("Invalid command field: {0}")]
    Types(#[from] vinsteon_types::Error),
}
