//! Transport errors

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Not connected")]
    NotConnected,

    #[error("Already connected")]
    AlreadyConnected,

    #[error("Connection timeout")]
    ConnectionTimeout,

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Connection failed: {0}")]
    Connect(#[from] tonic::transport::Error),

    #[error("RPC failed: {0}")]
    Status(#[from] tonic::Status),
}

impl Error {
    /// Channel could not be established
    pub fn is_connect_failure(&self) -> bool {
        matches!(
            self,
            Self::ConnectionTimeout | Self::InvalidAddress(_) | Self::Connect(_)
        )
    }

    /// Server gave up on the call because its deadline passed
    pub fn is_deadline_exceeded(&self) -> bool {
        matches!(self, Self::Status(status) if status.code() == tonic::Code::DeadlineExceeded)
    }
}
