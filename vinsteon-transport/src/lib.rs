//! Transport layer for the vinsteon controller
//!
//! Provides the gRPC (HTTP/2, plaintext) channel to the controller.

pub mod client;
pub mod error;
pub mod grpc;

pub use client::VinsteonRpcClient;
pub use error::{Error, Result};
pub use grpc::GrpcTransport;

use std::time::Duration;

use async_trait::async_trait;
use vinsteon_core::{Ack, CmdMsg, Delivery};

/// Transport trait for different ways of reaching a controller
#[async_trait]
pub trait Transport: Send + Sync {
    /// Connect to controller
    async fn connect(&mut self) -> Result<()>;

    /// Disconnect from controller
    async fn disconnect(&mut self) -> Result<()>;

    /// Check if connected
    fn is_connected(&self) -> bool;

    /// Issue a single command RPC
    ///
    /// `deadline` is advertised to the server; callers enforce it locally.
    async fn send_cmd(&mut self, delivery: Delivery, msg: CmdMsg, deadline: Duration) -> Result<Ack>;

    /// Get remote address
    fn remote_addr(&self) -> String;
}
