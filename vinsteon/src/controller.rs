//! High-level controller interface

use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, info};

use vinsteon_core::{Ack, CmdMsg, Command, Delivery, DEFAULT_PORT};
use vinsteon_transport::{GrpcTransport, Transport};
use vinsteon_types::{DeviceAddress, Level};

use crate::error::{Error, Result};

/// vinsteon controller
///
/// High-level interface for sending commands to a vinsteon controller.
///
/// # Examples
///
/// ```no_run
/// use vinsteon::{Command, Controller, Delivery, DeviceAddress, Level};
///
/// #[tokio::main]
/// async fn main() -> vinsteon::Result<()> {
///     let mut controller = Controller::new("controller.local");
///
///     controller.connect().await?;
///
///     let command = Command::light_control("1A.D0.F4".parse()?, Level::new(100));
///     controller.send(command, Delivery::Reliable).await?;
///
///     controller.disconnect().await?;
///     Ok(())
/// }
/// ```
pub struct Controller {
    transport: Box<dyn Transport>,
    deadline: Option<Duration>, // None: per-delivery default
}

impl Controller {
    /// Create a controller client for `host` on the default port
    pub fn new(host: impl Into<String>) -> Self {
        Self::with_port(host, DEFAULT_PORT)
    }

    /// Create a controller client for `host:port`
    pub fn with_port(host: impl Into<String>, port: u16) -> Self {
        Self::with_transport(Box::new(GrpcTransport::new(host, port)))
    }

    /// Create a controller client over an existing transport
    pub fn with_transport(transport: Box<dyn Transport>) -> Self {
        Self {
            transport,
            deadline: None,
        }
    }

    /// Set call deadline for every delivery mode
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Deadline applied to a call using `delivery`
    pub fn deadline(&self, delivery: Delivery) -> Duration {
        self.deadline.unwrap_or_else(|| delivery.default_deadline())
    }

    /// Check if connected
    pub fn is_connected(&self) -> bool {
        self.transport.is_connected()
    }

    pub fn remote_addr(&self) -> String {
        self.transport.remote_addr()
    }

    /// Connect to controller
    ///
    /// # Errors
    ///
    /// Returns error if the host cannot be resolved or reached within the
    /// transport's connect timeout. No retry is attempted.
    pub async fn connect(&mut self) -> Result<()> {
        info!("Connecting to {}...", self.transport.remote_addr());

        self.transport.connect().await?;

        info!("Connected to {}", self.transport.remote_addr());
        Ok(())
    }

    /// Disconnect from controller
    pub async fn disconnect(&mut self) -> Result<()> {
        if !self.is_connected() {
            return Ok(());
        }

        info!("Disconnecting from {}...", self.transport.remote_addr());

        self.transport.disconnect().await?;

        info!("Disconnected");
        Ok(())
    }

    /// Send one command and wait for the controller's `Ack`
    ///
    /// The call is dropped once the deadline passes, which cancels the
    /// request on the wire.
    pub async fn send(&mut self, command: Command, delivery: Delivery) -> Result<Ack> {
        self.ensure_connected()?;

        let deadline = self.deadline(delivery);
        let msg = CmdMsg::from(command);

        debug!("Sending {} via {} (deadline {:?})", command, delivery, deadline);

        let ack = timeout(deadline, self.transport.send_cmd(delivery, msg, deadline))
            .await
            .map_err(|_| Error::Timeout { deadline })??;

        info!("{} acknowledged {}", self.transport.remote_addr(), command);
        Ok(ack)
    }

    /// Set `device` to `level`
    pub async fn set_level(
        &mut self,
        device: DeviceAddress,
        level: Level,
        delivery: Delivery,
    ) -> Result<Ack> {
        debug!("Level {} maps to PLM brightness {}", level, level.brightness());

        self.send(Command::light_control(device, level), delivery).await
    }

    // Helper methods

    fn ensure_connected(&self) -> Result<()> {
        if !self.is_connected() {
            return Err(Error::NotConnected);
        }
        Ok(())
    }
}
