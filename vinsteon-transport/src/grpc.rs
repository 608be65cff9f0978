//! gRPC transport over plaintext HTTP/2

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::timeout;
use tonic::transport::Endpoint;
use tonic::Request;
use tracing::{debug, trace, warn};

use vinsteon_core::constants::DEFAULT_CONNECT_TIMEOUT;
use vinsteon_core::{Ack, CmdMsg, Delivery};

use crate::client::VinsteonRpcClient;
use crate::{error::*, Transport};

/// gRPC transport for vinsteon controllers
pub struct GrpcTransport {
    host: String,
    port: u16,
    client: Option<VinsteonRpcClient>,
    connect_timeout: Duration,
}

impl GrpcTransport {
    /// Create new gRPC transport
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            client: None,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    /// Set connection timeout (covers name resolution too)
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// `host:port`, bracketing bare IPv6 literals
    fn authority(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    fn uri(&self) -> String {
        format!("http://{}", self.authority())
    }

    /// Endpoint for `http://host:port`
    ///
    /// The host must be a bare name or address: anything that would move
    /// `:port` out of the authority is rejected.
    fn endpoint(&self) -> Result<Endpoint> {
        let uri = self.uri();
        let invalid = |reason: &str| Error::InvalidAddress(format!("{}: {}", uri, reason));

        if self.host.is_empty() {
            return Err(invalid("empty host"));
        }
        if self.host.contains(['/', '?', '#', '@']) {
            return Err(invalid("host must not contain '/', '?', '#' or '@'"));
        }

        let endpoint = Endpoint::from_shared(uri.clone()).map_err(|e| invalid(&e.to_string()))?;

        if endpoint.uri().port_u16() != Some(self.port) {
            return Err(invalid("host overrides the controller port"));
        }

        Ok(endpoint.connect_timeout(self.connect_timeout))
    }
}

#[async_trait]
impl Transport for GrpcTransport {
    async fn connect(&mut self) -> Result<()> {
        if self.is_connected() {
            return Err(Error::AlreadyConnected);
        }

        let uri = self.uri();
        let endpoint = self.endpoint()?;

        debug!("Connecting to {}...", uri);

        let channel = timeout(self.connect_timeout, endpoint.connect())
            .await
            .map_err(|_| Error::ConnectionTimeout)?
            .map_err(Error::Connect)?;

        debug!("Connected to {}", uri);

        self.client = Some(VinsteonRpcClient::new(channel));
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<()> {
        // Dropping the last channel handle closes the HTTP/2 connection
        if self.client.take().is_some() {
            debug!("Disconnecting from {}...", self.remote_addr());
        }

        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.client.is_some()
    }

    async fn send_cmd(&mut self, delivery: Delivery, msg: CmdMsg, deadline: Duration) -> Result<Ack> {
        let client = self.client.as_mut().ok_or(Error::NotConnected)?;

        let mut request = Request::new(msg);
        request.set_timeout(deadline);

        trace!("Calling {} with {:?} (deadline {:?})", delivery.path(), msg, deadline);

        let response = match delivery {
            Delivery::Standard => client.send_cmd(request).await?,
            Delivery::Reliable => client.send_cmd_reliable(request).await?,
        };

        trace!("{} returned {:?}", delivery.method_name(), response.get_ref());

        Ok(response.into_inner())
    }

    fn remote_addr(&self) -> String {
        self.authority()
    }
}

impl Drop for GrpcTransport {
    fn drop(&mut self) {
        if self.is_connected() {
            warn!("gRPC transport dropped while still connected");
        }
    }
}
