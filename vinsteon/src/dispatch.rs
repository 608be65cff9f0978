//! One-shot command dispatch
//!
//! Parses the positional arguments into an [`Invocation`], connects to the
//! controller, issues exactly one call and always closes the connection
//! before returning.

use tracing::{debug, warn};

use vinsteon_core::{Ack, Command, Delivery};
use vinsteon_types::{DeviceAddress, Level};

use crate::controller::Controller;
use crate::error::Result;

/// Everything a single run needs, built once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub hostname: String,
    pub address: DeviceAddress,
    pub level: Level,
    pub delivery: Delivery,
}

impl Invocation {
    /// Parse `hostname`, three hex address bytes and a decimal level
    ///
    /// Fails on the first invalid argument, before anything touches the
    /// network.
    pub fn parse(
        hostname: impl Into<String>,
        address: [&str; 3],
        level: &str,
        delivery: Delivery,
    ) -> Result<Self> {
        let [b1, b2, b3] = address;

        Ok(Self {
            hostname: hostname.into(),
            address: DeviceAddress::parse_components(b1, b2, b3)?,
            level: level.parse()?,
            delivery,
        })
    }

    pub fn command(&self) -> Command {
        Command::light_control(self.address, self.level)
    }
}

/// Send the invocation's command to `<hostname>:50051`
pub async fn dispatch(invocation: &Invocation) -> Result<Ack> {
    let mut controller = Controller::new(invocation.hostname.clone());
    dispatch_with(&mut controller, invocation).await
}

/// Send the invocation's command through `controller`
///
/// `invocation.hostname` is not consulted; the controller is already
/// addressed. The connection is closed whether or not the call succeeds.
pub async fn dispatch_with(controller: &mut Controller, invocation: &Invocation) -> Result<Ack> {
    debug!("Dispatching {:?}", invocation);

    controller.connect().await?;

    let result = controller
        .set_level(invocation.address, invocation.level, invocation.delivery)
        .await;

    if let Err(e) = controller.disconnect().await {
        warn!("Failed to close connection to {}: {}", controller.remote_addr(), e);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use bytes::Bytes;
    use pretty_assertions::assert_eq;
    use tokio::net::TcpListener;
    use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
    use vinsteon_core::CmdMsg;
    use vinsteon_transport::{GrpcTransport, Transport};

    use crate::controller::tests::mock_transport;
    use crate::error::Error;

    fn invocation() -> Invocation {
        Invocation::parse("10.0.0.5", ["01", "0a", "ff"], "50", Delivery::Standard).unwrap()
    }

    /// Accepts the call and never answers
    struct StalledTransport {
        connected: bool,
        closed: Arc<AtomicBool>,
    }

    #[async_trait]
    impl Transport for StalledTransport {
        async fn connect(&mut self) -> vinsteon_transport::Result<()> {
            self.connected = true;
            Ok(())
        }

        async fn disconnect(&mut self) -> vinsteon_transport::Result<()> {
            self.connected = false;
            self.closed.store(true, Ordering::SeqCst);
            Ok(())
        }

        fn is_connected(&self) -> bool {
            self.connected
        }

        async fn send_cmd(
            &mut self,
            _delivery: Delivery,
            _msg: CmdMsg,
            _deadline: Duration,
        ) -> vinsteon_transport::Result<vinsteon_core::Ack> {
            std::future::pending().await
        }

        fn remote_addr(&self) -> String {
            "10.0.0.5:50051".to_string()
        }
    }

    #[test]
    fn test_parse_invocation() {
        let invocation = invocation();

        assert_eq!(invocation.hostname, "10.0.0.5");
        assert_eq!(invocation.address.to_u32(), 0x0001_0AFF);
        assert_eq!(invocation.address.to_u32(), 68_351);
        assert_eq!(invocation.level, Level::new(50));
        assert_eq!(
            invocation.command(),
            Command::light_control(DeviceAddress::new([0x01, 0x0A, 0xFF]), Level::new(50))
        );
    }

    #[test]
    fn test_parse_rejects_bad_arguments() {
        let bad: [([&str; 3], &str); 6] = [
            (["gg", "0a", "ff"], "50"),
            (["01", "100", "ff"], "50"),
            (["01", "0a", ""], "50"),
            (["01", "0a", "ff"], "-1"),
            (["01", "0a", "ff"], "abc"),
            (["01", "0a", "ff"], "4294967296"),
        ];

        for (address, level) in bad {
            let result = Invocation::parse("10.0.0.5", address, level, Delivery::Standard);
            assert!(
                matches!(result, Err(Error::Types(_))),
                "{address:?} {level:?} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_dispatch_sends_once_and_disconnects() {
        let mut transport = mock_transport(true);
        transport.expect_connect().times(1).returning(|| Ok(()));
        transport
            .expect_send_cmd()
            .withf(|delivery, msg, _| {
                *delivery == Delivery::Standard && *msg == CmdMsg::from(invocation().command())
            })
            .times(1)
            .returning(|_, _, _| Ok(vinsteon_core::Ack {}));
        transport.expect_disconnect().times(1).returning(|| Ok(()));

        let mut controller = Controller::with_transport(Box::new(transport));
        let result = dispatch_with(&mut controller, &invocation()).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_connect_failure_is_fatal() {
        let mut transport = mock_transport(false);
        transport
            .expect_connect()
            .times(1)
            .returning(|| Err(vinsteon_transport::Error::ConnectionTimeout));
        transport.expect_send_cmd().times(0);
        transport.expect_disconnect().times(0);

        let mut controller = Controller::with_transport(Box::new(transport));
        let err = dispatch_with(&mut controller, &invocation()).await.unwrap_err();

        assert!(err.is_connect_failure());
    }

    #[tokio::test]
    async fn test_call_failure_still_disconnects() {
        let mut transport = mock_transport(true);
        transport.expect_connect().returning(|| Ok(()));
        transport
            .expect_send_cmd()
            .times(1)
            .returning(|_, _, _| Err(tonic::Status::deadline_exceeded("too slow").into()));
        transport.expect_disconnect().times(1).returning(|| Ok(()));

        let mut controller = Controller::with_transport(Box::new(transport));
        let err = dispatch_with(&mut controller, &invocation()).await.unwrap_err();

        assert!(err.is_timeout());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unanswered_call_abandoned_after_deadline() {
        let closed = Arc::new(AtomicBool::new(false));
        let transport = StalledTransport {
            connected: false,
            closed: closed.clone(),
        };

        let mut controller = Controller::with_transport(Box::new(transport));
        let started = tokio::time::Instant::now();
        let err = dispatch_with(&mut controller, &invocation()).await.unwrap_err();

        assert!(
            matches!(err, Error::Timeout { deadline } if deadline == Duration::from_secs(1)),
            "unexpected error: {err}"
        );
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(1), "{elapsed:?}");
        assert!(elapsed < Duration::from_millis(1010), "{elapsed:?}");
        assert!(closed.load(Ordering::SeqCst));
        assert!(!controller.is_connected());
    }

    #[tokio::test]
    async fn test_silent_controller_does_not_hang() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        // Hold every socket open without speaking HTTP/2
        let server = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let transport =
            GrpcTransport::new("127.0.0.1", port).with_connect_timeout(Duration::from_millis(500));
        let mut controller = Controller::with_transport(Box::new(transport));

        let outcome =
            tokio::time::timeout(Duration::from_secs(5), dispatch_with(&mut controller, &invocation()))
                .await;

        assert!(matches!(outcome, Ok(Err(_))), "dispatch should fail, not hang");
        assert!(!controller.is_connected());

        server.abort();
    }

    /// What the controller saw of one unary call
    #[derive(Debug)]
    struct ReceivedCall {
        path: String,
        grpc_timeout: Option<String>,
        content_type: Option<String>,
        body: Vec<u8>,
    }

    /// HTTP/2 controller on a local port answering every call with an empty `Ack`
    async fn spawn_controller() -> (u16, UnboundedReceiver<ReceivedCall>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let (calls_tx, calls_rx) = unbounded_channel();

        tokio::spawn(async move {
            let Ok((socket, _)) = listener.accept().await else {
                return;
            };
            let Ok(mut connection) = h2::server::handshake(socket).await else {
                return;
            };

            while let Some(Ok((request, respond))) = connection.accept().await {
                tokio::spawn(answer_with_ack(request, respond, calls_tx.clone()));
            }
        });

        (port, calls_rx)
    }

    async fn answer_with_ack(
        request: http::Request<h2::RecvStream>,
        mut respond: h2::server::SendResponse<Bytes>,
        calls: UnboundedSender<ReceivedCall>,
    ) {
        let header = |name: &str| {
            request
                .headers()
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        };
        let path = request.uri().path().to_string();
        let grpc_timeout = header("grpc-timeout");
        let content_type = header("content-type");

        let mut stream = request.into_body();
        let mut body = Vec::new();
        while let Some(chunk) = stream.data().await {
            let chunk = chunk.unwrap();
            let _ = stream.flow_control().release_capacity(chunk.len());
            body.extend_from_slice(&chunk);
        }

        let _ = calls.send(ReceivedCall {
            path,
            grpc_timeout,
            content_type,
            body,
        });

        let response = http::Response::builder()
            .status(200)
            .header("content-type", "application/grpc")
            .body(())
            .unwrap();
        let mut send = respond.send_response(response, false).unwrap();

        // Uncompressed, zero-length message: an empty Ack
        send.send_data(Bytes::from_static(&[0, 0, 0, 0, 0]), false).unwrap();

        let mut trailers = http::HeaderMap::new();
        trailers.insert("grpc-status", http::HeaderValue::from_static("0"));
        send.send_trailers(trailers).unwrap();
    }

    #[tokio::test]
    async fn test_dispatch_over_grpc() {
        let (port, mut calls) = spawn_controller().await;

        let transport =
            GrpcTransport::new("127.0.0.1", port).with_connect_timeout(Duration::from_secs(2));
        let mut controller = Controller::with_transport(Box::new(transport));

        let ack = dispatch_with(&mut controller, &invocation()).await.unwrap();

        assert_eq!(ack, Ack {});
        assert!(!controller.is_connected());

        let call = calls.recv().await.unwrap();
        assert_eq!(call.path, "/VinsteonRPC/SendCmd");
        assert_eq!(call.grpc_timeout.as_deref(), Some("1000000u"));
        assert_eq!(call.content_type.as_deref(), Some("application/grpc"));
        // 5-byte gRPC frame header, then CmdMsg { lightControl { 68351, 50 } }
        assert_eq!(
            call.body,
            vec![0x00, 0x00, 0x00, 0x00, 0x08, 0x0A, 0x06, 0x08, 0xFF, 0x95, 0x04, 0x10, 0x32]
        );
        assert!(calls.try_recv().is_err(), "exactly one call expected");
    }

    #[tokio::test]
    async fn test_reliable_dispatch_over_grpc() {
        let (port, mut calls) = spawn_controller().await;

        let transport =
            GrpcTransport::new("127.0.0.1", port).with_connect_timeout(Duration::from_secs(2));
        let mut controller = Controller::with_transport(Box::new(transport));
        let invocation =
            Invocation::parse("127.0.0.1", ["1a", "d0", "f4"], "100", Delivery::Reliable).unwrap();

        dispatch_with(&mut controller, &invocation).await.unwrap();

        let call = calls.recv().await.unwrap();
        assert_eq!(call.path, "/VinsteonRPC/SendCmdReliable");
        assert_eq!(call.grpc_timeout.as_deref(), Some("9000000u"));
        assert!(!controller.is_connected());
    }
}
