//! Client stub for the `VinsteonRPC` service
//!
//! Hand-written in the shape `tonic-build` generates, so no `protoc` is
//! needed at build time.

use tonic::codec::ProstCodec;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::Channel;
use tonic::{GrpcMethod, Request, Response, Status};

use vinsteon_core::constants::SERVICE_NAME;
use vinsteon_core::{Ack, CmdMsg, Delivery};

#[derive(Debug, Clone)]
pub struct VinsteonRpcClient {
    inner: tonic::client::Grpc<Channel>,
}

impl VinsteonRpcClient {
    pub fn new(channel: Channel) -> Self {
        Self {
            inner: tonic::client::Grpc::new(channel),
        }
    }

    pub async fn send_cmd(&mut self, request: Request<CmdMsg>) -> Result<Response<Ack>, Status> {
        self.unary(Delivery::Standard, request).await
    }

    pub async fn send_cmd_reliable(
        &mut self,
        request: Request<CmdMsg>,
    ) -> Result<Response<Ack>, Status> {
        self.unary(Delivery::Reliable, request).await
    }

    /// Unary call to the method selected by `delivery`
    async fn unary(
        &mut self,
        delivery: Delivery,
        mut request: Request<CmdMsg>,
    ) -> Result<Response<Ack>, Status> {
        self.inner
            .ready()
            .await
            .map_err(|e| Status::unknown(format!("Service was not ready: {}", e)))?;

        let codec: ProstCodec<CmdMsg, Ack> = ProstCodec::default();
        let path = PathAndQuery::from_static(delivery.path());

        request
            .extensions_mut()
            .insert(GrpcMethod::new(SERVICE_NAME, delivery.method_name()));

        self.inner.unary(request, path, codec).await
    }
}
