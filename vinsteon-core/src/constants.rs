//! Protocol constants

use std::time::Duration;

/// Port the controller's gRPC server listens on
pub const DEFAULT_PORT: u16 = 50051;

/// Deadline for a single `SendCmd` call
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(1);

/// Default connection timeout
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// How long the controller waits for a device ACK before resending
pub const ACK_WAIT_INTERVAL: Duration = Duration::from_secs(1);

/// Resends the controller attempts for `SendCmdReliable`
pub const SEND_RETRIES: u64 = 8;

/// Deadline for a `SendCmdReliable` call, covering every controller resend
pub const RELIABLE_DEADLINE: Duration =
    Duration::from_secs(ACK_WAIT_INTERVAL.as_secs() * (SEND_RETRIES + 1));

/// gRPC service name (the proto file declares no package)
pub const SERVICE_NAME: &str = "VinsteonRPC";

/// RPC method paths
pub mod methods {
    pub const SEND_CMD: &str = "SendCmd";
    pub const SEND_CMD_RELIABLE: &str = "SendCmdReliable";

    pub const SEND_CMD_PATH: &str = "/VinsteonRPC/SendCmd";
    pub const SEND_CMD_RELIABLE_PATH: &str = "/VinsteonRPC/SendCmdReliable";
}
