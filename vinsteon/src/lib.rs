//! # vinsteon
//!
//! Client for vinsteon home-automation controllers.
//!
//! ## Features
//!
//! - Typed Insteon device addresses and light levels
//! - Async/await API using Tokio, gRPC via tonic
//! - Per-call deadlines with guaranteed connection cleanup
//! - `SendCmd` and `SendCmdReliable` delivery
//!
//! ## Quick Start
//!
//! ```no_run
//! use vinsteon::{Controller, Delivery, DeviceAddress, Level};
//!
//! #[tokio::main]
//! async fn main() -> vinsteon::Result<()> {
//!     // Connect to controller
//!     let mut controller = Controller::new("10.0.0.5");
//!     controller.connect().await?;
//!
//!     // Set 01.0A.FF to 50%
//!     let device = DeviceAddress::new([0x01, 0x0A, 0xFF]);
//!     controller.set_level(device, Level::new(50), Delivery::Standard).await?;
//!
//!     // Disconnect
//!     controller.disconnect().await?;
//!
//!     Ok(())
//! }
//! ```

pub mod controller;
pub mod dispatch;
pub mod error;

// Re-exports
pub use controller::Controller;
pub use dispatch::{dispatch, dispatch_with, Invocation};
pub use error::{Error, Result};

// Re-export types
pub use vinsteon_core::{Ack, Command, Delivery};
pub use vinsteon_transport::{GrpcTransport, Transport};
pub use vinsteon_types::{DeviceAddress, Level};
