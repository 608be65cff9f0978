//! # vinsteon-core
//!
//! Protocol primitives for talking to a vinsteon controller.
//!
//! This crate provides:
//! - Protobuf wire messages of the `VinsteonRPC` service
//! - The `Command` value and its wire conversion
//! - Delivery modes and the RPC method paths they map to
//! - Protocol constants

pub mod command;
pub mod constants;
pub mod error;
pub mod messages;

pub use command::{Command, Delivery};
pub use error::{Error, Result};
pub use messages::{Ack, CmdMsg, LightControl};

pub use constants::DEFAULT_PORT;
