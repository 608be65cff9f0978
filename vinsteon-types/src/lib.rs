//! Type definitions for vinsteon
//!
//! Value types shared by every layer: the three-byte Insteon device
//! address and the requested light level.

pub mod address;
pub mod error;
pub mod level;

pub use address::DeviceAddress;
pub use error::{Error, Result};
pub use level::Level;
