//! Controller commands and delivery modes

use std::fmt;
use std::time::Duration;

use tracing::trace;
use vinsteon_types::{DeviceAddress, Level};

use crate::constants::{methods, DEFAULT_DEADLINE, RELIABLE_DEADLINE};
use crate::error::{Error, Result};
use crate::messages::{cmd_msg, CmdMsg, LightControl};

/// Command sent to the controller
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    /// Set `device` to `level`
    LightControl { device: DeviceAddress, level: Level },
}

impl Command {
    pub fn light_control(device: DeviceAddress, level: Level) -> Self {
        Self::LightControl { device, level }
    }

    /// Get command name
    pub fn name(&self) -> &'static str {
        match self {
            Self::LightControl { .. } => "LIGHT_CONTROL",
        }
    }

    /// Target device
    pub fn device(&self) -> DeviceAddress {
        match *self {
            Self::LightControl { device, .. } => device,
        }
    }
}

impl From<Command> for CmdMsg {
    fn from(command: Command) -> CmdMsg {
        let msg = match command {
            Command::LightControl { device, level } => CmdMsg {
                cmd: Some(cmd_msg::Cmd::LightControl(LightControl {
                    device: device.to_u32(),
                    level: level.value(),
                })),
            },
        };

        trace!("Encoded {} as {:?}", command, msg);
        msg
    }
}

impl TryFrom<CmdMsg> for Command {
    type Error = Error;

    fn try_from(msg: CmdMsg) -> Result<Self> {
        match msg.cmd {
            Some(cmd_msg::Cmd::LightControl(lc)) => Ok(Self::LightControl {
                device: DeviceAddress::try_from(lc.device)?,
                level: Level::new(lc.level),
            }),
            None => Err(Error::MissingCommand),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LightControl { device, level } => {
                write!(f, "{}(device={}, level={})", self.name(), device, level)
            }
        }
    }
}

/// Which RPC carries the command
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum Delivery {
    /// `SendCmd`: controller forwards the command and returns
    #[default]
    Standard,

    /// `SendCmdReliable`: controller waits for the device ACK, resending
    /// on each `ACK_WAIT_INTERVAL` until `SEND_RETRIES` is exhausted
    Reliable,
}

impl Delivery {
    /// RPC method name
    pub fn method_name(self) -> &'static str {
        match self {
            Self::Standard => methods::SEND_CMD,
            Self::Reliable => methods::SEND_CMD_RELIABLE,
        }
    }

    /// Full gRPC path
    pub fn path(self) -> &'static str {
        match self {
            Self::Standard => methods::SEND_CMD_PATH,
            Self::Reliable => methods::SEND_CMD_RELIABLE_PATH,
        }
    }

    /// Call deadline used when none is configured
    pub fn default_deadline(self) -> Duration {
        match self {
            Self::Standard => DEFAULT_DEADLINE,
            Self::Reliable => RELIABLE_DEADLINE,
        }
    }
}

impl fmt::Display for Delivery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method_name())
    }
}
