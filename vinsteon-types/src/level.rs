//! Requested light level

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Light level sent with a light-control command
///
/// The controller treats it as a percentage, but no upper bound is
/// enforced here.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Level(u32);

impl Level {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    /// PLM brightness the controller derives from this level (saturates at 255)
    pub fn brightness(self) -> u8 {
        (u64::from(self.0) * 255 / 100).min(255) as u8
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidLevel {
            input: s.to_string(),
        };

        // u32::from_str would accept a leading '+'
        if s.is_empty() || !s.bytes().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        s.parse::<u32>().map(Self).map_err(|_| invalid())
    }
}

impl From<u32> for Level {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Level> for u32 {
    fn from(level: Level) -> u32 {
        level.0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
