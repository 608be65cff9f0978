//! Insteon device addresses
//!
//! A device is identified by three bytes. The controller expects them packed
//! into a `u32` as `[0x00, b1, b2, b3]` read big-endian, so the top byte is
//! reserved and always zero.

use std::fmt;
use std::str::FromStr;

use byteorder::{BigEndian, ByteOrder};

use crate::error::{Error, Result};

/// Three-byte physical address of an Insteon device
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct DeviceAddress([u8; 3]);

impl DeviceAddress {
    pub const fn new(bytes: [u8; 3]) -> Self {
        Self(bytes)
    }

    /// Build an address from three hex components, most significant first
    ///
    /// # Examples
    ///
    /// ```
    /// use vinsteon_types::DeviceAddress;
    ///
    /// let addr = DeviceAddress::parse_components("01", "0a", "ff").unwrap();
    /// assert_eq!(addr.to_u32(), 0x0001_0AFF);
    /// ```
    pub fn parse_components(b1: &str, b2: &str, b3: &str) -> Result<Self> {
        Ok(Self([
            parse_hex_byte(b1)?,
            parse_hex_byte(b2)?,
            parse_hex_byte(b3)?,
        ]))
    }

    /// Address bytes without the reserved byte
    pub const fn to_bytes(self) -> [u8; 3] {
        self.0
    }

    /// Packed wire form: `[0x00, b1, b2, b3]` as big-endian
    pub fn to_u32(self) -> u32 {
        let [b1, b2, b3] = self.0;
        BigEndian::read_u32(&[0x00, b1, b2, b3])
    }
}

/// Parse one address component as base-16, rejecting anything above `0xFF`
///
/// Signs and `0x` prefixes are not accepted. Leading zeros are.
pub fn parse_hex_byte(input: &str) -> Result<u8> {
    let invalid = || Error::InvalidAddressByte {
        input: input.to_string(),
    };

    if input.is_empty() || !input.bytes().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    u8::from_str_radix(input, 16).map_err(|_| invalid())
}

impl From<DeviceAddress> for u32 {
    fn from(addr: DeviceAddress) -> u32 {
        addr.to_u32()
    }
}

impl TryFrom<u32> for DeviceAddress {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        let mut buf = [0u8; 4];
        BigEndian::write_u32(&mut buf, value);

        if buf[0] != 0 {
            return Err(Error::ReservedByteSet(value));
        }

        Ok(Self([buf[1], buf[2], buf[3]]))
    }
}

impl FromStr for DeviceAddress {
    type Err = Error;

    /// Accepts `1A.D0.F4` and `1AD0F4`
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidAddress {
            input: s.to_string(),
        };

        let digits = match s.as_bytes() {
            [_, _, b'.', _, _, b'.', _, _] => s.replace('.', ""),
            b if b.len() == 6 => s.to_string(),
            _ => return Err(invalid()),
        };

        let mut bytes = [0u8; 3];
        hex::decode_to_slice(&digits, &mut bytes).map_err(|_| invalid())?;

        Ok(Self(bytes))
    }
}

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [b1, b2, b3] = self.0;
        write!(f, "{:02X}.{:02X}.{:02X}", b1, b2, b3)
    }
}
