pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid address byte {input:?}: expected a hex value in 00..=FF")]
    InvalidAddressByte { input: String },

    #[error("Invalid device address {input:?}: expected XX.XX.XX or XXXXXX")]
    InvalidAddress { input: String },

    #[error("Reserved address byte must be zero, got 0x{0:08X}")]
    ReservedByteSet(u32),

    #[error("Invalid level {input:?}: expected a decimal integer in 0..=4294967295")]
    InvalidLevel { input: String },
}
