use thiserror::Error;

/// Failures of the underlying byte transport.
///
/// The driver never retries; these surface to the caller unchanged
/// (wrapped in [`Error::Transport`]).
#[derive(Error, Debug)]
pub enum TransportError {
    /// I/O error from a stream-backed transport.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The transport returned fewer bytes than requested.
    #[error("Short read (expected {expected} bytes, got {actual})")]
    ShortRead {
        /// Number of bytes requested.
        expected: usize,
        /// Number of bytes actually returned.
        actual: usize,
    },
    /// The transport returned more bytes than requested.
    #[error("Read length mismatch (expected {expected} bytes, got {actual})")]
    LengthMismatch {
        /// Number of bytes requested.
        expected: usize,
        /// Number of bytes actually returned.
        actual: usize,
    },
    /// Bus-level failure reported by the transport (NACK, arbitration, ...).
    #[error("Bus error: {0}")]
    Bus(String),
}

/// Errors that can occur when talking to a TSL2561.
#[derive(Error, Debug)]
pub enum Error {
    /// Error from the underlying transport.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
    /// Function argument is outside the valid range. Raised before any bus traffic.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// Register address does not fit the 4-bit address field of the command byte.
    #[error("Register address 0x{0:02X} out of range (0x00-0x0F)")]
    InvalidRegister(u8),
    /// Interrupt mode accepted by the register encoding but not supported by this driver.
    ///
    /// The mode byte has already been written when this is returned; see [`Error::is_warning`].
    #[error("Interrupt mode {mode} (SMBAlert) was written but is not supported by this driver")]
    UnsupportedMode {
        /// The raw mode value that was written.
        mode: u8,
    },
    /// The timing register selects manual integration, which has no defined lux scale.
    #[error("Lux scaling is undefined while manual integration is selected")]
    ManualIntegrationScale,
}

impl Error {
    /// Returns `true` for conditions where the requested register write still took place.
    pub fn is_warning(&self) -> bool {
        matches!(self, Error::UnsupportedMode { .. })
    }
}

/// Result type alias for TSL2561 operations.
pub type Result<T> = std::result::Result<T, Error>;

pub(crate) fn out_of_range(what: &str, value: impl std::fmt::Display, range: &str) -> Error {
    Error::InvalidArgument(format!("{} {} out of range ({})", what, value, range))
}
