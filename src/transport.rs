//! Byte-level bus transport contract and address type.

use crate::error::{out_of_range, Result, TransportError};
use log::trace;
use std::fmt;
use std::io::{Read, Write};

/// A validated 7-bit I2C slave address.
/// Use `I2cAddress::new_7bit(addr)` to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct I2cAddress(pub(crate) u8); // Private outside the crate to enforce constructor use

impl I2cAddress {
    /// Creates a 7-bit address, checking validity (0-127).
    pub fn new_7bit(addr: u8) -> Result<Self> {
        if addr <= 0x7F {
            Ok(I2cAddress(addr))
        } else {
            Err(out_of_range("7-bit I2C address", addr, "0-127"))
        }
    }

    /// Returns the raw 7-bit address.
    #[inline]
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for I2cAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "7-bit 0x{:02X}", self.0)
    }
}

/// A blocking bus capable of plain writes and plain reads to a slave address.
///
/// Implementations must return exactly `len` bytes from [`Transport::read`] or fail;
/// the driver treats a short read as a [`TransportError::ShortRead`]. Timeouts and
/// retries are the implementation's business.
pub trait Transport {
    /// Writes `bytes` to the device at `addr` in one bus transaction.
    fn write(&mut self, addr: I2cAddress, bytes: &[u8]) -> std::result::Result<(), TransportError>;

    /// Reads `len` bytes from the device at `addr` in one bus transaction.
    fn read(&mut self, addr: I2cAddress, len: usize) -> std::result::Result<Vec<u8>, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn write(&mut self, addr: I2cAddress, bytes: &[u8]) -> std::result::Result<(), TransportError> {
        (**self).write(addr, bytes)
    }

    fn read(&mut self, addr: I2cAddress, len: usize) -> std::result::Result<Vec<u8>, TransportError> {
        (**self).read(addr, len)
    }
}

/// Adapts a byte stream that is already bound to one slave (for example a Linux
/// `/dev/i2c-N` handle after the `I2C_SLAVE` ioctl) into a [`Transport`].
///
/// The address passed to each call is only logged; selecting it on the bus is the
/// stream owner's responsibility.
#[derive(Debug)]
pub struct IoTransport<S> {
    stream: S,
}

impl<S: Read + Write> IoTransport<S> {
    /// Wraps `stream`, which must already address the target device.
    pub fn new(stream: S) -> Self {
        Self { stream }
    }

    /// Returns the wrapped stream.
    pub fn into_inner(self) -> S {
        self.stream
    }
}

impl<S: Read + Write> Transport for IoTransport<S> {
    fn write(&mut self, addr: I2cAddress, bytes: &[u8]) -> std::result::Result<(), TransportError> {
        trace!("Stream write to {}: {:02X?}", addr, bytes);
        self.stream.write_all(bytes)?;
        self.stream.flush()?;
        Ok(())
    }

    fn read(&mut self, addr: I2cAddress, len: usize) -> std::result::Result<Vec<u8>, TransportError> {
        let mut buf = Vec::with_capacity(len);
        Read::take(&mut self.stream, len as u64).read_to_end(&mut buf)?;
        if buf.len() < len {
            return Err(TransportError::ShortRead {
                expected: len,
                actual: buf.len(),
            });
        }
        trace!("Stream read from {}: {:02X?}", addr, buf);
        Ok(buf)
    }
}
