//! The driver handle and raw register access.

use crate::consts;
use crate::error::{Error, Result, TransportError};
use crate::transport::{I2cAddress, Transport};
use log::{debug, trace};

/// A handle to one TSL2561 on a bus.
///
/// Owns the transport exclusively; every register operation is a blocking
/// write (and optionally one read) through it. No device state is cached,
/// each operation reads what it needs fresh from the hardware.
///
/// **Note:** The handle has no internal locking. Callers sharing one bus across
/// threads must serialize access to the handle themselves.
#[derive(Debug)]
pub struct Tsl2561<T> {
    transport: T,
    address: I2cAddress,
}

impl<T: Transport> Tsl2561<T> {
    // --- Constructors ---
    /// Creates a driver for the device at the given 7-bit address.
    pub fn new(transport: T, address: u8) -> Result<Self> {
        let address = I2cAddress::new_7bit(address)?;
        debug!("Created TSL2561 driver at {}", address);
        Ok(Self { transport, address })
    }

    /// Creates a driver at [`consts::DEFAULT_ADDRESS`] (ADDR SEL floating).
    pub fn new_default(transport: T) -> Self {
        Self {
            transport,
            address: I2cAddress(consts::DEFAULT_ADDRESS),
        }
    }

    /// The bus address this driver talks to.
    pub fn address(&self) -> I2cAddress {
        self.address
    }

    /// Tears the driver down and hands the transport back.
    pub fn release(self) -> T {
        debug!("Releasing TSL2561 driver at {}", self.address);
        self.transport
    }

    // --- Register Access ---
    /// Selects `reg` and reads `len` bytes starting there.
    ///
    /// Transport failures propagate immediately; nothing is retried.
    pub fn read_register(&mut self, reg: u8, len: usize) -> Result<Vec<u8>> {
        let cmd = select_command(reg)?;
        trace!("Select reg 0x{:02X} (cmd 0x{:02X}), read {} bytes", reg, cmd, len);
        self.transport.write(self.address, &[cmd])?;
        let data = self.transport.read(self.address, len)?;
        let actual = data.len();
        if actual < len {
            return Err(Error::Transport(TransportError::ShortRead {
                expected: len,
                actual,
            }));
        }
        if actual > len {
            return Err(Error::Transport(TransportError::LengthMismatch {
                expected: len,
                actual,
            }));
        }
        trace!("Read reg 0x{:02X}: {:02X?}", reg, data);
        Ok(data)
    }

    /// Writes one data byte to `reg`.
    pub fn write_register(&mut self, reg: u8, value: u8) -> Result<()> {
        let cmd = select_command(reg)?;
        trace!("Write reg 0x{:02X} = 0x{:02X}", reg, value);
        self.transport.write(self.address, &[cmd, value])?;
        Ok(())
    }

    pub(crate) fn read_byte(&mut self, reg: u8) -> Result<u8> {
        Ok(self.read_register(reg, 1)?[0])
    }

    /// Read-modify-write: keeps the bits in `preserve`, ORs in `bits`.
    pub(crate) fn modify_register(&mut self, reg: u8, preserve: u8, bits: u8) -> Result<u8> {
        let current = self.read_byte(reg)?;
        let new_value = (current & preserve) | bits;
        debug!(
            "Reg 0x{:02X}: 0x{:02X} -> 0x{:02X} (preserve 0b{:08b})",
            reg, current, new_value, preserve
        );
        self.write_register(reg, new_value)?;
        Ok(new_value)
    }

    /// Sends a bare command byte with no data.
    pub(crate) fn send_command(&mut self, cmd: u8) -> Result<()> {
        trace!("Command byte 0x{:02X}", cmd);
        self.transport.write(self.address, &[cmd])?;
        Ok(())
    }

    // --- Control ---
    /// Powers the device up (`0x03`) or down (`0x00`).
    pub fn set_power(&mut self, on: bool) -> Result<()> {
        let value = if on {
            consts::control::POWER_ON
        } else {
            consts::control::POWER_OFF
        };
        debug!("Setting power {}", if on { "on" } else { "off" });
        self.write_register(consts::regs::CONTROL, value)
    }

    /// Reads back the control register; powered when both power bits read set.
    pub fn is_powered(&mut self) -> Result<bool> {
        let value = self.read_byte(consts::regs::CONTROL)?;
        Ok(value & consts::control::POWER_MASK == consts::control::POWER_ON)
    }

    /// Reads the part number nibble of the ID register.
    pub fn read_chip_id(&mut self) -> Result<u8> {
        let raw = self.read_byte(consts::regs::ID)?;
        trace!("ID register = 0x{:02X}", raw);
        Ok(raw >> 4)
    }
}

fn select_command(reg: u8) -> Result<u8> {
    if reg > consts::command::ADDRESS_MASK {
        return Err(Error::InvalidRegister(reg));
    }
    Ok(consts::command::SELECT | reg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_byte_sets_select_bit() {
        assert_eq!(select_command(consts::regs::CONTROL).unwrap(), 0x80);
        assert_eq!(select_command(consts::regs::ID).unwrap(), 0b1000_1010);
        assert_eq!(select_command(consts::regs::DATA1_HIGH).unwrap(), 0x8F);
    }

    #[test]
    fn command_byte_rejects_wide_address() {
        assert!(matches!(select_command(0x10), Err(Error::InvalidRegister(0x10))));
    }
}
