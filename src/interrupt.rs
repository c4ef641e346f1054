//! Interrupt thresholds, persistence and mode.

use crate::consts;
use crate::device::Tsl2561;
use crate::error::{out_of_range, Error, Result};
use crate::transport::Transport;
use log::{debug, warn};

/// Which of the two channel-0 threshold pairs to program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdBound {
    /// Interrupt fires below this count.
    Low,
    /// Interrupt fires above this count.
    High,
}

impl ThresholdBound {
    /// (LSB register, MSB register)
    fn registers(&self) -> (u8, u8) {
        match self {
            ThresholdBound::Low => (consts::regs::THRESH_LOW_LOW, consts::regs::THRESH_LOW_HIGH),
            ThresholdBound::High => (
                consts::regs::THRESH_HIGH_LOW,
                consts::regs::THRESH_HIGH_HIGH,
            ),
        }
    }
}

/// Interrupt control select (interrupt register bits 5:4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterruptMode {
    /// Interrupt output disabled (default).
    #[default]
    Disabled = 0,
    /// Level interrupt on the INT pin.
    Level = 1,
    /// SMBAlert compliant. Written to the device but not supported by this driver.
    SmbAlert = 2,
    /// Test mode: sets the interrupt and SMBAlert.
    Test = 3,
}

impl InterruptMode {
    fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => InterruptMode::Disabled,
            1 => InterruptMode::Level,
            2 => InterruptMode::SmbAlert,
            _ => InterruptMode::Test,
        }
    }
}

impl TryFrom<u8> for InterruptMode {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        if value > 3 {
            return Err(out_of_range("Interrupt mode", value, "0-3"));
        }
        Ok(InterruptMode::from_bits(value))
    }
}

/// Decoded view of the interrupt control register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterruptState(u8);

impl InterruptState {
    pub fn from_raw(raw: u8) -> Self {
        InterruptState(raw)
    }

    #[inline]
    pub fn raw(&self) -> u8 {
        self.0
    }

    /// Number of out-of-range integration cycles before the interrupt fires
    /// (0 = every cycle).
    pub fn persist(&self) -> u8 {
        self.0 & consts::interrupt::PERSIST_MASK
    }

    pub fn mode(&self) -> InterruptMode {
        InterruptMode::from_bits(
            (self.0 & consts::interrupt::MODE_MASK) >> consts::interrupt::MODE_SHIFT,
        )
    }
}

impl<T: Transport> Tsl2561<T> {
    /// Reads and decodes the interrupt control register.
    pub fn read_interrupt_control(&mut self) -> Result<InterruptState> {
        Ok(InterruptState(self.read_byte(consts::regs::INTERRUPT)?))
    }

    /// Programs one threshold pair: LSB to the lower address first, then MSB.
    pub fn set_threshold(&mut self, bound: ThresholdBound, value: u16) -> Result<()> {
        let (reg_lsb, reg_msb) = bound.registers();
        let [lsb, msb] = value.to_le_bytes();
        debug!("Setting {:?} threshold to {} (0x{:04X})", bound, value, value);
        self.write_register(reg_lsb, lsb)?;
        self.write_register(reg_msb, msb)?;
        Ok(())
    }

    pub fn set_threshold_low(&mut self, value: u16) -> Result<()> {
        self.set_threshold(ThresholdBound::Low, value)
    }

    pub fn set_threshold_high(&mut self, value: u16) -> Result<()> {
        self.set_threshold(ThresholdBound::High, value)
    }

    /// Sets how many consecutive out-of-range cycles raise the interrupt (0-15).
    pub fn set_interrupt_persist(&mut self, cycles: u8) -> Result<()> {
        if cycles > consts::interrupt::PERSIST_MAX {
            return Err(out_of_range("Interrupt persistence", cycles, "0-15"));
        }
        self.modify_register(
            consts::regs::INTERRUPT,
            consts::interrupt::PRESERVE_ON_PERSIST,
            cycles,
        )?;
        Ok(())
    }

    /// Sets the interrupt mode from its raw value (0-3).
    ///
    /// Mode 2 (SMBAlert) is still written, after which [`Error::UnsupportedMode`]
    /// is returned as a warning.
    pub fn set_interrupt_mode(&mut self, mode: u8) -> Result<()> {
        let mode = InterruptMode::try_from(mode)?;
        self.set_interrupt_control(mode)
    }

    /// Typed form of [`Tsl2561::set_interrupt_mode`].
    pub fn set_interrupt_control(&mut self, mode: InterruptMode) -> Result<()> {
        self.modify_register(
            consts::regs::INTERRUPT,
            consts::interrupt::PRESERVE_ON_MODE,
            (mode as u8) << consts::interrupt::MODE_SHIFT,
        )?;
        if mode == InterruptMode::SmbAlert {
            warn!("Interrupt mode SMBAlert written but not supported by this driver");
            return Err(Error::UnsupportedMode { mode: mode as u8 });
        }
        Ok(())
    }

    /// Clears a pending interrupt. Sends the command byte only.
    pub fn clear_interrupt(&mut self) -> Result<()> {
        debug!("Clearing interrupt");
        self.send_command(consts::command::SELECT | consts::command::CLEAR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_registers_pair_up() {
        assert_eq!(ThresholdBound::Low.registers(), (0x02, 0x03));
        assert_eq!(ThresholdBound::High.registers(), (0x04, 0x05));
    }

    #[test]
    fn interrupt_mode_range() {
        assert_eq!(InterruptMode::try_from(1).unwrap(), InterruptMode::Level);
        assert_eq!(InterruptMode::try_from(2).unwrap(), InterruptMode::SmbAlert);
        assert!(InterruptMode::try_from(4).is_err());
    }

    #[test]
    fn interrupt_state_decodes_fields() {
        let state = InterruptState::from_raw(0b0001_0110);
        assert_eq!(state.persist(), 6);
        assert_eq!(state.mode(), InterruptMode::Level);

        let state = InterruptState::from_raw(0b1111_1111);
        assert_eq!(state.persist(), 15);
        assert_eq!(state.mode(), InterruptMode::Test);
    }
}
