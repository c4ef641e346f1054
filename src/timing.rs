//! Gain and integration-time control (timing register).

use crate::consts;
use crate::device::Tsl2561;
use crate::error::{out_of_range, Error, Result};
use crate::transport::Transport;
use log::debug;
use std::str::FromStr;

/// Analog gain applied before digitization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gain {
    /// ×1 (default)
    #[default]
    Low,
    /// ×16
    High,
}

impl Gain {
    /// Multiplier applied to the computed lux value for this gain setting.
    pub fn multiplier(&self) -> f64 {
        match self {
            Gain::Low => consts::scale::GAIN_LOW,
            Gain::High => consts::scale::GAIN_HIGH,
        }
    }
}

impl FromStr for Gain {
    type Err = Error;

    /// Accepts `"low"` or `"high"`, ignoring case.
    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("low") {
            Ok(Gain::Low)
        } else if s.eq_ignore_ascii_case("high") {
            Ok(Gain::High)
        } else {
            Err(Error::InvalidArgument(format!(
                "Gain must be 'high' or 'low' (got '{}')",
                s
            )))
        }
    }
}

/// Integration time select (timing register bits 1:0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegrationTime {
    /// 13.7 ms
    Ms13 = 0b00,
    /// 101 ms
    Ms101 = 0b01,
    /// 402 ms (default)
    #[default]
    Ms402 = 0b10,
    /// Integration runs while the manual bit is set.
    Manual = 0b11,
}

impl IntegrationTime {
    /// Nominal integration time in milliseconds, `None` for manual.
    pub fn nominal_ms(&self) -> Option<f64> {
        match self {
            IntegrationTime::Ms13 => Some(13.7),
            IntegrationTime::Ms101 => Some(101.0),
            IntegrationTime::Ms402 => Some(402.0),
            IntegrationTime::Manual => None,
        }
    }

    /// Lux scale for this integration time, normalised to 402 ms.
    /// Manual integration has no defined scale.
    pub fn multiplier(&self) -> Option<f64> {
        match self {
            IntegrationTime::Manual => None,
            t => Some(consts::scale::INTEGRATION[*t as usize]),
        }
    }

    fn from_bits(bits: u8) -> Self {
        match bits & consts::timing::INTEG_MASK {
            0b00 => IntegrationTime::Ms13,
            0b01 => IntegrationTime::Ms101,
            0b10 => IntegrationTime::Ms402,
            _ => IntegrationTime::Manual,
        }
    }
}

impl TryFrom<u8> for IntegrationTime {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        if value > consts::timing::INTEG_MASK {
            return Err(out_of_range("Integration select", value, "0-3"));
        }
        Ok(IntegrationTime::from_bits(value))
    }
}

/// Decoded view of the timing register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingState(u8);

impl TimingState {
    pub fn from_raw(raw: u8) -> Self {
        TimingState(raw)
    }

    #[inline]
    pub fn raw(&self) -> u8 {
        self.0
    }

    pub fn gain(&self) -> Gain {
        if self.0 & consts::timing::GAIN_BIT != 0 {
            Gain::High
        } else {
            Gain::Low
        }
    }

    pub fn integration(&self) -> IntegrationTime {
        IntegrationTime::from_bits(self.0)
    }

    /// Whether a manual integration cycle is running.
    pub fn manual_active(&self) -> bool {
        self.0 & consts::timing::MANUAL_BIT != 0
    }
}

impl<T: Transport> Tsl2561<T> {
    /// Reads and decodes the timing register.
    pub fn read_timing(&mut self) -> Result<TimingState> {
        Ok(TimingState(self.read_byte(consts::regs::TIMING)?))
    }

    /// Sets the analog gain, keeping the integration and manual bits.
    pub fn set_gain(&mut self, gain: Gain) -> Result<()> {
        let bits = match gain {
            Gain::High => consts::timing::GAIN_BIT,
            Gain::Low => 0,
        };
        debug!("Setting gain {:?}", gain);
        self.modify_register(
            consts::regs::TIMING,
            consts::timing::PRESERVE_ON_GAIN,
            bits,
        )?;
        Ok(())
    }

    /// Sets the integration select field (0 = 13.7 ms, 1 = 101 ms, 2 = 402 ms, 3 = manual).
    ///
    /// Values above 3 are rejected before any bus traffic.
    pub fn set_integration_cycle(&mut self, mode: u8) -> Result<()> {
        let time = IntegrationTime::try_from(mode)?;
        self.set_integration_time(time)
    }

    /// Typed form of [`Tsl2561::set_integration_cycle`].
    pub fn set_integration_time(&mut self, time: IntegrationTime) -> Result<()> {
        debug!("Setting integration time {:?}", time);
        self.modify_register(
            consts::regs::TIMING,
            consts::timing::PRESERVE_ON_INTEG,
            time as u8,
        )?;
        Ok(())
    }

    /// Starts (`true`) or stops (`false`) a manual integration cycle.
    /// Only has an effect while [`IntegrationTime::Manual`] is selected.
    pub fn set_manual_integration(&mut self, enable: bool) -> Result<()> {
        let bits = if enable {
            consts::timing::MANUAL_BIT
        } else {
            0
        };
        debug!(
            "{} manual integration",
            if enable { "Starting" } else { "Stopping" }
        );
        self.modify_register(
            consts::regs::TIMING,
            consts::timing::PRESERVE_ON_MANUAL,
            bits,
        )?;
        Ok(())
    }
}
