//! Start-up configuration.

use crate::consts;
use crate::device::Tsl2561;
use crate::error::{out_of_range, Result};
use crate::interrupt::InterruptMode;
use crate::timing::{Gain, IntegrationTime};
use crate::transport::Transport;
use log::debug;

/// Settings applied by [`Tsl2561::init`].
///
/// Defaults: ×1 gain, 402 ms, thresholds spanning the full count range,
/// interrupts disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorConfig {
    pub gain: Gain,
    pub integration: IntegrationTime,
    pub threshold_low: u16,
    pub threshold_high: u16,
    /// 0-15
    pub interrupt_persist: u8,
    pub interrupt_mode: InterruptMode,
}

impl Default for SensorConfig {
    fn default() -> Self {
        SensorConfig {
            gain: Gain::Low,
            integration: IntegrationTime::Ms402,
            threshold_low: 0,
            threshold_high: u16::MAX,
            interrupt_persist: 0,
            interrupt_mode: InterruptMode::Disabled,
        }
    }
}

impl SensorConfig {
    fn validate(&self) -> Result<()> {
        if self.interrupt_persist > consts::interrupt::PERSIST_MAX {
            return Err(out_of_range(
                "Interrupt persistence",
                self.interrupt_persist,
                "0-15",
            ));
        }
        Ok(())
    }
}

impl<T: Transport> Tsl2561<T> {
    /// Powers the device up and applies `config`, then clears any pending interrupt.
    ///
    /// The whole config is validated before the first write. An
    /// [`InterruptMode::SmbAlert`] mode surfaces as the warning from
    /// [`Tsl2561::set_interrupt_control`] after the remaining steps have run.
    pub fn init(&mut self, config: &SensorConfig) -> Result<()> {
        config.validate()?;
        debug!("Initializing TSL2561 at {}: {:?}", self.address(), config);

        self.set_power(true)?;
        self.set_integration_time(config.integration)?;
        self.set_gain(config.gain)?;
        self.set_threshold_low(config.threshold_low)?;
        self.set_threshold_high(config.threshold_high)?;
        self.set_interrupt_persist(config.interrupt_persist)?;
        let mode_result = self.set_interrupt_control(config.interrupt_mode);
        if let Err(e) = &mode_result {
            if !e.is_warning() {
                return mode_result;
            }
        }
        self.clear_interrupt()?;
        mode_result
    }
}
