//! Channel readout and lux conversion.
//!
//! The conversion is the empirical piecewise fit for the TSL2561 package,
//! selected by the ratio of infrared (channel 1) to full-spectrum
//! (channel 0) counts, then scaled by the gain and integration time read
//! from the timing register.

use crate::consts;
use crate::device::Tsl2561;
use crate::error::{Error, Result};
use crate::timing::TimingState;
use crate::transport::Transport;
use log::{debug, trace, warn};

/// Raw photodiode counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChannelPair {
    /// Full spectrum (visible + infrared).
    pub ch0: u16,
    /// Infrared only.
    pub ch1: u16,
}

impl ChannelPair {
    pub fn new(ch0: u16, ch1: u16) -> Self {
        Self { ch0, ch1 }
    }

    /// Decodes the four data registers read as one block starting at DATA0LOW.
    pub fn from_le_bytes(bytes: [u8; 4]) -> Self {
        Self {
            ch0: u16::from_le_bytes([bytes[0], bytes[1]]),
            ch1: u16::from_le_bytes([bytes[2], bytes[3]]),
        }
    }

    /// `ch1 / ch0`, or `None` when channel 0 is zero.
    pub fn ratio(&self) -> Option<f64> {
        if self.ch0 == 0 {
            None
        } else {
            Some(self.ch1 as f64 / self.ch0 as f64)
        }
    }
}

/// Result of a lux conversion.
///
/// `Dark` and `OutOfRange` are valid readings of negligible light, not errors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LuxReading {
    /// Non-negative illuminance in lux.
    Lux(f64),
    /// Channel 0 read zero.
    Dark,
    /// Infrared ratio above the fitted range (> 1.30).
    OutOfRange,
}

impl LuxReading {
    /// The illuminance in lux; `0.0` for `Dark` and `OutOfRange`.
    pub fn value(&self) -> f64 {
        match self {
            LuxReading::Lux(v) => *v,
            LuxReading::Dark | LuxReading::OutOfRange => 0.0,
        }
    }
}

/// Applies the piecewise fit to raw counts, without gain or integration scaling.
///
/// Returns `LuxReading::Lux` with the unscaled value when a branch applies.
pub fn empirical_lux(channels: ChannelPair) -> LuxReading {
    let Some(ratio) = channels.ratio() else {
        return LuxReading::Dark;
    };
    let ch0 = channels.ch0 as f64;
    let ch1 = channels.ch1 as f64;
    let lux = if 0.0 < ratio && ratio <= 0.50 {
        0.0304 * ch0 - 0.062 * ch0 * ratio.powf(1.4)
    } else if ratio <= 0.61 {
        0.0224 * ch0 - 0.031 * ch1
    } else if ratio <= 0.80 {
        0.0128 * ch0 - 0.0153 * ch1
    } else if ratio <= 1.30 {
        0.00146 * ch0 - 0.00112 * ch1
    } else {
        return LuxReading::OutOfRange;
    };
    trace!(
        "ch0={} ch1={} ratio={:.4} unscaled lux={:.4}",
        channels.ch0,
        channels.ch1,
        ratio,
        lux
    );
    LuxReading::Lux(lux)
}

/// Full conversion: piecewise fit, then gain and integration scaling, clamped at zero.
///
/// Fails with [`Error::ManualIntegrationScale`] when `timing` selects manual
/// integration and a branch of the fit applies.
pub fn calculate_lux(channels: ChannelPair, timing: TimingState) -> Result<LuxReading> {
    match empirical_lux(channels) {
        LuxReading::Lux(raw) => scale(raw, timing).map(LuxReading::Lux),
        other => Ok(other),
    }
}

fn scale(raw: f64, timing: TimingState) -> Result<f64> {
    let integration = timing.integration();
    let Some(integ_mult) = integration.multiplier() else {
        warn!("Lux requested with manual integration selected; no scale defined");
        return Err(Error::ManualIntegrationScale);
    };
    let gain_mult = timing.gain().multiplier();
    let lux = (raw * gain_mult * integ_mult).max(0.0);
    debug!(
        "Lux {:.4} (raw {:.4} x gain {} x integration {:.4})",
        lux, raw, gain_mult, integ_mult
    );
    Ok(lux)
}

impl<T: Transport> Tsl2561<T> {
    /// Reads both channels in one four-byte block read.
    pub fn read_channels(&mut self) -> Result<ChannelPair> {
        let data = self.read_register(consts::regs::DATA0_LOW, 4)?;
        let channels = ChannelPair::from_le_bytes([data[0], data[1], data[2], data[3]]);
        trace!("Channels: ch0={} ch1={}", channels.ch0, channels.ch1);
        Ok(channels)
    }

    /// Converts `channels` to lux using the gain and integration time currently
    /// programmed in the device.
    ///
    /// The timing register is only read when the fit produces a value to scale.
    pub fn compute_lux(&mut self, channels: ChannelPair) -> Result<LuxReading> {
        match empirical_lux(channels) {
            LuxReading::Lux(raw) => {
                let timing = self.read_timing()?;
                scale(raw, timing).map(LuxReading::Lux)
            }
            other => {
                debug!("Lux reading {:?} for {:?}", other, channels);
                Ok(other)
            }
        }
    }

    /// Reads the channels and converts them.
    pub fn read_lux(&mut self) -> Result<LuxReading> {
        let channels = self.read_channels()?;
        self.compute_lux(channels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // Gain low, 402 ms
    const UNITY: u8 = 0b0000_0010;

    fn lux(ch0: u16, ch1: u16, timing: u8) -> LuxReading {
        calculate_lux(ChannelPair::new(ch0, ch1), TimingState::from_raw(timing)).unwrap()
    }

    #[test]
    fn zero_channel0_is_dark() {
        for ch1 in [0, 1, 500, u16::MAX] {
            assert_eq!(lux(0, ch1, UNITY), LuxReading::Dark);
            assert_eq!(lux(0, ch1, UNITY).value(), 0.0);
        }
        // No scale is needed, so manual integration does not matter.
        assert_eq!(lux(0, 10, 0b0000_0011), LuxReading::Dark);
    }

    #[test]
    fn ratio_above_fit_is_out_of_range() {
        assert_eq!(lux(100, 131, UNITY), LuxReading::OutOfRange);
        assert_eq!(lux(1, u16::MAX, 0b0001_0000), LuxReading::OutOfRange);
        assert_eq!(lux(100, 131, UNITY).value(), 0.0);
    }

    #[test]
    fn branch_one_value() {
        let expected = 0.0304 * 100.0 - 0.062 * 100.0 * 0.4f64.powf(1.4);
        assert_relative_eq!(lux(100, 40, UNITY).value(), expected, epsilon = 1e-12);
        assert_relative_eq!(lux(100, 40, UNITY).value(), 1.321, epsilon = 1e-3);
    }

    #[test]
    fn zero_infrared_uses_second_branch() {
        // ratio == 0 is not inside (0, 0.50]
        assert_relative_eq!(lux(100, 0, UNITY).value(), 2.24, epsilon = 1e-12);
    }

    #[test]
    fn boundaries_belong_to_lower_branch() {
        // ratio 0.50: branch one gives ~6.9064, branch two would give 6.9
        let b1 = 0.0304 * 1000.0 - 0.062 * 1000.0 * 0.5f64.powf(1.4);
        assert_relative_eq!(lux(1000, 500, UNITY).value(), b1, epsilon = 1e-9);
        // ratio 0.61
        assert_relative_eq!(
            lux(100, 61, UNITY).value(),
            0.0224 * 100.0 - 0.031 * 61.0,
            epsilon = 1e-9
        );
        // ratio 0.80
        assert_relative_eq!(
            lux(100, 80, UNITY).value(),
            0.0128 * 100.0 - 0.0153 * 80.0,
            epsilon = 1e-9
        );
        // ratio 1.30
        assert_relative_eq!(
            lux(100, 130, UNITY).value(),
            0.00146 * 100.0 - 0.00112 * 130.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn gain_and_integration_scale() {
        let base = lux(100, 40, UNITY).value();
        // High gain, 402 ms
        assert_relative_eq!(lux(100, 40, 0b0001_0010).value(), base * 16.0, epsilon = 1e-9);
        // Low gain, 13.7 ms
        assert_relative_eq!(lux(100, 40, 0b0000_0000).value(), base / 0.034, epsilon = 1e-9);
        // High gain, 101 ms
        assert_relative_eq!(
            lux(100, 40, 0b0001_0001).value(),
            base * 16.0 / 0.252,
            epsilon = 1e-9
        );
    }

    #[test]
    fn manual_integration_has_no_scale() {
        let result = calculate_lux(ChannelPair::new(100, 40), TimingState::from_raw(0b0000_1011));
        assert!(matches!(result, Err(Error::ManualIntegrationScale)));
    }

    #[test]
    fn unrelated_timing_bits_are_ignored() {
        // Manual-active bit and reserved bits do not change the scale.
        assert_eq!(lux(100, 40, 0b1111_1010), lux(100, 40, 0b0001_0010));
    }

    #[test]
    fn channel_bytes_are_little_endian() {
        let pair = ChannelPair::from_le_bytes([0x2C, 0x01, 0xFF, 0x00]);
        assert_eq!(pair, ChannelPair::new(300, 255));
        assert_eq!(ChannelPair::new(0, 5).ratio(), None);
    }
}
