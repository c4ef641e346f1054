//! In-memory register file standing in for a TSL2561 on the bus.

#![allow(dead_code)]

use tsl2561_lux::{I2cAddress, Transport, TransportError};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Simulates the 16-register file behind the command-byte protocol.
///
/// A command byte with bit 7 set selects a register; any following bytes are
/// written there with auto-increment. Reads return bytes from the selected
/// register onward. Every write is recorded in `writes`.
#[derive(Debug, Default)]
pub struct MockSensor {
    pub regs: [u8; 16],
    pub writes: Vec<Vec<u8>>,
    pub reads: usize,
    pub clears: usize,
    pub addresses: Vec<u8>,
    pointer: usize,
    /// Fail every write once this many writes have succeeded.
    pub fail_writes_after: Option<usize>,
    pub fail_reads: bool,
    /// Return one byte fewer than asked for.
    pub short_reads: bool,
    /// Return one byte more than asked for.
    pub long_reads: bool,
}

impl MockSensor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reg(mut self, reg: u8, value: u8) -> Self {
        self.regs[reg as usize] = value;
        self
    }

    /// Loads channel counts into the data registers, little-endian.
    pub fn with_channels(self, ch0: u16, ch1: u16) -> Self {
        let [c0l, c0h] = ch0.to_le_bytes();
        let [c1l, c1h] = ch1.to_le_bytes();
        self.with_reg(0x0C, c0l)
            .with_reg(0x0D, c0h)
            .with_reg(0x0E, c1l)
            .with_reg(0x0F, c1h)
    }

    /// Writes that carried a data byte, as (register, value).
    pub fn register_writes(&self) -> Vec<(u8, u8)> {
        self.writes
            .iter()
            .filter(|w| w.len() == 2)
            .map(|w| (w[0] & 0x0F, w[1]))
            .collect()
    }
}

impl Transport for MockSensor {
    fn write(&mut self, addr: I2cAddress, bytes: &[u8]) -> Result<(), TransportError> {
        if let Some(limit) = self.fail_writes_after {
            if self.writes.len() >= limit {
                return Err(TransportError::Bus("NACK".to_string()));
            }
        }
        self.addresses.push(addr.value());
        self.writes.push(bytes.to_vec());

        let cmd = bytes[0];
        assert!(cmd & 0x80 != 0, "command bit missing in 0x{cmd:02X}");
        if cmd & 0x40 != 0 {
            self.clears += 1;
            return Ok(());
        }
        self.pointer = (cmd & 0x0F) as usize;
        for &b in &bytes[1..] {
            self.regs[self.pointer] = b;
            self.pointer = (self.pointer + 1) % 16;
        }
        Ok(())
    }

    fn read(&mut self, addr: I2cAddress, len: usize) -> Result<Vec<u8>, TransportError> {
        self.addresses.push(addr.value());
        if self.fail_reads {
            return Err(TransportError::Bus("read timeout".to_string()));
        }
        self.reads += 1;
        let n = if self.short_reads {
            len.saturating_sub(1)
        } else if self.long_reads {
            len + 1
        } else {
            len
        };
        let out = (0..n)
            .map(|i| self.regs[(self.pointer + i) % 16])
            .collect();
        Ok(out)
    }
}
