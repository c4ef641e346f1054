//! Register addresses, command-byte bits and bit-field masks.

// Default 7-bit bus addresses, selected by the ADDR SEL pin.
/// ADDR SEL tied to ground.
pub const ADDRESS_GND: u8 = 0x29;
/// ADDR SEL left floating (default).
pub const DEFAULT_ADDRESS: u8 = 0x39;
/// ADDR SEL tied to VDD.
pub const ADDRESS_VDD: u8 = 0x49;

// --- Command Byte ---
pub mod command {
    /// Bit 7: the byte selects a register.
    pub const SELECT: u8 = 1 << 7;
    /// Bit 6: clear any pending interrupt.
    pub const CLEAR: u8 = 1 << 6;
    /// Bits 3..0: register address.
    pub const ADDRESS_MASK: u8 = 0x0F;
}

/// Register map. Every address fits in the low nibble of the command byte.
pub mod regs {
    pub const CONTROL: u8 = 0x00;
    pub const TIMING: u8 = 0x01;
    pub const THRESH_LOW_LOW: u8 = 0x02;
    pub const THRESH_LOW_HIGH: u8 = 0x03;
    pub const THRESH_HIGH_LOW: u8 = 0x04;
    pub const THRESH_HIGH_HIGH: u8 = 0x05;
    pub const INTERRUPT: u8 = 0x06;
    pub const ID: u8 = 0x0A;
    pub const DATA0_LOW: u8 = 0x0C;
    pub const DATA0_HIGH: u8 = 0x0D;
    pub const DATA1_LOW: u8 = 0x0E;
    pub const DATA1_HIGH: u8 = 0x0F;
}

// --- Control Register ---
pub mod control {
    pub const POWER_ON: u8 = 0x03;
    pub const POWER_OFF: u8 = 0x00;
    pub const POWER_MASK: u8 = 0b0000_0011;
}

// --- Timing Register ---
pub mod timing {
    pub const INTEG_MASK: u8 = 0b0000_0011; // Bits 1:0
    pub const MANUAL_BIT: u8 = 0b0000_1000; // Bit 3
    pub const GAIN_BIT: u8 = 0b0001_0000; // Bit 4

    // Bits kept by each read-modify-write
    pub const PRESERVE_ON_GAIN: u8 = 0b0000_1011;
    pub const PRESERVE_ON_INTEG: u8 = 0b0001_1000;
    pub const PRESERVE_ON_MANUAL: u8 = 0b0001_0111;
}

// --- Interrupt Control Register ---
pub mod interrupt {
    pub const PERSIST_MASK: u8 = 0b0000_1111; // Bits 3:0
    pub const MODE_MASK: u8 = 0b0011_0000; // Bits 5:4
    pub const MODE_SHIFT: u8 = 4;
    pub const PERSIST_MAX: u8 = 15;

    pub const PRESERVE_ON_PERSIST: u8 = MODE_MASK;
    pub const PRESERVE_ON_MODE: u8 = PERSIST_MASK;
}

// --- Lux Scaling ---
pub mod scale {
    pub const GAIN_HIGH: f64 = 16.0;
    pub const GAIN_LOW: f64 = 1.0;
    /// Indexed by integration select 0..=2 (13.7 ms, 101 ms, 402 ms).
    pub const INTEGRATION: [f64; 3] = [1.0 / 0.034, 1.0 / 0.252, 1.0];
}
