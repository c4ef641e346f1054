//! # tsl2561-lux
//!
//! A Rust crate for the TAOS/ams TSL2561 dual-photodiode ambient light sensor:
//! register protocol encoding over a two-wire bus, and conversion of the raw
//! channel counts to illuminance in lux.
//!
//! The bus itself is supplied by the caller through the [`Transport`] trait
//! (one blocking write primitive, one blocking read primitive).
//!
//! ## Features
//!
//! *   Raw register access (`read_register`, `write_register`) with the command-byte encoding.
//! *   Power control and chip identification (`set_power`, `is_powered`, `read_chip_id`).
//! *   Timing register control via read-modify-write:
//!     *   Gain ×1 / ×16 (`set_gain`).
//!     *   Integration time 13.7 ms / 101 ms / 402 ms / manual (`set_integration_cycle`).
//!     *   Manual integration start/stop (`set_manual_integration`).
//! *   Interrupts: thresholds, persistence, mode and clear.
//! *   Channel readout (`read_channels`) and lux conversion (`compute_lux`, `read_lux`),
//!     plus the bus-free [`calculate_lux`] for already captured data.
//! *   One-call start-up (`init`) from a [`SensorConfig`].
//!
//! ## Basic Usage
//!
//! ```no_run
//! use std::fs::OpenOptions;
//! use tsl2561_lux::{Gain, IoTransport, Result, SensorConfig, Tsl2561};
//!
//! fn main() -> Result<()> {
//!     // Optional: Initialize logging
//!     // env_logger::init();
//!
//!     // An i2c-dev handle whose slave address has already been selected.
//!     let file = OpenOptions::new()
//!         .read(true)
//!         .write(true)
//!         .open("/dev/i2c-1")
//!         .map_err(tsl2561_lux::TransportError::from)?;
//!     let mut sensor = Tsl2561::new_default(IoTransport::new(file));
//!
//!     sensor.init(&SensorConfig {
//!         gain: Gain::High,
//!         ..SensorConfig::default()
//!     })?;
//!     println!("Chip id: 0x{:X}", sensor.read_chip_id()?);
//!     println!("Lux = {}", sensor.read_lux()?.value());
//!     Ok(())
//! }
//! ```
//!
//! ## Thread Safety
//!
//! The driver performs no locking. Every operation is a short blocking
//! sequence on the transport; a caller sharing the bus between threads must
//! wrap the driver (or the bus) in its own mutex.
//!
//! ## License
//!
//! This project is licensed under the WTFPL.

pub mod consts;
mod config;
mod device;
mod error;
pub mod interrupt;
pub mod lux;
pub mod timing;
pub mod transport;

pub use config::SensorConfig;
pub use consts::{ADDRESS_GND, ADDRESS_VDD, DEFAULT_ADDRESS};
pub use device::Tsl2561;
pub use error::{Error, Result, TransportError};
pub use interrupt::{InterruptMode, InterruptState, ThresholdBound};
pub use lux::{calculate_lux, empirical_lux, ChannelPair, LuxReading};
pub use timing::{Gain, IntegrationTime, TimingState};
pub use transport::{I2cAddress, IoTransport, Transport};
