//! SH1106 OLED Display Driver
//!
//! A driver for the SH1106 monochrome OLED controller (132x64 display RAM,
//! usually wired to a 128x64 panel) over I2C or 4-wire SPI.
//!
//! ## Features
//!
//! - `no_std` compatible, no allocation
//! - `embedded-hal` v1.0 support
//! - `embedded-graphics` integration (with `graphics` feature)
//! - Buffered modes: draw into a caller-provided shadow buffer, then flush
//! - Direct I2C mode: per-pixel read-modify-write, no RAM needed
//! - Configurable panel window and blanking offset
//! - Rotation support
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::i2c::{I2c, Operation};
//! use sh1106::{Builder, Dimensions, Display, I2cInterface, Rotation};
//!
//! # struct MockI2c;
//! # impl embedded_hal::i2c::ErrorType for MockI2c { type Error = Infallible; }
//! # impl I2c for MockI2c {
//! #     fn transaction(
//! #         &mut self,
//! #         _address: u8,
//! #         _operations: &mut [Operation<'_>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let i2c = MockI2c;
//! # let mut rst = MockPin;
//! # let mut delay = MockDelay;
//! let interface = match I2cInterface::new(i2c, 0x3C) {
//!     Ok(interface) => interface,
//!     Err(_) => return,
//! };
//! let dims = match Dimensions::new(128, 64) {
//!     Ok(dims) => dims,
//!     Err(_) => return,
//! };
//! let config = match Builder::new().dimensions(dims).rotation(Rotation::Rotate180).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let mut buffer = [0u8; 1024];
//! let mut display = match Display::buffered(interface, &mut buffer, config) {
//!     Ok(display) => display,
//!     Err(_) => return,
//! };
//! let _ = display.init(&mut rst, &mut delay);
//! let _ = display.set_pixel(10, 10, true);
//! let _ = display.flush();
//! ```

#![no_std]

#[cfg(test)]
extern crate alloc;

/// SH1106 command definitions
pub mod command;
/// Display configuration types and builder
pub mod config;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// Hardware interface abstraction
pub mod interface;
/// Coordinate rotation utilities
pub mod rotation;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

pub use config::{Builder, Config, Dimensions, GDRAM_HEIGHT, GDRAM_PAGES, GDRAM_WIDTH, Rotation};
pub use display::{Display, Mode};
pub use error::{BuilderError, Error};
pub use interface::{
    ALTERNATE_I2C_ADDRESS, DEFAULT_I2C_ADDRESS, DisplayInterface, I2cInterface, InterfaceError,
    InterfaceKind, MAX_SPI_FREQUENCY_HZ, SPI_MODE, SpiInterface, hardware_reset,
};

#[cfg(feature = "graphics")]
pub use graphics::GraphicDisplay;
