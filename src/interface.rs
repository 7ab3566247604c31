//! Hardware interface abstraction
//!
//! This module provides the [`DisplayInterface`] trait and its two bus
//! bindings for the SH1106 controller:
//!
//! - [`I2cInterface`] - two-wire bus, control-byte framing
//! - [`SpiInterface`] - four-wire SPI bus with explicit CS and D/C pins
//!
//! ## Hardware Requirements
//!
//! Both bindings need a reset line (output, active low), passed to
//! [`Display::init`](crate::display::Display::init). The SPI binding also
//! needs:
//! - **CS**: Chip select (output, active low)
//! - **DC**: Data/Command select (output, low=command, high=data)
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::i2c::{I2c, Operation};
//! use sh1106::{DisplayInterface, I2cInterface};
//! # use core::convert::Infallible;
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
//! // Address is validated up front; only 0x3C and 0x3D are accepted
//! let mut interface = match I2cInterface::new(MockI2c, 0x3C) {
//!     Ok(interface) => interface,
//!     Err(_) => return,
//! };
//!
//! // Display off
//! let _ = interface.send_command(0xAE);
//!
//! // Send data
//! let _ = interface.send_data(&[0xFF, 0x00, 0xFF]);
//! ```

use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::{I2c, Operation};
use embedded_hal::spi::{MODE_0, Mode as SpiMode, SpiBus};

use crate::command::{
    COLUMN_ADDRESS_HIGH, COLUMN_ADDRESS_LOW, CONTROL_COMMAND, CONTROL_COMMAND_CONTINUE,
    CONTROL_DATA, CONTROL_DATA_CONTINUE, PAGE_ADDRESS, READ_MODIFY_WRITE_BEGIN,
    READ_MODIFY_WRITE_END,
};
use crate::error::BuilderError;

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Default SH1106 I2C address (SA0 low)
pub const DEFAULT_I2C_ADDRESS: u8 = 0x3C;

/// Alternate SH1106 I2C address (SA0 high)
pub const ALTERNATE_I2C_ADDRESS: u8 = 0x3D;

/// Fastest SPI clock accepted by [`SpiInterface::new`]
pub const MAX_SPI_FREQUENCY_HZ: u32 = 2_000_000;

/// SPI mode the SH1106 expects (CPOL = 0, CPHA = 0, MSB first)
pub const SPI_MODE: SpiMode = MODE_0;

/// Bus a [`DisplayInterface`] drives
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InterfaceKind {
    /// Two-wire I2C bus
    TwoWire,
    /// Four-wire SPI bus (SCK, MOSI, CS, D/C)
    Serial4Wire,
}

/// Trait for hardware interface to SH1106 controller
///
/// This trait abstracts over the bus the controller sits on, allowing the
/// [`Display`](crate::display::Display) to work with any I2C or SPI
/// implementation that satisfies embedded-hal traits.
///
/// ## Implementing
///
/// For most cases, use [`I2cInterface`] or [`SpiInterface`]. If you need
/// custom behavior (e.g., a bus shared behind a lock), implement this trait
/// on your own type.
pub trait DisplayInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Bus this interface drives
    const KIND: InterfaceKind;

    /// Put framing pins in their idle state before the first transfer
    ///
    /// Called once by [`Display::init`](crate::display::Display::init)
    /// before the reset pulse.
    fn prepare(&mut self) -> InterfaceResult<(), Self::Error> {
        Ok(())
    }

    /// Send a bare command byte to the controller
    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error>;

    /// Send a command byte followed by one parameter byte
    ///
    /// Both bytes go out in the same bus transaction.
    fn send_command_with_param(
        &mut self,
        command: u8,
        parameter: u8,
    ) -> InterfaceResult<(), Self::Error>;

    /// Send a single display data byte
    fn send_data_byte(&mut self, data: u8) -> InterfaceResult<(), Self::Error> {
        self.send_data(&[data])
    }

    /// Send a block of display data bytes
    ///
    /// The controller's column address auto-increments after each byte.
    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error>;

    /// Update one gdram byte in place
    ///
    /// Addresses `page`/`column`, reads the current byte back and writes it
    /// again with `mask` set (`set == true`) or cleared. Returns the byte
    /// written.
    ///
    /// # Errors
    ///
    /// Interfaces that cannot read gdram back (SPI) always fail.
    fn read_modify_write(
        &mut self,
        page: u8,
        column: u8,
        mask: u8,
        set: bool,
    ) -> InterfaceResult<u8, Self::Error>;

    /// Check that the controller is present
    ///
    /// Busses without an acknowledge mechanism always report `true`.
    fn probe(&mut self) -> bool;
}

/// Pulse the active-low reset line
///
/// Drives `rst` low for 1ms, then high, then waits another 1ms for the
/// controller to come out of reset.
pub fn hardware_reset<RST, D>(rst: &mut RST, delay: &mut D) -> Result<(), RST::Error>
where
    RST: OutputPin,
    D: DelayNs,
{
    rst.set_low()?;
    delay.delay_ms(1);
    rst.set_high()?;
    delay.delay_ms(1);
    Ok(())
}

/// I2C interface implementation for SH1106
///
/// Every command, command+parameter pair and data block is one bus
/// transaction, prefixed with a control byte.
///
/// ## Type Parameters
///
/// * `I2C` - Bus implementing [`I2c`] with 7-bit addressing
#[derive(Debug)]
pub struct I2cInterface<I2C> {
    /// I2C bus
    i2c: I2C,
    /// 7-bit device address
    address: u8,
}

impl<I2C> I2cInterface<I2C>
where
    I2C: I2c,
{
    /// Create a new I2C interface
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::InvalidAddress`] unless `address` is 0x3C or
    /// 0x3D. The bus is not touched.
    pub fn new(i2c: I2C, address: u8) -> Result<Self, BuilderError> {
        if address != DEFAULT_I2C_ADDRESS && address != ALTERNATE_I2C_ADDRESS {
            return Err(BuilderError::InvalidAddress(address));
        }
        Ok(Self { i2c, address })
    }

    /// Device address
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Release the bus
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> DisplayInterface for I2cInterface<I2C>
where
    I2C: I2c,
{
    type Error = I2C::Error;

    const KIND: InterfaceKind = InterfaceKind::TwoWire;

    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error> {
        self.i2c.write(self.address, &[CONTROL_COMMAND, command])
    }

    fn send_command_with_param(
        &mut self,
        command: u8,
        parameter: u8,
    ) -> InterfaceResult<(), Self::Error> {
        self.i2c
            .write(self.address, &[CONTROL_COMMAND, command, parameter])
    }

    fn send_data_byte(&mut self, data: u8) -> InterfaceResult<(), Self::Error> {
        self.i2c.write(self.address, &[CONTROL_DATA, data])
    }

    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error> {
        // Adjacent writes in one transaction go out without a repeated start
        self.i2c.transaction(
            self.address,
            &mut [Operation::Write(&[CONTROL_DATA]), Operation::Write(data)],
        )
    }

    fn read_modify_write(
        &mut self,
        page: u8,
        column: u8,
        mask: u8,
        set: bool,
    ) -> InterfaceResult<u8, Self::Error> {
        let begin = [
            CONTROL_COMMAND_CONTINUE,
            PAGE_ADDRESS | page,
            CONTROL_COMMAND_CONTINUE,
            COLUMN_ADDRESS_LOW | (column & 0x0F),
            CONTROL_COMMAND_CONTINUE,
            COLUMN_ADDRESS_HIGH | (column >> 4),
            CONTROL_COMMAND_CONTINUE,
            READ_MODIFY_WRITE_BEGIN,
            CONTROL_DATA,
        ];
        // First byte read after an address change is a dummy
        let mut read = [0u8; 2];
        self.i2c.write_read(self.address, &begin, &mut read)?;

        let updated = if set { read[1] | mask } else { read[1] & !mask };
        self.i2c.write(
            self.address,
            &[
                CONTROL_DATA_CONTINUE,
                updated,
                CONTROL_COMMAND,
                READ_MODIFY_WRITE_END,
            ],
        )?;
        Ok(updated)
    }

    /// Zero-length write to the device address
    ///
    /// Some HALs (rp2040-hal among them) refuse empty writes; on those this
    /// always reports `false`.
    fn probe(&mut self) -> bool {
        self.i2c.write(self.address, &[]).is_ok()
    }
}

/// Errors that can occur at the SPI interface level
///
/// Generic over SPI and GPIO error types.
#[derive(Debug)]
pub enum InterfaceError<SpiErr, PinErr> {
    /// SPI communication error
    Spi(SpiErr),
    /// GPIO pin error (CS or DC)
    Pin(PinErr),
    /// Operation the bus cannot carry out (gdram read-back over SPI)
    Unsupported,
}

impl<SpiErr: Debug, PinErr: Debug> core::fmt::Display for InterfaceError<SpiErr, PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Spi(e) => write!(f, "SPI error: {e:?}"),
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
            Self::Unsupported => write!(f, "Operation not supported over SPI"),
        }
    }
}

impl<SpiErr: Debug, PinErr: Debug> core::error::Error for InterfaceError<SpiErr, PinErr> {}

/// Four-wire SPI interface implementation for SH1106
///
/// Implements [`DisplayInterface`] over an embedded-hal v1.0 [`SpiBus`] with
/// chip select driven by the driver, so the D/C level is settled before CS
/// is asserted for every transfer.
///
/// ## Type Parameters
///
/// * `SPI` - SPI bus implementing [`SpiBus`], configured for [`SPI_MODE`]
/// * `CS` - Chip select pin implementing [`OutputPin`]
/// * `DC` - Data/Command pin implementing [`OutputPin`]
#[derive(Debug)]
pub struct SpiInterface<SPI, CS, DC> {
    /// SPI bus for communication
    spi: SPI,
    /// Chip select pin (active low)
    cs: CS,
    /// Data/Command select pin (low=command, high=data)
    dc: DC,
    /// Validated bus clock in Hz
    frequency_hz: u32,
}

impl<SPI, CS, DC, PinErr> SpiInterface<SPI, CS, DC>
where
    SPI: SpiBus,
    CS: OutputPin<Error = PinErr>,
    DC: OutputPin<Error = PinErr>,
{
    /// Create a new SPI interface
    ///
    /// `frequency_hz` is the clock the bus was configured with. The SPI
    /// peripheral itself is set up by the HAL; it must run [`SPI_MODE`].
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::UnsupportedSpiFrequency`] if `frequency_hz`
    /// exceeds [`MAX_SPI_FREQUENCY_HZ`]. No pin or bus is touched.
    pub fn new(spi: SPI, cs: CS, dc: DC, frequency_hz: u32) -> Result<Self, BuilderError> {
        if frequency_hz > MAX_SPI_FREQUENCY_HZ {
            return Err(BuilderError::UnsupportedSpiFrequency {
                hz: frequency_hz,
                max: MAX_SPI_FREQUENCY_HZ,
            });
        }
        Ok(Self {
            spi,
            cs,
            dc,
            frequency_hz,
        })
    }

    /// Bus clock in Hz
    pub fn frequency_hz(&self) -> u32 {
        self.frequency_hz
    }

    /// Release the bus and pins
    pub fn release(self) -> (SPI, CS, DC) {
        (self.spi, self.cs, self.dc)
    }

    /// Write `bytes` in one chip-select window with DC at the given level
    fn transfer(
        &mut self,
        data_mode: bool,
        bytes: &[u8],
    ) -> InterfaceResult<(), InterfaceError<SPI::Error, PinErr>> {
        let level = if data_mode {
            self.dc.set_high()
        } else {
            self.dc.set_low()
        };
        level.map_err(InterfaceError::Pin)?;

        self.cs.set_low().map_err(InterfaceError::Pin)?;
        let written = self.spi.write(bytes).and_then(|()| self.spi.flush());
        // Release CS even when the transfer failed
        let released = self.cs.set_high();

        written.map_err(InterfaceError::Spi)?;
        released.map_err(InterfaceError::Pin)
    }
}

impl<SPI, CS, DC, PinErr> DisplayInterface for SpiInterface<SPI, CS, DC>
where
    SPI: SpiBus,
    SPI::Error: Debug,
    CS: OutputPin<Error = PinErr>,
    DC: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<SPI::Error, PinErr>;

    const KIND: InterfaceKind = InterfaceKind::Serial4Wire;

    fn prepare(&mut self) -> InterfaceResult<(), Self::Error> {
        self.cs.set_high().map_err(InterfaceError::Pin)
    }

    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error> {
        self.transfer(false, &[command])
    }

    fn send_command_with_param(
        &mut self,
        command: u8,
        parameter: u8,
    ) -> InterfaceResult<(), Self::Error> {
        self.transfer(false, &[command, parameter])
    }

    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.transfer(true, data)
    }

    fn read_modify_write(
        &mut self,
        _page: u8,
        _column: u8,
        _mask: u8,
        _set: bool,
    ) -> InterfaceResult<u8, Self::Error> {
        Err(InterfaceError::Unsupported)
    }

    fn probe(&mut self) -> bool {
        true
    }
}
