//! Core display operations

use core::fmt::Debug;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::{debug, trace, warn};

use crate::command::{
    CHARGE_PUMP, CLOCK_DIVIDE, COLUMN_ADDRESS_HIGH, COLUMN_ADDRESS_LOW, COM_PINS,
    COM_SCAN_DECREASING, COM_SCAN_INCREASING, CONTRAST, DISPLAY_OFF, DISPLAY_OFFSET, DISPLAY_ON,
    ENTIRE_DISPLAY_OFF, INVERSION_OFF, INVERSION_ON, MEMORY_MODE, MULTIPLEX_RATIO, PAGE_ADDRESS,
    PRECHARGE_PERIOD, SEGMENT_REMAP, START_LINE, VCOMH_DESELECT,
};
use crate::config::{Config, Dimensions, GDRAM_PAGES, GDRAM_WIDTH, Rotation};
use crate::error::{BuilderError, Error};
use crate::interface::{DisplayInterface, InterfaceKind, hardware_reset};
use crate::rotation::{buffer_position, to_panel};

type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Streamed to gdram pages that have no shadow buffer behind them
const BLANK_PAGE: [u8; GDRAM_WIDTH as usize] = [0x00; GDRAM_WIDTH as usize];
const LIT_PAGE: [u8; GDRAM_WIDTH as usize] = [0xFF; GDRAM_WIDTH as usize];

/// Operating mode
///
/// Selects how pixel writes reach the controller. Fixed when the
/// [`Display`] is created.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Mode {
    /// Shadow buffer in RAM, pushed over I2C by [`Display::flush`]
    I2cBuffered,
    /// No shadow buffer; every pixel write is a read-modify-write over I2C
    ///
    /// Costs two bus transactions per pixel but needs no RAM.
    I2cDirect,
    /// Shadow buffer in RAM, pushed over 4-wire SPI by [`Display::flush`]
    Spi4Wire,
    /// 3-wire SPI (9-bit words, no D/C pin)
    ///
    /// Reserved. Creating a display in this mode fails with
    /// [`BuilderError::UnsupportedMode`].
    Spi3Wire,
}

impl Mode {
    /// Whether pixel writes go to a shadow buffer
    pub fn is_buffered(self) -> bool {
        !matches!(self, Self::I2cDirect)
    }

    /// Bus this mode runs over, `None` for reserved modes
    pub fn interface_kind(self) -> Option<InterfaceKind> {
        match self {
            Self::I2cBuffered | Self::I2cDirect => Some(InterfaceKind::TwoWire),
            Self::Spi4Wire => Some(InterfaceKind::Serial4Wire),
            Self::Spi3Wire => None,
        }
    }
}

/// Core display driver for SH1106
///
/// Owns the bus binding and, in buffered modes, borrows a caller-provided
/// shadow buffer for its whole lifetime. For embedded-graphics support, wrap
/// it in `GraphicDisplay` (requires `graphics` feature).
pub struct Display<'b, I>
where
    I: DisplayInterface,
{
    /// Hardware interface
    interface: I,
    /// Display configuration
    config: Config,
    /// Operating mode
    mode: Mode,
    /// Shadow buffer, exactly `dimensions.buffer_size()` bytes; `None` in direct mode
    buffer: Option<&'b mut [u8]>,
}

impl<'b, I> Display<'b, I>
where
    I: DisplayInterface,
{
    /// Create a buffered display
    ///
    /// The mode follows the interface: [`Mode::I2cBuffered`] for I2C,
    /// [`Mode::Spi4Wire`] for SPI. Only the first
    /// `config.dimensions.buffer_size()` bytes of `buffer` are used.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::BufferTooSmall`] if `buffer` is shorter than
    /// `config.dimensions.buffer_size()`.
    pub fn buffered(interface: I, buffer: &'b mut [u8], config: Config) -> Result<Self, BuilderError> {
        let mode = match I::KIND {
            InterfaceKind::TwoWire => Mode::I2cBuffered,
            InterfaceKind::Serial4Wire => Mode::Spi4Wire,
        };
        Self::with_mode(interface, mode, Some(buffer), config)
    }

    /// Create an unbuffered display that writes every pixel straight to gdram
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::ModeMismatch`] unless the interface is I2C.
    pub fn direct(interface: I, config: Config) -> Result<Self, BuilderError> {
        Self::with_mode(interface, Mode::I2cDirect, None, config)
    }

    /// Create a display in an explicit mode
    ///
    /// Nothing is sent to the controller; call [`init`](Self::init) next.
    ///
    /// # Errors
    ///
    /// - [`BuilderError::UnsupportedMode`] for [`Mode::Spi3Wire`]
    /// - [`BuilderError::ModeMismatch`] if `mode` needs another bus than `I` drives
    /// - [`BuilderError::MissingBuffer`] for a buffered mode without `buffer`
    /// - [`BuilderError::BufferTooSmall`] if `buffer` is too short
    pub fn with_mode(
        interface: I,
        mode: Mode,
        buffer: Option<&'b mut [u8]>,
        config: Config,
    ) -> Result<Self, BuilderError> {
        let kind = mode
            .interface_kind()
            .ok_or(BuilderError::UnsupportedMode(mode))?;
        if kind != I::KIND {
            return Err(BuilderError::ModeMismatch {
                mode,
                kind: I::KIND,
            });
        }

        let buffer = if mode.is_buffered() {
            let buffer = buffer.ok_or(BuilderError::MissingBuffer)?;
            let required = config.dimensions.buffer_size();
            if buffer.len() < required {
                return Err(BuilderError::BufferTooSmall {
                    required,
                    provided: buffer.len(),
                });
            }
            Some(&mut buffer[..required])
        } else {
            None
        };

        Ok(Self {
            interface,
            config,
            mode,
            buffer,
        })
    }

    /// Reset the controller, configure it and clear its whole gdram
    ///
    /// Runs the full power-up sequence even if some steps fail, so the panel
    /// ends up as configured as the bus allows. Each failure is logged.
    ///
    /// # Arguments
    ///
    /// * `rst` - Reset pin (output, active low)
    /// * `delay` - Delay implementation for the reset pulse
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] with the number of failed steps if anything
    /// went wrong. The shadow buffer is left untouched.
    pub fn init<RST, D>(&mut self, rst: &mut RST, delay: &mut D) -> DisplayResult<I>
    where
        RST: OutputPin,
        D: DelayNs,
    {
        debug!(
            "init: {:?}, {}x{}, column offset {}",
            self.mode,
            self.config.dimensions.width,
            self.config.dimensions.height,
            self.config.column_offset
        );

        let mut failures = tally("prepare", self.interface.prepare());
        failures += tally("reset", hardware_reset(rst, delay));

        for (command, parameter) in self.init_sequence() {
            let result = match parameter {
                Some(parameter) => self.interface.send_command_with_param(command, parameter),
                None => self.interface.send_command(command),
            };
            failures += tally("init command", result);
        }

        failures += self.fill_gdram(false);
        failures += tally("display on", self.interface.send_command(DISPLAY_ON));

        if failures > 0 {
            warn!("init finished with {failures} failed step(s)");
            return Err(Error::Io { failures });
        }
        debug!("init complete");
        Ok(())
    }

    /// Register writes of the power-up sequence, in order
    fn init_sequence(&self) -> [(u8, Option<u8>); 15] {
        let config = &self.config;
        let scan = if config.com_scan_decreasing {
            COM_SCAN_DECREASING
        } else {
            COM_SCAN_INCREASING
        };
        [
            (DISPLAY_OFF, None),
            (CLOCK_DIVIDE, Some(config.clock_divide)),
            (
                MULTIPLEX_RATIO,
                Some((config.dimensions.height - 1) as u8),
            ),
            (DISPLAY_OFFSET, Some(0x00)),
            (START_LINE, None),
            (CHARGE_PUMP, Some(config.charge_pump)),
            (MEMORY_MODE, Some(config.memory_mode)),
            (SEGMENT_REMAP | u8::from(config.segment_remap), None),
            (scan, None),
            (COM_PINS, Some(config.com_pins)),
            (CONTRAST, Some(config.contrast)),
            (PRECHARGE_PERIOD, Some(config.precharge)),
            (VCOMH_DESELECT, Some(config.vcomh)),
            (ENTIRE_DISPLAY_OFF, None),
            (INVERSION_OFF, None),
        ]
    }

    /// Write every gdram page, returning the number of failed transfers
    fn fill_gdram(&mut self, on: bool) -> usize {
        let width = self.config.dimensions.width as usize;
        let page_data = if on {
            &LIT_PAGE[..width]
        } else {
            &BLANK_PAGE[..width]
        };

        let mut failures = 0;
        for page in 0..GDRAM_PAGES {
            for command in page_commands(page, self.config.column_offset) {
                failures += tally("page address", self.interface.send_command(command));
            }
            failures += tally("gdram write", self.interface.send_data(page_data));
        }
        failures
    }

    /// Set or clear one pixel
    ///
    /// Coordinates are logical, i.e. after rotation. Buffered modes only
    /// touch the shadow buffer; direct mode updates gdram immediately.
    ///
    /// # Errors
    ///
    /// - [`Error::OutOfBounds`] if `(x, y)` is outside the rotated area (no bus traffic)
    /// - [`Error::Interface`] if the read-modify-write fails in direct mode
    pub fn set_pixel(&mut self, x: u16, y: u16, on: bool) -> DisplayResult<I> {
        let dims = self.config.dimensions;
        let (x_panel, y_panel) =
            to_panel(x, y, dims, self.config.rotation).ok_or(Error::OutOfBounds { x, y })?;

        if let Some(buffer) = self.buffer.as_deref_mut() {
            let (index, mask) = buffer_position(x_panel, y_panel, dims.width);
            if let Some(byte) = buffer.get_mut(index) {
                if on {
                    *byte |= mask;
                } else {
                    *byte &= !mask;
                }
            }
            return Ok(());
        }

        let page = (y_panel / 8) as u8;
        let column = self.config.column_offset + x_panel as u8;
        let mask = 1 << (y_panel % 8);
        let written = self
            .interface
            .read_modify_write(page, column, mask, on)
            .map_err(Error::Interface)?;
        trace!("rmw page {page} column {column}: {written:#04x}");
        Ok(())
    }

    /// Turn every visible pixel off
    ///
    /// Buffered modes zero the shadow buffer without bus traffic; direct mode
    /// writes zeros to every gdram page.
    ///
    /// # Errors
    ///
    /// In direct mode, returns [`Error::Io`] with the number of failed
    /// transfers. The remaining pages are still written.
    pub fn clear(&mut self) -> DisplayResult<I> {
        self.fill(false)
    }

    /// Turn every visible pixel on or off
    ///
    /// See [`clear`](Self::clear) for how each mode applies it.
    pub fn fill(&mut self, on: bool) -> DisplayResult<I> {
        if let Some(buffer) = self.buffer.as_deref_mut() {
            buffer.fill(if on { 0xFF } else { 0x00 });
            return Ok(());
        }
        match self.fill_gdram(on) {
            0 => Ok(()),
            failures => Err(Error::Io { failures }),
        }
    }

    /// Push the shadow buffer to the controller
    ///
    /// Writes all 8 gdram pages from the blanking offset. Pages below the
    /// active height are written blank. A no-op in direct mode.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Interface`] for the first failed transfer; later
    /// pages are not sent.
    pub fn flush(&mut self) -> DisplayResult<I> {
        let Some(buffer) = self.buffer.as_deref() else {
            return Ok(());
        };
        let width = self.config.dimensions.width as usize;
        let mut streamed = 0;

        for page in 0..GDRAM_PAGES {
            for command in page_commands(page, self.config.column_offset) {
                self.interface
                    .send_command(command)
                    .map_err(Error::Interface)?;
            }
            let start = page as usize * width;
            let data = buffer
                .get(start..start + width)
                .unwrap_or(&BLANK_PAGE[..width]);
            self.interface.send_data(data).map_err(Error::Interface)?;
            streamed += data.len();
        }
        debug!("flushed {streamed} bytes");
        Ok(())
    }

    /// Set panel brightness
    ///
    /// `ratio` is mapped linearly onto the contrast register, 0.0 → 0x00 and
    /// 1.0 → 0xFF.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBrightness`] for values outside `0.0..=1.0`
    /// or NaN, without touching the bus.
    pub fn set_brightness(&mut self, ratio: f32) -> DisplayResult<I> {
        if !(0.0..=1.0).contains(&ratio) {
            return Err(Error::InvalidBrightness);
        }
        let contrast = (ratio * 255.0) as u8;
        self.send_command_with_param(CONTRAST, contrast)
    }

    /// Invert the panel (lit pixels for 0 bits)
    pub fn set_inverted(&mut self, inverted: bool) -> DisplayResult<I> {
        self.send_command(if inverted { INVERSION_ON } else { INVERSION_OFF })
    }

    /// Switch the panel on or off
    ///
    /// Gdram and shadow buffer are kept while the panel is off.
    pub fn set_display_on(&mut self, on: bool) -> DisplayResult<I> {
        self.send_command(if on { DISPLAY_ON } else { DISPLAY_OFF })
    }

    /// Check that the controller responds
    ///
    /// Over I2C this checks that the address is acknowledged. SPI has no
    /// presence detection and always reports `true`.
    pub fn detect(&mut self) -> bool {
        self.interface.probe()
    }

    /// Change the rotation used by subsequent pixel writes
    ///
    /// Pixels already in the buffer or gdram are not moved.
    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.config.rotation = rotation;
    }

    /// Get display rotation
    pub fn rotation(&self) -> Rotation {
        self.config.rotation
    }

    /// Get display dimensions
    pub fn dimensions(&self) -> &Dimensions {
        &self.config.dimensions
    }

    /// Logical dimensions after rotation
    pub fn rotated_dimensions(&self) -> Dimensions {
        self.config.rotated_dimensions()
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Operating mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Shadow buffer contents, `None` in direct mode
    pub fn buffer(&self) -> Option<&[u8]> {
        self.buffer.as_deref()
    }

    /// Access the interface for raw commands
    pub fn interface_mut(&mut self) -> &mut I {
        &mut self.interface
    }

    /// Release the interface, ending the shadow buffer borrow
    pub fn release(self) -> I {
        self.interface
    }

    /// Send a command to the display controller
    fn send_command(&mut self, cmd: u8) -> DisplayResult<I> {
        self.interface.send_command(cmd).map_err(Error::Interface)
    }

    /// Send a command and its parameter to the display controller
    fn send_command_with_param(&mut self, cmd: u8, parameter: u8) -> DisplayResult<I> {
        self.interface
            .send_command_with_param(cmd, parameter)
            .map_err(Error::Interface)
    }
}

/// Page select and column address commands for the start of a page
fn page_commands(page: u8, column: u8) -> [u8; 3] {
    [
        PAGE_ADDRESS | page,
        COLUMN_ADDRESS_LOW | (column & 0x0F),
        COLUMN_ADDRESS_HIGH | (column >> 4),
    ]
}

/// Count and log a failed step of a best-effort sequence
fn tally<E: Debug>(step: &str, result: Result<(), E>) -> usize {
    match result {
        Ok(()) => 0,
        Err(e) => {
            warn!("{step} failed: {e:?}");
            1
        }
    }
}
