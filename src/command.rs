//! SH1106 command definitions
//!
//! This module defines the command bytes used to control the SH1106 OLED
//! controller, plus the I2C control bytes that frame them on the two-wire bus.
//!
//! ## Command Structure
//!
//! Over SPI, commands are sent with the DC pin low and display data with DC
//! high. Over I2C there is no DC pin; every transfer starts with a control
//! byte instead:
//!
//! | Control byte | Co | D/C | Meaning |
//! |--------------|----|-----|---------|
//! | `0x00`       | 0  | 0   | Command stream follows |
//! | `0x40`       | 0  | 1   | Data stream follows |
//! | `0x80`       | 1  | 0   | One command byte follows, then another control byte |
//! | `0xC0`       | 1  | 1   | One data byte follows, then another control byte |
//!
//! Several commands carry their argument in the low bits of the command byte
//! itself (page address, column nibbles, start line, segment remap). Those are
//! exposed as base values to be OR-ed with the argument.
//!
//! ## Example
//!
//! ```rust,no_run
//! use sh1106::{command, DisplayInterface};
//! # fn demo<I: DisplayInterface>(interface: &mut I) -> Result<(), I::Error> {
//! // Select page 3, column 2
//! interface.send_command(command::PAGE_ADDRESS | 3)?;
//! interface.send_command(command::COLUMN_ADDRESS_LOW | (2 & 0x0F))?;
//! interface.send_command(command::COLUMN_ADDRESS_HIGH | (2 >> 4))?;
//!
//! // Contrast takes a parameter byte
//! interface.send_command_with_param(command::CONTRAST, 0x7F)?;
//! # Ok(())
//! # }
//! ```

// Addressing commands

/// Set lower column address nibble (0x00 | nibble)
pub const COLUMN_ADDRESS_LOW: u8 = 0x00;

/// Set higher column address nibble (0x10 | nibble)
pub const COLUMN_ADDRESS_HIGH: u8 = 0x10;

/// Memory addressing mode (0x20)
///
/// Requires 1 parameter byte. The SH1106 only implements page addressing;
/// the command is still issued during init for SSD1306-compatible modules.
pub const MEMORY_MODE: u8 = 0x20;

/// Set display start line (0x40 | line)
pub const START_LINE: u8 = 0x40;

/// Set page address (0xB0 | page)
pub const PAGE_ADDRESS: u8 = 0xB0;

// Panel configuration commands

/// Contrast control (0x81)
///
/// Requires 1 parameter byte, 0x00..=0xFF.
pub const CONTRAST: u8 = 0x81;

/// DC-DC / charge pump control (0x8D)
///
/// Requires 1 parameter byte: 0x14 = enable, 0x10 = disable.
pub const CHARGE_PUMP: u8 = 0x8D;

/// Segment remap (0xA0 | 1 to mirror columns)
pub const SEGMENT_REMAP: u8 = 0xA0;

/// Resume display from gdram contents
pub const ENTIRE_DISPLAY_OFF: u8 = 0xA4;

/// Force every pixel on, ignoring gdram contents
pub const ENTIRE_DISPLAY_ON: u8 = 0xA5;

/// Normal display (1 bit = lit pixel)
pub const INVERSION_OFF: u8 = 0xA6;

/// Inverted display (0 bit = lit pixel)
pub const INVERSION_ON: u8 = 0xA7;

/// Multiplex ratio (0xA8)
///
/// Requires 1 parameter byte: number of active rows minus one.
pub const MULTIPLEX_RATIO: u8 = 0xA8;

/// Display off (panel sleep, gdram retained)
pub const DISPLAY_OFF: u8 = 0xAE;

/// Display on
pub const DISPLAY_ON: u8 = 0xAF;

/// COM output scan from COM0 to COM[N-1]
pub const COM_SCAN_INCREASING: u8 = 0xC0;

/// COM output scan from COM[N-1] to COM0
pub const COM_SCAN_DECREASING: u8 = 0xC8;

/// Display offset (0xD3)
///
/// Requires 1 parameter byte: vertical shift in rows.
pub const DISPLAY_OFFSET: u8 = 0xD3;

/// Display clock divide ratio / oscillator frequency (0xD5)
///
/// Requires 1 parameter byte.
pub const CLOCK_DIVIDE: u8 = 0xD5;

/// Pre-charge / discharge period (0xD9)
///
/// Requires 1 parameter byte.
pub const PRECHARGE_PERIOD: u8 = 0xD9;

/// COM pins hardware configuration (0xDA)
///
/// Requires 1 parameter byte.
pub const COM_PINS: u8 = 0xDA;

/// VCOM deselect level (0xDB)
///
/// Requires 1 parameter byte.
pub const VCOMH_DESELECT: u8 = 0xDB;

// Read-modify-write commands

/// Enter read-modify-write mode (0xE0)
///
/// Column address increments on write only, so a read followed by a write
/// lands on the same gdram byte.
pub const READ_MODIFY_WRITE_BEGIN: u8 = 0xE0;

/// Leave read-modify-write mode (0xEE)
///
/// Restores the column address saved at [`READ_MODIFY_WRITE_BEGIN`].
pub const READ_MODIFY_WRITE_END: u8 = 0xEE;

// I2C control bytes

/// Control byte: command stream follows (Co = 0, D/C = 0)
pub const CONTROL_COMMAND: u8 = 0x00;

/// Control byte: data stream follows (Co = 0, D/C = 1)
pub const CONTROL_DATA: u8 = 0x40;

/// Control byte: single command byte, more control bytes follow (Co = 1, D/C = 0)
pub const CONTROL_COMMAND_CONTINUE: u8 = 0x80;

/// Control byte: single data byte, more control bytes follow (Co = 1, D/C = 1)
pub const CONTROL_DATA_CONTINUE: u8 = 0xC0;
