//! Error types for the driver
//!
//! This module defines error types for configuration ([`BuilderError`]) and
//! display operations ([`Error`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Invalid configuration, detected before any bus or GPIO access
//! - [`Error`] - Runtime errors during display operations
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level SPI/GPIO communication errors
//!
//! ## Example
//!
//! ```
//! use sh1106::{Builder, BuilderError, Dimensions, Rotation};
//!
//! // Missing dimensions
//! let result = Builder::new().build();
//! assert!(matches!(result, Err(BuilderError::MissingDimensions)));
//!
//! // Wider than the controller's gdram
//! assert!(Dimensions::new(140, 64).is_err());
//!
//! // Raw rotation values outside 0..=3
//! assert!(matches!(Rotation::try_from(4), Err(BuilderError::InvalidRotation(4))));
//! ```

use crate::display::Mode;
use crate::interface::{DisplayInterface, InterfaceKind};

/// Width of the SH1106 display RAM in columns
///
/// The controller always has 132 columns of gdram; most panels only wire 128
/// of them, centered, which leaves a blanking offset on the left.
pub const GDRAM_WIDTH: u16 = 132;

/// Height of the SH1106 display RAM in rows
pub const GDRAM_HEIGHT: u16 = 64;

/// Number of 8-row pages in the SH1106 display RAM
pub const GDRAM_PAGES: u8 = GDRAM_HEIGHT.div_ceil(8) as u8;

/// Errors that can occur when interacting with the display
///
/// Generic over the interface type to preserve the specific error type.
/// This allows error handling code to match on the underlying hardware error.
pub enum Error<I: DisplayInterface> {
    /// Interface error (I2C, SPI or GPIO)
    ///
    /// Wraps the error of the first primitive that failed. Pixel writes and
    /// flushes stop at the first failure and report it here.
    Interface(I::Error),
    /// One or more steps of a best-effort sequence failed
    ///
    /// Initialization and the direct-mode gdram clear keep sending after a
    /// failed step so the panel is not left half configured; the individual
    /// errors are logged and only their count is reported.
    Io {
        /// Number of steps that failed
        failures: usize,
    },
    /// Pixel coordinate outside the rotated visible area
    ///
    /// Detected before any bus traffic.
    OutOfBounds {
        /// Requested x coordinate
        x: u16,
        /// Requested y coordinate
        y: u16,
    },
    /// Brightness ratio outside `0.0..=1.0` (or NaN)
    InvalidBrightness,
}

impl<I: DisplayInterface> core::fmt::Debug for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(e) => f.debug_tuple("Interface").field(e).finish(),
            Self::Io { failures } => f.debug_struct("Io").field("failures", failures).finish(),
            Self::OutOfBounds { x, y } => f
                .debug_struct("OutOfBounds")
                .field("x", x)
                .field("y", y)
                .finish(),
            Self::InvalidBrightness => write!(f, "InvalidBrightness"),
        }
    }
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(e) => write!(f, "Interface error: {e:?}"),
            Self::Io { failures } => write!(f, "I/O error: {failures} step(s) failed"),
            Self::OutOfBounds { x, y } => write!(f, "Pixel out of bounds: ({x}, {y})"),
            Self::InvalidBrightness => write!(f, "Brightness must be within 0.0..=1.0"),
        }
    }
}

impl<I: DisplayInterface> core::error::Error for Error<I> {}

/// Errors that can occur when building configuration
///
/// These errors occur before the display is created, so no bus transaction
/// or pin change has happened when one is returned.
#[derive(Debug, PartialEq)]
pub enum BuilderError {
    /// Dimensions were not specified
    ///
    /// [`Builder::dimensions()`](crate::config::Builder::dimensions) must be called before building.
    MissingDimensions,
    /// Invalid dimensions provided
    ///
    /// See [`Dimensions::new()`](crate::config::Dimensions::new) for constraints.
    InvalidDimensions {
        /// Active width requested
        width: u16,
        /// Active height requested
        height: u16,
    },
    /// Column offset pushes the visible window past the end of gdram
    InvalidColumnOffset {
        /// Offset requested
        offset: u8,
        /// Active width
        width: u16,
    },
    /// I2C address is neither 0x3C nor 0x3D
    InvalidAddress(u8),
    /// SPI clock faster than the controller supports
    UnsupportedSpiFrequency {
        /// Frequency requested in Hz
        hz: u32,
        /// Maximum frequency in Hz
        max: u32,
    },
    /// Raw rotation value outside 0..=3
    InvalidRotation(u8),
    /// Operating mode reserved but not implemented
    UnsupportedMode(Mode),
    /// Operating mode does not match the bus the interface drives
    ModeMismatch {
        /// Mode requested
        mode: Mode,
        /// Bus the interface drives
        kind: InterfaceKind,
    },
    /// Buffered mode requested without a shadow buffer
    MissingBuffer,
    /// Shadow buffer is too small for the display
    ///
    /// The provided buffer must be at least `dimensions.buffer_size()` bytes.
    BufferTooSmall {
        /// Required buffer size in bytes
        required: usize,
        /// Provided buffer size in bytes
        provided: usize,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingDimensions => write!(f, "Dimensions must be specified"),
            Self::InvalidDimensions { width, height } => write!(
                f,
                "Invalid dimensions {width}x{height} (max {GDRAM_WIDTH}x{GDRAM_HEIGHT})"
            ),
            Self::InvalidColumnOffset { offset, width } => write!(
                f,
                "Column offset {offset} with width {width} exceeds {GDRAM_WIDTH} gdram columns"
            ),
            Self::InvalidAddress(address) => {
                write!(f, "Invalid I2C address {address:#04x} (expected 0x3C or 0x3D)")
            }
            Self::UnsupportedSpiFrequency { hz, max } => {
                write!(f, "SPI frequency {hz} Hz exceeds maximum of {max} Hz")
            }
            Self::InvalidRotation(value) => write!(f, "Invalid rotation {value}"),
            Self::UnsupportedMode(mode) => write!(f, "Mode {mode:?} is not supported"),
            Self::ModeMismatch { mode, kind } => {
                write!(f, "Mode {mode:?} cannot run over a {kind:?} interface")
            }
            Self::MissingBuffer => write!(f, "Buffered mode requires a shadow buffer"),
            Self::BufferTooSmall { required, provided } => write!(
                f,
                "Buffer too small: required {required} bytes, provided {provided}"
            ),
        }
    }
}

impl core::error::Error for BuilderError {}
