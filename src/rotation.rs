//! Coordinate rotation utilities
//!
//! This module maps logical pixel coordinates to physical panel coordinates
//! and then to their location in page-organized display memory.
//!
//! SH1106 gdram is split into 8-row pages. Each byte holds 8 vertically
//! stacked pixels of one column, with bit 0 at the top of the page. A pixel's
//! byte is therefore `x + (y / 8) * width` and its bit is `y % 8`.
//!
//! ## Rotation Modes
//!
//! With `W`/`H` the active panel width/height:
//!
//! | Rotation  | Valid input    | x_panel   | y_panel   |
//! |-----------|----------------|-----------|-----------|
//! | Rotate0   | x < W, y < H   | x         | y         |
//! | Rotate90  | x < H, y < W   | W - y - 1 | x         |
//! | Rotate180 | x < W, y < H   | W - x - 1 | H - y - 1 |
//! | Rotate270 | x < H, y < W   | y         | H - x - 1 |
//!
//! ## Example
//!
//! ```
//! use sh1106::{rotation::{buffer_position, to_panel}, Dimensions, Rotation};
//!
//! let dims = match Dimensions::new(128, 64) {
//!     Ok(dims) => dims,
//!     Err(_) => return,
//! };
//!
//! // Logical origin lands in the bottom-right corner when rotated 180°
//! assert_eq!(to_panel(0, 0, dims, Rotation::Rotate180), Some((127, 63)));
//!
//! // x = 128 is past the right edge at 0°, but valid at 90° (width becomes 64)
//! assert_eq!(to_panel(128, 0, dims, Rotation::Rotate0), None);
//! assert_eq!(to_panel(63, 0, dims, Rotation::Rotate90), Some((127, 63)));
//!
//! // Pixel (5, 10) lives in page 1, bit 2
//! assert_eq!(buffer_position(5, 10, 128), (128 + 5, 0x04));
//! ```

use crate::config::{Dimensions, Rotation};

/// Map a logical coordinate to a physical panel coordinate
///
/// # Arguments
///
/// * `x` - Logical column
/// * `y` - Logical row
/// * `dims` - Active (unrotated) panel dimensions
/// * `rotation` - Rotation mode
///
/// # Returns
///
/// `Some((x_panel, y_panel))` inside `[0, width) × [0, height)`, or `None`
/// when the coordinate is outside the rotated visible area.
pub fn to_panel(x: u16, y: u16, dims: Dimensions, rotation: Rotation) -> Option<(u16, u16)> {
    let (w, h) = (dims.width, dims.height);
    let (max_x, max_y) = if rotation.is_transposed() { (h, w) } else { (w, h) };
    if x >= max_x || y >= max_y {
        return None;
    }

    Some(match rotation {
        Rotation::Rotate0 => (x, y),
        Rotation::Rotate90 => (w - y - 1, x),
        Rotation::Rotate180 => (w - x - 1, h - y - 1),
        Rotation::Rotate270 => (y, h - x - 1),
    })
}

/// Locate a physical pixel in a page-organized buffer
///
/// Returns `(byte_index, bit_mask)` for a buffer that is `width` bytes per
/// page.
pub fn buffer_position(x_panel: u16, y_panel: u16, width: u16) -> (usize, u8) {
    let index = x_panel as usize + (y_panel / 8) as usize * width as usize;
    let mask = 1 << (y_panel % 8);
    (index, mask)
}
