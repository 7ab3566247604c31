//! Display configuration types and builder

pub use crate::error::{BuilderError, GDRAM_HEIGHT, GDRAM_PAGES, GDRAM_WIDTH};

/// Visible window dimensions
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dimensions {
    /// Active width in pixels (visible gdram columns)
    pub width: u16,
    /// Active height in pixels (visible gdram rows)
    pub height: u16,
}

impl Dimensions {
    /// Create new dimensions with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` if:
    /// - width is 0 or greater than GDRAM_WIDTH (132)
    /// - height is 0 or greater than GDRAM_HEIGHT (64)
    pub fn new(width: u16, height: u16) -> Result<Self, BuilderError> {
        if width == 0 || width > GDRAM_WIDTH || height == 0 || height > GDRAM_HEIGHT {
            return Err(BuilderError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Number of 8-row pages covering the active height
    pub fn pages(&self) -> usize {
        self.height.div_ceil(8) as usize
    }

    /// Calculate required shadow buffer size in bytes
    ///
    /// One byte per column per page: `width * ceil(height / 8)`.
    pub fn buffer_size(&self) -> usize {
        self.width as usize * self.pages()
    }

    /// Default blanking offset that centers the window in gdram
    pub fn centered_offset(&self) -> u8 {
        ((GDRAM_WIDTH - self.width) / 2) as u8
    }
}

/// Display rotation relative to native orientation
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Rotation {
    /// No rotation
    #[default]
    Rotate0,
    /// Rotate 90 degrees clockwise
    Rotate90,
    /// Rotate 180 degrees
    Rotate180,
    /// Rotate 270 degrees clockwise
    Rotate270,
}

impl Rotation {
    /// Whether logical width and height are swapped relative to the panel
    pub fn is_transposed(self) -> bool {
        matches!(self, Self::Rotate90 | Self::Rotate270)
    }
}

impl TryFrom<u8> for Rotation {
    type Error = BuilderError;

    /// Convert a quarter-turn count (0..=3) into a rotation
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Rotate0),
            1 => Ok(Self::Rotate90),
            2 => Ok(Self::Rotate180),
            3 => Ok(Self::Rotate270),
            other => Err(BuilderError::InvalidRotation(other)),
        }
    }
}

impl From<Rotation> for u8 {
    fn from(rotation: Rotation) -> Self {
        match rotation {
            Rotation::Rotate0 => 0,
            Rotation::Rotate90 => 1,
            Rotation::Rotate180 => 2,
            Rotation::Rotate270 => 3,
        }
    }
}

/// Display configuration
///
/// This struct holds the panel geometry and the register values sent during
/// initialization. Use `Builder` to create a Config.
#[derive(Clone, Debug)]
pub struct Config {
    /// Visible window dimensions
    pub dimensions: Dimensions,
    /// Display rotation
    pub rotation: Rotation,
    /// Gdram columns left of the visible window
    pub column_offset: u8,
    /// Display clock divide ratio / oscillator frequency
    pub clock_divide: u8,
    /// Charge pump setting
    pub charge_pump: u8,
    /// Memory addressing mode
    pub memory_mode: u8,
    /// Mirror columns (segment remap)
    pub segment_remap: bool,
    /// Scan COM outputs from COM[N-1] to COM0
    pub com_scan_decreasing: bool,
    /// COM pins hardware configuration
    pub com_pins: u8,
    /// Contrast applied at init
    pub contrast: u8,
    /// Pre-charge period
    pub precharge: u8,
    /// VCOM deselect level
    pub vcomh: u8,
}

impl Config {
    /// Get the rotated dimensions based on rotation setting
    pub fn rotated_dimensions(&self) -> Dimensions {
        if self.rotation.is_transposed() {
            Dimensions {
                width: self.dimensions.height,
                height: self.dimensions.width,
            }
        } else {
            self.dimensions
        }
    }
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```rust,no_run
/// use sh1106::{Builder, Dimensions, Rotation};
///
/// let dims = match Dimensions::new(128, 64) {
///     Ok(dims) => dims,
///     Err(_) => return,
/// };
/// let config = match Builder::new().dimensions(dims).rotation(Rotation::Rotate180).build() {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// assert_eq!(config.column_offset, 2);
/// ```
#[must_use]
pub struct Builder {
    /// Display dimensions (required)
    dimensions: Option<Dimensions>,
    /// Display rotation
    rotation: Rotation,
    /// Blanking offset; `None` centers the window
    column_offset: Option<u8>,
    clock_divide: u8,
    charge_pump: u8,
    memory_mode: u8,
    segment_remap: bool,
    com_scan_decreasing: bool,
    com_pins: u8,
    contrast: u8,
    precharge: u8,
    vcomh: u8,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            dimensions: None,
            rotation: Rotation::Rotate0,
            column_offset: None,
            // Oscillator default frequency, divide ratio 1
            clock_divide: 0x80,
            // Internal DC-DC on
            charge_pump: 0x14,
            // Horizontal addressing (ignored by SH1106, kept for SSD1306 clones)
            memory_mode: 0x00,
            segment_remap: true,
            com_scan_decreasing: true,
            // Alternative COM pin configuration
            com_pins: 0x12,
            contrast: 0x80,
            precharge: 0xF1,
            vcomh: 0x40,
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set display dimensions (required)
    pub fn dimensions(mut self, dims: Dimensions) -> Self {
        self.dimensions = Some(dims);
        self
    }

    /// Set display rotation
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the number of hidden gdram columns left of the visible window
    ///
    /// Defaults to centering the window, which gives 2 for 128-wide panels.
    /// Other widths get `(132 - width) / 2`, not the fixed 2 many Arduino
    /// SH1106 libraries hard-code; set it explicitly when porting from one.
    pub fn column_offset(mut self, offset: u8) -> Self {
        self.column_offset = Some(offset);
        self
    }

    /// Set display clock divide ratio / oscillator frequency
    pub fn clock_divide(mut self, value: u8) -> Self {
        self.clock_divide = value;
        self
    }

    /// Set charge pump register value
    pub fn charge_pump(mut self, value: u8) -> Self {
        self.charge_pump = value;
        self
    }

    /// Set memory addressing mode register value
    pub fn memory_mode(mut self, value: u8) -> Self {
        self.memory_mode = value;
        self
    }

    /// Mirror columns
    pub fn segment_remap(mut self, value: bool) -> Self {
        self.segment_remap = value;
        self
    }

    /// Scan COM outputs in decreasing order
    pub fn com_scan_decreasing(mut self, value: bool) -> Self {
        self.com_scan_decreasing = value;
        self
    }

    /// Set COM pins hardware configuration
    pub fn com_pins(mut self, value: u8) -> Self {
        self.com_pins = value;
        self
    }

    /// Set contrast applied during init
    pub fn contrast(mut self, value: u8) -> Self {
        self.contrast = value;
        self
    }

    /// Set pre-charge period
    pub fn precharge(mut self, value: u8) -> Self {
        self.precharge = value;
        self
    }

    /// Set VCOM deselect level
    pub fn vcomh(mut self, value: u8) -> Self {
        self.vcomh = value;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::MissingDimensions` if dimensions were not set,
    /// or `BuilderError::InvalidColumnOffset` if the offset pushes the
    /// window past column 131.
    pub fn build(self) -> Result<Config, BuilderError> {
        let dimensions = self.dimensions.ok_or(BuilderError::MissingDimensions)?;
        let column_offset = self
            .column_offset
            .unwrap_or_else(|| dimensions.centered_offset());
        if dimensions.width + column_offset as u16 > GDRAM_WIDTH {
            return Err(BuilderError::InvalidColumnOffset {
                offset: column_offset,
                width: dimensions.width,
            });
        }
        Ok(Config {
            dimensions,
            rotation: self.rotation,
            column_offset,
            clock_divide: self.clock_divide,
            charge_pump: self.charge_pump,
            memory_mode: self.memory_mode,
            segment_remap: self.segment_remap,
            com_scan_decreasing: self.com_scan_decreasing,
            com_pins: self.com_pins,
            contrast: self.contrast,
            precharge: self.precharge,
            vcomh: self.vcomh,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_bounds() {
        assert!(Dimensions::new(128, 64).is_ok());
        assert!(Dimensions::new(132, 64).is_ok());
        assert!(Dimensions::new(133, 64).is_err());
        assert!(Dimensions::new(128, 65).is_err());
        assert!(matches!(
            Dimensions::new(0, 32),
            Err(BuilderError::InvalidDimensions {
                width: 0,
                height: 32
            })
        ));
    }

    #[test]
    fn test_buffer_size_rounds_pages_up() {
        assert_eq!(Dimensions::new(128, 64).unwrap().buffer_size(), 1024);
        assert_eq!(Dimensions::new(128, 32).unwrap().buffer_size(), 512);
        assert_eq!(Dimensions::new(64, 20).unwrap().buffer_size(), 64 * 3);
    }

    #[test]
    fn test_default_offset_is_centered() {
        let config = Builder::new()
            .dimensions(Dimensions::new(128, 64).unwrap())
            .build()
            .unwrap();
        assert_eq!(config.column_offset, 2);

        let config = Builder::new()
            .dimensions(Dimensions::new(132, 64).unwrap())
            .build()
            .unwrap();
        assert_eq!(config.column_offset, 0);

        // Not the fixed 2 used for 128-wide modules
        let config = Builder::new()
            .dimensions(Dimensions::new(96, 16).unwrap())
            .build()
            .unwrap();
        assert_eq!(config.column_offset, 18);

        let config = Builder::new()
            .dimensions(Dimensions::new(96, 16).unwrap())
            .column_offset(2)
            .build()
            .unwrap();
        assert_eq!(config.column_offset, 2);
    }

    #[test]
    fn test_offset_past_gdram_rejected() {
        let result = Builder::new()
            .dimensions(Dimensions::new(128, 64).unwrap())
            .column_offset(5)
            .build();
        assert_eq!(
            result.err(),
            Some(BuilderError::InvalidColumnOffset {
                offset: 5,
                width: 128
            })
        );
    }

    #[test]
    fn test_missing_dimensions() {
        assert!(matches!(
            Builder::new().build(),
            Err(BuilderError::MissingDimensions)
        ));
    }

    #[test]
    fn test_rotation_from_raw() {
        for raw in 0..4u8 {
            let rotation = Rotation::try_from(raw).unwrap();
            assert_eq!(u8::from(rotation), raw);
        }
        assert_eq!(Rotation::try_from(4), Err(BuilderError::InvalidRotation(4)));
        assert_eq!(
            Rotation::try_from(255),
            Err(BuilderError::InvalidRotation(255))
        );
    }

    #[test]
    fn test_rotated_dimensions_swap() {
        let mut config = Builder::new()
            .dimensions(Dimensions::new(128, 32).unwrap())
            .build()
            .unwrap();
        assert_eq!(config.rotated_dimensions(), Dimensions { width: 128, height: 32 });
        config.rotation = Rotation::Rotate90;
        assert_eq!(config.rotated_dimensions(), Dimensions { width: 32, height: 128 });
        config.rotation = Rotation::Rotate180;
        assert_eq!(config.rotated_dimensions(), Dimensions { width: 128, height: 32 });
        config.rotation = Rotation::Rotate270;
        assert_eq!(config.rotated_dimensions(), Dimensions { width: 32, height: 128 });
    }
}
