//! Graphics support via embedded-graphics
//!
//! This module provides the [`GraphicDisplay`] struct which wraps [`Display`]
//! and implements the [`DrawTarget`](embedded_graphics_core::draw_target::DrawTarget) trait from
//! the embedded-graphics ecosystem.
//!
//! Pixels are [`BinaryColor`]: `On` lights the pixel. Drawing outside the
//! rotated visible area is clipped silently. In direct mode every drawn pixel
//! is a read-modify-write, so prefer a buffered mode for anything larger than
//! a few glyphs.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_graphics::{
//!     mono_font::{ascii::FONT_6X10, MonoTextStyle},
//!     pixelcolor::BinaryColor,
//!     prelude::*,
//!     primitives::{Circle, PrimitiveStyle, Rectangle},
//!     text::Text,
//! };
//! use sh1106::{Builder, Dimensions, Display, GraphicDisplay, I2cInterface};
//! # use core::convert::Infallible;
//! # use embedded_hal::i2c::{I2c, Operation};
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
//! # let Ok(interface) = I2cInterface::new(MockI2c, 0x3C) else { return };
//! # let Ok(dims) = Dimensions::new(128, 64) else { return };
//! # let Ok(config) = Builder::new().dimensions(dims).build() else { return };
//! let mut buffer = [0u8; 1024];
//! let Ok(display) = Display::buffered(interface, &mut buffer, config) else {
//!     return;
//! };
//! let mut display = GraphicDisplay::new(display);
//!
//! let _ = display.clear(BinaryColor::Off);
//!
//! let _ = Rectangle::new(Point::new(0, 0), Size::new(128, 64))
//!     .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
//!     .draw(&mut display);
//!
//! let _ = Circle::new(Point::new(96, 16), 24)
//!     .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
//!     .draw(&mut display);
//!
//! let _ = Text::new(
//!     "Hello, SH1106!",
//!     Point::new(6, 36),
//!     MonoTextStyle::new(&FONT_6X10, BinaryColor::On),
//! )
//! .draw(&mut display);
//!
//! // Push the shadow buffer to the panel
//! let _ = display.flush();
//! ```

use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    pixelcolor::BinaryColor,
    prelude::Pixel,
};

use crate::display::Display;
use crate::error::Error;
use crate::interface::DisplayInterface;

/// Display usable as an embedded-graphics draw target
///
/// Thin wrapper around [`Display`]. The pixel store is whatever the wrapped
/// display uses: its shadow buffer, or gdram in direct mode.
pub struct GraphicDisplay<'b, I>
where
    I: DisplayInterface,
{
    /// The underlying display driver
    display: Display<'b, I>,
}

type GraphicsResult<I> = core::result::Result<(), Error<I>>;

impl<'b, I> GraphicDisplay<'b, I>
where
    I: DisplayInterface,
{
    /// Wrap a display
    pub fn new(display: Display<'b, I>) -> Self {
        Self { display }
    }

    /// Push the shadow buffer to the controller
    ///
    /// See [`Display::flush`].
    pub fn flush(&mut self) -> GraphicsResult<I> {
        self.display.flush()
    }

    /// Access the underlying display
    pub fn display(&self) -> &Display<'b, I> {
        &self.display
    }

    /// Mutably access the underlying display
    pub fn display_mut(&mut self) -> &mut Display<'b, I> {
        &mut self.display
    }

    /// Unwrap the display
    pub fn into_inner(self) -> Display<'b, I> {
        self.display
    }
}

impl<I> DrawTarget for GraphicDisplay<'_, I>
where
    I: DisplayInterface,
{
    type Color = BinaryColor;
    type Error = Error<I>;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) else {
                continue;
            };

            match self.display.set_pixel(x, y, color.is_on()) {
                Ok(()) | Err(Error::OutOfBounds { .. }) => {}
                Err(e) => return Err(e),
            }
        }

        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.display.fill(color.is_on())
    }
}

impl<I> OriginDimensions for GraphicDisplay<'_, I>
where
    I: DisplayInterface,
{
    fn size(&self) -> Size {
        let rotated = self.display.rotated_dimensions();
        Size::new(u32::from(rotated.width), u32::from(rotated.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Builder, Dimensions, Rotation};
    use crate::interface::InterfaceKind;
    use embedded_graphics::{
        prelude::*,
        primitives::{Line, PrimitiveStyle, Rectangle},
    };

    #[derive(Debug, Default)]
    struct MockInterface {
        rmw_calls: usize,
        fail: bool,
    }

    impl DisplayInterface for MockInterface {
        type Error = ();

        const KIND: InterfaceKind = InterfaceKind::TwoWire;

        fn send_command(&mut self, _command: u8) -> Result<(), Self::Error> {
            Ok(())
        }

        fn send_command_with_param(&mut self, _command: u8, _parameter: u8) -> Result<(), Self::Error> {
            Ok(())
        }

        fn send_data(&mut self, _data: &[u8]) -> Result<(), Self::Error> {
            Ok(())
        }

        fn read_modify_write(
            &mut self,
            _page: u8,
            _column: u8,
            _mask: u8,
            _set: bool,
        ) -> Result<u8, Self::Error> {
            self.rmw_calls += 1;
            if self.fail { Err(()) } else { Ok(0) }
        }

        fn probe(&mut self) -> bool {
            true
        }
    }

    fn config(rotation: Rotation) -> crate::config::Config {
        Builder::new()
            .dimensions(Dimensions::new(128, 64).unwrap())
            .rotation(rotation)
            .build()
            .unwrap()
    }

    #[test]
    fn test_size_follows_rotation() {
        let mut buffer = [0u8; 1024];
        let display =
            Display::buffered(MockInterface::default(), &mut buffer, config(Rotation::Rotate0)).unwrap();
        let mut gd = GraphicDisplay::new(display);
        assert_eq!(gd.size(), Size::new(128, 64));

        gd.display_mut().set_rotation(Rotation::Rotate270);
        assert_eq!(gd.size(), Size::new(64, 128));
    }

    #[test]
    fn test_fill_rectangle_sets_page_bits() {
        let mut buffer = [0u8; 1024];
        let display =
            Display::buffered(MockInterface::default(), &mut buffer, config(Rotation::Rotate0)).unwrap();
        let mut gd = GraphicDisplay::new(display);

        Rectangle::new(Point::new(4, 8), Size::new(3, 8))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut gd)
            .unwrap();

        let buffer = gd.display().buffer().unwrap();
        assert_eq!(&buffer[128 + 4..128 + 7], &[0xFF, 0xFF, 0xFF]);
        assert_eq!(buffer.iter().filter(|b| **b != 0).count(), 3);
    }

    #[test]
    fn test_drawing_is_clipped() {
        let mut buffer = [0u8; 1024];
        let display =
            Display::buffered(MockInterface::default(), &mut buffer, config(Rotation::Rotate0)).unwrap();
        let mut gd = GraphicDisplay::new(display);

        Line::new(Point::new(-10, 0), Point::new(200, 0))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut gd)
            .unwrap();

        let buffer = gd.display().buffer().unwrap();
        assert!(buffer[..128].iter().all(|b| *b == 0x01));
        assert!(buffer[128..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_clear_fills_buffer() {
        let mut buffer = [0u8; 1024];
        let display =
            Display::buffered(MockInterface::default(), &mut buffer, config(Rotation::Rotate90)).unwrap();
        let mut gd = GraphicDisplay::new(display);

        gd.clear(BinaryColor::On).unwrap();
        assert!(gd.display().buffer().unwrap().iter().all(|b| *b == 0xFF));
        gd.clear(BinaryColor::Off).unwrap();
        assert!(gd.display().buffer().unwrap().iter().all(|b| *b == 0x00));
    }

    #[test]
    fn test_direct_mode_draws_through_interface() {
        let display = Display::direct(MockInterface::default(), config(Rotation::Rotate0)).unwrap();
        let mut gd = GraphicDisplay::new(display);

        Pixel(Point::new(3, 3), BinaryColor::On).draw(&mut gd).unwrap();
        Pixel(Point::new(-1, 3), BinaryColor::On).draw(&mut gd).unwrap();
        assert_eq!(gd.into_inner().release().rmw_calls, 1);
    }

    #[test]
    fn test_interface_errors_propagate() {
        let interface = MockInterface {
            fail: true,
            ..MockInterface::default()
        };
        let display = Display::direct(interface, config(Rotation::Rotate0)).unwrap();
        let mut gd = GraphicDisplay::new(display);

        let result = Pixel(Point::new(0, 0), BinaryColor::On).draw(&mut gd);
        assert!(matches!(result, Err(Error::Interface(()))));
    }
}
