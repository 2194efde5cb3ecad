//! embedded_graphics support
//!
//! This module is behind a feature flag. Enable it in your Cargo.toml with feature flag
//! "graphics".
//!
//! By implementing these few functions both the driver and the shadow canvas get the complete
//! power of the embedded_graphics library, Circle's, Rectangle's, Text and bitmaps.
//! Everything goes through [`Canvas::draw_pixel`], there's no frame buffer to flush: pixels show
//! up as soon as they are drawn. Use the `ShadowCanvas` for anything that redraws a lot.
//!
//! Note that the inherent `clear()` shadows `DrawTarget::clear`, call it as
//! `DrawTarget::clear(&mut display, BinaryColor::Off)` to pick a color.
use embedded_graphics_core::{pixelcolor::BinaryColor, prelude::*};
use embedded_hal::blocking::delay::DelayUs;
use embedded_hal::digital::v2::OutputPin;

use crate::{
    backend::T6A04ABackend, canvas::Canvas, display::T6A04A, shadow::ShadowCanvas, COLUMN_COUNT,
    ROW_COUNT,
};

impl<Backend, RST, STB, DELAY> DrawTarget for T6A04A<Backend, RST, STB, DELAY>
where
    Backend: T6A04ABackend,
    RST: OutputPin<Error = Backend::Error>,
    STB: OutputPin<Error = Backend::Error>,
    DELAY: DelayUs<u16>,
{
    type Error = Backend::Error;
    type Color = BinaryColor;

    fn clear(&mut self, color: BinaryColor) -> Result<(), Backend::Error> {
        self.fill(color.is_on())
    }

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Backend::Error>
    where
        I: IntoIterator<Item = Pixel<BinaryColor>>,
    {
        for Pixel(coord, color) in pixels {
            self.draw_pixel(coord.x, coord.y, color.is_on())?;
        }
        Ok(())
    }
}

impl<Backend, RST, STB, DELAY> OriginDimensions for T6A04A<Backend, RST, STB, DELAY>
where
    Backend: T6A04ABackend,
    RST: OutputPin<Error = Backend::Error>,
    STB: OutputPin<Error = Backend::Error>,
    DELAY: DelayUs<u16>,
{
    fn size(&self) -> Size {
        Size::new(COLUMN_COUNT.into(), ROW_COUNT.into())
    }
}

impl<Backend, RST, STB, DELAY> DrawTarget for ShadowCanvas<Backend, RST, STB, DELAY>
where
    Backend: T6A04ABackend,
    RST: OutputPin<Error = Backend::Error>,
    STB: OutputPin<Error = Backend::Error>,
    DELAY: DelayUs<u16>,
{
    type Error = Backend::Error;
    type Color = BinaryColor;

    fn clear(&mut self, color: BinaryColor) -> Result<(), Backend::Error> {
        self.fill(color.is_on())
    }

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Backend::Error>
    where
        I: IntoIterator<Item = Pixel<BinaryColor>>,
    {
        for Pixel(coord, color) in pixels {
            self.draw_pixel(coord.x, coord.y, color.is_on())?;
        }
        Ok(())
    }
}

impl<Backend, RST, STB, DELAY> OriginDimensions for ShadowCanvas<Backend, RST, STB, DELAY>
where
    Backend: T6A04ABackend,
    RST: OutputPin<Error = Backend::Error>,
    STB: OutputPin<Error = Backend::Error>,
    DELAY: DelayUs<u16>,
{
    fn size(&self) -> Size {
        Size::new(COLUMN_COUNT.into(), ROW_COUNT.into())
    }
}
