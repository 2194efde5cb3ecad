//! # Drawing capability
//!
//! The two operations a generic 2D library needs to draw lines, shapes and text on this screen.
//! Both the plain driver and the [`ShadowCanvas`](crate::shadow::ShadowCanvas) provide them, so
//! drawing code can be written once against the trait and pick the surface later.
//!
//! Coordinates are signed, everything off screen is clipped silently.
use core::convert::TryFrom;

use embedded_hal::blocking::delay::DelayUs;
use embedded_hal::digital::v2::OutputPin;

use crate::{backend::T6A04ABackend, display::T6A04A, shadow::ShadowCanvas};

pub trait Canvas {
    type Error;

    fn draw_pixel(&mut self, x: i32, y: i32, on: bool) -> Result<(), Self::Error>;

    /// Line of `width` pixels to the right of x, or to the left for negative widths.
    fn draw_fast_hline(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        on: bool,
    ) -> Result<(), Self::Error>;
}

// Some((x, y)) when both fit the u8 pixel API, off screen values are still filtered later.
fn narrow(x: i32, y: i32) -> Option<(u8, u8)> {
    Some((u8::try_from(x).ok()?, u8::try_from(y).ok()?))
}

impl<Backend, RST, STB, DELAY> Canvas for T6A04A<Backend, RST, STB, DELAY>
where
    Backend: T6A04ABackend,
    RST: OutputPin<Error = Backend::Error>,
    STB: OutputPin<Error = Backend::Error>,
    DELAY: DelayUs<u16>,
{
    type Error = Backend::Error;

    fn draw_pixel(&mut self, x: i32, y: i32, on: bool) -> Result<(), Backend::Error> {
        match narrow(x, y) {
            Some((x, y)) => self.write_pixel(x, y, on),
            None => Ok(()),
        }
    }

    fn draw_fast_hline(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        on: bool,
    ) -> Result<(), Backend::Error> {
        self.fast_fill(x, y, width, on)
    }
}

impl<Backend, RST, STB, DELAY> Canvas for ShadowCanvas<Backend, RST, STB, DELAY>
where
    Backend: T6A04ABackend,
    RST: OutputPin<Error = Backend::Error>,
    STB: OutputPin<Error = Backend::Error>,
    DELAY: DelayUs<u16>,
{
    type Error = Backend::Error;

    fn draw_pixel(&mut self, x: i32, y: i32, on: bool) -> Result<(), Backend::Error> {
        match narrow(x, y) {
            Some((x, y)) => self.write_pixel(x, y, on),
            None => Ok(()),
        }
    }

    fn draw_fast_hline(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        on: bool,
    ) -> Result<(), Backend::Error> {
        self.fast_fill(x, y, width, on)
    }
}
