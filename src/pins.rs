//! # Pin level building blocks
//!
//! The T6A04A shares its eight data lines between reads and writes, so they have to switch
//! between input and output at runtime. embedded_hal only models fixed direction pins, which is
//! why this crate brings its own small [`DataPin`] trait. Implement it for the flexible/dynamic
//! pin type of your HAL (most HALs have a type erased pin that can change mode in place).
//!
//! It also provides "fake" pins and a no-op delay for boards where some line is hardwired or the
//! clock is slow enough that the controller keeps up without waiting.

use embedded_hal::blocking::delay::DelayUs;
use embedded_hal::digital::v2::OutputPin;

use crate::backend::BusMode;

/// A bidirectional GPIO used as one of the eight data lines.
pub trait DataPin {
    type Error;

    /// Switch the pin between driving the line and sampling it.
    fn set_mode(&mut self, mode: BusMode) -> Result<(), Self::Error>;

    /// Drive the line. Only meaningful in [`BusMode::Output`].
    fn set_level(&mut self, high: bool) -> Result<(), Self::Error>;

    /// Sample the line. Only meaningful in [`BusMode::Input`].
    fn is_high(&self) -> Result<bool, Self::Error>;
}

/// provides a dummy OutputPin.
///
/// Usable for the STB line when the standby pin is tied high on the board, or for RST when the
/// reset line is driven by a supervisor chip. The driver wants RST and STB to share the error
/// type of the backend, so this only fits backends whose error is `Infallible`, like a
/// `T6A04AGpioBackend` on pins that can't fail.
#[derive(Debug, Clone, Copy)]
pub struct DummyOutputPin;

impl OutputPin for DummyOutputPin {
    type Error = core::convert::Infallible;
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Used to run without delay on a slow enough clock speed
///
/// An Arduino Uno class chip needs no chip enable delay at all, the pin toggling itself is slow
/// enough.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl DelayUs<u16> for NoDelay {
    #[inline]
    fn delay_us(&mut self, _us: u16) {}
}
