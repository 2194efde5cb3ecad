//! # Bus backends for the T6A04A
//!
//! The driver talks to the controller through the [`T6A04ABackend`] trait, one byte at a time,
//! either to the instruction register or to the data register. [`T6A04AGpioBackend`] implements
//! it by bit banging the 8080 style parallel bus on plain GPIOs.
//!
//! A transaction always follows the same order:
//!  - reconcile the direction of the shared data lines with the transaction
//!  - select the register (DI) and the direction (RW)
//!  - put the value on the data lines (writes only)
//!  - pulse chip enable, sampling the data lines during the pulse for reads
//!
//! The data lines must never be driven by the MCU while the controller drives them, so the
//! direction is switched before DI, RW or CE move.

use embedded_hal::blocking::delay::DelayUs;
use embedded_hal::digital::v2::OutputPin;

use crate::pins::DataPin;

/// Chip enable pulse width in microseconds.
///
/// The datasheet doesn't state how long the pulse must be. An Arduino Uno needs no delay at all,
/// 10us is borrowed from the timing of a similar controller and works everywhere it was tried.
pub const CE_PULSE_US: u16 = 10;

/// Register selected by the DI line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Register {
    /// DI low: instructions are written, the status byte is read.
    Instruction,
    /// DI high: display memory is written and read at the address counter.
    Data,
}

/// Direction of the eight shared data lines, seen from the MCU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusMode {
    Output,
    Input,
}

pub trait T6A04ABackend {
    type Error;
    fn write_byte(&mut self, register: Register, value: u8) -> Result<(), Self::Error>;
    fn read_byte(&mut self, register: Register) -> Result<u8, Self::Error>;
}

/// Bit banged parallel bus.
///
/// `data[0]` is D0 (least significant bit) and `data[7]` is D7. All pins share one error type,
/// which is passed through unchanged.
pub struct T6A04AGpioBackend<DI, CE, RW, D, DELAY> {
    di: DI,
    ce: CE,
    rw: RW,
    data: [D; 8],
    delay: DELAY,
    pulse_us: u16,
    bus_mode: BusMode,
}

impl<DI, CE, RW, D, DELAY, ERR> T6A04AGpioBackend<DI, CE, RW, D, DELAY>
where
    DI: OutputPin<Error = ERR>,
    CE: OutputPin<Error = ERR>,
    RW: OutputPin<Error = ERR>,
    D: DataPin<Error = ERR>,
    DELAY: DelayUs<u16>,
{
    /// Takes ownership of the bus pins and parks the bus: chip disabled, write direction, data
    /// lines driven by the MCU.
    pub fn new(
        di: DI,
        mut ce: CE,
        mut rw: RW,
        mut data: [D; 8],
        delay: DELAY,
    ) -> Result<T6A04AGpioBackend<DI, CE, RW, D, DELAY>, ERR> {
        ce.set_low()?;
        rw.set_low()?;
        for pin in data.iter_mut() {
            pin.set_mode(BusMode::Output)?;
        }
        Ok(T6A04AGpioBackend {
            di,
            ce,
            rw,
            data,
            delay,
            pulse_us: CE_PULSE_US,
            bus_mode: BusMode::Output,
        })
    }

    /// Overrides the chip enable pulse width, see [`CE_PULSE_US`].
    pub fn with_pulse_width(mut self, pulse_us: u16) -> Self {
        self.pulse_us = pulse_us;
        self
    }

    pub fn bus_mode(&self) -> BusMode {
        self.bus_mode
    }

    /// Releases the owned pins and delay.
    pub fn release(self) -> (DI, CE, RW, [D; 8], DELAY) {
        (self.di, self.ce, self.rw, self.data, self.delay)
    }

    fn set_bus_mode(&mut self, mode: BusMode) -> Result<(), ERR> {
        if self.bus_mode != mode {
            for pin in self.data.iter_mut() {
                pin.set_mode(mode)?;
            }
            self.bus_mode = mode;
        }
        Ok(())
    }

    fn select(&mut self, register: Register) -> Result<(), ERR> {
        match register {
            Register::Instruction => self.di.set_low(),
            Register::Data => self.di.set_high(),
        }
    }
}

impl<DI, CE, RW, D, DELAY, ERR> T6A04ABackend for T6A04AGpioBackend<DI, CE, RW, D, DELAY>
where
    DI: OutputPin<Error = ERR>,
    CE: OutputPin<Error = ERR>,
    RW: OutputPin<Error = ERR>,
    D: DataPin<Error = ERR>,
    DELAY: DelayUs<u16>,
{
    type Error = ERR;

    fn write_byte(&mut self, register: Register, value: u8) -> Result<(), ERR> {
        self.set_bus_mode(BusMode::Output)?;
        self.select(register)?;
        self.rw.set_low()?;
        for (bit, pin) in self.data.iter_mut().enumerate() {
            pin.set_level(value & (1 << bit) != 0)?;
        }
        self.ce.set_high()?;
        self.delay.delay_us(self.pulse_us);
        self.ce.set_low()
    }

    fn read_byte(&mut self, register: Register) -> Result<u8, ERR> {
        self.set_bus_mode(BusMode::Input)?;
        self.select(register)?;
        self.rw.set_high()?;
        self.ce.set_high()?;
        self.delay.delay_us(self.pulse_us);
        let mut value = 0;
        for (bit, pin) in self.data.iter().enumerate() {
            if pin.is_high()? {
                value |= 1 << bit;
            }
        }
        self.ce.set_low()?;
        Ok(value)
    }
}
