//! # Main driver for the T6A04A
//!
//! In here most of the data structures and functions care about state keeping of the controller
//! mode and sequencing the raw bus transactions. The fast horizontal fill lives in the
//! `fastfill` module and the caching canvas in `shadow`, both build on the functions below.
//!
//! Typically you want to look into the following functions:
//!  - T6A04A::new() to create a new driver instance
//!  - T6A04A::init() to reset the controller and bring it into a known mode
//!  - T6A04A::write_pixel() and T6A04A::fast_fill() to draw
//!  - T6A04A::set_contrast() to change the contrast of the display
//!
//! ## Reading display memory
//! The controller answers a data read with the word it latched during the *previous* read. After
//! the address changed (`set_row`/`set_column`) the first read therefore returns garbage and has
//! to be thrown away. `read_word_at()` and `write_pixel()` take care of that dummy read; when
//! calling `read_word()` directly after a seek you have to do it yourself.
use embedded_hal::blocking::delay::DelayUs;
use embedded_hal::digital::v2::OutputPin;
use log::debug;
use log::trace;

use crate::{
    backend::{Register, T6A04ABackend},
    instructions::prelude::*,
    COLUMN_COUNT, ROW_COUNT,
};

/// Settings applied by `init()` and `reset()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Contrast set during `init()`, 0..64.
    pub contrast: u8,
    /// How long RST is held low, in microseconds.
    pub reset_hold_us: u16,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            contrast: 48,
            reset_hold_us: 10,
        }
    }
}

/// main struct for state keeping of the T6A04A driver
///
/// The word length and the counter configuration are cached so bulk operations can ask for the
/// mode they need without paying a bus transaction when it is already active.
#[derive(Debug)]
pub struct T6A04A<Backend, RST, STB, DELAY> {
    backend: Backend,
    rst: RST,
    stb: STB,
    delay: DELAY,
    config: Config,
    word_length: WordLength,
    // None until the driver sent the counter instruction itself
    counter: Option<CounterConfig>,
}

impl<Backend, RST, STB, DELAY> T6A04A<Backend, RST, STB, DELAY>
where
    Backend: T6A04ABackend,
    RST: OutputPin<Error = Backend::Error>,
    STB: OutputPin<Error = Backend::Error>,
    DELAY: DelayUs<u16>,
{
    /// Create a new instance of the T6A04A driver
    ///
    /// Arguments:
    ///
    /// - backend: the bus to the controller, usually a `T6A04AGpioBackend`
    /// - rst: Reset, a GPIO OutputPin connected to RST (pin 3) on the display, active low
    /// - stb: Standby, a GPIO OutputPin connected to STB (pin 6), low puts the chip to sleep
    /// - delay: used for the reset pulse
    /// - config: see [`Config`]
    ///
    /// The controller is not touched apart from releasing reset and standby, call `init()`
    /// before drawing.
    pub fn new(
        backend: Backend,
        mut rst: RST,
        mut stb: STB,
        delay: DELAY,
        config: Config,
    ) -> Result<T6A04A<Backend, RST, STB, DELAY>, Backend::Error> {
        // the controller resets on a low pulse, keep it released
        rst.set_high()?;
        stb.set_high()?;

        Ok(T6A04A {
            backend,
            rst,
            stb,
            delay,
            config,
            word_length: WordLength::Eight,
            counter: None,
        })
    }

    /// Hardware reset via the RST pin.
    ///
    /// The controller comes back with the display off, 8 bit words and the address at zero.
    /// Nothing of the previous mode survives, use `init()` to get a usable display.
    pub fn reset(&mut self) -> Result<(), Backend::Error> {
        debug!("t6a04a: reset");
        self.rst.set_low()?;
        self.delay.delay_us(self.config.reset_hold_us);
        self.rst.set_high()?;

        self.word_length = WordLength::Eight;
        self.counter = None;
        Ok(())
    }

    /// Resets the controller and sets up the mode the rest of this driver expects:
    /// 8 bit words, display on, default contrast, row-wise incrementing counter, address and top
    /// offset at zero.
    pub fn init(&mut self) -> Result<(), Backend::Error> {
        self.reset()?;
        self.set_word_length(WordLength::Eight)?;
        self.enable_display()?;
        self.set_contrast(self.config.contrast)?;
        self.set_counter_config(CounterConfig::ROW_WISE_INCREMENT)?;
        self.seek(0, 0)?;
        self.set_top_offset(0)?;
        debug!("t6a04a: initialized, contrast {}", self.config.contrast);
        Ok(())
    }

    pub fn config(&self) -> Config {
        self.config
    }

    pub fn word_length(&self) -> WordLength {
        self.word_length
    }

    /// The counter configuration last sent by this driver, `None` right after a reset.
    pub fn counter_config(&self) -> Option<CounterConfig> {
        self.counter
    }

    /// Number of visible words in one row for the current word length.
    pub fn word_columns(&self) -> u8 {
        COLUMN_COUNT / self.word_length.bits()
    }

    /// Releases the backend, pins and delay.
    pub fn release(self) -> (Backend, RST, STB, DELAY) {
        (self.backend, self.rst, self.stb, self.delay)
    }

    /// Send a single instruction to the T6A04A chip.
    ///
    /// This does not update any cached state, prefer the setters below.
    pub fn write_instruction(&mut self, instruction: Instruction) -> Result<(), Backend::Error> {
        self.backend.write_byte(Register::Instruction, instruction.byte())
    }

    pub fn set_word_length(&mut self, length: WordLength) -> Result<(), Backend::Error> {
        self.write_instruction(SetWordLength(length))?;
        self.word_length = length;
        Ok(())
    }

    /// Set how the address moves after each data read or write.
    ///
    /// Skips the bus entirely when the requested configuration is already active. Bulk operations
    /// call this before every run, so the skip matters.
    pub fn set_counter_config(&mut self, counter: CounterConfig) -> Result<(), Backend::Error> {
        if self.counter == Some(counter) {
            return Ok(());
        }
        trace!("t6a04a: counter {:?}", counter);
        self.write_instruction(SetCounter(counter))?;
        self.counter = Some(counter);
        Ok(())
    }

    /// Set the row address, in pixels (0..64).
    pub fn set_row(&mut self, row: u8) -> Result<(), Backend::Error> {
        self.write_instruction(SetRow(row))
    }

    /// Set the column address, in words (0..32, 0..12 are visible with 8 bit words).
    pub fn set_column(&mut self, column: u8) -> Result<(), Backend::Error> {
        self.write_instruction(SetColumn(column))
    }

    /// Set row and column address. A read right after this needs a dummy read first.
    pub fn seek(&mut self, row: u8, column: u8) -> Result<(), Backend::Error> {
        self.set_row(row)?;
        self.set_column(column)
    }

    /// Set the memory row shown at the top of the screen (0..64).
    ///
    /// Memory is not moved, the screen just starts showing it from another row, which makes
    /// vertical scrolling a single instruction.
    pub fn set_top_offset(&mut self, offset: u8) -> Result<(), Backend::Error> {
        self.write_instruction(SetTopOffset(offset))
    }

    /// Set the contrast of the LCD, in range 0..64
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), Backend::Error> {
        self.write_instruction(SetContrast(contrast))
    }

    /// Turn the display on, showing display memory.
    pub fn enable_display(&mut self) -> Result<(), Backend::Error> {
        self.write_instruction(DisplayOn)
    }

    /// Blank the display. Memory is kept and can still be written.
    pub fn disable_display(&mut self) -> Result<(), Backend::Error> {
        self.write_instruction(DisplayOff)
    }

    /// Put the controller to sleep via the STB pin.
    pub fn enable_standby(&mut self) -> Result<(), Backend::Error> {
        debug!("t6a04a: standby on");
        self.stb.set_low()
    }

    pub fn disable_standby(&mut self) -> Result<(), Backend::Error> {
        debug!("t6a04a: standby off");
        self.stb.set_high()
    }

    /// Write one word at the current address, then the counter moves on.
    pub fn write_word(&mut self, value: u8) -> Result<(), Backend::Error> {
        self.backend.write_byte(Register::Data, value)
    }

    /// Read one word at the current address, then the counter moves on.
    ///
    /// The first read after a seek returns garbage, see the module documentation.
    pub fn read_word(&mut self) -> Result<u8, Backend::Error> {
        self.backend.read_byte(Register::Data)
    }

    /// Read and decode the status byte. No dummy read needed.
    pub fn read_status(&mut self) -> Result<Status, Backend::Error> {
        self.backend
            .read_byte(Register::Instruction)
            .map(Status::from)
    }

    /// Seek and write one word.
    pub fn write_word_at(&mut self, row: u8, column: u8, value: u8) -> Result<(), Backend::Error> {
        self.seek(row, column)?;
        self.write_word(value)
    }

    /// Seek, throw away the dummy read, and read one word.
    pub fn read_word_at(&mut self, row: u8, column: u8) -> Result<u8, Backend::Error> {
        self.seek(row, column)?;
        self.read_word()?;
        self.read_word()
    }

    /// Read-modify-write of one word: sets (`on`) or clears the pixels in `mask`.
    ///
    /// The write is skipped when no pixel changes.
    pub(crate) fn paint_word_at(
        &mut self,
        row: u8,
        column: u8,
        mask: u8,
        on: bool,
    ) -> Result<(), Backend::Error> {
        let existing = self.read_word_at(row, column)?;
        let next = crate::fastfill::paint_mask(existing, mask, on);
        if next != existing {
            self.write_word_at(row, column, next)?;
        }
        Ok(())
    }

    /// Set or clear the pixel at x, y. Coordinates outside the screen are ignored.
    ///
    /// This has to read the containing word first, so it costs 4 bus transactions, 7 when the
    /// pixel actually changes.
    pub fn write_pixel(&mut self, x: u8, y: u8, on: bool) -> Result<(), Backend::Error> {
        if x >= COLUMN_COUNT || y >= ROW_COUNT {
            return Ok(());
        }
        let bits = self.word_length.bits();
        let mask = self.word_length.bit_mask(x % bits);
        self.paint_word_at(y, x / bits, mask, on)
    }

    /// Fill every visible word with all pixels on or off.
    ///
    /// The counter configuration is switched to row-wise increment for the run and restored
    /// afterwards.
    pub fn fill(&mut self, on: bool) -> Result<(), Backend::Error> {
        debug!("t6a04a: fill {}", on);
        let saved = self.counter;
        self.set_counter_config(CounterConfig::ROW_WISE_INCREMENT)?;

        let word = if on { self.word_length.full() } else { 0 };
        for row in 0..ROW_COUNT {
            self.seek(row, 0)?;
            for _ in 0..self.word_columns() {
                self.write_word(word)?;
            }
        }

        if let Some(counter) = saved {
            self.set_counter_config(counter)?;
        }
        Ok(())
    }

    /// clears the screen by zeroing the visible display memory
    pub fn clear(&mut self) -> Result<(), Backend::Error> {
        self.fill(false)
    }
}
