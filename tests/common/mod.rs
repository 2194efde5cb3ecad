//! A T6A04A living in memory.
//!
//! Models display memory (120x64 pixels, 96 of them visible per row), the word length, the
//! address counter with its auto-advance, the dummy read after a seek, and the RST/STB lines.
//! Every bus transaction is recorded so tests can count them.
#![allow(dead_code)]

use std::{cell::RefCell, convert::Infallible, marker::PhantomData, rc::Rc};

use embedded_hal::digital::v2::OutputPin;
use t6a04a::{
    backend::{Register, T6A04ABackend},
    Config, NoDelay, ShadowCanvas, T6A04A,
};

pub const MEMORY_COLUMNS: usize = t6a04a::MEMORY_COLUMNS as usize;
pub const MEMORY_ROWS: usize = 64;

/// What the first read after a seek returns.
pub const GARBAGE: u8 = 0b1010_0101;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Instruction(u8),
    Write(u8),
    Read,
    Status,
}

pub struct Controller {
    pub pixels: [[bool; MEMORY_COLUMNS]; MEMORY_ROWS],
    pub eight_bit: bool,
    pub row_wise: bool,
    pub increment: bool,
    pub enabled: bool,
    pub standby: bool,
    pub row: u8,
    pub column: u8,
    pub top_offset: u8,
    pub contrast: u8,
    pub resets: usize,
    pub log: Vec<Op>,
    primed: bool,
    in_reset: bool,
}

impl Default for Controller {
    fn default() -> Self {
        let mut pixels = [[false; MEMORY_COLUMNS]; MEMORY_ROWS];
        // power on memory is noise
        for (r, row) in pixels.iter_mut().enumerate() {
            for (c, pixel) in row.iter_mut().enumerate() {
                *pixel = (r * 7 + c * 3) % 5 == 0;
            }
        }
        Controller {
            pixels,
            eight_bit: true,
            row_wise: true,
            increment: true,
            enabled: false,
            standby: false,
            row: 0,
            column: 0,
            top_offset: 0,
            contrast: 0,
            resets: 0,
            log: Vec::new(),
            primed: false,
            in_reset: false,
        }
    }
}

impl Controller {
    pub fn bits(&self) -> usize {
        if self.eight_bit {
            8
        } else {
            6
        }
    }

    fn columns(&self) -> u8 {
        (MEMORY_COLUMNS / self.bits()) as u8
    }

    /// Word at row/column for the current word length, pixel 0 in the top bit.
    pub fn word(&self, row: u8, column: u8) -> u8 {
        let bits = self.bits();
        let first = column as usize * bits;
        let mut word = 0;
        for pixel in &self.pixels[row as usize][first..first + bits] {
            word = (word << 1) | *pixel as u8;
        }
        word
    }

    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.pixels[y][x]
    }

    pub fn address(&self) -> (u8, u8) {
        (self.row, self.column)
    }

    pub fn status(&self) -> u8 {
        ((self.eight_bit as u8) << 6)
            | ((self.enabled as u8) << 5)
            | ((self.row_wise as u8) << 1)
            | self.increment as u8
    }

    pub fn take_log(&mut self) -> Vec<Op> {
        self.log.drain(..).collect()
    }

    pub fn writes(&self) -> usize {
        self.log.iter().filter(|op| matches!(op, Op::Write(_))).count()
    }

    fn reset(&mut self) {
        self.resets += 1;
        self.eight_bit = true;
        self.row_wise = true;
        self.increment = true;
        self.enabled = false;
        self.row = 0;
        self.column = 0;
        self.top_offset = 0;
        self.primed = false;
    }

    fn advance(&mut self) {
        if self.row_wise {
            let columns = self.columns();
            self.column = if self.increment {
                (self.column + 1) % columns
            } else {
                (self.column + columns - 1) % columns
            };
        } else {
            let rows = MEMORY_ROWS as u8;
            self.row = if self.increment {
                (self.row + 1) % rows
            } else {
                (self.row + rows - 1) % rows
            };
        }
    }

    fn instruction(&mut self, value: u8) {
        match value {
            0b1100_0000..=0b1111_1111 => self.contrast = value & 0b0011_1111,
            0b1000_0000..=0b1011_1111 => {
                self.row = value & 0b0011_1111;
                self.primed = false;
            }
            0b0100_0000..=0b0111_1111 => self.top_offset = value & 0b0011_1111,
            0b0010_0000..=0b0011_1111 => {
                self.column = (value & 0b0001_1111) % self.columns();
                self.primed = false;
            }
            0b0000_0100..=0b0000_0111 => {
                self.row_wise = value & 0b10 != 0;
                self.increment = value & 0b01 != 0;
            }
            0b0000_0010 | 0b0000_0011 => self.enabled = value & 1 != 0,
            0b0000_0000 | 0b0000_0001 => self.eight_bit = value == 1,
            _ => panic!("instruction {:#010b} is not used by the driver", value),
        }
    }

    fn write(&mut self, value: u8) {
        let bits = self.bits();
        let first = self.column as usize * bits;
        for i in 0..bits {
            self.pixels[self.row as usize][first + i] = value & (1 << (bits - 1 - i)) != 0;
        }
        self.primed = false;
        self.advance();
    }

    fn read(&mut self) -> u8 {
        if !self.primed {
            // the output latch still holds whatever was there before the seek
            self.primed = true;
            return GARBAGE;
        }
        let value = self.word(self.row, self.column);
        self.advance();
        value
    }
}

pub type Shared = Rc<RefCell<Controller>>;

pub struct Sim<E = Infallible> {
    pub state: Shared,
    _error: PhantomData<E>,
}

impl<E> Sim<E> {
    pub fn new(state: &Shared) -> Self {
        Sim {
            state: state.clone(),
            _error: PhantomData,
        }
    }
}

impl<E> T6A04ABackend for Sim<E> {
    type Error = E;

    fn write_byte(&mut self, register: Register, value: u8) -> Result<(), E> {
        let mut state = self.state.borrow_mut();
        match register {
            Register::Instruction => {
                state.log.push(Op::Instruction(value));
                state.instruction(value);
            }
            Register::Data => {
                state.log.push(Op::Write(value));
                state.write(value);
            }
        }
        Ok(())
    }

    fn read_byte(&mut self, register: Register) -> Result<u8, E> {
        let mut state = self.state.borrow_mut();
        match register {
            Register::Instruction => {
                state.log.push(Op::Status);
                Ok(state.status())
            }
            Register::Data => {
                state.log.push(Op::Read);
                Ok(state.read())
            }
        }
    }
}

pub struct ResetPin(pub Shared);

impl OutputPin for ResetPin {
    type Error = Infallible;
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.0.borrow_mut().in_reset = true;
        Ok(())
    }
    fn set_high(&mut self) -> Result<(), Infallible> {
        let mut state = self.0.borrow_mut();
        if state.in_reset {
            state.in_reset = false;
            state.reset();
        }
        Ok(())
    }
}

pub struct StandbyPin(pub Shared);

impl OutputPin for StandbyPin {
    type Error = Infallible;
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.0.borrow_mut().standby = true;
        Ok(())
    }
    fn set_high(&mut self) -> Result<(), Infallible> {
        self.0.borrow_mut().standby = false;
        Ok(())
    }
}

pub type Lcd = T6A04A<Sim, ResetPin, StandbyPin, NoDelay>;
pub type Shadow = ShadowCanvas<Sim, ResetPin, StandbyPin, NoDelay>;

/// A driver on a freshly powered controller, nothing sent yet.
pub fn lcd() -> (Lcd, Shared) {
    let state = Shared::default();
    let lcd = T6A04A::new(
        Sim::new(&state),
        ResetPin(state.clone()),
        StandbyPin(state.clone()),
        NoDelay,
        Config::default(),
    )
    .unwrap();
    (lcd, state)
}

/// An initialized driver with an empty log. Memory is still power on noise.
pub fn ready() -> (Lcd, Shared) {
    let (mut lcd, state) = lcd();
    lcd.init().unwrap();
    state.borrow_mut().log.clear();
    (lcd, state)
}

/// An initialized and cleared driver with an empty log.
pub fn blank() -> (Lcd, Shared) {
    let (mut lcd, state) = ready();
    lcd.clear().unwrap();
    state.borrow_mut().log.clear();
    (lcd, state)
}
