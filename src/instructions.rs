//! # Module defining the instruction set of the T6A04A
//!
//! All instructions are implemented as enums and most arguments as well.
//! The source code is written to resemble the bit layout of the controller as close as possible,
//! so every encoder is spelled out in binary.
//!
//! The T6A04A is the controller behind the 96x64 screen of the TI-83+ calculator. It talks over
//! an 8 bit parallel bus and has two registers: the instruction register (DI low) and the data
//! register (DI high). Reading the instruction register returns the status byte.
//!
//! ## Word length
//! Display memory is accessed in words of either 8 or 6 bits. The word length decides how many
//! pixels one data transaction covers and therefore how many columns a row has. Only the low bits
//! of a 6 bit word are meaningful.
//!
//! ## Counter
//! After every data read or write the controller moves its address pointer. The counter
//! configuration decides whether it moves along the row (next word to the right) or along the
//! column (next row down), and whether it increments or decrements.
//!
//! The datasheet mentions an "up" bit in the commentary of the counter instruction; it is not
//! exposed separately here. Bit 0 of the counter instruction is the direction bit below and no
//! other reserved bit is ever set.
//!
//! ## Top offset
//! The "z address" shifts which memory row is shown at the top of the glass. It moves the visible
//! origin without touching memory, so it can be used for hardware scrolling.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
/// Width of one display memory word.
pub enum WordLength {
    /// 6 bit words, the low 6 bits of every byte on the bus are used.
    Six = 0,
    /// 8 bit words, one full byte per word.
    Eight = 1,
}

impl WordLength {
    /// Number of pixels in one word.
    pub fn bits(self) -> u8 {
        match self {
            WordLength::Six => 6,
            WordLength::Eight => 8,
        }
    }

    /// Word with every meaningful bit set.
    pub fn full(self) -> u8 {
        match self {
            WordLength::Six => 0b0011_1111,
            WordLength::Eight => 0b1111_1111,
        }
    }

    /// Mask of the pixel at `index` inside a word.
    ///
    /// Index 0 is the leftmost pixel and maps to the most significant meaningful bit.
    pub fn bit_mask(self, index: u8) -> u8 {
        assert!(index < self.bits());
        1 << (self.bits() - 1 - index)
    }

    /// Mask of the pixels in `from..to` inside a word.
    pub fn span_mask(self, from: u8, to: u8) -> u8 {
        assert!(from <= to && to <= self.bits());
        let bits = self.bits() as u16;
        let upper = (1u16 << (bits - from as u16)) - 1;
        let lower = (1u16 << (bits - to as u16)) - 1;
        (upper & !lower) as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
/// Axis the address counter moves along after a data transaction.
pub enum CounterOrientation {
    /// The counter moves down the current column (row address changes).
    ColumnWise = 0,
    /// The counter moves along the current row (column address changes).
    RowWise = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
/// Direction the address counter moves in.
pub enum CounterDirection {
    Decrement = 0,
    Increment = 1,
}

/// Complete counter configuration as sent by one instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterConfig {
    pub orientation: CounterOrientation,
    pub direction: CounterDirection,
}

impl CounterConfig {
    /// The configuration bulk writes rely on: along the row, to the right.
    pub const ROW_WISE_INCREMENT: CounterConfig = CounterConfig {
        orientation: CounterOrientation::RowWise,
        direction: CounterDirection::Increment,
    };

    pub fn new(orientation: CounterOrientation, direction: CounterDirection) -> CounterConfig {
        CounterConfig {
            orientation,
            direction,
        }
    }
}

/// T6A04A instruction set, see data sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// select 6 or 8 bit words
    // translates to: 0b0000_000L, L=1 means 8 bit
    SetWordLength(WordLength),

    /// show the contents of display memory
    // translates to: 0b0000_0011
    DisplayOn,

    /// blank the glass, memory is kept
    // translates to: 0b0000_0010
    DisplayOff,

    /// set how the address counter moves after a data transaction
    // translates to: 0b0000_01OD, O=1 row-wise, D=1 increment
    SetCounter(CounterConfig),

    /// set the column (word) address; 0 =< column =< 31.
    // translates to: 0b001c_cccc
    SetColumn(u8),

    /// set the row (pixel) address; 0 =< row =< 63.
    // translates to: 0b10rr_rrrr
    SetRow(u8),

    /// set the memory row shown at the top of the screen; 0 =< offset =< 63.
    // translates to: 0b01zz_zzzz
    SetTopOffset(u8),

    /// set contrast; 0 =< contrast =< 63.
    // translates to: 0b11cc_cccc
    SetContrast(u8),
}

use Instruction::*;

// Use full binary presentation instead of hex, to look the same as data sheet
impl Instruction {
    /// Returns the specific instruction as a byte (u8) which can be put on the bus
    ///
    /// Operands outside their range are a bug in the caller and panic.
    #[allow(clippy::identity_op)]
    pub fn byte(self) -> u8 {
        match self {
            SetWordLength(length) => 0b0000_0000 | length as u8,
            DisplayOn => 0b0000_0011,
            DisplayOff => 0b0000_0010,
            SetCounter(counter) => {
                0b0000_0100 | ((counter.orientation as u8) << 1) | counter.direction as u8
            }
            SetColumn(column) => {
                assert!(column < 32);
                0b0010_0000 | column
            }
            SetRow(row) => {
                assert!(row < 64);
                0b1000_0000 | row
            }
            SetTopOffset(offset) => {
                assert!(offset < 64);
                0b0100_0000 | offset
            }
            SetContrast(contrast) => {
                assert!(contrast < 64);
                0b1100_0000 | contrast
            }
        }
    }
}

/// Decoded status byte, as read from the instruction register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status(pub u8);

impl Status {
    pub fn is_busy(&self) -> bool {
        self.0 & 0b1000_0000 != 0
    }

    pub fn word_length(&self) -> WordLength {
        if self.0 & 0b0100_0000 != 0 {
            WordLength::Eight
        } else {
            WordLength::Six
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.0 & 0b0010_0000 != 0
    }

    pub fn counter_orientation(&self) -> CounterOrientation {
        if self.0 & 0b0000_0010 != 0 {
            CounterOrientation::RowWise
        } else {
            CounterOrientation::ColumnWise
        }
    }

    pub fn counter_direction(&self) -> CounterDirection {
        if self.0 & 0b0000_0001 != 0 {
            CounterDirection::Increment
        } else {
            CounterDirection::Decrement
        }
    }

    pub fn counter_config(&self) -> CounterConfig {
        CounterConfig::new(self.counter_orientation(), self.counter_direction())
    }
}

impl From<u8> for Status {
    fn from(byte: u8) -> Status {
        Status(byte)
    }
}

/// A prelude for convenience, it pulls all enums and traits into scope, for convenience.
pub mod prelude {
    pub use super::{
        CounterConfig, CounterDirection, CounterOrientation, Instruction, Instruction::*, Status,
        WordLength,
    };
}
