//! # Driver for the Toshiba T6A04A LCD controller
//!
//! The T6A04A drives the 96x64 pixel screen of the TI-83+ calculator. It is connected through a
//! 17 pin interface with an 8 bit parallel bus:
//!
//! ```text
//!    1  VCC                    +5V
//!    2  GND                    GND
//!    3  RST    reset, active low
//!    4  NC
//!    5  NC
//!    6  STB    standby, active low
//!    7  DI     data (high) / instruction (low)
//!    8  CE     chip enable, pulsed high per transaction
//!    9  D7
//!   ..  ..     bidirectional data lines
//!   16  D0
//!   17  RW     read (high) / write (low)
//! ```
//!
//! The crate is split like this:
//!  - `backend`: the bus, one byte to or from a register per call
//!  - `display`: the driver itself, modes and memory access
//!  - `fastfill`: horizontal lines written a word at a time
//!  - `shadow`: a caching canvas that skips writes which change nothing
//!  - `canvas`: the drawing capability shared by the driver and the canvas
//!  - `drawtarget`: embedded_graphics support, feature "graphics"
//!
//! ```ignore
//! let backend = T6A04AGpioBackend::new(di, ce, rw, [d0, d1, d2, d3, d4, d5, d6, d7], delay)?;
//! let mut lcd = T6A04A::new(backend, rst, stb, NoDelay, Config::default())?;
//! lcd.init()?;
//! lcd.clear()?;
//! lcd.fast_fill(0, 10, 96, true)?;
//! ```
#![cfg_attr(not(test), no_std)]

pub mod backend;
pub mod canvas;
pub mod display;
pub mod fastfill;
pub mod instructions;
pub mod pins;
pub mod shadow;

#[cfg(feature = "graphics")]
pub mod drawtarget;

pub use backend::{T6A04ABackend, T6A04AGpioBackend};
pub use canvas::Canvas;
pub use display::{Config, T6A04A};
pub use pins::{DataPin, DummyOutputPin, NoDelay};
pub use shadow::ShadowCanvas;

/// Visible rows, in pixels.
pub const ROW_COUNT: u8 = 64;
/// Visible columns, in pixels.
pub const COLUMN_COUNT: u8 = 96;
/// Columns of display memory, in pixels. The last 24 are never shown.
pub const MEMORY_COLUMNS: u8 = 120;
