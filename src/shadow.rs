//! # Shadow buffer
//!
//! [`ShadowCanvas`] keeps a copy of display memory in RAM (64 rows of up to 16 words, 1KiB) and
//! uses it to skip every write that wouldn't change anything. Because it knows the current content
//! it never has to read from the controller either, so changing a pixel costs one seek and one
//! write instead of the read-modify-write `T6A04A::write_pixel()` does.
//!
//! The copy is only right as long as nothing else writes to the controller. That's why the canvas
//! owns the driver and only hands out a shared reference to it.
use embedded_hal::blocking::delay::DelayUs;
use embedded_hal::digital::v2::OutputPin;
use log::debug;

use crate::{
    backend::T6A04ABackend,
    display::T6A04A,
    fastfill::{paint_mask, Span, SpanPlan, WordPatch},
    instructions::CounterConfig,
    COLUMN_COUNT, ROW_COUNT,
};

/// Most words a row can have, reached with 6 bit words.
pub const MAX_WORD_COLUMNS: usize = COLUMN_COUNT as usize / 6;

pub struct ShadowCanvas<Backend, RST, STB, DELAY> {
    inner: T6A04A<Backend, RST, STB, DELAY>,
    buffer: [[u8; MAX_WORD_COLUMNS]; ROW_COUNT as usize],
}

impl<Backend, RST, STB, DELAY> ShadowCanvas<Backend, RST, STB, DELAY>
where
    Backend: T6A04ABackend,
    RST: OutputPin<Error = Backend::Error>,
    STB: OutputPin<Error = Backend::Error>,
    DELAY: DelayUs<u16>,
{
    /// Wraps a driver whose visible memory is blank.
    ///
    /// Use `init()` if that isn't known, it clears the hardware unconditionally.
    pub fn new(inner: T6A04A<Backend, RST, STB, DELAY>) -> Self {
        ShadowCanvas {
            inner,
            buffer: [[0; MAX_WORD_COLUMNS]; ROW_COUNT as usize],
        }
    }

    /// Initializes the driver, clears the whole screen and forgets the cached content.
    pub fn init(&mut self) -> Result<(), Backend::Error> {
        self.inner.init()?;
        self.inner.clear()?;
        self.buffer = [[0; MAX_WORD_COLUMNS]; ROW_COUNT as usize];
        Ok(())
    }

    /// Read access to the driver, e.g. for `word_length()`.
    pub fn inner(&self) -> &T6A04A<Backend, RST, STB, DELAY> {
        &self.inner
    }

    pub fn release(self) -> T6A04A<Backend, RST, STB, DELAY> {
        self.inner
    }

    /// Set or clear the pixel at x, y. Coordinates outside the screen are ignored.
    ///
    /// Costs nothing when the pixel already has that value, a seek and a write otherwise.
    pub fn write_pixel(&mut self, x: u8, y: u8, on: bool) -> Result<(), Backend::Error> {
        if x >= COLUMN_COUNT || y >= ROW_COUNT {
            return Ok(());
        }
        let length = self.inner.word_length();
        let patch = WordPatch {
            column: x / length.bits(),
            mask: length.bit_mask(x % length.bits()),
        };

        let cached = self.buffer[y as usize][patch.column as usize];
        let next = paint_mask(cached, patch.mask, on);
        if next != cached {
            self.inner.write_word_at(y, patch.column, next)?;
            self.buffer[y as usize][patch.column as usize] = next;
        }
        Ok(())
    }

    /// Horizontal line, like `T6A04A::fast_fill()` but only words that change are written.
    pub fn fast_fill(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        on: bool,
    ) -> Result<(), Backend::Error> {
        let span = match Span::clip(x, y, width) {
            Some(span) => span,
            None => return Ok(()),
        };
        let full = self.inner.word_length().full();

        match SpanPlan::new(span, self.inner.word_length()) {
            SpanPlan::Single(patch) => self.paint_row(span.row, Some(patch), on),
            SpanPlan::Split { left, run, right } => {
                let run = run.into_iter().flat_map(move |run| {
                    (run.column..run.column + run.count).map(move |column| WordPatch {
                        column,
                        mask: full,
                    })
                });
                self.paint_row(span.row, left.into_iter().chain(run).chain(right), on)
            }
        }
    }

    /// Set every visible pixel to `on`, writing only words that differ.
    pub fn fill(&mut self, on: bool) -> Result<(), Backend::Error> {
        debug!("t6a04a: shadow fill {}", on);
        let full = self.inner.word_length().full();
        let columns = self.inner.word_columns();
        for row in 0..ROW_COUNT {
            let patches = (0..columns).map(|column| WordPatch { column, mask: full });
            self.paint_row(row, patches, on)?;
        }
        Ok(())
    }

    /// Blank the screen. Words that are already blank are skipped.
    pub fn clear(&mut self) -> Result<(), Backend::Error> {
        self.fill(false)
    }

    // Applies the patches in ascending column order. A seek is only needed when the counter isn't
    // already at the next word to write.
    fn paint_row<I>(&mut self, row: u8, patches: I, on: bool) -> Result<(), Backend::Error>
    where
        I: IntoIterator<Item = WordPatch>,
    {
        let mut cursor = None;
        for patch in patches {
            let cached = self.buffer[row as usize][patch.column as usize];
            let next = paint_mask(cached, patch.mask, on);
            if next == cached {
                continue;
            }
            if cursor != Some(patch.column) {
                self.inner.set_counter_config(CounterConfig::ROW_WISE_INCREMENT)?;
                self.inner.seek(row, patch.column)?;
            }
            self.inner.write_word(next)?;
            self.buffer[row as usize][patch.column as usize] = next;
            cursor = Some(patch.column + 1);
        }
        Ok(())
    }
}
