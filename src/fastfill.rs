//! # Fast horizontal fill
//!
//! Setting pixels one at a time costs a read-modify-write per pixel, around 7 bus transactions.
//! A horizontal line is much cheaper when handled per word: words the span covers completely are
//! written blindly, one after the other, with the counter moving along the row. Only the partial
//! words at either end need to be read first.
//!
//! ```text
//!        left         run            right
//!   |xxx#####|########|########|###xxxxx|
//!     RMW      write    write     RMW
//! ```
//!
//! A doubly unaligned span costs about `16 + words` transactions instead of `7 * pixels`, a
//! 96 pixel line on an Uno went from 60ms to 1.2ms.
use embedded_hal::blocking::delay::DelayUs;
use embedded_hal::digital::v2::OutputPin;
use log::trace;

use crate::{
    backend::T6A04ABackend,
    display::T6A04A,
    instructions::{CounterConfig, WordLength},
    COLUMN_COUNT, ROW_COUNT,
};

/// Sets (`on`) or clears the pixels of `mask` in `word`.
pub fn paint_mask(word: u8, mask: u8, on: bool) -> u8 {
    if on {
        word | mask
    } else {
        word & !mask
    }
}

/// Sets or clears pixel `index` of `word`, index 0 being the leftmost pixel.
pub fn paint_bit(word: u8, length: WordLength, index: u8, on: bool) -> u8 {
    paint_mask(word, length.bit_mask(index), on)
}

/// A run of pixels `start..end` on one row, inside the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub row: u8,
    pub start: u8,
    pub end: u8,
}

impl Span {
    /// Normalizes and clips a line of `width` pixels starting at x, y.
    ///
    /// A negative width extends to the left and includes x, like a positive width includes x on
    /// the right. Returns None when nothing of the line is on screen.
    pub fn clip(x: i32, y: i32, width: i32) -> Option<Span> {
        if width == 0 || y < 0 || y >= i32::from(ROW_COUNT) {
            return None;
        }
        let (x, width) = (i64::from(x), i64::from(width));
        let (start, end) = if width < 0 {
            (x + width + 1, x + 1)
        } else {
            (x, x + width)
        };
        let start = start.max(0);
        let end = end.min(i64::from(COLUMN_COUNT));
        if start >= end {
            return None;
        }
        Some(Span {
            row: y as u8,
            start: start as u8,
            end: end as u8,
        })
    }
}

/// One word that is only partly covered and needs a read-modify-write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordPatch {
    pub column: u8,
    pub mask: u8,
}

/// Consecutive words that are covered completely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordRun {
    pub column: u8,
    pub count: u8,
}

/// How a span is split into bus work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanPlan {
    /// The span lies inside one word without covering it.
    Single(WordPatch),
    Split {
        left: Option<WordPatch>,
        run: Option<WordRun>,
        right: Option<WordPatch>,
    },
}

impl SpanPlan {
    pub fn new(span: Span, length: WordLength) -> SpanPlan {
        let bits = length.bits();
        let first = span.start / bits;
        let last = (span.end - 1) / bits;

        if first == last {
            let mask = length.span_mask(span.start % bits, span.end - first * bits);
            if mask != length.full() {
                return SpanPlan::Single(WordPatch {
                    column: first,
                    mask,
                });
            }
        }

        let (head, tail) = (span.start % bits, span.end % bits);
        let left = if head > 0 {
            Some(WordPatch {
                column: first,
                mask: length.span_mask(head, bits),
            })
        } else {
            None
        };
        let right = if tail > 0 {
            Some(WordPatch {
                column: last,
                mask: length.span_mask(0, tail),
            })
        } else {
            None
        };

        let run_start = if left.is_some() { first + 1 } else { first };
        let run_end = if right.is_some() { last } else { last + 1 };
        let run = if run_end > run_start {
            Some(WordRun {
                column: run_start,
                count: run_end - run_start,
            })
        } else {
            None
        };

        SpanPlan::Split { left, run, right }
    }
}

impl<Backend, RST, STB, DELAY> T6A04A<Backend, RST, STB, DELAY>
where
    Backend: T6A04ABackend,
    RST: OutputPin<Error = Backend::Error>,
    STB: OutputPin<Error = Backend::Error>,
    DELAY: DelayUs<u16>,
{
    /// Draw a horizontal line of `width` pixels starting at x, y.
    ///
    /// Negative widths extend to the left, everything off screen is clipped. Leaves the counter
    /// in row-wise increment mode.
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

        // the blind run relies on the column moving right after every write. The clipped span
        // never reaches past the row, so the counter can't wrap into the next one.
        self.set_counter_config(CounterConfig::ROW_WISE_INCREMENT)?;

        let plan = SpanPlan::new(span, self.word_length());
        trace!("t6a04a: fast fill {:?} as {:?}", span, plan);

        match plan {
            SpanPlan::Single(patch) => self.paint_word_at(span.row, patch.column, patch.mask, on),
            SpanPlan::Split { left, run, right } => {
                if let Some(patch) = left {
                    self.paint_word_at(span.row, patch.column, patch.mask, on)?;
                }
                if let Some(run) = run {
                    let word = if on { self.word_length().full() } else { 0 };
                    self.seek(span.row, run.column)?;
                    for _ in 0..run.count {
                        self.write_word(word)?;
                    }
                }
                if let Some(patch) = right {
                    self.paint_word_at(span.row, patch.column, patch.mask, on)?;
                }
                Ok(())
            }
        }
    }
}
