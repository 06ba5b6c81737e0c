//! Fixed-size character frame for the two-line LCD
//!
//! Text flows across the lines in order: the first 16 characters fill line
//! one, the next 16 fill line two. Anything shorter is padded with spaces so
//! a short message fully overwrites a longer one.

/// Characters per line
pub const COLUMNS: usize = 16;

/// Number of lines
pub const ROWS: usize = 2;

/// Total characters per frame
pub const FRAME_CHARS: usize = COLUMNS * ROWS;

/// A full screen of display bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    cells: [u8; FRAME_CHARS],
}

impl Frame {
    /// An all-blank frame
    pub const fn blank() -> Self {
        Self {
            cells: [b' '; FRAME_CHARS],
        }
    }

    /// Lay out `text`, truncating past the last cell
    ///
    /// Characters outside printable ASCII are shown as '?'.
    pub fn from_text(text: &str) -> Self {
        let mut frame = Self::blank();
        for (cell, c) in frame.cells.iter_mut().zip(text.chars()) {
            *cell = if c.is_ascii() && !c.is_ascii_control() {
                c as u8
            } else {
                b'?'
            };
        }
        frame
    }

    /// Bytes for one line
    pub fn line(&self, row: usize) -> &[u8] {
        let start = row.min(ROWS - 1) * COLUMNS;
        &self.cells[start..start + COLUMNS]
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::blank()
    }
}
