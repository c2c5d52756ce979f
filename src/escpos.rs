//! ESC/POS protocol encoder
//!
//! Serializes layout segments into the exact byte stream the printer
//! understands. Pure: the same segment sequence always encodes to the same
//! bytes. Each segment maps to one complete, self-contained byte group;
//! nothing is buffered across segments.
//!
//! Text is encoded as windows-1252 (ASCII-compatible single byte).
//! Characters outside that page do not round-trip; the firmware has no
//! notion of UTF-8.

use crate::format::{pad_left, pad_right};
use crate::receipt::{Align, Column, Font, LayoutSegment};

/// ESC @ - reset, then left alignment and normal font so the stream never
/// inherits state from a previous job
const INIT: [u8; 8] = [0x1B, 0x40, 0x1B, 0x61, 0x00, 0x1D, 0x21, 0x00];

/// Segment-to-byte encoder
pub struct Encoder {
    buf: Vec<u8>,
}

impl Encoder {
    pub fn new() -> Self {
        let mut buf = Vec::with_capacity(4096);
        buf.extend_from_slice(&INIT);
        Self { buf }
    }

    /// Encode a full segment sequence into one byte stream
    pub fn encode(segments: &[LayoutSegment]) -> Vec<u8> {
        let mut enc = Self::new();
        for segment in segments {
            enc.segment(segment);
        }
        enc.finish()
    }

    fn segment(&mut self, segment: &LayoutSegment) {
        match segment {
            LayoutSegment::Text(s) => self.line(s),
            LayoutSegment::SetAlign(align) => self.align(*align),
            LayoutSegment::SetFont(font) => self.font(*font),
            LayoutSegment::TableRow(columns) => self.table_row(columns),
            LayoutSegment::Cut => self.cut(),
            LayoutSegment::FeedLines(n) => self.feed(*n),
        }
    }

    /// Write text followed by a line feed
    fn line(&mut self, s: &str) {
        let (bytes, _, _) = encoding_rs::WINDOWS_1252.encode(s);
        self.buf.extend_from_slice(&bytes);
        self.buf.push(0x0A);
    }

    /// ESC a n - select justification
    fn align(&mut self, align: Align) {
        let n = match align {
            Align::Left => 0x00,
            Align::Center => 0x01,
            Align::Right => 0x02,
        };
        self.buf.extend_from_slice(&[0x1B, 0x61, n]);
    }

    /// GS ! n for sizes, ESC M 1 for the condensed font
    fn font(&mut self, font: Font) {
        match font {
            Font::Normal => self.buf.extend_from_slice(&[0x1D, 0x21, 0x00]),
            Font::DoubleWidth => self.buf.extend_from_slice(&[0x1D, 0x21, 0x10]),
            Font::DoubleHeight => self.buf.extend_from_slice(&[0x1D, 0x21, 0x01]),
            Font::Small => self.buf.extend_from_slice(&[0x1B, 0x4D, 0x01]),
        }
    }

    /// Columns are pre-sized; pad each cell to its width and emit the
    /// concatenation as a plain text line
    fn table_row(&mut self, columns: &[Column]) {
        let mut row = String::new();
        for column in columns {
            let cell = match column.align {
                Align::Right => pad_left(&column.text, column.width_chars),
                _ => pad_right(&column.text, column.width_chars),
            };
            row.push_str(&cell);
        }
        self.line(&row);
    }

    /// GS V 0 - full cut
    fn cut(&mut self) {
        self.buf.extend_from_slice(&[0x1D, 0x56, 0x00]);
    }

    fn feed(&mut self, lines: u8) {
        for _ in 0..lines {
            self.buf.push(0x0A);
        }
    }

    /// Hand the finished stream off; the buffer moves out, nothing is kept
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}
