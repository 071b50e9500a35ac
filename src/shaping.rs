//! The seam between page layout and text shaping.
//!
//! Layout never looks at text. It only needs each line's measured extents and
//! two flags, and hands the line's opaque token back to the [`Shaper`] when the
//! line has to be drawn at a particular position. Raw input is prepared for
//! the shaper by [`decode_input`] and [`split_paragraphs`], and
//! [`shape_paragraphs`] turns the paragraphs into the flat line sequence the
//! flow engine consumes.

use crate::error::{ShapingInputError, ShapingInputKind};
use crate::font::FontDescription;
use crate::units::Pt;
use std::io::{self, Write};

/// A line of text that has already been broken, measured, and positioned
/// internally by a [`Shaper`]. Extents are in shaper units.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapedLine<T> {
    pub width: f32,
    pub height: f32,
    /// This is the last line of its paragraph
    pub paragraph_end: bool,
    /// The paragraph ended with a form feed, so whatever follows starts a new column
    pub formfeed: bool,
    /// Handed back to the shaper to draw the line
    pub token: T,
}

impl<T> ShapedLine<T> {
    pub fn new(width: f32, height: f32, token: T) -> ShapedLine<T> {
        ShapedLine {
            width,
            height,
            paragraph_end: false,
            formfeed: false,
            token,
        }
    }
}

/// A text shaping engine
pub trait Shaper {
    /// Whatever the shaper needs to draw a line it produced earlier
    type Token;

    /// How many of this shaper's units make up one point
    fn units_per_pt(&self) -> f32;

    /// Break a paragraph (without its terminator) into lines no wider than
    /// `paint_width` shaper units. An empty paragraph still yields one line.
    fn shape_paragraph(&self, text: &str, paint_width: f32) -> Vec<ShapedLine<Self::Token>>;

    /// Shape a single unbroken line in the given font, for headers and footers
    fn shape_cell(&self, text: &str, font: &FontDescription) -> ShapedLine<Self::Token>;

    /// Write the page-description instructions drawing a line with its bottom
    /// left corner at `(x, y)`
    fn render_line<W: Write>(&self, token: &Self::Token, x: Pt, y: Pt, out: &mut W)
        -> io::Result<()>;

    /// Write the definitions (fonts and so on) the rendered lines rely on.
    /// Called once, after every line has been rendered.
    fn write_resources<W: Write>(&self, out: &mut W) -> io::Result<()>;
}

/// A run of text terminated by a newline or a form feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub text: String,
    pub formfeed: bool,
}

/// Decode raw input as UTF-8, substituting U+FFFD for every invalid sequence
pub fn decode_input(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    let mut offset = 0;
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
        offset += chunk.valid().len();
        if !chunk.invalid().is_empty() {
            ShapingInputError::new(offset, ShapingInputKind::InvalidUtf8).report();
            text.push(char::REPLACEMENT_CHARACTER);
            offset += chunk.invalid().len();
        }
    }
    text
}

/// Split text into paragraphs on `\n` and `\f`. Line endings are normalised
/// first; control characters other than tab are replaced with U+FFFD. A final
/// paragraph without a terminator is kept.
pub fn split_paragraphs(text: &str) -> Vec<Paragraph> {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");

    let mut paragraphs = Vec::new();
    let mut current = String::new();
    for (offset, ch) in text.char_indices() {
        match ch {
            '\n' | '\u{c}' => paragraphs.push(Paragraph {
                text: std::mem::take(&mut current),
                formfeed: ch == '\u{c}',
            }),
            '\t' => current.push(ch),
            ch if ch.is_control() => {
                ShapingInputError::new(offset, ShapingInputKind::ControlCharacter(ch)).report();
                current.push(char::REPLACEMENT_CHARACTER);
            }
            ch => current.push(ch),
        }
    }
    if !current.is_empty() {
        paragraphs.push(Paragraph {
            text: current,
            formfeed: false,
        });
    }

    paragraphs
}

/// Shape every paragraph and flatten the result into one line sequence,
/// flagging the last line of each paragraph.
pub fn shape_paragraphs<S: Shaper>(
    shaper: &S,
    paragraphs: &[Paragraph],
    paint_width: f32,
) -> Vec<ShapedLine<S::Token>> {
    let mut lines = Vec::new();
    for paragraph in paragraphs {
        let mut shaped = shaper.shape_paragraph(&paragraph.text, paint_width);
        match shaped.last_mut() {
            Some(last) => {
                last.paragraph_end = true;
                last.formfeed = paragraph.formfeed;
            }
            None => {
                log::debug!("shaper produced no lines for a paragraph, skipping it");
                continue;
            }
        }
        lines.append(&mut shaped);
    }
    lines
}
