//! A fixed-pitch [`Shaper`] built on the standard PostScript Courier faces.
//!
//! Every glyph of Courier advances by 0.6 em, so shaping reduces to counting
//! characters. Text is wrapped at whitespace where possible and hard-broken
//! otherwise. Fonts are re-encoded to ISO Latin-1, so characters outside that
//! range are printed as `?`.

use crate::config::Config;
use crate::error::{ShapingInputError, ShapingInputKind};
use crate::font::{FontDescription, FontStyle};
use crate::shaping::{ShapedLine, Shaper};
use crate::units::Pt;
use std::cell::RefCell;
use std::io::{self, Write};

/// Horizontal advance of every glyph, in em
const ADVANCE: f32 = 0.6;
/// Distance between baselines, in em
const LINE_SPACING: f32 = 1.2;
/// Space below the baseline, in em
const DESCENT: f32 = 0.2;
const TAB_STOP: usize = 8;

/// What a [`MonospaceShaper`] needs to draw a line
#[derive(Debug, Clone, PartialEq)]
pub struct MonoLine {
    pub text: String,
    /// Index into the shaper's font table
    pub font: usize,
    pub size: Pt,
    /// Extra space added to every space character when justifying
    pub word_spacing: Pt,
}

pub struct MonospaceShaper {
    body_font: FontDescription,
    justify: bool,
    units_per_pt: f32,
    /// PostScript names of the faces used so far
    fonts: RefCell<Vec<&'static str>>,
}

impl MonospaceShaper {
    pub fn new(config: &Config) -> MonospaceShaper {
        let shaper = MonospaceShaper {
            body_font: config.body_font.clone(),
            justify: config.justify,
            units_per_pt: config.units_per_pt,
            fonts: RefCell::new(Vec::new()),
        };
        shaper.font_index(&config.body_font);
        shaper
    }

    /// The Courier face closest to a description. Only weight and slant are
    /// honoured; every family is printed in Courier.
    fn postscript_name(desc: &FontDescription) -> &'static str {
        match (desc.bold, desc.style) {
            (false, FontStyle::Normal) => "Courier",
            (true, FontStyle::Normal) => "Courier-Bold",
            (false, _) => "Courier-Oblique",
            (true, _) => "Courier-BoldOblique",
        }
    }

    fn font_index(&self, desc: &FontDescription) -> usize {
        let name = Self::postscript_name(desc);
        let mut fonts = self.fonts.borrow_mut();
        match fonts.iter().position(|f| *f == name) {
            Some(index) => index,
            None => {
                fonts.push(name);
                fonts.len() - 1
            }
        }
    }

    fn advance(&self, size: Pt) -> f32 {
        size.0 * ADVANCE * self.units_per_pt
    }

    fn line_height(&self, size: Pt) -> f32 {
        size.0 * LINE_SPACING * self.units_per_pt
    }

    /// Break expanded text into rows of at most `max_chars` characters,
    /// preferring to break at whitespace
    fn wrap(chars: &[char], max_chars: usize) -> Vec<String> {
        let mut rows = Vec::new();
        let mut start = 0;
        while chars.len() - start > max_chars {
            // look one past the limit so a space right at the edge counts
            let window = &chars[start..=start + max_chars];
            match window.iter().rposition(|c| c.is_whitespace()).filter(|&p| p > 0) {
                Some(p) => {
                    let row: String = chars[start..start + p].iter().collect();
                    rows.push(row.trim_end().to_string());
                    start += p + 1;
                }
                None => {
                    rows.push(chars[start..start + max_chars].iter().collect());
                    start += max_chars;
                }
            }
        }
        rows.push(chars[start..].iter().collect());
        rows
    }

    fn line(&self, text: String, font: usize, size: Pt, word_spacing: Pt) -> ShapedLine<MonoLine> {
        let spaces = text.chars().filter(|&c| c == ' ').count() as f32;
        let width = self.advance(size) * text.chars().count() as f32
            + word_spacing.0 * spaces * self.units_per_pt;
        ShapedLine::new(
            width,
            self.line_height(size),
            MonoLine {
                text,
                font,
                size,
                word_spacing,
            },
        )
    }
}

/// Expand tabs to the next tab stop
fn expand_tabs(text: &str) -> Vec<char> {
    let mut out = Vec::with_capacity(text.len());
    for ch in text.chars() {
        if ch == '\t' {
            let pad = TAB_STOP - out.len() % TAB_STOP;
            out.extend(std::iter::repeat(' ').take(pad));
        } else {
            out.push(ch);
        }
    }
    out
}

/// Write `text` as a PostScript string literal in Latin-1
fn write_ps_string<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    write!(out, "(")?;
    for (column, ch) in text.chars().enumerate() {
        let byte = match u8::try_from(ch as u32) {
            Ok(byte) => byte,
            Err(_) => {
                if ch != char::REPLACEMENT_CHARACTER {
                    ShapingInputError::new(column, ShapingInputKind::Unencodable(ch)).report();
                }
                b'?'
            }
        };
        match byte {
            b'(' | b')' | b'\\' => write!(out, "\\{}", byte as char)?,
            0x20..=0x7e => write!(out, "{}", byte as char)?,
            _ => write!(out, "\\{byte:03o}")?,
        }
    }
    write!(out, ")")
}

impl Shaper for MonospaceShaper {
    type Token = MonoLine;

    fn units_per_pt(&self) -> f32 {
        self.units_per_pt
    }

    fn shape_paragraph(&self, text: &str, paint_width: f32) -> Vec<ShapedLine<MonoLine>> {
        let size = self.body_font.size;
        let font = self.font_index(&self.body_font);
        let max_chars = ((paint_width / self.advance(size)).floor() as usize).max(1);

        let rows = Self::wrap(&expand_tabs(text), max_chars);
        let last = rows.len() - 1;
        rows.into_iter()
            .enumerate()
            .map(|(i, row)| {
                let spaces = row.chars().filter(|&c| c == ' ').count();
                let spacing = if self.justify && i < last && spaces > 0 {
                    let natural = self.advance(size) * row.chars().count() as f32;
                    Pt((paint_width - natural).max(0.0) / self.units_per_pt / spaces as f32)
                } else {
                    Pt(0.0)
                };
                self.line(row, font, size, spacing)
            })
            .collect()
    }

    fn shape_cell(&self, text: &str, font: &FontDescription) -> ShapedLine<MonoLine> {
        let index = self.font_index(font);
        let text: String = expand_tabs(text).into_iter().collect();
        self.line(text, index, font.size, Pt(0.0))
    }

    #[allow(clippy::write_with_newline)]
    fn render_line<W: Write>(&self, token: &MonoLine, x: Pt, y: Pt, out: &mut W) -> io::Result<()> {
        if token.text.is_empty() {
            return Ok(());
        }
        let baseline = y + token.size * DESCENT;
        write!(out, "/PapsF{} {} selectfont\n", token.font, token.size.0)?;
        write!(out, "{:.2} {:.2} moveto ", x.0, baseline.0)?;
        if token.word_spacing > Pt(0.0) {
            write!(out, "{:.3} 0 32 ", token.word_spacing.0)?;
            write_ps_string(out, &token.text)?;
            write!(out, " widthshow\n")
        } else {
            write_ps_string(out, &token.text)?;
            write!(out, " show\n")
        }
    }

    #[allow(clippy::write_with_newline)]
    fn write_resources<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "%% Fonts, re-encoded to ISO Latin-1\n")?;
        for (index, name) in self.fonts.borrow().iter().enumerate() {
            write!(
                out,
                "/PapsF{index} /{name} findfont dup length dict begin\n\
                 \x20   {{ 1 index /FID ne {{ def }} {{ pop pop }} ifelse }} forall\n\
                 \x20   /Encoding ISOLatin1Encoding def\n\
                 \x20   currentdict\n\
                 end definefont pop\n"
            )?;
        }
        Ok(())
    }
}
