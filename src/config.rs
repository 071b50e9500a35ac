use crate::font::FontDescription;
use crate::margins::Margins;
use crate::pagesize::PaperSize;
use crate::units::Pt;

/// The direction text (and therefore the column order) runs in
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    #[default]
    LeftToRight,
    RightToLeft,
}

/// Everything the page geometry and the document emitter are derived from.
///
/// All fields are public; the chainable setters exist so a configuration
/// can be built up in one expression:
///
/// ```
/// use textps::{Config, PaperSize};
///
/// let config = Config::default()
///     .paper(PaperSize::Letter)
///     .columns(2)
///     .landscape(true)
///     .header(true)
///     .clone();
/// assert_eq!(config.num_columns, 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Title shown in the header and the document comments
    pub title: String,
    pub paper: PaperSize,
    pub margins: Margins,
    pub num_columns: usize,
    /// Horizontal space between adjacent columns
    pub gutter_width: Pt,
    pub landscape: bool,
    /// `None` lets the orientation decide
    pub duplex: Option<bool>,
    /// `None` lets the orientation decide
    pub tumble: Option<bool>,
    pub direction: Direction,
    pub justify: bool,
    pub draw_header: bool,
    pub draw_footer: bool,
    /// Vertical space between the header (or footer) and the body text
    pub header_sep: Pt,
    pub separator_lines: bool,
    pub body_font: FontDescription,
    pub header_font: FontDescription,
    /// How many shaper units make up one point
    pub units_per_pt: f32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            title: "stdin".to_string(),
            paper: PaperSize::A4,
            margins: Margins::all(Pt(36.0)),
            num_columns: 1,
            gutter_width: Pt(40.0),
            landscape: false,
            duplex: None,
            tumble: None,
            direction: Direction::LeftToRight,
            justify: false,
            draw_header: false,
            draw_footer: false,
            header_sep: Pt(20.0),
            separator_lines: true,
            body_font: FontDescription::new("Monospace", Pt(12.0)),
            header_font: FontDescription::new("Monospace", Pt(12.0)).bold(),
            units_per_pt: 1.0,
        }
    }
}

impl Config {
    pub fn title<S: ToString>(&mut self, title: S) -> &mut Self {
        self.title = title.to_string();
        self
    }

    pub fn paper(&mut self, paper: PaperSize) -> &mut Self {
        self.paper = paper;
        self
    }

    pub fn margins(&mut self, margins: Margins) -> &mut Self {
        self.margins = margins;
        self
    }

    pub fn columns(&mut self, num_columns: usize) -> &mut Self {
        self.num_columns = num_columns;
        self
    }

    pub fn gutter_width(&mut self, gutter_width: Pt) -> &mut Self {
        self.gutter_width = gutter_width;
        self
    }

    pub fn landscape(&mut self, landscape: bool) -> &mut Self {
        self.landscape = landscape;
        self
    }

    pub fn direction(&mut self, direction: Direction) -> &mut Self {
        self.direction = direction;
        self
    }

    pub fn justify(&mut self, justify: bool) -> &mut Self {
        self.justify = justify;
        self
    }

    pub fn header(&mut self, draw_header: bool) -> &mut Self {
        self.draw_header = draw_header;
        self
    }

    pub fn footer(&mut self, draw_footer: bool) -> &mut Self {
        self.draw_footer = draw_footer;
        self
    }

    pub fn separator_lines(&mut self, separator_lines: bool) -> &mut Self {
        self.separator_lines = separator_lines;
        self
    }

    pub fn body_font(&mut self, font: FontDescription) -> &mut Self {
        self.body_font = font;
        self
    }

    pub fn header_font(&mut self, font: FontDescription) -> &mut Self {
        self.header_font = font;
        self
    }

    /// Whether the printer should print on both sides of the sheet.
    /// Unless set explicitly this is on for both orientations.
    pub fn resolved_duplex(&self) -> bool {
        self.duplex.unwrap_or(true)
    }

    /// Whether the back side is flipped along the short edge.
    /// Unless set explicitly this is on for both orientations.
    pub fn resolved_tumble(&self) -> bool {
        self.tumble.unwrap_or(true)
    }
}
