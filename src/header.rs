//! Page headers and footers.
//!
//! Each header (or footer) is three cells on one line: the timestamp on the
//! left, the title centred on the page, and the page number on the right, with
//! a rule separating it from the body text.
//!
//! Because cell heights come from the shaper's font metrics, the space a
//! header needs is only known once one has been shaped. Callers measure first
//! and fold the result into the geometry before any line is laid out:
//!
//! ```
//! # use textps::{Config, FontDescription, HeaderComposer, MonospaceShaper, PageGeometry};
//! let config = Config::default().header(true).clone();
//! let shaper = MonospaceShaper::new(&config);
//! let composer = HeaderComposer::new("notes.txt", config.header_font.clone());
//!
//! let geometry = PageGeometry::compute(&config).unwrap();
//! let height = composer.measure(&shaper);
//! let geometry = geometry.with_header_height(height).unwrap();
//!
//! let header = composer.compose(&shaper, &geometry, 3, false);
//! assert_eq!(header.height, geometry.header_height);
//! ```

use crate::font::FontDescription;
use crate::geometry::PageGeometry;
use crate::shaping::{ShapedLine, Shaper};
use crate::units::Pt;
use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;

/// One shaped piece of header text and where its bottom left corner goes
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCell<T> {
    pub line: ShapedLine<T>,
    pub x: Pt,
    pub y: Pt,
}

/// A fully positioned header or footer
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderLayout<T> {
    pub left: HeaderCell<T>,
    pub center: HeaderCell<T>,
    pub right: HeaderCell<T>,
    /// Vertical space taken by the cells
    pub height: Pt,
    /// The separating rule runs across the text area at this height
    pub rule_y: Pt,
    pub rule_from: Pt,
    pub rule_to: Pt,
}

impl<T> HeaderLayout<T> {
    pub fn cells(&self) -> [&HeaderCell<T>; 3] {
        [&self.left, &self.center, &self.right]
    }
}

/// Builds the header and footer for each page of one document
#[derive(Debug, Clone)]
pub struct HeaderComposer {
    title: String,
    timestamp: String,
    font: FontDescription,
}

impl HeaderComposer {
    /// A composer stamping headers with the current local time
    pub fn new<S: ToString>(title: S, font: FontDescription) -> HeaderComposer {
        HeaderComposer::with_timestamp(title, font, Local::now())
    }

    /// A composer stamping headers with a fixed time
    pub fn with_timestamp<S, Tz>(title: S, font: FontDescription, time: DateTime<Tz>) -> HeaderComposer
    where
        S: ToString,
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        HeaderComposer {
            title: title.to_string(),
            timestamp: time.format("%c").to_string(),
            font,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    fn shape<S: Shaper>(&self, shaper: &S, page: usize) -> [ShapedLine<S::Token>; 3] {
        [
            shaper.shape_cell(&self.timestamp, &self.font),
            shaper.shape_cell(&self.title, &self.font),
            shaper.shape_cell(&format!("Page {page}"), &self.font),
        ]
    }

    /// The vertical space a header needs, measured by shaping the first one
    pub fn measure<S: Shaper>(&self, shaper: &S) -> Pt {
        let cells = self.shape(shaper, 1);
        let height = cells.iter().map(|c| c.height).fold(0.0, f32::max);
        let height = Pt(height / shaper.units_per_pt());
        log::debug!("header height measured at {height}");
        height
    }

    /// Lay out the header (or footer) of `page`. The geometry must already
    /// carry the measured header (or footer) height.
    pub fn compose<S: Shaper>(
        &self,
        shaper: &S,
        geometry: &PageGeometry,
        page: usize,
        is_footer: bool,
    ) -> HeaderLayout<S::Token> {
        let [left, center, right] = self.shape(shaper, page);
        let height = [&left, &center, &right]
            .iter()
            .map(|c| c.height)
            .fold(0.0, f32::max);
        let height = geometry.to_pt(height);

        let (y, rule_y) = if is_footer {
            (geometry.margins.bottom, geometry.footer_rule_y())
        } else {
            (
                geometry.page_height - geometry.margins.top - height,
                geometry.header_rule_y(),
            )
        };

        let left_x = geometry.text_left();
        let center_x = (geometry.page_width - geometry.to_pt(center.width)) / 2.0;
        let right_x = geometry.text_right() - geometry.to_pt(right.width);

        HeaderLayout {
            left: HeaderCell {
                line: left,
                x: left_x,
                y,
            },
            center: HeaderCell {
                line: center,
                x: center_x,
                y,
            },
            right: HeaderCell {
                line: right,
                x: right_x,
                y,
            },
            height,
            rule_y,
            rule_from: geometry.text_left(),
            rule_to: geometry.text_right(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::shaping::tests::GridShaper;
    use chrono::{FixedOffset, TimeZone};

    fn composer() -> HeaderComposer {
        let time = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 9, 14, 5, 0)
            .unwrap();
        HeaderComposer::with_timestamp("report.txt", FontDescription::new("Mono", Pt(10.0)), time)
    }

    fn geometry(config: &Config) -> PageGeometry {
        PageGeometry::compute(config).unwrap()
    }

    #[test]
    fn formats_the_timestamp_in_locale_style() {
        assert_eq!(composer().timestamp(), "Sat Mar  9 14:05:00 2024");
    }

    #[test]
    fn measures_from_the_shaped_cells() {
        let shaper = GridShaper { line_height: 99.0 };
        assert_eq!(composer().measure(&shaper), Pt(10.0));
    }

    #[test]
    fn places_three_cells_across_the_top() {
        let shaper = GridShaper { line_height: 12.0 };
        let config = Config::default().header(true).clone();
        let composer = composer();
        let g = geometry(&config)
            .with_header_height(composer.measure(&shaper))
            .unwrap();

        let header = composer.compose(&shaper, &g, 7, false);
        assert_eq!(header.right.line.token, "Page 7");
        assert_eq!(header.center.line.token, "report.txt");
        assert_eq!(header.left.x, g.margins.left);
        assert_eq!(header.right.x, g.text_right() - Pt(6.0));
        assert_eq!(header.center.x, (g.page_width - Pt(10.0)) / 2.0);
        for cell in header.cells() {
            assert_eq!(cell.y, g.page_height - g.margins.top - Pt(10.0));
        }
        assert_eq!(header.rule_y, g.header_rule_y());
        assert!(header.rule_y < header.left.y);
        assert!(header.rule_y > g.body_top());
    }

    #[test]
    fn footers_sit_on_the_bottom_margin() {
        let shaper = GridShaper { line_height: 12.0 };
        let config = Config::default().footer(true).clone();
        let composer = composer();
        let g = geometry(&config)
            .with_footer_height(composer.measure(&shaper))
            .unwrap();

        let footer = composer.compose(&shaper, &g, 1, true);
        assert_eq!(footer.left.y, g.margins.bottom);
        assert_eq!(footer.rule_y, g.footer_rule_y());
        assert!(footer.rule_y > footer.left.y + footer.height - Pt(0.001));
        assert!(footer.rule_y < g.body_bottom());
    }
}
