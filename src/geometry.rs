//! Layout constants derived once from a [`Config`].
//!
//! The page is split horizontally into `num_columns` columns of equal width
//! separated by the gutter, so that
//!
//! ```text
//! column_width * num_columns + gutter * (num_columns - 1) + left + right == page_width
//! ```
//!
//! Vertically, the column height is what remains after the margins and the
//! header/footer reservations. The header and footer heights depend on font
//! metrics and are only known after the first one has been measured, which is
//! why they are folded in afterwards through [`PageGeometry::with_header_height`]
//! and [`PageGeometry::with_footer_height`]. Both return a new geometry; a
//! geometry never changes once built.

use crate::config::{Config, Direction};
use crate::margins::Margins;
use crate::pagesize::PageOrientation;
use crate::units::Pt;
use crate::PSError;

#[derive(Debug, Clone, PartialEq)]
pub struct PageGeometry {
    /// Width of the page in the frame text is drawn in (after any landscape swap)
    pub page_width: Pt,
    pub page_height: Pt,
    pub landscape: bool,
    pub num_columns: usize,
    pub column_width: Pt,
    /// Usable height of each column, with header and footer space excluded
    pub column_height: Pt,
    pub gutter_width: Pt,
    pub margins: Margins,
    pub draw_header: bool,
    pub draw_footer: bool,
    /// Space between the header and the body; zero without a header
    pub header_sep: Pt,
    /// Space between the body and the footer; zero without a footer
    pub footer_sep: Pt,
    pub header_height: Pt,
    pub footer_height: Pt,
    pub separator_lines: bool,
    pub duplex: bool,
    pub tumble: bool,
    pub direction: Direction,
    pub justify: bool,
    /// How many shaper units make up one point
    pub units_per_pt: f32,
}

impl PageGeometry {
    /// Derive the page geometry, failing if the configuration leaves no room
    /// for text.
    pub fn compute(config: &Config) -> Result<PageGeometry, PSError> {
        if config.num_columns < 1 {
            return Err(PSError::Config("at least one column is required".into()));
        }
        if !(config.units_per_pt.is_finite() && config.units_per_pt > 0.0) {
            return Err(PSError::Config(format!(
                "units per point must be positive, got {}",
                config.units_per_pt
            )));
        }

        let margins = &config.margins;
        for (what, length) in [
            ("top margin", margins.top),
            ("right margin", margins.right),
            ("bottom margin", margins.bottom),
            ("left margin", margins.left),
            ("gutter width", config.gutter_width),
            ("header separation", config.header_sep),
        ] {
            if !(length.0.is_finite() && length.0 >= 0.0) {
                return Err(PSError::Config(format!(
                    "{what} must be a non-negative length, got {length}"
                )));
            }
        }
        for (what, font) in [("body", &config.body_font), ("header", &config.header_font)] {
            if !(font.size.0.is_finite() && font.size.0 > 0.0) {
                return Err(PSError::Config(format!(
                    "{what} font size must be positive, got {}",
                    font.size
                )));
            }
        }

        let size = config.paper.size();
        let (page_width, page_height) = if config.landscape {
            size.landscape()
        } else {
            size.portrait()
        };

        let num_columns = config.num_columns;
        let total_gutter = config.gutter_width * (num_columns - 1) as f32;
        let column_width =
            (page_width - config.margins.horizontal() - total_gutter) / num_columns as f32;
        if !(column_width.0.is_finite() && column_width.0 > 0.0) {
            return Err(PSError::Config(format!(
                "margins and gutters leave no room for {num_columns} column(s) on a {} page \
                 (column width would be {column_width})",
                config.paper
            )));
        }

        let header_sep = if config.draw_header {
            config.header_sep
        } else {
            Pt(0.0)
        };
        let footer_sep = if config.draw_footer {
            config.header_sep
        } else {
            Pt(0.0)
        };

        let geometry = PageGeometry {
            page_width,
            page_height,
            landscape: config.landscape,
            num_columns,
            column_width,
            column_height: Pt(0.0),
            gutter_width: config.gutter_width,
            margins: config.margins,
            draw_header: config.draw_header,
            draw_footer: config.draw_footer,
            header_sep,
            footer_sep,
            header_height: Pt(0.0),
            footer_height: Pt(0.0),
            separator_lines: config.separator_lines,
            duplex: config.resolved_duplex(),
            tumble: config.resolved_tumble(),
            direction: config.direction,
            justify: config.justify,
            units_per_pt: config.units_per_pt,
        }
        .rebalanced()?;

        log::debug!(
            "page {}x{} ({}), {} column(s) of {}x{}, gutter {}",
            geometry.page_width,
            geometry.page_height,
            if geometry.landscape {
                "landscape"
            } else {
                "portrait"
            },
            geometry.num_columns,
            geometry.column_width,
            geometry.column_height,
            geometry.gutter_width,
        );

        Ok(geometry)
    }

    /// A copy of this geometry reserving `height` at the top of every page for
    /// the header.
    pub fn with_header_height(&self, height: Pt) -> Result<PageGeometry, PSError> {
        PageGeometry {
            header_height: height,
            ..self.clone()
        }
        .rebalanced()
    }

    /// A copy of this geometry reserving `height` at the bottom of every page
    /// for the footer.
    pub fn with_footer_height(&self, height: Pt) -> Result<PageGeometry, PSError> {
        PageGeometry {
            footer_height: height,
            ..self.clone()
        }
        .rebalanced()
    }

    fn rebalanced(mut self) -> Result<PageGeometry, PSError> {
        self.column_height = self.page_height
            - self.margins.vertical()
            - self.header_height
            - self.header_sep
            - self.footer_height
            - self.footer_sep;
        if !(self.column_height.0.is_finite() && self.column_height.0 > 0.0) {
            return Err(PSError::Config(format!(
                "margins, header and footer leave no vertical room for text \
                 (column height would be {})",
                self.column_height
            )));
        }
        Ok(self)
    }

    /// Whether the drawing frame is wider than it is tall
    pub fn is_landscape(&self) -> bool {
        self.page_width > self.page_height
    }

    /// The bounding box as advertised in the document comments. This is always
    /// given in the unrotated (portrait) frame, whatever the orientation.
    pub fn bounding_box(&self) -> (Pt, Pt) {
        (self.page_width, self.page_height).portrait()
    }

    /// Convert a length in shaper units to points
    pub fn to_pt(&self, units: f32) -> Pt {
        Pt(units / self.units_per_pt)
    }

    /// Convert a length in points to shaper units
    pub fn to_units(&self, length: Pt) -> f32 {
        length.0 * self.units_per_pt
    }

    /// Column height in shaper units, the scale line heights are measured in
    pub fn column_height_units(&self) -> f32 {
        self.to_units(self.column_height)
    }

    /// The width the shaper should wrap body text to, in shaper units
    pub fn paint_width_units(&self) -> f32 {
        self.to_units(self.column_width)
    }

    /// Left edge of the text area
    pub fn text_left(&self) -> Pt {
        self.margins.left
    }

    /// Right edge of the text area
    pub fn text_right(&self) -> Pt {
        self.page_width - self.margins.right
    }

    /// The y coordinate the first line of every column hangs from
    pub fn body_top(&self) -> Pt {
        self.page_height - self.margins.top - self.header_height - self.header_sep
    }

    /// The lowest y coordinate body text may reach
    pub fn body_bottom(&self) -> Pt {
        self.margins.bottom + self.footer_height + self.footer_sep
    }

    /// Which horizontal slot, counted from the left, a column occupies.
    /// Right-to-left documents fill the page starting at the rightmost slot.
    pub fn column_slot(&self, column: usize) -> usize {
        match self.direction {
            Direction::LeftToRight => column,
            Direction::RightToLeft => self.num_columns - 1 - column,
        }
    }

    /// Left edge of a column
    pub fn column_x(&self, column: usize) -> Pt {
        self.margins.left + (self.column_width + self.gutter_width) * self.column_slot(column) as f32
    }

    /// The x coordinate of the rule separating `column` from the column
    /// filled before it. `column` must be at least 1.
    pub fn separator_x(&self, column: usize) -> Pt {
        let boundary = match self.direction {
            Direction::LeftToRight => column,
            Direction::RightToLeft => self.num_columns - column,
        };
        self.margins.left + (self.column_width + self.gutter_width) * boundary as f32
            - self.gutter_width / 2.0
    }

    /// The y coordinate of the rule under the header
    pub fn header_rule_y(&self) -> Pt {
        self.page_height - self.margins.top - self.header_height - self.header_sep / 2.0
    }

    /// The y coordinate of the rule above the footer
    pub fn footer_rule_y(&self) -> Pt {
        self.margins.bottom + self.footer_height + self.footer_sep / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagesize::PaperSize;

    fn assert_close(a: Pt, b: Pt) {
        assert!((a.0 - b.0).abs() < 1e-3, "{a} != {b}");
    }

    fn assert_width_invariant(g: &PageGeometry) {
        let total = g.column_width * g.num_columns as f32
            + g.gutter_width * (g.num_columns - 1) as f32
            + g.margins.left
            + g.margins.right;
        assert_close(total, g.page_width);
    }

    #[test]
    fn columns_tile_the_page_width() {
        for paper in [PaperSize::A4, PaperSize::Letter, PaperSize::Legal] {
            for columns in 1..=5 {
                for landscape in [false, true] {
                    let config = Config::default()
                        .paper(paper)
                        .columns(columns)
                        .landscape(landscape)
                        .margins(Margins::trbl(Pt(10.0), Pt(22.5), Pt(30.0), Pt(41.0)))
                        .clone();
                    let g = PageGeometry::compute(&config).unwrap();
                    assert_width_invariant(&g);
                }
            }
        }
    }

    #[test]
    fn landscape_swaps_before_deriving_columns() {
        let config = Config::default().landscape(true).clone();
        let g = PageGeometry::compute(&config).unwrap();
        assert_eq!(g.page_width, Pt(841.89));
        assert_eq!(g.page_height, Pt(595.28));
        assert!(g.is_landscape());
        assert_close(g.column_width, Pt(841.89 - 72.0));
        assert_eq!(g.bounding_box(), (Pt(595.28), Pt(841.89)));
    }

    #[test]
    fn zero_columns_is_a_config_error() {
        let config = Config::default().columns(0).clone();
        assert!(matches!(
            PageGeometry::compute(&config),
            Err(PSError::Config(_))
        ));
    }

    #[test]
    fn oversized_margins_are_a_config_error() {
        let config = Config::default()
            .margins(Margins::symmetric(Pt(36.0), Pt(300.0)))
            .clone();
        assert!(matches!(
            PageGeometry::compute(&config),
            Err(PSError::Config(_))
        ));

        let config = Config::default()
            .columns(20)
            .gutter_width(Pt(40.0))
            .clone();
        assert!(PageGeometry::compute(&config).is_err());
    }

    #[test]
    fn non_finite_lengths_are_a_config_error() {
        for bad in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY, -1.0] {
            let config = Config::default().columns(2).gutter_width(Pt(bad)).clone();
            assert!(
                matches!(PageGeometry::compute(&config), Err(PSError::Config(_))),
                "gutter {bad} accepted"
            );

            let config = Config::default().margins(Margins::all(Pt(bad))).clone();
            assert!(
                matches!(PageGeometry::compute(&config), Err(PSError::Config(_))),
                "margin {bad} accepted"
            );
        }

        let g = PageGeometry::compute(&Config::default().header(true).clone()).unwrap();
        assert!(g.with_header_height(Pt(f32::NAN)).is_err());
    }

    #[test]
    fn font_sizes_must_be_positive() {
        use crate::font::FontDescription;

        for bad in [0.0, -12.0, f32::NAN] {
            let config = Config::default()
                .body_font(FontDescription::new("Monospace", Pt(bad)))
                .clone();
            assert!(matches!(
                PageGeometry::compute(&config),
                Err(PSError::Config(_))
            ));

            let config = Config::default()
                .header_font(FontDescription::new("Monospace", Pt(bad)).bold())
                .clone();
            assert!(PageGeometry::compute(&config).is_err());
        }
    }

    #[test]
    fn header_reservation_shrinks_the_columns() {
        let config = Config::default().header(true).clone();
        let g = PageGeometry::compute(&config).unwrap();
        assert_close(g.column_height, Pt(841.89 - 72.0 - 20.0));

        let refined = g.with_header_height(Pt(14.0)).unwrap();
        assert_close(refined.column_height, Pt(841.89 - 72.0 - 20.0 - 14.0));
        assert_close(refined.body_top(), Pt(841.89 - 36.0 - 14.0 - 20.0));
        assert_close(refined.header_rule_y(), Pt(841.89 - 36.0 - 14.0 - 10.0));
        // the receiver keeps its zero header
        assert_eq!(g.header_height, Pt(0.0));
    }

    #[test]
    fn footer_reservation_raises_the_body_bottom() {
        let config = Config::default().footer(true).clone();
        let g = PageGeometry::compute(&config)
            .unwrap()
            .with_footer_height(Pt(12.0))
            .unwrap();
        assert_close(g.body_bottom(), Pt(36.0 + 12.0 + 20.0));
        assert_close(g.footer_rule_y(), Pt(36.0 + 12.0 + 10.0));
        assert_close(g.body_top() - g.body_bottom(), g.column_height);
    }

    #[test]
    fn a_huge_header_is_rejected() {
        let g = PageGeometry::compute(&Config::default().header(true).clone()).unwrap();
        assert!(g.with_header_height(Pt(10_000.0)).is_err());
    }

    #[test]
    fn right_to_left_mirrors_columns() {
        let config = Config::default()
            .columns(3)
            .direction(Direction::RightToLeft)
            .clone();
        let g = PageGeometry::compute(&config).unwrap();
        assert_close(g.column_x(0), g.text_right() - g.column_width);
        assert_close(g.column_x(2), g.text_left());

        let ltr = PageGeometry::compute(&Config::default().columns(3).clone()).unwrap();
        // the rule between the first two columns filled sits in the gutter
        // between them, whichever side of the page that is
        assert_close(
            ltr.separator_x(1),
            ltr.column_x(1) - ltr.gutter_width / 2.0,
        );
        assert_close(g.separator_x(1), g.column_x(0) - g.gutter_width / 2.0);
        assert_close(g.separator_x(2), g.column_x(1) - g.gutter_width / 2.0);
    }

    #[test]
    fn unit_conversion_round_trips() {
        let mut config = Config::default();
        config.units_per_pt = 1024.0;
        let g = PageGeometry::compute(&config).unwrap();
        assert_eq!(g.to_units(Pt(2.0)), 2048.0);
        assert_eq!(g.to_pt(512.0), Pt(0.5));
        assert_close(g.to_pt(g.column_height_units()), g.column_height);

        config.units_per_pt = 0.0;
        assert!(PageGeometry::compute(&config).is_err());
    }
}
