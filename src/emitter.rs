//! Serialises a laid out document as PostScript.
//!
//! The emitter is driven in a fixed order:
//!
//! 1. [`DocumentEmitter::begin`] writes the document comments and the
//!    procedure definitions straight to the sink.
//! 2. Pages are opened with [`begin_page`](DocumentEmitter::begin_page),
//!    filled with lines, separators and headers, and closed with
//!    [`end_page`](DocumentEmitter::end_page). Page bodies are buffered,
//!    because the shaper's font resources have to precede them and are only
//!    complete once every line has been drawn.
//! 3. [`DocumentEmitter::finish`] writes the resources, the buffered pages and
//!    the trailer carrying the page count.
//!
//! Calling anything out of order is an internal error and reported as
//! [`PSError::EmitterState`].

use crate::config::Direction;
use crate::flow::PlacementEvent;
use crate::geometry::PageGeometry;
use crate::header::HeaderLayout;
use crate::shaping::{ShapedLine, Shaper};
use crate::PSError;
use derive_more::Display;
use std::io::Write;

/// Where the emitter is in the document
#[derive(Debug, Copy, Clone, PartialEq, Eq, Display)]
pub enum EmitterState {
    #[display("uninitialized")]
    Uninitialized,
    #[display("past the prologue")]
    PrologueEmitted,
    #[display("inside a page")]
    PageOpen,
    #[display("between pages")]
    PageClosed,
    #[display("finalized")]
    Finalized,
}

pub struct DocumentEmitter<W: Write> {
    sink: W,
    state: EmitterState,
    geometry: Option<PageGeometry>,
    body: Vec<u8>,
    pages: usize,
}

fn ps_bool(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// DSC comments end at the line break, so keep titles on one line
fn dsc_text(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

impl<W: Write> DocumentEmitter<W> {
    pub fn new(sink: W) -> DocumentEmitter<W> {
        DocumentEmitter {
            sink,
            state: EmitterState::Uninitialized,
            geometry: None,
            body: Vec::new(),
            pages: 0,
        }
    }

    pub fn state(&self) -> EmitterState {
        self.state
    }

    /// Number of pages opened so far
    pub fn pages(&self) -> usize {
        self.pages
    }

    fn require_state(
        &self,
        operation: &'static str,
        allowed: &[EmitterState],
    ) -> Result<(), PSError> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(PSError::EmitterState {
                operation,
                state: self.state,
            })
        }
    }

    fn geometry(&self, operation: &'static str) -> Result<&PageGeometry, PSError> {
        self.geometry.as_ref().ok_or(PSError::EmitterState {
            operation,
            state: self.state,
        })
    }

    /// Write the document header and procedure definitions
    #[allow(clippy::write_with_newline)]
    pub fn begin(&mut self, title: &str, geometry: &PageGeometry) -> Result<(), PSError> {
        self.require_state("begin", &[EmitterState::Uninitialized])?;

        let (bb_width, bb_height) = geometry.bounding_box();
        let out = &mut self.sink;

        write!(out, "%!PS-Adobe-3.0\n")?;
        write!(out, "%%Title: {}\n", dsc_text(title))?;
        write!(
            out,
            "%%Creator: {} v{}\n",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        )?;
        write!(out, "%%Pages: (atend)\n")?;
        write!(
            out,
            "%%BoundingBox: 0 0 {} {}\n",
            bb_width.0.round(),
            bb_height.0.round()
        )?;
        write!(
            out,
            "%%Orientation: {}\n",
            if geometry.is_landscape() {
                "Landscape"
            } else {
                "Portrait"
            }
        )?;
        write!(out, "%%BeginProlog\n")?;
        write!(out, "/papsdict 32 dict def\n")?;
        write!(out, "papsdict begin\n")?;

        // ask the device for the right paper, portrait side up, where it can
        write!(
            out,
            "/setpagesize where {{ pop }} {{\n\
             \x20   /setpagedevice where {{\n\
             \x20       pop\n\
             \x20       /setpagesize {{\n\
             \x20           2 dict begin\n\
             \x20           /h exch def /w exch def\n\
             \x20           w h gt {{ /w h /h w def def }} if\n\
             \x20           << /PageSize [w h] >> setpagedevice\n\
             \x20           end\n\
             \x20       }} def\n\
             \x20   }} {{\n\
             \x20       /setpagesize {{ pop pop }} def\n\
             \x20   }} ifelse\n\
             }} ifelse\n"
        )?;
        write!(
            out,
            "/duplex {{\n\
             \x20   statusdict /setduplexmode known\n\
             \x20   {{ statusdict begin setduplexmode end }} {{ pop }} ifelse\n\
             }} def\n\
             /tumble {{\n\
             \x20   statusdict /settumble known\n\
             \x20   {{ statusdict begin settumble end }} {{ pop }} ifelse\n\
             }} def\n\
             /turnpage {{\n\
             \x20   90 rotate\n\
             \x20   0 pageheight neg translate\n\
             }} def\n"
        )?;

        write!(out, "/pagewidth {} def\n", geometry.page_width.0)?;
        write!(out, "/pageheight {} def\n", geometry.page_height.0)?;
        write!(out, "/column_width {} def\n", geometry.column_width.0)?;
        write!(out, "/gutter_width {} def\n", geometry.gutter_width.0)?;
        write!(out, "/bodyheight {} def\n", geometry.column_height.0)?;
        write!(out, "/lmarg {} def\n", geometry.margins.left.0)?;
        write!(out, "/ytop {} def\n", geometry.body_top().0)?;
        write!(
            out,
            "/do_separation_line {} def\n",
            ps_bool(geometry.separator_lines)
        )?;
        write!(out, "/do_landscape {} def\n", ps_bool(geometry.is_landscape()))?;
        write!(out, "/do_duplex {} def\n", ps_bool(geometry.duplex))?;
        write!(out, "/do_tumble {} def\n", ps_bool(geometry.tumble))?;
        write!(out, "/firstx {} def\n", geometry.column_x(0).0)?;
        write!(out, "/ruletop {} def\n", geometry.header_rule_y().0)?;
        write!(out, "/rulebottom {} def\n", geometry.footer_rule_y().0)?;

        // `sepx colx nextcolumn` enters the column at colx, ruling it off at sepx
        write!(
            out,
            "/setnumcolumns {{\n\
             \x20   /numcolumns exch def\n\
             \x20   /firstcolumn {{ /xpos firstx def /ypos ytop def }} def\n\
             \x20   /nextcolumn {{\n\
             \x20       /xpos exch def\n\
             \x20       /ypos ytop def\n\
             \x20       do_separation_line {{\n\
             \x20           ruletop moveto 0 rulebottom ruletop sub rlineto\n\
             \x20           0 setlinewidth stroke\n\
             \x20       }} {{ pop }} ifelse\n\
             \x20   }} def\n\
             }} def\n"
        )?;
        write!(out, "{} setnumcolumns\n", geometry.num_columns)?;
        write!(out, "end\n")?;

        write!(
            out,
            "/paps_bop {{\n\
             \x20   papsdict begin\n\
             \x20   gsave\n\
             \x20   do_landscape {{ turnpage }} if\n\
             \x20   firstcolumn\n\
             \x20   end\n\
             }} def\n\
             /paps_eop {{\n\
             \x20   grestore\n\
             }} def\n"
        )?;

        self.geometry = Some(geometry.clone());
        self.state = EmitterState::PrologueEmitted;
        Ok(())
    }

    #[allow(clippy::write_with_newline)]
    pub fn begin_page(&mut self, page: usize) -> Result<(), PSError> {
        self.require_state(
            "begin_page",
            &[EmitterState::PrologueEmitted, EmitterState::PageClosed],
        )?;
        write!(self.body, "%%Page: {page} {page}\n")?;
        write!(self.body, "paps_bop\n")?;
        self.pages += 1;
        self.state = EmitterState::PageOpen;
        Ok(())
    }

    #[allow(clippy::write_with_newline)]
    pub fn end_page(&mut self) -> Result<(), PSError> {
        self.require_state("end_page", &[EmitterState::PageOpen])?;
        write!(self.body, "paps_eop\n")?;
        write!(self.body, "showpage\n")?;
        self.state = EmitterState::PageClosed;
        Ok(())
    }

    /// Draw a line whose bottom sits `offset` shaper units below the top of
    /// `column`
    pub fn draw_line<S: Shaper>(
        &mut self,
        shaper: &S,
        column: usize,
        offset: f32,
        line: &ShapedLine<S::Token>,
    ) -> Result<(), PSError> {
        self.require_state("draw_line", &[EmitterState::PageOpen])?;
        let geometry = self.geometry("draw_line")?;

        let mut x = geometry.column_x(column);
        if geometry.direction == Direction::RightToLeft {
            x += geometry.column_width - geometry.to_pt(line.width);
        }
        let y = geometry.body_top() - geometry.to_pt(offset);

        shaper.render_line(&line.token, x, y, &mut self.body)?;
        Ok(())
    }

    /// Move on to `column`, ruling it off from the column filled before it
    #[allow(clippy::write_with_newline)]
    pub fn column_separator(&mut self, column: usize) -> Result<(), PSError> {
        self.require_state("column_separator", &[EmitterState::PageOpen])?;
        let geometry = self.geometry("column_separator")?;
        if !geometry.separator_lines || column == 0 {
            return Ok(());
        }

        let (rule, x) = (geometry.separator_x(column), geometry.column_x(column));
        write!(
            self.body,
            "papsdict begin {:.2} {:.2} nextcolumn end\n",
            rule.0, x.0
        )?;
        Ok(())
    }

    /// Draw a composed header or footer with its separating rule
    #[allow(clippy::write_with_newline)]
    pub fn draw_header<S: Shaper>(
        &mut self,
        shaper: &S,
        header: &HeaderLayout<S::Token>,
    ) -> Result<(), PSError> {
        self.require_state("draw_header", &[EmitterState::PageOpen])?;
        for cell in header.cells() {
            shaper.render_line(&cell.line.token, cell.x, cell.y, &mut self.body)?;
        }
        write!(
            self.body,
            "{:.2} {:.2} moveto {:.2} {:.2} lineto 0 setlinewidth stroke\n",
            header.rule_from.0, header.rule_y.0, header.rule_to.0, header.rule_y.0
        )?;
        Ok(())
    }

    /// Render one event from the line flow
    pub fn emit<S: Shaper>(
        &mut self,
        shaper: &S,
        event: &PlacementEvent<S::Token>,
    ) -> Result<(), PSError> {
        match event {
            PlacementEvent::BeginPage(page) => self.begin_page(*page),
            PlacementEvent::DrawLine {
                column,
                offset,
                line,
            } => self.draw_line(shaper, *column, *offset, line),
            PlacementEvent::ColumnSeparator(column) => self.column_separator(*column),
            PlacementEvent::EndPage => self.end_page(),
        }
    }

    /// Write the shaper's resources, the pages and the trailer, handing back
    /// the sink
    #[allow(clippy::write_with_newline)]
    pub fn finish<S: Shaper>(mut self, shaper: &S, page_count: usize) -> Result<W, PSError> {
        self.require_state("finish", &[EmitterState::PageClosed])?;
        if page_count != self.pages {
            return Err(PSError::PageCount {
                expected: page_count,
                emitted: self.pages,
            });
        }

        shaper.write_resources(&mut self.sink)?;
        write!(self.sink, "%%EndProlog\n")?;
        write!(self.sink, "%%BeginSetup\n")?;
        write!(self.sink, "papsdict begin\n")?;
        write!(self.sink, "pagewidth pageheight setpagesize\n")?;
        write!(self.sink, "do_duplex duplex\n")?;
        write!(self.sink, "do_tumble tumble\n")?;
        write!(self.sink, "end\n")?;
        write!(self.sink, "%%EndSetup\n")?;
        self.sink.write_all(&self.body)?;
        write!(self.sink, "%%Trailer\n")?;
        write!(self.sink, "%%Pages: {page_count}\n")?;
        write!(self.sink, "%%EOF\n")?;
        self.sink.flush()?;

        log::debug!(
            "wrote {} page(s), {} bytes of page content",
            page_count,
            self.body.len()
        );
        self.state = EmitterState::Finalized;
        Ok(self.sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::shaping::tests::GridShaper;
    use crate::units::Pt;

    fn geometry(config: &Config) -> PageGeometry {
        PageGeometry::compute(config).unwrap()
    }

    fn text(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn writes_a_complete_document() {
        let shaper = GridShaper { line_height: 10.0 };
        let g = geometry(&Config::default().columns(2).clone());
        let mut emitter = DocumentEmitter::new(Vec::new());
        emitter.begin("notes.txt", &g).unwrap();
        emitter.begin_page(1).unwrap();
        emitter
            .draw_line(&shaper, 0, 10.0, &ShapedLine::new(3.0, 10.0, "abc".to_string()))
            .unwrap();
        emitter.column_separator(1).unwrap();
        emitter.end_page().unwrap();
        let out = text(emitter.finish(&shaper, 1).unwrap());

        assert!(out.starts_with("%!PS-Adobe-3.0\n%%Title: notes.txt\n"));
        assert!(out.contains("%%Pages: (atend)\n"));
        assert!(out.contains("%%BoundingBox: 0 0 595 842\n"));
        assert!(out.contains("%%Orientation: Portrait\n"));
        assert!(out.contains("/setnumcolumns {\n"));
        assert!(out.contains("2 setnumcolumns\n"));
        assert!(out.contains("/firstx 36 def\n"));
        assert!(out.contains("firstcolumn\n    end\n} def\n"));
        assert!(out.contains(&format!(
            "papsdict begin {:.2} {:.2} nextcolumn end\n",
            g.separator_x(1).0,
            g.column_x(1).0
        )));
        assert!(out.contains("% grid shaper\n%%EndProlog\n"));
        assert!(out.contains("%%Page: 1 1\npaps_bop\n"));
        assert!(out.contains("36 795.89 (abc) line\n"));
        assert!(out.contains("paps_eop\nshowpage\n"));
        assert!(out.ends_with("%%Trailer\n%%Pages: 1\n%%EOF\n"));

        let body = out.find("%%Page: 1 1").unwrap();
        assert!(out.find("%%EndProlog").unwrap() < body);
    }

    #[test]
    fn landscape_keeps_an_upright_bounding_box() {
        let shaper = GridShaper { line_height: 10.0 };
        let g = geometry(&Config::default().landscape(true).clone());
        let mut emitter = DocumentEmitter::new(Vec::new());
        emitter.begin("wide", &g).unwrap();
        emitter.begin_page(1).unwrap();
        emitter.end_page().unwrap();
        let out = text(emitter.finish(&shaper, 1).unwrap());

        assert!(out.contains("%%BoundingBox: 0 0 595 842\n"));
        assert!(out.contains("%%Orientation: Landscape\n"));
        assert!(out.contains("/do_landscape true def\n"));
        assert!(out.contains("/pagewidth 841.89 def\n"));
    }

    #[test]
    fn right_to_left_mirrors_and_right_aligns() {
        let shaper = GridShaper { line_height: 10.0 };
        let config = Config::default()
            .columns(2)
            .direction(Direction::RightToLeft)
            .clone();
        let g = geometry(&config);
        let mut emitter = DocumentEmitter::new(Vec::new());
        emitter.begin("rtl", &g).unwrap();
        emitter.begin_page(1).unwrap();
        emitter
            .draw_line(&shaper, 0, 10.0, &ShapedLine::new(4.0, 10.0, "abcd".to_string()))
            .unwrap();
        emitter.end_page().unwrap();
        let out = text(emitter.finish(&shaper, 1).unwrap());

        let expected_x = g.text_right().0 - 4.0;
        let line = out.lines().find(|l| l.ends_with("(abcd) line")).unwrap();
        let x: f32 = line.split(' ').next().unwrap().parse().unwrap();
        assert!((x - expected_x).abs() < 1e-3);
    }

    #[test]
    fn separators_respect_the_configuration() {
        let g = geometry(&Config::default().columns(2).separator_lines(false).clone());
        let mut emitter = DocumentEmitter::new(Vec::new());
        emitter.begin("quiet", &g).unwrap();
        emitter.begin_page(1).unwrap();
        emitter.column_separator(1).unwrap();
        assert!(!String::from_utf8_lossy(&emitter.body).contains("nextcolumn"));
    }

    #[test]
    fn draws_headers_with_a_rule() {
        use crate::font::FontDescription;
        use crate::header::HeaderComposer;

        let shaper = GridShaper { line_height: 10.0 };
        let composer = HeaderComposer::new("t", FontDescription::new("Mono", Pt(8.0)));
        let g = geometry(&Config::default().header(true).clone())
            .with_header_height(composer.measure(&shaper))
            .unwrap();
        let header = composer.compose(&shaper, &g, 1, false);

        let mut emitter = DocumentEmitter::new(Vec::new());
        emitter.begin("t", &g).unwrap();
        emitter.begin_page(1).unwrap();
        emitter.draw_header(&shaper, &header).unwrap();
        let body = String::from_utf8_lossy(&emitter.body).to_string();
        assert!(body.contains("(Page 1) line"));
        assert!(body.contains(&format!(
            "36.00 {:.2} moveto {:.2} {:.2} lineto",
            g.header_rule_y().0,
            g.text_right().0,
            g.header_rule_y().0
        )));
    }

    #[test]
    fn rejects_out_of_order_calls() {
        let shaper = GridShaper { line_height: 10.0 };
        let g = geometry(&Config::default());

        let mut emitter = DocumentEmitter::new(Vec::new());
        let line = ShapedLine::new(1.0, 1.0, "x".to_string());
        assert!(matches!(
            emitter.draw_line(&shaper, 0, 1.0, &line),
            Err(PSError::EmitterState {
                operation: "draw_line",
                state: EmitterState::Uninitialized
            })
        ));
        assert!(emitter.begin_page(1).is_err());

        emitter.begin("x", &g).unwrap();
        assert!(emitter.begin("x", &g).is_err());
        assert!(emitter.end_page().is_err());

        emitter.begin_page(1).unwrap();
        assert!(emitter.begin_page(2).is_err());
        assert_eq!(emitter.state(), EmitterState::PageOpen);

        let mut unfinished = DocumentEmitter::new(Vec::new());
        unfinished.begin("x", &g).unwrap();
        unfinished.begin_page(1).unwrap();
        assert!(matches!(
            unfinished.finish(&shaper, 1),
            Err(PSError::EmitterState {
                operation: "finish",
                state: EmitterState::PageOpen
            })
        ));
    }

    #[test]
    fn refuses_a_trailer_with_the_wrong_page_count() {
        let shaper = GridShaper { line_height: 10.0 };
        let g = geometry(&Config::default());
        let mut emitter = DocumentEmitter::new(Vec::new());
        emitter.begin("x", &g).unwrap();
        for page in 1..=2 {
            emitter.begin_page(page).unwrap();
            emitter.end_page().unwrap();
        }
        assert_eq!(emitter.pages(), 2);
        assert!(matches!(
            emitter.finish(&shaper, 3),
            Err(PSError::PageCount {
                expected: 3,
                emitted: 2
            })
        ));
    }
}
