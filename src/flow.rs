//! Distributes shaped lines over columns and pages.
//!
//! The flow is a pure function of the geometry and the ordered lines: the
//! only state is an explicit [`FlowCursor`], so independent layouts never
//! interfere with each other. [`LineFlow`] wraps the cursor in an iterator
//! producing [`PlacementEvent`]s lazily, one line at a time.
//!
//! A line moves to the next column when the column already holds a line and
//! adding this one would reach or pass the column height, or when the
//! previous line ended its paragraph on a form feed. Moving past the last
//! column starts a new page.
//!
//! ```
//! use textps::{flow_lines, Config, PageGeometry, PlacementEvent, ShapedLine};
//!
//! let geometry = PageGeometry::compute(&Config::default()).unwrap();
//! let lines = vec![ShapedLine::new(100.0, 14.0, "hello"), ShapedLine::new(80.0, 14.0, "world")];
//! let (events, pages) = flow_lines(&geometry, lines);
//! assert_eq!(pages, 1);
//! assert!(matches!(events[2], PlacementEvent::DrawLine { column: 0, offset, .. } if offset == 28.0));
//! ```

use crate::geometry::PageGeometry;
use crate::shaping::ShapedLine;
use std::collections::VecDeque;

/// Where and how something lands on the page. Offsets are in shaper units,
/// measured down from the top of the column to the bottom of the line.
#[derive(Debug, Clone, PartialEq)]
pub enum PlacementEvent<T> {
    /// A page starts; pages are numbered from 1
    BeginPage(usize),
    DrawLine {
        column: usize,
        offset: f32,
        line: ShapedLine<T>,
    },
    /// Flow moved into `column` (never the first column of a page)
    ColumnSeparator(usize),
    EndPage,
}

/// Position of the flow within the document
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowCursor {
    pub page: usize,
    pub column: usize,
    /// Height of everything already placed in the current column
    pub offset: f32,
    pub lines_in_column: usize,
    /// The previous line ended on a form feed
    pub pending_break: bool,
}

impl Default for FlowCursor {
    fn default() -> Self {
        FlowCursor {
            page: 1,
            column: 0,
            offset: 0.0,
            lines_in_column: 0,
            pending_break: false,
        }
    }
}

impl FlowCursor {
    pub fn new() -> FlowCursor {
        FlowCursor::default()
    }

    fn must_break<T>(&self, geometry: &PageGeometry, line: &ShapedLine<T>) -> bool {
        if self.pending_break {
            return true;
        }
        // an empty column takes any line, however tall
        self.lines_in_column > 0 && self.offset + line.height >= geometry.column_height_units()
    }

    /// Place one line, queueing the events it causes
    pub fn step<T>(
        &mut self,
        geometry: &PageGeometry,
        line: ShapedLine<T>,
        events: &mut VecDeque<PlacementEvent<T>>,
    ) {
        if self.must_break(geometry, &line) {
            self.column += 1;
            self.offset = 0.0;
            self.lines_in_column = 0;
            if self.column == geometry.num_columns {
                self.column = 0;
                events.push_back(PlacementEvent::EndPage);
                self.page += 1;
                log::debug!("starting page {}", self.page);
                events.push_back(PlacementEvent::BeginPage(self.page));
            } else {
                log::trace!("moving to column {} on page {}", self.column, self.page);
                if geometry.separator_lines {
                    events.push_back(PlacementEvent::ColumnSeparator(self.column));
                }
            }
        }

        self.offset += line.height;
        self.lines_in_column += 1;
        self.pending_break = line.formfeed;
        events.push_back(PlacementEvent::DrawLine {
            column: self.column,
            offset: self.offset,
            line,
        });
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    NotStarted,
    Flowing,
    Finished,
}

/// Lazily lays out a line sequence, yielding placement events in order
pub struct LineFlow<'g, T, I> {
    geometry: &'g PageGeometry,
    lines: I,
    cursor: FlowCursor,
    pending: VecDeque<PlacementEvent<T>>,
    stage: Stage,
}

impl<'g, T, I> LineFlow<'g, T, I>
where
    I: Iterator<Item = ShapedLine<T>>,
{
    pub fn new<L>(geometry: &'g PageGeometry, lines: L) -> Self
    where
        L: IntoIterator<IntoIter = I>,
    {
        LineFlow {
            geometry,
            lines: lines.into_iter(),
            cursor: FlowCursor::new(),
            pending: VecDeque::with_capacity(4),
            stage: Stage::NotStarted,
        }
    }

    /// The page currently being laid out. Once the iterator is exhausted this
    /// is the total number of pages.
    pub fn page_count(&self) -> usize {
        self.cursor.page
    }
}

impl<T, I> Iterator for LineFlow<'_, T, I>
where
    I: Iterator<Item = ShapedLine<T>>,
{
    type Item = PlacementEvent<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(event);
            }
            match self.stage {
                Stage::NotStarted => {
                    self.stage = Stage::Flowing;
                    self.pending
                        .push_back(PlacementEvent::BeginPage(self.cursor.page));
                }
                Stage::Flowing => match self.lines.next() {
                    Some(line) => self.cursor.step(self.geometry, line, &mut self.pending),
                    None => {
                        self.stage = Stage::Finished;
                        self.pending.push_back(PlacementEvent::EndPage);
                    }
                },
                Stage::Finished => return None,
            }
        }
    }
}

/// Lay out every line at once, returning the events and the page count
pub fn flow_lines<T, L>(geometry: &PageGeometry, lines: L) -> (Vec<PlacementEvent<T>>, usize)
where
    L: IntoIterator<Item = ShapedLine<T>>,
{
    let mut flow = LineFlow::new(geometry, lines);
    let events: Vec<PlacementEvent<T>> = flow.by_ref().collect();
    (events, flow.page_count())
}
