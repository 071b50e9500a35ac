//! Paginate plain text into multi-column PostScript.
//!
//! The pipeline runs in one pass:
//!
//! 1. [`PageGeometry`] derives column sizes from a [`Config`].
//! 2. A [`Shaper`] breaks paragraphs into measured [`ShapedLine`]s.
//! 3. [`LineFlow`] distributes the lines over columns and pages, producing
//!    [`PlacementEvent`]s.
//! 4. [`DocumentEmitter`] renders the events, with headers from a
//!    [`HeaderComposer`], into a PostScript document.
//!
//! [`render_text`] wires all of this up with the built-in [`MonospaceShaper`].

mod config;
pub use config::*;

mod document;
pub use document::*;

mod emitter;
pub use emitter::*;

mod error;
pub use error::*;

mod flow;
pub use flow::*;

mod font;
pub use font::*;

mod geometry;
pub use geometry::*;

mod header;
pub use header::*;

mod margins;
pub use margins::*;

mod monospace;
pub use monospace::*;

/// Supported paper sizes
pub mod pagesize;
pub use pagesize::PaperSize;

mod shaping;
pub use shaping::*;

mod units;
pub use units::*;
