use crate::config::Config;
use crate::emitter::DocumentEmitter;
use crate::flow::{LineFlow, PlacementEvent};
use crate::geometry::PageGeometry;
use crate::header::HeaderComposer;
use crate::monospace::MonospaceShaper;
use crate::shaping::{decode_input, shape_paragraphs, split_paragraphs, Shaper};
use crate::PSError;
use std::io::Write;
use std::time::Instant;

/// Lay out `text` with `shaper` and write it to `out` as a PostScript
/// document, returning the number of pages written.
///
/// Nothing is written if the configuration is invalid.
pub fn render_document<S, W>(
    config: &Config,
    shaper: &S,
    headers: &HeaderComposer,
    text: &str,
    out: W,
) -> Result<usize, PSError>
where
    S: Shaper,
    W: Write,
{
    let t0 = Instant::now();

    let mut config = config.clone();
    if config.units_per_pt != shaper.units_per_pt() {
        log::debug!(
            "using the shaper's {} units per point instead of {}",
            shaper.units_per_pt(),
            config.units_per_pt
        );
        config.units_per_pt = shaper.units_per_pt();
    }

    let mut geometry = PageGeometry::compute(&config)?;
    if geometry.draw_header || geometry.draw_footer {
        let height = headers.measure(shaper);
        if geometry.draw_header {
            geometry = geometry.with_header_height(height)?;
        }
        if geometry.draw_footer {
            geometry = geometry.with_footer_height(height)?;
        }
    }

    let paragraphs = split_paragraphs(text);
    let lines = shape_paragraphs(shaper, &paragraphs, geometry.paint_width_units());
    let line_count = lines.len();
    let t_shape = t0.elapsed();

    let mut emitter = DocumentEmitter::new(out);
    emitter.begin(headers.title(), &geometry)?;

    let mut flow = LineFlow::new(&geometry, lines);
    for event in flow.by_ref() {
        emitter.emit(shaper, &event)?;
        if let PlacementEvent::BeginPage(page) = event {
            if geometry.draw_header {
                let header = headers.compose(shaper, &geometry, page, false);
                emitter.draw_header(shaper, &header)?;
            }
            if geometry.draw_footer {
                let footer = headers.compose(shaper, &geometry, page, true);
                emitter.draw_header(shaper, &footer)?;
            }
        }
    }
    let pages = flow.page_count();
    emitter.finish(shaper, pages)?;

    log::info!(
        "Laid out {} paragraph(s), {} line(s) on {} page(s): shape={:.1}ms, total={:.1}ms",
        paragraphs.len(),
        line_count,
        pages,
        t_shape.as_secs_f64() * 1000.0,
        t0.elapsed().as_secs_f64() * 1000.0,
    );

    Ok(pages)
}

/// Convert raw text to PostScript using the built-in Courier shaper, with
/// headers stamped with the current time.
///
/// ```
/// use textps::{render_text, Config};
///
/// let config = Config::default().title("hello.txt").header(true).clone();
/// let mut out = Vec::new();
/// let pages = render_text(&config, b"Hello, world!\n", &mut out).unwrap();
/// assert_eq!(pages, 1);
/// assert!(String::from_utf8(out).unwrap().contains("(Hello, world!) show"));
/// ```
pub fn render_text<W: Write>(config: &Config, input: &[u8], out: W) -> Result<usize, PSError> {
    let shaper = MonospaceShaper::new(config);
    let headers = HeaderComposer::new(&config.title, config.header_font.clone());
    render_document(config, &shaper, &headers, &decode_input(input), out)
}
