use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use textps::{Config, Direction, FontDescription, Margins, PSError, PaperSize, Pt};

/// Convert a plain text file to multi-column PostScript
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Text file to print; reads standard input when omitted
    input: Option<PathBuf>,

    /// Where to write the PostScript; standard output when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Title for the header and document comments (default: the input file name)
    #[arg(long)]
    title: Option<String>,

    /// Landscape output
    #[arg(long)]
    landscape: bool,

    /// Number of columns per page
    #[arg(long, default_value_t = 1)]
    columns: usize,

    /// Space between columns, in points
    #[arg(long, default_value_t = 40.0)]
    gutter_width: f32,

    /// Body font size, in points
    #[arg(long, default_value_t = 12.0)]
    font_scale: f32,

    /// Body font family (the built-in shaper always prints Courier)
    #[arg(long, default_value = "Monospace")]
    family: String,

    /// Lay out columns right to left
    #[arg(long)]
    rtl: bool,

    /// Justify paragraph lines to the column width
    #[arg(long)]
    justify: bool,

    /// Paper size: a4, letter or legal
    #[arg(long, default_value = "a4")]
    paper: PaperSize,

    #[arg(long, default_value_t = 36.0)]
    top_margin: f32,

    #[arg(long, default_value_t = 36.0)]
    bottom_margin: f32,

    #[arg(long, default_value_t = 36.0)]
    left_margin: f32,

    #[arg(long, default_value_t = 36.0)]
    right_margin: f32,

    /// Draw a header on every page
    #[arg(long)]
    header: bool,

    /// Draw a footer on every page
    #[arg(long)]
    footer: bool,

    /// Font for headers and footers
    #[arg(long, default_value = "Monospace Bold 12")]
    header_font: FontDescription,

    /// Don't rule off columns from each other
    #[arg(long)]
    no_separators: bool,

    /// Request double-sided printing (default: on)
    #[arg(long, overrides_with = "no_duplex")]
    duplex: bool,

    #[arg(long)]
    no_duplex: bool,

    /// Flip the back side along the short edge (default: on)
    #[arg(long, overrides_with = "no_tumble")]
    tumble: bool,

    #[arg(long)]
    no_tumble: bool,
}

impl Args {
    fn config(&self) -> Config {
        let title = self.title.clone().unwrap_or_else(|| match &self.input {
            Some(path) => path.display().to_string(),
            None => "stdin".to_string(),
        });

        let mut config = Config::default();
        config
            .title(title)
            .paper(self.paper)
            .margins(Margins::trbl(
                Pt(self.top_margin),
                Pt(self.right_margin),
                Pt(self.bottom_margin),
                Pt(self.left_margin),
            ))
            .columns(self.columns)
            .gutter_width(Pt(self.gutter_width))
            .landscape(self.landscape)
            .direction(if self.rtl {
                Direction::RightToLeft
            } else {
                Direction::LeftToRight
            })
            .justify(self.justify)
            .header(self.header)
            .footer(self.footer)
            .separator_lines(!self.no_separators)
            .body_font(FontDescription::new(&self.family, Pt(self.font_scale)))
            .header_font(self.header_font.clone());
        config.duplex = flag(self.duplex, self.no_duplex);
        config.tumble = flag(self.tumble, self.no_tumble);
        config
    }
}

fn flag(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

fn run(args: &Args) -> Result<usize, PSError> {
    let mut input = Vec::new();
    match &args.input {
        Some(path) => File::open(path)?.read_to_end(&mut input)?,
        None => io::stdin().lock().read_to_end(&mut input)?,
    };

    let config = args.config();
    match &args.output {
        Some(path) => {
            let mut out = BufWriter::new(File::create(path)?);
            let pages = textps::render_text(&config, &input, &mut out)?;
            out.flush()?;
            Ok(pages)
        }
        None => {
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            let pages = textps::render_text(&config, &input, &mut out)?;
            out.flush()?;
            Ok(pages)
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(pages) => {
            log::info!("wrote {pages} page(s)");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("textps: {e}");
            ExitCode::FAILURE
        }
    }
}
