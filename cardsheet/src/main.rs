//! cardsheet: lay out sheets of identical cards with cut marks.
//!
//! Usage:
//!   cardsheet front.png back.png            one page per image
//!   cardsheet -b logo.png a.jpg b.jpg       fronts, then a back per front
//!   cardsheet -c sheet.json --strict        options from a config file

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use cardsheet::units::{CardPreset, Length, PaperSize};
use cardsheet::{logging, SheetConfig};

#[derive(Parser)]
#[command(
    name = "cardsheet",
    about = "Lay out copies of card images on printable sheets with cut marks",
    version
)]
struct Cli {
    /// Front images, one page each (JPEG or PNG)
    images: Vec<PathBuf>,

    /// Back image; give once to repeat it behind every front page
    #[arg(short, long = "back")]
    backs: Vec<PathBuf>,

    /// Output PDF path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON config file; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Paper size: letter, a4, legal or tabloid
    #[arg(long)]
    paper: Option<PaperSize>,

    /// Card preset: us-business, eu-business, bridge or poker
    #[arg(long)]
    card: Option<CardPreset>,

    /// Card width (e.g. 3.5in, 85mm, 252pt)
    #[arg(long)]
    card_width: Option<Length>,

    /// Card height
    #[arg(long)]
    card_height: Option<Length>,

    /// Rows per page
    #[arg(long)]
    rows: Option<u32>,

    /// Columns per page
    #[arg(long)]
    columns: Option<u32>,

    /// Margin between the bottom page edge and the grid
    #[arg(long)]
    top_margin: Option<Length>,

    /// Margin between the left page edge and the grid
    #[arg(long)]
    side_margin: Option<Length>,

    /// Center the grid on the page (overrides both margins)
    #[arg(long)]
    center: bool,

    /// Do not draw cut marks
    #[arg(long)]
    no_cut_lines: bool,

    /// Stroke width of the cut marks
    #[arg(long)]
    cut_line_width: Option<Length>,

    /// Write uncompressed streams
    #[arg(long)]
    no_compress: bool,

    /// Fail instead of warning when the grid runs off the page
    #[arg(long)]
    strict: bool,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

impl Cli {
    /// Layer the flags over the config file (or the defaults).
    fn into_config(self) -> anyhow::Result<SheetConfig> {
        let mut config = match &self.config {
            Some(path) => SheetConfig::from_file(path)?,
            None => SheetConfig::default(),
        };

        if !self.images.is_empty() {
            config.image_paths = self.images;
        }
        if !self.backs.is_empty() {
            config.back_image_paths = self.backs;
        }
        if let Some(output) = self.output {
            config.output_pdf_path = output;
        }
        if let Some(paper) = self.paper {
            config.set_paper(paper);
        }
        if let Some(card) = self.card {
            config.set_card(card);
        }
        if let Some(w) = self.card_width {
            config.image_width = w.points();
        }
        if let Some(h) = self.card_height {
            config.image_height = h.points();
        }
        if let Some(rows) = self.rows {
            config.nb_rows = rows;
        }
        if let Some(columns) = self.columns {
            config.nb_columns = columns;
        }
        if let Some(top) = self.top_margin {
            config.top_margin = top.points();
        }
        if let Some(side) = self.side_margin {
            config.side_margin = side.points();
        }
        if self.center {
            config.center_margins();
        }
        if self.no_cut_lines {
            config.show_cut_lines = false;
        }
        if let Some(width) = self.cut_line_width {
            config.cut_line_width = width.points();
        }
        if self.no_compress {
            config.compress = false;
        }
        if self.strict {
            config.strict_bounds = true;
        }
        if self.verbose {
            config.logging.level = "debug".to_string();
        }
        if self.log_json {
            config.logging.json = true;
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let dump = cli.dump_config;
    let config = cli.into_config()?;

    logging::init_logging(&config.logging);

    if dump {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    cardsheet::generate(&config).with_context(|| {
        format!(
            "failed to generate {}",
            config.output_pdf_path.display()
        )
    })?;
    Ok(())
}
