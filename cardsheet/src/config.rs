//! Sheet configuration.
//!
//! The defaults reproduce the classic business-card sheet: US Letter,
//! 0.5 in top and 0.75 in side margins, 3.5 × 2 in cards, 5 rows by
//! 2 columns. A JSON file may override any subset of the fields.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{SheetError, SheetResult};
use crate::layout::SheetGeometry;
use crate::units::{centered_margins, inch, CardPreset, PaperSize};

pub const DEFAULT_OUTPUT: &str = "output.pdf";
pub const DEFAULT_ROWS: u32 = 5;
pub const DEFAULT_COLUMNS: u32 = 2;
/// Stroke width of cut marks, in points.
pub const DEFAULT_CUT_LINE_WIDTH: f64 = 1.0;

/// Every option of a sheet run. Lengths are in points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    /// Front images, one page each, in order.
    pub image_paths: Vec<PathBuf>,

    /// Back images. A single entry is repeated behind every front page.
    pub back_image_paths: Vec<PathBuf>,

    pub output_pdf_path: PathBuf,

    pub page_width: f64,
    pub page_height: f64,

    /// Distance from the bottom page edge to the first row.
    pub top_margin: f64,

    /// Distance from the left page edge to the first column.
    pub side_margin: f64,

    pub image_width: f64,
    pub image_height: f64,

    pub nb_rows: u32,
    pub nb_columns: u32,

    pub show_cut_lines: bool,
    pub cut_line_width: f64,

    /// Flate-compress page content and decoded PNG samples.
    pub compress: bool,

    /// Refuse to render when the grid runs off the page.
    pub strict_bounds: bool,

    pub logging: LoggingConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g. "info", "debug", "cardsheet=debug,warn").
    pub level: String,

    /// Emit structured JSON logs.
    pub json: bool,
}

impl Default for SheetConfig {
    fn default() -> Self {
        let (page_width, page_height) = PaperSize::Letter.dimensions();
        let (image_width, image_height) = CardPreset::UsBusiness.dimensions();
        Self {
            image_paths: vec![PathBuf::from("front.png"), PathBuf::from("back.png")],
            back_image_paths: Vec::new(),
            output_pdf_path: PathBuf::from(DEFAULT_OUTPUT),
            page_width,
            page_height,
            top_margin: inch(0.5),
            side_margin: inch(0.75),
            image_width,
            image_height,
            nb_rows: DEFAULT_ROWS,
            nb_columns: DEFAULT_COLUMNS,
            show_cut_lines: true,
            cut_line_width: DEFAULT_CUT_LINE_WIDTH,
            compress: true,
            strict_bounds: false,
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl SheetConfig {
    /// Load a JSON config file. Missing fields keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> SheetResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SheetError::config(format!("cannot read config {}: {}", path.display(), e))
        })?;
        let config = serde_json::from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Write this config as pretty JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> SheetResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn to_json(&self) -> SheetResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn set_paper(&mut self, paper: PaperSize) {
        (self.page_width, self.page_height) = paper.dimensions();
    }

    pub fn set_card(&mut self, card: CardPreset) {
        (self.image_width, self.image_height) = card.dimensions();
    }

    /// Replace both margins with the ones that center the grid.
    pub fn center_margins(&mut self) {
        (self.top_margin, self.side_margin) = centered_margins(
            (self.page_width, self.page_height),
            (self.image_width, self.image_height),
            self.nb_rows,
            self.nb_columns,
        );
    }

    pub fn geometry(&self) -> SheetGeometry {
        SheetGeometry {
            page_width: self.page_width,
            page_height: self.page_height,
            top_margin: self.top_margin,
            side_margin: self.side_margin,
            cell_width: self.image_width,
            cell_height: self.image_height,
            rows: self.nb_rows,
            columns: self.nb_columns,
        }
    }

    /// Reject values no layout can be drawn from. Grid overflow is not
    /// checked here; see `SheetGeometry::overflow`.
    pub fn validate(&self) -> SheetResult<()> {
        if self.image_paths.is_empty() {
            return Err(SheetError::config("no images given"));
        }

        let positive = [
            ("page_width", self.page_width),
            ("page_height", self.page_height),
            ("image_width", self.image_width),
            ("image_height", self.image_height),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(SheetError::config(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }

        if self.show_cut_lines && !(self.cut_line_width.is_finite() && self.cut_line_width > 0.0) {
            return Err(SheetError::config(format!(
                "cut_line_width must be a positive number, got {}",
                self.cut_line_width
            )));
        }

        // Negative margins are legal here; they surface as grid overflow.
        for (name, value) in [("top_margin", self.top_margin), ("side_margin", self.side_margin)] {
            if !value.is_finite() {
                return Err(SheetError::config(format!(
                    "{} must be a finite number, got {}",
                    name, value
                )));
            }
        }

        if self.output_pdf_path.as_os_str().is_empty() {
            return Err(SheetError::config("output path is empty"));
        }
        Ok(())
    }
}
