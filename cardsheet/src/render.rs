//! Drawing planned pages into a PDF.

use std::collections::HashMap;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use sheet_pdf::{Color, ImageFit, ImageId, PdfDocument};
use tracing::{debug, info, warn};

use crate::config::SheetConfig;
use crate::error::{SheetError, SheetResult};
use crate::layout::{plan_pages, PageSpec, SheetGeometry};

const CREATOR: &str = concat!("cardsheet ", env!("CARGO_PKG_VERSION"));

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSummary {
    pub pages: usize,
    pub placements: usize,
    pub cut_marks: usize,
    /// Distinct image files embedded.
    pub images: usize,
}

/// A validated run: geometry plus the ordered page list.
#[derive(Debug)]
pub struct SheetPlan<'a> {
    pub geometry: SheetGeometry,
    pub pages: Vec<PageSpec<'a>>,
}

/// Validate `config`, check the grid against the page and order the
/// pages. Nothing is read or written yet.
pub fn plan(config: &SheetConfig) -> SheetResult<SheetPlan<'_>> {
    config.validate()?;
    let geometry = config.geometry();

    if let Some(overflow) = geometry.overflow() {
        if config.strict_bounds {
            return Err(SheetError::GeometryOverflow(overflow));
        }
        warn!(%overflow, "grid does not fit the page; drawing anyway");
    }

    let pages = plan_pages(&config.image_paths, &config.back_image_paths);
    debug!(
        pages = pages.len(),
        cells_per_page = geometry.cells_per_page(),
        "planned sheet"
    );
    Ok(SheetPlan { geometry, pages })
}

/// Render every page of `config` into `writer` and return it once the
/// document is complete.
pub fn render_sheets<W: Write>(config: &SheetConfig, writer: W) -> SheetResult<(W, RenderSummary)> {
    let plan = plan(config)?;
    render_plan(config, &plan, writer)
}

/// Render an already validated plan.
pub fn render_plan<W: Write>(
    config: &SheetConfig,
    plan: &SheetPlan<'_>,
    writer: W,
) -> SheetResult<(W, RenderSummary)> {
    let mut doc = PdfDocument::new(writer)?;
    doc.set_compression(config.compress);
    doc.set_info("Creator", CREATOR);

    let cells = plan.geometry.cells();
    let marks = if config.show_cut_lines {
        plan.geometry.cut_marks()
    } else {
        Vec::new()
    };

    let mut loaded: HashMap<&Path, ImageId> = HashMap::new();
    let mut summary = RenderSummary {
        pages: 0,
        placements: 0,
        cut_marks: 0,
        images: 0,
    };

    for page in &plan.pages {
        let image = match loaded.get(page.image) {
            Some(id) => *id,
            None => {
                let id = doc
                    .load_image_file(page.image)
                    .map_err(|source| SheetError::Image {
                        path: page.image.to_path_buf(),
                        source,
                    })?;
                let (w, h) = doc.image_size(&id);
                debug!(path = %page.image.display(), width = w, height = h, "embedded image");
                loaded.insert(page.image, id);
                id
            }
        };

        doc.begin_page(plan.geometry.page_width, plan.geometry.page_height)?;
        for cell in &cells {
            doc.place_image(&image, &cell.rect, ImageFit::Fit);
        }

        if !marks.is_empty() {
            doc.save_state()
                .set_stroke_color(Color::BLACK)
                .set_line_width(config.cut_line_width);
            for m in &marks {
                doc.line(m.x1, m.y1, m.x2, m.y2);
            }
            doc.restore_state();
        }
        doc.end_page()?;

        debug!(
            side = %page.side,
            number = page.number,
            image = %page.image.display(),
            "finished page"
        );
        summary.pages += 1;
        summary.placements += cells.len();
        summary.cut_marks += marks.len();
    }

    summary.images = loaded.len();
    let writer = doc.end_document()?;
    Ok((writer, summary))
}

/// Render to `config.output_pdf_path`.
///
/// The PDF is built in a temporary file beside the destination and
/// renamed into place only after the last page is written, so a failed
/// run never leaves a truncated file behind.
pub fn generate(config: &SheetConfig) -> SheetResult<RenderSummary> {
    let plan = plan(config)?;
    let output = &config.output_pdf_path;
    let output_err = |source| SheetError::Output {
        path: output.clone(),
        source,
    };

    let dir = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let mut builder = tempfile::Builder::new();
    builder.prefix(".cardsheet-").suffix(".pdf.tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // Same requested mode as File::create; the umask still applies.
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    let tmp = builder.tempfile_in(&dir).map_err(output_err)?;

    let (writer, summary) = render_plan(config, &plan, BufWriter::new(tmp))?;
    let tmp = writer.into_inner().map_err(|e| output_err(e.into_error()))?;
    tmp.persist(output).map_err(|e| output_err(e.error))?;

    info!(
        output = %output.display(),
        pages = summary.pages,
        placements = summary.placements,
        "wrote sheet"
    );
    Ok(summary)
}
