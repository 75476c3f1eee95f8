//! Grid placement, cut marks and page sequencing.
//!
//! All coordinates are PDF points with the origin at the bottom-left
//! corner of the page. The grid is anchored at `(side_margin, top_margin)`
//! and grows right by one cell width per column and up by one cell
//! height per row.

use std::fmt;
use std::path::{Path, PathBuf};

use sheet_pdf::Rect;

/// Slack for floating-point noise when comparing the grid to the page.
const FIT_EPSILON: f64 = 1e-6;

/// Fixed geometry shared by every page of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetGeometry {
    pub page_width: f64,
    pub page_height: f64,
    pub top_margin: f64,
    pub side_margin: f64,
    pub cell_width: f64,
    pub cell_height: f64,
    pub rows: u32,
    pub columns: u32,
}

/// One grid position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub row: u32,
    pub column: u32,
    pub rect: Rect,
}

/// The page edge a cut mark starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkEdge {
    Left,
    Right,
    Bottom,
    Top,
}

/// A short straight segment printed in the margin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutMark {
    pub edge: MarkEdge,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl CutMark {
    pub fn is_horizontal(&self) -> bool {
        matches!(self.edge, MarkEdge::Left | MarkEdge::Right)
    }
}

/// How far the grid reaches past the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overflow {
    pub grid_left: f64,
    pub grid_bottom: f64,
    pub grid_right: f64,
    pub grid_top: f64,
    pub page_width: f64,
    pub page_height: f64,
}

impl fmt::Display for Overflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "grid spans ({:.2}, {:.2}) to ({:.2}, {:.2}) pt on a {:.2} x {:.2} pt page",
            self.grid_left,
            self.grid_bottom,
            self.grid_right,
            self.grid_top,
            self.page_width,
            self.page_height
        )
    }
}

impl SheetGeometry {
    /// Bottom-left corner of the cell at `(row, column)`.
    pub fn cell_origin(&self, row: u32, column: u32) -> (f64, f64) {
        (
            self.side_margin + column as f64 * self.cell_width,
            self.top_margin + row as f64 * self.cell_height,
        )
    }

    pub fn cells_per_page(&self) -> usize {
        self.rows as usize * self.columns as usize
    }

    /// Every cell on a page, row by row from the bottom.
    pub fn cells(&self) -> Vec<Cell> {
        let mut cells = Vec::with_capacity(self.cells_per_page());
        for row in 0..self.rows {
            for column in 0..self.columns {
                let (x, y) = self.cell_origin(row, column);
                cells.push(Cell {
                    row,
                    column,
                    rect: Rect::new(x, y, self.cell_width, self.cell_height),
                });
            }
        }
        cells
    }

    /// Cut marks for every grid line: for each of the `rows + 1` row
    /// boundaries a left/right pair, then for each of the `columns + 1`
    /// column boundaries a bottom/top pair.
    ///
    /// Horizontal marks are half the side margin long, vertical marks
    /// half the top margin.
    pub fn cut_marks(&self) -> Vec<CutMark> {
        let h_len = self.side_margin / 2.0;
        let v_len = self.top_margin / 2.0;
        let mut marks = Vec::with_capacity(2 * (self.rows + self.columns + 2) as usize);

        for row in 0..=self.rows {
            let y = self.top_margin + row as f64 * self.cell_height;
            marks.push(CutMark {
                edge: MarkEdge::Left,
                x1: 0.0,
                y1: y,
                x2: h_len,
                y2: y,
            });
            marks.push(CutMark {
                edge: MarkEdge::Right,
                x1: self.page_width - h_len,
                y1: y,
                x2: self.page_width,
                y2: y,
            });
        }

        for column in 0..=self.columns {
            let x = self.side_margin + column as f64 * self.cell_width;
            marks.push(CutMark {
                edge: MarkEdge::Bottom,
                x1: x,
                y1: 0.0,
                x2: x,
                y2: v_len,
            });
            marks.push(CutMark {
                edge: MarkEdge::Top,
                x1: x,
                y1: self.page_height - v_len,
                x2: x,
                y2: self.page_height,
            });
        }

        marks
    }

    /// Top-right corner of the grid.
    pub fn grid_extent(&self) -> (f64, f64) {
        self.cell_origin(self.rows, self.columns)
    }

    /// `Some` when the grid runs past any page edge.
    pub fn overflow(&self) -> Option<Overflow> {
        let (grid_right, grid_top) = self.grid_extent();
        let outside = self.side_margin < -FIT_EPSILON
            || self.top_margin < -FIT_EPSILON
            || grid_right > self.page_width + FIT_EPSILON
            || grid_top > self.page_height + FIT_EPSILON;
        if outside {
            Some(Overflow {
                grid_left: self.side_margin,
                grid_bottom: self.top_margin,
                grid_right,
                grid_top,
                page_width: self.page_width,
                page_height: self.page_height,
            })
        } else {
            None
        }
    }
}

/// Which face of the cards a page carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Front,
    Back,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Front => f.write_str("front"),
            Side::Back => f.write_str("back"),
        }
    }
}

/// One output page: which image fills it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpec<'a> {
    pub side: Side,
    /// 1-based position among pages of the same side.
    pub number: usize,
    pub image: &'a Path,
}

/// Order the output pages: every front image in turn, then the backs.
///
/// A single back image is repeated once per front so each front page
/// has a matching back page; several back images get one page each.
pub fn plan_pages<'a>(fronts: &'a [PathBuf], backs: &'a [PathBuf]) -> Vec<PageSpec<'a>> {
    let mut pages: Vec<PageSpec<'a>> = fronts
        .iter()
        .enumerate()
        .map(|(i, path)| PageSpec {
            side: Side::Front,
            number: i + 1,
            image: path.as_path(),
        })
        .collect();

    match backs {
        [] => {}
        [single] => pages.extend((0..fronts.len()).map(|i| PageSpec {
            side: Side::Back,
            number: i + 1,
            image: single.as_path(),
        })),
        many => pages.extend(many.iter().enumerate().map(|(i, path)| PageSpec {
            side: Side::Back,
            number: i + 1,
            image: path.as_path(),
        })),
    }

    pages
}
