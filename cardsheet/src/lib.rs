//! Print-ready sheets of identical cards.
//!
//! Each input image fills one page with a `rows × columns` grid of
//! copies, and short cut marks in the margins line up with every grid
//! boundary:
//! - [`layout`]: cell placement, cut marks, page order
//! - [`render`]: drawing pages through `sheet-pdf`
//! - [`config`]: the option set and its JSON form
//! - [`units`]: lengths, paper sizes and card presets

pub mod config;
pub mod error;
pub mod layout;
pub mod logging;
pub mod render;
pub mod units;

pub use config::{LoggingConfig, SheetConfig};
pub use error::{SheetError, SheetResult};
pub use layout::{plan_pages, Cell, CutMark, MarkEdge, PageSpec, SheetGeometry, Side};
pub use render::{generate, render_sheets, RenderSummary};
