//! Minimal incremental PDF writer for image sheets: embedded JPEG/PNG
//! images, stroked paths, optional Flate compression.

pub mod document;
pub mod error;
pub mod graphics;
pub mod images;
pub mod objects;
pub mod writer;

pub use document::PdfDocument;
pub use error::{PdfError, PdfResult};
pub use graphics::{Color, Rect};
pub use images::{ImageError, ImageFit, ImageId};
