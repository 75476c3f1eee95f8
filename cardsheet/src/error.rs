//! Error types for sheet generation.

use std::path::PathBuf;

use sheet_pdf::PdfError;

use crate::layout::Overflow;

/// Everything that can stop a sheet run.
#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid length {input:?}: {reason}")]
    InvalidLength { input: String, reason: String },

    #[error("Failed to load image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: PdfError,
    },

    #[error("Grid does not fit the page: {0}")]
    GeometryOverflow(Overflow),

    #[error("Cannot write output {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Pdf(#[from] PdfError),
}

pub type SheetResult<T> = Result<T, SheetError>;

impl SheetError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn invalid_length(input: &str, reason: impl Into<String>) -> Self {
        Self::InvalidLength {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
