use crate::images::ImageError;

/// Errors surfaced by `PdfDocument`.
#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] ImageError),
}

pub type PdfResult<T> = Result<T, PdfError>;
