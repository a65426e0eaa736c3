//! Text extraction for uploaded résumés.
//!
//! Uploads are staged to a temporary file inside the upload directory, read by
//! the format-specific extractor and removed when the staging guard drops,
//! whether extraction succeeded or not.

pub mod docx;
pub mod pdf;

use std::io::Write;
use std::path::Path;

use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("failed to stage upload: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF parse error: {0}")]
    Pdf(String),

    #[error("DOCX parse error: {0}")]
    Docx(String),
}

/// Document formats accepted by the screener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Resolves the kind from a filename's extension, ignoring case.
    /// Returns `None` for any other extension, or none at all.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = Path::new(filename).extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("pdf") {
            Some(DocumentKind::Pdf)
        } else if ext.eq_ignore_ascii_case("docx") {
            Some(DocumentKind::Docx)
        } else {
            None
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            DocumentKind::Pdf => ".pdf",
            DocumentKind::Docx => ".docx",
        }
    }
}

/// An uploaded résumé: its original filename and raw bytes.
#[derive(Debug, Clone)]
pub struct Document {
    pub filename: String,
    pub bytes: Bytes,
}

impl Document {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }

    pub fn kind(&self) -> Option<DocumentKind> {
        DocumentKind::from_filename(&self.filename)
    }
}

/// Extracts the document's text, lowercased.
///
/// Blocking: call from `spawn_blocking` when on the async runtime.
pub fn extract_text(
    document: &Document,
    kind: DocumentKind,
    upload_dir: &Path,
) -> Result<String, ExtractionError> {
    let mut staged = tempfile::Builder::new()
        .prefix("resume-")
        .suffix(kind.extension())
        .tempfile_in(upload_dir)?;
    staged.write_all(&document.bytes)?;
    staged.flush()?;

    let text = match kind {
        DocumentKind::Pdf => pdf::extract_pdf_text(staged.path())?,
        DocumentKind::Docx => docx::extract_docx_text(staged.path())?,
    };
    debug!(
        filename = %document.filename,
        chars = text.len(),
        "Extracted résumé text"
    );

    Ok(text.to_lowercase())
}
