use std::panic;
use std::path::Path;

use crate::extraction::ExtractionError;

/// Concatenates the text of every page in document order.
/// Pages without extractable text contribute an empty string.
///
/// pdf-extract panics on some malformed inputs, so the call is wrapped in
/// `catch_unwind` and a panic is reported as a parse error.
pub fn extract_pdf_text(path: &Path) -> Result<String, ExtractionError> {
    let pages = panic::catch_unwind(|| pdf_extract::extract_text_by_pages(path))
        .map_err(|_| ExtractionError::Pdf("parser aborted on malformed input".to_string()))?
        .map_err(|e| ExtractionError::Pdf(format!("{e:?}")))?;

    Ok(pages.concat())
}
