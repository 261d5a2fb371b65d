// PDF text extraction module
// Thin wrapper around pdf-extract; unreadable documents abort the ingestion

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::{PdfChatError, Result};

/// Extract the text of a single PDF file
#[inline]
pub fn extract_text(path: &Path) -> Result<String> {
    debug!("Extracting text from {}", path.display());

    let bytes = std::fs::read(path)
        .map_err(|e| PdfChatError::Extraction(format!("Failed to read {}: {}", path.display(), e)))?;

    let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
        PdfChatError::Extraction(format!("Failed to extract {}: {}", path.display(), e))
    })?;
    Ok(text)
}

/// Extract text from in-memory PDF bytes
#[inline]
pub fn extract_text_from_bytes(bytes: &[u8]) -> Result<String> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| PdfChatError::Extraction(format!("PDF extraction error: {e}")))?;
    Ok(text)
}

/// Extract an ingestion batch of PDFs into one concatenated document string.
///
/// Page and document boundaries are not preserved; the chunker operates on
/// the combined stream, matching the downstream data model.
#[inline]
pub fn extract_documents(paths: &[PathBuf]) -> Result<String> {
    let mut text = String::new();
    for path in paths {
        let document_text = extract_text(path)?;
        text.push_str(&document_text);
    }

    info!(
        "Extracted {} characters from {} document(s)",
        text.chars().count(),
        paths.len()
    );
    Ok(text)
}
