//! Document text extraction
//!
//! Adapters behind [`TextExtractor`]: PDF via `pdf-extract`, and plain
//! UTF-8 text. Extraction is a black box to the rest of the pipeline; any
//! internal failure becomes one opaque [`PipelineError::Extraction`].

pub mod pdf;
pub mod plain_text;

use std::path::Path;

use crate::domain::errors::PipelineError;
use crate::domain::models::Document;
use crate::domain::ports::TextExtractor;

pub use pdf::PdfTextExtractor;
pub use plain_text::PlainTextExtractor;

/// Pick an extractor from the file extension (`.pdf` is PDF, anything else plain text)
pub fn extractor_for_path(path: &Path) -> Box<dyn TextExtractor> {
    let is_pdf = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

    if is_pdf {
        Box::new(PdfTextExtractor)
    } else {
        Box::new(PlainTextExtractor)
    }
}

/// Read `path` and extract its text into a [`Document`]
pub async fn load_document(path: &Path) -> Result<Document, PipelineError> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        PipelineError::Extraction(format!("cannot read {}: {e}", path.display()))
    })?;

    let extractor = extractor_for_path(path);
    let format = extractor.format();
    let text = tokio::task::spawn_blocking(move || extractor.extract(&bytes))
        .await
        .map_err(|e| PipelineError::Extraction(format!("extraction task failed: {e}")))??;

    let document = Document::new(path.display().to_string(), text);
    tracing::info!(
        document = %document.id,
        source = %document.source,
        format,
        characters = document.char_count(),
        "text extracted"
    );

    if document.is_blank() {
        tracing::warn!(source = %document.source, "document contains no extractable text");
    }

    Ok(document)
}
