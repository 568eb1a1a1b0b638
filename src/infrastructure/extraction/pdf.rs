use std::panic::{self, AssertUnwindSafe};

use crate::domain::errors::PipelineError;
use crate::domain::ports::TextExtractor;

/// Extracts the text layer of a PDF
///
/// Scanned PDFs without a text layer yield an empty string, not an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, PipelineError> {
        // pdf-extract panics on some malformed inputs
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem(bytes)
        }));

        match outcome {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => {
                tracing::debug!(error = %e, "pdf extraction failed");
                Err(PipelineError::Extraction("unreadable PDF document".to_string()))
            }
            Err(_) => {
                tracing::debug!("pdf parser panicked");
                Err(PipelineError::Extraction("unreadable PDF document".to_string()))
            }
        }
    }

    fn format(&self) -> &'static str {
        "pdf"
    }
}
