use crate::domain::errors::PipelineError;
use crate::domain::ports::TextExtractor;

/// Decodes UTF-8 text files
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, PipelineError> {
        String::from_utf8(bytes.to_vec()).map_err(|e| {
            PipelineError::Extraction(format!(
                "document is not valid UTF-8 text (invalid byte at offset {})",
                e.utf8_error().valid_up_to()
            ))
        })
    }

    fn format(&self) -> &'static str {
        "text"
    }
}
