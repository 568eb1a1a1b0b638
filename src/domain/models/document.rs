//! Document domain model
//!
//! A document lives only for one question-answering session: it is
//! extracted, chunked and indexed, then discarded when another document
//! replaces it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Raw extracted text of one uploaded document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Opaque identifier for this upload
    pub id: Uuid,

    /// Where the document came from (file path or caller supplied label)
    pub source: String,

    /// Extracted text, possibly empty
    pub text: String,

    /// When the text was extracted
    pub loaded_at: DateTime<Utc>,
}

impl Document {
    /// Create a document with a fresh identifier
    pub fn new(source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            source: source.into(),
            text: text.into(),
            loaded_at: Utc::now(),
        }
    }

    /// Number of characters of extracted text
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// True when extraction produced no tokens at all
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_has_unique_id() {
        let a = Document::new("a.pdf", "alpha");
        let b = Document::new("a.pdf", "alpha");
        assert_ne!(a.id, b.id);
        assert_eq!(a.source, "a.pdf");
    }

    #[test]
    fn test_char_count_counts_scalars() {
        let doc = Document::new("notes.txt", "héllo");
        assert_eq!(doc.char_count(), 5);
        assert!(!doc.is_blank());
        assert!(Document::new("empty.txt", " \n\t").is_blank());
    }
}
