// crates/document_model/src/lib.rs

//! `document_model` — the narrow view of a document the templating crates
//! work against.
//!
//!  * **One trait** – [`TemplateDocument`] – enumerate text regions, read a
//!    region, write a region. Nothing about fonts, runs or layout.
//!  * **One in‑memory implementation** – [`MemoryDocument`] – with JSON and
//!    plain‑text load/save via [`DocumentFormat`].
//!
//! Regions are always produced in the same order: body paragraphs, table
//! cells (row‑major), then section by section the header paragraphs followed
//! by the footer paragraphs.

use std::fmt;
use thiserror::Error;

mod format;
mod memory;

pub use format::DocumentFormat;
pub use memory::{MemoryDocument, Section, Table};

/// Address of a single editable text region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionId {
    Paragraph { index: usize },
    TableCell { table: usize, row: usize, cell: usize },
    Header { section: usize, paragraph: usize },
    Footer { section: usize, paragraph: usize },
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionId::Paragraph { index } => write!(f, "paragraph {}", index),
            RegionId::TableCell { table, row, cell } => {
                write!(f, "table {} row {} cell {}", table, row, cell)
            }
            RegionId::Header { section, paragraph } => {
                write!(f, "section {} header paragraph {}", section, paragraph)
            }
            RegionId::Footer { section, paragraph } => {
                write!(f, "section {} footer paragraph {}", section, paragraph)
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("document is unreadable: {reason}")]
    Unreadable { reason: String },

    #[error("no such region: {0}")]
    UnknownRegion(RegionId),

    #[error("failed to parse document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to encode document: {0}")]
    Encode(#[source] serde_json::Error),
}

impl DocumentError {
    pub fn unreadable(reason: impl Into<String>) -> Self {
        DocumentError::Unreadable { reason: reason.into() }
    }
}

/// Abstracts the minimum the scanner and substitutor need from a document.
///
/// Implementations own the document; callers only borrow it for the length
/// of one operation, so exclusive access during a substitution pass is
/// enforced by `&mut self`.
pub trait TemplateDocument {
    /// Every text region, in traversal order.
    fn regions(&self) -> Result<Vec<RegionId>, DocumentError>;

    /// Current plain text of one region.
    fn region_text(&self, id: &RegionId) -> Result<String, DocumentError>;

    /// Replaces the plain text of one region.
    fn set_region_text(&mut self, id: &RegionId, text: String) -> Result<(), DocumentError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_id_display() {
        assert_eq!(RegionId::Paragraph { index: 3 }.to_string(), "paragraph 3");
        assert_eq!(
            RegionId::TableCell { table: 0, row: 1, cell: 2 }.to_string(),
            "table 0 row 1 cell 2"
        );
        assert_eq!(
            RegionId::Footer { section: 1, paragraph: 0 }.to_string(),
            "section 1 footer paragraph 0"
        );
    }

    #[test]
    fn test_unknown_region_error_names_region() {
        let err = DocumentError::UnknownRegion(RegionId::Header { section: 2, paragraph: 5 });
        assert_eq!(err.to_string(), "no such region: section 2 header paragraph 5");
    }
}
