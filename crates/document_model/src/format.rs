// crates/document_model/src/format.rs

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use crate::{DocumentError, MemoryDocument};

/// On-disk representations a [`MemoryDocument`] can be loaded from and saved
/// to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// The serde JSON shape of [`MemoryDocument`].
    Json,
    /// Plain UTF‑8 text, one paragraph per line.
    Text,
}

impl DocumentFormat {
    /// Guesses the format from a file extension (case-insensitive).
    /// `.json` is JSON, everything else is treated as plain text.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .as_deref()
        {
            Some("json") => DocumentFormat::Json,
            _ => DocumentFormat::Text,
        }
    }

    pub fn load(self, bytes: &[u8]) -> Result<MemoryDocument, DocumentError> {
        debug!(format = %self, size = bytes.len(), "loading document");
        match self {
            DocumentFormat::Json => Ok(serde_json::from_slice(bytes)?),
            DocumentFormat::Text => {
                let text = std::str::from_utf8(bytes)
                    .map_err(|err| DocumentError::unreadable(format!("not valid UTF-8: {}", err)))?;
                Ok(MemoryDocument::from_plain_text(text))
            }
        }
    }

    pub fn save(self, document: &MemoryDocument) -> Result<Vec<u8>, DocumentError> {
        match self {
            DocumentFormat::Json => {
                let mut bytes = serde_json::to_vec_pretty(document).map_err(DocumentError::Encode)?;
                bytes.push(b'\n');
                Ok(bytes)
            }
            DocumentFormat::Text => Ok(document.to_plain_text().into_bytes()),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Json => f.write_str("json"),
            DocumentFormat::Text => f.write_str("text"),
        }
    }
}

impl FromStr for DocumentFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(DocumentFormat::Json),
            "text" | "txt" => Ok(DocumentFormat::Text),
            other => Err(format!("unknown document format '{}' (expected json or text)", other)),
        }
    }
}

impl MemoryDocument {
    /// Builds a document whose body paragraphs are the lines of `text`.
    pub fn from_plain_text(text: &str) -> Self {
        MemoryDocument {
            paragraphs: text.lines().map(str::to_string).collect(),
            ..MemoryDocument::default()
        }
    }

    /// Flattens the document into plain text, one region per line and the
    /// cells of a table row joined by tabs, in traversal order.
    pub fn to_plain_text(&self) -> String {
        let mut lines: Vec<String> = self.paragraphs.clone();

        for table in &self.tables {
            lines.extend(table.rows.iter().map(|row| row.join("\t")));
        }
        for section in &self.sections {
            if let Some(header) = &section.header {
                lines.extend(header.iter().cloned());
            }
        }
        for section in &self.sections {
            if let Some(footer) = &section.footer {
                lines.extend(footer.iter().cloned());
            }
        }

        let mut out = lines.join("\n");
        if !out.is_empty() {
            out.push('\n');
        }
        out
    }
}
