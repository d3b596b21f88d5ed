// crates/document_model/src/memory.rs

use serde::{Deserialize, Serialize};

use crate::{DocumentError, RegionId, TemplateDocument};

/// A document held entirely in memory.
///
/// The JSON shape is:
///
/// ```json
/// {
///   "paragraphs": ["Olá {{NOME}}"],
///   "tables": [{ "rows": [["[CARGO]", "<<DATA>>"]] }],
///   "sections": [{ "header": ["{EMPRESA}"], "footer": null }]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryDocument {
    #[serde(default)]
    pub paragraphs: Vec<String>,
    #[serde(default)]
    pub tables: Vec<Table>,
    #[serde(default)]
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
}

/// A page section. A missing header or footer contributes no regions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    #[serde(default)]
    pub header: Option<Vec<String>>,
    #[serde(default)]
    pub footer: Option<Vec<String>>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_paragraph(mut self, text: impl Into<String>) -> Self {
        self.paragraphs.push(text.into());
        self
    }

    /// Appends a table built from rows of cell text.
    pub fn with_table<R, C>(mut self, rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let rows: Vec<Vec<String>> = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect::<Vec<String>>())
            .collect();
        self.tables.push(Table { rows });
        self
    }

    /// Appends a section with the given header and footer paragraphs.
    pub fn with_section(mut self, header: Option<Vec<&str>>, footer: Option<Vec<&str>>) -> Self {
        let owned = |paras: Vec<&str>| -> Vec<String> { paras.into_iter().map(str::to_string).collect() };
        self.sections.push(Section {
            header: header.map(owned),
            footer: footer.map(owned),
        });
        self
    }

    fn slot(&self, id: &RegionId) -> Option<&String> {
        match *id {
            RegionId::Paragraph { index } => self.paragraphs.get(index),
            RegionId::TableCell { table, row, cell } => {
                self.tables.get(table)?.rows.get(row)?.get(cell)
            }
            RegionId::Header { section, paragraph } => {
                self.sections.get(section)?.header.as_ref()?.get(paragraph)
            }
            RegionId::Footer { section, paragraph } => {
                self.sections.get(section)?.footer.as_ref()?.get(paragraph)
            }
        }
    }

    fn slot_mut(&mut self, id: &RegionId) -> Option<&mut String> {
        match *id {
            RegionId::Paragraph { index } => self.paragraphs.get_mut(index),
            RegionId::TableCell { table, row, cell } => {
                self.tables.get_mut(table)?.rows.get_mut(row)?.get_mut(cell)
            }
            RegionId::Header { section, paragraph } => {
                self.sections.get_mut(section)?.header.as_mut()?.get_mut(paragraph)
            }
            RegionId::Footer { section, paragraph } => {
                self.sections.get_mut(section)?.footer.as_mut()?.get_mut(paragraph)
            }
        }
    }
}

impl TemplateDocument for MemoryDocument {
    fn regions(&self) -> Result<Vec<RegionId>, DocumentError> {
        let mut ids: Vec<RegionId> = (0..self.paragraphs.len())
            .map(|index| RegionId::Paragraph { index })
            .collect();

        for (table, t) in self.tables.iter().enumerate() {
            for (row, cells) in t.rows.iter().enumerate() {
                ids.extend((0..cells.len()).map(|cell| RegionId::TableCell { table, row, cell }));
            }
        }

        // Section by section: each header, then that section's footer.
        for (section, s) in self.sections.iter().enumerate() {
            if let Some(header) = &s.header {
                ids.extend((0..header.len()).map(|paragraph| RegionId::Header { section, paragraph }));
            }
            if let Some(footer) = &s.footer {
                ids.extend((0..footer.len()).map(|paragraph| RegionId::Footer { section, paragraph }));
            }
        }

        Ok(ids)
    }

    fn region_text(&self, id: &RegionId) -> Result<String, DocumentError> {
        self.slot(id)
            .cloned()
            .ok_or(DocumentError::UnknownRegion(*id))
    }

    fn set_region_text(&mut self, id: &RegionId, text: String) -> Result<(), DocumentError> {
        let slot = self.slot_mut(id).ok_or(DocumentError::UnknownRegion(*id))?;
        *slot = text;
        Ok(())
    }
}
