// crates/scan_markers/src/lib.rs

use std::collections::BTreeSet;

use document_model::{DocumentError, TemplateDocument};
use marker_syntax::MarkerSyntax;
use serde::Serialize;
use tracing::{debug, info};

/// Markers found by a scan, together with how many there are.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    pub markers: Vec<String>,
    pub total: usize,
}

/// Returns the sorted, deduplicated marker names present anywhere in the
/// document.
///
/// Every region is read fresh, so the result always reflects the current
/// document content. A failure to enumerate or read a region is returned
/// unchanged.
pub fn scan<D: TemplateDocument + ?Sized>(document: &D) -> Result<Vec<String>, DocumentError> {
    let mut markers = BTreeSet::new();

    for id in document.regions()? {
        let text = document.region_text(&id)?;
        let before = markers.len();
        collect_markers(&text, &mut markers);
        if markers.len() > before {
            debug!(region = %id, new = markers.len() - before, "markers found");
        }
    }

    info!(total = markers.len(), "scan complete");
    Ok(markers.into_iter().collect())
}

/// Same as [`scan`] but wrapped with its total.
pub fn scan_report<D: TemplateDocument + ?Sized>(document: &D) -> Result<ScanReport, DocumentError> {
    let markers = scan(document)?;
    Ok(ScanReport {
        total: markers.len(),
        markers,
    })
}

/// Marker names in a single piece of text, sorted and deduplicated.
pub fn markers_in_text(text: &str) -> Vec<String> {
    let mut markers = BTreeSet::new();
    collect_markers(text, &mut markers);
    markers.into_iter().collect()
}

// One pass per syntax, in priority order. Passes only ever add to the set.
fn collect_markers(text: &str, markers: &mut BTreeSet<String>) {
    for syntax in MarkerSyntax::ALL {
        markers.extend(syntax.names_in(text));
    }
}
