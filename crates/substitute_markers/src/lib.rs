// crates/substitute_markers/src/lib.rs

//! Rewrites markers in a [`TemplateDocument`] with caller-supplied values.
//!
//! Two counting conventions live here and are kept apart on purpose:
//!
//!  * [`substitute`] counts one replacement per *(region, marker, syntax)*
//!    that matched at least once.
//!  * [`raw_replace`] counts one hit per *region* that contained the search
//!    text at least once.

use document_model::{DocumentError, TemplateDocument};
use marker_syntax::MarkerSyntax;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

mod region_text;
mod substitutions;

use region_text::RegionText;
pub use substitutions::Substitutions;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error(transparent)]
    DocumentUnreadable(#[from] DocumentError),

    #[error("invalid substitution mapping: {0}")]
    InvalidMapping(String),

    #[error("search text must not be empty")]
    EmptySearch,
}

/// Outcome of a substitution pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubstitutionReport {
    pub replacements: usize,
    /// Names from the mapping, in mapping order, whether or not they matched.
    pub processed_markers: Vec<String>,
}

/// One marker written in one syntax, ready to be matched.
struct Slot<'m> {
    name: &'m str,
    syntax: MarkerSyntax,
    pattern: Regex,
    value: &'m str,
}

fn compile_slots(substitutions: &Substitutions) -> Result<Vec<Slot<'_>>, TemplateError> {
    let mut slots = Vec::with_capacity(substitutions.len() * MarkerSyntax::ALL.len());
    for (name, value) in substitutions.iter() {
        for syntax in MarkerSyntax::ALL {
            let pattern = syntax.slot_pattern(name).map_err(|err| {
                TemplateError::InvalidMapping(format!("marker '{}' cannot be matched: {}", name, err))
            })?;
            slots.push(Slot {
                name,
                syntax,
                pattern,
                value,
            });
        }
    }
    Ok(slots)
}

/// Replaces every marker named in `substitutions`, in all four syntaxes,
/// across every region of the document. Returns the number of
/// (region, marker, syntax) combinations that were replaced.
///
/// A marker matches with or without whitespace between the delimiters and
/// the name: for the entry `NOME`, `{{NOME}}`, `{{ NOME }}` and `[ NOME ]`
/// are all replaced, the same padded forms that marker discovery reports as
/// `NOME` after trimming. Prose such as `[ i ]` is
/// therefore replaced for an entry named `i`.
///
/// Regions without a match are never written. Markers missing from the
/// mapping are left as they are; mapping entries missing from the document
/// are ignored. Replacement values are inserted verbatim and are not searched
/// for markers again, so running the same mapping twice is a no-op the second
/// time.
///
/// The first failing region read or write aborts the pass. Regions already
/// written stay written, so callers should not persist the document after an
/// error.
pub fn substitute<D: TemplateDocument + ?Sized>(
    document: &mut D,
    substitutions: &Substitutions,
) -> Result<usize, TemplateError> {
    if substitutions.is_empty() {
        return Ok(0);
    }
    let slots = compile_slots(substitutions)?;
    let mut total = 0;

    for id in document.regions()? {
        let mut text = RegionText::new(document.region_text(&id)?);
        let mut local = 0;

        for slot in &slots {
            if text.replace_all(&slot.pattern, slot.value) {
                debug!(region = %id, marker = slot.name, syntax = %slot.syntax, "marker replaced");
                local += 1;
            }
        }

        if local > 0 {
            document.set_region_text(&id, text.into_string())?;
            total += local;
        }
    }

    info!(replacements = total, markers = substitutions.len(), "substitution complete");
    Ok(total)
}

/// [`substitute`], reporting the processed marker names alongside the count.
pub fn substitute_with_report<D: TemplateDocument + ?Sized>(
    document: &mut D,
    substitutions: &Substitutions,
) -> Result<SubstitutionReport, TemplateError> {
    let replacements = substitute(document, substitutions)?;
    Ok(SubstitutionReport {
        replacements,
        processed_markers: substitutions.names(),
    })
}

/// Replaces every literal occurrence of `search` with `replacement` in every
/// region, with no marker parsing. Returns the number of regions that
/// contained `search` at least once.
pub fn raw_replace<D: TemplateDocument + ?Sized>(
    document: &mut D,
    search: &str,
    replacement: &str,
) -> Result<usize, TemplateError> {
    if search.is_empty() {
        return Err(TemplateError::EmptySearch);
    }
    let mut hits = 0;

    for id in document.regions()? {
        let text = document.region_text(&id)?;
        if text.contains(search) {
            document.set_region_text(&id, text.replace(search, replacement))?;
            debug!(region = %id, "text replaced");
            hits += 1;
        }
    }

    info!(regions = hits, "raw replace complete");
    Ok(hits)
}
