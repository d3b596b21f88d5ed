// crates/marker_syntax/src/lib.rs

//! `marker_syntax` — the placeholder syntaxes understood by the templating
//! tool‑chain.
//!
//! Both the scanner and the substitutor go through this crate, so the rules
//! for *finding* a marker and for *replacing* it can never drift apart:
//!
//!  * `{{NAME}}` – double braces (recommended)
//!  * `[NAME]`   – square brackets
//!  * `<<NAME>>` – double angle brackets
//!  * `{NAME}`   – single braces

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use tracing::trace;

/// One of the four delimiter pairs a marker can be written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerSyntax {
    DoubleBrace,
    Bracket,
    DoubleAngle,
    SingleBrace,
}

// ---------------------------------------------------------------------------
//  Regexes
// ---------------------------------------------------------------------------

// The captured name may not contain the closing delimiter character, which
// makes every match stop at the nearest closer.
static DOUBLE_BRACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{([^}]+)\}\}").unwrap());
static BRACKET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]").unwrap());
static DOUBLE_ANGLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<<([^>]+)>>").unwrap());
static SINGLE_BRACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([^}]+)\}").unwrap());

/// Opening delimiters a cleaned name must never start with. A name like `{X`
/// means a pattern swallowed part of a neighbouring delimiter.
const LEFTOVER_OPENERS: &[char] = &['{', '['];

impl MarkerSyntax {
    /// Every syntax, in the priority order used by scanning and substitution.
    pub const ALL: [MarkerSyntax; 4] = [
        MarkerSyntax::DoubleBrace,
        MarkerSyntax::Bracket,
        MarkerSyntax::DoubleAngle,
        MarkerSyntax::SingleBrace,
    ];

    pub fn open(self) -> &'static str {
        match self {
            MarkerSyntax::DoubleBrace => "{{",
            MarkerSyntax::Bracket => "[",
            MarkerSyntax::DoubleAngle => "<<",
            MarkerSyntax::SingleBrace => "{",
        }
    }

    pub fn close(self) -> &'static str {
        match self {
            MarkerSyntax::DoubleBrace => "}}",
            MarkerSyntax::Bracket => "]",
            MarkerSyntax::DoubleAngle => ">>",
            MarkerSyntax::SingleBrace => "}",
        }
    }

    /// Human readable description, as shown by `fill_template formats`.
    pub fn description(self) -> &'static str {
        match self {
            MarkerSyntax::DoubleBrace => "Double braces (recommended)",
            MarkerSyntax::Bracket => "Square brackets",
            MarkerSyntax::DoubleAngle => "Double angle brackets",
            MarkerSyntax::SingleBrace => "Single braces",
        }
    }

    pub fn is_recommended(self) -> bool {
        self == MarkerSyntax::DoubleBrace
    }

    /// Writes `name` inside this syntax's delimiters, e.g. `[NAME]`.
    pub fn render(self, name: &str) -> String {
        format!("{}{}{}", self.open(), name, self.close())
    }

    /// The discovery regex. Capture group 1 holds the raw (untrimmed) name.
    pub fn pattern(self) -> &'static Regex {
        match self {
            MarkerSyntax::DoubleBrace => &DOUBLE_BRACE_RE,
            MarkerSyntax::Bracket => &BRACKET_RE,
            MarkerSyntax::DoubleAngle => &DOUBLE_ANGLE_RE,
            MarkerSyntax::SingleBrace => &SINGLE_BRACE_RE,
        }
    }

    /// Builds the regex that matches every occurrence of the marker `name`
    /// written in this syntax.
    ///
    /// Whitespace between the delimiters and the name is tolerated, because
    /// discovery trims it: `{{ NAME }}` is reported as `NAME` and therefore has
    /// to be replaceable as `NAME`.
    pub fn slot_pattern(self, name: &str) -> Result<Regex, regex::Error> {
        Regex::new(&format!(
            r"{}\s*{}\s*{}",
            regex::escape(self.open()),
            regex::escape(name.trim()),
            regex::escape(self.close())
        ))
    }

    /// Returns every valid marker name written in this syntax inside `text`,
    /// in order of appearance (duplicates included).
    ///
    /// When a candidate is rejected the search resumes at the last opening
    /// delimiter inside it rather than after its end, so in `{{{X}}}` the
    /// well-formed `{{X}}` is still found once the corrupted `{X` capture is
    /// thrown away. A run of openers is skipped in one step, which keeps the
    /// scan linear in the length of `text`.
    pub fn names_in(self, text: &str) -> Vec<String> {
        let re = self.pattern();
        let mut names = Vec::new();
        let mut pos = 0;

        while pos < text.len() {
            let Some(caps) = re.captures_at(text, pos) else {
                break;
            };
            let (Some(whole), Some(raw)) = (caps.get(0), caps.get(1)) else {
                break;
            };
            match clean_candidate(raw.as_str()) {
                Some(name) => {
                    names.push(name.to_string());
                    pos = whole.end();
                }
                None => {
                    trace!(syntax = %self, candidate = raw.as_str(), "rejected marker candidate");
                    pos = self.resume_after_rejection(text, whole.start(), raw);
                }
            }
        }

        names
    }

    /// Where to search next after the candidate `raw` was rejected.
    ///
    /// A rejected capture begins with a run of whitespace and `{`/`[`. Any
    /// well-formed marker starting inside that run has its opener ending at the
    /// last opener character of the run, so nothing before it needs a retry.
    fn resume_after_rejection(self, text: &str, match_start: usize, raw: regex::Match<'_>) -> usize {
        let candidate = raw.as_str();
        let rest = candidate
            .trim_start_matches(|c: char| c.is_whitespace() || LEFTOVER_OPENERS.contains(&c));
        let run = &candidate[..candidate.len() - rest.len()];
        let openers_end = raw.start() + run.trim_end().len();

        let mut pos = openers_end
            .saturating_sub(self.open().len())
            .max(match_start + 1);
        while !text.is_char_boundary(pos) {
            pos += 1;
        }
        pos
    }
}

impl fmt::Display for MarkerSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render("NAME"))
    }
}

/// Trims a raw captured name and validates it.
///
/// Returns `None` when the trimmed name is empty or still starts with `{` or
/// `[`.
pub fn clean_candidate(raw: &str) -> Option<&str> {
    let name = raw.trim();
    if name.is_empty() || name.starts_with(LEFTOVER_OPENERS) {
        None
    } else {
        Some(name)
    }
}
