// crates/substitute_markers/src/region_text.rs

use regex::Regex;

/// Text of one region while a substitution pass rewrites it.
///
/// Text that came from the document and text that was inserted as a
/// replacement are kept apart, so later patterns in the same pass only ever
/// look at document text and replacement values are never rescanned.
pub(crate) struct RegionText<'v> {
    pieces: Vec<Piece<'v>>,
}

enum Piece<'v> {
    Source(String),
    Inserted(&'v str),
}

impl<'v> RegionText<'v> {
    pub(crate) fn new(text: String) -> Self {
        Self {
            pieces: vec![Piece::Source(text)],
        }
    }

    /// Replaces every match of `pattern` in the document text with `value`.
    /// Returns `true` when at least one match was replaced.
    pub(crate) fn replace_all(&mut self, pattern: &Regex, value: &'v str) -> bool {
        let mut hit = false;
        let mut rebuilt = Vec::with_capacity(self.pieces.len());

        for piece in self.pieces.drain(..) {
            let source = match piece {
                Piece::Source(source) if pattern.is_match(&source) => source,
                other => {
                    rebuilt.push(other);
                    continue;
                }
            };

            hit = true;
            let mut last = 0;
            for m in pattern.find_iter(&source) {
                if m.start() > last {
                    rebuilt.push(Piece::Source(source[last..m.start()].to_string()));
                }
                rebuilt.push(Piece::Inserted(value));
                last = m.end();
            }
            if last < source.len() {
                rebuilt.push(Piece::Source(source[last..].to_string()));
            }
        }

        self.pieces = rebuilt;
        hit
    }

    pub(crate) fn into_string(self) -> String {
        self.pieces
            .into_iter()
            .map(|piece| match piece {
                Piece::Source(source) => source,
                Piece::Inserted(value) => value.to_string(),
            })
            .collect()
    }
}
