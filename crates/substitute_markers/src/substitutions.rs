// crates/substitute_markers/src/substitutions.rs

use serde_json::Value;

use crate::TemplateError;

/// Marker name → replacement text for one substitution pass.
///
/// Names are stored trimmed. Inserting a name twice keeps its first position
/// and takes the last value, so a mapping never holds duplicate keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitutions {
    entries: Vec<(String, String)>,
}

impl Substitutions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or overrides one entry.
    ///
    /// A name that is blank after trimming can never match a marker and is
    /// rejected as [`TemplateError::InvalidMapping`].
    pub fn insert(
        &mut self,
        name: impl AsRef<str>,
        value: impl Into<String>,
    ) -> Result<(), TemplateError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(TemplateError::InvalidMapping(
                "marker names must not be blank".to_string(),
            ));
        }
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| existing == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name.to_string(), value)),
        }
        Ok(())
    }

    /// Parses a JSON object of strings, e.g. `{"NOME": "João"}`.
    pub fn from_json(json: &str) -> Result<Self, TemplateError> {
        let parsed: Value = serde_json::from_str(json)
            .map_err(|err| TemplateError::InvalidMapping(format!("not valid JSON: {}", err)))?;
        let Value::Object(object) = parsed else {
            return Err(TemplateError::InvalidMapping(
                "expected a JSON object of marker names to values".to_string(),
            ));
        };

        let mut substitutions = Substitutions::new();
        for (name, value) in object {
            match value {
                Value::String(text) => substitutions.insert(&name, text)?,
                other => {
                    return Err(TemplateError::InvalidMapping(format!(
                        "value for '{}' must be a string, found {}",
                        name, other
                    )))
                }
            }
        }
        Ok(substitutions)
    }

    /// Merges `other` on top of `self`; entries in `other` win.
    pub fn merge(&mut self, other: Substitutions) {
        for (name, value) in other.entries {
            match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
                Some(entry) => entry.1 = value,
                None => self.entries.push((name, value)),
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Marker names in mapping order.
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.iter().find(|(n, _)| *n == name).map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Pairs are taken in order, which becomes the mapping order.
impl<K: AsRef<str>, V: Into<String>> TryFrom<Vec<(K, V)>> for Substitutions {
    type Error = TemplateError;

    fn try_from(pairs: Vec<(K, V)>) -> Result<Self, Self::Error> {
        let mut substitutions = Substitutions::new();
        for (name, value) in pairs {
            substitutions.insert(name, value)?;
        }
        Ok(substitutions)
    }
}
