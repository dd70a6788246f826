//! Token substitution table used for both entry paths and text file contents.

use indexmap::IndexMap;

/// Ordered mapping from placeholder token to its replacement value.
///
/// Replacement is literal substring replacement, token by token, each pass
/// seeing the output of the previous one. Tokens are applied longest first so
/// that a token contained in another one (`_package_` in `_package_path_`)
/// cannot break the longer token before it gets its turn.
#[derive(Debug, Default, Clone)]
pub struct SubstitutionTable {
    entries: IndexMap<String, String>,
}

impl SubstitutionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `token` to `value`, replacing any previous binding in place.
    pub fn insert(&mut self, token: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(token.into(), value.into());
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.entries.get(token).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bindings in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Applies every binding to `input`.
    pub fn apply(&self, input: &str) -> String {
        let mut output = input.to_string();
        for (token, value) in self.application_order() {
            if !token.is_empty() && output.contains(token) {
                output = output.replace(token, value);
            }
        }
        output
    }

    /// Bindings sorted by descending token length; equal lengths keep insertion order.
    fn application_order(&self) -> Vec<(&str, &str)> {
        let mut ordered: Vec<(&str, &str)> = self.iter().collect();
        ordered.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        ordered
    }
}
