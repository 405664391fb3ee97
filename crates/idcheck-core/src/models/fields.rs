//! The extracted-field dictionary returned by a parse call.

use std::collections::BTreeMap;

use serde::Serialize;

/// Mapping from canonical field name to optional extracted value.
///
/// `None` and the empty string are equivalent: both mean the field was
/// not found. Each parse call owns its own instance; there is no shared
/// state between calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExtractedFields(BTreeMap<String, Option<String>>);

impl ExtractedFields {
    /// Create a field map with every declared name present and absent.
    pub fn with_declared<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self(names.into_iter().map(|n| (n.to_string(), None)).collect())
    }

    /// The non-empty value of a field, if it resolved.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .get(name)
            .and_then(|v| v.as_deref())
            .filter(|v| !v.is_empty())
    }

    /// Whether a field resolved to a non-empty value.
    pub fn is_found(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Set a field only when it is currently absent or empty.
    pub fn fill(&mut self, name: &str, value: String) {
        if self.get(name).is_none() && !value.is_empty() {
            self.0.insert(name.to_string(), Some(value));
        }
    }

    /// Set a field unconditionally, declaring it if necessary.
    pub fn overwrite(&mut self, name: &str, value: Option<String>) {
        self.0.insert(name.to_string(), value);
    }

    /// Iterate over all declared fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Option<String>)> {
        self.0.iter()
    }

    /// Names of declared fields that did not resolve.
    pub fn missing(&self) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(_, v)| v.as_deref().is_none_or(str::is_empty))
            .map(|(n, _)| n.as_str())
            .collect()
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no fields are declared at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the underlying map.
    pub fn as_map(&self) -> &BTreeMap<String, Option<String>> {
        &self.0
    }
}
