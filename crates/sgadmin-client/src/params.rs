//! Flat request parameter sets.

use std::collections::BTreeMap;

/// Parameters whose values are comma-joined identifier lists and may be
/// split across requests. The order decides loop nesting when two of them
/// are split: the earlier name drives the outer loop.
pub const CHUNKABLE_PARAMETERS: [&str; 3] = ["custid", "docid", "pubid"];

/// Form fields for one logical call, keyed by parameter name.
///
/// List parameters hold a single comma-joined string, exactly as the
/// server receives them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    values: BTreeMap<String, String>,
}

impl ParameterSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Adds a scalar parameter, consuming and returning the set.
    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Adds an identifier list joined with commas. An empty list adds
    /// nothing.
    #[must_use]
    pub fn with_ids<S: AsRef<str>>(mut self, name: &str, ids: &[S]) -> Self {
        if !ids.is_empty() {
            self.insert(name, join_ids(ids));
        }
        self
    }

    /// Adds a parameter only when a value is present.
    #[must_use]
    pub fn with_optional(mut self, name: &str, value: Option<impl Into<String>>) -> Self {
        if let Some(present) = value {
            self.insert(name, present);
        }
        self
    }

    /// Inserts or replaces a parameter.
    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.values.insert(name.to_owned(), value.into());
    }

    /// Removes a parameter, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.values.remove(name)
    }

    /// Value of a parameter.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Parameters in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Owned name/value pairs ready for form encoding.
    #[must_use]
    pub fn to_form_fields(&self) -> Vec<(String, String)> {
        self.values
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }
}

/// Splits a comma-joined identifier value, skipping empty entries.
pub(crate) fn split_ids(value: &str) -> Vec<&str> {
    value
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .collect()
}

pub(crate) fn join_ids<S: AsRef<str>>(ids: &[S]) -> String {
    ids.iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join(",")
}
