use std::collections::BTreeMap;

/// One sample input row: source-field identifiers mapped to opaque values.
///
/// Values are untyped at this layer; transformation resolution decides how
/// to interpret them. Lookups are case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleRow {
    values: BTreeMap<String, String>,
}

impl SampleRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.values.insert(field.into(), value.into());
    }

    /// Builder-style insert for test fixtures and row construction.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(field, value)| (field.as_str(), value.as_str()))
    }
}

impl From<BTreeMap<String, String>> for SampleRow {
    fn from(values: BTreeMap<String, String>) -> Self {
        Self { values }
    }
}

impl FromIterator<(String, String)> for SampleRow {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
