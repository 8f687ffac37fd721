use std::collections::BTreeMap;

use crate::rule::FieldRule;

/// Derive the canonical layout key for a field name: lower-cased, hyphens
/// replaced with underscores.
pub fn canonical_key(name: &str) -> String {
    name.trim().to_lowercase().replace('-', "_")
}

/// Canonical, exportable layout artifact produced by the layout compiler.
///
/// Storage is key-addressed; every consumer-facing enumeration is ordered by
/// target position ascending. Derived from a validated configuration and
/// regenerated (never mutated) when the configuration changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompiledLayout {
    pub source_system: String,
    pub job_name: String,
    pub transaction_type: String,
    entries: BTreeMap<String, FieldRule>,
}

impl CompiledLayout {
    pub fn new(
        source_system: impl Into<String>,
        job_name: impl Into<String>,
        transaction_type: impl Into<String>,
    ) -> Self {
        Self {
            source_system: source_system.into(),
            job_name: job_name.into(),
            transaction_type: transaction_type.into(),
            entries: BTreeMap::new(),
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert an entry under its canonical key. Returns the displaced entry
    /// when the key was already present; the compiler treats that as a fatal
    /// consistency failure.
    pub fn insert(&mut self, key: String, rule: FieldRule) -> Option<FieldRule> {
        self.entries.insert(key, rule)
    }

    pub fn get(&self, key: &str) -> Option<&FieldRule> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered by target position ascending (key as tie-break, so
    /// the enumeration is total and deterministic).
    pub fn ordered(&self) -> Vec<(&str, &FieldRule)> {
        let mut entries: Vec<(&str, &FieldRule)> = self
            .entries
            .iter()
            .map(|(key, rule)| (key.as_str(), rule))
            .collect();
        entries.sort_by(|a, b| {
            a.1.target_position
                .cmp(&b.1.target_position)
                .then_with(|| a.0.cmp(b.0))
        });
        entries
    }
}
