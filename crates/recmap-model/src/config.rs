use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::layout::canonical_key;
use crate::rule::FieldRule;

fn initial_version() -> u64 {
    1
}

/// Root aggregate for one (source-system, job, transaction-type) mapping.
///
/// Configurations are never physically deleted; an edit bumps the version
/// and a superseded config is replaced or marked deprecated externally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMappingConfig {
    pub source_system: String,
    pub job_name: String,
    pub transaction_type: String,
    #[serde(default)]
    pub fields: Vec<FieldRule>,
    #[serde(default = "initial_version")]
    pub version: u64,
    #[serde(default = "Utc::now")]
    pub last_modified: DateTime<Utc>,
}

impl FieldMappingConfig {
    pub fn new(
        source_system: impl Into<String>,
        job_name: impl Into<String>,
        transaction_type: impl Into<String>,
    ) -> Self {
        Self {
            source_system: source_system.into(),
            job_name: job_name.into(),
            transaction_type: transaction_type.into(),
            fields: Vec::new(),
            version: 1,
            last_modified: Utc::now(),
        }
    }

    /// Record a mutation: bump the version and refresh the timestamp.
    pub fn touch(&mut self) {
        self.version += 1;
        self.last_modified = Utc::now();
    }

    /// Look up a rule by canonical key (name normalization applied to both
    /// sides).
    pub fn find_rule(&self, name: &str) -> Option<&FieldRule> {
        let wanted = canonical_key(name);
        self.fields.iter().find(|rule| {
            rule.effective_name()
                .is_some_and(|candidate| canonical_key(candidate) == wanted)
        })
    }

    /// Identifying tuple used in logs and export metadata.
    pub fn identity(&self) -> String {
        format!(
            "{}/{}/{}",
            self.source_system, self.job_name, self.transaction_type
        )
    }

    /// Parse a configuration from its JSON document form.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Serialize to the pretty JSON document form stored on disk.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a configuration document from a file.
    pub fn read_json(path: &Path) -> Result<Self> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }

    /// Write the configuration document to a file, newline-terminated.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let mut text = self.to_json_string()?;
        text.push('\n');
        std::fs::write(path, text)?;
        Ok(())
    }
}
