//! Layout compiler: turns a *validated* mapping configuration into the
//! canonical, key-addressed [`CompiledLayout`] and serializes it for the
//! downstream fixed-width file generator.
//!
//! The compiler re-keys and orders; it performs no transformation-type
//! interpretation. Compiling the same valid configuration twice yields
//! identical layouts, which keeps export artifacts reproducible and
//! re-saves idempotent.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use thiserror::Error;
use tracing::debug;

use recmap_model::{CompiledLayout, FieldMappingConfig, canonical_key};

pub const LAYOUT_SCHEMA: &str = "record-layout-studio.layout";
pub const LAYOUT_SCHEMA_VERSION: u32 = 1;

/// Compiler consistency failures. These indicate a configuration that was
/// not validated first (or a validation bug) and abort compilation loudly
/// rather than producing an inconsistent layout.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("duplicate canonical key '{key}' derived for field '{field}'")]
    DuplicateKey { key: String, field: String },
    #[error("field mapping {index} has no usable field name")]
    MissingFieldName { index: usize },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Compile a validated configuration into its canonical layout.
///
/// # Errors
///
/// [`LayoutError::DuplicateKey`] or [`LayoutError::MissingFieldName`] when
/// the configuration violates invariants that validation guarantees.
pub fn compile(config: &FieldMappingConfig) -> Result<CompiledLayout, LayoutError> {
    let mut layout = CompiledLayout::new(
        config.source_system.clone(),
        config.job_name.clone(),
        config.transaction_type.clone(),
    );

    for (index, rule) in config.fields.iter().enumerate() {
        let name = rule
            .effective_name()
            .ok_or(LayoutError::MissingFieldName { index: index + 1 })?;
        let key = canonical_key(name);
        if layout.contains_key(&key) {
            return Err(LayoutError::DuplicateKey {
                key,
                field: name.to_string(),
            });
        }
        layout.insert(key, rule.clone());
    }

    debug!(
        config = %config.identity(),
        fields = layout.len(),
        "compiled record layout"
    );
    Ok(layout)
}

/// Serialized export document consumed by the downstream layout loader.
/// Field entries are keyed by canonical key and ordered by target position
/// ascending.
#[derive(Debug, Serialize)]
pub struct LayoutDocument<'a> {
    pub schema: &'static str,
    pub schema_version: u32,
    pub generated_at: String,
    pub source_system: &'a str,
    pub job_name: &'a str,
    pub transaction_type: &'a str,
    pub fields: OrderedFields<'a>,
}

/// Position-ordered serialization view over the key-addressed layout map.
#[derive(Debug)]
pub struct OrderedFields<'a>(&'a CompiledLayout);

impl Serialize for OrderedFields<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let ordered = self.0.ordered();
        let mut map = serializer.serialize_map(Some(ordered.len()))?;
        for (key, rule) in ordered {
            map.serialize_entry(key, rule)?;
        }
        map.end()
    }
}

/// Build the export document for a compiled layout.
pub fn layout_document(layout: &CompiledLayout) -> LayoutDocument<'_> {
    LayoutDocument {
        schema: LAYOUT_SCHEMA,
        schema_version: LAYOUT_SCHEMA_VERSION,
        generated_at: Utc::now().to_rfc3339(),
        source_system: &layout.source_system,
        job_name: &layout.job_name,
        transaction_type: &layout.transaction_type,
        fields: OrderedFields(layout),
    }
}

/// Write the export document as pretty JSON under `output_dir`.
pub fn write_layout_json(
    output_dir: &Path,
    layout: &CompiledLayout,
) -> Result<PathBuf, LayoutError> {
    std::fs::create_dir_all(output_dir)?;
    let file_name = format!(
        "{}_{}_layout.json",
        canonical_key(&layout.job_name),
        canonical_key(&layout.transaction_type)
    );
    let output_path = output_dir.join(file_name);
    let json = serde_json::to_string_pretty(&layout_document(layout))?;
    std::fs::write(&output_path, format!("{json}\n"))?;
    Ok(output_path)
}
