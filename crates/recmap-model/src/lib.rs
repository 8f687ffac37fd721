pub mod condition;
pub mod config;
pub mod datatype;
pub mod error;
pub mod layout;
pub mod report;
pub mod row;
pub mod rule;

pub use condition::Condition;
pub use config::FieldMappingConfig;
pub use datatype::DataType;
pub use error::{RecmapError, Result};
pub use layout::{CompiledLayout, canonical_key};
pub use report::ValidationReport;
pub use row::SampleRow;
pub use rule::{FieldRule, PadSide, Transform, TransformType};
