use thiserror::Error;

/// Failure loading or persisting a mapping configuration document.
#[derive(Debug, Error)]
pub enum RecmapError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RecmapError>;
