use std::io;

/// All error types for the scene viewer.
#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    #[error("Load error: {0}")]
    Load(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Light cap exceeded: at most {} lights", crate::scene::MAX_LIGHTS)]
    LightCapExceeded,
    #[error("Light index out of range: {0}")]
    LightOutOfRange(usize),
    #[error("Import format error: {0}")]
    ImportFormat(String),
    #[error("Backend error: {0}")]
    Backend(String),
    #[error("Invalid value: {0}")]
    InvalidValue(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SceneError>;
