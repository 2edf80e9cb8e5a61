use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, SceneError};

/// Where geometry and material-library text comes from.
pub trait ModelSource {
    /// Return the full text stored at `path`.
    fn fetch(&self, path: &str) -> Result<String>;
}

/// Reads files relative to a root directory.
#[derive(Debug, Clone)]
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ModelSource for FileSource {
    fn fetch(&self, path: &str) -> Result<String> {
        let full = self.root.join(path);
        debug!(path = %full.display(), "Fetching");
        std::fs::read_to_string(&full)
            .map_err(|e| SceneError::Load(format!("Failed to read {}: {e}", full.display())))
    }
}

/// In-memory path -> text map.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(path, text);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, text: impl Into<String>) {
        self.files.insert(path.into(), text.into());
    }
}

impl ModelSource for MemorySource {
    fn fetch(&self, path: &str) -> Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| SceneError::Load(format!("No such file: {path}")))
    }
}

/// Resolve `name` against the directory containing `base`.
///
/// `models/chair/chair.obj` + `chair.mtl` -> `models/chair/chair.mtl`
pub fn resolve_relative(base: &str, name: &str) -> String {
    match Path::new(base).parent() {
        Some(dir) => dir.join(name).to_string_lossy().into_owned(),
        None => name.to_string(),
    }
}
