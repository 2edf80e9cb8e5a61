use tracing::debug;

use crate::error::{Result, SceneError};
use crate::render::backend::GeometryHandle;
use crate::types::{BoundingBox, Material};

/// One drawable, material-homogeneous piece of a model.
#[derive(Debug, Clone)]
pub struct Part {
    pub name: String,
    pub geometry: GeometryHandle,
    /// Default-filled material shared read-only by every instance.
    pub material: Material,
    pub vertex_count: usize,
    pub triangle_count: usize,
}

/// A fully loaded model that has not been registered yet.
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub name: String,
    pub path: String,
    pub parts: Vec<Part>,
    pub bounds: BoundingBox,
}

/// A registered model. Only the instance counter changes after registration.
#[derive(Debug, Clone)]
pub struct Model {
    index: usize,
    name: String,
    path: String,
    parts: Vec<Part>,
    bounds: BoundingBox,
    offset: [f32; 3],
    instances: u32,
}

impl Model {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    /// Translation that recentres the model's bounding box on the origin.
    pub fn offset(&self) -> [f32; 3] {
        self.offset
    }

    /// How many instances have been created from this model.
    pub fn instances(&self) -> u32 {
        self.instances
    }
}

/// Loaded models addressed by dense, zero-based indices.
#[derive(Debug, Default)]
pub struct ModelRegistry {
    models: Vec<Model>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a model under the next free index and return that index.
    pub fn register(&mut self, loaded: LoadedModel) -> usize {
        let index = self.models.len();
        let offset = loaded.bounds.centering_offset();
        debug!(index, model = %loaded.name, parts = loaded.parts.len(), "Registered model");
        self.models.push(Model {
            index,
            name: loaded.name,
            path: loaded.path,
            parts: loaded.parts,
            bounds: loaded.bounds,
            offset,
            instances: 0,
        });
        index
    }

    pub fn get(&self, index: usize) -> Result<&Model> {
        self.models
            .get(index)
            .ok_or_else(|| SceneError::NotFound(format!("model {index}")))
    }

    /// First model registered under `name`.
    pub fn find(&self, name: &str) -> Option<&Model> {
        self.models.iter().find(|m| m.name == name)
    }

    /// Bump the instance counter and return its new value.
    pub fn increment_instances(&mut self, index: usize) -> Result<u32> {
        let model = self
            .models
            .get_mut(index)
            .ok_or_else(|| SceneError::NotFound(format!("model {index}")))?;
        model.instances += 1;
        Ok(model.instances)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Model> {
        self.models.iter()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
