use std::collections::BTreeMap;

use glam::Mat4;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::model::{Model, ModelRegistry};
use super::transfer;
use crate::error::{Result, SceneError};
use crate::render::transform;
use crate::types::Material;

/// A placed copy of a model with its own transform and material overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ObjectInstance {
    /// Index into the [`ModelRegistry`]; resolved on every use.
    pub model_index: usize,
    pub translation: [f32; 3],
    /// Per-axis rotation in radians.
    pub rotation: [f32; 3],
    pub scale: [f32; 3],
    /// One independent copy of each part's base material.
    pub materials: Vec<Material>,
}

impl ObjectInstance {
    /// Identity transform with deep copies of the model's base materials.
    pub fn new(model: &Model) -> Self {
        Self {
            model_index: model.index(),
            translation: [0.0; 3],
            rotation: [0.0; 3],
            scale: [1.0; 3],
            materials: model.parts().iter().map(|p| p.material.clone()).collect(),
        }
    }

    /// World matrix for this instance of a model centred by `offset`.
    pub fn world_matrix(&self, offset: [f32; 3]) -> Mat4 {
        transform::instance_world(offset, self.translation, self.rotation, self.scale)
    }
}

/// Placed instances keyed by a user-visible name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneStore {
    instances: BTreeMap<String, ObjectInstance>,
}

impl SceneStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an instance of `model_index` under a fresh `<ModelName><n>` key.
    pub fn place(&mut self, registry: &mut ModelRegistry, model_index: usize) -> Result<String> {
        let model = registry.get(model_index)?;

        let mut n = model.instances();
        let key = loop {
            n += 1;
            let candidate = format!("{}{}", model.name(), n);
            if !self.instances.contains_key(&candidate) {
                break candidate;
            }
        };
        let instance = ObjectInstance::new(model);

        registry.increment_instances(model_index)?;
        info!(key = %key, model = model_index, "Placed instance");
        self.instances.insert(key.clone(), instance);
        Ok(key)
    }

    pub fn get(&self, key: &str) -> Result<&ObjectInstance> {
        self.instances
            .get(key)
            .ok_or_else(|| SceneError::NotFound(format!("instance {key}")))
    }

    /// Apply `mutator` to the instance stored under `key`.
    pub fn update<F, T>(&mut self, key: &str, mutator: F) -> Result<T>
    where
        F: FnOnce(&mut ObjectInstance) -> T,
    {
        let instance = self
            .instances
            .get_mut(key)
            .ok_or_else(|| SceneError::NotFound(format!("instance {key}")))?;
        Ok(mutator(instance))
    }

    pub fn remove(&mut self, key: &str) -> Result<ObjectInstance> {
        self.instances
            .remove(key)
            .ok_or_else(|| SceneError::NotFound(format!("instance {key}")))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.instances.contains_key(key)
    }

    /// Instances in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ObjectInstance)> {
        self.instances.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.instances.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Serialize every instance to the JSON transfer format.
    pub fn export_state(&self) -> Result<String> {
        transfer::to_json(&self.instances)
    }

    /// Replace every instance with the contents of `text`.
    ///
    /// The text is fully parsed and validated against `registry` before the
    /// store is touched; on error the previous state is kept.
    pub fn import_state(&mut self, registry: &mut ModelRegistry, text: &str) -> Result<usize> {
        let instances = transfer::from_json(text, registry)?;

        for instance in instances.values() {
            registry.increment_instances(instance.model_index)?;
        }
        self.instances = instances;

        debug!(instances = self.instances.len(), "Imported scene");
        Ok(self.instances.len())
    }
}
