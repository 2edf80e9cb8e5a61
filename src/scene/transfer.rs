//! JSON transfer format for scene state.
//!
//! ```json
//! { "Chair1": { "modelIndex": 0, "translation": [0, 0, 0], "rotation": [0, 0, 0],
//!               "scale": [1, 1, 1], "materials": [ { "diffuse": [1, 1, 1, 1], ... } ] } }
//! ```

use std::collections::BTreeMap;

use super::instance::ObjectInstance;
use super::model::ModelRegistry;
use crate::error::{Result, SceneError};

/// Serialize instances. Non-finite values have no JSON form and are an error.
pub fn to_json(instances: &BTreeMap<String, ObjectInstance>) -> Result<String> {
    if let Some(key) = instances
        .iter()
        .find_map(|(key, instance)| has_non_finite(instance).then_some(key))
    {
        return Err(SceneError::InvalidValue(format!("{key}: non-finite number")));
    }
    Ok(serde_json::to_string(instances)?)
}

/// Parse and validate scene text. Nothing outside the returned map is touched.
pub fn from_json(
    text: &str,
    registry: &ModelRegistry,
) -> Result<BTreeMap<String, ObjectInstance>> {
    let instances: BTreeMap<String, ObjectInstance> = serde_json::from_str(text)
        .map_err(|e| SceneError::ImportFormat(format!("Malformed scene JSON: {e}")))?;

    for (key, instance) in &instances {
        validate(key, instance, registry)?;
    }
    Ok(instances)
}

fn validate(key: &str, instance: &ObjectInstance, registry: &ModelRegistry) -> Result<()> {
    if key.is_empty() {
        return Err(SceneError::ImportFormat("Empty instance key".into()));
    }

    let model = registry.get(instance.model_index).map_err(|_| {
        SceneError::ImportFormat(format!(
            "{key}: modelIndex {} does not name a loaded model",
            instance.model_index
        ))
    })?;

    if instance.materials.len() != model.parts().len() {
        return Err(SceneError::ImportFormat(format!(
            "{key}: {} materials for {} parts of {}",
            instance.materials.len(),
            model.parts().len(),
            model.name()
        )));
    }

    if has_non_finite(instance) {
        return Err(SceneError::ImportFormat(format!(
            "{key}: non-finite number"
        )));
    }

    Ok(())
}

fn has_non_finite(instance: &ObjectInstance) -> bool {
    let transform = instance
        .translation
        .iter()
        .chain(&instance.rotation)
        .chain(&instance.scale);
    let materials = instance.materials.iter().flat_map(|m| {
        m.diffuse
            .iter()
            .chain(&m.ambient)
            .chain(&m.specular)
            .chain(&m.emissive)
            .chain([&m.shininess, &m.opacity])
    });
    transform.chain(materials).any(|v| !v.is_finite())
}
