pub mod obj_loader;
pub mod source;

pub use source::{FileSource, MemorySource, ModelSource};

use tracing::{debug, info};

use crate::error::{Result, SceneError};
use crate::render::RendererBackend;
use crate::scene::{LoadedModel, Part};
use crate::types::{BoundingBox, ColorAttribute, GeometryGroup, RawMaterial};

/// Statistics about one loaded model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestionStats {
    pub total_vertices: usize,
    pub total_triangles: usize,
    pub total_parts: usize,
    pub has_vertex_colors: bool,
    pub material_count: usize,
}

/// Load a model: parse geometry and materials, resolve each part's base
/// material and upload every part to the backend.
///
/// Nothing is returned unless every step succeeds.
pub fn load_model(
    source: &dyn ModelSource,
    backend: &mut dyn RendererBackend,
    name: &str,
    path: &str,
) -> Result<LoadedModel> {
    let parsed = obj_loader::parse_obj(source, path)?;
    if parsed.groups.is_empty() {
        return Err(SceneError::Load(format!("{path} contains no triangles")));
    }

    let stats = compute_stats(&parsed.groups, parsed.materials.len());
    debug!(
        model = name,
        vertices = stats.total_vertices,
        triangles = stats.total_triangles,
        parts = stats.total_parts,
        "Ingestion stats"
    );

    let bounds = BoundingBox::from_groups(&parsed.groups);
    let mut parts = Vec::with_capacity(parsed.groups.len());
    for group in &parsed.groups {
        let material = group
            .material
            .as_ref()
            .and_then(|m| parsed.materials.get(m))
            .map(RawMaterial::resolve)
            .unwrap_or_default();

        let geometry = backend.create_geometry(&group.to_buffers()).map_err(|e| {
            SceneError::Load(format!("Failed to upload part '{}' of {name}: {e}", group.name))
        })?;

        parts.push(Part {
            name: group.name.clone(),
            geometry,
            material,
            vertex_count: group.vertex_count(),
            triangle_count: group.triangle_count(),
        });
    }

    info!(model = name, path, parts = parts.len(), "Loaded model");
    Ok(LoadedModel {
        name: name.to_string(),
        path: path.to_string(),
        parts,
        bounds,
    })
}

/// Summarize parsed geometry.
pub fn compute_stats(groups: &[GeometryGroup], material_count: usize) -> IngestionStats {
    IngestionStats {
        total_vertices: groups.iter().map(|g| g.vertex_count()).sum(),
        total_triangles: groups.iter().map(|g| g.triangle_count()).sum(),
        total_parts: groups.len(),
        has_vertex_colors: groups
            .iter()
            .any(|g| matches!(g.colors, ColorAttribute::PerVertex(_))),
        material_count,
    }
}
