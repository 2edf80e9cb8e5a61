use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{Result, SceneError};
use crate::ingestion::source::{ModelSource, resolve_relative};
use crate::types::{ColorAttribute, GeometryGroup, RawMaterial};

/// Geometry groups plus the material records they reference by name.
#[derive(Debug, Default)]
pub struct ParsedObj {
    pub groups: Vec<GeometryGroup>,
    pub materials: HashMap<String, RawMaterial>,
}

/// Fetch and parse an OBJ file and every MTL library it references.
///
/// Libraries are resolved relative to `path`. A missing or malformed library
/// fails the whole parse.
pub fn parse_obj(source: &dyn ModelSource, path: &str) -> Result<ParsedObj> {
    let text = source.fetch(path)?;

    let load_mtl = |mtl: &Path| {
        let resolved = resolve_relative(path, &mtl.to_string_lossy());
        let mtl_text = source.fetch(&resolved).map_err(|e| {
            warn!(%e, path = %resolved, "Material library unavailable");
            tobj::LoadError::OpenFileFailed
        })?;
        tobj::load_mtl_buf(&mut mtl_text.as_bytes())
    };

    let (models, materials_result) =
        tobj::load_obj_buf(&mut text.as_bytes(), &tobj::GPU_LOAD_OPTIONS, load_mtl)
            .map_err(|e| SceneError::Load(format!("Failed to parse {path}: {e}")))?;

    let tobj_materials = materials_result.map_err(|e| {
        SceneError::Load(format!("Failed to load material library for {path}: {e}"))
    })?;

    debug!(
        path,
        groups = models.len(),
        materials = tobj_materials.len(),
        "Parsed OBJ"
    );

    let groups = models
        .into_iter()
        .map(|model| {
            let material = model
                .mesh
                .material_id
                .and_then(|id| tobj_materials.get(id))
                .map(|m| m.name.clone());
            convert_group(model.name, model.mesh, material)
        })
        .filter(|group| {
            let keep = !group.is_empty() && !group.indices.is_empty();
            if !keep {
                debug!(group = %group.name, "Dropping group without triangles");
            }
            keep
        })
        .collect();

    let materials = tobj_materials
        .iter()
        .map(|m| (m.name.clone(), convert_material(m)))
        .collect();

    Ok(ParsedObj { groups, materials })
}

/// Convert a `tobj::Mesh` into a [`GeometryGroup`].
///
/// Vertex colours are kept only when they cover every vertex; missing normals
/// are synthesized from the faces.
fn convert_group(name: String, mesh: tobj::Mesh, material: Option<String>) -> GeometryGroup {
    let colors = if !mesh.vertex_color.is_empty() && mesh.vertex_color.len() == mesh.positions.len()
    {
        ColorAttribute::PerVertex(mesh.vertex_color)
    } else {
        ColorAttribute::default()
    };

    let mut group = GeometryGroup {
        name,
        material,
        positions: mesh.positions,
        normals: mesh.normals,
        colors,
        indices: mesh.indices,
    };

    if group.normals.len() != group.positions.len() {
        debug!(group = %group.name, "Synthesizing normals");
        group.compute_normals();
    }
    group
}

/// Copy the fields a material library actually set; absent ones stay `None`.
fn convert_material(mat: &tobj::Material) -> RawMaterial {
    RawMaterial {
        name: mat.name.clone(),
        diffuse: mat.diffuse,
        ambient: mat.ambient,
        specular: mat.specular,
        emissive: mat.unknown_param.get("Ke").and_then(|v| parse_vec3(v)),
        shininess: mat.shininess,
        opacity: mat.dissolve,
    }
}

fn parse_vec3(value: &str) -> Option<[f32; 3]> {
    let mut parts = value.split_whitespace().map(str::parse::<f32>);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(Ok(x)), Some(Ok(y)), Some(Ok(z))) => Some([x, y, z]),
        _ => None,
    }
}
