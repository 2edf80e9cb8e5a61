use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Shininess used when a material library omits `Ns`.
pub const DEFAULT_SHININESS: f32 = 400.0;

/// Resolved surface material, fed to the shading programs as uniforms.
///
/// Serialized field names match the uniform names (`diffuse`, `ambient`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Diffuse colour [r, g, b, a]. Three-component input gets alpha 1.
    #[serde(deserialize_with = "deserialize_color")]
    pub diffuse: [f32; 4],
    pub ambient: [f32; 3],
    pub specular: [f32; 3],
    #[serde(default)]
    pub emissive: [f32; 3],
    pub shininess: f32,
    pub opacity: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            diffuse: [1.0, 1.0, 1.0, 1.0],
            ambient: [0.0, 0.0, 0.0],
            specular: [1.0, 1.0, 1.0],
            emissive: [0.0, 0.0, 0.0],
            shininess: DEFAULT_SHININESS,
            opacity: 1.0,
        }
    }
}

impl Material {
    /// Diffuse colour without alpha.
    pub fn diffuse_rgb(&self) -> [f32; 3] {
        [self.diffuse[0], self.diffuse[1], self.diffuse[2]]
    }
}

/// Material record as parsed from a material library: every field optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawMaterial {
    pub name: String,
    pub diffuse: Option<[f32; 3]>,
    pub ambient: Option<[f32; 3]>,
    pub specular: Option<[f32; 3]>,
    pub emissive: Option<[f32; 3]>,
    pub shininess: Option<f32>,
    pub opacity: Option<f32>,
}

impl RawMaterial {
    /// Fill absent fields from [`Material::default`]. Parsed values win.
    pub fn resolve(&self) -> Material {
        let defaults = Material::default();
        Material {
            diffuse: self
                .diffuse
                .map(|[r, g, b]| [r, g, b, 1.0])
                .unwrap_or(defaults.diffuse),
            ambient: self.ambient.unwrap_or(defaults.ambient),
            specular: self.specular.unwrap_or(defaults.specular),
            emissive: self.emissive.unwrap_or(defaults.emissive),
            shininess: self.shininess.unwrap_or(defaults.shininess),
            opacity: self.opacity.unwrap_or(defaults.opacity),
        }
    }
}

fn deserialize_color<'de, D>(deserializer: D) -> std::result::Result<[f32; 4], D::Error>
where
    D: Deserializer<'de>,
{
    let components = Vec::<f32>::deserialize(deserializer)?;
    match components.as_slice() {
        [r, g, b] => Ok([*r, *g, *b, 1.0]),
        [r, g, b, a] => Ok([*r, *g, *b, *a]),
        other => Err(D::Error::invalid_length(other.len(), &"3 or 4 colour components")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn material_defaults() {
        let mat = Material::default();
        assert_eq!(mat.diffuse, [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(mat.ambient, [0.0, 0.0, 0.0]);
        assert_eq!(mat.specular, [1.0, 1.0, 1.0]);
        assert_eq!(mat.emissive, [0.0, 0.0, 0.0]);
        assert_eq!(mat.shininess, 400.0);
        assert_eq!(mat.opacity, 1.0);
    }

    #[test]
    fn resolve_fills_missing_shininess() {
        let raw = RawMaterial {
            name: "wood".into(),
            diffuse: Some([0.5, 0.25, 0.1]),
            ambient: Some([0.1, 0.1, 0.1]),
            specular: Some([0.2, 0.2, 0.2]),
            opacity: Some(0.75),
            ..Default::default()
        };

        let mat = raw.resolve();
        assert_eq!(mat.shininess, DEFAULT_SHININESS);
        assert_eq!(mat.diffuse, [0.5, 0.25, 0.1, 1.0]);
        assert_eq!(mat.ambient, [0.1, 0.1, 0.1]);
        assert_eq!(mat.specular, [0.2, 0.2, 0.2]);
        assert_eq!(mat.opacity, 0.75);
        assert_eq!(mat.emissive, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn resolve_empty_is_default() {
        assert_eq!(RawMaterial::default().resolve(), Material::default());
    }

    #[test]
    fn deserialize_three_component_diffuse() {
        let json = r#"{"diffuse":[0.1,0.2,0.3],"ambient":[0,0,0],"specular":[1,1,1],"shininess":10,"opacity":1}"#;
        let mat: Material = serde_json::from_str(json).unwrap();
        assert_eq!(mat.diffuse, [0.1, 0.2, 0.3, 1.0]);
        assert_eq!(mat.emissive, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn deserialize_rejects_two_component_diffuse() {
        let json = r#"{"diffuse":[0.1,0.2],"ambient":[0,0,0],"specular":[1,1,1],"shininess":10,"opacity":1}"#;
        assert!(serde_json::from_str::<Material>(json).is_err());
    }
}
