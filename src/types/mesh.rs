use bytemuck::{Pod, Zeroable};

/// Per-vertex colour input of a geometry group.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorAttribute {
    /// Interleaved RGB per vertex: [r, g, b, r, g, b, ...]
    PerVertex(Vec<f32>),
    /// One RGBA value shared by every vertex.
    Constant([f32; 4]),
}

impl Default for ColorAttribute {
    fn default() -> Self {
        ColorAttribute::Constant([1.0, 1.0, 1.0, 1.0])
    }
}

/// One material-homogeneous group of triangles from a geometry file.
#[derive(Debug, Clone, Default)]
pub struct GeometryGroup {
    pub name: String,
    /// Material name referenced by `usemtl`, if any.
    pub material: Option<String>,
    /// Interleaved positions: [x, y, z, x, y, z, ...]
    pub positions: Vec<f32>,
    /// Interleaved normals: [nx, ny, nz, ...] or empty
    pub normals: Vec<f32>,
    pub colors: ColorAttribute,
    /// Triangle indices into the vertex buffers
    pub indices: Vec<u32>,
}

impl GeometryGroup {
    /// Number of vertices (positions / 3).
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of triangles (indices / 3).
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Fill `normals` by accumulating area-weighted face normals per vertex.
    pub fn compute_normals(&mut self) {
        let mut normals = vec![0.0_f32; self.positions.len()];

        for tri in self.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let p = |i: usize| {
                glam::Vec3::new(
                    self.positions[i * 3],
                    self.positions[i * 3 + 1],
                    self.positions[i * 3 + 2],
                )
            };
            let face = (p(b) - p(a)).cross(p(c) - p(a));
            for i in [a, b, c] {
                normals[i * 3] += face.x;
                normals[i * 3 + 1] += face.y;
                normals[i * 3 + 2] += face.z;
            }
        }

        for n in normals.chunks_exact_mut(3) {
            let v = glam::Vec3::new(n[0], n[1], n[2]).normalize_or_zero();
            n.copy_from_slice(&v.to_array());
        }

        self.normals = normals;
    }

    /// Pack positions, normals and colours into GPU-ready vertices.
    pub fn to_buffers(&self) -> GeometryBuffers {
        let vertices = (0..self.vertex_count())
            .map(|i| {
                let normal = if self.has_normals() {
                    [
                        self.normals[i * 3],
                        self.normals[i * 3 + 1],
                        self.normals[i * 3 + 2],
                    ]
                } else {
                    [0.0; 3]
                };
                let color = match &self.colors {
                    ColorAttribute::PerVertex(rgb) => {
                        [rgb[i * 3], rgb[i * 3 + 1], rgb[i * 3 + 2], 1.0]
                    }
                    ColorAttribute::Constant(rgba) => *rgba,
                };
                Vertex {
                    position: [
                        self.positions[i * 3],
                        self.positions[i * 3 + 1],
                        self.positions[i * 3 + 2],
                    ],
                    normal,
                    color,
                }
            })
            .collect();

        GeometryBuffers {
            vertices,
            indices: self.indices.clone(),
        }
    }
}

/// Interleaved vertex layout matching `a_position`, `a_normal`, `a_color`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
}

/// Vertex + index data handed to the renderer backend.
#[derive(Debug, Clone, Default)]
pub struct GeometryBuffers {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl GeometryBuffers {
    /// Raw vertex bytes for upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}
