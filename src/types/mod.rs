pub mod bounds;
pub mod material;
pub mod mesh;

pub use bounds::BoundingBox;
pub use material::{Material, RawMaterial, DEFAULT_SHININESS};
pub use mesh::{ColorAttribute, GeometryBuffers, GeometryGroup, Vertex};
