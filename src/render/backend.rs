use crate::error::Result;
use crate::types::GeometryBuffers;

/// Opaque handle to a linked shading program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramHandle(pub u32);

/// Opaque handle to uploaded vertex/index buffers and their vertex array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryHandle(pub u32);

/// Scissored render target rectangle, origin at the bottom-left of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Width / height, or `None` for a degenerate rectangle.
    pub fn aspect(&self) -> Option<f32> {
        if self.width == 0 || self.height == 0 {
            None
        } else {
            Some(self.width as f32 / self.height as f32)
        }
    }
}

/// A single uniform value.
#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    Int(i32),
    Float(f32),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
    /// Column-major 4x4 matrix.
    Mat4([f32; 16]),
    /// Flat array backing `vec3[]` / `float[]` uniforms.
    FloatArray(Vec<f32>),
}

/// Uniform name/value pairs for one `set_uniforms` call.
pub type Uniforms = Vec<(&'static str, UniformValue)>;

/// The GPU layer the scene core drives.
///
/// Implementations own every raw GPU resource; the core only holds handles.
pub trait RendererBackend {
    fn compile_program(&mut self, vertex_source: &str, fragment_source: &str)
    -> Result<ProgramHandle>;

    fn create_geometry(&mut self, buffers: &GeometryBuffers) -> Result<GeometryHandle>;

    /// Restrict drawing (viewport + scissor) to `viewport`.
    fn set_viewport(&mut self, viewport: Viewport);

    fn set_uniforms(&mut self, program: ProgramHandle, uniforms: &[(&'static str, UniformValue)])
    -> Result<()>;

    /// Bind the geometry's vertex array and issue one indexed draw.
    fn bind_and_draw(&mut self, geometry: GeometryHandle, program: ProgramHandle) -> Result<()>;
}
