//! Multi-viewport rendering on top of an abstract GPU backend.

pub mod backend;
pub mod camera;
pub mod frame;
pub mod layout;
pub mod lighting;
pub mod recording;
pub mod shaders;
pub mod transform;

pub use crate::config::ShadingMode;
pub use backend::{GeometryHandle, ProgramHandle, RendererBackend, UniformValue, Viewport};
pub use camera::Camera;
pub use frame::{FrameStats, Renderer, SceneView};
pub use layout::FrameLayout;
pub use recording::{RecordedCommand, RecordingBackend};
