pub mod instance;
pub mod light;
pub mod model;
pub mod transfer;

pub use instance::{ObjectInstance, SceneStore};
pub use light::{AddLight, Light, LightField, LightSet, LightSnapshot};
pub use model::{LoadedModel, Model, ModelRegistry, Part};

/// Size of the shader light arrays.
pub const MAX_LIGHTS: usize = 5;

/// Spatial axis selector for per-component edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Colour channel selector for per-component edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }
}
