pub mod config;
pub mod error;
pub mod ingestion;
pub mod render;
pub mod scene;
pub mod session;
pub mod types;
pub mod viewer;

pub use config::{LayoutConfig, RenderConfig, ShadingMode, ViewerConfig};
pub use error::{Result, SceneError};
pub use session::{Command, Outcome, Session};
pub use viewer::Viewer;
