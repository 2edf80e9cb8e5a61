use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::Parser;

/// Shading program applied to every draw of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ShadingMode {
    #[default]
    #[value(name = "phong")]
    Phong,
    #[value(name = "toon")]
    Toon,
}

impl ShadingMode {
    pub const ALL: [ShadingMode; 2] = [ShadingMode::Phong, ShadingMode::Toon];

    /// Position in [`ShadingMode::ALL`].
    pub fn index(self) -> usize {
        match self {
            ShadingMode::Phong => 0,
            ShadingMode::Toon => 1,
        }
    }
}

impl std::fmt::Display for ShadingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShadingMode::Phong => write!(f, "phong"),
            ShadingMode::Toon => write!(f, "toon"),
        }
    }
}

/// How the canvas is split into viewports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LayoutMode {
    /// Preview tiles for every model plus the combined scene.
    #[default]
    #[value(name = "grid")]
    Grid,
    /// The focused model alone, filling the canvas.
    #[value(name = "focus")]
    Focus,
}

impl std::fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutMode::Grid => write!(f, "grid"),
            LayoutMode::Focus => write!(f, "focus"),
        }
    }
}

/// Camera and lighting constants.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Model camera distance as a multiple of the bounding-box diagonal.
    pub radius_factor: f32,
    pub ambient_light: [f32; 3],
    pub scene_eye: [f32; 3],
    pub scene_near: f32,
    pub scene_far: f32,
    /// Preview spin rate in radians per second.
    pub preview_spin: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 55.0,
            radius_factor: 1.2,
            ambient_light: [0.1, 0.1, 0.1],
            scene_eye: [2.0, 2.0, 6.0],
            scene_near: 1.0,
            scene_far: 2000.0,
            preview_spin: 1.0,
        }
    }
}

/// Canvas and viewport geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub mode: LayoutMode,
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Edge length of a square preview tile in pixels.
    pub tile_size: u32,
    pub columns: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            mode: LayoutMode::Grid,
            canvas_width: 1280,
            canvas_height: 720,
            tile_size: 160,
            columns: 2,
        }
    }
}

/// A model to load: display name and geometry path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSpec {
    pub name: String,
    pub path: String,
}

impl FromStr for ModelSpec {
    type Err = String;

    /// `NAME=PATH`, or a bare `PATH` named after its file stem.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (name, path) = match s.split_once('=') {
            Some((name, path)) => (name.trim().to_string(), path.trim().to_string()),
            None => (model_name_from_path(s), s.trim().to_string()),
        };
        if name.is_empty() || path.is_empty() {
            return Err(format!("invalid model spec '{s}', expected NAME=PATH or PATH"));
        }
        Ok(ModelSpec { name, path })
    }
}

/// File stem of a geometry path: `models/tree_desert.obj` -> `tree_desert`.
pub fn model_name_from_path(path: &str) -> String {
    Path::new(path.trim())
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Fully resolved viewer configuration (constructed from CLI args).
#[derive(Debug, Clone, Default)]
pub struct ViewerConfig {
    /// Directory geometry paths are resolved against.
    pub asset_root: PathBuf,
    pub models: Vec<ModelSpec>,
    /// Model names to instantiate, in order.
    pub placements: Vec<String>,
    /// Total lights in the scene (the session starts with one).
    pub lights: usize,
    /// Scene transfer text to import after placements.
    pub scene_json: Option<String>,
    pub shading: ShadingMode,
    pub frames: u32,
    /// Simulated seconds between frames.
    pub frame_interval: f32,
    pub render: RenderConfig,
    pub layout: LayoutConfig,
    pub verbose: bool,
}

/// CLI argument definition (clap derive).
#[derive(Parser, Debug)]
#[command(
    name = "scene-viewer",
    about = "Headless multi-viewport scene viewer for OBJ models",
    version
)]
pub struct CliArgs {
    /// Model to load, as NAME=PATH or PATH (repeatable)
    #[arg(short = 'm', long = "model")]
    pub models: Vec<ModelSpec>,

    /// Directory model paths are relative to
    #[arg(long, default_value = ".")]
    pub asset_root: PathBuf,

    /// Place an instance of the named model (repeatable)
    #[arg(short = 'p', long = "place")]
    pub placements: Vec<String>,

    /// Number of point lights (1-5)
    #[arg(long, default_value_t = 1)]
    pub lights: usize,

    /// Scene JSON text to import
    #[arg(long)]
    pub scene_json: Option<String>,

    /// Shading model
    #[arg(long, value_enum, default_value = "phong")]
    pub shading: ShadingMode,

    /// Viewport layout
    #[arg(long, value_enum, default_value = "grid")]
    pub layout: LayoutMode,

    /// Frames to render
    #[arg(short = 'n', long, default_value_t = 1)]
    pub frames: u32,

    /// Canvas width in pixels
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Canvas height in pixels
    #[arg(long, default_value_t = 720)]
    pub height: u32,

    /// Vertical field of view in degrees
    #[arg(long, default_value_t = 55.0)]
    pub fov: f32,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl From<CliArgs> for ViewerConfig {
    fn from(args: CliArgs) -> Self {
        ViewerConfig {
            asset_root: args.asset_root,
            models: args.models,
            placements: args.placements,
            lights: args.lights,
            scene_json: args.scene_json,
            shading: args.shading,
            frames: args.frames,
            frame_interval: 1.0 / 60.0,
            render: RenderConfig {
                fov_degrees: args.fov,
                ..Default::default()
            },
            layout: LayoutConfig {
                mode: args.layout,
                canvas_width: args.width,
                canvas_height: args.height,
                ..Default::default()
            },
            verbose: args.verbose,
        }
    }
}
