use crate::config::{LayoutConfig, LayoutMode};
use crate::render::backend::Viewport;

/// Viewports rendered in one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameLayout {
    /// Preview tile `i` shows model `i`.
    pub previews: Vec<Viewport>,
    /// Full-size view of the focused model.
    pub focus: Option<Viewport>,
    /// Combined scene of all placed instances.
    pub scene: Option<Viewport>,
}

impl FrameLayout {
    pub fn from_config(config: &LayoutConfig, model_count: usize) -> Self {
        match config.mode {
            LayoutMode::Grid => Self::grid(config, model_count),
            LayoutMode::Focus => Self::focus(config),
        }
    }

    /// Preview tiles in a left-hand column grid, scene in the remaining area.
    ///
    /// Tiles are filled top-down; tiles that do not fit the canvas are dropped.
    pub fn grid(config: &LayoutConfig, model_count: usize) -> Self {
        let columns = config.columns.max(1);
        let tile = config.tile_size;
        let rows_fit = if tile == 0 {
            0
        } else {
            config.canvas_height / tile
        };
        let capacity = (rows_fit * columns) as usize;

        let previews = (0..model_count.min(capacity))
            .map(|i| {
                let (col, row) = (i as u32 % columns, i as u32 / columns);
                let top = config.canvas_height - row * tile;
                Viewport::new(col * tile, top - tile, tile, tile)
            })
            .collect();

        let strip = (columns * tile).min(config.canvas_width);
        let scene = Viewport::new(
            strip,
            0,
            config.canvas_width - strip,
            config.canvas_height,
        );

        Self {
            previews,
            focus: None,
            scene: Some(scene),
        }
    }

    /// A single full-canvas viewport for the focused model.
    pub fn focus(config: &LayoutConfig) -> Self {
        Self {
            previews: Vec::new(),
            focus: Some(Viewport::new(
                0,
                0,
                config.canvas_width,
                config.canvas_height,
            )),
            scene: None,
        }
    }

    pub fn viewport_count(&self) -> usize {
        self.previews.len() + self.focus.iter().count() + self.scene.iter().count()
    }
}
