use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::config::ViewerConfig;
use crate::error::{Result, SceneError};
use crate::ingestion::FileSource;
use crate::render::{FrameLayout, FrameStats, RecordingBackend, Renderer};
use crate::scene::MAX_LIGHTS;
use crate::session::{Command, Outcome, Session};

/// Summary of a completed headless run.
#[derive(Debug)]
pub struct RunSummary {
    pub frames: u32,
    /// Totals over every rendered frame.
    pub stats: FrameStats,
    pub models_loaded: usize,
    pub load_failures: usize,
    pub instances: usize,
    pub lights: usize,
    pub scene_json: String,
    pub duration: Duration,
}

/// Headless driver: load, place, light, import, then render frames.
pub struct Viewer;

impl Viewer {
    pub fn run(config: &ViewerConfig) -> Result<RunSummary> {
        let start = Instant::now();
        if config.lights > MAX_LIGHTS {
            return Err(SceneError::LightCapExceeded);
        }

        let source = FileSource::new(&config.asset_root);
        let mut backend = RecordingBackend::new();
        let mut session = Session::new();

        info!(models = config.models.len(), "Stage 1/4: Loading models");
        let mut load_failures = 0;
        for model in &config.models {
            if let Err(e) = session.load_model(&source, &mut backend, &model.name, &model.path) {
                warn!(model = %model.name, path = %model.path, %e, "Model failed to load");
                load_failures += 1;
            }
        }

        info!("Stage 2/4: Building scene");
        Self::populate(config, &mut session)?;

        info!(frames = config.frames, "Stage 3/4: Rendering");
        let renderer = Renderer::new(&mut backend, config.render.clone())?;
        let layout = FrameLayout::from_config(&config.layout, session.registry().len());
        let mut stats = FrameStats::default();
        for frame in 0..config.frames {
            let time = frame as f32 * config.frame_interval;
            stats += renderer.render_frame(&mut backend, &session.view(), &layout, time);
        }

        info!("Stage 4/4: Exporting scene");
        let scene_json = session.export_scene()?;

        let duration = start.elapsed();
        info!(
            draws = stats.draws,
            skipped = stats.skipped,
            elapsed = ?duration,
            "Run complete"
        );

        Ok(RunSummary {
            frames: config.frames,
            stats,
            models_loaded: session.registry().len(),
            load_failures,
            instances: session.store().len(),
            lights: session.lights().len(),
            scene_json,
            duration,
        })
    }

    /// Apply placements, extra lights, the scene import and the shading mode.
    fn populate(config: &ViewerConfig, session: &mut Session) -> Result<()> {
        for name in &config.placements {
            let Some(model) = session.registry().find(name).map(|m| m.index()) else {
                warn!(model = %name, "Cannot place unknown model");
                continue;
            };
            if let Outcome::Placed(key) = session.dispatch(Command::PlaceModel { model })?.outcome
            {
                info!(key = %key, "Placed");
            }
        }

        for _ in session.lights().len()..config.lights {
            session.dispatch(Command::AddLight)?;
        }

        if let Some(text) = &config.scene_json {
            session.dispatch(Command::ImportScene { text: text.clone() })?;
        }

        session.dispatch(Command::SelectShading(config.shading))?;
        Ok(())
    }
}
