use glam::Mat4;
use tracing::{debug, warn};

use crate::config::{RenderConfig, ShadingMode};
use crate::error::Result;
use crate::render::backend::{ProgramHandle, RendererBackend, UniformValue, Uniforms, Viewport};
use crate::render::camera::Camera;
use crate::render::layout::FrameLayout;
use crate::render::{shaders, transform};
use crate::scene::{LightSet, LightSnapshot, Model, ModelRegistry, Part, SceneStore};
use crate::types::Material;

/// Everything a frame reads. Borrowed for the duration of one frame.
#[derive(Debug, Clone, Copy)]
pub struct SceneView<'a> {
    pub registry: &'a ModelRegistry,
    pub store: &'a SceneStore,
    pub lights: &'a LightSet,
    pub shading: ShadingMode,
    pub focus: Option<usize>,
}

/// Counters for one rendered frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub viewports: usize,
    pub draws: usize,
    /// Drawables that failed and were left out of the frame.
    pub skipped: usize,
}

impl std::ops::AddAssign for FrameStats {
    fn add_assign(&mut self, rhs: Self) {
        self.viewports += rhs.viewports;
        self.draws += rhs.draws;
        self.skipped += rhs.skipped;
    }
}

/// Per-frame render driver with one pre-compiled program per shading mode.
#[derive(Debug, Clone)]
pub struct Renderer {
    programs: [ProgramHandle; ShadingMode::ALL.len()],
    config: RenderConfig,
}

impl Renderer {
    /// Compile every shading program up front.
    pub fn new(backend: &mut dyn RendererBackend, config: RenderConfig) -> Result<Self> {
        let phong = backend.compile_program(shaders::VERTEX, shaders::PHONG_FRAGMENT)?;
        let toon = backend.compile_program(shaders::VERTEX, shaders::TOON_FRAGMENT)?;
        debug!(phong = phong.0, toon = toon.0, "Compiled shading programs");
        Ok(Self {
            programs: [phong, toon],
            config,
        })
    }

    pub fn program(&self, mode: ShadingMode) -> ProgramHandle {
        self.programs[mode.index()]
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Draw every viewport of `layout`. `time` is in seconds.
    ///
    /// The shading mode is read once here, so a switch applies from the next
    /// frame on. Failures skip the affected drawable or viewport only.
    pub fn render_frame(
        &self,
        backend: &mut dyn RendererBackend,
        view: &SceneView<'_>,
        layout: &FrameLayout,
        time: f32,
    ) -> FrameStats {
        let program = self.program(view.shading);
        let lights = view.lights.snapshot();
        let spin = time * self.config.preview_spin;
        let mut stats = FrameStats::default();

        for (index, viewport) in layout.previews.iter().enumerate() {
            let Ok(model) = view.registry.get(index) else {
                break;
            };
            self.draw_model(backend, program, &lights, model, *viewport, spin, &mut stats);
        }

        if let (Some(viewport), Some(index)) = (layout.focus, view.focus) {
            match view.registry.get(index) {
                Ok(model) => {
                    self.draw_model(backend, program, &lights, model, viewport, spin, &mut stats)
                }
                Err(e) => warn!(%e, "Focused model unavailable"),
            }
        }

        if let Some(viewport) = layout.scene {
            self.draw_scene(backend, program, &lights, view, viewport, &mut stats);
        }

        stats
    }

    /// One model at its natural scale, spinning about Y.
    #[allow(clippy::too_many_arguments)]
    fn draw_model(
        &self,
        backend: &mut dyn RendererBackend,
        program: ProgramHandle,
        lights: &LightSnapshot<'_>,
        model: &Model,
        viewport: Viewport,
        angle: f32,
        stats: &mut FrameStats,
    ) {
        let Some(aspect) = viewport.aspect() else {
            return;
        };
        let camera = Camera::for_model(model.bounds(), aspect, &self.config);
        if !self.begin_viewport(backend, program, lights, &camera, viewport) {
            return;
        }
        stats.viewports += 1;

        let world = transform::preview_world(model.offset(), angle);
        for part in model.parts() {
            self.draw_part(backend, program, part, &part.material, world, stats);
        }
    }

    /// Every placed instance through the fixed scene camera.
    fn draw_scene(
        &self,
        backend: &mut dyn RendererBackend,
        program: ProgramHandle,
        lights: &LightSnapshot<'_>,
        view: &SceneView<'_>,
        viewport: Viewport,
        stats: &mut FrameStats,
    ) {
        let Some(aspect) = viewport.aspect() else {
            return;
        };
        let camera = Camera::for_scene(aspect, &self.config);
        if !self.begin_viewport(backend, program, lights, &camera, viewport) {
            return;
        }
        stats.viewports += 1;

        for (key, instance) in view.store.iter() {
            let model = match view.registry.get(instance.model_index) {
                Ok(model) => model,
                Err(e) => {
                    warn!(key, %e, "Skipping instance");
                    stats.skipped += 1;
                    continue;
                }
            };

            let world = instance.world_matrix(model.offset());
            for (i, part) in model.parts().iter().enumerate() {
                let Some(material) = instance.materials.get(i) else {
                    warn!(key, part = i, "Instance has no material for part");
                    stats.skipped += 1;
                    continue;
                };
                self.draw_part(backend, program, part, material, world, stats);
            }
        }
    }

    /// Set the viewport and push the uniforms shared by all its draws.
    fn begin_viewport(
        &self,
        backend: &mut dyn RendererBackend,
        program: ProgramHandle,
        lights: &LightSnapshot<'_>,
        camera: &Camera,
        viewport: Viewport,
    ) -> bool {
        backend.set_viewport(viewport);
        let uniforms = shared_uniforms(camera, lights, self.config.ambient_light);
        match backend.set_uniforms(program, &uniforms) {
            Ok(()) => true,
            Err(e) => {
                warn!(%e, ?viewport, "Skipping viewport");
                false
            }
        }
    }

    fn draw_part(
        &self,
        backend: &mut dyn RendererBackend,
        program: ProgramHandle,
        part: &Part,
        material: &Material,
        world: Mat4,
        stats: &mut FrameStats,
    ) {
        let result = backend
            .set_uniforms(program, &draw_uniforms(world, material))
            .and_then(|()| backend.bind_and_draw(part.geometry, program));
        match result {
            Ok(()) => stats.draws += 1,
            Err(e) => {
                warn!(%e, part = %part.name, "Skipping draw");
                stats.skipped += 1;
            }
        }
    }
}

/// Uniforms pushed once per viewport.
pub fn shared_uniforms(
    camera: &Camera,
    lights: &LightSnapshot<'_>,
    ambient_light: [f32; 3],
) -> Uniforms {
    vec![
        ("u_ambientLight", UniformValue::Vec3(ambient_light)),
        ("u_lightPosition", UniformValue::FloatArray(lights.positions.to_vec())),
        ("u_lightColor", UniformValue::FloatArray(lights.colors.to_vec())),
        ("u_lightIntensity", UniformValue::FloatArray(lights.intensities.to_vec())),
        ("u_numLights", UniformValue::Int(lights.count as i32)),
        ("u_view", UniformValue::Mat4(camera.view().to_cols_array())),
        ("u_projection", UniformValue::Mat4(camera.projection().to_cols_array())),
        ("u_viewWorldPosition", UniformValue::Vec3(camera.eye.to_array())),
    ]
}

/// Uniforms pushed before each draw.
pub fn draw_uniforms(world: Mat4, material: &Material) -> Uniforms {
    vec![
        ("u_world", UniformValue::Mat4(world.to_cols_array())),
        ("diffuse", UniformValue::Vec3(material.diffuse_rgb())),
        ("ambient", UniformValue::Vec3(material.ambient)),
        ("specular", UniformValue::Vec3(material.specular)),
        ("emissive", UniformValue::Vec3(material.emissive)),
        ("shininess", UniformValue::Float(material.shininess)),
        ("opacity", UniformValue::Float(material.opacity)),
    ]
}
