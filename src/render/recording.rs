use std::collections::HashSet;

use tracing::debug;

use crate::error::{Result, SceneError};
use crate::render::backend::{
    GeometryHandle, ProgramHandle, RendererBackend, UniformValue, Viewport,
};
use crate::types::GeometryBuffers;

/// One command received by a [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCommand {
    CompileProgram(ProgramHandle),
    CreateGeometry {
        handle: GeometryHandle,
        vertices: usize,
        indices: usize,
        /// Size of the packed vertex buffer.
        bytes: usize,
    },
    SetViewport(Viewport),
    SetUniforms {
        program: ProgramHandle,
        uniforms: Vec<(&'static str, UniformValue)>,
    },
    Draw {
        geometry: GeometryHandle,
        program: ProgramHandle,
    },
}

/// Headless backend that validates handles and records every command.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    commands: Vec<RecordedCommand>,
    programs: u32,
    geometries: Vec<(usize, usize)>,
    poisoned: HashSet<GeometryHandle>,
    fail_geometry_uploads: bool,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every command since construction or the last [`clear_log`](Self::clear_log).
    pub fn commands(&self) -> &[RecordedCommand] {
        &self.commands
    }

    /// Drop the command log; handles stay valid.
    pub fn clear_log(&mut self) {
        self.commands.clear();
    }

    pub fn program_count(&self) -> u32 {
        self.programs
    }

    pub fn geometry_count(&self) -> usize {
        self.geometries.len()
    }

    /// Vertex and index counts of an uploaded geometry.
    pub fn geometry_info(&self, handle: GeometryHandle) -> Option<(usize, usize)> {
        self.geometries.get(handle.0 as usize).copied()
    }

    /// Draw calls in submission order.
    pub fn draws(&self) -> impl Iterator<Item = (GeometryHandle, ProgramHandle)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            RecordedCommand::Draw { geometry, program } => Some((*geometry, *program)),
            _ => None,
        })
    }

    /// Viewports in submission order.
    pub fn viewports(&self) -> impl Iterator<Item = Viewport> + '_ {
        self.commands.iter().filter_map(|c| match c {
            RecordedCommand::SetViewport(v) => Some(*v),
            _ => None,
        })
    }

    /// Every value set for `name`, in submission order.
    pub fn uniform_history<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a UniformValue> + 'a {
        self.commands.iter().flat_map(move |c| match c {
            RecordedCommand::SetUniforms { uniforms, .. } => uniforms
                .iter()
                .filter(|(n, _)| *n == name)
                .map(|(_, v)| v)
                .collect::<Vec<_>>(),
            _ => Vec::new(),
        })
    }

    /// Make every draw of `handle` fail.
    pub fn poison_geometry(&mut self, handle: GeometryHandle) {
        self.poisoned.insert(handle);
    }

    /// Make every subsequent geometry upload fail.
    pub fn fail_geometry_uploads(&mut self, fail: bool) {
        self.fail_geometry_uploads = fail;
    }

    fn check_program(&self, program: ProgramHandle) -> Result<()> {
        if program.0 < self.programs {
            Ok(())
        } else {
            Err(SceneError::Backend(format!("Unknown program {}", program.0)))
        }
    }
}

impl RendererBackend for RecordingBackend {
    fn compile_program(
        &mut self,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<ProgramHandle> {
        for (stage, source) in [("vertex", vertex_source), ("fragment", fragment_source)] {
            if !source.contains("void main") {
                return Err(SceneError::Backend(format!(
                    "{stage} shader has no entry point"
                )));
            }
        }

        let handle = ProgramHandle(self.programs);
        self.programs += 1;
        self.commands.push(RecordedCommand::CompileProgram(handle));
        debug!(program = handle.0, "Compiled program");
        Ok(handle)
    }

    fn create_geometry(&mut self, buffers: &GeometryBuffers) -> Result<GeometryHandle> {
        if self.fail_geometry_uploads {
            return Err(SceneError::Backend("Geometry upload rejected".into()));
        }
        if let Some(&bad) = buffers
            .indices
            .iter()
            .find(|&&i| i as usize >= buffers.vertices.len())
        {
            return Err(SceneError::Backend(format!(
                "Index {bad} out of bounds for {} vertices",
                buffers.vertices.len()
            )));
        }

        let bytes = buffers.vertex_bytes().len();
        let handle = GeometryHandle(self.geometries.len() as u32);
        self.geometries
            .push((buffers.vertices.len(), buffers.indices.len()));
        self.commands.push(RecordedCommand::CreateGeometry {
            handle,
            vertices: buffers.vertices.len(),
            indices: buffers.indices.len(),
            bytes,
        });
        debug!(geometry = handle.0, bytes, "Uploaded geometry");
        Ok(handle)
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.commands.push(RecordedCommand::SetViewport(viewport));
    }

    fn set_uniforms(
        &mut self,
        program: ProgramHandle,
        uniforms: &[(&'static str, UniformValue)],
    ) -> Result<()> {
        self.check_program(program)?;
        self.commands.push(RecordedCommand::SetUniforms {
            program,
            uniforms: uniforms.to_vec(),
        });
        Ok(())
    }

    fn bind_and_draw(&mut self, geometry: GeometryHandle, program: ProgramHandle) -> Result<()> {
        self.check_program(program)?;
        if geometry.0 as usize >= self.geometries.len() {
            return Err(SceneError::Backend(format!(
                "Unknown geometry {}",
                geometry.0
            )));
        }
        if self.poisoned.contains(&geometry) {
            return Err(SceneError::Backend(format!(
                "Geometry {} lost",
                geometry.0
            )));
        }
        self.commands
            .push(RecordedCommand::Draw { geometry, program });
        Ok(())
    }
}
