use log::info;

use crate::buffers::{self, GpuBuffers};
use crate::config::Config;
use crate::error::Result;
use crate::gl::GlContext;
use crate::mesh::Mesh;
use crate::renderer::draw_frame;
use crate::shader::{self, ShaderProgram, ShaderSources};
use crate::transform::{Angles, FrameState, Matrices, TransformSettings};

/// Everything one rendering session owns: the linked program, the uploaded
/// geometry and the rotation state.
pub struct Session<G: GlContext> {
    program: ShaderProgram<G>,
    buffers: GpuBuffers<G>,
    transform: TransformSettings,
    state: FrameState,
}

impl<G: GlContext> Session<G> {
    /// Compiles the program and uploads `mesh`. Either step failing is fatal.
    pub fn new(gl: &G, mesh: &Mesh, sources: ShaderSources<'_>, config: &Config) -> Result<Self> {
        let program = shader::compile(gl, sources, &config.bindings)?;
        let buffers = buffers::upload(gl, mesh)?;
        info!(
            "session ready: {} vertices, rotation {:?}",
            mesh.vertex_count(),
            config.rotation
        );

        Ok(Self {
            program,
            buffers,
            transform: config.transform,
            state: FrameState::new(config.rotation),
        })
    }

    pub fn advance(&mut self, delta_seconds: f64) {
        self.state.advance(delta_seconds);
    }

    pub fn set_angles(&mut self, angles: Angles) -> bool {
        self.state.set_angles(angles)
    }

    pub fn frame_state(&self) -> &FrameState {
        &self.state
    }

    pub fn program(&self) -> &ShaderProgram<G> {
        &self.program
    }

    pub fn buffers(&self) -> &GpuBuffers<G> {
        &self.buffers
    }

    pub fn matrices(&self, aspect_ratio: f32) -> Matrices {
        self.transform.matrices(aspect_ratio, &self.state)
    }

    pub fn render(&self, gl: &G, aspect_ratio: f32) {
        draw_frame(gl, &self.program, &self.buffers, &self.matrices(aspect_ratio));
    }
}
