//! Shader compilation and slot resolution.

use std::fmt;

use log::{debug, info, warn};

use crate::error::{PipelineError, Result};
use crate::gl::GlContext;

pub const CUBE_VERTEX_SOURCE: &str = include_str!("shaders/cube.vert");
pub const CUBE_FRAGMENT_SOURCE: &str = include_str!("shaders/cube.frag");
pub const FLAT_VERTEX_SOURCE: &str = include_str!("shaders/flat.vert");
pub const FLAT_FRAGMENT_SOURCE: &str = include_str!("shaders/flat.frag");
pub const COMBINED_VERTEX_SOURCE: &str = include_str!("shaders/combined.vert");
pub const COMBINED_FRAGMENT_SOURCE: &str = include_str!("shaders/combined.frag");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Resolved attribute location. Names that do not resolve keep the `-1`
/// sentinel and are skipped at draw time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttribSlot(i32);

impl AttribSlot {
    pub const INVALID: AttribSlot = AttribSlot(-1);

    pub fn from_raw(location: i32) -> Self {
        if location < 0 {
            Self::INVALID
        } else {
            AttribSlot(location)
        }
    }

    pub fn raw(self) -> i32 {
        self.0
    }

    pub fn index(self) -> Option<u32> {
        u32::try_from(self.0).ok()
    }

    pub fn is_valid(self) -> bool {
        self.0 >= 0
    }
}

/// How the transform reaches the vertex shader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UniformLayout {
    /// Projection and model-view as two uniforms.
    Separate { projection: String, model_view: String },
    /// One premultiplied `projection * model_view` uniform.
    Combined { matrix: String },
}

/// Symbolic names looked up in the linked program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramBindings {
    pub position: String,
    pub color: String,
    pub uniforms: UniformLayout,
}

impl Default for ProgramBindings {
    fn default() -> Self {
        Self {
            position: "aVertexPosition".into(),
            color: "aVertexColor".into(),
            uniforms: UniformLayout::Separate {
                projection: "uProjectionMatrix".into(),
                model_view: "uModelViewMatrix".into(),
            },
        }
    }
}

impl ProgramBindings {
    /// `a_vertex` / `a_color` with one `u_matrix` uniform, as declared by
    /// [`ShaderSources::COMBINED`].
    pub fn combined() -> Self {
        Self {
            position: "a_vertex".into(),
            color: "a_color".into(),
            uniforms: UniformLayout::Combined {
                matrix: "u_matrix".into(),
            },
        }
    }
}

/// Vertex and fragment source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaderSources<'a> {
    pub vertex: &'a str,
    pub fragment: &'a str,
}

impl ShaderSources<'static> {
    /// Position + color shaders for the colored cube.
    pub const CUBE: ShaderSources<'static> = ShaderSources {
        vertex: CUBE_VERTEX_SOURCE,
        fragment: CUBE_FRAGMENT_SOURCE,
    };

    /// Colored cube transformed by a single premultiplied matrix.
    pub const COMBINED: ShaderSources<'static> = ShaderSources {
        vertex: COMBINED_VERTEX_SOURCE,
        fragment: COMBINED_FRAGMENT_SOURCE,
    };

    /// Position-only shaders; the color attribute does not exist in them.
    pub const FLAT: ShaderSources<'static> = ShaderSources {
        vertex: FLAT_VERTEX_SOURCE,
        fragment: FLAT_FRAGMENT_SOURCE,
    };
}

pub enum UniformSlots<U> {
    Separate {
        projection: Option<U>,
        model_view: Option<U>,
    },
    Combined(Option<U>),
}

/// A linked program and every slot the frame renderer needs.
pub struct ShaderProgram<G: GlContext> {
    program: G::Program,
    position: AttribSlot,
    color: AttribSlot,
    uniforms: UniformSlots<G::UniformLocation>,
}

impl<G: GlContext> ShaderProgram<G> {
    pub fn program(&self) -> &G::Program {
        &self.program
    }

    pub fn position_slot(&self) -> AttribSlot {
        self.position
    }

    pub fn color_slot(&self) -> AttribSlot {
        self.color
    }

    pub fn uniforms(&self) -> &UniformSlots<G::UniformLocation> {
        &self.uniforms
    }
}

/// Compiles both stages, links them and resolves the slots named by
/// `bindings`. Nothing is linked if either stage fails.
pub fn compile<G: GlContext>(
    gl: &G,
    sources: ShaderSources<'_>,
    bindings: &ProgramBindings,
) -> Result<ShaderProgram<G>> {
    let vertex = load_shader(gl, ShaderStage::Vertex, sources.vertex)?;
    let fragment = match load_shader(gl, ShaderStage::Fragment, sources.fragment) {
        Ok(shader) => shader,
        Err(e) => {
            gl.delete_shader(&vertex);
            return Err(e);
        }
    };

    let Some(program) = gl.create_program() else {
        gl.delete_shader(&vertex);
        gl.delete_shader(&fragment);
        return Err(PipelineError::ResourceCreation("program"));
    };
    gl.attach_shader(&program, &vertex);
    gl.attach_shader(&program, &fragment);
    gl.link_program(&program);

    // Attached shaders are only flagged here and go away with the program.
    gl.delete_shader(&vertex);
    gl.delete_shader(&fragment);

    if !gl.program_linked(&program) {
        let log = gl.program_info_log(&program).unwrap_or_default();
        gl.delete_program(&program);
        return Err(PipelineError::ProgramLink { log });
    }
    info!("shader program linked");

    let position = resolve_attrib(gl, &program, &bindings.position);
    let color = resolve_attrib(gl, &program, &bindings.color);
    let uniforms = match &bindings.uniforms {
        UniformLayout::Separate {
            projection,
            model_view,
        } => UniformSlots::Separate {
            projection: resolve_uniform(gl, &program, projection),
            model_view: resolve_uniform(gl, &program, model_view),
        },
        UniformLayout::Combined { matrix } => {
            UniformSlots::Combined(resolve_uniform(gl, &program, matrix))
        }
    };

    Ok(ShaderProgram {
        program,
        position,
        color,
        uniforms,
    })
}

fn load_shader<G: GlContext>(gl: &G, stage: ShaderStage, source: &str) -> Result<G::Shader> {
    let shader = gl
        .create_shader(stage)
        .ok_or(PipelineError::ResourceCreation("shader"))?;
    gl.shader_source(&shader, &strip_comments(source));
    gl.compile_shader(&shader);

    if !gl.shader_compiled(&shader) {
        let log = gl.shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(&shader);
        return Err(PipelineError::ShaderCompile { stage, log });
    }
    debug!("{stage} shader compiled");
    Ok(shader)
}

fn resolve_attrib<G: GlContext>(gl: &G, program: &G::Program, name: &str) -> AttribSlot {
    let slot = AttribSlot::from_raw(gl.get_attrib_location(program, name));
    if slot.is_valid() {
        debug!("attribute {name} -> {}", slot.raw());
    } else {
        warn!("attribute {name} not found in program, it will be skipped");
    }
    slot
}

fn resolve_uniform<G: GlContext>(
    gl: &G,
    program: &G::Program,
    name: &str,
) -> Option<G::UniformLocation> {
    let location = gl.get_uniform_location(program, name);
    if location.is_none() {
        warn!("uniform {name} not found in program, it will not be uploaded");
    }
    location
}

/// Removes `/* ... */` and `// ...` comments so driver logs only show code.
pub fn strip_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;
    while let Some(start) = rest.find('/') {
        let (code, tail) = rest.split_at(start);
        out.push_str(code);
        if let Some(body) = tail.strip_prefix("/*") {
            rest = match body.find("*/") {
                Some(end) => &body[end + 2..],
                None => "",
            };
        } else if tail.starts_with("//") {
            rest = match tail.find('\n') {
                Some(end) => &tail[end..],
                None => "",
            };
        } else {
            out.push('/');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}
