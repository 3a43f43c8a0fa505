//! The slice of the WebGL call surface the pipeline drives.
//!
//! Gl primitives stay behind this trait so the pipeline itself is target
//! independent: the browser implements it on `WebGl2RenderingContext`, tests
//! implement it with a call recorder.

use crate::shader::ShaderStage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferTarget {
    Array,
    ElementArray,
}

/// Buffer contents together with their component type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BufferData<'a> {
    F32(&'a [f32]),
    U8(&'a [u8]),
    U16(&'a [u16]),
}

impl BufferData<'_> {
    pub fn byte_len(&self) -> usize {
        match self {
            BufferData::F32(d) => std::mem::size_of_val(*d),
            BufferData::U8(d) => d.len(),
            BufferData::U16(d) => std::mem::size_of_val(*d),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentType {
    Float,
    UnsignedByte,
    UnsignedShort,
}

/// How one attribute is pulled out of its bound `ARRAY_BUFFER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttribLayout {
    pub size: i32,
    pub component: ComponentType,
    pub normalized: bool,
    pub stride: i32,
    pub offset: i32,
}

impl AttribLayout {
    /// Tightly packed stream starting at offset 0.
    pub const fn packed(size: i32, component: ComponentType, normalized: bool) -> Self {
        Self {
            size,
            component,
            normalized,
            stride: 0,
            offset: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    Triangles,
    TriangleStrip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthFunc {
    Less,
    Lequal,
}

pub trait GlContext {
    type Shader;
    type Program;
    type Buffer;
    type UniformLocation;

    fn create_shader(&self, stage: ShaderStage) -> Option<Self::Shader>;
    fn shader_source(&self, shader: &Self::Shader, source: &str);
    fn compile_shader(&self, shader: &Self::Shader);
    fn shader_compiled(&self, shader: &Self::Shader) -> bool;
    fn shader_info_log(&self, shader: &Self::Shader) -> Option<String>;
    fn delete_shader(&self, shader: &Self::Shader);

    fn create_program(&self) -> Option<Self::Program>;
    fn attach_shader(&self, program: &Self::Program, shader: &Self::Shader);
    fn link_program(&self, program: &Self::Program);
    fn program_linked(&self, program: &Self::Program) -> bool;
    fn program_info_log(&self, program: &Self::Program) -> Option<String>;
    fn delete_program(&self, program: &Self::Program);
    fn use_program(&self, program: &Self::Program);

    /// Returns `-1` when the name does not resolve to an active attribute.
    fn get_attrib_location(&self, program: &Self::Program, name: &str) -> i32;
    fn get_uniform_location(
        &self,
        program: &Self::Program,
        name: &str,
    ) -> Option<Self::UniformLocation>;

    fn create_buffer(&self) -> Option<Self::Buffer>;
    fn bind_buffer(&self, target: BufferTarget, buffer: &Self::Buffer);
    /// Uploads `data` into the buffer bound to `target` with `STATIC_DRAW` usage.
    fn buffer_data(&self, target: BufferTarget, data: BufferData<'_>);
    fn vertex_attrib_pointer(&self, slot: u32, layout: &AttribLayout);
    fn enable_vertex_attrib_array(&self, slot: u32);

    fn uniform_matrix4fv(&self, location: &Self::UniformLocation, matrix: &[f32; 16]);

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32);
    fn clear_depth(&self, depth: f32);
    /// Clears both the color and the depth buffer.
    fn clear(&self);
    fn enable_depth_test(&self, func: DepthFunc);
    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);

    fn draw_elements(&self, mode: DrawMode, count: i32, index_type: ComponentType, offset: i32);
    fn draw_arrays(&self, mode: DrawMode, first: i32, count: i32);
}
