use js_sys::{Float32Array, Uint16Array, Uint8Array};
use web_sys::{
    WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram, WebGlShader, WebGlUniformLocation,
};

use crate::gl::{
    AttribLayout, BufferData, BufferTarget, ComponentType, DepthFunc, DrawMode, GlContext,
};
use crate::shader::ShaderStage;

fn target(target: BufferTarget) -> u32 {
    match target {
        BufferTarget::Array => GL::ARRAY_BUFFER,
        BufferTarget::ElementArray => GL::ELEMENT_ARRAY_BUFFER,
    }
}

fn component(component: ComponentType) -> u32 {
    match component {
        ComponentType::Float => GL::FLOAT,
        ComponentType::UnsignedByte => GL::UNSIGNED_BYTE,
        ComponentType::UnsignedShort => GL::UNSIGNED_SHORT,
    }
}

fn mode(mode: DrawMode) -> u32 {
    match mode {
        DrawMode::Triangles => GL::TRIANGLES,
        DrawMode::TriangleStrip => GL::TRIANGLE_STRIP,
    }
}

impl GlContext for GL {
    type Shader = WebGlShader;
    type Program = WebGlProgram;
    type Buffer = WebGlBuffer;
    type UniformLocation = WebGlUniformLocation;

    fn create_shader(&self, stage: ShaderStage) -> Option<WebGlShader> {
        let kind = match stage {
            ShaderStage::Vertex => GL::VERTEX_SHADER,
            ShaderStage::Fragment => GL::FRAGMENT_SHADER,
        };
        GL::create_shader(self, kind)
    }

    fn shader_source(&self, shader: &WebGlShader, source: &str) {
        GL::shader_source(self, shader, source);
    }

    fn compile_shader(&self, shader: &WebGlShader) {
        GL::compile_shader(self, shader);
    }

    fn shader_compiled(&self, shader: &WebGlShader) -> bool {
        self.get_shader_parameter(shader, GL::COMPILE_STATUS)
            .as_bool()
            .unwrap_or(false)
    }

    fn shader_info_log(&self, shader: &WebGlShader) -> Option<String> {
        self.get_shader_info_log(shader)
    }

    fn delete_shader(&self, shader: &WebGlShader) {
        GL::delete_shader(self, Some(shader));
    }

    fn create_program(&self) -> Option<WebGlProgram> {
        GL::create_program(self)
    }

    fn attach_shader(&self, program: &WebGlProgram, shader: &WebGlShader) {
        GL::attach_shader(self, program, shader);
    }

    fn link_program(&self, program: &WebGlProgram) {
        GL::link_program(self, program);
    }

    fn program_linked(&self, program: &WebGlProgram) -> bool {
        self.get_program_parameter(program, GL::LINK_STATUS)
            .as_bool()
            .unwrap_or(false)
    }

    fn program_info_log(&self, program: &WebGlProgram) -> Option<String> {
        self.get_program_info_log(program)
    }

    fn delete_program(&self, program: &WebGlProgram) {
        GL::delete_program(self, Some(program));
    }

    fn use_program(&self, program: &WebGlProgram) {
        GL::use_program(self, Some(program));
    }

    fn get_attrib_location(&self, program: &WebGlProgram, name: &str) -> i32 {
        GL::get_attrib_location(self, program, name)
    }

    fn get_uniform_location(
        &self,
        program: &WebGlProgram,
        name: &str,
    ) -> Option<WebGlUniformLocation> {
        GL::get_uniform_location(self, program, name)
    }

    fn create_buffer(&self) -> Option<WebGlBuffer> {
        GL::create_buffer(self)
    }

    fn bind_buffer(&self, buffer_target: BufferTarget, buffer: &WebGlBuffer) {
        GL::bind_buffer(self, target(buffer_target), Some(buffer));
    }

    fn buffer_data(&self, buffer_target: BufferTarget, data: BufferData<'_>) {
        // Copies into a JS typed array; the Rust side keeps no view into wasm memory.
        let array: js_sys::Object = match data {
            BufferData::F32(d) => Float32Array::from(d).into(),
            BufferData::U8(d) => Uint8Array::from(d).into(),
            BufferData::U16(d) => Uint16Array::from(d).into(),
        };
        self.buffer_data_with_array_buffer_view(target(buffer_target), &array, GL::STATIC_DRAW);
    }

    fn vertex_attrib_pointer(&self, slot: u32, layout: &AttribLayout) {
        self.vertex_attrib_pointer_with_i32(
            slot,
            layout.size,
            component(layout.component),
            layout.normalized,
            layout.stride,
            layout.offset,
        );
    }

    fn enable_vertex_attrib_array(&self, slot: u32) {
        GL::enable_vertex_attrib_array(self, slot);
    }

    fn uniform_matrix4fv(&self, location: &WebGlUniformLocation, matrix: &[f32; 16]) {
        self.uniform_matrix4fv_with_f32_array(Some(location), false, matrix);
    }

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        GL::clear_color(self, r, g, b, a);
    }

    fn clear_depth(&self, depth: f32) {
        GL::clear_depth(self, depth);
    }

    fn clear(&self) {
        GL::clear(self, GL::COLOR_BUFFER_BIT | GL::DEPTH_BUFFER_BIT);
    }

    fn enable_depth_test(&self, func: DepthFunc) {
        self.enable(GL::DEPTH_TEST);
        self.depth_func(match func {
            DepthFunc::Less => GL::LESS,
            DepthFunc::Lequal => GL::LEQUAL,
        });
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        GL::viewport(self, x, y, width, height);
    }

    fn draw_elements(
        &self,
        draw_mode: DrawMode,
        count: i32,
        index_type: ComponentType,
        offset: i32,
    ) {
        self.draw_elements_with_i32(mode(draw_mode), count, component(index_type), offset);
    }

    fn draw_arrays(&self, draw_mode: DrawMode, first: i32, count: i32) {
        GL::draw_arrays(self, mode(draw_mode), first, count);
    }
}
