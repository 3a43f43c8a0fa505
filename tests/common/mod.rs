#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use cube_wasm::animation::Surface;
use cube_wasm::gl::{AttribLayout, BufferData, BufferTarget, ComponentType, DepthFunc, DrawMode, GlContext};
use cube_wasm::shader::ShaderStage;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateShader(ShaderStage),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    AttachShader(u32, u32),
    LinkProgram(u32),
    DeleteProgram(u32),
    UseProgram(u32),
    CreateBuffer(u32),
    BindBuffer(BufferTarget, u32),
    BufferF32(BufferTarget, Vec<f32>),
    BufferU8(BufferTarget, Vec<u8>),
    BufferU16(BufferTarget, Vec<u16>),
    VertexAttribPointer(u32, AttribLayout),
    EnableVertexAttribArray(u32),
    UniformMatrix4(String, [f32; 16]),
    ClearColor([f32; 4]),
    ClearDepth(f32),
    Clear,
    EnableDepthTest(DepthFunc),
    Viewport(i32, i32, i32, i32),
    DrawElements(DrawMode, i32, ComponentType, i32),
    DrawArrays(DrawMode, i32, i32),
}

/// Records every call. Attribute and uniform names resolve when the attached
/// shader sources declare them, in declaration order.
#[derive(Default)]
pub struct FakeGl {
    calls: RefCell<Vec<Call>>,
    next_id: Cell<u32>,
    sources: RefCell<HashMap<u32, String>>,
    attached: RefCell<HashMap<u32, Vec<u32>>>,
    linked: RefCell<HashMap<u32, (Vec<String>, Vec<String>)>>,
    fail_compile: Option<ShaderStage>,
    fail_link: bool,
    refuse_buffers: bool,
    stages: RefCell<HashMap<u32, ShaderStage>>,
}

impl FakeGl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every shader of `stage` fails to compile.
    pub fn failing_compile(stage: ShaderStage) -> Self {
        Self {
            fail_compile: Some(stage),
            ..Self::default()
        }
    }

    pub fn failing_link() -> Self {
        Self {
            fail_link: true,
            ..Self::default()
        }
    }

    /// `create_buffer` returns nothing, as on a lost context.
    pub fn refusing_buffers() -> Self {
        Self {
            refuse_buffers: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn take_calls(&self) -> Vec<Call> {
        self.calls.borrow_mut().drain(..).collect()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn id(&self) -> u32 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }
}

/// Names declared with `keyword <type> <name>;`.
fn declared(source: &str, keyword: &str) -> Vec<String> {
    source
        .lines()
        .filter_map(|line| {
            let mut words = line.trim().trim_end_matches(';').split_whitespace();
            if words.next() != Some(keyword) {
                return None;
            }
            words.last().map(str::to_string)
        })
        .collect()
}

impl GlContext for FakeGl {
    type Shader = u32;
    type Program = u32;
    type Buffer = u32;
    type UniformLocation = String;

    fn create_shader(&self, stage: ShaderStage) -> Option<u32> {
        self.record(Call::CreateShader(stage));
        let id = self.id();
        self.stages.borrow_mut().insert(id, stage);
        Some(id)
    }

    fn shader_source(&self, shader: &u32, source: &str) {
        self.sources.borrow_mut().insert(*shader, source.to_string());
    }

    fn compile_shader(&self, shader: &u32) {
        self.record(Call::CompileShader(*shader));
    }

    fn shader_compiled(&self, shader: &u32) -> bool {
        self.fail_compile != self.stages.borrow().get(shader).copied()
    }

    fn shader_info_log(&self, _shader: &u32) -> Option<String> {
        Some("ERROR: 0:3: 'vec5' : syntax error".to_string())
    }

    fn delete_shader(&self, shader: &u32) {
        self.record(Call::DeleteShader(*shader));
    }

    fn create_program(&self) -> Option<u32> {
        let id = self.id();
        self.record(Call::CreateProgram(id));
        Some(id)
    }

    fn attach_shader(&self, program: &u32, shader: &u32) {
        self.record(Call::AttachShader(*program, *shader));
        self.attached.borrow_mut().entry(*program).or_default().push(*shader);
    }

    fn link_program(&self, program: &u32) {
        self.record(Call::LinkProgram(*program));
        let sources = self.sources.borrow();
        let mut attributes = Vec::new();
        let mut uniforms = Vec::new();
        for shader in self.attached.borrow().get(program).into_iter().flatten() {
            if let Some(source) = sources.get(shader) {
                attributes.extend(declared(source, "attribute"));
                uniforms.extend(declared(source, "uniform"));
            }
        }
        self.linked.borrow_mut().insert(*program, (attributes, uniforms));
    }

    fn program_linked(&self, _program: &u32) -> bool {
        !self.fail_link
    }

    fn program_info_log(&self, _program: &u32) -> Option<String> {
        Some("ERROR: varying vColor not written by vertex shader".to_string())
    }

    fn delete_program(&self, program: &u32) {
        self.record(Call::DeleteProgram(*program));
    }

    fn use_program(&self, program: &u32) {
        self.record(Call::UseProgram(*program));
    }

    fn get_attrib_location(&self, program: &u32, name: &str) -> i32 {
        self.linked
            .borrow()
            .get(program)
            .and_then(|(attributes, _)| attributes.iter().position(|a| a == name))
            .map_or(-1, |i| i as i32)
    }

    fn get_uniform_location(&self, program: &u32, name: &str) -> Option<String> {
        self.linked
            .borrow()
            .get(program)
            .filter(|(_, uniforms)| uniforms.iter().any(|u| u == name))
            .map(|_| name.to_string())
    }

    fn create_buffer(&self) -> Option<u32> {
        if self.refuse_buffers {
            return None;
        }
        let id = self.id();
        self.record(Call::CreateBuffer(id));
        Some(id)
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: &u32) {
        self.record(Call::BindBuffer(target, *buffer));
    }

    fn buffer_data(&self, target: BufferTarget, data: BufferData<'_>) {
        self.record(match data {
            BufferData::F32(d) => Call::BufferF32(target, d.to_vec()),
            BufferData::U8(d) => Call::BufferU8(target, d.to_vec()),
            BufferData::U16(d) => Call::BufferU16(target, d.to_vec()),
        });
    }

    fn vertex_attrib_pointer(&self, slot: u32, layout: &AttribLayout) {
        self.record(Call::VertexAttribPointer(slot, *layout));
    }

    fn enable_vertex_attrib_array(&self, slot: u32) {
        self.record(Call::EnableVertexAttribArray(slot));
    }

    fn uniform_matrix4fv(&self, location: &String, matrix: &[f32; 16]) {
        self.record(Call::UniformMatrix4(location.clone(), *matrix));
    }

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        self.record(Call::ClearColor([r, g, b, a]));
    }

    fn clear_depth(&self, depth: f32) {
        self.record(Call::ClearDepth(depth));
    }

    fn clear(&self) {
        self.record(Call::Clear);
    }

    fn enable_depth_test(&self, func: DepthFunc) {
        self.record(Call::EnableDepthTest(func));
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(Call::Viewport(x, y, width, height));
    }

    fn draw_elements(&self, mode: DrawMode, count: i32, index_type: ComponentType, offset: i32) {
        self.record(Call::DrawElements(mode, count, index_type, offset));
    }

    fn draw_arrays(&self, mode: DrawMode, first: i32, count: i32) {
        self.record(Call::DrawArrays(mode, first, count));
    }
}

/// Surface whose displayed size the test changes directly.
pub struct FakeSurface {
    pub display: Cell<(u32, u32)>,
    pub backing: Cell<(u32, u32)>,
}

impl FakeSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            display: Cell::new((width, height)),
            backing: Cell::new((300, 150)),
        }
    }
}

impl Surface for FakeSurface {
    fn display_size(&self) -> (u32, u32) {
        self.display.get()
    }

    fn backing_size(&self) -> (u32, u32) {
        self.backing.get()
    }

    fn set_backing_size(&self, width: u32, height: u32) {
        self.backing.set((width, height));
    }
}

pub fn approx_eq(a: &[f32], b: &[f32], eps: f32) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() < eps)
}
