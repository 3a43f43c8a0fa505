use crate::buffers::{DrawCall, GpuBuffers, POSITION_LAYOUT};
use crate::gl::{AttribLayout, BufferTarget, ComponentType, DepthFunc, DrawMode, GlContext};
use crate::shader::{AttribSlot, ShaderProgram, UniformSlots};
use crate::transform::Matrices;

/// RGBA the color buffer is cleared to.
pub const CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Redraws the whole frame. The call order is fixed: clear, depth state,
/// program, attributes, index buffer, uniforms, draw.
pub fn draw_frame<G: GlContext>(
    gl: &G,
    program: &ShaderProgram<G>,
    buffers: &GpuBuffers<G>,
    matrices: &Matrices,
) {
    let [r, g, b, a] = CLEAR_COLOR;
    gl.clear_color(r, g, b, a);
    gl.clear_depth(1.0);
    gl.clear();
    gl.enable_depth_test(DepthFunc::Lequal);

    gl.use_program(program.program());

    bind_attribute(gl, program.position_slot(), &buffers.position, &POSITION_LAYOUT);
    bind_attribute(gl, program.color_slot(), &buffers.color, buffers.color_layout());

    if let Some(index) = &buffers.index {
        gl.bind_buffer(BufferTarget::ElementArray, index);
    }

    match program.uniforms() {
        UniformSlots::Separate {
            projection,
            model_view,
        } => {
            if let Some(location) = projection {
                gl.uniform_matrix4fv(location, &matrices.projection.to_cols_array());
            }
            if let Some(location) = model_view {
                gl.uniform_matrix4fv(location, &matrices.model_view.to_cols_array());
            }
        }
        UniformSlots::Combined(Some(location)) => {
            gl.uniform_matrix4fv(location, &matrices.combined().to_cols_array());
        }
        UniformSlots::Combined(None) => {}
    }

    match buffers.draw_call() {
        DrawCall::Indexed { count } => {
            gl.draw_elements(DrawMode::Triangles, count, ComponentType::UnsignedShort, 0)
        }
        DrawCall::Arrays { mode, count } => gl.draw_arrays(mode, 0, count),
    }
}

fn bind_attribute<G: GlContext>(
    gl: &G,
    slot: AttribSlot,
    buffer: &G::Buffer,
    layout: &AttribLayout,
) {
    // absent attribute: nothing to feed
    let Some(index) = slot.index() else {
        return;
    };
    gl.bind_buffer(BufferTarget::Array, buffer);
    gl.vertex_attrib_pointer(index, layout);
    gl.enable_vertex_attrib_array(index);
}
