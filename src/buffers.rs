//! One-shot upload of a [`Mesh`] into GPU buffers.

use log::{debug, trace};

use crate::error::{PipelineError, Result};
use crate::gl::{AttribLayout, BufferData, BufferTarget, ComponentType, DrawMode, GlContext};
use crate::mesh::{Colors, Mesh, Topology};

pub const POSITION_LAYOUT: AttribLayout = AttribLayout::packed(3, ComponentType::Float, false);
pub const FLOAT_COLOR_LAYOUT: AttribLayout = AttribLayout::packed(4, ComponentType::Float, false);
pub const BYTE_COLOR_LAYOUT: AttribLayout =
    AttribLayout::packed(4, ComponentType::UnsignedByte, true);

/// The draw call a buffer set was uploaded for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawCall {
    /// `drawElements(TRIANGLES, count, UNSIGNED_SHORT, 0)`.
    Indexed { count: i32 },
    /// `drawArrays(mode, 0, count)`.
    Arrays { mode: DrawMode, count: i32 },
}

/// Position, color and (for indexed meshes) index buffers. Written once and
/// never modified; re-uploading means building a new set.
pub struct GpuBuffers<G: GlContext> {
    pub position: G::Buffer,
    pub color: G::Buffer,
    pub index: Option<G::Buffer>,
    color_layout: AttribLayout,
    draw: DrawCall,
}

impl<G: GlContext> GpuBuffers<G> {
    pub fn color_layout(&self) -> &AttribLayout {
        &self.color_layout
    }

    pub fn draw_call(&self) -> DrawCall {
        self.draw
    }
}

pub fn upload<G: GlContext>(gl: &G, mesh: &Mesh) -> Result<GpuBuffers<G>> {
    let positions: Vec<f32> = mesh.positions().iter().flatten().copied().collect();
    let position = create_filled(gl, BufferTarget::Array, BufferData::F32(&positions))?;

    let (color, color_layout) = match mesh.colors() {
        Colors::Normalized(c) => {
            let flat: Vec<f32> = c.iter().flatten().copied().collect();
            let buffer = create_filled(gl, BufferTarget::Array, BufferData::F32(&flat))?;
            (buffer, FLOAT_COLOR_LAYOUT)
        }
        Colors::Bytes(c) => {
            let flat: Vec<u8> = c.iter().flatten().copied().collect();
            let buffer = create_filled(gl, BufferTarget::Array, BufferData::U8(&flat))?;
            (buffer, BYTE_COLOR_LAYOUT)
        }
    };

    let (index, draw) = match mesh.topology() {
        Topology::Triangles => {
            let buffer = create_filled(
                gl,
                BufferTarget::ElementArray,
                BufferData::U16(mesh.indices()),
            )?;
            let count = mesh.indices().len() as i32;
            (Some(buffer), DrawCall::Indexed { count })
        }
        Topology::TriangleStrip => {
            let count = mesh.vertex_count() as i32;
            let draw = DrawCall::Arrays {
                mode: DrawMode::TriangleStrip,
                count,
            };
            (None, draw)
        }
    };

    debug!("uploaded {} vertices, {:?}", mesh.vertex_count(), draw);

    Ok(GpuBuffers {
        position,
        color,
        index,
        color_layout,
        draw,
    })
}

fn create_filled<G: GlContext>(
    gl: &G,
    target: BufferTarget,
    data: BufferData<'_>,
) -> Result<G::Buffer> {
    let buffer = gl
        .create_buffer()
        .ok_or(PipelineError::ResourceCreation("buffer"))?;
    gl.bind_buffer(target, &buffer);
    gl.buffer_data(target, data);
    trace!("{} bytes into {:?}", data.byte_len(), target);
    Ok(buffer)
}
