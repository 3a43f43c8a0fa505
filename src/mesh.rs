//! Static geometry: positions, per-vertex colors and triangle connectivity.
//!
//! A [`Mesh`] is validated once on construction and never changes after that.
//! Colors carry their own encoding so the uploader and the renderer cannot
//! disagree on how the color stream is laid out.

use thiserror::Error;

/// Indices are uploaded as `u16`, which caps the addressable vertex count.
pub const MAX_VERTICES: usize = u16::MAX as usize + 1;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    #[error("{colors} colors for {positions} vertices")]
    ColorCountMismatch { positions: usize, colors: usize },
    #[error("index {index} out of range for {vertices} vertices")]
    IndexOutOfRange { index: u16, vertices: usize },
    #[error("{0} indices do not form whole triangles")]
    IncompleteTriangle(usize),
    #[error("{0} vertices exceed the 16-bit index range")]
    TooManyVertices(usize),
    #[error("color component {value} of vertex {vertex} is outside [0, 1]")]
    ColorOutOfRange { vertex: usize, value: f32 },
    #[error("triangle strips are drawn without an index buffer")]
    IndexedStrip,
}

/// How the vertex stream is assembled into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    /// Indexed triangle list.
    Triangles,
    /// Non-indexed strip over every vertex in order.
    TriangleStrip,
}

/// Per-vertex RGBA colors in one of the two encodings the pipeline accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum Colors {
    /// Floats in `[0, 1]`, uploaded as `FLOAT`.
    Normalized(Vec<[f32; 4]>),
    /// Bytes in `[0, 255]`, uploaded as normalized `UNSIGNED_BYTE`.
    Bytes(Vec<[u8; 4]>),
}

impl Colors {
    pub fn len(&self) -> usize {
        match self {
            Colors::Normalized(c) => c.len(),
            Colors::Bytes(c) => c.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Same color repeated `count` times per entry, one entry per face.
    fn per_face<T: Copy>(faces: &[T], count: usize) -> Vec<T> {
        faces
            .iter()
            .flat_map(|c| std::iter::repeat(*c).take(count))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    positions: Vec<[f32; 3]>,
    colors: Colors,
    indices: Vec<u16>,
    topology: Topology,
}

impl Mesh {
    pub fn new(
        positions: Vec<[f32; 3]>,
        colors: Colors,
        indices: Vec<u16>,
        topology: Topology,
    ) -> Result<Self, MeshError> {
        let vertices = positions.len();
        if vertices > MAX_VERTICES {
            return Err(MeshError::TooManyVertices(vertices));
        }
        if colors.len() != vertices {
            return Err(MeshError::ColorCountMismatch {
                positions: vertices,
                colors: colors.len(),
            });
        }
        if let Colors::Normalized(c) = &colors {
            for (vertex, rgba) in c.iter().enumerate() {
                if let Some(&value) = rgba.iter().find(|v| !(0.0..=1.0).contains(*v)) {
                    return Err(MeshError::ColorOutOfRange { vertex, value });
                }
            }
        }
        match topology {
            Topology::Triangles => {
                if indices.len() % 3 != 0 {
                    return Err(MeshError::IncompleteTriangle(indices.len()));
                }
                if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertices) {
                    return Err(MeshError::IndexOutOfRange { index, vertices });
                }
            }
            Topology::TriangleStrip if !indices.is_empty() => {
                return Err(MeshError::IndexedStrip);
            }
            Topology::TriangleStrip => {}
        }

        Ok(Self {
            positions,
            colors,
            indices,
            topology,
        })
    }

    /// Unit cube with float colors: 6 faces of 4 unshared vertices so every
    /// face gets a flat color.
    pub fn cube() -> Self {
        let colors = Colors::Normalized(Colors::per_face(&CUBE_FACE_COLORS, 4));
        Self::cube_with(colors)
    }

    /// Same cube with byte-encoded colors.
    pub fn cube_bytes() -> Self {
        let faces = CUBE_FACE_COLORS.map(|c| c.map(|v| (v * 255.0).round() as u8));
        Self::cube_with(Colors::Bytes(Colors::per_face(&faces, 4)))
    }

    fn cube_with(colors: Colors) -> Self {
        Self {
            positions: CUBE_POSITIONS.to_vec(),
            colors,
            indices: CUBE_INDICES.to_vec(),
            topology: Topology::Triangles,
        }
    }

    /// Flat square in the z = 0 plane, drawn as a 4-vertex strip.
    pub fn square() -> Self {
        Self {
            positions: vec![
                [1.0, 1.0, 0.0],
                [-1.0, 1.0, 0.0],
                [1.0, -1.0, 0.0],
                [-1.0, -1.0, 0.0],
            ],
            colors: Colors::Normalized(vec![[1.0, 0.0, 0.0, 1.0]; 4]),
            indices: Vec::new(),
            topology: Topology::TriangleStrip,
        }
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn colors(&self) -> &Colors {
        &self.colors
    }

    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }
}

// white, red, green, blue, yellow, purple
const CUBE_FACE_COLORS: [[f32; 4]; 6] = [
    [1.0, 1.0, 1.0, 1.0],
    [1.0, 0.0, 0.0, 1.0],
    [0.0, 1.0, 0.0, 1.0],
    [0.0, 0.0, 1.0, 1.0],
    [1.0, 1.0, 0.0, 1.0],
    [1.0, 0.0, 1.0, 1.0],
];

#[rustfmt::skip]
const CUBE_POSITIONS: [[f32; 3]; 24] = [
    // front
    [-1.0, -1.0,  1.0], [ 1.0, -1.0,  1.0], [ 1.0,  1.0,  1.0], [-1.0,  1.0,  1.0],
    // back
    [-1.0, -1.0, -1.0], [-1.0,  1.0, -1.0], [ 1.0,  1.0, -1.0], [ 1.0, -1.0, -1.0],
    // top
    [-1.0,  1.0, -1.0], [-1.0,  1.0,  1.0], [ 1.0,  1.0,  1.0], [ 1.0,  1.0, -1.0],
    // bottom
    [-1.0, -1.0, -1.0], [ 1.0, -1.0, -1.0], [ 1.0, -1.0,  1.0], [-1.0, -1.0,  1.0],
    // right
    [ 1.0, -1.0, -1.0], [ 1.0,  1.0, -1.0], [ 1.0,  1.0,  1.0], [ 1.0, -1.0,  1.0],
    // left
    [-1.0, -1.0, -1.0], [-1.0, -1.0,  1.0], [-1.0,  1.0,  1.0], [-1.0,  1.0, -1.0],
];

#[rustfmt::skip]
const CUBE_INDICES: [u16; 36] = [
     0,  1,  2,   0,  2,  3,
     4,  5,  6,   4,  6,  7,
     8,  9, 10,   8, 10, 11,
    12, 13, 14,  12, 14, 15,
    16, 17, 18,  16, 18, 19,
    20, 21, 22,  20, 22, 23,
];
