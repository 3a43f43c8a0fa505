//! Pipeline settings, optionally read from the canvas `data-*` attributes.
//!
//! ```html
//! <canvas id="glCanvas" data-mesh="cube" data-rotation="gui" data-fov="90" data-distance="8"></canvas>
//! ```

use glam::Vec3;
use thiserror::Error;

use crate::mesh::Mesh;
use crate::shader::{ProgramBindings, ShaderSources};
use crate::transform::{Angles, RotationSource, TransformSettings};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("unknown rotation mode {0:?}, expected \"clock\" or \"gui\"")]
    UnknownRotation(String),
    #[error("unknown mesh {0:?}, expected \"cube\", \"cube-bytes\", \"cube-combined\" or \"square\"")]
    UnknownMesh(String),
    #[error("data-{name} must be a positive number, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
    #[error("data-{name} must lie strictly between {min} and {max}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
}

/// Which built-in mesh (and matching shader pair) a page renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeshKind {
    #[default]
    Cube,
    CubeBytes,
    /// Byte-colored cube drawn through a single premultiplied `u_matrix`.
    CubeCombined,
    Square,
}

impl MeshKind {
    pub fn mesh(self) -> Mesh {
        match self {
            MeshKind::Cube => Mesh::cube(),
            MeshKind::CubeBytes | MeshKind::CubeCombined => Mesh::cube_bytes(),
            MeshKind::Square => Mesh::square(),
        }
    }

    pub fn sources(self) -> ShaderSources<'static> {
        match self {
            MeshKind::Cube | MeshKind::CubeBytes => ShaderSources::CUBE,
            MeshKind::CubeCombined => ShaderSources::COMBINED,
            MeshKind::Square => ShaderSources::FLAT,
        }
    }

    /// Names the shaders from [`MeshKind::sources`] declare.
    pub fn bindings(self) -> ProgramBindings {
        match self {
            MeshKind::CubeCombined => ProgramBindings::combined(),
            MeshKind::Cube | MeshKind::CubeBytes | MeshKind::Square => ProgramBindings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub mesh: MeshKind,
    pub transform: TransformSettings,
    pub rotation: RotationSource,
    pub bindings: ProgramBindings,
}

impl Config {
    /// Builds a config from attribute lookups. `lookup("rotation")` is
    /// expected to return the value of `data-rotation`; missing attributes
    /// keep their defaults.
    pub fn from_attributes<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mesh = match lookup("mesh").as_deref().map(str::trim) {
            None | Some("cube") => MeshKind::Cube,
            Some("cube-bytes") => MeshKind::CubeBytes,
            Some("cube-combined") => MeshKind::CubeCombined,
            Some("square") => MeshKind::Square,
            Some(other) => return Err(ConfigError::UnknownMesh(other.to_string())),
        };
        let mut config = Config {
            mesh,
            bindings: mesh.bindings(),
            ..Config::default()
        };

        if let Some(fov) = number(&lookup, "fov")? {
            within("fov", fov, 0.0, 180.0)?;
            config.transform.fov_y_radians = fov.to_radians();
        }
        // The cube has to sit between the clip planes to be visible at all.
        if let Some(distance) = number(&lookup, "distance")? {
            let TransformSettings { z_near, z_far, .. } = config.transform;
            within("distance", distance, z_near, z_far)?;
            config.transform.camera_distance = distance;
        }

        let period = number(&lookup, "period")?.map(f64::from);
        config.rotation = match lookup("rotation").as_deref().map(str::trim) {
            None | Some("clock") => RotationSource::Clock {
                period_seconds: period.unwrap_or(20.0),
                axis: Vec3::new(0.0, 1.0, 1.0),
                speed: 1.0,
            },
            Some("gui") => RotationSource::ExternalAngles(Angles::default()),
            Some(other) => return Err(ConfigError::UnknownRotation(other.to_string())),
        };

        Ok(config)
    }

    pub fn uses_external_angles(&self) -> bool {
        matches!(self.rotation, RotationSource::ExternalAngles(_))
    }
}

fn number<F>(lookup: &F, name: &'static str) -> Result<Option<f32>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(name) else {
        return Ok(None);
    };
    match value.trim().parse::<f32>() {
        Ok(n) if n.is_finite() && n > 0.0 => Ok(Some(n)),
        _ => Err(ConfigError::InvalidNumber { name, value }),
    }
}

fn within(name: &'static str, value: f32, min: f32, max: f32) -> Result<(), ConfigError> {
    if value > min && value < max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            name,
            value,
            min,
            max,
        })
    }
}
