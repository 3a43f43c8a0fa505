//! Projection and model-view computation.
//!
//! Both matrices are recomputed every frame from the current inputs and
//! never cached. The model-view matrix is `translate * rotate`: the rotation
//! happens in the already translated frame, so the mesh spins in place at a
//! fixed distance in front of the camera.

use glam::{Mat4, Vec3};

/// Per-axis rotation in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Angles {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Angles {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn from_degrees(x: f32, y: f32, z: f32) -> Self {
        Self::new(x.to_radians(), y.to_radians(), z.to_radians())
    }
}

/// Where the rotation of each frame comes from. Exactly one policy drives a
/// session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RotationSource {
    /// Angle follows elapsed time, wrapped to `period_seconds` and scaled by
    /// `speed`, around a fixed `axis`.
    Clock {
        period_seconds: f64,
        axis: Vec3,
        speed: f32,
    },
    /// Angles reported by an external control; the payload is the initial value.
    ExternalAngles(Angles),
}

impl Default for RotationSource {
    fn default() -> Self {
        RotationSource::Clock {
            period_seconds: 20.0,
            axis: Vec3::new(0.0, 1.0, 1.0),
            speed: 1.0,
        }
    }
}

/// Mutable per-session rotation state, advanced once per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameState {
    Clock {
        phase: f64,
        period_seconds: f64,
        axis: Vec3,
        speed: f32,
    },
    External(Angles),
}

impl FrameState {
    pub fn new(source: RotationSource) -> Self {
        match source {
            RotationSource::Clock {
                period_seconds,
                axis,
                speed,
            } => FrameState::Clock {
                phase: 0.0,
                period_seconds,
                axis,
                speed,
            },
            RotationSource::ExternalAngles(angles) => FrameState::External(angles),
        }
    }

    /// Accumulates `delta_seconds` into the clock phase, wrapping at the
    /// period. A period that is not a positive number never wraps. No-op for
    /// externally driven state.
    pub fn advance(&mut self, delta_seconds: f64) {
        if let FrameState::Clock {
            phase,
            period_seconds,
            ..
        } = self
        {
            *phase += delta_seconds;
            if *period_seconds > 0.0 {
                *phase %= *period_seconds;
            }
        }
    }

    /// Stores the latest externally reported angles. Returns `false` (and
    /// changes nothing) when the clock is authoritative.
    pub fn set_angles(&mut self, angles: Angles) -> bool {
        match self {
            FrameState::External(current) => {
                *current = angles;
                true
            }
            FrameState::Clock { .. } => false,
        }
    }

    pub fn phase(&self) -> Option<f64> {
        match self {
            FrameState::Clock { phase, .. } => Some(*phase),
            FrameState::External(_) => None,
        }
    }

    pub fn rotation(&self) -> Mat4 {
        match *self {
            FrameState::Clock {
                phase, axis, speed, ..
            } => {
                let angle = phase as f32 * speed;
                match axis.try_normalize() {
                    Some(axis) => Mat4::from_axis_angle(axis, angle),
                    None => Mat4::IDENTITY,
                }
            }
            FrameState::External(a) => {
                Mat4::from_rotation_x(a.x) * Mat4::from_rotation_y(a.y) * Mat4::from_rotation_z(a.z)
            }
        }
    }
}

/// Fixed camera parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformSettings {
    pub fov_y_radians: f32,
    pub z_near: f32,
    pub z_far: f32,
    pub camera_distance: f32,
}

impl Default for TransformSettings {
    fn default() -> Self {
        Self {
            fov_y_radians: 45f32.to_radians(),
            z_near: 0.1,
            z_far: 100.0,
            camera_distance: 6.0,
        }
    }
}

impl TransformSettings {
    /// Perspective matrix for the given viewport aspect ratio. A degenerate
    /// aspect (zero-height or collapsed canvas) falls back to 1.0.
    pub fn projection(&self, aspect_ratio: f32) -> Mat4 {
        let aspect = if aspect_ratio.is_finite() && aspect_ratio > 0.0 {
            aspect_ratio
        } else {
            1.0
        };
        Mat4::perspective_rh_gl(self.fov_y_radians, aspect, self.z_near, self.z_far)
    }

    pub fn translation(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, 0.0, -self.camera_distance))
    }

    pub fn model_view(&self, state: &FrameState) -> Mat4 {
        self.translation() * state.rotation()
    }

    pub fn matrices(&self, aspect_ratio: f32, state: &FrameState) -> Matrices {
        Matrices {
            projection: self.projection(aspect_ratio),
            model_view: self.model_view(state),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrices {
    pub projection: Mat4,
    pub model_view: Mat4,
}

impl Matrices {
    pub fn combined(&self) -> Mat4 {
        self.projection * self.model_view
    }
}

/// `width / height` as used for the projection.
pub fn aspect_ratio(width: u32, height: u32) -> f32 {
    width as f32 / height as f32
}
