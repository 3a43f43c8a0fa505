//! Per-tick bookkeeping for the display-refresh loop.
//!
//! The browser owns the scheduling (`requestAnimationFrame`); everything a
//! tick does between two callbacks lives here so it runs the same under test.

use log::debug;

use crate::gl::GlContext;
use crate::session::Session;
use crate::transform::{aspect_ratio, Angles};

/// Turns callback timestamps (milliseconds) into deltas in seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameClock {
    then: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// The first call measures from a zero baseline.
    pub fn delta(&mut self, now_ms: f64) -> f64 {
        let now = now_ms / 1000.0;
        let delta = now - self.then;
        self.then = now;
        delta
    }
}

/// A drawing surface with a logical (displayed) size and a backing store.
pub trait Surface {
    fn display_size(&self) -> (u32, u32);
    fn backing_size(&self) -> (u32, u32);
    fn set_backing_size(&self, width: u32, height: u32);
}

/// Source of externally driven rotation angles, polled once per tick.
pub trait AngleInput {
    fn angles(&self) -> Angles;
}

/// Matches the backing store and viewport to the displayed size. Returns
/// whether anything changed.
pub fn resize_to_display<G: GlContext, S: Surface + ?Sized>(gl: &G, surface: &S) -> bool {
    let (width, height) = surface.display_size();
    if surface.backing_size() == (width, height) {
        return false;
    }
    surface.set_backing_size(width, height);
    gl.viewport(0, 0, width as i32, height as i32);
    debug!("resized backing store to {width}x{height}");
    true
}

/// One display refresh: feed time and angle input into the session, re-check
/// the surface size and redraw. The size check runs every tick since resize
/// notifications are not reliable for every surface.
pub fn tick<G, S>(
    delta_seconds: f64,
    gl: &G,
    surface: &S,
    session: &mut Session<G>,
    input: Option<&dyn AngleInput>,
) where
    G: GlContext,
    S: Surface + ?Sized,
{
    session.advance(delta_seconds);
    if let Some(input) = input {
        session.set_angles(input.angles());
    }

    resize_to_display(gl, surface);

    let (width, height) = surface.display_size();
    session.render(gl, aspect_ratio(width, height));
}
