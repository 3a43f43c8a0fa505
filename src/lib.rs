//! Rotating colored cube on a WebGL2 canvas.
//!
//! The pipeline (mesh, shaders, buffers, transforms, frame drawing and tick
//! bookkeeping) is written against [`GlContext`] and builds on every target.
//! The browser entry point and the `web_sys` bindings only exist on wasm32.

pub mod animation;
pub mod buffers;
pub mod config;
pub mod error;
pub mod gl;
pub mod mesh;
pub mod renderer;
pub mod session;
pub mod shader;
pub mod transform;

pub use animation::{resize_to_display, tick, AngleInput, FrameClock, Surface};
pub use buffers::{upload, DrawCall, GpuBuffers};
pub use config::{Config, ConfigError, MeshKind};
pub use error::{PipelineError, Result};
pub use gl::GlContext;
pub use mesh::{Colors, Mesh, MeshError, Topology};
pub use renderer::draw_frame;
pub use session::Session;
pub use shader::{compile, AttribSlot, ProgramBindings, ShaderProgram, ShaderSources, UniformLayout};
pub use transform::{Angles, FrameState, Matrices, RotationSource, TransformSettings};

// Only compile wasm-specific code when targeting wasm32.
#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::RefCell;

    use log::error;
    use wasm_bindgen::prelude::*;

    mod context;
    mod gui;
    mod render;

    pub use render::{run, start, CancellationHandle, CanvasSurface};

    thread_local! {
        static RENDER_LOOP: RefCell<Option<CancellationHandle>> = RefCell::new(None);
    }

    fn init_logging() {
        console_error_panic_hook::set_once();
        // a second init only fails because a logger is already installed
        console_log::init_with_level(log::Level::Info).ok();
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        init_logging();

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas = document
            .get_element_by_id("glCanvas")
            .ok_or("canvas not found")?
            .dyn_into::<web_sys::HtmlCanvasElement>()?;

        match render::start(canvas) {
            Ok(handle) => {
                RENDER_LOOP.with(|slot| *slot.borrow_mut() = Some(handle));
                Ok(())
            }
            Err(e) => {
                error!("{e}");
                window.alert_with_message(&e.to_string()).ok();
                Err(JsValue::from_str(&e.to_string()))
            }
        }
    }

    /// Stops the render loop; the last frame stays on the canvas.
    #[wasm_bindgen]
    pub fn stop() {
        RENDER_LOOP.with(|slot| {
            if let Some(handle) = slot.borrow_mut().take() {
                handle.cancel();
            }
        });
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::{run, start, CancellationHandle, CanvasSurface};
