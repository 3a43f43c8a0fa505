use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{error, info};
use wasm_bindgen::{closure::Closure, JsCast};
use wasm_bindgen_futures::spawn_local;
use web_sys::{window, HtmlCanvasElement, WebGl2RenderingContext as GL};

use super::gui::AngleControls;
use crate::animation::{self, AngleInput, FrameClock, Surface};
use crate::config::Config;
use crate::error::{PipelineError, Result};
use crate::session::Session;

/// The canvas as a drawing surface: CSS size vs. backing-store size.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas }
    }
}

impl Surface for CanvasSurface {
    fn display_size(&self) -> (u32, u32) {
        (
            self.canvas.client_width().max(0) as u32,
            self.canvas.client_height().max(0) as u32,
        )
    }

    fn backing_size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn set_backing_size(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }
}

type FrameCallback = Closure<dyn FnMut(f64)>;

#[derive(Default)]
struct LoopState {
    cancelled: Cell<bool>,
    ticking: Cell<bool>,
    pending: Cell<Option<i32>>,
    callback: RefCell<Option<FrameCallback>>,
}

impl LoopState {
    fn schedule(&self) {
        let Some(window) = window() else {
            return;
        };
        let callback = self.callback.borrow();
        let Some(callback) = callback.as_ref() else {
            return;
        };
        match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            Ok(id) => self.pending.set(Some(id)),
            Err(e) => error!("requestAnimationFrame failed: {e:?}"),
        }
    }
}

/// Stops the animation loop started by [`run`].
#[derive(Clone)]
pub struct CancellationHandle {
    state: Rc<LoopState>,
}

impl CancellationHandle {
    pub fn cancel(&self) {
        self.state.cancelled.set(true);
        if let (Some(id), Some(window)) = (self.state.pending.take(), window()) {
            window.cancel_animation_frame(id).ok();
        }
        // A closure cannot be dropped while it runs; when cancelled from
        // inside a tick it is released in a microtask, after the tick returns.
        if self.state.ticking.get() {
            let state = self.state.clone();
            spawn_local(async move {
                state.callback.borrow_mut().take();
            });
        } else {
            self.state.callback.borrow_mut().take();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.cancelled.get()
    }

    /// Whether the frame callback, and everything the tick captured, has
    /// been dropped.
    pub fn is_released(&self) -> bool {
        self.state.callback.borrow().is_none()
    }
}

/// Calls `tick` once per display refresh with the seconds elapsed since the
/// previous refresh, until cancelled.
pub fn run<F>(mut tick: F) -> Result<CancellationHandle>
where
    F: FnMut(f64) + 'static,
{
    if window().is_none() {
        return Err(PipelineError::ContextUnavailable("no window".into()));
    }

    let state = Rc::new(LoopState::default());
    let handle = CancellationHandle {
        state: state.clone(),
    };

    // The closure keeps a reference to the shared state so it can reschedule
    // itself; the cycle is broken when the handle cancels the loop, either
    // right away or once the current tick has returned.
    let inner = state.clone();
    let mut clock = FrameClock::new();
    *state.callback.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
        inner.pending.set(None);
        if inner.cancelled.get() {
            return;
        }
        inner.ticking.set(true);
        tick(clock.delta(now));
        inner.ticking.set(false);

        if !inner.cancelled.get() {
            inner.schedule();
        }
    }) as Box<dyn FnMut(f64)>));

    state.schedule();
    Ok(handle)
}

/// Builds the session for `canvas` and starts animating it.
pub fn start(canvas: HtmlCanvasElement) -> Result<CancellationHandle> {
    let config = Config::from_attributes(|name| canvas.get_attribute(&format!("data-{name}")))?;

    let gl: GL = canvas
        .get_context("webgl2")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into().ok())
        .ok_or_else(|| {
            PipelineError::ContextUnavailable(
                "your browser or machine may not support WebGL2".into(),
            )
        })?;

    let mesh = config.mesh.mesh();
    let mut session = Session::new(&gl, &mesh, config.mesh.sources(), &config)?;

    let controls = if config.uses_external_angles() {
        let document = window()
            .and_then(|w| w.document())
            .ok_or_else(|| PipelineError::ContextUnavailable("no document".into()))?;
        Some(AngleControls::bind(&document)?)
    } else {
        None
    };

    info!("starting render loop ({:?})", config.mesh);
    let surface = CanvasSurface::new(canvas);
    run(move |delta| {
        let input = controls.as_ref().map(|c| c as &dyn AngleInput);
        animation::tick(delta, &gl, &surface, &mut session, input);
    })
}
