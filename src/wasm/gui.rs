use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Document, Element, Event, HtmlInputElement};

use crate::animation::AngleInput;
use crate::error::{PipelineError, Result};
use crate::transform::Angles;

/// A `<input type="range">` in degrees, exposed in radians. The optional
/// `<id>Display` element mirrors the current value.
pub struct RangeInput {
    value: Rc<Cell<f32>>,
}

impl RangeInput {
    pub fn bind(document: &Document, id: &str) -> Result<Self> {
        let input = document
            .get_element_by_id(id)
            .and_then(|e| e.dyn_into::<HtmlInputElement>().ok())
            .ok_or_else(|| PipelineError::MissingElement(id.to_string()))?;
        let display = document.get_element_by_id(&format!("{id}Display"));

        input.set_value("0");
        show(display.as_ref(), 0.0);

        let value = Rc::new(Cell::new(0.0));
        let on_input = {
            let value = value.clone();
            let input = input.clone();
            Closure::wrap(Box::new(move |_event: Event| {
                let degrees = input.value_as_number();
                show(display.as_ref(), degrees);
                value.set((degrees as f32).to_radians());
            }) as Box<dyn FnMut(Event)>)
        };
        input
            .add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref())
            .map_err(|_| PipelineError::MissingElement(id.to_string()))?;
        on_input.forget();

        Ok(Self { value })
    }

    pub fn value(&self) -> f32 {
        self.value.get()
    }
}

fn show(display: Option<&Element>, degrees: f64) {
    if let Some(display) = display {
        display.set_text_content(Some(&format!("{degrees}º")));
    }
}

/// The three rotation sliders: `rotateX`, `rotateY`, `rotateZ`.
pub struct AngleControls {
    x: RangeInput,
    y: RangeInput,
    z: RangeInput,
}

impl AngleControls {
    pub fn bind(document: &Document) -> Result<Self> {
        Ok(Self {
            x: RangeInput::bind(document, "rotateX")?,
            y: RangeInput::bind(document, "rotateY")?,
            z: RangeInput::bind(document, "rotateZ")?,
        })
    }
}

impl AngleInput for AngleControls {
    fn angles(&self) -> Angles {
        Angles::new(self.x.value(), self.y.value(), self.z.value())
    }
}
