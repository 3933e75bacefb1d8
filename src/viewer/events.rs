//! Slider wiring for `CircleView`.

use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlInputElement};

use super::CircleView;
use crate::store::parse_count;

#[wasm_bindgen]
impl CircleView {
    /// Drive the count from a range input.
    ///
    /// The input is set to the current count, then every `input` event
    /// redraws with the slider's value.
    #[wasm_bindgen(js_name = "attachSlider")]
    pub fn attach_slider(&mut self, input: HtmlInputElement) -> Result<(), JsValue> {
        input.set_value(&self.count().to_string());

        let state = Rc::clone(&self.state);
        let slider = input.clone();
        let closure = Closure::wrap(Box::new(move |_event: Event| {
            let Some(count) = parse_count(&slider.value()) else {
                log::warn!("ignoring slider value {:?}", slider.value());
                return;
            };
            if let Err(e) = Self::apply_count(&state, count) {
                log::error!("redraw for {count} circles failed: {e}");
            }
        }) as Box<dyn FnMut(Event)>);

        input.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())?;
        self.closures.push(closure);
        Ok(())
    }
}
