//! Small DOM helpers shared by the demos
//!
//! HUD elements are optional: a page that omits one just doesn't show it.

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement, HtmlInputElement, Window};

use crate::error::DemoError;

pub fn window() -> Result<Window, DemoError> {
    web_sys::window().ok_or(DemoError::NoWindow)
}

pub fn document() -> Result<Document, DemoError> {
    window()?.document().ok_or(DemoError::NoDocument)
}

pub fn canvas(document: &Document, id: &str) -> Result<HtmlCanvasElement, DemoError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| DemoError::CanvasNotFound(id.to_string()))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| DemoError::NotACanvas(id.to_string()))
}

pub fn set_text(document: &Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

/// Toggle the `hidden` class used by the page stylesheet
pub fn set_hidden(document: &Document, id: &str, hidden: bool) {
    if let Some(el) = document.get_element_by_id(id) {
        let classes = el.class_list();
        let _ = if hidden {
            classes.add_1("hidden")
        } else {
            classes.remove_1("hidden")
        };
    }
}

/// Current text of an `<input>`; `None` if the element is missing
pub fn input_value(document: &Document, id: &str) -> Option<String> {
    document
        .get_element_by_id(id)?
        .dyn_into::<HtmlInputElement>()
        .ok()
        .map(|input| input.value())
}

/// Put a setup or input error in front of the user
pub fn show_error(document: &Document, message: &str) {
    set_text(document, "error", message);
    set_hidden(document, "error", false);
}

pub fn clear_error(document: &Document) {
    set_text(document, "error", "");
    set_hidden(document, "error", true);
}

/// Value of `?name=` in the page URL
pub fn query_param(window: &Window, name: &str) -> Option<String> {
    let search = window.location().search().ok()?;
    web_sys::UrlSearchParams::new_with_str(&search)
        .ok()?
        .get(name)
}

/// The canvas' `data-demo` attribute
pub fn data_demo(canvas: &HtmlCanvasElement) -> Option<String> {
    canvas.get_attribute("data-demo")
}

/// Current device pixel ratio (1.0 without a window)
pub fn device_pixel_ratio() -> f64 {
    web_sys::window().map_or(1.0, |w| w.device_pixel_ratio())
}

/// Match the backing store to the CSS size times the device pixel ratio.
/// Returns the new pixel size.
pub fn fit_canvas(window: &Window, canvas: &HtmlCanvasElement) -> (u32, u32) {
    let dpr = window.device_pixel_ratio();
    let width = ((canvas.client_width() as f64 * dpr) as u32).max(1);
    let height = ((canvas.client_height() as f64 * dpr) as u32).max(1);
    if canvas.width() != width || canvas.height() != height {
        canvas.set_width(width);
        canvas.set_height(height);
    }
    (width, height)
}
