//! DOM adapters: a scroll container as viewport host and style source.

use js_sys::Reflect;
use wasm_bindgen::JsValue;
use web_sys::{CssStyleDeclaration, HtmlElement};

use crate::layout::{ViewportSource, ViewportState};
use crate::theme::StyleSource;

fn number_property(element: &HtmlElement, name: &str) -> Option<f64> {
    Reflect::get(element.as_ref(), &JsValue::from_str(name))
        .ok()
        .and_then(|value| value.as_f64())
}

/// Reads scroll offsets and client box from a container element on every call.
#[derive(Clone)]
pub struct ElementViewport {
    element: HtmlElement,
}

impl ElementViewport {
    pub fn new(element: HtmlElement) -> Self {
        Self { element }
    }

    pub fn element(&self) -> &HtmlElement {
        &self.element
    }
}

impl ViewportSource for ElementViewport {
    fn viewport(&self) -> ViewportState {
        let element = &self.element;
        // Reflect keeps fractional scroll offsets that scroll_top() truncates.
        let scroll_top =
            number_property(element, "scrollTop").unwrap_or_else(|| f64::from(element.scroll_top()));
        let scroll_left = number_property(element, "scrollLeft")
            .unwrap_or_else(|| f64::from(element.scroll_left()));
        let dpr = web_sys::window().map_or(1.0, |window| window.device_pixel_ratio());

        ViewportState {
            scroll_top,
            scroll_left,
            width: f64::from(element.client_width()),
            height: f64::from(element.client_height()),
            dpr,
        }
    }
}

/// Computed-style lookups on a live element.
#[derive(Clone)]
pub struct ElementStyles {
    element: HtmlElement,
}

impl ElementStyles {
    pub fn new(element: HtmlElement) -> Self {
        Self { element }
    }
}

impl ElementStyles {
    fn computed(&self) -> Option<ComputedStyle> {
        web_sys::window()?
            .get_computed_style(&self.element)
            .ok()
            .flatten()
            .map(ComputedStyle)
    }
}

impl StyleSource for ElementStyles {
    fn property(&self, name: &str) -> Option<String> {
        self.computed()?.property(name)
    }

    fn snapshot(&self) -> Option<Box<dyn StyleSource + '_>> {
        self.computed()
            .map(|style| Box::new(style) as Box<dyn StyleSource>)
    }
}

/// One `getComputedStyle` result, shared by every lookup of a resolve pass.
struct ComputedStyle(CssStyleDeclaration);

impl StyleSource for ComputedStyle {
    fn property(&self, name: &str) -> Option<String> {
        let value = self.0.get_property_value(name).ok()?;
        let value = value.trim();
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }
}
