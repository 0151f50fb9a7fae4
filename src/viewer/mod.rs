//! `CanvasGrid` - the WASM-exported entry point for browser hosts.
//!
//! Wraps a [`GridRenderer`] over a [`CanvasSurface`] and the scroll container
//! it sits in. JavaScript owns scheduling: call `render()` from scroll,
//! resize and data-change handlers, `resize()` when the container's box
//! changes.
//!
//! ```javascript
//! const grid = new CanvasGrid({ cellHeight: 32, themeFromContainer: true }, canvas, container);
//! grid.updateData(columns, rows, {});
//! grid.resize();
//! container.addEventListener('scroll', () => grid.render());
//! ```

mod host;

use std::collections::HashMap;

use js_sys::{Function, Reflect};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, HtmlElement};

pub use host::{ElementStyles, ElementViewport};

use crate::error::GridError;
use crate::grid::{GridConfig, GridRenderer, RenderOptions};
use crate::render::CanvasSurface;
use crate::theme::{StylesSource, ThemeResolver};
use crate::types::{ColumnDef, RecordRow, RowId, Styles};

/// Construction options beyond the sizing fields of [`GridConfig`].
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct HostOptions {
    /// Partial static styles; missing slots use the built-in defaults
    styles: Option<Styles>,
    /// Resolve `--grid-*` variables from the container on every frame
    theme_from_container: bool,
}

fn is_absent(value: &JsValue) -> bool {
    value.is_undefined() || value.is_null()
}

fn from_js<T>(value: JsValue) -> Result<T, JsValue>
where
    T: for<'de> Deserialize<'de> + Default,
{
    if is_absent(&value) {
        return Ok(T::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(|e| GridError::from(e).into())
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::new().serialize_missing_as_null(true);
    value
        .serialize(&serializer)
        .map_err(|e| GridError::from(e).into())
}

/// Wrap an optional `formatCellValue(raw, key)` function. Non-string results
/// and exceptions fall back to the raw value.
fn js_formatter(config: &JsValue) -> Option<Function> {
    if is_absent(config) {
        return None;
    }
    Reflect::get(config, &JsValue::from_str("formatCellValue"))
        .ok()
        .and_then(|value| value.dyn_into::<Function>().ok())
}

/// Virtualized canvas grid bound to one canvas and its scroll container.
#[wasm_bindgen]
pub struct CanvasGrid {
    inner: GridRenderer<CanvasSurface, ElementViewport>,
}

#[wasm_bindgen]
impl CanvasGrid {
    /// Create a grid over `canvas`, reading scroll state from `container`.
    ///
    /// Fails if the canvas cannot provide a 2D context or `config` is malformed.
    #[wasm_bindgen(constructor)]
    pub fn new(
        config: JsValue,
        canvas: HtmlCanvasElement,
        container: HtmlElement,
    ) -> Result<CanvasGrid, JsValue> {
        console_error_panic_hook::set_once();

        let surface = CanvasSurface::new(canvas).map_err(|e| {
            web_sys::console::error_1(&JsValue::from_str(&format!("canvasgrid: {e}")));
            JsValue::from(e)
        })?;

        let formatter = js_formatter(&config);
        let grid_config: GridConfig = from_js(config.clone())?;
        let options: HostOptions = from_js(config)?;

        let base_styles = options.styles.unwrap_or_default();
        let styles = if options.theme_from_container {
            StylesSource::Dynamic(Box::new(ThemeResolver::with_fallback(
                ElementStyles::new(container.clone()),
                base_styles,
            )))
        } else {
            StylesSource::Static(base_styles)
        };

        let mut inner = GridRenderer::new(grid_config, surface, ElementViewport::new(container))
            .with_styles(styles);
        if let Some(format) = formatter {
            inner = inner.with_formatter(move |raw, key| {
                format
                    .call2(&JsValue::NULL, &JsValue::from_str(raw), &JsValue::from_str(key))
                    .ok()
                    .and_then(|value| value.as_string())
                    .unwrap_or_else(|| raw.to_string())
            });
        }
        Ok(CanvasGrid { inner })
    }

    /// Reallocate the backing store for the container's current box and DPR.
    pub fn resize(&mut self) {
        self.inner.resize();
    }

    /// Draw one frame. `options` is `{ skipHeader?: boolean }`; returns frame stats.
    pub fn render(&mut self, options: JsValue) -> Result<JsValue, JsValue> {
        let options: RenderOptions = from_js(options)?;
        let stats = self.inner.render(options);
        to_js(&stats)
    }

    /// Paint the header band onto a separate canvas. Returns header cells drawn.
    #[wasm_bindgen(js_name = "renderHeader")]
    pub fn render_header(&mut self, header_canvas: HtmlCanvasElement) -> Result<usize, JsValue> {
        let mut header = CanvasSurface::new(header_canvas)?;
        Ok(self.inner.render_header(&mut header))
    }

    /// Size a header canvas to the container width and header height.
    #[wasm_bindgen(js_name = "resizeHeader")]
    pub fn resize_header(&self, header_canvas: HtmlCanvasElement) -> Result<(), JsValue> {
        let mut header = CanvasSurface::new(header_canvas)?;
        self.inner.resize_header(&mut header);
        Ok(())
    }

    /// Replace columns, rows and width overrides.
    #[wasm_bindgen(js_name = "updateData")]
    pub fn update_data(
        &mut self,
        columns: JsValue,
        rows: JsValue,
        column_widths: JsValue,
    ) -> Result<(), JsValue> {
        let columns: Vec<ColumnDef> = from_js(columns)?;
        let rows: Vec<RecordRow> = from_js(rows)?;
        let widths: HashMap<String, f64> = from_js(column_widths)?;
        self.inner.update_data(columns, rows, widths);
        Ok(())
    }

    /// Merge width overrides into the current ones.
    #[wasm_bindgen(js_name = "setColumnWidths")]
    pub fn set_column_widths(&mut self, widths: JsValue) -> Result<(), JsValue> {
        let widths: HashMap<String, f64> = from_js(widths)?;
        self.inner.set_column_widths(widths);
        Ok(())
    }

    /// Highlight the row with this id; `null` clears the highlight.
    #[wasm_bindgen(js_name = "setSelectedRow")]
    pub fn set_selected_row(&mut self, row_id: JsValue) -> Result<(), JsValue> {
        let row_id: Option<RowId> = from_js(row_id)?;
        self.inner.set_selected_row(row_id);
        Ok(())
    }

    /// `{ rowIndex, columnKey }` under a container-relative point, or `null`.
    #[wasm_bindgen(js_name = "getCellAt")]
    pub fn get_cell_at(&self, x: f64, y: f64) -> Result<JsValue, JsValue> {
        match self.inner.get_cell_at(x, y) {
            Some(address) => to_js(&address),
            None => Ok(JsValue::NULL),
        }
    }

    /// `{ x, y, width, height }` of a cell in viewport pixels, or `null`.
    /// Pass `null` as the key for the identity column.
    #[wasm_bindgen(js_name = "getCellRect")]
    pub fn get_cell_rect(
        &self,
        row_index: usize,
        column_key: Option<String>,
    ) -> Result<JsValue, JsValue> {
        match self.inner.get_cell_rect(row_index, column_key.as_deref()) {
            Some(rect) => to_js(&rect),
            None => Ok(JsValue::NULL),
        }
    }

    /// Check column keys, widths and config; throws on the first violation.
    pub fn validate(&self) -> Result<(), JsValue> {
        self.inner.validate().map_err(JsValue::from)
    }

    /// Total scrollable width, for sizing a scroll spacer.
    #[wasm_bindgen(js_name = "contentWidth")]
    pub fn content_width(&self) -> f64 {
        self.inner.content_width()
    }

    /// Total scrollable height, for sizing a scroll spacer.
    #[wasm_bindgen(js_name = "contentHeight")]
    pub fn content_height(&self) -> f64 {
        self.inner.content_height()
    }

    #[wasm_bindgen(js_name = "rowCount")]
    pub fn row_count(&self) -> usize {
        self.inner.row_count()
    }
}
