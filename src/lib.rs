//! canvasgrid - virtualized spreadsheet-style grid for Canvas 2D
//!
//! Draws a large scrollable table straight onto a 2D surface instead of DOM rows:
//! - Only rows and columns intersecting the viewport are drawn
//! - Crisp output at any device pixel ratio
//! - Separately painted sticky header
//! - Hit testing from pointer to cell and from cell to pixel rectangle
//! - Ellipsis truncation with O(log n) text measurements per cell
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { CanvasGrid } from 'canvasgrid';
//! await init();
//! const grid = new CanvasGrid({ idColumnWidth: 120 }, canvas, container);
//! grid.updateData(columns, rows, {});
//! grid.resize();
//! grid.render();
//! ```
//!
//! # Usage (Rust)
//!
//! The engine is generic over the surface and the viewport host, so it runs
//! natively against a [`RecordingSurface`] and a [`FixedViewport`]:
//!
//! ```
//! use canvasgrid::{ColumnDef, FixedViewport, GridConfig, GridRenderer, RecordRow};
//! use canvasgrid::{RecordingSurface, RenderOptions, ViewportState};
//!
//! let mut grid: GridRenderer<_, _> = GridRenderer::new(
//!     GridConfig::default(),
//!     RecordingSurface::new(800, 600),
//!     FixedViewport::new(ViewportState::new(800.0, 600.0)),
//! );
//! grid.update_data(
//!     vec![ColumnDef::new("name", "Name")],
//!     vec![RecordRow::new(1).with("name", "Ada")],
//!     Default::default(),
//! );
//! let stats = grid.render(RenderOptions::default());
//! assert_eq!(stats.rows_drawn, 1);
//! ```

pub mod error;
pub mod grid;
pub mod layout;
pub mod render;
pub mod theme;
pub mod types;
#[cfg(target_arch = "wasm32")]
pub mod viewer;

use wasm_bindgen::prelude::*;

pub use error::{GridError, Result};
pub use grid::{CellFormatter, FrameStats, GridConfig, GridRenderer, RenderOptions};
pub use layout::{ColumnHit, FixedViewport, GridLayout, RowWindow, ViewportSource, ViewportState};
#[cfg(target_arch = "wasm32")]
pub use render::CanvasSurface;
pub use render::{DrawCommand, DrawContext, DrawSurface, RecordingSurface, TextFitter};
pub use theme::{StaticStyles, StyleResolver, StyleSource, StylesSource, ThemeResolver};
pub use types::*;
#[cfg(target_arch = "wasm32")]
pub use viewer::CanvasGrid;

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
