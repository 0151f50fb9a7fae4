//! Rendering primitives with pluggable surfaces.
//!
//! This module provides:
//! - Backend-agnostic drawing traits
//! - Canvas 2D surface (browser only)
//! - A recording surface for headless use
//! - Text fitting and single-cell painting
//! - CSS color token parsing

pub mod backend;
#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod cell;
pub mod colors;
pub mod recording;
pub mod text;

pub use backend::{DrawContext, DrawSurface};
#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use cell::{CellKind, CellPainter, CELL_PADDING};
pub use colors::{parse_color, CssColor};
pub use recording::{DrawCommand, RecordingSurface};
pub use text::{TextFitter, TextMeasureCache, ELLIPSIS};
