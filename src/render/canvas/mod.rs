//! Canvas 2D rendering backend.
//!
//! This module provides the browser surface using the HTML Canvas 2D API
//! via web-sys.

mod surface;

pub use surface::CanvasSurface;
