//! Drawing backend traits for pluggable surfaces.
//!
//! The grid engine only needs a handful of Canvas 2D primitives. Keeping them
//! behind [`DrawContext`] lets the same frame logic drive a real
//! `CanvasRenderingContext2d` in the browser and a recording surface in
//! native tests.

/// The subset of a 2D drawing context the grid renderer uses.
///
/// Coordinates are CSS pixels once [`DrawContext::set_transform`] has been
/// applied with the device pixel ratio.
pub trait DrawContext {
    /// Replace the current transform with `[a b c d e f]`.
    fn set_transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64);

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64);

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str);

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str, line_width: f64);

    /// Push the drawing state (transform, clip, styles).
    fn save(&mut self);

    /// Pop the drawing state pushed by the matching [`DrawContext::save`].
    fn restore(&mut self);

    /// Intersect the clip region with a rectangle.
    fn clip_rect(&mut self, x: f64, y: f64, w: f64, h: f64);

    fn set_font(&mut self, font: &str);

    /// Draw left-aligned text with its vertical middle at `y`.
    fn fill_text(&mut self, text: &str, x: f64, y: f64, color: &str);

    /// Advance width of `text` in the current font.
    fn measure_text(&mut self, text: &str) -> f64;
}

/// A drawing context that owns a resizable backing store.
pub trait DrawSurface: DrawContext {
    /// Backing store size in physical pixels.
    fn backing_size(&self) -> (u32, u32);

    /// Reallocate the backing store and set its CSS display size.
    fn set_backing_size(&mut self, physical_w: u32, physical_h: u32, css_w: f64, css_h: f64);

    /// Apply a uniform device pixel ratio transform.
    fn apply_dpr(&mut self, dpr: f64) {
        self.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
    }

    /// Clear the whole backing store in physical pixels.
    fn clear_all(&mut self) {
        let (w, h) = self.backing_size();
        self.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        self.clear_rect(0.0, 0.0, f64::from(w), f64::from(h));
    }
}

/// Helper to get crisp pixel position for 1px lines
pub fn crisp(x: f64) -> f64 {
    x.floor() + 0.5
}
