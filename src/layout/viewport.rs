//! Viewport state read from the host, and the row virtualization math.
//!
//! The engine keeps no scroll state of its own. Every pass asks its
//! [`ViewportSource`] for a fresh [`ViewportState`].

use serde::Serialize;
use std::cell::Cell;
use std::rc::Rc;

/// Scroll position and client box of the host container, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    pub scroll_top: f64,
    pub scroll_left: f64,
    pub width: f64,
    pub height: f64,
    pub dpr: f64,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            scroll_top: 0.0,
            scroll_left: 0.0,
            width: 800.0,
            height: 600.0,
            dpr: 1.0,
        }
    }
}

/// Inclusive range of row indices a frame iterates over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RowWindow {
    pub start: usize,
    pub end: usize,
}

impl RowWindow {
    pub fn row_count(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn contains(&self, row: usize) -> bool {
        row >= self.start && row <= self.end
    }
}

impl ViewportState {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Device pixel ratio, treating unusable values as 1.
    pub fn effective_dpr(&self) -> f64 {
        if self.dpr.is_finite() && self.dpr > 0.0 {
            self.dpr
        } else {
            1.0
        }
    }

    /// Backing store size in physical pixels for the current client box.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn physical_size(&self) -> (u32, u32) {
        let dpr = self.effective_dpr();
        let w = (self.width.max(0.0) * dpr).round().min(f64::from(u32::MAX));
        let h = (self.height.max(0.0) * dpr).round().min(f64::from(u32::MAX));
        (w as u32, h as u32)
    }

    /// Rows whose band may intersect the viewport, with one row of slack on
    /// each side. `None` when there is nothing to draw.
    ///
    /// `start = max(0, ceil((scroll_top - header - cell) / cell))`,
    /// `end = min(rows - 1, floor((scroll_top + height - header) / cell))`.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn row_window(
        &self,
        row_count: usize,
        cell_height: f64,
        header_height: f64,
    ) -> Option<RowWindow> {
        if row_count == 0 || !cell_height.is_finite() || cell_height <= 0.0 {
            return None;
        }
        // max/min below would swallow a NaN into a full-dataset window.
        let finite =
            self.scroll_top.is_finite() && self.height.is_finite() && header_height.is_finite();
        if !finite {
            return None;
        }
        let start = ((self.scroll_top - header_height - cell_height) / cell_height)
            .ceil()
            .max(0.0);
        let end = ((self.scroll_top + self.height - header_height) / cell_height).floor();
        let last = (row_count - 1) as f64;
        let end = end.min(last);
        if end < start {
            return None;
        }
        Some(RowWindow {
            start: start as usize,
            end: end as usize,
        })
    }

    /// Viewport-relative top edge of a row.
    #[allow(clippy::cast_precision_loss)]
    pub fn row_top(&self, row: usize, cell_height: f64, header_height: f64) -> f64 {
        header_height + row as f64 * cell_height - self.scroll_top
    }

    /// Row index under the viewport-relative `y`, before bounds checks.
    pub fn row_at(&self, y: f64, cell_height: f64, header_height: f64) -> f64 {
        ((y - header_height + self.scroll_top) / cell_height).floor()
    }
}

/// Host container the viewport state is read from.
pub trait ViewportSource {
    fn viewport(&self) -> ViewportState;
}

impl<T: ViewportSource + ?Sized> ViewportSource for &T {
    fn viewport(&self) -> ViewportState {
        (**self).viewport()
    }
}

impl<T: ViewportSource + ?Sized> ViewportSource for Rc<T> {
    fn viewport(&self) -> ViewportState {
        (**self).viewport()
    }
}

/// Headless host with settable scroll and size, for tests and tooling.
#[derive(Debug, Default)]
pub struct FixedViewport {
    state: Cell<ViewportState>,
}

impl FixedViewport {
    pub fn new(state: ViewportState) -> Self {
        Self {
            state: Cell::new(state),
        }
    }

    pub fn set(&self, state: ViewportState) {
        self.state.set(state);
    }

    pub fn set_scroll(&self, scroll_left: f64, scroll_top: f64) {
        let mut state = self.state.get();
        state.scroll_left = scroll_left;
        state.scroll_top = scroll_top;
        self.state.set(state);
    }

    pub fn set_size(&self, width: f64, height: f64) {
        let mut state = self.state.get();
        state.width = width;
        state.height = height;
        self.state.set(state);
    }

    pub fn set_dpr(&self, dpr: f64) {
        let mut state = self.state.get();
        state.dpr = dpr;
        self.state.set(state);
    }
}

impl ViewportSource for FixedViewport {
    fn viewport(&self) -> ViewportState {
        self.state.get()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn row_window_at_top() {
        let vp = ViewportState::new(800.0, 400.0);
        let window = vp.row_window(1000, 40.0, 40.0).unwrap();
        assert_eq!(window, RowWindow { start: 0, end: 9 });
    }

    #[test]
    fn row_window_clamps_to_last_row() {
        let mut vp = ViewportState::new(800.0, 400.0);
        vp.scroll_top = 10_000.0;
        let window = vp.row_window(20, 40.0, 40.0);
        assert_eq!(window, None);

        vp.scroll_top = 400.0;
        let window = vp.row_window(12, 40.0, 40.0).unwrap();
        assert_eq!(window, RowWindow { start: 8, end: 11 });
    }

    #[test]
    fn empty_data_has_no_window() {
        let vp = ViewportState::new(800.0, 400.0);
        assert_eq!(vp.row_window(0, 40.0, 40.0), None);
        assert_eq!(vp.row_window(10, 0.0, 40.0), None);
    }

    #[test]
    fn non_finite_viewport_has_no_window() {
        let mut vp = ViewportState::new(800.0, 400.0);
        vp.scroll_top = f64::NAN;
        assert_eq!(vp.row_window(1_000_000, 40.0, 40.0), None);

        let mut vp = ViewportState::new(800.0, f64::NAN);
        assert_eq!(vp.row_window(1_000_000, 40.0, 40.0), None);
        vp.height = 400.0;
        assert_eq!(vp.row_window(1_000_000, 40.0, f64::INFINITY), None);
    }

    #[test]
    fn physical_size_scales_by_dpr() {
        let mut vp = ViewportState::new(300.5, 200.0);
        vp.dpr = 2.0;
        assert_eq!(vp.physical_size(), (601, 400));
        vp.dpr = f64::NAN;
        assert_eq!(vp.physical_size(), (301, 200));
    }

    #[test]
    fn fixed_viewport_is_shared_through_rc() {
        let host = Rc::new(FixedViewport::new(ViewportState::default()));
        let source: Rc<FixedViewport> = Rc::clone(&host);
        host.set_scroll(10.0, 20.0);
        assert_eq!(source.viewport().scroll_left, 10.0);
        assert_eq!(source.viewport().scroll_top, 20.0);
    }
}
