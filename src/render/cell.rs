//! Single-cell painting: background, 1px border, truncated text.

use super::backend::{crisp, DrawContext};
use super::text::TextFitter;
use crate::types::{CellRect, Styles};

/// Horizontal padding on each side of cell text, in CSS pixels.
pub const CELL_PADDING: f64 = 8.0;

/// How a cell is filled. Header wins over selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Header,
    Selected,
    Body,
}

impl CellKind {
    pub fn new(is_header: bool, is_selected: bool) -> Self {
        if is_header {
            Self::Header
        } else if is_selected {
            Self::Selected
        } else {
            Self::Body
        }
    }
}

/// Paints cells for one pass with a fixed set of styles.
///
/// Tracks the font it last set so a pass over hundreds of cells issues one
/// `set_font` per font change rather than one per cell.
pub struct CellPainter<'a> {
    styles: &'a Styles,
    padding: f64,
    active_font: Option<&'a str>,
}

impl<'a> CellPainter<'a> {
    pub fn new(styles: &'a Styles, padding: f64) -> Self {
        Self {
            styles,
            padding,
            active_font: None,
        }
    }

    /// Paint one cell. Returns true if any text was drawn.
    pub fn paint<D: DrawContext + ?Sized>(
        &mut self,
        ctx: &mut D,
        fitter: &mut TextFitter,
        rect: CellRect,
        value: &str,
        kind: CellKind,
    ) -> bool {
        let styles = self.styles;
        let (background, text_color, font) = match kind {
            CellKind::Header => (
                styles.header_background.as_str(),
                styles.header_text_color.as_str(),
                styles.header_font.as_str(),
            ),
            CellKind::Selected => (
                styles.selected_background.as_str(),
                styles.cell_text_color.as_str(),
                styles.cell_font.as_str(),
            ),
            CellKind::Body => (
                styles.cell_background.as_str(),
                styles.cell_text_color.as_str(),
                styles.cell_font.as_str(),
            ),
        };

        let CellRect {
            x,
            y,
            width,
            height,
        } = rect;
        ctx.fill_rect(x, y, width, height, background);
        ctx.stroke_rect(crisp(x), crisp(y), width, height, &styles.border_color, 1.0);

        if width <= 0.0 || value.is_empty() {
            return false;
        }
        let available = width - 2.0 * self.padding;
        if available <= 0.0 {
            return false;
        }

        if self.active_font != Some(font) {
            ctx.set_font(font);
            self.active_font = Some(font);
        }
        let text = fitter.fit(ctx, font, value, available);
        if text.is_empty() {
            return false;
        }
        ctx.fill_text(&text, x + self.padding, y + height / 2.0, text_color);
        true
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
    use crate::render::recording::{DrawCommand, RecordingSurface};

    fn paint(rect: CellRect, value: &str, kind: CellKind) -> RecordingSurface {
        let styles = Styles::default();
        let mut surface = RecordingSurface::new(400, 400);
        let mut fitter = TextFitter::new();
        let mut painter = CellPainter::new(&styles, CELL_PADDING);
        painter.paint(&mut surface, &mut fitter, rect, value, kind);
        surface
    }

    #[test]
    fn paints_background_border_then_text() {
        let surface = paint(CellRect::new(10.0, 20.0, 100.0, 40.0), "abc", CellKind::Body);
        let cmds = surface.commands();
        assert!(matches!(&cmds[0], DrawCommand::FillRect { color, .. } if *color == Styles::default().cell_background));
        assert!(matches!(&cmds[1], DrawCommand::StrokeRect { line_width, .. } if *line_width == 1.0));
        assert!(matches!(&cmds[2], DrawCommand::SetFont { .. }));
        match &cmds[3] {
            DrawCommand::FillText { text, x, y, .. } => {
                assert_eq!(text, "abc");
                assert_eq!(*x, 18.0);
                assert_eq!(*y, 40.0);
            }
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn header_wins_over_selection() {
        assert_eq!(CellKind::new(true, true), CellKind::Header);
        assert_eq!(CellKind::new(false, true), CellKind::Selected);
        let surface = paint(CellRect::new(0.0, 0.0, 50.0, 40.0), "", CellKind::Selected);
        assert!(matches!(&surface.commands()[0], DrawCommand::FillRect { color, .. } if *color == Styles::default().selected_background));
    }

    #[test]
    fn no_text_or_measurement_when_padding_eats_the_width() {
        let surface = paint(CellRect::new(0.0, 0.0, 16.0, 40.0), "value", CellKind::Body);
        assert_eq!(surface.text_count(), 0);
        assert_eq!(surface.measure_calls(), 0);
        assert_eq!(surface.commands().len(), 2);
    }

    #[test]
    fn font_is_set_once_per_pass() {
        let styles = Styles::default();
        let mut surface = RecordingSurface::new(400, 400);
        let mut fitter = TextFitter::new();
        let mut painter = CellPainter::new(&styles, CELL_PADDING);
        for i in 0..5 {
            let rect = CellRect::new(f64::from(i) * 100.0, 0.0, 100.0, 40.0);
            painter.paint(&mut surface, &mut fitter, rect, "x", CellKind::Body);
        }
        let fonts = surface
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::SetFont { .. }))
            .count();
        assert_eq!(fonts, 1);
        assert_eq!(surface.text_count(), 5);
    }
}
