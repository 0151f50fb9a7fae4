//! Frame and header-only draw passes.
//!
//! Ordering matters: transform and clear, header band, clip below the
//! header, then only the rows and columns that intersect the viewport.

use serde::{Deserialize, Serialize};

use super::{display_value, GridRenderer};
use crate::layout::{GridLayout, RowWindow, ViewportSource, ViewportState};
use crate::render::{CellKind, CellPainter, DrawContext, DrawSurface, TextFitter};
use crate::types::{CellRect, GridColumn, GridRow};

/// Per-call render switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderOptions {
    /// Leave the header band to a separately painted header surface.
    pub skip_header: bool,
}

/// What a render pass actually drew.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameStats {
    /// Rows iterated this frame, if any
    pub row_window: Option<RowWindow>,
    pub rows_drawn: usize,
    /// Body cells painted, identity cells included
    pub cells_drawn: usize,
    pub header_cells_drawn: usize,
}

/// Paint the header band at `y = 0`, identity cell first. Cells outside
/// `[0, viewport.width)` are skipped without any draw call.
fn paint_header<D, C>(
    ctx: &mut D,
    fitter: &mut TextFitter,
    painter: &mut CellPainter<'_>,
    layout: &GridLayout<C>,
    viewport: &ViewportState,
    header_height: f64,
    id_label: &str,
) -> usize
where
    D: DrawContext + ?Sized,
    C: GridColumn,
{
    let mut drawn = 0;
    let id_rect = CellRect::new(
        -viewport.scroll_left,
        0.0,
        layout.id_column_width(),
        header_height,
    );
    if id_rect.intersects_x(viewport.width) {
        painter.paint(ctx, fitter, id_rect, id_label, CellKind::Header);
        drawn += 1;
    }

    for (column, left, width) in layout.column_bands() {
        let rect = CellRect::new(left - viewport.scroll_left, 0.0, width, header_height);
        if !rect.intersects_x(viewport.width) {
            continue;
        }
        painter.paint(ctx, fitter, rect, column.header_label(), CellKind::Header);
        drawn += 1;
    }
    drawn
}

impl<S, H, C, R> GridRenderer<S, H, C, R>
where
    S: DrawSurface,
    H: ViewportSource,
    C: GridColumn,
    R: GridRow,
{
    /// Draw one frame for the host's current scroll position and size.
    pub fn render(&mut self, options: RenderOptions) -> FrameStats {
        let viewport = self.host.viewport();
        let styles = self.styles.resolve();
        let cell_height = self.config.cell_height;
        let header_height = self.config.header_height;
        let mut stats = FrameStats::default();

        let surface = &mut self.surface;
        let fitter = &mut self.fitter;
        let mut painter = CellPainter::new(&styles, self.config.cell_padding);

        surface.apply_dpr(viewport.effective_dpr());
        surface.clear_rect(0.0, 0.0, viewport.width, viewport.height);
        surface.fill_rect(
            0.0,
            0.0,
            viewport.width,
            viewport.height,
            &styles.cell_background,
        );

        if !options.skip_header {
            stats.header_cells_drawn = paint_header(
                surface,
                fitter,
                &mut painter,
                &self.layout,
                &viewport,
                header_height,
                &self.config.id_header_label,
            );
        }

        // Rows may land above the header during fast scroll; the clip keeps
        // them out of the header band.
        surface.save();
        surface.clip_rect(
            0.0,
            header_height,
            viewport.width,
            (viewport.height - header_height).max(0.0),
        );

        stats.row_window = viewport.row_window(self.rows.len(), cell_height, header_height);
        if let Some(window) = stats.row_window {
            let id_width = self.layout.id_column_width();
            for index in window.start..=window.end {
                let Some(row) = self.rows.get(index) else {
                    break;
                };
                let y = viewport.row_top(index, cell_height, header_height);
                let on_screen = y + cell_height >= 0.0 && y <= viewport.height;
                if !on_screen {
                    continue;
                }

                let row_id = row.row_id();
                let selected = self.selected_row.as_ref() == Some(&row_id);
                let kind = CellKind::new(false, selected);

                let id_rect = CellRect::new(-viewport.scroll_left, y, id_width, cell_height);
                if id_rect.intersects_x(viewport.width) {
                    painter.paint(surface, fitter, id_rect, &row_id.to_string(), kind);
                    stats.cells_drawn += 1;
                }

                for (column, left, width) in self.layout.column_bands() {
                    let rect = CellRect::new(left - viewport.scroll_left, y, width, cell_height);
                    if !rect.intersects_x(viewport.width) {
                        continue;
                    }
                    let value = display_value(self.formatter.as_ref(), row, column.key());
                    painter.paint(surface, fitter, rect, &value, kind);
                    stats.cells_drawn += 1;
                }
                stats.rows_drawn += 1;
            }
        }

        surface.restore();
        stats
    }

    /// Repaint only the header band onto a separate surface, e.g. a pinned
    /// header canvas. Uses the same scroll position and column layout as
    /// [`GridRenderer::render`], so both stay horizontally in sync.
    ///
    /// Returns the number of header cells drawn.
    pub fn render_header<T: DrawSurface + ?Sized>(&mut self, header: &mut T) -> usize {
        let viewport = self.host.viewport();
        let styles = self.styles.resolve();
        let mut painter = CellPainter::new(&styles, self.config.cell_padding);

        header.clear_all();
        header.apply_dpr(viewport.effective_dpr());
        paint_header(
            header,
            &mut self.fitter,
            &mut painter,
            &self.layout,
            &viewport,
            self.config.header_height,
            &self.config.id_header_label,
        )
    }

    /// Size a header surface to the viewport width and header height.
    pub fn resize_header<T: DrawSurface + ?Sized>(&self, header: &mut T) {
        let mut band = self.host.viewport();
        band.height = self.config.header_height;
        let (physical_w, physical_h) = band.physical_size();
        header.set_backing_size(
            physical_w,
            physical_h,
            band.width.max(0.0),
            band.height.max(0.0),
        );
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
    use std::collections::HashMap;

    use super::*;
    use crate::grid::GridConfig;
    use crate::layout::FixedViewport;
    use crate::render::{DrawCommand, RecordingSurface};
    use crate::types::{ColumnDef, RecordRow, RowId, Styles};

    fn grid(rows: i64, width: f64, height: f64) -> GridRenderer<RecordingSurface, FixedViewport> {
        let config = GridConfig {
            id_column_width: 120.0,
            ..GridConfig::default()
        };
        let mut grid = GridRenderer::new(
            config,
            RecordingSurface::new(1, 1),
            FixedViewport::new(ViewportState::new(width, height)),
        );
        grid.update_data(
            vec![
                ColumnDef::new("a", "Alpha").with_width(100.0),
                ColumnDef::new("b", "Beta").with_width(150.0),
                ColumnDef::new("c", "Gamma").with_width(200.0),
            ],
            (0..rows)
                .map(|i| RecordRow::new(i).with("a", format!("a{i}")))
                .collect(),
            HashMap::new(),
        );
        grid
    }

    fn fills_with(surface: &RecordingSurface, color: &str) -> usize {
        surface
            .commands()
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::FillRect { color: fill, .. } if fill == color))
            .count()
    }

    #[test]
    fn draws_exactly_the_visible_window_with_slack() {
        let mut grid = grid(1000, 800.0, 400.0);
        grid.host().set_scroll(0.0, 760.0);
        let stats = grid.render(RenderOptions::default());
        assert_eq!(stats.row_window, Some(RowWindow { start: 17, end: 28 }));
        assert_eq!(stats.rows_drawn, 12);
        assert_eq!(stats.cells_drawn, 12 * 4);
        assert_eq!(stats.header_cells_drawn, 4);
        let texts = grid.surface().texts();
        assert!(texts.contains(&"17"));
        assert!(texts.contains(&"a28"));
        assert!(!texts.contains(&"16"));
        assert!(!texts.contains(&"29"));
    }

    #[test]
    fn frame_starts_with_transform_and_clear() {
        let mut grid = grid(3, 640.0, 480.0);
        grid.host().set_dpr(2.0);
        grid.render(RenderOptions::default());
        let commands = grid.surface().commands();
        assert_eq!(
            commands[0],
            DrawCommand::SetTransform {
                a: 2.0,
                b: 0.0,
                c: 0.0,
                d: 2.0,
                e: 0.0,
                f: 0.0
            }
        );
        assert_eq!(
            commands[1],
            DrawCommand::ClearRect {
                x: 0.0,
                y: 0.0,
                w: 640.0,
                h: 480.0
            }
        );
        assert!(matches!(
            &commands[2],
            DrawCommand::FillRect { color, .. } if *color == Styles::default().cell_background
        ));
    }

    #[test]
    fn body_is_clipped_below_header() {
        let mut grid = grid(3, 800.0, 400.0);
        grid.render(RenderOptions::default());
        let commands = grid.surface().commands();
        let save = commands.iter().position(|c| *c == DrawCommand::Save).unwrap();
        assert_eq!(
            commands[save + 1],
            DrawCommand::ClipRect {
                x: 0.0,
                y: 40.0,
                w: 800.0,
                h: 360.0
            }
        );
        assert_eq!(commands.last(), Some(&DrawCommand::Restore));
    }

    #[test]
    fn skip_header_leaves_header_band_alone() {
        let mut grid = grid(3, 800.0, 400.0);
        let stats = grid.render(RenderOptions { skip_header: true });
        assert_eq!(stats.header_cells_drawn, 0);
        assert!(!grid.surface().texts().contains(&"Alpha"));
        assert_eq!(fills_with(grid.surface(), &Styles::default().header_background), 0);
    }

    #[test]
    fn offscreen_columns_issue_no_draw_calls() {
        let mut grid = grid(1, 200.0, 400.0);
        let stats = grid.render(RenderOptions::default());
        // id 0..120 and "a" 120..220 intersect a 200px viewport
        assert_eq!(stats.header_cells_drawn, 2);
        assert_eq!(stats.cells_drawn, 2);

        grid.surface_mut().take_commands();
        grid.host().set_scroll(300.0, 0.0);
        let stats = grid.render(RenderOptions::default());
        // "b" at -80..70 and "c" at 70..270
        assert_eq!(stats.header_cells_drawn, 2);
        let texts = grid.surface().texts();
        assert!(texts.contains(&"Beta"));
        assert!(texts.contains(&"Gamma"));
        assert!(!texts.contains(&"ID"));
        assert!(!texts.contains(&"Alpha"));
    }

    #[test]
    fn empty_grid_draws_header_only() {
        let mut grid = grid(0, 800.0, 400.0);
        let stats = grid.render(RenderOptions::default());
        assert_eq!(stats.row_window, None);
        assert_eq!(stats.rows_drawn, 0);
        assert_eq!(stats.header_cells_drawn, 4);
    }

    #[test]
    fn selected_row_uses_selected_background() {
        let mut grid = grid(10, 800.0, 400.0);
        grid.set_selected_row(Some(RowId::from(2)));
        grid.render(RenderOptions::default());
        assert_eq!(
            fills_with(grid.surface(), &Styles::default().selected_background),
            4
        );

        grid.set_selected_row(None);
        grid.surface_mut().take_commands();
        grid.render(RenderOptions::default());
        assert_eq!(
            fills_with(grid.surface(), &Styles::default().selected_background),
            0
        );
    }

    #[test]
    fn header_surface_follows_horizontal_scroll() {
        let mut grid = grid(5, 300.0, 400.0);
        grid.host().set_scroll(150.0, 0.0);
        grid.host().set_dpr(2.0);
        let mut header = RecordingSurface::new(1, 1);
        grid.resize_header(&mut header);
        assert_eq!(header.backing_size(), (600, 80));

        let drawn = grid.render_header(&mut header);
        // id -150..-30 is gone; a -30..70, b 70..220, c 220..420
        assert_eq!(drawn, 3);
        let commands = header.commands();
        assert_eq!(
            commands[1],
            DrawCommand::ClearRect {
                x: 0.0,
                y: 0.0,
                w: 600.0,
                h: 80.0
            }
        );
        assert!(matches!(commands[2], DrawCommand::SetTransform { a, .. } if a == 2.0));
        assert!(matches!(
            &commands[3],
            DrawCommand::FillRect { x, y, .. } if *x == -30.0 && *y == 0.0
        ));
        assert_eq!(header.texts(), vec!["Alpha", "Beta", "Gamma"]);
        assert!(grid.surface().commands().is_empty());
    }
}
