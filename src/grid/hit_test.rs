//! Pointer coordinates to logical cells, and logical cells back to pixels.
//!
//! Both directions read the same layout and viewport as the frame pass, so
//! the center of [`GridRenderer::get_cell_rect`] always maps back to the same
//! cell through [`GridRenderer::get_cell_at`].

use super::GridRenderer;
use crate::layout::{ColumnHit, ViewportSource};
use crate::render::DrawSurface;
use crate::types::{CellAddress, CellRect, GridColumn, GridRow};

impl<S, H, C, R> GridRenderer<S, H, C, R>
where
    S: DrawSurface,
    H: ViewportSource,
    C: GridColumn,
    R: GridRow,
{
    /// Cell under a viewport-relative point, or `None` over the header band,
    /// below the last row, or right of the last column.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn get_cell_at(&self, x: f64, y: f64) -> Option<CellAddress> {
        let header_height = self.config.header_height;
        if y.is_nan() || y < header_height {
            return None;
        }
        let viewport = self.host.viewport();
        let row = viewport.row_at(y, self.config.cell_height, header_height);
        if !row.is_finite() || row < 0.0 || row >= self.rows.len() as f64 {
            return None;
        }
        let row_index = row as usize;

        match self.layout.column_at(x + viewport.scroll_left)? {
            ColumnHit::Identity => Some(CellAddress::new(row_index, None)),
            ColumnHit::Data(key) => Some(CellAddress::new(row_index, Some(key))),
        }
    }

    /// Viewport-relative rectangle of a cell; `column_key = None` is the
    /// identity column. `None` for an unknown row or column.
    pub fn get_cell_rect(&self, row_index: usize, column_key: Option<&str>) -> Option<CellRect> {
        if row_index >= self.rows.len() {
            return None;
        }
        let viewport = self.host.viewport();
        let cell_height = self.config.cell_height;
        let y = viewport.row_top(row_index, cell_height, self.config.header_height);
        let (left, width) = match column_key {
            None => (0.0, self.layout.id_column_width()),
            Some(key) => self.layout.column_band(key)?,
        };
        Some(CellRect::new(
            left - viewport.scroll_left,
            y,
            width,
            cell_height,
        ))
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
    use crate::layout::{FixedViewport, ViewportState};
    use crate::render::RecordingSurface;
    use crate::types::{ColumnDef, RecordRow};

    fn grid(rows: i64) -> GridRenderer<RecordingSurface, FixedViewport> {
        let config = GridConfig {
            id_column_width: 120.0,
            ..GridConfig::default()
        };
        let mut grid = GridRenderer::new(
            config,
            RecordingSurface::new(800, 600),
            FixedViewport::new(ViewportState::new(800.0, 600.0)),
        );
        grid.update_data(
            vec![
                ColumnDef::new("a", "A").with_width(100.0),
                ColumnDef::new("b", "B").with_width(150.0),
                ColumnDef::new("c", "C").with_width(200.0),
            ],
            (0..rows).map(RecordRow::new).collect(),
            HashMap::new(),
        );
        grid
    }

    #[test]
    fn point_in_first_data_column() {
        let grid = grid(10);
        assert_eq!(
            grid.get_cell_at(150.0, 60.0),
            Some(CellAddress::new(0, Some("a")))
        );
    }

    #[test]
    fn header_band_is_not_a_cell() {
        let grid = grid(10);
        assert_eq!(grid.get_cell_at(150.0, 39.9), None);
        assert_eq!(grid.get_cell_at(150.0, 0.0), None);
    }

    #[test]
    fn identity_column_has_no_key() {
        let grid = grid(10);
        let hit = grid.get_cell_at(10.0, 100.0).unwrap();
        assert_eq!(hit.row_index, 1);
        assert!(hit.is_identity());
    }

    #[test]
    fn past_last_column_or_row_is_none() {
        let grid = grid(3);
        assert_eq!(grid.get_cell_at(570.0, 60.0), None);
        assert_eq!(grid.get_cell_at(150.0, 40.0 + 3.0 * 40.0), None);
    }

    #[test]
    fn scroll_offsets_shift_the_hit() {
        let grid = grid(100);
        grid.host().set_scroll(100.0, 400.0);
        // x 150 + 100 = 250 lands in "b" (220..370); y row = (60 - 40 + 400) / 40
        assert_eq!(
            grid.get_cell_at(150.0, 60.0),
            Some(CellAddress::new(10, Some("b")))
        );
    }

    #[test]
    fn rect_accounts_for_scroll() {
        let grid = grid(100);
        grid.host().set_scroll(30.0, 80.0);
        let rect = grid.get_cell_rect(5, Some("c")).unwrap();
        assert_eq!(rect, CellRect::new(370.0 - 30.0, 40.0 + 200.0 - 80.0, 200.0, 40.0));
        let id = grid.get_cell_rect(5, None).unwrap();
        assert_eq!((id.x, id.width), (-30.0, 120.0));
    }

    #[test]
    fn rect_rejects_unknown_row_and_key() {
        let grid = grid(4);
        assert!(grid.get_cell_rect(4, None).is_none());
        assert!(grid.get_cell_rect(0, Some("missing")).is_none());
    }

    #[test]
    fn rect_center_maps_back_to_the_same_cell() {
        let grid = grid(50);
        grid.host().set_scroll(45.0, 130.0);
        for key in [None, Some("a"), Some("b"), Some("c")] {
            let rect = grid.get_cell_rect(7, key).unwrap();
            let (cx, cy) = rect.center();
            assert_eq!(grid.get_cell_at(cx, cy), Some(CellAddress::new(7, key)));
        }
    }

    #[test]
    fn update_data_refreshes_row_bounds() {
        let mut grid = grid(2);
        assert_eq!(grid.get_cell_at(150.0, 140.0), None);
        let columns = grid.layout().columns().to_vec();
        grid.update_data(columns, (0..5_i64).map(RecordRow::new).collect(), HashMap::new());
        assert_eq!(
            grid.get_cell_at(150.0, 140.0),
            Some(CellAddress::new(2, Some("a")))
        );
    }
}
