//! The grid renderer: data, widths, styles and the surfaces it paints.
//!
//! A [`GridRenderer`] is built once per canvas + container pair. It never
//! schedules its own work: the host calls [`GridRenderer::resize`] when the
//! container's box changes and [`GridRenderer::render`] on scroll, data or
//! resize events. Every call is synchronous.
//!
//! - `frame` holds the main and header-only draw passes
//! - `hit_test` maps pointer coordinates to cells and back

mod frame;
mod hit_test;

use std::borrow::Cow;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub use frame::{FrameStats, RenderOptions};

use crate::error::{GridError, Result};
use crate::layout::{GridLayout, ViewportSource};
use crate::render::{DrawSurface, TextFitter, CELL_PADDING};
use crate::theme::StylesSource;
use crate::types::{ColumnDef, GridColumn, GridRow, RecordRow, RowId};

/// Host hook turning a raw cell value into display text: `(raw, column_key)`.
pub type CellFormatter = Box<dyn Fn(&str, &str) -> String>;

/// Static sizing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridConfig {
    /// Height of every body row, in CSS pixels
    pub cell_height: f64,
    /// Height of the header band, in CSS pixels
    pub header_height: f64,
    /// Override key reserved for the identity column
    pub id_column_key: String,
    pub id_column_width: f64,
    /// Label painted in the identity column's header cell
    pub id_header_label: String,
    /// Width for columns with neither override nor intrinsic width
    pub default_column_width: f64,
    /// Horizontal text padding on each side of a cell
    pub cell_padding: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_height: 40.0,
            header_height: 40.0,
            id_column_key: "__id__".to_string(),
            id_column_width: 80.0,
            id_header_label: "ID".to_string(),
            default_column_width: 150.0,
            cell_padding: CELL_PADDING,
        }
    }
}

impl GridConfig {
    /// Reject sizes that cannot produce a usable grid.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("cellHeight", self.cell_height),
            ("idColumnWidth", self.id_column_width),
            ("defaultColumnWidth", self.default_column_width),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(GridError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        let non_negative = [
            ("headerHeight", self.header_height),
            ("cellPadding", self.cell_padding),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(GridError::InvalidConfig(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }
        if self.id_column_key.is_empty() {
            return Err(GridError::InvalidConfig(
                "idColumnKey must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Virtualized grid renderer over a drawing surface `S` and a viewport host `H`.
pub struct GridRenderer<S, H, C = ColumnDef, R = RecordRow> {
    config: GridConfig,
    surface: S,
    host: H,
    layout: GridLayout<C>,
    rows: Vec<R>,
    styles: StylesSource,
    formatter: Option<CellFormatter>,
    fitter: TextFitter,
    selected_row: Option<RowId>,
}

impl<S, H, C, R> GridRenderer<S, H, C, R>
where
    S: DrawSurface,
    H: ViewportSource,
    C: GridColumn,
    R: GridRow,
{
    pub fn new(config: GridConfig, surface: S, host: H) -> Self {
        let layout = GridLayout::new(
            &config.id_column_key,
            config.id_column_width,
            config.default_column_width,
        );
        Self {
            config,
            surface,
            host,
            layout,
            rows: Vec::new(),
            styles: StylesSource::default(),
            formatter: None,
            fitter: TextFitter::new(),
            selected_row: None,
        }
    }

    /// Use a static or dynamic style source.
    #[must_use]
    pub fn with_styles(mut self, styles: StylesSource) -> Self {
        self.styles = styles;
        self
    }

    /// Install a display formatter for data cells.
    #[must_use]
    pub fn with_formatter<F>(mut self, formatter: F) -> Self
    where
        F: Fn(&str, &str) -> String + 'static,
    {
        self.formatter = Some(Box::new(formatter));
        self
    }

    pub fn set_styles(&mut self, styles: StylesSource) {
        self.styles = styles;
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn layout(&self) -> &GridLayout<C> {
        &self.layout
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn text_fitter(&self) -> &TextFitter {
        &self.fitter
    }

    /// Reallocate the backing store for the host's current client box and DPR.
    pub fn resize(&mut self) {
        let viewport = self.host.viewport();
        let (physical_w, physical_h) = viewport.physical_size();
        self.surface.set_backing_size(
            physical_w,
            physical_h,
            viewport.width.max(0.0),
            viewport.height.max(0.0),
        );
    }

    /// Replace columns, rows and width overrides wholesale.
    pub fn update_data(
        &mut self,
        columns: Vec<C>,
        rows: Vec<R>,
        column_widths: HashMap<String, f64>,
    ) {
        self.layout.replace(columns, column_widths);
        self.rows = rows;
    }

    /// Merge width overrides; keys not mentioned keep their current value.
    pub fn set_column_widths<K, I>(&mut self, widths: I)
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, f64)>,
    {
        self.layout.set_column_widths(widths);
    }

    /// Highlight the row with this identity, or clear the highlight.
    pub fn set_selected_row(&mut self, row_id: Option<RowId>) {
        self.selected_row = row_id;
    }

    pub fn selected_row(&self) -> Option<&RowId> {
        self.selected_row.as_ref()
    }

    /// Opt-in check of the caller contract the render path does not enforce.
    pub fn validate(&self) -> Result<()> {
        self.config.validate()?;
        self.layout.validate()
    }

    /// Total scrollable width: identity plus data columns.
    pub fn content_width(&self) -> f64 {
        self.layout.total_width()
    }

    /// Total scrollable height: header plus all rows.
    #[allow(clippy::cast_precision_loss)]
    pub fn content_height(&self) -> f64 {
        self.config.header_height + self.rows.len() as f64 * self.config.cell_height
    }
}

/// Display text for a data cell, through the host formatter when one is set.
fn display_value<'a, R: GridRow>(
    formatter: Option<&CellFormatter>,
    row: &'a R,
    column_key: &str,
) -> Cow<'a, str> {
    let raw = row.cell_value(column_key);
    match formatter {
        Some(format) => Cow::Owned(format(&*raw, column_key)),
        None => raw,
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
    use crate::layout::{FixedViewport, ViewportState};
    use crate::render::RecordingSurface;

    type TestGrid = GridRenderer<RecordingSurface, FixedViewport>;

    fn grid() -> TestGrid {
        GridRenderer::new(
            GridConfig::default(),
            RecordingSurface::new(1, 1),
            FixedViewport::new(ViewportState::new(640.0, 480.0)),
        )
    }

    #[test]
    fn config_defaults_from_partial_json() {
        let config: GridConfig = serde_json::from_str(r#"{"cellHeight": 28}"#).unwrap();
        assert_eq!(config.cell_height, 28.0);
        assert_eq!(config.id_column_key, "__id__");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_rejects_zero_cell_height() {
        let config = GridConfig {
            cell_height: 0.0,
            ..GridConfig::default()
        };
        assert!(matches!(config.validate(), Err(GridError::InvalidConfig(_))));
    }

    #[test]
    fn resize_scales_backing_store_by_dpr() {
        let mut grid = grid();
        grid.host().set_dpr(2.0);
        grid.resize();
        assert_eq!(grid.surface().backing_size(), (1280, 960));
        assert_eq!(grid.surface().css_size(), (640.0, 480.0));
    }

    #[test]
    fn content_extent_tracks_data() {
        let mut grid = grid();
        grid.update_data(
            vec![ColumnDef::new("a", "A").with_width(100.0), ColumnDef::new("b", "B")],
            (0..10_i64).map(RecordRow::new).collect(),
            HashMap::new(),
        );
        assert_eq!(grid.content_width(), 80.0 + 100.0 + 150.0);
        assert_eq!(grid.content_height(), 40.0 + 10.0 * 40.0);
    }

    #[test]
    fn formatter_applies_to_data_values() {
        let grid = grid().with_formatter(|raw, key| format!("{key}={raw}"));
        let row = RecordRow::new(1).with("amount", "5");
        assert_eq!(
            display_value(grid.formatter.as_ref(), &row, "amount"),
            "amount=5"
        );
        assert_eq!(display_value(None, &row, "amount"), "5");
    }
}
