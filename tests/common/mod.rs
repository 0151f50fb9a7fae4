//! Common test utilities and grid builders.
//!
//! Every integration test drives the engine headlessly: a
//! `RecordingSurface` stands in for the canvas and a `FixedViewport` for the
//! scroll container.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_lossless
)]

use std::collections::HashMap;

use canvasgrid::{
    ColumnDef, DrawCommand, FixedViewport, GridConfig, GridRenderer, RecordRow,
    RecordingSurface, ViewportState,
};

pub type TestGrid = GridRenderer<RecordingSurface, FixedViewport>;

// ============================================================================
// Builders
// ============================================================================

/// Fluent builder for a headless grid.
pub struct GridBuilder {
    config: GridConfig,
    viewport: ViewportState,
    columns: Vec<ColumnDef>,
    rows: Vec<RecordRow>,
    widths: HashMap<String, f64>,
}

impl GridBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: GridConfig::default(),
            viewport: ViewportState::new(800.0, 600.0),
            columns: Vec::new(),
            rows: Vec::new(),
            widths: HashMap::new(),
        }
    }

    #[must_use]
    pub fn config(mut self, config: GridConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn id_column_width(mut self, width: f64) -> Self {
        self.config.id_column_width = width;
        self
    }

    #[must_use]
    pub fn viewport(mut self, width: f64, height: f64) -> Self {
        self.viewport.width = width;
        self.viewport.height = height;
        self
    }

    #[must_use]
    pub fn scroll(mut self, scroll_left: f64, scroll_top: f64) -> Self {
        self.viewport.scroll_left = scroll_left;
        self.viewport.scroll_top = scroll_top;
        self
    }

    #[must_use]
    pub fn dpr(mut self, dpr: f64) -> Self {
        self.viewport.dpr = dpr;
        self
    }

    /// Add a column with an intrinsic width, labelled with its upper-cased key.
    #[must_use]
    pub fn column(mut self, key: &str, width: f64) -> Self {
        self.columns
            .push(ColumnDef::new(key, key.to_uppercase()).with_width(width));
        self
    }

    /// Add a column that falls back to the default width.
    #[must_use]
    pub fn default_width_column(mut self, key: &str) -> Self {
        self.columns.push(ColumnDef::new(key, key.to_uppercase()));
        self
    }

    #[must_use]
    pub fn width_override(mut self, key: &str, width: f64) -> Self {
        self.widths.insert(key.to_string(), width);
        self
    }

    /// Add `count` rows with ids `0..count`; each cell holds `<key><row>`.
    #[must_use]
    pub fn rows(mut self, count: usize) -> Self {
        let keys: Vec<String> = self.columns.iter().map(|c| c.key.clone()).collect();
        self.rows = (0..count as i64)
            .map(|i| {
                keys.iter()
                    .fold(RecordRow::new(i), |row, key| row.with(key.clone(), format!("{key}{i}")))
            })
            .collect();
        self
    }

    #[must_use]
    pub fn row(mut self, row: RecordRow) -> Self {
        self.rows.push(row);
        self
    }

    pub fn build(self) -> TestGrid {
        let mut grid = GridRenderer::new(
            self.config,
            RecordingSurface::new(1, 1),
            FixedViewport::new(self.viewport),
        );
        grid.update_data(self.columns, self.rows, self.widths);
        grid.resize();
        grid
    }
}

impl Default for GridBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Three data columns 100/150/200 behind a 120px identity column.
pub fn three_column_grid(rows: usize) -> GridBuilder {
    GridBuilder::new()
        .id_column_width(120.0)
        .column("a", 100.0)
        .column("b", 150.0)
        .column("c", 200.0)
        .rows(rows)
}

// ============================================================================
// Command inspection
// ============================================================================

/// `FillRect` commands painted with `color`.
pub fn fills_with<'a>(commands: &'a [DrawCommand], color: &str) -> Vec<&'a DrawCommand> {
    commands
        .iter()
        .filter(|cmd| matches!(cmd, DrawCommand::FillRect { color: fill, .. } if fill == color))
        .collect()
}

/// Text drawn by every `FillText`, paired with its x position.
pub fn texts_with_x(commands: &[DrawCommand]) -> Vec<(&str, f64)> {
    commands
        .iter()
        .filter_map(|cmd| match cmd {
            DrawCommand::FillText { text, x, .. } => Some((text.as_str(), *x)),
            _ => None,
        })
        .collect()
}

/// Commands issued after the body clip was established.
pub fn body_commands(commands: &[DrawCommand]) -> &[DrawCommand] {
    let start = commands
        .iter()
        .position(|cmd| matches!(cmd, DrawCommand::ClipRect { .. }))
        .expect("frame has no body clip");
    &commands[start + 1..]
}
