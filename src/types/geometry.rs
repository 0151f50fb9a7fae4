use serde::{Deserialize, Serialize};

/// Logical address of a cell. `column_key` is `None` for the identity column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellAddress {
    pub row_index: usize,
    pub column_key: Option<String>,
}

impl CellAddress {
    pub fn new(row_index: usize, column_key: Option<&str>) -> Self {
        Self {
            row_index,
            column_key: column_key.map(str::to_string),
        }
    }

    pub fn is_identity(&self) -> bool {
        self.column_key.is_none()
    }
}

/// Rectangle in viewport-relative CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CellRect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// True if the horizontal band `[x, x + width)` overlaps `[0, extent)`.
    pub fn intersects_x(&self, extent: f64) -> bool {
        self.x + self.width > 0.0 && self.x < extent
    }
}
