use serde::{Deserialize, Serialize};

/// A column as seen by the grid engine.
///
/// Keys must be non-empty and unique within a grid instance. The engine does
/// not check this while rendering; see [`crate::grid::GridRenderer::validate`].
pub trait GridColumn {
    /// Stable identity of the column, used for width overrides and cell lookup.
    fn key(&self) -> &str;

    /// Intrinsic width in CSS pixels, if the column declares one.
    fn width(&self) -> Option<f64>;

    /// Label painted in the header band.
    fn header_label(&self) -> &str;
}

/// Plain column descriptor, as supplied by JavaScript hosts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDef {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default)]
    pub header_label: String,
}

impl ColumnDef {
    pub fn new(key: impl Into<String>, header_label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            width: None,
            header_label: header_label.into(),
        }
    }

    /// Builder-style intrinsic width.
    #[must_use]
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }
}

impl GridColumn for ColumnDef {
    fn key(&self) -> &str {
        &self.key
    }

    fn width(&self) -> Option<f64> {
        self.width
    }

    fn header_label(&self) -> &str {
        &self.header_label
    }
}

impl<T: GridColumn + ?Sized> GridColumn for Box<T> {
    fn key(&self) -> &str {
        (**self).key()
    }

    fn width(&self) -> Option<f64> {
        (**self).width()
    }

    fn header_label(&self) -> &str {
        (**self).header_label()
    }
}
