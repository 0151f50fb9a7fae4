//! Column layout for a grid: descriptors, width overrides and column bands.
//!
//! Widths resolve as `override > intrinsic > default`. The identity column is
//! always first and is sized from its own override/default pair.

use std::collections::{HashMap, HashSet};

use crate::error::{GridError, Result};
use crate::types::GridColumn;

/// Which column a horizontal content offset falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnHit<'a> {
    /// The identity column (no data key).
    Identity,
    /// A data column, by key.
    Data(&'a str),
}

/// Column descriptors plus the override map layered over them.
#[derive(Debug, Clone)]
pub struct GridLayout<C> {
    columns: Vec<C>,
    overrides: HashMap<String, f64>,
    default_column_width: f64,
    id_column_key: String,
    id_column_width: f64,
}

impl<C: GridColumn> GridLayout<C> {
    pub fn new(id_column_key: &str, id_column_width: f64, default_column_width: f64) -> Self {
        Self {
            columns: Vec::new(),
            overrides: HashMap::new(),
            default_column_width,
            id_column_key: id_column_key.to_string(),
            id_column_width,
        }
    }

    pub fn columns(&self) -> &[C] {
        &self.columns
    }

    pub fn id_column_key(&self) -> &str {
        &self.id_column_key
    }

    pub fn overrides(&self) -> &HashMap<String, f64> {
        &self.overrides
    }

    /// Replace columns and overrides wholesale.
    pub fn replace(&mut self, columns: Vec<C>, overrides: HashMap<String, f64>) {
        self.columns = columns;
        self.overrides = overrides;
    }

    /// Merge width overrides; keys not mentioned keep their current value.
    pub fn set_column_widths<K, I>(&mut self, widths: I)
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, f64)>,
    {
        self.overrides
            .extend(widths.into_iter().map(|(k, w)| (k.into(), w)));
    }

    /// Effective width of a data column.
    pub fn column_width(&self, column: &C) -> f64 {
        self.overrides
            .get(column.key())
            .copied()
            .or_else(|| column.width())
            .unwrap_or(self.default_column_width)
    }

    /// Effective width of the identity column.
    pub fn id_column_width(&self) -> f64 {
        self.overrides
            .get(&self.id_column_key)
            .copied()
            .unwrap_or(self.id_column_width)
    }

    /// Data columns with their content-space left edge and width, in order.
    /// The first data column starts right after the identity column.
    pub fn column_bands(&self) -> impl Iterator<Item = (&C, f64, f64)> + '_ {
        let mut x = self.id_column_width();
        self.columns.iter().map(move |column| {
            let width = self.column_width(column);
            let left = x;
            x += width;
            (column, left, width)
        })
    }

    /// Content-space band `(left, width)` of the data column with `key`.
    pub fn column_band(&self, key: &str) -> Option<(f64, f64)> {
        self.column_bands()
            .find(|(column, _, _)| column.key() == key)
            .map(|(_, left, width)| (left, width))
    }

    /// Column containing the content-space offset `x`, if any.
    pub fn column_at(&self, x: f64) -> Option<ColumnHit<'_>> {
        if x < 0.0 {
            return None;
        }
        if x < self.id_column_width() {
            return Some(ColumnHit::Identity);
        }
        self.column_bands()
            .find(|(_, left, width)| x >= *left && x < left + width)
            .map(|(column, _, _)| ColumnHit::Data(column.key()))
    }

    /// Total width of identity plus data columns.
    pub fn total_width(&self) -> f64 {
        self.id_column_width()
            + self
                .columns
                .iter()
                .map(|column| self.column_width(column))
                .sum::<f64>()
    }

    /// Check the caller contract the render path does not enforce: non-empty,
    /// unique keys and positive finite widths.
    pub fn validate(&self) -> Result<()> {
        let id_width = self.id_column_width();
        if !(id_width.is_finite() && id_width > 0.0) {
            return Err(GridError::NonPositiveWidth {
                key: self.id_column_key.clone(),
                width: id_width,
            });
        }

        let mut seen = HashSet::with_capacity(self.columns.len());
        for (index, column) in self.columns.iter().enumerate() {
            let key = column.key();
            if key.is_empty() {
                return Err(GridError::EmptyColumnKey(index));
            }
            if key == self.id_column_key || !seen.insert(key) {
                return Err(GridError::DuplicateColumnKey(key.to_string()));
            }
            let width = self.column_width(column);
            if !(width.is_finite() && width > 0.0) {
                return Err(GridError::NonPositiveWidth {
                    key: key.to_string(),
                    width,
                });
            }
        }
        Ok(())
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
    use crate::types::ColumnDef;

    fn layout() -> GridLayout<ColumnDef> {
        let mut layout = GridLayout::new("__id__", 120.0, 150.0);
        layout.replace(
            vec![
                ColumnDef::new("a", "A").with_width(100.0),
                ColumnDef::new("b", "B"),
                ColumnDef::new("c", "C").with_width(200.0),
            ],
            HashMap::new(),
        );
        layout
    }

    #[test]
    fn width_precedence() {
        let mut layout = layout();
        let cols = layout.columns().to_vec();
        assert_eq!(layout.column_width(&cols[0]), 100.0);
        assert_eq!(layout.column_width(&cols[1]), 150.0);

        layout.set_column_widths([("a", 80.0)]);
        assert_eq!(layout.column_width(&cols[0]), 80.0);
    }

    #[test]
    fn id_width_uses_its_own_override() {
        let mut layout = layout();
        assert_eq!(layout.id_column_width(), 120.0);
        layout.set_column_widths([("__id__", 60.0)]);
        assert_eq!(layout.id_column_width(), 60.0);
    }

    #[test]
    fn bands_start_after_identity_column() {
        let layout = layout();
        let bands: Vec<(f64, f64)> = layout.column_bands().map(|(_, x, w)| (x, w)).collect();
        assert_eq!(bands, vec![(120.0, 100.0), (220.0, 150.0), (370.0, 200.0)]);
        assert_eq!(layout.total_width(), 570.0);
    }

    #[test]
    fn column_at_edges() {
        let layout = layout();
        assert_eq!(layout.column_at(-1.0), None);
        assert_eq!(layout.column_at(0.0), Some(ColumnHit::Identity));
        assert_eq!(layout.column_at(119.9), Some(ColumnHit::Identity));
        assert_eq!(layout.column_at(120.0), Some(ColumnHit::Data("a")));
        assert_eq!(layout.column_at(569.9), Some(ColumnHit::Data("c")));
        assert_eq!(layout.column_at(570.0), None);
    }

    #[test]
    fn validate_reports_contract_violations() {
        let mut layout = layout();
        assert!(layout.validate().is_ok());

        layout.set_column_widths([("b", 0.0)]);
        assert!(matches!(
            layout.validate(),
            Err(GridError::NonPositiveWidth { ref key, .. }) if key == "b"
        ));

        layout.replace(
            vec![ColumnDef::new("a", "A"), ColumnDef::new("a", "A again")],
            HashMap::new(),
        );
        assert!(matches!(
            layout.validate(),
            Err(GridError::DuplicateColumnKey(ref key)) if key == "a"
        ));

        layout.replace(vec![ColumnDef::new("", "Blank")], HashMap::new());
        assert!(matches!(layout.validate(), Err(GridError::EmptyColumnKey(0))));
    }
}
