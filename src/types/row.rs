use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Stable identifier shown in the identity column.
///
/// Integral ids deserialize as [`RowId::Number`]; fractional or
/// out-of-range JS numbers land in [`RowId::Float`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    Number(i64),
    Float(FloatId),
    Text(String),
}

/// Non-integral numeric id, compared and hashed by bit pattern.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FloatId(pub f64);

impl PartialEq for FloatId {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for FloatId {}

impl Hash for FloatId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Float(FloatId(n)) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RowId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for RowId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for RowId {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// A row as seen by the grid engine: two pure accessors, no engine-side state.
pub trait GridRow {
    /// Raw display value for the given column key. Missing values are empty.
    fn cell_value(&self, column_key: &str) -> Cow<'_, str>;

    fn row_id(&self) -> RowId;
}

/// Row backed by a key/value map, as supplied by JavaScript hosts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordRow {
    pub id: RowId,
    #[serde(default)]
    pub values: HashMap<String, String>,
}

impl RecordRow {
    pub fn new(id: impl Into<RowId>) -> Self {
        Self {
            id: id.into(),
            values: HashMap::new(),
        }
    }

    /// Builder-style cell value.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl GridRow for RecordRow {
    fn cell_value(&self, column_key: &str) -> Cow<'_, str> {
        self.values
            .get(column_key)
            .map_or(Cow::Borrowed(""), |v| Cow::Borrowed(v.as_str()))
    }

    fn row_id(&self) -> RowId {
        self.id.clone()
    }
}

impl<T: GridRow + ?Sized> GridRow for Box<T> {
    fn cell_value(&self, column_key: &str) -> Cow<'_, str> {
        (**self).cell_value(column_key)
    }

    fn row_id(&self) -> RowId {
        (**self).row_id()
    }
}
