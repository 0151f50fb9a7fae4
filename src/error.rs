//! Structured error types for canvasgrid.
//!
//! Per-frame operations never fail; errors only come out of construction,
//! host data conversion, and the opt-in validation pass.

/// All errors that can occur while constructing or feeding a grid renderer.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// The canvas could not provide a 2D drawing context.
    #[error("2D context unavailable: {0}")]
    ContextUnavailable(String),

    /// Two columns share the same key.
    #[error("Duplicate column key: {0}")]
    DuplicateColumnKey(String),

    /// A column was given an empty key.
    #[error("Empty column key at position {0}")]
    EmptyColumnKey(usize),

    /// A resolved width is zero, negative, or not finite.
    #[error("Non-positive width {width} for column {key}")]
    NonPositiveWidth { key: String, width: f64 },

    /// Configuration values that cannot produce a usable grid.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Host data could not be converted.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

impl From<serde_json::Error> for GridError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<serde_wasm_bindgen::Error> for GridError {
    fn from(e: serde_wasm_bindgen::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<GridError> for wasm_bindgen::JsValue {
    fn from(e: GridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_column() {
        let err = GridError::NonPositiveWidth {
            key: "amount".to_string(),
            width: -5.0,
        };
        assert_eq!(err.to_string(), "Non-positive width -5 for column amount");
        assert_eq!(
            GridError::DuplicateColumnKey("name".to_string()).to_string(),
            "Duplicate column key: name"
        );
    }

    #[test]
    fn json_errors_become_serialization_errors() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: GridError = parse.unwrap_err().into();
        assert!(matches!(err, GridError::Serialization(_)));
    }
}
