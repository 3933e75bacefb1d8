//! Structured error types for circlegrid.
//!
//! The packing core is total and never returns an error; everything that
//! validates input, persists state or talks to a rendering surface uses
//! these types.

/// All errors that can occur around grid packing and rendering.
#[derive(Debug, thiserror::Error)]
pub enum CircleGridError {
    /// Surface dimensions that are not finite and positive.
    #[error("Invalid surface {width}x{height}: dimensions must be finite and positive")]
    InvalidSurface { width: f64, height: f64 },

    /// More circles than the viewer will lay out and draw.
    #[error("Circle count {count} exceeds the maximum of {max}")]
    CountTooLarge { count: u32, max: u32 },

    /// The packer produced a cell side that cannot be rendered.
    #[error("Cell side {0} is not a finite positive number")]
    NonFiniteCellSide(f64),

    /// Persisted count could not be read or written.
    #[error("Count store: {0}")]
    Store(String),

    /// Rendering error.
    #[error("Render error: {0}")]
    Render(String),

    /// JSON (de)serialization error.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CircleGridError>;

impl From<String> for CircleGridError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for CircleGridError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<CircleGridError> for wasm_bindgen::JsValue {
    fn from(e: CircleGridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn invalid_surface_message_names_dimensions() {
        let err = CircleGridError::InvalidSurface {
            width: 0.0,
            height: 480.0,
        };
        assert_eq!(
            err.to_string(),
            "Invalid surface 0x480: dimensions must be finite and positive"
        );
    }

    #[test]
    fn count_too_large_message() {
        let err = CircleGridError::CountTooLarge {
            count: 20_000,
            max: 10_000,
        };
        assert_eq!(
            err.to_string(),
            "Circle count 20000 exceeds the maximum of 10000"
        );
    }

    #[test]
    fn string_conversions_use_other() {
        let err: CircleGridError = "boom".into();
        assert!(matches!(err, CircleGridError::Other(ref s) if s == "boom"));
    }
}
