//! Structured error types for the Vitae pagination pipeline.
//!
//! The pagination engine itself is total and never fails. Errors come from
//! the edges: parsing input JSON, reading a measurement surface before its
//! layout settled, and page geometry that leaves no room for content.

use thiserror::Error;

/// The unified error type returned by all public Vitae API functions.
#[derive(Debug, Error)]
pub enum VitaeError {
    /// JSON input failed to parse as a resume document or request.
    #[error("Failed to parse document: {source}{}", format_hint(.hint))]
    Parse {
        #[source]
        source: serde_json::Error,
        hint: String,
    },

    /// Heights were read from a measurement surface before layout settled,
    /// or the surface returned a different number of heights than blocks.
    #[error("Measurement not ready: {mounted} blocks mounted, {read} heights available")]
    MeasurementNotReady { mounted: usize, read: usize },

    /// A surface reported a height that cannot be stacked.
    #[error("Invalid height {height} for block '{key}'")]
    InvalidHeight { key: String, height: f64 },

    /// The page geometry leaves no usable content area.
    #[error("Invalid page geometry: {0}")]
    InvalidGeometry(String),

    /// A theme name outside the supported set.
    #[error("Unknown theme '{0}'. Expected one of: classic, executive, modern, sidebar, professional, elegant, creative")]
    UnknownTheme(String),

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, VitaeError>;

fn format_hint(hint: &str) -> String {
    if hint.is_empty() {
        String::new()
    } else {
        format!("\n  Hint: {hint}")
    }
}

impl From<serde_json::Error> for VitaeError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            serde_json::error::Category::Data => {
                "The JSON is valid but doesn't match the resume schema. Check field names and types.".to_string()
            }
            serde_json::error::Category::Eof => {
                "Unexpected end of input. Is the JSON truncated?".to_string()
            }
            serde_json::error::Category::Io => String::new(),
        };
        VitaeError::Parse { source: e, hint }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_errors_carry_a_hint() {
        let err: VitaeError = serde_json::from_str::<serde_json::Value>("{,}")
            .unwrap_err()
            .into();
        let msg = err.to_string();
        assert!(msg.starts_with("Failed to parse document"));
        assert!(msg.contains("trailing commas"));
    }

    #[test]
    fn measurement_error_reports_counts() {
        let err = VitaeError::MeasurementNotReady { mounted: 4, read: 0 };
        assert_eq!(
            err.to_string(),
            "Measurement not ready: 4 blocks mounted, 0 heights available"
        );
    }
}
