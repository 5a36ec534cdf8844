//! Core error types for diagram editing
//!
//! The editing operations themselves never fail; errors only arise at the
//! boundaries: reading a persisted diagram file and running a layout strategy.

use thiserror::Error;

/// Core error types for diagram editing
#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("Invalid diagram file: {message}")]
    InvalidFile { message: String },

    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    #[error("Layout error: {message}")]
    LayoutError { message: String },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl DiagramError {
    /// Create a new invalid-file error
    pub fn invalid_file(message: impl Into<String>) -> Self {
        Self::InvalidFile {
            message: message.into(),
        }
    }

    /// Create a new layout error
    pub fn layout_error(message: impl Into<String>) -> Self {
        Self::LayoutError {
            message: message.into(),
        }
    }

    /// Returns true for errors caused by the content of a diagram file
    pub fn is_invalid_file(&self) -> bool {
        matches!(self, Self::InvalidFile { .. } | Self::Json { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_file_error() {
        let error = DiagramError::invalid_file("missing `edges` key");
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Invalid diagram file"));
        assert!(error_msg.contains("missing `edges` key"));
        assert!(error.is_invalid_file());
    }

    #[test]
    fn test_layout_error() {
        let error = DiagramError::layout_error("no position for node_3");
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Layout error"));
        assert!(error_msg.contains("node_3"));
        assert!(!error.is_invalid_file());
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: DiagramError = json_err.into();
        assert!(format!("{}", error).contains("JSON error"));
        assert!(error.is_invalid_file());
    }

    #[test]
    fn test_io_error_conversion() {
        use std::io;
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: DiagramError = io_err.into();
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("IO error"));
        assert!(error_msg.contains("File not found"));
    }
}
