//! Error types for textsrc
//!
//! Nothing here ever escapes `TextSource::update`: every stage logs its own
//! failures and carries on with degraded output. The types exist so stages
//! can report *what* went wrong before the caller decides how to degrade.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TextSourceError>;

/// Main error type for textsrc
#[derive(Debug, Error)]
pub enum TextSourceError {
    #[error("Font loading failed: {0}")]
    FontLoad(#[from] FontLoadError),

    #[error("Rendering failed: {0}")]
    RenderingFailed(#[from] RenderError),

    #[error("Texture operation failed: {0}")]
    Texture(#[from] TextureError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Font loading errors
#[derive(Debug, Error)]
pub enum FontLoadError {
    #[error("Font family not found: {0}")]
    FamilyNotFound(String),

    #[error("Empty font face name")]
    EmptyFaceName,

    #[error("Invalid font data")]
    InvalidData,

    #[error("Font file not found: {0}")]
    FileNotFound(String),
}

/// Rendering errors
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Pixmap creation failed for {width}x{height}")]
    PixmapCreationFailed { width: u32, height: u32 },

    #[error("Path building failed")]
    PathBuildingFailed,

    #[error("Invalid rectangle: {0}")]
    InvalidRect(String),
}

/// Host texture errors
#[derive(Debug, Error)]
pub enum TextureError {
    #[error("Texture creation failed for {width}x{height}")]
    CreationFailed { width: u32, height: u32 },

    #[error("Unknown texture handle: {0}")]
    UnknownHandle(u64),

    #[error("Pixel data has {actual} bytes, expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// Image export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Buffer too small: expected {expected} bytes for {width}x{height}, got {actual}")]
    BufferTooSmall {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Settings parsing errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Malformed settings: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Cannot read settings file {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_errors_convert() {
        let err: TextSourceError = FontLoadError::FamilyNotFound("Nope".into()).into();
        assert_eq!(
            err.to_string(),
            "Font loading failed: Font family not found: Nope"
        );

        let err: TextSourceError = TextureError::CreationFailed {
            width: 32,
            height: 64,
        }
        .into();
        assert!(err.to_string().contains("32x64"));

        let err: TextSourceError = RenderError::PixmapCreationFailed {
            width: 0,
            height: 0,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Rendering failed: Pixmap creation failed for 0x0"
        );
    }
}
