//! File-backed text

use std::path::Path;

use textsrc_core::TextReader;

const UTF8_BOM: &str = "\u{feff}";

/// Reads text files from the local filesystem
///
/// Invalid UTF-8 is replaced rather than rejected, a leading byte order
/// mark is dropped, and any failure yields empty text.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsTextReader;

impl FsTextReader {
    pub fn new() -> Self {
        Self
    }
}

impl TextReader for FsTextReader {
    fn read_text(&self, path: &str) -> String {
        if path.is_empty() {
            return String::new();
        }

        match std::fs::read(Path::new(path)) {
            Ok(bytes) => {
                let text = String::from_utf8_lossy(&bytes);
                text.strip_prefix(UTF8_BOM).unwrap_or(&text).to_string()
            },
            Err(err) => {
                log::warn!("Failed to read text file '{}': {}", path, err);
                String::new()
            },
        }
    }
}
