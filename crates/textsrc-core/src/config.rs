// this_file: crates/textsrc-core/src/config.rs

//! The settings record a host hands to a text source
//!
//! Hosts store source settings as a JSON object. Every key is optional;
//! missing keys take the defaults a freshly created source shows.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Face used when the settings name none
pub const DEFAULT_FACE: &str = "Arial";

/// Point size used when the settings name none
pub const DEFAULT_FACE_SIZE: i64 = 22;

/// Font part of the settings: `{"face": ..., "size": ..., "flags": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSettings {
    pub face: String,
    pub size: i64,
    /// Style bits, see [`crate::FontFlags`]
    pub flags: u32,
}

impl Default for FontSettings {
    fn default() -> Self {
        Self {
            face: DEFAULT_FACE.to_string(),
            size: DEFAULT_FACE_SIZE,
            flags: 0,
        }
    }
}

/// Raw configuration of one text source
///
/// Colors are `0xRRGGBB`, opacities are percentages. Enumerated strings are
/// kept verbatim; [`crate::RenderState::from_settings`] decides what they mean.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextSettings {
    pub text: String,
    pub read_from_file: bool,
    pub file: String,
    pub font: FontSettings,
    pub color: u32,
    pub opacity: u32,
    pub bk_color: u32,
    pub bk_opacity: u32,
    pub align: String,
    pub valign: String,
    pub vertical: bool,
    pub outline: bool,
    pub outline_size: u32,
    pub outline_color: u32,
    pub outline_opacity: u32,
    pub extents: bool,
    pub extents_wrap: bool,
    pub extents_cx: u32,
    pub extents_cy: u32,
}

impl Default for TextSettings {
    fn default() -> Self {
        Self {
            text: String::new(),
            read_from_file: false,
            file: String::new(),
            font: FontSettings::default(),
            color: 0xFF_FFFF,
            opacity: 100,
            bk_color: 0x00_0000,
            bk_opacity: 0,
            align: "left".to_string(),
            valign: "top".to_string(),
            vertical: false,
            outline: false,
            outline_size: 2,
            outline_color: 0xFF_FFFF,
            outline_opacity: 100,
            extents: false,
            extents_wrap: false,
            extents_cx: 100,
            extents_cy: 100,
        }
    }
}

impl TextSettings {
    /// Parse a JSON settings object, filling gaps with defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON settings file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Serialize back to pretty JSON
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
