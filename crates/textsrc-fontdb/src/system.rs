//! Font discovery through fontdb

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;

use textsrc_core::{
    error::{FontLoadError, Result},
    traits::{FontFace, FontProvider},
    FontFlags,
};

use crate::face::SkrifaFace;

/// Weight at and above which a face counts as a bold design
const BOLD_WEIGHT: u16 = 600;

/// Your font library: every face fontdb could find, parsed lazily
///
/// Parsed faces are cached by database id, so sources that share a
/// `SystemFonts` also share font bytes.
pub struct SystemFonts {
    db: fontdb::Database,
    faces: Mutex<HashMap<fontdb::ID, Arc<SkrifaFace>>>,
}

impl SystemFonts {
    /// Starts with an empty library
    pub fn new() -> Self {
        Self {
            db: fontdb::Database::new(),
            faces: Mutex::new(HashMap::new()),
        }
    }

    /// A library holding every font installed on this machine
    pub fn with_system_fonts() -> Self {
        let mut fonts = Self::new();
        fonts.db.load_system_fonts();
        log::debug!("Loaded {} system font faces", fonts.db.len());
        fonts
    }

    /// Adds every font file found under `dir`
    pub fn load_fonts_dir(&mut self, dir: impl AsRef<Path>) {
        let before = self.db.len();
        self.db.load_fonts_dir(dir.as_ref());
        log::debug!(
            "Loaded {} font faces from {}",
            self.db.len() - before,
            dir.as_ref().display()
        );
    }

    /// Adds one font file
    pub fn load_font_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.db
            .load_font_file(path.as_ref())
            .map_err(|_| FontLoadError::FileNotFound(path.as_ref().display().to_string()).into())
    }

    /// Adds a font from memory
    pub fn load_font_data(&mut self, data: Vec<u8>) {
        self.db.load_font_data(data);
    }

    /// Number of faces known to the library
    pub fn face_count(&self) -> usize {
        self.db.len()
    }

    /// Sorted, de-duplicated family names
    pub fn families(&self) -> Vec<String> {
        let mut families: Vec<String> = self
            .db
            .faces()
            .filter_map(|face| face.families.first().map(|(name, _)| name.clone()))
            .collect();
        families.sort();
        families.dedup();
        families
    }

    fn load_by_id(&self, id: fontdb::ID, family: &str) -> Result<Arc<SkrifaFace>> {
        if let Some(face) = self.faces.lock().get(&id) {
            return Ok(face.clone());
        }

        let (bold, italic) = self
            .db
            .face(id)
            .map(|info| {
                (
                    info.weight.0 >= BOLD_WEIGHT,
                    info.style != fontdb::Style::Normal,
                )
            })
            .unwrap_or((false, false));

        let face = self
            .db
            .with_face_data(id, |data, index| {
                SkrifaFace::from_data_index(data.to_vec(), index, family)
            })
            .ok_or_else(|| FontLoadError::FamilyNotFound(family.to_string()))??
            .with_style(bold, italic);

        let face = Arc::new(face);
        self.faces.lock().insert(id, face.clone());
        Ok(face)
    }
}

impl Default for SystemFonts {
    fn default() -> Self {
        Self::new()
    }
}

impl FontProvider for SystemFonts {
    fn load_face(&self, family: &str, flags: FontFlags) -> Result<Arc<dyn FontFace>> {
        let families = [fontdb::Family::Name(family)];
        let query = fontdb::Query {
            families: &families,
            weight: if flags.contains(FontFlags::BOLD) {
                fontdb::Weight::BOLD
            } else {
                fontdb::Weight::NORMAL
            },
            stretch: fontdb::Stretch::Normal,
            style: if flags.contains(FontFlags::ITALIC) {
                fontdb::Style::Italic
            } else {
                fontdb::Style::Normal
            },
        };

        let id = self
            .db
            .query(&query)
            .ok_or_else(|| FontLoadError::FamilyNotFound(family.to_string()))?;

        let face: Arc<dyn FontFace> = self.load_by_id(id, family)?;
        Ok(face)
    }
}
