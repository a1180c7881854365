//! Turning a font request into a usable font, with a fallback face
//!
//! The chain is short: the requested face, then the default face, then
//! nothing. Nothing is a valid answer; the source then draws its
//! background only. Every miss is logged, none is fatal.

use std::sync::Arc;

use textsrc_core::{
    config::DEFAULT_FACE,
    error::FontLoadError,
    traits::{FontFace, FontProvider},
    FontDescriptor, ResolvedFont, TextSourceError,
};

/// Resolves [`FontDescriptor`]s against a [`FontProvider`]
#[derive(Clone)]
pub struct FontResolver {
    provider: Arc<dyn FontProvider>,
    default_face: String,
}

impl FontResolver {
    /// Falls back to Arial, like a freshly created source
    pub fn new(provider: Arc<dyn FontProvider>) -> Self {
        Self {
            provider,
            default_face: DEFAULT_FACE.to_string(),
        }
    }

    /// Use another face as the last resort
    pub fn with_default_face(mut self, face: impl Into<String>) -> Self {
        self.default_face = face.into();
        self
    }

    pub fn default_face(&self) -> &str {
        &self.default_face
    }

    /// Find a face for `descriptor`, or `None` when even the default is missing
    pub fn resolve(&self, descriptor: &FontDescriptor) -> Option<ResolvedFont> {
        let face = self
            .requested_face(descriptor)
            .or_else(|| self.default_face_for(descriptor))?;

        let font = ResolvedFont::new(face, descriptor.size as f32, descriptor.flags);
        log::debug!("Resolved font {:?}", font);
        Some(font)
    }

    fn requested_face(&self, descriptor: &FontDescriptor) -> Option<Arc<dyn FontFace>> {
        let result = if descriptor.face.is_empty() {
            Err(TextSourceError::from(FontLoadError::EmptyFaceName))
        } else {
            self.provider.load_face(&descriptor.face, descriptor.flags)
        };

        match result {
            Ok(face) => Some(face),
            Err(err) => {
                log::warn!(
                    "Font '{}' unavailable ({}), falling back to '{}'",
                    descriptor.face,
                    err,
                    self.default_face
                );
                None
            },
        }
    }

    fn default_face_for(&self, descriptor: &FontDescriptor) -> Option<Arc<dyn FontFace>> {
        match self
            .provider
            .load_face(&self.default_face, descriptor.flags)
        {
            Ok(face) => Some(face),
            Err(err) => {
                log::warn!(
                    "Default font '{}' unavailable ({}); text will not be drawn",
                    self.default_face,
                    err
                );
                None
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use textsrc_core::{testing::StaticProvider, FontFlags};

    fn descriptor(face: &str) -> FontDescriptor {
        FontDescriptor {
            face: face.to_string(),
            size: 20,
            flags: FontFlags::empty(),
        }
    }

    #[test]
    fn test_requested_face_wins() {
        let provider = Arc::new(
            StaticProvider::new()
                .with_block_face("Mono")
                .with_block_face("Arial"),
        );
        let resolver = FontResolver::new(provider.clone());

        let font = resolver.resolve(&descriptor("Mono")).unwrap();
        assert_eq!(font.family(), "Mono");
        assert_eq!(font.size(), 20.0);
        assert_eq!(provider.requests(), vec!["Mono"]);
    }

    #[test]
    fn test_missing_face_falls_back_to_arial() {
        let provider = Arc::new(StaticProvider::new().with_block_face("Arial"));
        let resolver = FontResolver::new(provider.clone());

        let font = resolver.resolve(&descriptor("Comic Nope")).unwrap();
        assert_eq!(font.family(), "Arial");
        assert_eq!(provider.requests(), vec!["Comic Nope", "Arial"]);
    }

    #[test]
    fn test_empty_face_skips_straight_to_default() {
        let provider = Arc::new(StaticProvider::new().with_block_face("Arial"));
        let resolver = FontResolver::new(provider.clone());

        let font = resolver.resolve(&descriptor("")).unwrap();
        assert_eq!(font.family(), "Arial");
        assert_eq!(provider.requests(), vec!["Arial"]);
    }

    #[test]
    fn test_no_fonts_resolves_to_none() {
        let resolver = FontResolver::new(Arc::new(StaticProvider::new()));
        assert!(resolver.resolve(&descriptor("Anything")).is_none());
    }

    #[test]
    fn test_custom_default_face() {
        let provider = Arc::new(StaticProvider::new().with_block_face("DejaVu Sans"));
        let resolver = FontResolver::new(provider).with_default_face("DejaVu Sans");
        assert_eq!(resolver.default_face(), "DejaVu Sans");

        let font = resolver.resolve(&descriptor("Arial")).unwrap();
        assert_eq!(font.family(), "DejaVu Sans");
    }

    #[test]
    fn test_style_flags_survive_fallback() {
        let provider = Arc::new(StaticProvider::new().with_block_face("Arial"));
        let resolver = FontResolver::new(provider);
        let request = FontDescriptor {
            face: "Missing".into(),
            size: 30,
            flags: FontFlags::BOLD | FontFlags::UNDERLINE,
        };

        let font = resolver.resolve(&request).unwrap();
        assert_eq!(font.flags(), FontFlags::BOLD | FontFlags::UNDERLINE);
        assert!(font.synthetic_bold());
    }
}
