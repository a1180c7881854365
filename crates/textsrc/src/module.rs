//! Module lifetime: the font library every source shares
//!
//! A host loads the module once, creates its sources from it and drops it
//! after the last source is gone.

use std::sync::Arc;

use textsrc_core::{
    config::DEFAULT_FACE, FontProvider, GraphicsHost, TextReader, TextSettings,
};
use textsrc_fontdb::{FontResolver, SystemFonts};

use crate::reader::FsTextReader;
use crate::source::TextSource;

/// Identifier the host registers this source type under
pub const SOURCE_ID: &str = "text_skia";

/// Name shown to users for this source type
pub const DISPLAY_NAME: &str = "Text (Skia)";

/// The loaded text module
pub struct TextModule {
    provider: Arc<dyn FontProvider>,
    reader: Arc<dyn TextReader>,
    default_face: String,
}

impl TextModule {
    /// Start the font subsystem with every font installed on this machine
    pub fn load() -> Self {
        let fonts = SystemFonts::with_system_fonts();
        log::info!("{} loaded with {} font faces", SOURCE_ID, fonts.face_count());
        Self::with_provider(Arc::new(fonts))
    }

    /// Start with a caller-supplied font library
    pub fn with_provider(provider: Arc<dyn FontProvider>) -> Self {
        Self {
            provider,
            reader: Arc::new(FsTextReader::new()),
            default_face: DEFAULT_FACE.to_string(),
        }
    }

    /// Replace where file-backed text is read from
    pub fn with_reader(mut self, reader: Arc<dyn TextReader>) -> Self {
        self.reader = reader;
        self
    }

    /// Replace the face used when a requested family cannot be found
    pub fn with_default_face(mut self, face: impl Into<String>) -> Self {
        self.default_face = face.into();
        self
    }

    pub fn id(&self) -> &'static str {
        SOURCE_ID
    }

    pub fn display_name(&self) -> &'static str {
        DISPLAY_NAME
    }

    /// Settings a freshly added source starts from
    pub fn defaults(&self) -> TextSettings {
        TextSettings::default()
    }

    pub fn font_provider(&self) -> &Arc<dyn FontProvider> {
        &self.provider
    }

    pub fn default_face(&self) -> &str {
        &self.default_face
    }

    /// Create a source drawing through `host`
    pub fn create_source(
        &self,
        name: impl Into<String>,
        settings: &TextSettings,
        host: Arc<dyn GraphicsHost>,
    ) -> TextSource {
        let resolver = FontResolver::new(Arc::clone(&self.provider))
            .with_default_face(self.default_face.clone());
        TextSource::new(name, settings, resolver, Arc::clone(&self.reader), host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;
    use textsrc_core::testing::StaticProvider;

    #[test]
    fn test_identity() {
        let module = TextModule::with_provider(Arc::new(StaticProvider::new()));
        assert_eq!(module.id(), "text_skia");
        assert_eq!(module.display_name(), "Text (Skia)");
        assert_eq!(module.defaults(), TextSettings::default());
        assert_eq!(module.default_face(), "Arial");
    }

    #[test]
    fn test_create_source_uses_custom_default_face() {
        let provider = Arc::new(StaticProvider::new().with_block_face("Fallback"));
        let module = TextModule::with_provider(provider.clone()).with_default_face("Fallback");
        let host: Arc<dyn GraphicsHost> = Arc::new(MemoryHost::new());

        let mut settings = module.defaults();
        settings.text = "Hi".into();
        settings.font.face = "Missing".into();
        let source = module.create_source("fallback", &settings, host);

        assert_eq!(source.font().map(|f| f.family()), Some("Fallback"));
        assert_eq!(provider.requests(), vec!["Missing", "Fallback"]);
    }

    #[test]
    fn test_sources_share_the_provider() {
        let provider = Arc::new(StaticProvider::new().with_block_face("Arial"));
        let module = TextModule::with_provider(provider.clone());
        let host: Arc<dyn GraphicsHost> = Arc::new(MemoryHost::new());

        let settings = module.defaults();
        let _a = module.create_source("a", &settings, Arc::clone(&host));
        let _b = module.create_source("b", &settings, host);
        assert_eq!(provider.requests().len(), 2);
    }
}
