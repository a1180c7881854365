//! textsrc: turn a text settings record into a compositor texture
//!
//! ```no_run
//! use std::sync::Arc;
//! use textsrc::{GraphicsHost, MemoryHost, TextModule, TextSettings};
//!
//! let module = TextModule::load();
//! let host: Arc<dyn GraphicsHost> = Arc::new(MemoryHost::new());
//!
//! let mut settings = TextSettings::default();
//! settings.text = "Hello, world!".into();
//! let mut source = module.create_source("greeting", &settings, host);
//!
//! settings.outline = true;
//! source.update(&settings);
//! source.render();
//! println!("{}x{}", source.width(), source.height());
//! ```
//!
//! Updates run the whole pipeline: settings, font, layout, pixels and
//! texture. `render` only draws the texture the last update left behind.

pub mod host;
pub mod module;
pub mod reader;
pub mod source;
pub mod texture;

pub use host::{HostEvent, MemoryHost};
pub use module::{TextModule, DISPLAY_NAME, SOURCE_ID};
pub use reader::FsTextReader;
pub use source::TextSource;
pub use texture::{TextureAction, TextureSync};

pub use textsrc_core::{
    error, types, GraphicsHost, RenderState, Result, TextSettings, TextSourceError, TextureId,
};
pub use textsrc_fontdb::{FontResolver, SystemFonts};

/// Everything a host integration usually needs
pub mod prelude {
    pub use crate::{
        GraphicsHost, MemoryHost, TextModule, TextSettings, TextSource, TextSourceError,
    };
}
