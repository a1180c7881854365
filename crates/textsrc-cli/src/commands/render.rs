//! Render command implementation
//!
//! Runs one update of a text source against an in-memory host and writes
//! the texture it produced to a PNG file.

use std::sync::Arc;

use anyhow::{Context, Result};
use textsrc::{types::PixelBuffer, GraphicsHost, MemoryHost, TextModule, TextSettings};

use crate::cli::RenderArgs;
use crate::commands::fonts::load_fonts;

pub fn run(args: &RenderArgs) -> Result<()> {
    let mut settings = match &args.settings {
        Some(path) => TextSettings::from_json_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => TextSettings::default(),
    };
    apply_overrides(&mut settings, args);

    let mut module = TextModule::with_provider(Arc::new(load_fonts(&args.fonts)));
    if let Some(face) = &args.default_face {
        module = module.with_default_face(face.clone());
    }

    let pixels = render_settings(&module, &settings)?;
    textsrc_export::save_png(&pixels, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!(
        "Wrote {}x{} to {}",
        pixels.width,
        pixels.height,
        args.output.display()
    );
    Ok(())
}

/// Command-line values win over the settings file
fn apply_overrides(settings: &mut TextSettings, args: &RenderArgs) {
    if let Some(text) = &args.text {
        settings.text = text.clone();
        settings.read_from_file = false;
    }
    if let Some(face) = &args.face {
        settings.font.face = face.clone();
    }
    if let Some(size) = args.font_size {
        settings.font.size = size;
    }
}

/// Create a source, let it build its texture and read the texture back
pub fn render_settings(module: &TextModule, settings: &TextSettings) -> Result<PixelBuffer> {
    let host = Arc::new(MemoryHost::new());
    let shared: Arc<dyn GraphicsHost> = host.clone();
    let source = module.create_source("cli", settings, shared);

    if source.font().is_none() {
        log::warn!(
            "No usable font for '{}'; only the background is drawn",
            settings.font.face
        );
    }

    source
        .texture()
        .and_then(|texture| host.texture_pixels(texture))
        .context("The source produced no texture")
}
