//! Fonts command implementation
//!
//! Also home of the font library setup the render command shares.

use anyhow::Result;
use textsrc_fontdb::SystemFonts;

use crate::cli::FontArgs;

/// Build the font library the arguments ask for
pub fn load_fonts(args: &FontArgs) -> SystemFonts {
    let mut fonts = if args.no_system_fonts {
        SystemFonts::new()
    } else {
        SystemFonts::with_system_fonts()
    };
    for dir in &args.fonts_dirs {
        fonts.load_fonts_dir(dir);
    }
    log::debug!("Font library holds {} faces", fonts.face_count());
    fonts
}

pub fn run(args: &FontArgs) -> Result<()> {
    let fonts = load_fonts(args);
    let families = fonts.families();
    if families.is_empty() {
        log::warn!("No fonts found");
    }
    for family in families {
        println!("{}", family);
    }
    Ok(())
}
