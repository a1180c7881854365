//! Where fonts come from: discovery, loading and fallback for textsrc
//!
//! [`SystemFonts`] finds faces through fontdb and parses them with skrifa.
//! [`FontResolver`] turns a source's font request into a [`ResolvedFont`],
//! falling back to a default face when the requested one is missing.
//!
//! [`ResolvedFont`]: textsrc_core::ResolvedFont

pub mod face;
pub mod resolver;
pub mod system;

pub use face::SkrifaFace;
pub use resolver::FontResolver;
pub use system::SystemFonts;
