//! Text layout for textsrc: how big the canvas is and where glyphs go
//!
//! The flow mirrors a single measure-then-draw pass:
//!
//! 1. [`StringFormat`] turns align/valign/vertical into two alignments
//! 2. [`LineBreaker`] splits the text at hard breaks and, when wrapping,
//!    at word boundaries
//! 3. [`compute_layout`] measures the lines, applies outline, floors,
//!    extents and quantization, and hands back a [`TextLayout`]
//! 4. [`TextLayout::arrange`] places glyphs and decorations for drawing
//!
//! ```ignore
//! let layout = compute_layout(&state, font.as_ref());
//! let arrangement = layout.arrange(layout.draw_box);
//! ```

pub mod format;
pub mod layout;
pub mod lines;

pub use format::{Alignment, StringFormat};
pub use layout::{compute_layout, Arrangement, PlacedGlyph, TextLayout, EPSILON};
pub use lines::{measure, Line, LineBreaker};
