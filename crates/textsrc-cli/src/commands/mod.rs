//! Subcommand implementations

pub mod defaults;
pub mod fonts;
pub mod render;
