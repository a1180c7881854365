//! CLI argument definitions using Clap v4

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// textsrc - render compositor text sources from the command line
#[derive(Parser, Debug)]
#[command(name = "textsrc")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a text source to a PNG file
    #[command(alias = "r")]
    Render(RenderArgs),

    /// Print the settings a new source starts from, as JSON
    Defaults,

    /// List the font families that can be used
    Fonts(FontArgs),
}

/// Where fonts come from
#[derive(Parser, Debug, Default)]
pub struct FontArgs {
    /// Extra directory to search for font files (repeatable)
    #[arg(long = "fonts-dir")]
    pub fonts_dirs: Vec<PathBuf>,

    /// Only use fonts from --fonts-dir
    #[arg(long = "no-system-fonts")]
    pub no_system_fonts: bool,
}

/// Arguments for the render command
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Settings file (JSON); defaults are used when omitted
    #[arg(short = 's', long = "settings")]
    pub settings: Option<PathBuf>,

    /// Output PNG path
    #[arg(short = 'o', long = "output", default_value = "text.png")]
    pub output: PathBuf,

    /// Text to draw, replacing the settings' text and file
    #[arg(short = 't', long = "text")]
    pub text: Option<String>,

    /// Font family, replacing the settings' face
    #[arg(long = "face")]
    pub face: Option<String>,

    /// Font size in pixels, replacing the settings' size
    #[arg(long = "font-size")]
    pub font_size: Option<i64>,

    /// Face used when the requested one is missing
    #[arg(long = "default-face")]
    pub default_face: Option<String>,

    #[command(flatten)]
    pub fonts: FontArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_args() {
        let cli = Cli::try_parse_from([
            "textsrc",
            "render",
            "--settings",
            "in.json",
            "-o",
            "out.png",
            "--text",
            "Hello",
            "--fonts-dir",
            "a",
            "--fonts-dir",
            "b",
            "-v",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Render(args) => {
                assert_eq!(args.settings, Some(PathBuf::from("in.json")));
                assert_eq!(args.output, PathBuf::from("out.png"));
                assert_eq!(args.text.as_deref(), Some("Hello"));
                assert_eq!(args.fonts.fonts_dirs.len(), 2);
                assert!(!args.fonts.no_system_fonts);
            },
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_render_output_default() {
        let cli = Cli::try_parse_from(["textsrc", "r"]).unwrap();
        match cli.command {
            Commands::Render(args) => {
                assert_eq!(args.output, PathBuf::from("text.png"));
                assert!(args.settings.is_none());
            },
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["textsrc", "paint"]).is_err());
    }
}
