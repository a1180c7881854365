//! Defaults command implementation

use anyhow::Result;
use textsrc::TextSettings;

/// Pretty JSON of the settings a new source starts from
pub fn defaults_json() -> Result<String> {
    Ok(TextSettings::default().to_json_string()?)
}

pub fn run() -> Result<()> {
    println!("{}", defaults_json()?);
    Ok(())
}
