pub mod config;
pub mod presets;
pub mod run;
pub mod simulate;

use std::path::Path;

use respite_core::Config;

/// Load configuration from `--config`, falling back to the default location.
pub(crate) fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    Ok(config)
}
