use std::path::Path;

use clap::Subcommand;
use respite_core::storage::config_path;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "snooze_secs", "presets.0.work_secs")
        key: String,
    },
    /// Print the effective configuration as JSON
    List,
    /// Print the configuration file location
    Path,
}

pub fn run(config: Option<&Path>, action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let config = super::load_config(config)?;
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown key: {key}").into()),
            }
        }
        ConfigAction::List => {
            let config = super::load_config(config)?;
            let json = serde_json::to_string_pretty(&config)?;
            println!("{json}");
        }
        ConfigAction::Path => {
            let path = config.map(Path::to_path_buf).unwrap_or_else(config_path);
            println!("{}", path.display());
        }
    }
    Ok(())
}
