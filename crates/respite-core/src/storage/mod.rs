mod config;

pub use config::{Config, PresetConfig};

use std::path::PathBuf;

/// Returns `~/.config/respite[-dev]/` based on RESPITE_ENV.
///
/// Set RESPITE_ENV=dev to use the development directory. The directory is
/// not created; nothing in respite writes to it.
pub fn data_dir() -> PathBuf {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("RESPITE_ENV").unwrap_or_else(|_| "production".to_string());

    if env == "dev" {
        base_dir.join("respite-dev")
    } else {
        base_dir.join("respite")
    }
}

/// Config file location: `$RESPITE_CONFIG`, or `config.toml` in [`data_dir`].
pub fn config_path() -> PathBuf {
    match std::env::var_os("RESPITE_CONFIG") {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => data_dir().join("config.toml"),
    }
}
