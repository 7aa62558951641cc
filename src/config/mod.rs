// Core configuration types
mod core;
mod loader;

pub use self::core::{
    LayoutConfig, MethodPlacement, MsortConfig, ReceiverMatching, SortCriteria,
};
pub use loader::{
    directory_ancestors, find_config_file, load_config, load_config_file, parse_config,
    ConfigFormat, LoadedConfig, CONFIG_CANDIDATES,
};

use crate::errors::{Error, Result};
use std::path::Path;

impl MsortConfig {
    /// Serialize in the format implied by the file extension.
    pub fn to_string_for(&self, format: ConfigFormat) -> Result<String> {
        match format {
            ConfigFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            ConfigFormat::Toml => toml::to_string_pretty(self)
                .map_err(|e| Error::Configuration(format!("failed to serialize config: {e}"))),
        }
    }

    /// Write the configuration to `path`, TOML unless the extension is `.json`.
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = self.to_string_for(ConfigFormat::from_path(path))?;
        std::fs::write(path, contents)
            .map_err(|e| Error::file_system("Failed to write config file", path, e))
    }
}
