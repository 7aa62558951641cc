use std::fs;
use std::path::{Path, PathBuf};

use super::core::MsortConfig;
use crate::errors::{Error, Result};

/// Config file names searched in each directory, in priority order
pub const CONFIG_CANDIDATES: &[&str] = &[
    ".msort.toml",
    ".msort.json",
    "msort.json",
    ".config/msort.json",
];

const MAX_TRAVERSAL_DEPTH: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

/// Configuration together with the file it came from
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub config: MsortConfig,
    pub source: Option<PathBuf>,
}

/// Pure function to parse config contents in the given format
pub fn parse_config(contents: &str, format: ConfigFormat) -> Result<MsortConfig> {
    let config = match format {
        ConfigFormat::Toml => toml::from_str::<MsortConfig>(contents)?,
        ConfigFormat::Json => serde_json::from_str::<MsortConfig>(contents)?,
    };
    validate(&config)?;
    Ok(config)
}

fn validate(config: &MsortConfig) -> Result<()> {
    for pattern in config.include.iter().chain(&config.exclude) {
        glob::Pattern::new(pattern)?;
    }
    if config
        .receiver
        .aliases
        .iter()
        .any(|alias| alias.is_empty() || alias.chars().any(char::is_whitespace))
    {
        return Err(Error::Configuration(
            "receiver aliases must be non-empty identifiers".to_string(),
        ));
    }
    Ok(())
}

/// Read and parse one config file
pub fn load_config_file(path: &Path) -> Result<MsortConfig> {
    let contents = fs::read_to_string(path)
        .map_err(|e| Error::file_system("Failed to read config file", path, e))?;
    parse_config(&contents, ConfigFormat::from_path(path)).map_err(|e| match e {
        Error::Configuration(message) => {
            Error::Configuration(format!("{}: {}", path.display(), message))
        }
        other => Error::Configuration(format!("{}: {}", path.display(), other)),
    })
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// First existing config file, searching `start` and its ancestors, then
/// `<home>/.config/msort/`.
pub fn find_config_file(start: &Path, home: Option<&Path>) -> Option<PathBuf> {
    directory_ancestors(start.to_path_buf(), MAX_TRAVERSAL_DEPTH)
        .flat_map(|dir| CONFIG_CANDIDATES.iter().map(move |name| dir.join(name)))
        .chain(home.into_iter().flat_map(|home| {
            let dir = home.join(".config").join("msort");
            [dir.join("config.toml"), dir.join("config.json")]
        }))
        .find(|candidate| candidate.is_file())
}

/// Load the configuration: the explicit path when given (it must exist),
/// otherwise the first discovered file, otherwise defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig> {
    if let Some(path) = explicit {
        let config = load_config_file(path)?;
        log::debug!("Loaded config from {}", path.display());
        return Ok(LoadedConfig {
            config,
            source: Some(path.to_path_buf()),
        });
    }

    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            return Ok(LoadedConfig::default());
        }
    };

    let home = dirs::home_dir();
    let Some(path) = find_config_file(&current, home.as_deref()) else {
        log::debug!("No config file found. Using default config.");
        return Ok(LoadedConfig::default());
    };

    match fs::read_to_string(&path) {
        Ok(contents) => {
            let config = parse_config(&contents, ConfigFormat::from_path(&path))
                .map_err(|e| Error::Configuration(format!("{}: {}", path.display(), e)))?;
            log::debug!("Loaded config from {}", path.display());
            Ok(LoadedConfig {
                config,
                source: Some(path),
            })
        }
        Err(e) => {
            log::warn!(
                "Failed to read config file {}: {}. Using default config.",
                path.display(),
                e
            );
            Ok(LoadedConfig::default())
        }
    }
}
