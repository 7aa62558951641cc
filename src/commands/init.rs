use crate::io::write_atomic;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = ".msort.toml";

pub const DEFAULT_CONFIG: &str = r#"# gomsort configuration

# Comparator keys, applied in this order. Disabling one removes it from the chain.
[sort]
group_by_receiver = true
exported_first = true
sort_by_depth = true
sort_by_in_degree = true
preserve_original_order = true

# How calls on the receiver are recognized when building the call graph.
[receiver]
aliases = ["self"]
single_letter_fallback = true

# "end" places the sorted methods after all other declarations,
# "first-method" keeps them where the first method was.
[layout]
method_placement = "end"
"#;

pub fn init_config(force: bool) -> Result<()> {
    let config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
    write_default_config(&config_path, force)?;
    println!("Created {DEFAULT_CONFIG_FILE} configuration file");
    Ok(())
}

pub fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }
    let written = if path.exists() {
        write_atomic(path, DEFAULT_CONFIG)
    } else {
        std::fs::write(path, DEFAULT_CONFIG).map_err(crate::errors::Error::from)
    };
    written.with_context(|| format!("Failed to write {}", path.display()))
}
