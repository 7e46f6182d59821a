use anyhow::{Context, Result as AnyResult};
use std::path::{Path, PathBuf};
pub use tablegen::Config;
use tablegen::config::get_var_config_path;

static CONFIG_REL_PATHS: [&str; 2] = [".tablegen/config.toml", ".tablegen.toml"];

/// An explicit path wins, then `$TABLEGEN_CONFIG`, then the first config file found in the search paths.
pub fn load_config(explicit: Option<&Path>) -> AnyResult<Config> {
    if let Some(path) = explicit {
        return read(path);
    }
    if let Some(path) = get_var_config_path() {
        return read(path);
    }
    let mut search_paths = vec![PathBuf::from("."), PathBuf::from("..")];
    search_paths.extend(dirs::config_dir());
    search_paths.extend(dirs::home_dir());
    for p in &search_paths {
        for rel_path in &CONFIG_REL_PATHS {
            let path = p.join(rel_path);
            if path.exists() {
                return read(path);
            }
        }
    }
    tracing::debug!("No config file found, using defaults");
    Ok(Config::default())
}

pub fn read(path: impl AsRef<Path>) -> AnyResult<Config> {
    let path = path.as_ref();
    let buf = std::fs::read_to_string(path).with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: Config = toml::from_str(&buf).with_context(|| format!("Invalid config {}", path.display()))?;
    tracing::debug!(path = %path.display(), "Loaded config");
    Ok(config)
}
