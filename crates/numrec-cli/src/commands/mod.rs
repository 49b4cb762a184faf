pub mod batch;
pub mod config;
pub mod cultures;
pub mod recognize;

use std::path::{Path, PathBuf};

use numrec_core::NumrecConfig;
use tracing::debug;

/// `<config dir>/numrec/config.json`.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("numrec")
        .join("config.json")
}

/// Load the explicit config file, else the default one if it exists, else defaults.
pub fn load_config(path: Option<&str>) -> anyhow::Result<NumrecConfig> {
    if let Some(path) = path {
        return NumrecConfig::from_file(Path::new(path))
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {}", path, e));
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config from {}", default_path.display());
        Ok(NumrecConfig::from_file(&default_path)?)
    } else {
        Ok(NumrecConfig::default())
    }
}
