//! Working-directory configuration for the dataset location.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Optional override file looked up in the working directory.
pub const CONFIG_FILE: &str = "sauco.json";
/// Dataset written next to wherever the tool is run.
pub const DEFAULT_DATASET_FILE: &str = "inventario_flor_de_sauco.xlsx";
const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serde(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub dataset_file: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset_file: DEFAULT_DATASET_FILE.to_string(),
        }
    }
}

impl AppConfig {
    /// Loads `sauco.json` from the working directory, falling back to the
    /// defaults when the file does not exist.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let data = fs::read_to_string(path)?;
            serde_json::from_str(&data).map_err(|err| ConfigError::Serde(err.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|err| ConfigError::Serde(err.to_string()))?;
        let mut tmp = path.to_path_buf();
        let ext = match path.extension().and_then(|ext| ext.to_str()) {
            Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
            None => TMP_SUFFIX.to_string(),
        };
        tmp.set_extension(ext);
        fs::write(&tmp, json)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    pub fn dataset_path(&self) -> PathBuf {
        PathBuf::from(&self.dataset_file)
    }
}
