//! Application configuration for guidegen.
//!
//! Config lives in `guidegen.toml` in the project directory.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GuideGenError, Result};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "guidegen.toml";

// ---------------------------------------------------------------------------
// Config structs (matching guidegen.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuideGenConfig {
    /// Input and output locations.
    #[serde(default)]
    pub paths: PathsConfig,
}

/// `[paths]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Project root every other path is relative to.
    #[serde(default = "default_root_dir")]
    pub root_dir: PathBuf,

    /// Scratch directory holding intermediate build files.
    #[serde(default = "default_temp_write_dir")]
    pub temp_write_dir: PathBuf,

    /// Content tree the rendered guides are written into.
    #[serde(default = "default_content_write_dir")]
    pub content_write_dir: PathBuf,

    /// File name of the matched guide collection inside `temp_write_dir`.
    #[serde(default = "default_collection_file_name")]
    pub guide_configs_with_attached_nodes_file_name: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            root_dir: default_root_dir(),
            temp_write_dir: default_temp_write_dir(),
            content_write_dir: default_content_write_dir(),
            guide_configs_with_attached_nodes_file_name: default_collection_file_name(),
        }
    }
}

fn default_root_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_temp_write_dir() -> PathBuf {
    PathBuf::from("temp")
}
fn default_content_write_dir() -> PathBuf {
    PathBuf::from("docs")
}
fn default_collection_file_name() -> String {
    "guide-configs-with-attached-nodes.json".into()
}

impl GuideGenConfig {
    /// Location of the matched guide collection (read at start, rewritten at end).
    pub fn collection_path(&self) -> PathBuf {
        self.paths
            .root_dir
            .join(&self.paths.temp_write_dir)
            .join(&self.paths.guide_configs_with_attached_nodes_file_name)
    }

    /// Root of the content tree rendered guides are written under.
    pub fn content_root(&self) -> PathBuf {
        self.paths.root_dir.join(&self.paths.content_write_dir)
    }

    /// Reject configs that would resolve to nonsensical paths.
    pub fn validate(&self) -> Result<()> {
        if self
            .paths
            .guide_configs_with_attached_nodes_file_name
            .trim()
            .is_empty()
        {
            return Err(GuideGenError::config(
                "guide_configs_with_attached_nodes_file_name must not be empty",
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load `guidegen.toml` from `dir`. Returns defaults if the file does not exist.
pub fn load_config(dir: &Path) -> Result<GuideGenConfig> {
    let path = dir.join(CONFIG_FILE_NAME);

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(GuideGenConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<GuideGenConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| GuideGenError::io(path, e))?;

    let config: GuideGenConfig = toml::from_str(&content).map_err(|e| {
        GuideGenError::config(format!("failed to parse {}: {e}", path.display()))
    })?;
    config.validate()?;
    Ok(config)
}

/// Write a default `guidegen.toml` into `dir`.
/// Returns the path to the created file.
pub fn init_config(dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| GuideGenError::io(dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = GuideGenConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| GuideGenError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| GuideGenError::write(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
