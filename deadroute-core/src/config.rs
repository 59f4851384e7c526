//! Configuration: analyzed directories plus optional `deadroute.toml`.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::DeadrouteError;
use crate::logging::log_warn;

/// Name of the optional config file looked up in the base directory.
pub const CONFIG_FILE_NAME: &str = "deadroute.toml";

/// Default backend source root, relative to the base directory.
pub const DEFAULT_BACKEND_DIR: &str = "src/main/kotlin";
/// Default markup template root, relative to the base directory.
pub const DEFAULT_TEMPLATES_DIR: &str = "src/main/resources/templates";
/// Default script root, relative to the base directory.
pub const DEFAULT_SCRIPTS_DIR: &str = "src/main/resources/static/js";

/// Contents of `deadroute.toml`.
#[derive(Debug, Deserialize, Default)]
pub struct DeadrouteConfig {
    /// Route patterns to leave out of the unused report.
    pub ignore: Option<Vec<String>>,
    /// Directory overrides.
    pub paths: Option<PathsConfig>,
    /// Output configuration.
    pub output: Option<OutputConfig>,
}

/// Directory overrides, relative to the base directory.
#[derive(Debug, Deserialize, Default)]
pub struct PathsConfig {
    pub backend: Option<String>,
    pub templates: Option<String>,
    pub scripts: Option<String>,
}

/// Output format configuration.
#[derive(Debug, Deserialize, Default)]
pub struct OutputConfig {
    /// Output format: "plain" or "json".
    pub format: Option<String>,
}

/// Report format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Plain,
    Json,
}

impl DeadrouteConfig {
    /// Resolve the configured output format, falling back to plain text.
    pub fn output_format(&self) -> OutputFormat {
        match self.output.as_ref().and_then(|o| o.format.as_deref()) {
            None | Some("plain") => OutputFormat::Plain,
            Some("json") => OutputFormat::Json,
            Some(other) => {
                log_warn(&format!("unknown output format '{}', using plain", other));
                OutputFormat::Plain
            }
        }
    }
}

/// The three roots scanned by one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerConfig {
    pub base_dir: PathBuf,
    pub backend_dir: PathBuf,
    pub templates_dir: PathBuf,
    pub scripts_dir: PathBuf,
}

impl AnalyzerConfig {
    /// Default layout under `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            backend_dir: PathBuf::from(DEFAULT_BACKEND_DIR),
            templates_dir: PathBuf::from(DEFAULT_TEMPLATES_DIR),
            scripts_dir: PathBuf::from(DEFAULT_SCRIPTS_DIR),
        }
    }

    /// Apply directory overrides from a loaded config file.
    pub fn with_file_config(mut self, cfg: &DeadrouteConfig) -> Self {
        if let Some(paths) = &cfg.paths {
            if let Some(dir) = &paths.backend {
                self.backend_dir = PathBuf::from(dir);
            }
            if let Some(dir) = &paths.templates {
                self.templates_dir = PathBuf::from(dir);
            }
            if let Some(dir) = &paths.scripts {
                self.scripts_dir = PathBuf::from(dir);
            }
        }
        self
    }

    pub fn backend_root(&self) -> PathBuf {
        self.base_dir.join(&self.backend_dir)
    }

    pub fn templates_root(&self) -> PathBuf {
        self.base_dir.join(&self.templates_dir)
    }

    pub fn scripts_root(&self) -> PathBuf {
        self.base_dir.join(&self.scripts_dir)
    }
}

/// Loads `deadroute.toml` from `root` if it exists.
pub fn load_config(root: &Path) -> Result<Option<DeadrouteConfig>> {
    let path = root.join(CONFIG_FILE_NAME);
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let cfg = toml::from_str(&content)
        .map_err(|e| DeadrouteError::config(&path, e.to_string()))
        .context("Invalid deadroute.toml")?;
    Ok(Some(cfg))
}
