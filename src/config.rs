//! Project layout and optional `corm.toml` settings.
//!
//! Everything lives under the project directory:
//!
//! - `Cormfile` - the manifest
//! - `_corm/` - staging root handed to the fetch tool (`_corm/src/...`)
//! - `vendor/` - the exported vendor tree
//! - `corm.toml` - optional tool settings

use crate::error::CormError;
use crate::isolate::IsolationPolicy;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const MANIFEST_FILE: &str = "Cormfile";
pub const STAGING_DIR: &str = "_corm";
pub const VENDOR_DIR: &str = "vendor";
pub const CONFIG_FILE: &str = "corm.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub project_dir: PathBuf,
    pub manifest: PathBuf,
    pub staging_root: PathBuf,
    pub staging_src: PathBuf,
    pub vendor_dir: PathBuf,
}

impl Layout {
    pub fn new(project_dir: PathBuf) -> Self {
        let staging_root = project_dir.join(STAGING_DIR);
        Self {
            manifest: project_dir.join(MANIFEST_FILE),
            staging_src: staging_root.join("src"),
            staging_root,
            vendor_dir: project_dir.join(VENDOR_DIR),
            project_dir,
        }
    }

    /// Resolve the layout for `project_dir`, or the current directory.
    ///
    /// The result is absolute because the staging root is exported to
    /// subprocesses that may run elsewhere.
    pub fn resolve(project_dir: Option<&Path>) -> Result<Self, CormError> {
        let dir = match project_dir {
            Some(dir) => std::path::absolute(dir),
            None => std::env::current_dir(),
        }
        .map_err(|e| CormError::EnvironmentIsolationFailed {
            var: "project directory".to_string(),
            reason: format!("cannot determine directory: {e}"),
        })?;

        tracing::debug!(project = %dir.display(), "resolved project layout");
        Ok(Self::new(dir))
    }

    pub fn config_file(&self) -> PathBuf {
        self.project_dir.join(CONFIG_FILE)
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct CormConfig {
    #[serde(default)]
    pub tool: ToolConfig,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ToolConfig {
    /// Fetch and build tool.
    pub program: String,
    /// Arguments placed before the package path on each fetch.
    pub fetch_args: Vec<String>,
    /// Environment variable naming the tool's package root.
    pub root_var: String,
    pub isolation: IsolationPolicy,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            program: "go".to_string(),
            fetch_args: vec!["get".to_string()],
            root_var: "GOPATH".to_string(),
            isolation: IsolationPolicy::default(),
        }
    }
}

/// Load `corm.toml`, falling back to defaults when it does not exist.
pub fn load_config(layout: &Layout) -> Result<CormConfig, CormError> {
    let path = layout.config_file();
    if !path.exists() {
        return Ok(CormConfig::default());
    }

    let invalid = |reason: String| CormError::Config {
        path: path.clone(),
        reason,
    };
    let content = fs::read_to_string(&path).map_err(|e| invalid(e.to_string()))?;
    let config: CormConfig = toml::from_str(&content).map_err(|e| invalid(e.to_string()))?;

    if config.tool.program.trim().is_empty() {
        return Err(invalid("[tool] program must not be empty".to_string()));
    }

    tracing::debug!(?config, "loaded {}", path.display());
    Ok(config)
}
