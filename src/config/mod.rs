//! Site configuration management for `quire.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── sass       # [sass]
//! │   ├── combine    # [octopress]
//! │   └── plugins    # [theme], [[plugins]]
//! ├── diagnostics    # ConfigError, ConfigDiagnostics, FieldPath
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! # Top-level keys
//!
//! | Key       | Default    | Purpose                                        |
//! |-----------|------------|------------------------------------------------|
//! | `source`  | `"."`      | Site source directory (relative to site root)  |
//! | `output`  | `"public"` | Output directory (relative to site root)       |
//! | `custom`  | `_custom`  | Per-plugin override directory (under source)   |

mod diagnostics;
pub mod section;
mod util;

pub use diagnostics::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, FieldPath};
pub use section::{CombineConfig, OutputStyle, PluginEntry, SassConfig, ThemeEntry};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::log;
use crate::utils::path::normalize_path;
use util::find_config_file;

/// Root configuration structure representing quire.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    pub source: PathBuf,
    pub output: PathBuf,

    /// Override directory for plugin content; unset means `_custom`.
    pub custom: Option<PathBuf>,

    pub sass: SassConfig,

    /// Combine switches. The section keeps its historical name.
    pub octopress: CombineConfig,

    pub theme: Option<ThemeEntry>,
    pub plugins: Vec<PluginEntry>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            root: PathBuf::new(),
            source: PathBuf::from("."),
            output: PathBuf::from("public"),
            custom: None,
            sass: SassConfig::default(),
            octopress: CombineConfig::default(),
            theme: None,
            plugins: Vec::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd for the config file. The project root is
    /// the config file's parent directory.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        let config_path = find_config_file(&cli.config, &cwd)
            .ok_or_else(|| ConfigError::NotFound(cwd.join(&cli.config)))?;

        let mut config = Self::from_path(&config_path)?;
        config.config_path = normalize_path(&config_path);
        config.finalize(cli.output.as_deref());
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path, warning about unknown fields.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            let display_path = path
                .file_name()
                .map(|n| n.to_string_lossy())
                .unwrap_or_else(|| path.to_string_lossy());
            log!("warning"; "unknown fields in {} ignored: {}", display_path, ignored.join(", "));
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Resolve the root and make every configured path absolute.
    fn finalize(&mut self, output_override: Option<&Path>) {
        let root = self
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        self.root = normalize_path(&root);

        if let Some(output) = output_override {
            self.output = output.to_path_buf();
        }

        self.source = normalize_path(&self.root.join(&self.source));
        self.output = normalize_path(&self.root.join(&self.output));
        if let Some(theme) = &mut self.theme {
            theme.path = normalize_path(&self.root.join(&theme.path));
        }
        for plugin in &mut self.plugins {
            plugin.path = normalize_path(&self.root.join(&plugin.path));
        }
    }

    /// Validate configuration, collecting all errors at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();
        self.sass.validate(&mut diag);
        section::validate_plugins(self.theme.as_ref(), &self.plugins, &mut diag);
        diag.into_result()
    }
}

/// Parse a config snippet for tests.
/// Panics on unknown fields to catch typos in test configs.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> SiteConfig {
    let (parsed, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}
