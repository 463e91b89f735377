//! `[theme]` and `[[plugins]]` sections.
//!
//! Plugins register in file order, which is also the order their assets
//! are combined in (theme first).
//!
//! ```toml
//! [theme]
//! path = "theme"              # name defaults to "theme"
//!
//! [[plugins]]
//! name = "sass"
//! path = "plugins/sass"
//!
//! [[plugins]]
//! name = "gist"
//! path = "plugins/gist"
//! type = "local_plugin"       # plugin | local_plugin (default: plugin)
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::plugin::PluginKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeEntry {
    #[serde(default = "default_theme_name")]
    pub name: String,
    pub path: PathBuf,
}

fn default_theme_name() -> String {
    "theme".into()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginEntry {
    pub name: String,
    pub path: PathBuf,
    #[serde(rename = "type", default)]
    pub kind: PluginKind,
}

const THEME_PATH: FieldPath = FieldPath::new("theme.path");
const PLUGINS: FieldPath = FieldPath::new("plugins");

/// Validate plugin declarations. Paths must already be normalized.
pub fn validate_plugins(
    theme: Option<&ThemeEntry>,
    plugins: &[PluginEntry],
    diag: &mut ConfigDiagnostics,
) {
    if let Some(theme) = theme {
        check_dir(&theme.path, THEME_PATH, diag);
    }

    let mut seen: Vec<(&str, PluginKind)> = Vec::with_capacity(plugins.len());
    for entry in plugins {
        if entry.name.trim().is_empty() {
            diag.error(PLUGINS, format!("plugin at `{}` has an empty name", entry.path.display()));
            continue;
        }
        if entry.kind == PluginKind::Theme {
            diag.error_with_hint(
                PLUGINS,
                format!("`{}` declares type = \"theme\"", entry.name),
                "declare the theme in the [theme] section",
            );
        }
        if seen.contains(&(entry.name.as_str(), entry.kind)) {
            diag.error(
                PLUGINS,
                format!("`{}` is registered twice as {}", entry.name, entry.kind),
            );
        }
        seen.push((entry.name.as_str(), entry.kind));
        check_dir(&entry.path, PLUGINS, diag);
    }
}

fn check_dir(path: &Path, field: FieldPath, diag: &mut ConfigDiagnostics) {
    if !path.exists() {
        diag.error(field, format!("directory not found: {}", path.display()));
    } else if !path.is_dir() {
        diag.error(field, format!("not a directory: {}", path.display()));
    }
}
