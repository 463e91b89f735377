//! Plugin and asset kind definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Role a plugin is registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PluginKind {
    /// The site's visual base. At most one per registry.
    Theme,
    #[default]
    Plugin,
    LocalPlugin,
}

impl PluginKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Theme => "theme",
            Self::Plugin => "plugin",
            Self::LocalPlugin => "local_plugin",
        }
    }
}

impl fmt::Display for PluginKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether an asset is concatenated as-is or compiled first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// Ready to concatenate (CSS, JS, binary assets).
    Raw,
    /// Sass/SCSS source that goes through the compiler.
    Sass,
}

impl AssetKind {
    /// `.scss` and `.sass` files compile, everything else is raw.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("scss" | "sass") => Self::Sass,
            _ => Self::Raw,
        }
    }
}

/// Conventional subdirectory of a plugin holding one asset collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetDir {
    Stylesheets,
    Javascripts,
    Fonts,
    Images,
    Files,
    Layouts,
    Includes,
}

impl AssetDir {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Stylesheets => "stylesheets",
            Self::Javascripts => "javascripts",
            Self::Fonts => "fonts",
            Self::Images => "images",
            Self::Files => "files",
            Self::Layouts => "layouts",
            Self::Includes => "includes",
        }
    }
}
