//! `[sass]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [sass]
//! output_style = "expanded"   # compact | expanded | compressed | nested
//! trace = true                # Full backtraces on compile errors
//! line_numbers = true         # Source line comments (ignored for combined output)
//! files = ["sass/extra.scss"] # Extra files added to the `sass` plugin
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::config::{ConfigDiagnostics, FieldPath};

/// Compiled CSS formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    Compact,
    Expanded,
    #[default]
    Compressed,
    Nested,
}

impl OutputStyle {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Expanded => "expanded",
            Self::Compressed => "compressed",
            Self::Nested => "nested",
        }
    }
}

impl fmt::Display for OutputStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SassConfig {
    pub output_style: OutputStyle,
    pub trace: bool,
    pub line_numbers: bool,
    /// Extra Sass files handed to the `sass` plugin before combination.
    /// Relative to the site source directory.
    pub files: Vec<PathBuf>,
}

impl SassConfig {
    const FILES: FieldPath = FieldPath::new("sass.files");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        for file in &self.files {
            if file.as_os_str().is_empty() {
                diag.error(Self::FILES, "entries must not be empty");
            } else if file.is_absolute() {
                diag.error_with_hint(
                    Self::FILES,
                    format!("`{}` is absolute", file.display()),
                    "use a path relative to the site source directory",
                );
            }
        }
    }
}
