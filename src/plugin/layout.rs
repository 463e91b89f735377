//! Layout templates a plugin registers with the host site.

use std::path::{Path, PathBuf};

use crate::site::Site;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    plugin: String,
    root: PathBuf,
    file: PathBuf,
}

impl Layout {
    pub fn new(plugin: impl Into<String>, root: impl Into<PathBuf>, file: impl Into<PathBuf>) -> Self {
        Self {
            plugin: plugin.into(),
            root: root.into(),
            file: file.into(),
        }
    }

    /// Name templates refer to: `<plugin>:<file stem path>`, e.g. `theme:post`.
    pub fn name(&self) -> String {
        let stem = self.file.with_extension("");
        let stem = stem
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        format!("{}:{}", self.plugin, stem)
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Source template, preferring `<custom>/<plugin>/layouts/<file>`.
    pub fn path(&self, site: &Site) -> PathBuf {
        let custom = site
            .custom_dir()
            .join(&self.plugin)
            .join("layouts")
            .join(&self.file);
        if custom.is_file() {
            return custom;
        }
        site.source().join(&self.root).join(&self.file)
    }

    pub fn register(&self, site: &mut Site) {
        let path = self.path(site);
        site.register_layout(self.name(), path);
    }
}
