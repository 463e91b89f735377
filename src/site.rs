//! The host site: configuration, static-file sink and layout table.
//!
//! The core never touches the output directory itself. It queues
//! [`StaticFile`] jobs here and the host flushes them with
//! [`StaticFile::write_to`] once the build pass is over.

use indexmap::IndexMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::SiteConfig;
use crate::error::{AssetError, Result};
use crate::freshness::is_newer_than;

/// Custom directory name used when `custom` is not configured.
pub const CUSTOM_DIR: &str = "_custom";

/// A queued write into the output tree. `dest` is output-relative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StaticFile {
    /// Generated content, e.g. a combined stylesheet.
    Content { contents: String, dest: PathBuf },
    /// Unmodified copy of a source file.
    Copy { source: PathBuf, dest: PathBuf },
}

/// What flushing a job did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    Copied,
    /// Destination already newer than the source.
    Fresh,
}

impl StaticFile {
    pub fn dest(&self) -> &Path {
        match self {
            Self::Content { dest, .. } | Self::Copy { dest, .. } => dest,
        }
    }

    /// Write the job below `output`.
    ///
    /// Copies are skipped when the destination is newer than the source,
    /// unless `clean` is set.
    pub fn write_to(&self, output: &Path, clean: bool) -> Result<WriteOutcome> {
        let target = output.join(self.dest());
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| AssetError::io(parent, e))?;
        }

        match self {
            Self::Content { contents, .. } => {
                fs::write(&target, contents).map_err(|e| AssetError::io(&target, e))?;
                Ok(WriteOutcome::Written)
            }
            Self::Copy { source, .. } => {
                if !source.is_file() {
                    return Err(AssetError::missing(
                        source,
                        std::io::Error::from(std::io::ErrorKind::NotFound),
                    ));
                }
                if !clean && target.exists() && !is_newer_than(source, &target) {
                    return Ok(WriteOutcome::Fresh);
                }
                fs::copy(source, &target).map_err(|e| AssetError::io(&target, e))?;
                Ok(WriteOutcome::Copied)
            }
        }
    }
}

#[derive(Debug)]
pub struct Site {
    pub config: SiteConfig,
    static_files: Vec<StaticFile>,
    layouts: IndexMap<String, PathBuf>,
}

impl Site {
    pub fn new(config: SiteConfig) -> Self {
        Self {
            config,
            static_files: Vec::new(),
            layouts: IndexMap::new(),
        }
    }

    /// Site source directory.
    pub fn source(&self) -> &Path {
        &self.config.source
    }

    /// Directory holding per-plugin overrides: configured `custom`, else
    /// [`CUSTOM_DIR`], relative to the source directory.
    pub fn custom_dir(&self) -> PathBuf {
        let name = self
            .config
            .custom
            .as_deref()
            .unwrap_or(Path::new(CUSTOM_DIR));
        self.source().join(name)
    }

    pub fn write_file(&mut self, contents: String, dest: impl Into<PathBuf>) {
        self.static_files.push(StaticFile::Content {
            contents,
            dest: dest.into(),
        });
    }

    pub fn copy_file(&mut self, source: impl Into<PathBuf>, dest: impl Into<PathBuf>) {
        self.static_files.push(StaticFile::Copy {
            source: source.into(),
            dest: dest.into(),
        });
    }

    pub fn static_files(&self) -> &[StaticFile] {
        &self.static_files
    }

    pub fn take_static_files(&mut self) -> Vec<StaticFile> {
        std::mem::take(&mut self.static_files)
    }

    /// Later registrations under the same name win.
    pub fn register_layout(&mut self, name: String, path: PathBuf) {
        self.layouts.insert(name, path);
    }

    pub fn layouts(&self) -> &IndexMap<String, PathBuf> {
        &self.layouts
    }
}
