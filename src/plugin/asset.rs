//! A single asset contributed by a plugin.

use std::fs;
use std::path::{Path, PathBuf};

use super::{AssetDir, AssetKind};
use crate::error::{AssetError, Result};
use crate::sass::{SassCompiler, SassOptions};
use crate::site::Site;
use crate::tags;
use crate::utils::path::url_path;

/// Media a stylesheet applies to when its name carries no `@media` suffix.
pub const DEFAULT_MEDIA: &str = "all";

/// Reference to one source asset of a plugin.
///
/// Resolution order for the source file:
/// 1. `<custom>/<plugin>/<dir>/<file>` when it exists (site override)
/// 2. `<root>/<file>`, with a relative `root` taken from the site source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetFile {
    plugin: String,
    dir: AssetDir,
    root: PathBuf,
    file: PathBuf,
    media: String,
    kind: AssetKind,
}

impl AssetFile {
    /// Create an asset; kind and media are derived from the file name.
    pub fn new(
        plugin: impl Into<String>,
        dir: AssetDir,
        root: impl Into<PathBuf>,
        file: impl Into<PathBuf>,
    ) -> Self {
        let file = file.into();
        let (kind, media) = match dir {
            AssetDir::Stylesheets => (AssetKind::from_path(&file), media_from_name(&file)),
            _ => (AssetKind::Raw, DEFAULT_MEDIA.to_string()),
        };
        Self {
            plugin: plugin.into(),
            dir,
            root: root.into(),
            file,
            media,
            kind,
        }
    }

    pub fn with_media(mut self, media: impl Into<String>) -> Self {
        self.media = media.into();
        self
    }

    pub fn with_kind(mut self, kind: AssetKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn plugin(&self) -> &str {
        &self.plugin
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn media(&self) -> &str {
        &self.media
    }

    pub const fn kind(&self) -> AssetKind {
        self.kind
    }

    pub const fn dir(&self) -> AssetDir {
        self.dir
    }

    /// Resolve the source file for `site`, honoring custom overrides.
    pub fn path(&self, site: &Site) -> PathBuf {
        let custom = site
            .custom_dir()
            .join(&self.plugin)
            .join(self.dir.as_str())
            .join(&self.file);
        if custom.is_file() {
            return custom;
        }
        site.source().join(&self.root).join(&self.file)
    }

    /// Output path relative to the site output directory.
    ///
    /// Generic files land at the output root; everything else goes under
    /// `<dir>/<plugin>/`.
    pub fn destination(&self) -> PathBuf {
        match self.dir {
            AssetDir::Files => self.file.clone(),
            dir => Path::new(dir.as_str()).join(&self.plugin).join(&self.file),
        }
    }

    /// Root-relative URL of the copied asset.
    pub fn url(&self) -> String {
        url_path(&self.destination())
    }

    /// Tag referencing the individually copied asset, when it has one.
    pub fn tag(&self) -> Option<String> {
        match self.dir {
            AssetDir::Stylesheets => Some(tags::link_tag(&self.url(), &self.media)),
            AssetDir::Javascripts => Some(tags::script_tag(&self.url())),
            _ => None,
        }
    }

    /// Raw file content.
    pub fn read(&self, site: &Site) -> Result<String> {
        read_source(&self.path(site))
    }

    /// Compile the file with the site's Sass options.
    pub fn compile(&self, site: &Site, compiler: &dyn SassCompiler) -> Result<String> {
        self.compile_with(site, compiler, &SassOptions::for_site(site))
    }

    pub fn compile_with(
        &self,
        site: &Site,
        compiler: &dyn SassCompiler,
        options: &SassOptions,
    ) -> Result<String> {
        compiler.compile_file(&self.path(site), options)
    }

    /// Queue an unmodified copy into the site output.
    pub fn copy(&self, site: &mut Site) {
        let source = self.path(site);
        site.copy_file(source, self.destination());
    }
}

/// Read a source file; any failure counts as a missing file.
pub(crate) fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| AssetError::missing(path, e))
}

/// Media from an `@media` suffix in the file stem.
///
/// `site@print.css` → `print`, `theme@screen.min.css` → `screen`,
/// `site.css` → `all`.
fn media_from_name(file: &Path) -> String {
    let name = file
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    name.split_once('@')
        .and_then(|(_, rest)| rest.split('.').next())
        .filter(|media| !media.is_empty())
        .unwrap_or(DEFAULT_MEDIA)
        .to_string()
}
