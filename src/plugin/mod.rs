//! Plugins: named, typed bundles of site assets.
//!
//! A plugin owns ordered asset collections. Their order is the order
//! the plugin contributes to combined artifacts, so collections only
//! ever grow by appending.
//!
//! ```text
//! <plugin root>/
//! ├── stylesheets/   .css → stylesheets, .scss/.sass → sass
//! ├── javascripts/
//! ├── fonts/
//! ├── images/
//! ├── files/         copied to the output root
//! ├── layouts/
//! └── includes/      embed() sources
//! ```

mod asset;
mod kind;
mod layout;

pub use asset::{AssetFile, DEFAULT_MEDIA};
pub use kind::{AssetDir, AssetKind, PluginKind};
pub use layout::Layout;

pub(crate) use asset::read_source;

use jwalk::{Parallelism, WalkDir};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::site::Site;

#[derive(Debug, Clone)]
pub struct Plugin {
    pub name: String,
    pub kind: PluginKind,
    /// Asset root; relative roots resolve against the site source.
    root: PathBuf,
    pub stylesheets: Vec<AssetFile>,
    pub sass: Vec<AssetFile>,
    pub javascripts: Vec<AssetFile>,
    pub fonts: Vec<AssetFile>,
    pub images: Vec<AssetFile>,
    pub files: Vec<AssetFile>,
    pub layouts: Vec<Layout>,
}

impl Plugin {
    /// Empty plugin rooted at the site source directory.
    pub fn new(name: impl Into<String>, kind: PluginKind) -> Self {
        Self {
            name: name.into(),
            kind,
            root: PathBuf::new(),
            stylesheets: Vec::new(),
            sass: Vec::new(),
            javascripts: Vec::new(),
            fonts: Vec::new(),
            images: Vec::new(),
            files: Vec::new(),
            layouts: Vec::new(),
        }
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Build a plugin from the conventional directory layout under `root`.
    ///
    /// Files are picked up in sorted path order so contribution order is
    /// stable across runs. Missing subdirectories are skipped.
    pub fn from_dir(name: impl Into<String>, kind: PluginKind, root: impl Into<PathBuf>) -> Self {
        let mut plugin = Self::new(name, kind).with_root(root);

        for file in plugin.scan(AssetDir::Stylesheets) {
            plugin.add_stylesheet(file);
        }
        for file in plugin.scan(AssetDir::Javascripts) {
            plugin.add_javascript(file);
        }
        for file in plugin.scan(AssetDir::Fonts) {
            plugin.add_asset(AssetDir::Fonts, file);
        }
        for file in plugin.scan(AssetDir::Images) {
            plugin.add_asset(AssetDir::Images, file);
        }
        for file in plugin.scan(AssetDir::Files) {
            plugin.add_asset(AssetDir::Files, file);
        }
        for file in plugin.scan(AssetDir::Layouts) {
            plugin.add_layout(file);
        }

        plugin
    }

    /// Relative paths of every file under `<root>/<dir>`, sorted.
    fn scan(&self, dir: AssetDir) -> Vec<PathBuf> {
        let base = self.root.join(dir.as_str());
        if !base.is_dir() {
            return Vec::new();
        }

        WalkDir::new(&base)
            .sort(true)
            .parallelism(Parallelism::Serial)
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| e.path().strip_prefix(&base).ok().map(Path::to_path_buf))
            .collect()
    }

    fn dir_root(&self, dir: AssetDir) -> PathBuf {
        self.root.join(dir.as_str())
    }

    /// Add a stylesheet; `.scss`/`.sass` files go to the `sass` collection.
    pub fn add_stylesheet(&mut self, file: impl Into<PathBuf>) -> &mut Self {
        self.add_asset(AssetDir::Stylesheets, file)
    }

    pub fn add_javascript(&mut self, file: impl Into<PathBuf>) -> &mut Self {
        self.add_asset(AssetDir::Javascripts, file)
    }

    /// Append an asset to the collection matching `dir`.
    ///
    /// Layouts and includes are not asset collections; use
    /// [`add_layout`](Self::add_layout) for the former.
    pub fn add_asset(&mut self, dir: AssetDir, file: impl Into<PathBuf>) -> &mut Self {
        let asset = AssetFile::new(&self.name, dir, self.dir_root(dir), file);
        match dir {
            AssetDir::Stylesheets => match asset.kind() {
                AssetKind::Sass => self.sass.push(asset),
                AssetKind::Raw => self.stylesheets.push(asset),
            },
            AssetDir::Javascripts => self.javascripts.push(asset),
            AssetDir::Fonts => self.fonts.push(asset),
            AssetDir::Images => self.images.push(asset),
            AssetDir::Files => self.files.push(asset),
            AssetDir::Layouts | AssetDir::Includes => {}
        }
        self
    }

    pub fn add_layout(&mut self, file: impl Into<PathBuf>) -> &mut Self {
        let layout = Layout::new(&self.name, self.dir_root(AssetDir::Layouts), file);
        self.layouts.push(layout);
        self
    }

    /// Late registration of Sass sources given relative to the site source
    /// (the `sass.files` setting). Always compiled, whatever the extension.
    pub fn add_files<P: AsRef<Path>>(&mut self, paths: &[P]) {
        for path in paths {
            let path = path.as_ref();
            let parent = path.parent().map(Path::to_path_buf).unwrap_or_default();
            let Some(file) = path.file_name() else {
                continue;
            };
            let asset = AssetFile::new(&self.name, AssetDir::Stylesheets, parent, file)
                .with_kind(AssetKind::Sass);
            self.sass.push(asset);
        }
    }

    /// Resolved script sources, in contribution order.
    pub fn javascript_paths(&self, site: &Site) -> Vec<PathBuf> {
        self.javascripts.iter().map(|js| js.path(site)).collect()
    }

    pub fn stylesheet_tags(&self) -> Vec<String> {
        self.stylesheets.iter().filter_map(AssetFile::tag).collect()
    }

    /// Tags for the copied Sass sources. These point at the uncompiled
    /// files, which is what individual mode writes.
    pub fn sass_tags(&self) -> Vec<String> {
        self.sass.iter().filter_map(AssetFile::tag).collect()
    }

    pub fn javascript_tags(&self) -> Vec<String> {
        self.javascripts.iter().filter_map(AssetFile::tag).collect()
    }

    /// Text of an include, preferring `<custom>/<plugin>/includes/<file>`.
    pub fn embed(&self, file: impl AsRef<Path>, site: &Site) -> Result<String> {
        let file = file.as_ref();
        let custom = site
            .custom_dir()
            .join(&self.name)
            .join(AssetDir::Includes.as_str())
            .join(file);
        let path = if custom.is_file() {
            custom
        } else {
            site.source().join(self.dir_root(AssetDir::Includes)).join(file)
        };
        read_source(&path)
    }
}
