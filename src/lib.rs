//! Quire - asset aggregation for static sites.
//!
//! Plugins (a theme, registered plugins and local plugins) contribute
//! stylesheets, Sass sources, scripts, fonts, images, generic files and
//! layouts. Quire combines stylesheets per media and scripts into single
//! artifacts named by an mtime fingerprint, or copies them one by one,
//! and renders the matching `<link>`/`<script>` tags.
//!
//! ```ignore
//! let mut site = Site::new(config);
//! let mut registry = Registry::new();
//! registry.register_plugin(|name, kind| Plugin::from_dir(name, kind, "theme"), "theme", PluginKind::Theme);
//!
//! let mut cache = AssetCache::new();
//! output::add_static_files(&mut site, &mut registry, &mut cache, &CssCompiler)?;
//! let css = tags::stylesheet_markup(&mut cache, &registry, &site, &CssCompiler)?;
//! ```

pub mod cli;
pub mod combine;
pub mod config;
pub mod error;
pub mod freshness;
pub mod logger;
pub mod output;
pub mod plugin;
pub mod registry;
pub mod sass;
pub mod site;
pub mod tags;
pub mod utils;

pub use combine::{AssetCache, CombinedGroup, CombinedJavascript, CombinedStylesheets};
pub use error::{AssetError, CompileError};
pub use plugin::{AssetDir, AssetFile, AssetKind, Layout, Plugin, PluginKind};
pub use registry::Registry;
pub use sass::{CssCompiler, SassCompiler, SassOptions};
pub use site::Site;
