//! Asset combination with per-build memoization.
//!
//! Stylesheets are partitioned by media into [`CombinedGroup`]s; scripts
//! are concatenated into one [`CombinedJavascript`]. Each pipeline runs at
//! most once per [`AssetCache`] until [`AssetCache::reset`] is called.
//!
//! Contribution order is registry order (theme, plugins, local plugins),
//! then within a plugin: `stylesheets` before `sass`, each in insertion
//! order. Path lists follow the same order so fingerprints track content.

use indexmap::IndexMap;
use std::path::PathBuf;

use crate::debug;
use crate::error::Result;
use crate::freshness::fingerprint;
use crate::plugin::{AssetKind, Plugin, read_source};
use crate::registry::Registry;
use crate::sass::{SassCompiler, SassOptions};
use crate::site::Site;
use crate::utils::plural_count;

/// One media group of the combined stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinedGroup {
    pub contents: String,
    /// Constituent sources in contribution order.
    pub paths: Vec<PathBuf>,
    pub fingerprint: String,
}

/// Media name → group, in first-seen order.
pub type CombinedStylesheets = IndexMap<String, CombinedGroup>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CombinedJavascript {
    pub contents: String,
    /// Fingerprint of the *last* plugin's script paths; `None` without plugins.
    pub fingerprint: Option<String>,
}

impl CombinedJavascript {
    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}

/// One pipeline's result: unbuilt until the first successful run, sealed after.
#[derive(Debug)]
struct Memo<T>(Option<T>);

impl<T> Default for Memo<T> {
    fn default() -> Self {
        Self(None)
    }
}

impl<T> Memo<T> {
    /// A failed build leaves the memo unbuilt.
    fn get_or_try_seal(&mut self, build: impl FnOnce() -> Result<T>) -> Result<&T> {
        let value = match self.0.take() {
            Some(sealed) => sealed,
            None => build()?,
        };
        Ok(self.0.insert(value))
    }

    fn unseal(&mut self) {
        self.0 = None;
    }
}

/// Memoized combination results for one build.
#[derive(Debug, Default)]
pub struct AssetCache {
    stylesheets: Memo<CombinedStylesheets>,
    javascripts: Memo<CombinedJavascript>,
}

impl AssetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Combined stylesheets, built on first call.
    ///
    /// Sass sources are compiled with the site's options minus line comments; raw sources are
    /// read and trimmed. Fails on the first missing file or compile error.
    pub fn stylesheets(
        &mut self,
        registry: &Registry,
        site: &Site,
        compiler: &dyn SassCompiler,
    ) -> Result<&CombinedStylesheets> {
        self.stylesheets
            .get_or_try_seal(|| combine_stylesheets(registry, site, compiler))
    }

    /// Combined scripts, built on first call.
    pub fn javascripts(&mut self, registry: &Registry, site: &Site) -> Result<&CombinedJavascript> {
        self.javascripts
            .get_or_try_seal(|| combine_javascripts(registry, site))
    }

    /// Drop both results; the next access rebuilds.
    pub fn reset(&mut self) {
        self.stylesheets.unseal();
        self.javascripts.unseal();
    }
}

fn header(plugin: &Plugin) -> String {
    format!("/* {} {} */\n", plugin.name, plugin.kind)
}

fn combine_stylesheets(
    registry: &Registry,
    site: &Site,
    compiler: &dyn SassCompiler,
) -> Result<CombinedStylesheets> {
    debug!("combine"; "combining stylesheets from {}", plural_count(registry.len(), "plugin"));
    let options = SassOptions::for_site(site).combined();
    let mut groups = CombinedStylesheets::new();

    for plugin in registry.plugins() {
        for file in plugin.stylesheets.iter().chain(&plugin.sass) {
            // Only the first contributor to a media group gets a header
            let group = groups
                .entry(file.media().to_string())
                .or_insert_with(|| CombinedGroup {
                    contents: header(plugin),
                    paths: Vec::new(),
                    fingerprint: String::new(),
                });

            match file.kind() {
                AssetKind::Sass => group.contents.push_str(&file.compile_with(site, compiler, &options)?),
                AssetKind::Raw => group.contents.push_str(file.read(site)?.trim()),
            }
            group.paths.push(file.path(site));
        }
    }

    for (media, group) in &mut groups {
        group.fingerprint = fingerprint(&group.paths)?;
        debug!("combine"; "sealed `{}` stylesheet: {} ({})", media, plural_count(group.paths.len(), "file"), group.fingerprint);
    }
    Ok(groups)
}

fn combine_javascripts(registry: &Registry, site: &Site) -> Result<CombinedJavascript> {
    let mut combined = CombinedJavascript::default();

    for plugin in registry.plugins() {
        let paths = plugin.javascript_paths(site);
        // Overwritten per plugin: only the last plugin's paths count
        combined.fingerprint = Some(fingerprint(&paths)?);
        for path in &paths {
            combined.contents.push_str(&read_source(path)?);
        }
    }

    debug!("combine"; "sealed javascript: {} bytes", combined.contents.len());
    Ok(combined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{OutputStyle, SiteConfig};
    use crate::error::{AssetError, CompileError};
    use crate::plugin::{AssetDir, AssetFile, PluginKind};
    use crate::sass::CssCompiler;
    use std::cell::Cell;
    use std::fs::{self, File};
    use std::path::Path;
    use std::time::{Duration, UNIX_EPOCH};
    use tempfile::TempDir;

    /// Passes source through, counting calls.
    #[derive(Default)]
    struct CountingCompiler {
        calls: Cell<usize>,
    }

    impl SassCompiler for CountingCompiler {
        fn compile(&self, source: &str, _: &SassOptions) -> std::result::Result<String, CompileError> {
            self.calls.set(self.calls.get() + 1);
            Ok(format!("/* compiled */{}", source.trim()))
        }
    }

    struct FailingCompiler;

    impl SassCompiler for FailingCompiler {
        fn compile(&self, _: &str, _: &SassOptions) -> std::result::Result<String, CompileError> {
            Err(CompileError::new("undefined variable").with_location(1, 8))
        }
    }

    fn write(path: &Path, content: &str, secs: u64) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
        let file = File::options().write(true).open(path).unwrap();
        file.set_modified(UNIX_EPOCH + Duration::from_secs(secs))
            .unwrap();
    }

    fn site_at(dir: &TempDir) -> Site {
        Site::new(SiteConfig {
            source: dir.path().to_path_buf(),
            ..SiteConfig::default()
        })
    }

    /// Plugin constructor rooted at `<tmp>/<dir_name>`.
    fn rooted(dir: &TempDir, dir_name: &str) -> impl FnOnce(String, PluginKind) -> Plugin + use<> {
        let root = dir.path().join(dir_name);
        move |name, kind| Plugin::new(name, kind).with_root(root)
    }

    #[test]
    fn test_theme_and_local_plugin_media_groups() {
        let dir = TempDir::new().unwrap();
        let site = site_at(&dir);
        write(&dir.path().join("theme/stylesheets/screen.css"), "  body{}\n", 100);
        write(&dir.path().join("print/stylesheets/print.css"), "p{}", 200);

        let mut registry = Registry::new();
        registry
            .register_plugin(rooted(&dir, "theme"), "theme", PluginKind::Theme)
            .add_stylesheet("screen.css");
        let print = registry.register_plugin(
            rooted(&dir, "print"),
            "print",
            PluginKind::LocalPlugin,
        );
        let css = AssetFile::new("print", AssetDir::Stylesheets, print.root().join("stylesheets"), "print.css")
            .with_media("print");
        print.stylesheets.push(css);

        let mut cache = AssetCache::new();
        let groups = cache
            .stylesheets(&registry, &site, &CountingCompiler::default())
            .unwrap();

        assert_eq!(groups.keys().collect::<Vec<_>>(), vec!["all", "print"]);
        assert_eq!(groups["all"].contents, "/* theme theme */\nbody{}");
        assert_eq!(groups["print"].contents, "/* print local_plugin */\np{}");
        assert_eq!(
            groups["print"].paths,
            vec![dir.path().join("print/stylesheets/print.css")]
        );
        assert_ne!(groups["all"].fingerprint, groups["print"].fingerprint);
    }

    #[test]
    fn test_header_only_for_first_contributor() {
        let dir = TempDir::new().unwrap();
        let site = site_at(&dir);
        write(&dir.path().join("theme/stylesheets/a.css"), "a{}", 1);
        write(&dir.path().join("theme/stylesheets/b.css"), "b{}", 2);
        write(&dir.path().join("gist/stylesheets/gist.css"), "g{}", 3);

        let mut registry = Registry::new();
        registry
            .register_plugin(rooted(&dir, "theme"), "theme", PluginKind::Theme)
            .add_stylesheet("a.css")
            .add_stylesheet("b.css");
        registry
            .register_plugin(rooted(&dir, "gist"), "gist", PluginKind::Plugin)
            .add_stylesheet("gist.css");

        let mut cache = AssetCache::new();
        let groups = cache
            .stylesheets(&registry, &site, &CountingCompiler::default())
            .unwrap();

        assert_eq!(groups.len(), 1);
        assert_eq!(groups["all"].contents, "/* theme theme */\na{}b{}g{}");
        assert_eq!(groups["all"].paths.len(), 3);
    }

    #[test]
    fn test_stylesheets_memoized() {
        let dir = TempDir::new().unwrap();
        let site = site_at(&dir);
        write(&dir.path().join("theme/stylesheets/site.css"), "a{}", 1);
        write(&dir.path().join("theme/stylesheets/main.scss"), "$c: red;", 2);

        let mut registry = Registry::new();
        registry
            .register_plugin(rooted(&dir, "theme"), "theme", PluginKind::Theme)
            .add_stylesheet("main.scss")
            .add_stylesheet("site.css");

        let compiler = CountingCompiler::default();
        let mut cache = AssetCache::new();
        let first = cache.stylesheets(&registry, &site, &compiler).unwrap().clone();
        let second = cache.stylesheets(&registry, &site, &compiler).unwrap().clone();

        assert_eq!(first, second);
        assert_eq!(compiler.calls.get(), 1);
        // Raw stylesheets come before Sass sources within a plugin
        assert_eq!(first["all"].contents, "/* theme theme */\na{}/* compiled */$c: red;");

        cache.reset();
        cache.stylesheets(&registry, &site, &compiler).unwrap();
        assert_eq!(compiler.calls.get(), 2);
    }

    #[test]
    fn test_combined_sass_drops_line_comments() {
        let dir = TempDir::new().unwrap();
        let mut site = site_at(&dir);
        site.config.sass.output_style = OutputStyle::Expanded;
        site.config.sass.line_numbers = true;
        write(&dir.path().join("theme/stylesheets/main.scss"), "a{color:red}", 1);

        let mut registry = Registry::new();
        registry
            .register_plugin(rooted(&dir, "theme"), "theme", PluginKind::Theme)
            .add_stylesheet("main.scss");

        let mut cache = AssetCache::new();
        let groups = cache.stylesheets(&registry, &site, &CssCompiler).unwrap();
        let contents = &groups["all"].contents;
        assert!(contents.starts_with("/* theme theme */\na {\n"));
        assert!(!contents.contains("/* line"));
    }

    #[test]
    fn test_add_files_feeds_sass_group() {
        let dir = TempDir::new().unwrap();
        let site = site_at(&dir);
        let extra = dir.path().join("extra.scss");
        write(&extra, ".x{}", 500);

        let mut registry = Registry::new();
        registry.register("sass", PluginKind::LocalPlugin);
        registry.plugin_mut("sass").unwrap().add_files(&["extra.scss"]);

        let compiler = CountingCompiler::default();
        let mut cache = AssetCache::new();
        let fp = {
            let groups = cache.stylesheets(&registry, &site, &compiler).unwrap();
            assert_eq!(groups["all"].paths, vec![extra.clone()]);
            assert_eq!(groups["all"].fingerprint, fingerprint(&[&extra]).unwrap());
            groups["all"].fingerprint.clone()
        };

        write(&extra, ".x{}", 900);
        cache.reset();
        let groups = cache.stylesheets(&registry, &site, &compiler).unwrap();
        assert_ne!(groups["all"].fingerprint, fp);
    }

    #[test]
    fn test_compile_failure_propagates() {
        let dir = TempDir::new().unwrap();
        let site = site_at(&dir);
        write(&dir.path().join("theme/stylesheets/main.scss"), "a{color:$x}", 1);

        let mut registry = Registry::new();
        registry
            .register_plugin(rooted(&dir, "theme"), "theme", PluginKind::Theme)
            .add_stylesheet("main.scss");

        let mut cache = AssetCache::new();
        let err = cache.stylesheets(&registry, &site, &FailingCompiler).unwrap_err();
        assert!(matches!(err, AssetError::Compile(ref e) if e.location == Some((1, 8))));
    }

    #[test]
    fn test_missing_stylesheet_fails() {
        let dir = TempDir::new().unwrap();
        let site = site_at(&dir);

        let mut registry = Registry::new();
        registry
            .register_plugin(rooted(&dir, "theme"), "theme", PluginKind::Theme)
            .add_stylesheet("gone.css");

        let mut cache = AssetCache::new();
        assert!(matches!(
            cache
                .stylesheets(&registry, &site, &CountingCompiler::default())
                .unwrap_err(),
            AssetError::MissingFile { .. }
        ));
    }

    #[test]
    fn test_javascripts_concatenated_untrimmed() {
        let dir = TempDir::new().unwrap();
        let site = site_at(&dir);
        write(&dir.path().join("theme/javascripts/a.js"), "var a;\n", 10);
        write(&dir.path().join("gist/javascripts/b.js"), "var b;\n", 20);
        write(&dir.path().join("gist/javascripts/c.js"), "var c;\n", 30);

        let mut registry = Registry::new();
        registry
            .register_plugin(rooted(&dir, "theme"), "theme", PluginKind::Theme)
            .add_javascript("a.js");
        registry
            .register_plugin(rooted(&dir, "gist"), "gist", PluginKind::Plugin)
            .add_javascript("b.js")
            .add_javascript("c.js");

        let mut cache = AssetCache::new();
        let js = cache.javascripts(&registry, &site).unwrap().clone();
        assert_eq!(js.contents, "var a;\nvar b;\nvar c;\n");

        // Fingerprint covers the last plugin only
        let gist = [
            dir.path().join("gist/javascripts/b.js"),
            dir.path().join("gist/javascripts/c.js"),
        ];
        assert_eq!(js.fingerprint, Some(fingerprint(&gist).unwrap()));

        // Touching the theme script leaves the name unchanged
        write(&dir.path().join("theme/javascripts/a.js"), "var a;\n", 99);
        cache.reset();
        assert_eq!(
            cache.javascripts(&registry, &site).unwrap().fingerprint,
            js.fingerprint
        );
    }

    #[test]
    fn test_javascripts_memoized() {
        let dir = TempDir::new().unwrap();
        let site = site_at(&dir);
        let script = dir.path().join("theme/javascripts/site.js");
        write(&script, "var site;\n", 10);

        let mut registry = Registry::new();
        registry
            .register_plugin(rooted(&dir, "theme"), "theme", PluginKind::Theme)
            .add_javascript("site.js");

        let mut cache = AssetCache::new();
        let first = cache.javascripts(&registry, &site).unwrap().clone();

        // Sealed: neither new content nor a new mtime shows through
        write(&script, "var changed;\n", 99);
        let second = cache.javascripts(&registry, &site).unwrap();
        assert_eq!(*second, first);
        assert_eq!(second.contents, "var site;\n");

        cache.reset();
        let rebuilt = cache.javascripts(&registry, &site).unwrap();
        assert_eq!(rebuilt.contents, "var changed;\n");
        assert_ne!(rebuilt.fingerprint, first.fingerprint);
    }

    #[test]
    fn test_javascripts_empty() {
        let dir = TempDir::new().unwrap();
        let site = site_at(&dir);
        let mut registry = Registry::new();
        registry.register("theme", PluginKind::Theme);

        let mut cache = AssetCache::new();
        let js = cache.javascripts(&registry, &site).unwrap();
        assert!(js.is_empty());

        let mut cache = AssetCache::new();
        let js = cache.javascripts(&Registry::new(), &site).unwrap();
        assert!(js.is_empty());
        assert!(js.fingerprint.is_none());
    }
}
