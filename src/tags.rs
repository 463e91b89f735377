//! `<link>` and `<script>` markup for templates.

use crate::combine::AssetCache;
use crate::error::Result;
use crate::output::{combined_javascript_path, combined_stylesheet_path};
use crate::registry::Registry;
use crate::sass::SassCompiler;
use crate::site::Site;
use crate::utils::html::escape_attr;
use crate::utils::path::url_path;

pub fn link_tag(href: &str, media: &str) -> String {
    format!(
        "<link href='{}' media='{}' rel='stylesheet' type='text/css'>",
        escape_attr(href),
        escape_attr(media)
    )
}

pub fn script_tag(src: &str) -> String {
    format!("<script src='{}'></script>", escape_attr(src))
}

/// One `<link>` per combined media group, concatenated.
pub fn combined_stylesheet_tag(
    cache: &mut AssetCache,
    registry: &Registry,
    site: &Site,
    compiler: &dyn SassCompiler,
) -> Result<String> {
    let groups = cache.stylesheets(registry, site, compiler)?;
    Ok(groups
        .iter()
        .map(|(media, group)| {
            let path = combined_stylesheet_path(media, &group.fingerprint);
            link_tag(&url_path(&path), media)
        })
        .collect())
}

/// `None` when no plugin contributed script content.
pub fn combined_javascript_tag(
    cache: &mut AssetCache,
    registry: &Registry,
    site: &Site,
) -> Result<Option<String>> {
    let js = cache.javascripts(registry, site)?;
    if js.is_empty() {
        return Ok(None);
    }
    let path = combined_javascript_path(js.fingerprint.as_deref());
    Ok(Some(script_tag(&url_path(&path))))
}

/// Every plugin's own stylesheet and Sass tags, in contribution order.
pub fn stylesheet_tags(registry: &Registry) -> Vec<String> {
    registry
        .plugins()
        .flat_map(|p| p.stylesheet_tags().into_iter().chain(p.sass_tags()))
        .collect()
}

pub fn javascript_tags(registry: &Registry) -> Vec<String> {
    registry
        .plugins()
        .flat_map(|p| p.javascript_tags())
        .collect()
}

/// Stylesheet markup for the configured mode.
pub fn stylesheet_markup(
    cache: &mut AssetCache,
    registry: &Registry,
    site: &Site,
    compiler: &dyn SassCompiler,
) -> Result<String> {
    if site.config.octopress.combine_stylesheets {
        combined_stylesheet_tag(cache, registry, site, compiler)
    } else {
        Ok(stylesheet_tags(registry).concat())
    }
}

/// Script markup for the configured mode; empty when there is nothing.
pub fn javascript_markup(cache: &mut AssetCache, registry: &Registry, site: &Site) -> Result<String> {
    if site.config.octopress.combine_javascripts {
        Ok(combined_javascript_tag(cache, registry, site)?.unwrap_or_default())
    } else {
        Ok(javascript_tags(registry).concat())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::freshness::fingerprint;
    use crate::plugin::{Plugin, PluginKind};
    use crate::sass::CssCompiler;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn setup(dir: &TempDir) -> (Site, Registry) {
        let root = dir.path();
        write(&root.join("theme/stylesheets/site.css"), "a{}");
        write(&root.join("theme/stylesheets/site@print.css"), "b{}");
        write(&root.join("theme/javascripts/site.js"), "var a;");
        write(&root.join("gist/javascripts/gist.js"), "var g;");

        let site = Site::new(SiteConfig {
            source: root.to_path_buf(),
            ..SiteConfig::default()
        });
        let mut registry = Registry::new();
        for (plugin, kind) in [("theme", PluginKind::Theme), ("gist", PluginKind::Plugin)] {
            registry.register_plugin(
                |name, kind| Plugin::from_dir(name, kind, root.join(plugin)),
                plugin,
                kind,
            );
        }
        (site, registry)
    }

    #[test]
    fn test_link_and_script_tags() {
        assert_eq!(
            link_tag("/stylesheets/site.css", "all"),
            "<link href='/stylesheets/site.css' media='all' rel='stylesheet' type='text/css'>"
        );
        assert_eq!(
            link_tag("/a.css", "x' onload='y"),
            "<link href='/a.css' media='x&#39; onload=&#39;y' rel='stylesheet' type='text/css'>"
        );
        assert_eq!(script_tag("/javascripts/site.js"), "<script src='/javascripts/site.js'></script>");
    }

    #[test]
    fn test_combined_tags() {
        let dir = TempDir::new().unwrap();
        let (site, registry) = setup(&dir);
        let mut cache = AssetCache::new();

        let css = combined_stylesheet_tag(&mut cache, &registry, &site, &CssCompiler).unwrap();
        let all = fingerprint(&[dir.path().join("theme/stylesheets/site.css")]).unwrap();
        let print = fingerprint(&[dir.path().join("theme/stylesheets/site@print.css")]).unwrap();
        assert_eq!(
            css,
            format!(
                "<link href='/stylesheets/site-all-{all}.css' media='all' rel='stylesheet' type='text/css'>\
                 <link href='/stylesheets/site-print-{print}.css' media='print' rel='stylesheet' type='text/css'>"
            )
        );

        let js = combined_javascript_tag(&mut cache, &registry, &site).unwrap().unwrap();
        let fp = fingerprint(&[dir.path().join("gist/javascripts/gist.js")]).unwrap();
        assert_eq!(js, format!("<script src='/javascripts/site-{fp}.js'></script>"));
    }

    #[test]
    fn test_no_script_tag_without_scripts() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(SiteConfig {
            source: dir.path().to_path_buf(),
            ..SiteConfig::default()
        });
        let mut registry = Registry::new();
        registry.register("theme", PluginKind::Theme);

        let mut cache = AssetCache::new();
        assert!(combined_javascript_tag(&mut cache, &registry, &site).unwrap().is_none());
        assert_eq!(javascript_markup(&mut cache, &registry, &site).unwrap(), "");
    }

    #[test]
    fn test_individual_markup() {
        let dir = TempDir::new().unwrap();
        let (mut site, registry) = setup(&dir);
        site.config.octopress.combine_stylesheets = false;
        site.config.octopress.combine_javascripts = false;
        let mut cache = AssetCache::new();

        assert_eq!(
            stylesheet_tags(&registry),
            vec![
                "<link href='/stylesheets/theme/site.css' media='all' rel='stylesheet' type='text/css'>",
                "<link href='/stylesheets/theme/site@print.css' media='print' rel='stylesheet' type='text/css'>",
            ]
        );
        assert_eq!(
            javascript_markup(&mut cache, &registry, &site).unwrap(),
            "<script src='/javascripts/theme/site.js'></script>\
             <script src='/javascripts/gist/gist.js'></script>"
        );
        assert!(
            stylesheet_markup(&mut cache, &registry, &site, &CssCompiler)
                .unwrap()
                .starts_with("<link href='/stylesheets/theme/site.css'")
        );
    }
}
