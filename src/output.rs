//! Output writer: queues every plugin asset into the site's static files.
//!
//! Stylesheets and scripts are either combined into fingerprinted
//! artifacts or copied one by one, per the `[octopress]` switches.
//! Fonts, images and generic files are always copied.

use std::path::{Path, PathBuf};

use crate::combine::AssetCache;
use crate::error::Result;
use crate::plugin::AssetFile;
use crate::registry::Registry;
use crate::sass::{SassCompiler, SassOptions};
use crate::site::Site;
use crate::{debug, log};

/// Base name shared by combined artifacts.
const COMBINED_NAME: &str = "site";

/// Plugin that receives the `sass.files` setting.
pub const SASS_PLUGIN: &str = "sass";

/// `stylesheets/site-<media>-<fingerprint>.css`
pub fn combined_stylesheet_path(media: &str, fingerprint: &str) -> PathBuf {
    Path::new("stylesheets").join(format!("{COMBINED_NAME}-{media}-{fingerprint}.css"))
}

/// `javascripts/site-<fingerprint>.js`; an absent fingerprint leaves it blank.
pub fn combined_javascript_path(fingerprint: Option<&str>) -> PathBuf {
    let fingerprint = fingerprint.unwrap_or_default();
    Path::new("javascripts").join(format!("{COMBINED_NAME}-{fingerprint}.js"))
}

/// Queue all plugin assets for output.
///
/// Runs `sass.files` registration first so combined stylesheets see the
/// extra files. Missing sources and compile failures abort.
pub fn add_static_files(
    site: &mut Site,
    registry: &mut Registry,
    cache: &mut AssetCache,
    compiler: &dyn SassCompiler,
) -> Result<()> {
    add_sass_files(site, registry);

    if site.config.octopress.combine_stylesheets {
        write_combined_stylesheet(site, registry, cache, compiler)?;
    } else {
        copy_stylesheets(site, registry);
    }

    if site.config.octopress.combine_javascripts {
        write_combined_javascript(site, registry, cache)?;
    } else {
        copy_javascripts(site, registry);
    }

    copy_static_files(site, registry);
    Ok(())
}

/// Hand `sass.files` to the `sass` plugin, when there is one.
pub fn add_sass_files(site: &Site, registry: &mut Registry) {
    let files = &site.config.sass.files;
    if files.is_empty() {
        return;
    }
    match registry.plugin_mut(SASS_PLUGIN) {
        Some(plugin) => plugin.add_files(files.as_slice()),
        None => log!("warning"; "sass.files is set but no `{}` plugin is registered, skipping", SASS_PLUGIN),
    }
}

/// Compile each combined media group and queue it.
pub fn write_combined_stylesheet(
    site: &mut Site,
    registry: &Registry,
    cache: &mut AssetCache,
    compiler: &dyn SassCompiler,
) -> Result<()> {
    let options = SassOptions::for_site(site).combined();
    let groups = cache.stylesheets(registry, site, compiler)?;

    let mut jobs = Vec::with_capacity(groups.len());
    for (media, group) in groups {
        let css = compiler.compile(&group.contents, &options)?;
        jobs.push((css, combined_stylesheet_path(media, &group.fingerprint)));
    }

    for (css, dest) in jobs {
        debug!("write"; "{}", dest.display());
        site.write_file(css, dest);
    }
    Ok(())
}

/// Queue the combined script, unless no plugin contributed any.
pub fn write_combined_javascript(site: &mut Site, registry: &Registry, cache: &mut AssetCache) -> Result<()> {
    let js = cache.javascripts(registry, site)?;
    if js.is_empty() {
        debug!("write"; "no javascript to combine");
        return Ok(());
    }

    let dest = combined_javascript_path(js.fingerprint.as_deref());
    let contents = js.contents.clone();
    debug!("write"; "{}", dest.display());
    site.write_file(contents, dest);
    Ok(())
}

/// Copy stylesheets and Sass sources as they are.
pub fn copy_stylesheets(site: &mut Site, registry: &Registry) {
    for plugin in registry.plugins() {
        copy(plugin.stylesheets.iter().chain(&plugin.sass), site);
    }
}

pub fn copy_javascripts(site: &mut Site, registry: &Registry) {
    for plugin in registry.plugins() {
        copy(&plugin.javascripts, site);
    }
}

/// Generic files, images and fonts, whatever the combine settings.
pub fn copy_static_files(site: &mut Site, registry: &Registry) {
    for plugin in registry.plugins() {
        copy(&plugin.files, site);
        copy(&plugin.images, site);
        copy(&plugin.fonts, site);
    }
}

fn copy<'a>(files: impl IntoIterator<Item = &'a AssetFile>, site: &mut Site) {
    for file in files {
        file.copy(site);
    }
}
