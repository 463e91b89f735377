//! `quire tags`: print the markup templates embed for plugin assets.

use anyhow::{Context, Result};

use crate::{
    cli::build::load_registry, combine::AssetCache, config::SiteConfig, output, sass::CssCompiler,
    site::Site, tags,
};

/// Stylesheet markup, then script markup, one block per line.
pub fn render_tags(config: &SiteConfig) -> Result<String> {
    let site = Site::new(config.clone());
    let mut registry = load_registry(config);
    output::add_sass_files(&site, &mut registry);

    let mut cache = AssetCache::new();
    let css = tags::stylesheet_markup(&mut cache, &registry, &site, &CssCompiler)
        .context("failed to render stylesheet tags")?;
    let js = tags::javascript_markup(&mut cache, &registry, &site)
        .context("failed to render script tags")?;

    Ok([css, js]
        .into_iter()
        .filter(|block| !block.is_empty())
        .collect::<Vec<_>>()
        .join("\n"))
}

pub fn print_tags(config: &SiteConfig) -> Result<()> {
    let markup = render_tags(config)?;
    if !markup.is_empty() {
        println!("{markup}");
    }
    Ok(())
}
