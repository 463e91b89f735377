//! `quire build`: register plugins, queue their assets, flush to disk.
//!
//! Phases:
//! - **Register** - theme and `[[plugins]]` scanned from their directories
//! - **Queue** - combine or copy stylesheets and scripts, copy the rest
//! - **Layouts** - record plugin layouts on the site
//! - **Flush** - write generated files, copy sources that changed

use anyhow::{Context, Result};
use std::path::Path;

use crate::{
    combine::AssetCache,
    config::SiteConfig,
    debug, log,
    logger::ProgressLine,
    output,
    plugin::{Plugin, PluginKind},
    registry::Registry,
    sass::CssCompiler,
    site::{Site, StaticFile, WriteOutcome},
    utils::plural_count,
};

/// Register the configured theme and plugins, in file order.
pub fn load_registry(config: &SiteConfig) -> Registry {
    let mut registry = Registry::new();

    if let Some(theme) = &config.theme {
        registry.register_plugin(
            |name, kind| Plugin::from_dir(name, kind, &theme.path),
            &theme.name,
            PluginKind::Theme,
        );
    }
    for entry in &config.plugins {
        registry.register_plugin(
            |name, kind| Plugin::from_dir(name, kind, &entry.path),
            &entry.name,
            entry.kind,
        );
    }

    debug!("registry"; "plugins: {}", registry.names().join(", "));
    registry
}

/// Build all plugin assets into the configured output directory.
pub fn build_site(config: &SiteConfig, clean: bool) -> Result<()> {
    let mut site = Site::new(config.clone());
    let mut registry = load_registry(config);
    log!("build"; "{} registered", plural_count(registry.len(), "plugin"));

    let mut cache = AssetCache::new();
    output::add_static_files(&mut site, &mut registry, &mut cache, &CssCompiler)
        .context("failed to collect plugin assets")?;

    registry.register_layouts(&mut site);
    debug!("build"; "{} registered", plural_count(site.layouts().len(), "layout"));

    let jobs = site.take_static_files();
    flush(&jobs, &config.output, clean)
}

#[derive(Debug, Default)]
struct FlushStats {
    written: usize,
    copied: usize,
    fresh: usize,
}

/// Write every queued job below `output`.
fn flush(jobs: &[StaticFile], output: &Path, clean: bool) -> Result<()> {
    let writes = jobs
        .iter()
        .filter(|job| matches!(job, StaticFile::Content { .. }))
        .count();
    let progress = ProgressLine::new(&[("write", writes), ("copy", jobs.len() - writes)]);

    let mut stats = FlushStats::default();
    for job in jobs {
        let outcome = job
            .write_to(output, clean)
            .with_context(|| format!("failed to output `{}`", job.dest().display()))?;
        match outcome {
            WriteOutcome::Written => stats.written += 1,
            WriteOutcome::Copied => stats.copied += 1,
            WriteOutcome::Fresh => stats.fresh += 1,
        }
        progress.inc(match job {
            StaticFile::Content { .. } => "write",
            StaticFile::Copy { .. } => "copy",
        });
    }
    progress.finish();

    log!("build"; "{} written, {} copied, {} up to date", stats.written, stats.copied, stats.fresh);
    Ok(())
}
