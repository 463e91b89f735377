//! Quire - combine and fingerprint plugin assets for a static site.

use anyhow::Result;
use clap::{ColorChoice, Parser};
use quire::cli::{Cli, Commands, build::build_site, tags::print_tags};
use quire::config::SiteConfig;
use quire::logger;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = SiteConfig::load(&cli)?;

    match &cli.command {
        Commands::Build { clean } => build_site(&config, *clean),
        Commands::Tags => print_tags(&config),
    }
}
