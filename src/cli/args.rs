//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Combine and fingerprint plugin assets for a static site
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Output directory path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Config file path (default: quire.toml)
    #[arg(short = 'C', long, default_value = "quire.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Combine, copy and write all plugin assets
    #[command(visible_alias = "b")]
    Build {
        /// Rewrite every output file, even when the existing copy is newer
        #[arg(short, long)]
        clean: bool,
    },

    /// Print the stylesheet and script tags for the current settings
    #[command(visible_alias = "t")]
    Tags,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_build() {
        let cli = Cli::try_parse_from(["quire", "-C", "site.toml", "build", "--clean", "-v"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("site.toml"));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Build { clean: true }));
    }

    #[test]
    fn test_version_and_verbose_flags_coexist() {
        let err = Cli::try_parse_from(["quire", "-V"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);

        let cli = Cli::try_parse_from(["quire", "tags", "--verbose"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_parse_tags_defaults() {
        let cli = Cli::try_parse_from(["quire", "tags"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("quire.toml"));
        assert!(cli.output.is_none());
        assert!(matches!(cli.command, Commands::Tags));
    }
}
