//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Casc SCSS build tool CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Source glob selecting SCSS files (default: src/scss/*.scss)
    #[arg(short, long, global = true)]
    pub source: Option<String>,

    /// Output directory for compiled CSS (default: assets/css)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Config file path (default: casc.toml)
    #[arg(short = 'C', long, default_value = "casc.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Print debug output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// subcommands (defaults to `build` when omitted)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Compile and minify all matched stylesheets once
    #[command(visible_alias = "b")]
    Build,

    /// Build once, then rebuild whenever a source file changes
    #[command(visible_alias = "w")]
    Watch,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_build() {
        let cli = Cli::parse_from(["casc"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.config, PathBuf::from("casc.toml"));
    }

    #[test]
    fn test_watch_alias() {
        let cli = Cli::parse_from(["casc", "w"]);
        assert!(matches!(cli.command, Some(Commands::Watch)));
    }

    #[test]
    fn test_source_and_output_overrides() {
        let cli = Cli::parse_from(["casc", "build", "-s", "styles/*.scss", "-o", "dist"]);
        assert_eq!(cli.source.as_deref(), Some("styles/*.scss"));
        assert_eq!(cli.output, Some(PathBuf::from("dist")));
    }
}
