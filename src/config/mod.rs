//! Build configuration for `casc.toml`.
//!
//! Two knobs only: where the SCSS sources live (a glob) and where the
//! compiled CSS goes (a directory). Both have conventional defaults and can
//! be overridden by the config file or the CLI, in that order of precedence
//! (CLI wins).

mod error;

pub use error::ConfigError;

use crate::cli::Cli;
use crate::log;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Conventional source glob, relative to the project root.
pub const DEFAULT_SOURCE_GLOB: &str = "src/scss/*.scss";

/// Conventional output directory, relative to the project root.
pub const DEFAULT_OUTPUT_DIR: &str = "assets/css";

/// Root configuration structure representing casc.toml
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Glob selecting SCSS source files, relative to the project root
    pub source: String,

    /// Directory receiving compiled CSS, relative to the project root
    pub output: PathBuf,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::new(),
            source: DEFAULT_SOURCE_GLOB.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl BuildConfig {
    /// Load configuration from CLI arguments.
    ///
    /// A missing config file is not an error: defaults apply and paths
    /// resolve against the current directory. When the file exists, paths
    /// resolve against its parent directory instead.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = if cli.config.is_file() {
            let mut config = Self::from_path(&cli.config)?;
            config.root = cli
                .config
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_default();
            config
        } else {
            Self::default()
        };

        // CLI options win over the config file
        if let Some(source) = &cli.source {
            config.source = source.clone();
        }
        if let Some(output) = &cli.output {
            config.output = output.clone();
        }

        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            let display_path = path
                .file_name()
                .map(|n| n.to_string_lossy())
                .unwrap_or_else(|| path.to_string_lossy());
            log!("warning"; "ignoring unknown fields in {}: {}", display_path, ignored.join(", "));
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Source glob resolved against the project root.
    pub fn source_glob(&self) -> String {
        if self.root.as_os_str().is_empty() {
            self.source.clone()
        } else {
            self.root.join(&self.source).to_string_lossy().into_owned()
        }
    }

    /// Output directory resolved against the project root.
    pub fn output_dir(&self) -> PathBuf {
        if self.root.as_os_str().is_empty() {
            self.output.clone()
        } else {
            self.root.join(&self.output)
        }
    }
}
