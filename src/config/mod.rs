//! Uploader configuration.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── dirs       # [[dirs]]
//! │   ├── s3         # [s3]
//! │   └── sizes      # sizes, quality, format
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # PhotoConfig (this file)
//! ```
//!
//! The config is loaded once at startup, validated as a whole, and then passed
//! by reference to the router and the pipeline. It never changes during a run.

pub mod section;
pub mod types;

pub use section::{DirectoryRule, OutputFormat, S3Config, SizeSpec};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{cli::Cli, log, utils::path::resolve_path};
use anyhow::Result;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Default quality for encoded derivatives.
pub const DEFAULT_QUALITY: u8 = 80;

/// Default extension picked up when a directory is processed.
pub const DEFAULT_EXTENSION: &str = "jpg";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PhotoConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Encoder quality for derivatives (0-100)
    pub quality: u8,

    /// Image extension matched when enumerating directories (case-insensitive)
    pub extension: String,

    /// Output encoding for derivatives
    pub format: OutputFormat,

    /// Derivative bounding boxes, uploaded in this order
    pub sizes: Vec<SizeSpec>,

    /// Object store connection
    pub s3: S3Config,

    /// Directory rules; the last matching rule wins
    pub dirs: Vec<DirectoryRule>,
}

impl Default for PhotoConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            quality: DEFAULT_QUALITY,
            extension: DEFAULT_EXTENSION.to_string(),
            format: OutputFormat::default(),
            sizes: Vec::new(),
            s3: S3Config::default(),
            dirs: Vec::new(),
        }
    }
}

impl PhotoConfig {
    pub const DIRS: FieldPath = FieldPath::new("dirs");
    pub const EXTENSION: FieldPath = FieldPath::new("extension");

    /// Load configuration from the location given on the CLI
    /// (`--config` or `S3_PHOTO_CONFIG`).
    pub fn load(cli: &Cli) -> Result<Self> {
        let location = cli.config.as_ref().ok_or(ConfigError::MissingLocation)?;
        let config_path = resolve_path(location);

        let mut config = Self::from_path(&config_path)?;
        config.config_path = config_path;
        config.finalize();
        config.validate()?;

        Ok(config)
    }

    /// Parse configuration from TOML string
    #[cfg(test)]
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
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

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        log!("warning"; "unknown fields in {}, ignoring:", path.display());
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Get the directory containing the config file.
    pub fn root(&self) -> &Path {
        self.config_path.parent().unwrap_or_else(|| Path::new("/"))
    }

    /// Resolve rule paths and tidy up derived fields.
    fn finalize(&mut self) {
        let root = self.root().to_path_buf();
        for rule in &mut self.dirs {
            rule.normalize(&root);
        }
        self.extension = self
            .extension
            .trim()
            .trim_start_matches('.')
            .to_ascii_lowercase();
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate the whole configuration.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.s3.validate(&mut diag);
        section::sizes::validate(&self.sizes, self.quality, &mut diag);

        if self.dirs.is_empty() {
            diag.error_with_hint(
                Self::DIRS,
                "configuration file should contain at least one directory rule",
                "add a `[[dirs]]` table with `base_path` and `base_key`",
            );
        }
        for (i, rule) in self.dirs.iter().enumerate() {
            rule.validate(i, &mut diag);
        }

        if self.extension.is_empty() {
            diag.error(Self::EXTENSION, "`extension` must not be empty");
        }

        diag.print_warnings();

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config from TOML, panicking on unknown fields to catch typos in tests.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> PhotoConfig {
    let (parsed, ignored) = PhotoConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
