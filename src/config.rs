//! Build configuration.
//!
//! Settings come from an optional `md-binder.toml` in the working directory
//! (or wherever `--config` points), with every field defaulted, and are then
//! overridden by command-line flags.

use crate::cli::RenderArgs;
use crate::sinks::{FooterSettings, PageSettings};
use crate::source::DEFAULT_PATTERN;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "md-binder.toml";

/// Complete configuration for a md-binder project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub paths: Paths,
    pub document: DocumentSettings,
    pub page: PageSettings,
    pub footer: FooterSettings,
    pub engine: EngineSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Paths {
    /// Directory holding the Markdown notes
    pub input_directory: PathBuf,
    /// Which files in the input directory are notes
    pub pattern: String,
    /// CSS embedded in the cover and body, if it exists
    pub stylesheet: PathBuf,
    /// YAML cover metadata; no file, no cover
    pub metadata: PathBuf,
    /// Directory the metadata `logo` is looked up in
    pub logo_directory: PathBuf,
    /// Where the intermediate HTML is written
    pub scratch_directory: PathBuf,
    pub output: PathBuf,
    pub log_file: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Paths {
            input_directory: PathBuf::from("content"),
            pattern: DEFAULT_PATTERN.to_string(),
            stylesheet: PathBuf::from("styles/style.css"),
            metadata: PathBuf::from("metadata/metadata.yaml"),
            logo_directory: PathBuf::from("logo"),
            scratch_directory: PathBuf::from("html"),
            output: PathBuf::from("document.pdf"),
            log_file: PathBuf::from("md-binder.log"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentSettings {
    pub cover: bool,
    pub toc: bool,
    pub numbering: bool,
    pub keep_intermediate: bool,
    pub toc_title: String,
}

impl Default for DocumentSettings {
    fn default() -> Self {
        DocumentSettings {
            cover: true,
            toc: true,
            numbering: true,
            keep_intermediate: false,
            toc_title: "Table of Contents".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Explicit path to the engine executable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Seconds to wait for the engine before giving up; 0 waits forever
    pub timeout_secs: u64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            path: None,
            timeout_secs: 300,
        }
    }
}

impl EngineSettings {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

impl Configuration {
    /// Load the configuration file at `path`. A missing file yields the
    /// defaults unless `required` is set.
    pub fn load(path: &Path, required: bool) -> Result<Configuration> {
        if !path.exists() && !required {
            log::debug!("no {} found, using defaults", path.display());
            return Ok(Configuration::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to load {} contents", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Apply command-line overrides. The `--no-*` flags can only switch
    /// things off.
    pub fn apply(&mut self, args: &RenderArgs) {
        let paths = &mut self.paths;
        let overrides = [
            (&mut paths.input_directory, &args.input_directory),
            (&mut paths.stylesheet, &args.stylesheet_path),
            (&mut paths.metadata, &args.metadata_path),
            (&mut paths.logo_directory, &args.logo_directory),
            (&mut paths.scratch_directory, &args.scratch_directory),
            (&mut paths.output, &args.output_path),
            (&mut paths.log_file, &args.log_file),
        ];
        for (setting, value) in overrides {
            if let Some(value) = value {
                *setting = value.clone();
            }
        }
        if let Some(pattern) = &args.pattern {
            paths.pattern = pattern.clone();
        }

        let document = &mut self.document;
        document.cover &= !args.no_cover;
        document.toc &= !args.no_toc;
        document.numbering &= !args.no_numbering;
        document.keep_intermediate |= args.keep_intermediate;
    }
}
