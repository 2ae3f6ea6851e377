//! YAML configuration for visionscan.
//!
//! Every field is optional; a missing file means all defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};

/// Default config file names, searched in the current directory.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["visionscan.yaml", ".visionscan.yaml"];

/// Template written by `visionscan init`.
pub const TEMPLATE: &str = include_str!("templates/visionscan.yaml");

/// Output formats accepted by `format` and `--format`.
pub const FORMATS: &[&str] = &["text", "pretty", "json", "trace"];

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Source file extensions, without the leading dot.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// Glob patterns for paths to skip (e.g. "**/generated/**").
    #[serde(default)]
    pub excluded_paths: Vec<String>,
    /// "text" (default), "pretty", "json" or "trace".
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default = "default_true")]
    pub parallel: bool,
}

fn default_extensions() -> Vec<String> {
    vec!["vis".to_string()]
}

fn default_format() -> String {
    "text".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            excluded_paths: Vec::new(),
            format: default_format(),
            parallel: true,
        }
    }
}

impl Config {
    /// Parse a config from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::parse_str(&content)
    }

    pub fn parse_str(content: &str) -> anyhow::Result<Self> {
        // An empty or comment-only file deserializes as null
        if content.lines().all(|l| {
            let l = l.trim();
            l.is_empty() || l.starts_with('#')
        }) {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load the config named by `explicit`, or the first default name found in
    /// `dir`. Falls back to defaults when no file exists.
    pub fn load(explicit: Option<&Path>, dir: &Path) -> anyhow::Result<(Self, Option<PathBuf>)> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => discover(dir),
        };
        match path {
            Some(path) => {
                let config = Self::parse_file(&path)
                    .map_err(|e| anyhow::anyhow!("failed to load {}: {}", path.display(), e))?;
                Ok((config, Some(path)))
            }
            None => Ok((Self::default(), None)),
        }
    }

    /// Whether `path` has one of the configured extensions.
    pub fn has_source_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }

    /// Compile `excluded_paths` into one matcher.
    pub fn exclusions(&self) -> anyhow::Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.excluded_paths {
            let glob = Glob::new(pattern).map_err(|e| {
                anyhow::anyhow!("invalid excluded_paths pattern {:?}: {}", pattern, e)
            })?;
            builder.add(glob);
        }
        Ok(builder.build()?)
    }
}

/// Find a default-named config file in `dir`.
pub fn discover(dir: &Path) -> Option<PathBuf> {
    DEFAULT_CONFIG_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Validate a config for correctness.
pub fn validate(config: &Config) -> anyhow::Result<()> {
    if config.extensions.is_empty() {
        anyhow::bail!("extensions must not be empty");
    }
    for ext in &config.extensions {
        if ext.is_empty() || ext.starts_with('.') {
            anyhow::bail!("invalid extension {:?}, give it without the dot", ext);
        }
    }

    validate_format(&config.format)?;

    config.exclusions()?;

    Ok(())
}

pub fn validate_format(format: &str) -> anyhow::Result<()> {
    if !FORMATS.contains(&format) {
        anyhow::bail!(
            "invalid format {:?}, must be one of {}",
            format,
            FORMATS.join(", ")
        );
    }
    Ok(())
}
