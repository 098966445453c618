//! Configuration loading from a TOML file.
//!
//! The file is optional; every field falls back to [`AssemblyConfig`]'s
//! defaults, and command-line flags override whatever the file sets.
//!
//! # Example Configuration
//!
//! ```toml
//! [assembly]
//! k = 25
//! kmer_mode = "distinct"
//! uppercase = true
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use eulera_seq::{AssemblyConfig, KmerMode};
use serde::Deserialize;

/// Root configuration structure.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct EuleraConfig {
    /// Graph construction parameters.
    #[serde(default)]
    pub assembly: AssemblyConfig,
}

impl EuleraConfig {
    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub k: Option<usize>,
    pub distinct: bool,
    pub uppercase: bool,
}

/// Merge the optional config file with command-line overrides.
pub fn resolve(path: Option<&Path>, overrides: &Overrides) -> Result<AssemblyConfig> {
    let mut config = match path {
        Some(path) => EuleraConfig::load(path)?.assembly,
        None => AssemblyConfig::default(),
    };
    if let Some(k) = overrides.k {
        config.k = k;
    }
    if overrides.distinct {
        config.kmer_mode = KmerMode::Distinct;
    }
    if overrides.uppercase {
        config.uppercase = true;
    }
    config.validate()?;
    Ok(config)
}
