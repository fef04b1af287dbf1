//! TOML configuration for the splinter CLI.
//!
//! Every field is optional; command line flags override file values and
//! unset values fall back to the defaults below.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use splinter_types::{BackendKind, EncodeRequest, ShardSizePolicy};

/// Top-level configuration, parsed from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Shard layout and backend.
    pub erasure: ErasureSection,
    /// Where shard files go.
    pub output: OutputSection,
    /// Logging configuration.
    pub log: LogSection,
}

/// `[erasure]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ErasureSection {
    /// Number of data shards.
    pub data: Option<usize>,
    /// Number of parity shards.
    pub parity: Option<usize>,
    /// Shard size in bytes.
    pub shard_size: Option<usize>,
    /// `"reference"` or `"native"`.
    pub backend: Option<BackendKind>,
    /// Reject shard sizes larger than the input instead of shrinking them.
    pub strict: Option<bool>,
    /// Fall back to the reference backend if the native one cannot start.
    pub fallback: Option<bool>,
}

/// `[output]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// Alternative output directory. Defaults to the input's directory.
    pub dir: Option<PathBuf>,
}

/// `[log]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LogSection {
    /// Log level filter (e.g. `"info"`, `"debug"`, `"warn"`).
    pub level: String,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl CliConfig {
    /// Load config from a TOML file, or use defaults if no path given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(p) => {
                let content = std::fs::read_to_string(p)?;
                let config: CliConfig = toml::from_str(&content)?;
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    /// Parse config from a TOML string (used in tests).
    #[cfg(test)]
    pub fn from_toml(s: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Effective data shard count (default 4).
    pub fn data_shards(&self) -> usize {
        self.erasure.data.unwrap_or(4)
    }

    /// Effective parity shard count (default 2).
    pub fn parity_shards(&self) -> usize {
        self.erasure.parity.unwrap_or(2)
    }

    /// Effective shard size in bytes (default 2).
    pub fn shard_size(&self) -> usize {
        self.erasure.shard_size.unwrap_or(2)
    }

    /// Effective backend (default reference).
    pub fn backend(&self) -> BackendKind {
        self.erasure.backend.unwrap_or_default()
    }

    /// Effective shard size policy.
    pub fn size_policy(&self) -> ShardSizePolicy {
        if self.erasure.strict.unwrap_or(false) {
            ShardSizePolicy::Strict
        } else {
            ShardSizePolicy::ShrinkToInput
        }
    }

    /// Whether a failed native backend falls back to the reference one.
    pub fn fallback(&self) -> bool {
        self.erasure.fallback.unwrap_or(false)
    }

    /// The encode request described by this config.
    pub fn encode_request(&self) -> EncodeRequest {
        EncodeRequest::new(self.data_shards(), self.parity_shards(), self.shard_size())
            .with_backend(self.backend())
            .with_size_policy(self.size_policy())
    }
}
