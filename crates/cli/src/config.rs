//! Configuration loading.
//!
//! Sources, lowest precedence first:
//!
//! 1. TOML file (`--config`, or `evm-api.toml` in the working directory)
//! 2. Environment (`EVM_API_KEY`, `EVM_API_SERVER_URL`, `EVM_API_BASE_URL`)
//! 3. Command line flags
//!
//! Environment and flags are merged by `clap` before they reach this module.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use resolver::{ConfigKey, ConfigProvider, DEFAULT_BASE_URL};
use serde::Deserialize;
use tracing::debug;

use crate::args::GlobalArgs;

/// File consulted when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "evm-api.toml";

/// Contents of the TOML configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub api_key: Option<String>,
    pub server_url: Option<String>,
    pub base_url: Option<String>,
}

impl FileConfig {
    pub fn parse(source: &str) -> Result<Self> {
        toml::from_str(source).context("Invalid configuration file")
    }

    /// Reads `path`. A missing default file yields an empty configuration;
    /// a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        if !explicit && !path.exists() {
            return Ok(Self::default());
        }

        let source = fs::read_to_string(&path)
            .with_context(|| format!("Could not read config file {}", path.display()))?;
        debug!(path = %path.display(), "Loaded configuration file");
        Self::parse(&source).with_context(|| format!("In {}", path.display()))
    }
}

/// Resolved configuration for one CLI invocation.
#[derive(Clone, PartialEq, Eq)]
pub struct CliConfig {
    api_key: Option<String>,
    server_url: Option<String>,
    base_url: String,
}

impl CliConfig {
    /// Layers `args` (flags, then environment) over `file`.
    pub fn merge(file: FileConfig, args: &GlobalArgs) -> Self {
        Self {
            api_key: non_empty(args.api_key.clone()).or(non_empty(file.api_key)),
            server_url: non_empty(args.server_url.clone()).or(non_empty(file.server_url)),
            base_url: non_empty(args.base_url.clone())
                .or(non_empty(file.base_url))
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }

    pub fn load(args: &GlobalArgs) -> Result<Self> {
        let file = FileConfig::load(args.config.as_deref())?;
        Ok(Self::merge(file, args))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl ConfigProvider for CliConfig {
    fn get(&self, key: ConfigKey) -> Option<String> {
        match key {
            ConfigKey::ApiKey => self.api_key.clone(),
            ConfigKey::ServerUrl => self.server_url.clone(),
        }
    }
}

impl std::fmt::Debug for CliConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("server_url", &self.server_url)
            .field("base_url", &self.base_url)
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
