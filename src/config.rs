//! `repolens.toml` configuration

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use repolens_analysis::InvokerConfig;
use repolens_server::{QueryDefaults, ServerConfig};
use serde::Deserialize;

/// Config file looked up in the repository root when `--config` is not given.
pub const CONFIG_FILE: &str = "repolens.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerSection,
    pub query: QuerySection,
    pub analysis: AnalysisSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7890,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QuerySection {
    pub default_depth: u32,
    pub max_depth: u32,
    pub include_indirect: bool,
}

impl Default for QuerySection {
    fn default() -> Self {
        let defaults = QueryDefaults::default();
        Self {
            default_depth: defaults.default_depth,
            max_depth: defaults.max_depth,
            include_indirect: defaults.include_indirect,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisSection {
    /// Analyzer executable.
    pub command: String,
    pub args: Vec<String>,
    /// Branch recorded in the analysis cache key.
    pub branch: String,
    /// Saved analyzer output to read instead of running the analyzer.
    pub output: Option<PathBuf>,
}

impl Default for AnalysisSection {
    fn default() -> Self {
        let invoker = InvokerConfig::default();
        Self {
            command: invoker.program,
            args: invoker.args,
            branch: "main".to_string(),
            output: None,
        }
    }
}

impl Config {
    /// Load `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config = Self::from_toml_str(&raw)
            .with_context(|| format!("parsing {}", path.display()))?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn query_defaults(&self) -> QueryDefaults {
        QueryDefaults {
            default_depth: self.query.default_depth,
            max_depth: self.query.max_depth,
            include_indirect: self.query.include_indirect,
        }
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            host: self.server.host.clone(),
            port: self.server.port,
            query: self.query_defaults(),
        }
    }

    pub fn invoker_config(&self) -> InvokerConfig {
        InvokerConfig {
            program: self.analysis.command.clone(),
            args: self.analysis.args.clone(),
        }
    }
}
