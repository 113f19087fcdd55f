//! Run configuration, loaded from `.wumpus/config.yaml`.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use wumpus_agent::{AgentConfig, ExpeditionConfig, KnowledgePolicy};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Attempts per map before giving up
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Whether a retry keeps what earlier attempts learned
    #[serde(default)]
    pub knowledge: KnowledgePolicy,

    /// Add breezes/stenches around hazards the map does not annotate
    #[serde(default = "default_derive_percepts")]
    pub derive_percepts: bool,

    /// Scoring, danger weights and turn cap
    #[serde(default)]
    pub agent: AgentConfig,
}

fn default_max_attempts() -> u32 {
    1
}
fn default_derive_percepts() -> bool {
    true
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            knowledge: KnowledgePolicy::default(),
            derive_percepts: default_derive_percepts(),
            agent: AgentConfig::default(),
        }
    }
}

impl RunConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        Ok(config)
    }

    /// Load from a directory (looks for .wumpus/config.yaml)
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let config_path = dir.join(".wumpus/config.yaml");
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn expedition(&self) -> ExpeditionConfig {
        ExpeditionConfig {
            max_attempts: self.max_attempts,
            knowledge: self.knowledge,
        }
    }
}
