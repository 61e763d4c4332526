//! Configuration file parsing for `graphkit.toml`.
//!
//! Searches current directory then ancestors, falling back to
//! `~/.config/graphkit/graphkit.toml` if no project-level file is found.

use graphkit_core::{EulerStrategy, HamiltonMethod};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE: &str = "graphkit.toml";

#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq)]
pub struct GraphkitConfig {
    #[serde(default)]
    pub run: RunSection,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq)]
pub struct RunSection {
    /// Pause after each "visiting" frame, in milliseconds.
    #[serde(default)]
    pub step_delay_ms: u64,
    #[serde(default)]
    pub euler_strategy: EulerStrategy,
    #[serde(default)]
    pub hamilton_method: HamiltonMethod,
}

impl RunSection {
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }
}

#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq)]
pub struct OutputSection {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Deserialize, Serialize, Default, Clone, Copy, PartialEq, Eq, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl GraphkitConfig {
    /// Load config by searching cwd and ancestors, then the global config.
    /// Returns defaults if nothing is found or the file is unreadable.
    pub fn load() -> Self {
        match Self::find_and_load() {
            Some((path, cfg)) => {
                tracing::debug!(path = %path.display(), "config loaded");
                cfg
            }
            None => Self::default(),
        }
    }

    /// Load config from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read '{}': {}", path.display(), e))?;
        toml::from_str(&content).map_err(|e| format!("invalid toml in '{}': {}", path.display(), e))
    }

    fn find_and_load() -> Option<(PathBuf, Self)> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join(CONFIG_FILE);
            if config_path.exists() {
                let cfg = Self::load_from(&config_path)
                    .map_err(|e| tracing::warn!("{e}"))
                    .ok()?;
                return Some((config_path, cfg));
            }
            if !dir.pop() {
                break;
            }
        }
        let global = dirs_or_home()?
            .join(".config")
            .join("graphkit")
            .join(CONFIG_FILE);
        if global.exists() {
            let cfg = Self::load_from(&global)
                .map_err(|e| tracing::warn!("{e}"))
                .ok()?;
            return Some((global, cfg));
        }
        None
    }

    /// Parse a TOML string directly.
    pub fn from_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Contents written by `graphkit init`.
    pub fn default_template() -> &'static str {
        r#"# graphkit configuration

[run]
# Pause after each visited vertex, in milliseconds (0 = no animation)
step_delay_ms = 0
# "hierholzer" or "fleury"
euler_strategy = "hierholzer"
# "backtracking", "algebraic" or "roberts-flores"
hamilton_method = "backtracking"

[output]
# "text" or "json"
format = "text"
"#
    }
}

fn dirs_or_home() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
