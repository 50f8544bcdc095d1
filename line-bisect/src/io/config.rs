//! Optional bisection configuration (TOML), passed with `--config`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Bisection configuration (TOML).
///
/// Missing fields default to the values used when no config file is given.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BisectConfig {
    /// Colorize progress output.
    pub color: bool,

    pub shell: ShellConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ShellConfig {
    /// Shell program and leading args; the command text is appended (e.g. `["bash","-c"]`).
    pub command: Vec<String>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            command: vec!["sh".to_string(), "-c".to_string()],
        }
    }
}

impl Default for BisectConfig {
    fn default() -> Self {
        Self {
            color: true,
            shell: ShellConfig::default(),
        }
    }
}

impl BisectConfig {
    pub fn validate(&self) -> Result<()> {
        if self.shell.command.is_empty() || self.shell.command[0].trim().is_empty() {
            return Err(anyhow!("shell.command must be a non-empty array"));
        }
        Ok(())
    }
}

/// Load config from an explicit TOML path, or defaults when no path is given.
///
/// Unlike a missing `--config`, a named file that does not exist is an error.
pub fn load_config(path: Option<&Path>) -> Result<BisectConfig> {
    let Some(path) = path else {
        let cfg = BisectConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    };
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: BisectConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}
