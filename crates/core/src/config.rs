use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Plugin-wide submission settings.
///
/// Every field has a default so a partial TOML file (or none at all)
/// is acceptable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Arguments prepended to every `qsub` invocation.
    #[serde(default)]
    pub qsub_args: String,
    /// Sleep between submission attempts, in seconds.
    #[serde(default = "default_retry_timeout_secs")]
    pub retry_timeout_secs: u64,
    /// Total submission attempts before giving up on a node.
    #[serde(default = "default_max_tries")]
    pub max_tries: u32,
    /// Truncation bound for scheduler-visible job names.
    #[serde(default = "default_max_jobname_len")]
    pub max_jobname_len: usize,
    /// Submission binary, normally `qsub`.
    #[serde(default = "default_qsub_bin")]
    pub qsub_bin: String,
    /// Status binary, normally `qstat`.
    #[serde(default = "default_qstat_bin")]
    pub qstat_bin: String,
}

fn default_retry_timeout_secs() -> u64 {
    2
}

fn default_max_tries() -> u32 {
    2
}

fn default_max_jobname_len() -> usize {
    15
}

fn default_qsub_bin() -> String {
    "qsub".to_string()
}

fn default_qstat_bin() -> String {
    "qstat".to_string()
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            qsub_args: String::new(),
            retry_timeout_secs: default_retry_timeout_secs(),
            max_tries: default_max_tries(),
            max_jobname_len: default_max_jobname_len(),
            qsub_bin: default_qsub_bin(),
            qstat_bin: default_qstat_bin(),
        }
    }
}

impl PluginConfig {
    pub fn load_from(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read {}", path.display()))?;
        let mut cfg: PluginConfig =
            toml::from_str(&s).with_context(|| format!("parse {}", path.display()))?;
        // A zero attempt budget would fail every node without ever
        // calling qsub; one attempt is the floor.
        cfg.max_tries = cfg.max_tries.max(1);
        Ok(cfg)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let s = toml::to_string_pretty(self).context("serialize config")?;
        std::fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = PluginConfig::default();
        assert_eq!(cfg.qsub_args, "");
        assert_eq!(cfg.retry_timeout_secs, 2);
        assert_eq!(cfg.max_tries, 2);
        assert_eq!(cfg.max_jobname_len, 15);
        assert_eq!(cfg.qsub_bin, "qsub");
        assert_eq!(cfg.qstat_bin, "qstat");
    }

    #[test]
    fn zero_max_tries_is_clamped_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qbatch.toml");
        std::fs::write(&path, "max_tries = 0\n").unwrap();
        let cfg = PluginConfig::load_from(&path).unwrap();
        assert_eq!(cfg.max_tries, 1);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let cfg: PluginConfig =
            toml::from_str("qsub_args = \"-q long\"\nmax_tries = 5\n").unwrap();
        assert_eq!(cfg.qsub_args, "-q long");
        assert_eq!(cfg.max_tries, 5);
        assert_eq!(cfg.retry_timeout_secs, 2);
        assert_eq!(cfg.max_jobname_len, 15);
    }
}
