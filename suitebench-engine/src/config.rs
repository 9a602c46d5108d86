use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

/// Default configuration file looked up in the working directory
pub const CONFIG_FILE: &str = "suitebench.toml";

/// Upper bound on samples per benchmark
pub const MAX_SAMPLES: usize = 10_000;

/// Timing parameters applied to every benchmark of a suite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of timing samples to collect per benchmark
    #[serde(default = "default_samples")]
    pub samples: usize,

    /// Number of calls per sample (None = auto-scale)
    #[serde(default)]
    pub iterations: Option<usize>,

    /// Number of warmup calls before calibration
    #[serde(default = "default_warmup_iterations")]
    pub warmup_iterations: usize,

    /// Target duration per sample in milliseconds (for auto-scaling)
    #[serde(default = "default_target_sample_duration_ms")]
    pub target_sample_duration_ms: u64,

    /// Pin the running thread to this CPU core (None = no pinning)
    #[serde(default)]
    pub pin_core: Option<usize>,
}

fn default_samples() -> usize { 50 }
fn default_warmup_iterations() -> usize { 10 }
fn default_target_sample_duration_ms() -> u64 { 5 }

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            samples: default_samples(),
            iterations: None, // Auto-scale by default
            warmup_iterations: default_warmup_iterations(),
            target_sample_duration_ms: default_target_sample_duration_ms(),
            pin_core: None,
        }
    }
}

impl EngineConfig {
    /// Load configuration with priority: env vars > config file > defaults
    ///
    /// Never fails: an unreadable file or an invalid result falls back to
    /// the defaults with a warning.
    pub fn load() -> Self {
        Self::load_from(CONFIG_FILE, |key| std::env::var(key).ok())
    }

    /// Like [`EngineConfig::load`], reading `path` and overrides from `lookup`.
    ///
    /// A missing file is not an error; the defaults are used instead.
    pub fn load_from<P, F>(path: P, lookup: F) -> Self
    where
        P: AsRef<Path>,
        F: Fn(&str) -> Option<String>,
    {
        let path = path.as_ref();
        let mut config = if path.exists() {
            match Self::from_file(path) {
                Ok(file_config) => file_config,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "ignoring configuration file");
                    Self::default()
                }
            }
        } else {
            Self::default()
        };

        config.apply_overrides(lookup);

        if let Err(e) = config.validate() {
            warn!(error = %e, "falling back to default configuration");
            return Self::default();
        }

        config
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: EngineConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let toml = toml::to_string_pretty(self)?;
        fs::write(path, toml)?;
        Ok(())
    }

    /// Apply `SUITEBENCH_*` environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup.
    ///
    /// Values that fail to parse are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("SUITEBENCH_SAMPLES").and_then(|v| v.parse().ok()) {
            self.samples = val;
        }

        if let Some(val) = lookup("SUITEBENCH_ITERATIONS").and_then(|v| v.parse().ok()) {
            self.iterations = Some(val);
        }

        if let Some(val) = lookup("SUITEBENCH_WARMUP_ITERATIONS").and_then(|v| v.parse().ok()) {
            self.warmup_iterations = val;
        }

        if let Some(val) = lookup("SUITEBENCH_TARGET_DURATION_MS").and_then(|v| v.parse().ok()) {
            self.target_sample_duration_ms = val;
        }

        if let Some(val) = lookup("SUITEBENCH_PIN_CORE").and_then(|v| v.parse().ok()) {
            self.pin_core = Some(val);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.samples == 0 {
            return Err(EngineError::InvalidConfig {
                field: "samples",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.samples > MAX_SAMPLES {
            return Err(EngineError::InvalidConfig {
                field: "samples",
                reason: format!("should not exceed {}", MAX_SAMPLES),
            });
        }
        if self.iterations == Some(0) {
            return Err(EngineError::InvalidConfig {
                field: "iterations",
                reason: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}
