//! Swivel configuration system.
//!
//! Loads the process-wide default timing options from `swivel.toml`, with
//! environment variables taking precedence over file values so a run can be
//! tweaked without editing the file:
//!
//! ```toml
//! [transition]
//! duration_ms = 150
//! easing = "ease-out"
//! ```
//!
//! Unset keys fall back to the library's stock defaults.

mod error;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use swivel_core::timing::{EasingFunction, FillMode, TimingOptions};

pub use error::{ConfigError, Result};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SwivelConfig {
    /// Default transition timing.
    pub transition: TransitionDefaults,
}

/// Default timing applied to every transition request that does not override
/// the key itself. Keywords use their CSS spellings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TransitionDefaults {
    /// Duration in milliseconds.
    pub duration_ms: Option<f64>,
    /// Start delay in milliseconds.
    pub delay_ms: Option<f64>,
    /// Easing keyword (e.g. `"ease-out"`).
    pub easing: Option<String>,
    /// Fill-mode keyword (e.g. `"forwards"`).
    pub fill: Option<String>,
}

impl SwivelConfig {
    /// Load configuration from a TOML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration from `swivel.toml` in the current directory, or
    /// return the default configuration if the file doesn't exist.
    pub fn load_or_default() -> Self {
        Self::load_from_file("swivel.toml").unwrap_or_default()
    }

    /// Merge configuration with environment variables.
    ///
    /// Environment variables take precedence over configuration file values,
    /// allowing temporary overrides without modifying the file.
    pub fn merge_with_env(&mut self) {
        if let Ok(val) = std::env::var("SWIVEL_DURATION_MS") {
            if let Ok(duration) = val.parse::<f64>() {
                self.transition.duration_ms = Some(duration);
            }
        }
        if let Ok(val) = std::env::var("SWIVEL_DELAY_MS") {
            if let Ok(delay) = val.parse::<f64>() {
                self.transition.delay_ms = Some(delay);
            }
        }
        if let Ok(easing) = std::env::var("SWIVEL_EASING") {
            self.transition.easing = Some(easing);
        }
        if let Ok(fill) = std::env::var("SWIVEL_FILL") {
            self.transition.fill = Some(fill);
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// This is the recommended way to load configuration:
    /// 1. Load from swivel.toml (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }

    /// Resolve the configured defaults into engine timing options.
    ///
    /// Unset keys keep the library's stock defaults; unknown keywords warn
    /// and are ignored.
    pub fn timing_options(&self) -> TimingOptions {
        let mut options = TimingOptions::standard();
        let transition = &self.transition;

        if let Some(duration) = transition.duration_ms {
            options.duration_ms = Some(duration);
        }
        if let Some(delay) = transition.delay_ms {
            options.delay_ms = Some(delay);
        }
        if let Some(keyword) = &transition.easing {
            match EasingFunction::from_keyword(keyword) {
                Some(easing) => options.easing = Some(easing),
                None => warn!(%keyword, "unknown easing keyword; keeping the default"),
            }
        }
        if let Some(keyword) = &transition.fill {
            match FillMode::from_keyword(keyword) {
                Some(fill) => options.fill = Some(fill),
                None => warn!(%keyword, "unknown fill keyword; keeping the default"),
            }
        }

        options
    }
}
