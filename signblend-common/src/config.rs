//! Engine configuration loading
//!
//! Configuration is read from a single TOML document. Every field has a
//! built-in default, so an empty document (or a missing file) yields a fully
//! usable configuration.
//!
//! ```toml
//! parallel = true
//! cultural_baseline = 0.85
//!
//! [logging]
//! level = "debug"
//!
//! [thresholds]
//! grammaticality = 0.6
//!
//! [[rules]]
//! grammatical_type = "question"
//! articulator = "eyebrows"
//! emotion = "joy"
//! strategy = "grammar_priority"
//! blend_ratio = 0.7
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Complete engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Per-component resolution quality gate
    #[serde(default)]
    pub thresholds: ValidationThresholds,

    /// Whole-expression quality gates
    #[serde(default)]
    pub holistic: HolisticThresholds,

    /// Conflict analysis tuning
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Cultural-fit score returned by the baseline cultural model
    #[serde(default = "default_cultural_baseline")]
    pub cultural_baseline: f64,

    /// Resolve articulators on the rayon pool
    #[serde(default = "default_parallel")]
    pub parallel: bool,

    /// Seeded score jitter (disabled when absent)
    #[serde(default)]
    pub jitter: Option<JitterConfig>,

    /// Rule table overrides layered on top of the built-in rule table
    #[serde(default)]
    pub rules: Vec<RuleOverride>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            thresholds: ValidationThresholds::default(),
            holistic: HolisticThresholds::default(),
            analysis: AnalysisConfig::default(),
            cultural_baseline: default_cultural_baseline(),
            parallel: default_parallel(),
            jitter: None,
            rules: Vec::new(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// Acceptance thresholds for a single resolved component
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidationThresholds {
    #[serde(default = "default_grammaticality")]
    pub grammaticality: f64,
    #[serde(default = "default_emotionality")]
    pub emotionality: f64,
    #[serde(default = "default_naturalness")]
    pub naturalness: f64,
    #[serde(default = "default_cultural")]
    pub cultural: f64,
}

impl Default for ValidationThresholds {
    fn default() -> Self {
        Self {
            grammaticality: default_grammaticality(),
            emotionality: default_emotionality(),
            naturalness: default_naturalness(),
            cultural: default_cultural(),
        }
    }
}

/// Acceptance thresholds for a whole integrated expression
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HolisticThresholds {
    /// Minimum structural preservation against the grammatical source
    #[serde(default = "default_structural")]
    pub structural: f64,
    /// Maximum intensity drift allowed on a critical grammatical marker
    #[serde(default = "default_marker_drift")]
    pub marker_drift: f64,
    /// Minimum emotional-feature preservation against the emotional source
    #[serde(default = "default_emotional")]
    pub emotional: f64,
    /// Minimum composite naturalness/feasibility/cultural-fit score
    #[serde(default = "default_composite")]
    pub composite: f64,
}

impl Default for HolisticThresholds {
    fn default() -> Self {
        Self {
            structural: default_structural(),
            marker_drift: default_marker_drift(),
            emotional: default_emotional(),
            composite: default_composite(),
        }
    }
}

/// Conflict analysis tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Numeric differences above this value produce a conflict point
    #[serde(default = "default_conflict_threshold")]
    pub conflict_threshold: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            conflict_threshold: default_conflict_threshold(),
        }
    }
}

/// Seeded jitter applied to strategy quality metadata
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JitterConfig {
    pub seed: u64,
    /// Maximum absolute perturbation
    #[serde(default = "default_jitter_amplitude")]
    pub amplitude: f64,
}

/// One entry of the resolution rule table, keyed by
/// (grammatical type, articulator, emotion)
///
/// Names are kept as strings here; the engine parses them and rejects
/// unknown strategy names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleOverride {
    pub grammatical_type: String,
    pub articulator: String,
    pub emotion: String,
    pub strategy: String,
    pub blend_ratio: f64,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_cultural_baseline() -> f64 {
    0.85
}

fn default_parallel() -> bool {
    true
}

fn default_grammaticality() -> f64 {
    0.6
}

fn default_emotionality() -> f64 {
    0.5
}

fn default_naturalness() -> f64 {
    0.5
}

fn default_cultural() -> f64 {
    0.7
}

fn default_structural() -> f64 {
    0.7
}

fn default_marker_drift() -> f64 {
    0.2
}

fn default_emotional() -> f64 {
    0.6
}

fn default_composite() -> f64 {
    0.65
}

fn default_conflict_threshold() -> f64 {
    0.2
}

fn default_jitter_amplitude() -> f64 {
    0.05
}

impl EngineConfig {
    /// Parse configuration from a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    ///
    /// A missing file is not an error: defaults are used and a warning is
    /// logged. An unreadable or malformed file is a configuration error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!(
                "Config file not found: {}. Using built-in defaults.",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        info!("Engine configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Check that every score-like value lies in [0, 1]
    pub fn validate(&self) -> Result<()> {
        let unit_values = [
            ("thresholds.grammaticality", self.thresholds.grammaticality),
            ("thresholds.emotionality", self.thresholds.emotionality),
            ("thresholds.naturalness", self.thresholds.naturalness),
            ("thresholds.cultural", self.thresholds.cultural),
            ("holistic.structural", self.holistic.structural),
            ("holistic.marker_drift", self.holistic.marker_drift),
            ("holistic.emotional", self.holistic.emotional),
            ("holistic.composite", self.holistic.composite),
            ("analysis.conflict_threshold", self.analysis.conflict_threshold),
            ("cultural_baseline", self.cultural_baseline),
        ];

        for (name, value) in unit_values {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::Config(format!(
                    "{} must be within [0.0, 1.0], got {}",
                    name, value
                )));
            }
        }

        for rule in &self.rules {
            if !(0.0..=1.0).contains(&rule.blend_ratio) {
                return Err(Error::Config(format!(
                    "Rule {}/{}/{} has blend_ratio {} outside [0.0, 1.0]",
                    rule.grammatical_type, rule.articulator, rule.emotion, rule.blend_ratio
                )));
            }
        }

        if let Some(jitter) = &self.jitter {
            if !(0.0..=0.5).contains(&jitter.amplitude) {
                return Err(Error::Config(format!(
                    "jitter.amplitude must be within [0.0, 0.5], got {}",
                    jitter.amplitude
                )));
            }
        }

        Ok(())
    }
}
