// Resolution Validator
//
// Concept: Four-axis quality gate for a single resolved component
// Synchronization: Accepts ConflictResolution + both source components,
// returns ValidationScores or ResolutionValidationError
//
// Axes:
// - grammaticality: 0.5 property + 0.3 position + 0.2 intensity preservation (vs grammatical)
// - emotionality: 0.6 property + 0.4 intensity preservation (vs emotional)
// - naturalness: 0.9 − min(0.5, 0.15 × inconsistencies), floor 0.3
// - cultural: pluggable CulturalFit model

use crate::error::ResolutionValidationError;
use crate::scoring::{clamp_unit, emotional_preservation, grammatical_preservation};
use crate::services::{BaselineCulturalFit, CulturalFit};
use crate::types::{ConflictResolution, ExpressionComponent, ValidationScores};
use signblend_common::config::ValidationThresholds;
use std::sync::Arc;
use tracing::warn;

/// Physically or expressively incompatible configuration of one articulator
struct InconsistencyRule {
    name: &'static str,
    applies: fn(&ExpressionComponent) -> bool,
}

fn both_set(component: &ExpressionComponent, a: &str, b: &str) -> bool {
    component.flag(a) == Some(true) && component.flag(b) == Some(true)
}

const INCONSISTENCY_RULES: &[InconsistencyRule] = &[
    InconsistencyRule {
        name: "raised_and_furrowed",
        applies: |c| both_set(c, "raised", "furrowed"),
    },
    InconsistencyRule {
        name: "squint_and_widened",
        applies: |c| both_set(c, "squint", "widened"),
    },
    InconsistencyRule {
        name: "smile_and_frown",
        applies: |c| both_set(c, "smile", "frown"),
    },
    InconsistencyRule {
        name: "headshake_and_nod",
        applies: |c| both_set(c, "headshake", "nod"),
    },
    InconsistencyRule {
        name: "high_intensity_slack_tension",
        applies: |c| c.intensity > 0.8 && c.number("tension").is_some_and(|t| t < 0.2),
    },
    InconsistencyRule {
        name: "open_mouth_pressed_lips",
        applies: |c| {
            c.number("mouth_open").is_some_and(|o| o > 0.8) && c.flag("lips_pressed") == Some(true)
        },
    },
];

/// Names of the incompatible combinations present in a component
pub fn inconsistencies(component: &ExpressionComponent) -> Vec<&'static str> {
    INCONSISTENCY_RULES
        .iter()
        .filter(|rule| (rule.applies)(component))
        .map(|rule| rule.name)
        .collect()
}

pub fn naturalness_score(component: &ExpressionComponent) -> f64 {
    let count = inconsistencies(component).len() as f64;
    (0.9 - (0.15 * count).min(0.5)).max(0.3)
}

pub struct ResolutionValidator {
    thresholds: ValidationThresholds,
    cultural: Arc<dyn CulturalFit>,
}

impl Default for ResolutionValidator {
    fn default() -> Self {
        Self {
            thresholds: ValidationThresholds::default(),
            cultural: Arc::new(BaselineCulturalFit::default()),
        }
    }
}

impl ResolutionValidator {
    pub fn new(thresholds: ValidationThresholds, cultural: Arc<dyn CulturalFit>) -> Self {
        Self {
            thresholds,
            cultural,
        }
    }

    pub fn thresholds(&self) -> &ValidationThresholds {
        &self.thresholds
    }

    /// Score a resolution on all four axes without judging it
    pub fn score(
        &self,
        resolution: &ConflictResolution,
        grammatical: &ExpressionComponent,
        emotional: &ExpressionComponent,
        cultural_context: Option<&str>,
    ) -> ValidationScores {
        let resolved = &resolution.resolved;
        ValidationScores {
            grammaticality: grammatical_preservation(grammatical, resolved),
            emotionality: emotional_preservation(emotional, resolved),
            naturalness: naturalness_score(resolved),
            cultural: clamp_unit(self.cultural.score(resolved, cultural_context)),
        }
    }

    pub fn validate(
        &self,
        resolution: &ConflictResolution,
        grammatical: &ExpressionComponent,
        emotional: &ExpressionComponent,
        cultural_context: Option<&str>,
    ) -> Result<ValidationScores, ResolutionValidationError> {
        let scores = self.score(resolution, grammatical, emotional, cultural_context);
        self.accept(scores)
    }

    /// Apply the thresholds to an already computed score vector
    pub fn accept(&self, scores: ValidationScores) -> Result<ValidationScores, ResolutionValidationError> {
        let checks = [
            ("grammaticality", scores.grammaticality, self.thresholds.grammaticality),
            ("emotionality", scores.emotionality, self.thresholds.emotionality),
            ("naturalness", scores.naturalness, self.thresholds.naturalness),
            ("cultural", scores.cultural, self.thresholds.cultural),
        ];

        let failed_axes: Vec<&'static str> = checks
            .iter()
            .filter(|(_, score, threshold)| score < threshold)
            .map(|(name, _, _)| *name)
            .collect();

        if failed_axes.is_empty() {
            return Ok(scores);
        }

        warn!("Resolution rejected on [{}]: {}", failed_axes.join(", "), scores);
        Err(ResolutionValidationError {
            articulator: None,
            scores,
            failed_axes,
        })
    }
}
