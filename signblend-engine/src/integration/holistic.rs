// Holistic Validation
//
// Concept: Whole-expression quality gates run after per-component resolution
// and timing synchronization
//
// Gates (thresholds from HolisticThresholds):
// 1. Structural preservation: grammar-service structural integrity minus 0.15
//    per violated constraint; additionally no grammatical marker may drift in
//    intensity by more than marker_drift
// 2. Emotional preservation: mean 1 − |Δ| over the emotional source's features
// 3. Composite: mean of naturalness, feasibility and cultural fit
//
// The gates are independent and run concurrently (rayon::join). When several
// fail, the first in the order above is reported.

use crate::error::HolisticValidationError;
use crate::resolution::validator::naturalness_score;
use crate::scoring::{clamp_unit, mean};
use crate::services::{CulturalFit, EmotionService, GrammarRuleService};
use crate::types::{Articulator, Expression, ExpressionComponent, GrammaticalConstraint};
use serde::{Deserialize, Serialize};
use signblend_common::config::HolisticThresholds;
use std::collections::BTreeMap;
use tracing::warn;

/// Penalty per violated grammatical constraint
const VIOLATION_PENALTY: f64 = 0.15;

/// Longest component duration considered animatable
pub const MAX_FEASIBLE_DURATION_MS: u64 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HolisticScores {
    pub structural: f64,
    pub emotional: f64,
    pub naturalness: f64,
    pub feasibility: f64,
    pub cultural: f64,
    pub composite: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct CompositeScores {
    naturalness: f64,
    feasibility: f64,
    cultural: f64,
    composite: f64,
}

/// Borrowed view over the collaborators needed by the holistic gates
pub struct HolisticValidator<'a> {
    thresholds: HolisticThresholds,
    grammar: &'a dyn GrammarRuleService,
    emotion: &'a dyn EmotionService,
    cultural: &'a dyn CulturalFit,
}

impl<'a> HolisticValidator<'a> {
    pub fn new(
        thresholds: HolisticThresholds,
        grammar: &'a dyn GrammarRuleService,
        emotion: &'a dyn EmotionService,
        cultural: &'a dyn CulturalFit,
    ) -> Self {
        Self {
            thresholds,
            grammar,
            emotion,
            cultural,
        }
    }

    /// Run all three gates concurrently
    pub fn validate(
        &self,
        grammatical: &Expression,
        emotional: &Expression,
        integrated: &BTreeMap<Articulator, ExpressionComponent>,
        constraints: &[GrammaticalConstraint],
        cultural_context: Option<&str>,
    ) -> Result<HolisticScores, HolisticValidationError> {
        let (structural, (emotional_result, composite)) = rayon::join(
            || self.structural(grammatical, integrated, constraints),
            || {
                rayon::join(
                    || self.emotional(emotional, integrated),
                    || self.composite(integrated, cultural_context),
                )
            },
        );

        let result = structural.and_then(|structural| {
            let emotional = emotional_result?;
            let composite = composite?;
            Ok(HolisticScores {
                structural,
                emotional,
                naturalness: composite.naturalness,
                feasibility: composite.feasibility,
                cultural: composite.cultural,
                composite: composite.composite,
            })
        });

        if let Err(e) = &result {
            warn!("Holistic validation failed: {}", e);
        }
        result
    }

    pub fn structural(
        &self,
        grammatical: &Expression,
        integrated: &BTreeMap<Articulator, ExpressionComponent>,
        constraints: &[GrammaticalConstraint],
    ) -> Result<f64, HolisticValidationError> {
        let integrity = self.grammar.structural_integrity(grammatical, integrated);
        let violations = self.grammar.detect_violations(integrated, constraints);
        let score = clamp_unit(integrity - VIOLATION_PENALTY * violations.len() as f64);

        if score < self.thresholds.structural {
            return Err(HolisticValidationError::StructuralPreservation {
                score,
                threshold: self.thresholds.structural,
            });
        }

        for (articulator, source) in &grammatical.components {
            if !source.is_grammatical_marker {
                continue;
            }
            let Some(rendered) = integrated.get(articulator) else {
                continue;
            };
            let drift = (source.intensity - rendered.intensity).abs();
            if drift > self.thresholds.marker_drift {
                return Err(HolisticValidationError::CriticalMarkerDrift {
                    articulator: *articulator,
                    drift,
                    threshold: self.thresholds.marker_drift,
                });
            }
        }

        Ok(score)
    }

    pub fn emotional(
        &self,
        emotional: &Expression,
        integrated: &BTreeMap<Articulator, ExpressionComponent>,
    ) -> Result<f64, HolisticValidationError> {
        let source = self.emotion.extract_features(&emotional.components);
        let rendered = self.emotion.extract_features(integrated);

        let score = if source.is_empty() {
            1.0
        } else {
            let preserved: Vec<f64> = source
                .iter()
                .map(|(name, value)| {
                    rendered
                        .get(name)
                        .map(|r| 1.0 - clamp_unit((value - r).abs()))
                        .unwrap_or(0.0)
                })
                .collect();
            mean(&preserved)
        };

        if score < self.thresholds.emotional {
            return Err(HolisticValidationError::EmotionalPreservation {
                score,
                threshold: self.thresholds.emotional,
            });
        }
        Ok(score)
    }

    fn composite(
        &self,
        integrated: &BTreeMap<Articulator, ExpressionComponent>,
        cultural_context: Option<&str>,
    ) -> Result<CompositeScores, HolisticValidationError> {
        let scores = if integrated.is_empty() {
            CompositeScores {
                naturalness: 1.0,
                feasibility: 1.0,
                cultural: 1.0,
                composite: 1.0,
            }
        } else {
            let naturalness: Vec<f64> = integrated.values().map(naturalness_score).collect();
            let cultural: Vec<f64> = integrated
                .values()
                .map(|c| clamp_unit(self.cultural.score(c, cultural_context)))
                .collect();
            let feasible = integrated.values().filter(|c| is_feasible(c)).count();

            let naturalness = mean(&naturalness);
            let feasibility = feasible as f64 / integrated.len() as f64;
            let cultural = mean(&cultural);
            CompositeScores {
                naturalness,
                feasibility,
                cultural,
                composite: mean(&[naturalness, feasibility, cultural]),
            }
        };

        if scores.composite < self.thresholds.composite {
            return Err(HolisticValidationError::Composite {
                score: scores.composite,
                threshold: self.thresholds.composite,
            });
        }
        Ok(scores)
    }

    /// Composite score alone (naturalness, feasibility, cultural fit)
    pub fn composite_score(
        &self,
        integrated: &BTreeMap<Articulator, ExpressionComponent>,
        cultural_context: Option<&str>,
    ) -> Result<f64, HolisticValidationError> {
        self.composite(integrated, cultural_context).map(|s| s.composite)
    }
}

/// Whether the avatar can physically render a component
pub fn is_feasible(component: &ExpressionComponent) -> bool {
    let in_unit = |v: f64| v.is_finite() && (0.0..=1.0).contains(&v);

    in_unit(component.position)
        && in_unit(component.intensity)
        && component.duration_ms > 0
        && component.duration_ms <= MAX_FEASIBLE_DURATION_MS
        && component
            .properties
            .values()
            .filter_map(|v| v.as_number())
            .all(in_unit)
}
