// Conflict Analyzer
//
// Concept: Score the disagreement between the grammatical and emotional
// renderings of a single articulator
// Synchronization: Accepts two ExpressionComponents, returns ConflictAnalysis
//
// Algorithm:
// - severity: mean of clamp(|Δ|) over intensity, position and every shared property
// - points: every key in either side (plus synthetic position/intensity) whose
//   values disagree; numeric keys only when |Δ| exceeds the conflict threshold
// - comprehension impact: mean(importance × degree) × grammatical type factor
// - resolvability: 1 − 0.8 × (0.7 × severity + 0.3 × impact)

use crate::scoring::{clamp_unit, difference, mean};
use crate::types::{
    ConflictAnalysis, ConflictPoint, ExpressionComponent, GrammaticalType, PropertyValue,
    INTENSITY_KEY, POSITION_KEY,
};
use std::collections::BTreeSet;
use tracing::debug;

/// Relative importance of a property for comprehension
pub fn component_importance(key: &str) -> f64 {
    match key {
        "raised" | "furrowed" | "headshake" => 0.9,
        "nod" => 0.8,
        INTENSITY_KEY | "tilt" | "gaze" => 0.7,
        POSITION_KEY | "squint" | "widened" => 0.6,
        "tension" => 0.5,
        "smile" | "frown" | "mouth_open" => 0.4,
        _ => 0.5,
    }
}

/// Conflict analyzer
///
/// Pure and total: every input pair yields an analysis with all scores in
/// [0.0, 1.0].
#[derive(Debug, Clone, Copy)]
pub struct ConflictAnalyzer {
    /// Numeric differences strictly above this value produce a conflict point
    conflict_threshold: f64,
}

impl Default for ConflictAnalyzer {
    fn default() -> Self {
        Self {
            conflict_threshold: 0.2,
        }
    }
}

impl ConflictAnalyzer {
    pub fn new(conflict_threshold: f64) -> Self {
        Self {
            conflict_threshold: clamp_unit(conflict_threshold),
        }
    }

    pub fn analyze(
        &self,
        grammatical: &ExpressionComponent,
        emotional: &ExpressionComponent,
        grammatical_type: GrammaticalType,
    ) -> ConflictAnalysis {
        let severity = Self::severity(grammatical, emotional);
        let points = self.conflict_points(grammatical, emotional);

        let comprehension_impact = if points.is_empty() {
            0.0
        } else {
            let impacts: Vec<f64> = points.iter().map(|p| p.comprehension_impact).collect();
            clamp_unit(mean(&impacts) * grammatical_type.type_factor())
        };

        let resolvability = Self::resolvability(severity, comprehension_impact);

        debug!(
            severity = severity,
            points = points.len(),
            impact = comprehension_impact,
            resolvability = resolvability,
            "Conflict analysis ({})",
            grammatical_type
        );

        ConflictAnalysis {
            severity,
            points,
            comprehension_impact,
            resolvability,
        }
    }

    /// Resolvability falls as severity and comprehension impact rise
    pub fn resolvability(severity: f64, comprehension_impact: f64) -> f64 {
        clamp_unit(1.0 - 0.8 * (0.7 * severity + 0.3 * comprehension_impact))
    }

    fn severity(grammatical: &ExpressionComponent, emotional: &ExpressionComponent) -> f64 {
        let mut diffs = vec![
            difference(grammatical.intensity, emotional.intensity),
            difference(grammatical.position, emotional.position),
        ];

        for (key, g_value) in &grammatical.properties {
            let Some(e_value) = emotional.properties.get(key) else {
                continue;
            };
            let diff = match (g_value, e_value) {
                (PropertyValue::Number(a), PropertyValue::Number(b)) => difference(*a, *b),
                (a, b) if a == b => 0.0,
                _ => 1.0,
            };
            diffs.push(diff);
        }

        clamp_unit(mean(&diffs))
    }

    fn conflict_points(
        &self,
        grammatical: &ExpressionComponent,
        emotional: &ExpressionComponent,
    ) -> Vec<ConflictPoint> {
        let keys: BTreeSet<&str> = [POSITION_KEY, INTENSITY_KEY]
            .into_iter()
            .chain(grammatical.properties.keys().map(String::as_str))
            .chain(emotional.properties.keys().map(String::as_str))
            .collect();

        keys.into_iter()
            .filter_map(|key| {
                let g_value = grammatical.value_of(key);
                let e_value = emotional.value_of(key);

                let degree = match (g_value, e_value) {
                    (Some(PropertyValue::Number(a)), Some(PropertyValue::Number(b))) => {
                        let diff = difference(a, b);
                        if diff <= self.conflict_threshold {
                            return None;
                        }
                        diff
                    }
                    // Missing on one side, mixed types, or differing flags
                    (a, b) if a == b => return None,
                    _ => 1.0,
                };

                Some(ConflictPoint {
                    key: key.to_string(),
                    grammatical_value: g_value,
                    emotional_value: e_value,
                    conflict_degree: degree,
                    comprehension_impact: clamp_unit(component_importance(key) * degree),
                })
            })
            .collect()
    }
}
