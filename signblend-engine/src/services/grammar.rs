// Grammar-rule collaborator
//
// Concept: Identify grammatical markers in an expression, look up the
// constraints a grammatical function imposes, detect violations of those
// constraints, and score how well a candidate preserves the grammatical
// structure of the original.

use crate::scoring::{clamp_unit, grammatical_preservation};
use crate::types::{
    Articulator, ConstraintKind, ConstraintViolation, Expression, ExpressionComponent,
    GrammaticalConstraint, GrammaticalMarker, GrammaticalType,
};
use std::collections::BTreeMap;

pub trait GrammarRuleService: Send + Sync {
    /// Markers present in the expression
    fn identify_markers(&self, expression: &Expression) -> Vec<GrammaticalMarker>;

    /// Constraints imposed by a grammatical function
    fn constraints_for(&self, function: GrammaticalType) -> Vec<GrammaticalConstraint>;

    /// Constraints the candidate components break
    fn detect_violations(
        &self,
        components: &BTreeMap<Articulator, ExpressionComponent>,
        constraints: &[GrammaticalConstraint],
    ) -> Vec<ConstraintViolation>;

    /// Preservation of the original's grammatical structure in [0.0, 1.0]
    fn structural_integrity(
        &self,
        original: &Expression,
        candidate: &BTreeMap<Articulator, ExpressionComponent>,
    ) -> f64;
}

/// Rule-based grammar model for non-manual markers
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultGrammarRules;

impl DefaultGrammarRules {
    /// Grammatical function suggested by a marker's own configuration
    fn infer_function(articulator: Articulator, component: &ExpressionComponent) -> Option<GrammaticalType> {
        let set = |key: &str| component.flag(key) == Some(true);
        match articulator {
            Articulator::Eyebrows if set("furrowed") => Some(GrammaticalType::WhQuestion),
            Articulator::Eyebrows if set("raised") => Some(GrammaticalType::Question),
            Articulator::Head if set("headshake") => Some(GrammaticalType::Negation),
            Articulator::Head if set("tilt") => Some(GrammaticalType::Conditional),
            _ => None,
        }
    }
}

impl GrammarRuleService for DefaultGrammarRules {
    fn identify_markers(&self, expression: &Expression) -> Vec<GrammaticalMarker> {
        expression
            .components
            .iter()
            .filter(|(_, component)| component.is_grammatical_marker)
            .map(|(articulator, component)| GrammaticalMarker {
                articulator: *articulator,
                function: Self::infer_function(*articulator, component)
                    .or(expression.grammatical_function)
                    .unwrap_or(GrammaticalType::Statement),
                importance: articulator.grammatical_importance(),
                intensity: component.intensity,
            })
            .collect()
    }

    fn constraints_for(&self, function: GrammaticalType) -> Vec<GrammaticalConstraint> {
        let requires = |articulator, key: &str| GrammaticalConstraint {
            articulator,
            kind: ConstraintKind::RequiresFlag {
                key: key.to_string(),
                value: true,
            },
        };
        let min_intensity = |articulator, value| GrammaticalConstraint {
            articulator,
            kind: ConstraintKind::MinIntensity { value },
        };

        match function {
            GrammaticalType::Question => vec![
                requires(Articulator::Eyebrows, "raised"),
                min_intensity(Articulator::Eyebrows, 0.4),
            ],
            GrammaticalType::WhQuestion => vec![
                requires(Articulator::Eyebrows, "furrowed"),
                min_intensity(Articulator::Eyebrows, 0.4),
            ],
            GrammaticalType::Negation => vec![
                requires(Articulator::Head, "headshake"),
                min_intensity(Articulator::Head, 0.3),
            ],
            GrammaticalType::Conditional | GrammaticalType::Topic => {
                vec![requires(Articulator::Eyebrows, "raised")]
            }
            GrammaticalType::Statement => Vec::new(),
        }
    }

    fn detect_violations(
        &self,
        components: &BTreeMap<Articulator, ExpressionComponent>,
        constraints: &[GrammaticalConstraint],
    ) -> Vec<ConstraintViolation> {
        constraints
            .iter()
            .filter_map(|constraint| {
                // Constraints only bind articulators that are rendered
                let component = components.get(&constraint.articulator)?;
                let message = match &constraint.kind {
                    ConstraintKind::RequiresFlag { key, value } => {
                        if component.flag(key) == Some(*value) {
                            return None;
                        }
                        format!("{} requires {}={}", constraint.articulator, key, value)
                    }
                    ConstraintKind::MinIntensity { value } => {
                        if component.intensity >= *value {
                            return None;
                        }
                        format!(
                            "{} intensity {:.2} below {:.2}",
                            constraint.articulator, component.intensity, value
                        )
                    }
                };
                Some(ConstraintViolation {
                    articulator: constraint.articulator,
                    message,
                })
            })
            .collect()
    }

    fn structural_integrity(
        &self,
        original: &Expression,
        candidate: &BTreeMap<Articulator, ExpressionComponent>,
    ) -> f64 {
        let mut weighted = 0.0;
        let mut total_weight = 0.0;

        for (articulator, reference) in &original.components {
            let weight = if reference.is_grammatical_marker {
                articulator.grammatical_importance()
            } else {
                0.5 * articulator.grammatical_importance()
            };
            let preserved = candidate
                .get(articulator)
                .map(|c| grammatical_preservation(reference, c))
                .unwrap_or(0.0);
            weighted += weight * preserved;
            total_weight += weight;
        }

        if total_weight == 0.0 {
            return 1.0;
        }
        clamp_unit(weighted / total_weight)
    }
}
