// Grammar-priority transform
//
// Grammar keeps the larger share of every shared numeric value:
// v = g × r + e × (1 − r). Categorical values come from the grammatical side;
// keys defined on only one side are carried over unchanged.

use super::{union_keys, StrategyOutcome};
use crate::scoring::{blend, clamp_unit};
use crate::types::{ExpressionComponent, PropertyValue, Transition};

pub fn apply(
    grammatical: &ExpressionComponent,
    emotional: &ExpressionComponent,
    blend_ratio: f64,
    transition: Transition,
) -> StrategyOutcome {
    let mut resolved = grammatical.clone();
    resolved.intensity = clamp_unit(blend(grammatical.intensity, emotional.intensity, blend_ratio));
    resolved.position = clamp_unit(blend(grammatical.position, emotional.position, blend_ratio));
    resolved.duration_ms = grammatical.duration_ms.max(emotional.duration_ms);

    for key in union_keys(grammatical, emotional) {
        let value = match (grammatical.properties.get(key), emotional.properties.get(key)) {
            (Some(PropertyValue::Number(g)), Some(PropertyValue::Number(e))) => {
                PropertyValue::Number(blend(*g, *e, blend_ratio))
            }
            (Some(g), _) => *g,
            (None, Some(e)) => *e,
            (None, None) => continue,
        };
        resolved.properties.insert(key.to_string(), value);
    }

    // Naturalness grows with onset length
    let onset = clamp_unit((transition.duration_secs - 0.3) / 0.4);

    StrategyOutcome {
        resolved,
        effectiveness: 0.6 + 0.3 * blend_ratio,
        comprehensibility: 0.9,
        naturalness: 0.6 + 0.3 * onset,
        transition: Some(transition),
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use signblend_common::EasingCurve;

    fn transition() -> Transition {
        Transition {
            duration_secs: 0.5,
            easing: EasingCurve::EaseInOut,
        }
    }

    #[test]
    fn test_question_joy_intensity() {
        let g = ExpressionComponent::new(0.5, 0.8);
        let e = ExpressionComponent::new(0.5, 0.6);

        let outcome = apply(&g, &e, 0.7, transition());

        assert!((outcome.resolved.intensity - 0.74).abs() < 1e-9);
        assert_eq!(outcome.comprehensibility, 0.9);
        assert!((outcome.effectiveness - 0.81).abs() < 1e-9);
        assert!((outcome.naturalness - 0.75).abs() < 1e-9);
        assert_eq!(outcome.transition, Some(transition()));
    }

    #[test]
    fn test_categorical_from_grammar_and_numeric_blended() {
        let outcome = apply(&grammatical(), &emotional(), 0.7, transition());

        assert_eq!(outcome.resolved.flag("raised"), Some(true));
        // 0.6 × 0.7 + 0.2 × 0.3
        assert!((outcome.resolved.number("tension").unwrap() - 0.48).abs() < 1e-9);
        assert_eq!(outcome.resolved.flag("smile"), Some(true));
        assert!(outcome.resolved.is_grammatical_marker);
        assert_eq!(outcome.resolved.duration_ms, 600);
        assert_no_key_dropped(&outcome.resolved);
    }
}
