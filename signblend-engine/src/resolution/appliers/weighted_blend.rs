// Weighted-blend transform
//
// Each key is blended with its point weight (grammar share), falling back to
// the articulator's integration weights. Position and intensity are then
// smoothed toward the midpoint of the two sides.

use super::{union_keys, StrategyOutcome};
use crate::scoring::{blend, clamp_unit, mean};
use crate::types::{
    BlendWeights, ExpressionComponent, PropertyValue, Smoothing, INTENSITY_KEY, POSITION_KEY,
};
use std::collections::BTreeMap;

/// Fraction of the smoothing factor applied toward the midpoint
const SMOOTHING_GAIN: f64 = 0.25;

pub fn apply(
    grammatical: &ExpressionComponent,
    emotional: &ExpressionComponent,
    point_weights: &BTreeMap<String, f64>,
    smoothing: Smoothing,
    weights: BlendWeights,
) -> StrategyOutcome {
    let base = weights.grammar_share();
    let weight_for = |key: &str| point_weights.get(key).copied().unwrap_or(base);

    let mut resolved = grammatical.clone();
    resolved.is_grammatical_marker = grammatical.is_grammatical_marker || emotional.is_grammatical_marker;

    resolved.position = smooth(
        grammatical.position,
        emotional.position,
        weight_for(POSITION_KEY),
        smoothing.spatial,
    );
    resolved.intensity = smooth(
        grammatical.intensity,
        emotional.intensity,
        weight_for(INTENSITY_KEY),
        smoothing.intensity,
    );

    let blended_duration = blend(
        grammatical.duration_ms as f64,
        emotional.duration_ms as f64,
        base,
    );
    let longest = grammatical.duration_ms.max(emotional.duration_ms) as f64;
    resolved.duration_ms = (blended_duration + (longest - blended_duration) * smoothing.temporal).round() as u64;

    for key in union_keys(grammatical, emotional) {
        let w = weight_for(key);
        let value = match (grammatical.properties.get(key), emotional.properties.get(key)) {
            (Some(PropertyValue::Number(g)), Some(PropertyValue::Number(e))) => {
                PropertyValue::Number(blend(*g, *e, w))
            }
            (Some(g), Some(e)) => {
                if w >= 0.5 {
                    *g
                } else {
                    *e
                }
            }
            (Some(v), None) | (None, Some(v)) => *v,
            (None, None) => continue,
        };
        resolved.properties.insert(key.to_string(), value);
    }

    let weight_values: Vec<f64> = point_weights.values().copied().collect();
    let mean_weight = if weight_values.is_empty() {
        base
    } else {
        mean(&weight_values)
    };

    StrategyOutcome {
        resolved,
        effectiveness: 0.75,
        comprehensibility: 0.5 + 0.4 * mean_weight,
        naturalness: 0.6 + 0.3 * smoothing.temporal,
        transition: None,
    }
}

fn smooth(grammatical: f64, emotional: f64, grammar_weight: f64, factor: f64) -> f64 {
    let blended = blend(grammatical, emotional, grammar_weight);
    let midpoint = (grammatical + emotional) / 2.0;
    clamp_unit(blended + (midpoint - blended) * factor * SMOOTHING_GAIN)
}
