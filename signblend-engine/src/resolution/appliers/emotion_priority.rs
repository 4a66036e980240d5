// Emotion-priority transform
//
// Start from the emotional rendering, reinstate the grammatically critical
// features, then pull the position toward the grammatical one by at most the
// spatial offset.

use super::StrategyOutcome;
use crate::scoring::{blend, clamp_unit};
use crate::types::{ExpressionComponent, INTENSITY_KEY, POSITION_KEY};

pub fn apply(
    grammatical: &ExpressionComponent,
    emotional: &ExpressionComponent,
    intensity_factor: f64,
    spatial_offset: f64,
    preserved_features: &[String],
) -> StrategyOutcome {
    let mut resolved = emotional.clone();
    resolved.is_grammatical_marker = grammatical.is_grammatical_marker;
    resolved.duration_ms = grammatical.duration_ms.max(emotional.duration_ms);
    resolved.intensity = clamp_unit(blend(emotional.intensity, grammatical.intensity, intensity_factor));

    for (key, value) in &grammatical.properties {
        resolved.properties.entry(key.clone()).or_insert(*value);
    }

    let mut position_preserved = false;
    for key in preserved_features {
        let Some(value) = grammatical.value_of(key) else {
            continue;
        };
        if key == POSITION_KEY {
            position_preserved = true;
        }
        resolved.set_value(key, value);
    }

    if !position_preserved {
        let delta = grammatical.position - emotional.position;
        let shift = spatial_offset.min(delta.abs());
        resolved.position = clamp_unit(emotional.position + shift * delta.signum());
    }

    let reinstated = preserved_features
        .iter()
        .filter(|k| k.as_str() != INTENSITY_KEY)
        .count()
        .min(3);

    StrategyOutcome {
        resolved,
        effectiveness: 0.5 + 0.4 * intensity_factor,
        comprehensibility: 0.6 + 0.1 * reinstated as f64,
        naturalness: 0.85,
        transition: None,
    }
}
