// Temporal-alternation transform
//
// Conceptually the articulator alternates between the two renderings over
// `cycles × 2` phases. A single keyframe is produced: the snapshot of the side
// active at the middle phase, with its intensity scaled by that phase's weight.
// Sequencing the full alternation is left to the animator.

use super::StrategyOutcome;
use crate::scoring::clamp_unit;
use crate::types::{AlternationOrder, ExpressionComponent, Side};

/// Side active at the middle phase of the alternation
pub fn active_side(order: AlternationOrder, cycles: u32) -> Side {
    let (first, second) = match order {
        AlternationOrder::GrammarFirst => (Side::Grammatical, Side::Emotional),
        AlternationOrder::EmotionFirst => (Side::Emotional, Side::Grammatical),
    };
    // Of `cycles × 2` phases the middle one has index `cycles`
    if cycles % 2 == 0 {
        first
    } else {
        second
    }
}

/// Intensity weight of a phase belonging to `side`
pub fn phase_weight(side: Side, blend_ratio: f64) -> f64 {
    match side {
        Side::Grammatical => 0.5 + 0.5 * blend_ratio,
        Side::Emotional => 0.5 + 0.5 * (1.0 - blend_ratio),
    }
}

pub fn apply(
    grammatical: &ExpressionComponent,
    emotional: &ExpressionComponent,
    blend_ratio: f64,
    order: AlternationOrder,
    cycles: u32,
) -> StrategyOutcome {
    let side = active_side(order, cycles);
    let (active, inactive) = match side {
        Side::Grammatical => (grammatical, emotional),
        Side::Emotional => (emotional, grammatical),
    };

    let mut resolved = active.clone();
    resolved.intensity = clamp_unit(active.intensity * phase_weight(side, blend_ratio));
    resolved.is_grammatical_marker = grammatical.is_grammatical_marker;
    for (key, value) in &inactive.properties {
        resolved.properties.entry(key.clone()).or_insert(*value);
    }

    tracing::debug!("Alternation keyframe from {:?} side ({} cycles)", side, cycles);

    StrategyOutcome {
        resolved,
        effectiveness: 0.7,
        comprehensibility: match order {
            AlternationOrder::GrammarFirst => 0.85,
            AlternationOrder::EmotionFirst => 0.7,
        },
        naturalness: clamp_unit(0.8 - 0.05 * cycles.saturating_sub(2) as f64),
        transition: None,
    }
}
