// Component-split transform
//
// Every property key (plus position and intensity) is taken wholesale from
// one side. Conflicting keys follow the computed assignment; all other keys
// default to the grammatical side. A key missing on its assigned side is taken
// from the side that defines it, so nothing is dropped.

use super::{union_keys, StrategyOutcome};
use crate::types::{ExpressionComponent, Side, SplitAssignment, INTENSITY_KEY, POSITION_KEY};
use std::collections::BTreeMap;

/// Effective side for every key of the pair
pub fn resolve_assignments(
    grammatical: &ExpressionComponent,
    emotional: &ExpressionComponent,
    assignments: &[SplitAssignment],
) -> BTreeMap<String, Side> {
    let assigned: BTreeMap<&str, Side> = assignments
        .iter()
        .map(|a| (a.key.as_str(), a.side))
        .collect();

    [POSITION_KEY, INTENSITY_KEY]
        .into_iter()
        .chain(union_keys(grammatical, emotional))
        .map(|key| {
            let preferred = assigned.get(key).copied().unwrap_or(Side::Grammatical);
            let side = match preferred {
                Side::Grammatical if grammatical.value_of(key).is_none() => Side::Emotional,
                Side::Emotional if emotional.value_of(key).is_none() => Side::Grammatical,
                side => side,
            };
            (key.to_string(), side)
        })
        .collect()
}

pub fn apply(
    grammatical: &ExpressionComponent,
    emotional: &ExpressionComponent,
    assignments: &[SplitAssignment],
    separation_strength: f64,
) -> StrategyOutcome {
    let sides = resolve_assignments(grammatical, emotional, assignments);

    let mut resolved = grammatical.clone();
    resolved.properties.clear();
    resolved.duration_ms = grammatical.duration_ms.max(emotional.duration_ms);

    for (key, side) in &sides {
        let source = match side {
            Side::Grammatical => grammatical,
            Side::Emotional => emotional,
        };
        if let Some(value) = source.value_of(key) {
            resolved.set_value(key, value);
        }
    }

    let grammar_share = if assignments.is_empty() {
        1.0
    } else {
        let grammatical_count = assignments
            .iter()
            .filter(|a| a.side == Side::Grammatical)
            .count();
        grammatical_count as f64 / assignments.len() as f64
    };

    StrategyOutcome {
        resolved,
        effectiveness: 0.6 + 0.3 * separation_strength,
        comprehensibility: 0.6 + 0.3 * grammar_share,
        naturalness: 0.75,
        transition: None,
    }
}
