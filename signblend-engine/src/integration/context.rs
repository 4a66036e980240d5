// Grammatical context derivation
//
// dominant function: majority vote over identified markers (ties broken by
// summed importance); falls back to the expression's hint, then Statement
// constraints: looked up for the dominant function
// intensity: importance-weighted average marker intensity

use crate::services::GrammarRuleService;
use crate::types::{Expression, GrammaticalContext, GrammaticalType};
use std::cmp::Ordering;
use std::collections::BTreeMap;

pub fn derive_grammatical_context(
    grammar: &dyn GrammarRuleService,
    expression: &Expression,
) -> GrammaticalContext {
    let markers = grammar.identify_markers(expression);

    let mut votes: BTreeMap<GrammaticalType, (usize, f64)> = BTreeMap::new();
    for marker in &markers {
        let entry = votes.entry(marker.function).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += marker.importance;
    }

    let dominant_function = votes
        .iter()
        .max_by(|(_, a), (_, b)| {
            a.0.cmp(&b.0)
                .then_with(|| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal))
        })
        .map(|(function, _)| *function)
        .or(expression.grammatical_function)
        .unwrap_or(GrammaticalType::Statement);

    let total_importance: f64 = markers.iter().map(|m| m.importance).sum();
    let intensity = if total_importance > 0.0 {
        markers.iter().map(|m| m.importance * m.intensity).sum::<f64>() / total_importance
    } else {
        0.0
    };

    GrammaticalContext {
        dominant_function,
        constraints: grammar.constraints_for(dominant_function),
        markers,
        intensity,
    }
}
