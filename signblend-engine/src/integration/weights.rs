// Integration weight computation
//
// Global split by caller priority:
//   grammar 0.7/0.3, emotion 0.3/0.7, balanced 0.5/0.5
// Context adjustments (zero-sum, clamped):
//   formality > 0.7        → +0.1 toward grammar
//   emotion intensity > 0.8 → +0.1 toward emotion
// Per-component overrides on top of the global split:
//   question-family markers on eyebrows, negation on head → +0.2 toward grammar
//   mouth with a non-neutral emotion                      → +0.1 toward emotion
//   teaching purpose on marker articulators              → +0.1 toward grammar

use crate::types::{
    Articulator, BlendMode, BlendWeights, ComponentWeights, EmotionState, EmotionType,
    GrammaticalContext, GrammaticalType, IntegrationContext, IntegrationWeights, Priority, Purpose,
};
use std::collections::BTreeMap;
use tracing::debug;

/// Weight difference beyond which a component prioritizes one signal
const BLEND_MODE_MARGIN: f64 = 0.2;

pub fn compute_weights(
    context: &IntegrationContext,
    grammatical: &GrammaticalContext,
    emotion: &EmotionState,
    articulators: &[Articulator],
) -> IntegrationWeights {
    let mut global = match context.priority {
        Priority::Grammar => BlendWeights {
            grammar: 0.7,
            emotion: 0.3,
        },
        Priority::Emotion => BlendWeights {
            grammar: 0.3,
            emotion: 0.7,
        },
        Priority::Balanced => BlendWeights::balanced(),
    };

    if context.formality_level > 0.7 {
        global = shift_toward_grammar(global, 0.1);
    }
    if emotion.intensity > 0.8 {
        global = shift_toward_grammar(global, -0.1);
    }

    let components = articulators
        .iter()
        .map(|articulator| {
            let weights = component_weights(*articulator, global, context, grammatical, emotion);
            (*articulator, weights)
        })
        .collect::<BTreeMap<_, _>>();

    debug!(
        "Integration weights: global grammar={:.2} emotion={:.2}, {} components",
        global.grammar,
        global.emotion,
        components.len()
    );

    IntegrationWeights { global, components }
}

fn component_weights(
    articulator: Articulator,
    global: BlendWeights,
    context: &IntegrationContext,
    grammatical: &GrammaticalContext,
    emotion: &EmotionState,
) -> ComponentWeights {
    let mut weights = global;

    match (grammatical.dominant_function, articulator) {
        (
            GrammaticalType::Question
            | GrammaticalType::WhQuestion
            | GrammaticalType::Conditional
            | GrammaticalType::Topic,
            Articulator::Eyebrows,
        )
        | (GrammaticalType::Negation, Articulator::Head) => {
            weights = shift_toward_grammar(weights, 0.2);
        }
        (_, Articulator::Mouth) if emotion.emotion != EmotionType::Neutral => {
            weights = shift_toward_grammar(weights, -0.1);
        }
        _ => {}
    }

    let is_marker = grammatical.markers.iter().any(|m| m.articulator == articulator);
    if context.purpose == Purpose::Teaching && is_marker {
        weights = shift_toward_grammar(weights, 0.1);
    }

    ComponentWeights {
        grammar: weights.grammar,
        emotion: weights.emotion,
        blend_mode: blend_mode(weights),
    }
}

/// Move `amount` of weight from emotion to grammar (negative moves the other way)
fn shift_toward_grammar(weights: BlendWeights, amount: f64) -> BlendWeights {
    BlendWeights {
        grammar: (weights.grammar + amount).clamp(0.0, 1.0),
        emotion: (weights.emotion - amount).clamp(0.0, 1.0),
    }
}

pub fn blend_mode(weights: BlendWeights) -> BlendMode {
    let difference = weights.grammar - weights.emotion;
    if difference > BLEND_MODE_MARGIN {
        BlendMode::PrioritizeGrammar
    } else if difference < -BLEND_MODE_MARGIN {
        BlendMode::PrioritizeEmotion
    } else {
        BlendMode::Weighted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GrammaticalMarker;

    fn grammatical(function: GrammaticalType, markers: &[Articulator]) -> GrammaticalContext {
        GrammaticalContext {
            dominant_function: function,
            markers: markers
                .iter()
                .map(|a| GrammaticalMarker {
                    articulator: *a,
                    function,
                    importance: a.grammatical_importance(),
                    intensity: 0.7,
                })
                .collect(),
            constraints: Vec::new(),
            intensity: 0.7,
        }
    }

    fn context(priority: Priority, formality_level: f64, purpose: Purpose) -> IntegrationContext {
        IntegrationContext {
            purpose,
            formality_level,
            priority,
            cultural_context: None,
        }
    }

    #[test]
    fn test_base_split_by_priority() {
        let g = grammatical(GrammaticalType::Statement, &[]);
        let calm = EmotionState::new(EmotionType::Joy, 0.5);

        let grammar = compute_weights(&context(Priority::Grammar, 0.5, Purpose::Translation), &g, &calm, &[]);
        assert_eq!(grammar.global.grammar, 0.7);
        assert_eq!(grammar.global.emotion, 0.3);

        let emotion = compute_weights(&context(Priority::Emotion, 0.5, Purpose::Translation), &g, &calm, &[]);
        assert_eq!(emotion.global.grammar, 0.3);

        let balanced = compute_weights(&context(Priority::Balanced, 0.5, Purpose::Translation), &g, &calm, &[]);
        assert_eq!(balanced.global, BlendWeights::balanced());
    }

    #[test]
    fn test_intense_emotion_shifts_global_toward_emotion() {
        let g = grammatical(GrammaticalType::Statement, &[]);
        let intense = EmotionState::new(EmotionType::Anger, 0.9);

        let weights = compute_weights(&context(Priority::Balanced, 0.3, Purpose::Conversation), &g, &intense, &[]);

        assert!((weights.global.grammar - 0.4).abs() < 1e-9);
        assert!((weights.global.emotion - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_formality_and_emotion_cancel() {
        let g = grammatical(GrammaticalType::Statement, &[]);
        let intense = EmotionState::new(EmotionType::Anger, 0.9);

        let weights = compute_weights(&context(Priority::Grammar, 0.9, Purpose::Translation), &g, &intense, &[]);
        assert!((weights.global.grammar - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_question_eyebrows_override() {
        let g = grammatical(GrammaticalType::Question, &[Articulator::Eyebrows]);
        let joy = EmotionState::new(EmotionType::Joy, 0.5);

        let weights = compute_weights(
            &context(Priority::Balanced, 0.5, Purpose::Translation),
            &g,
            &joy,
            &[Articulator::Eyebrows, Articulator::Mouth, Articulator::Head],
        );

        let brows = weights.components[&Articulator::Eyebrows];
        assert!((brows.grammar - 0.7).abs() < 1e-9);
        assert_eq!(brows.blend_mode, BlendMode::PrioritizeGrammar);

        let mouth = weights.components[&Articulator::Mouth];
        assert!((mouth.emotion - 0.6).abs() < 1e-9);
        assert_eq!(mouth.blend_mode, BlendMode::Weighted);

        let head = weights.components[&Articulator::Head];
        assert_eq!(head.grammar, 0.5);
    }

    #[test]
    fn test_teaching_boosts_markers_only() {
        let g = grammatical(GrammaticalType::Negation, &[Articulator::Head]);
        let calm = EmotionState::neutral();

        let weights = compute_weights(
            &context(Priority::Balanced, 0.5, Purpose::Teaching),
            &g,
            &calm,
            &[Articulator::Head, Articulator::Eyes],
        );

        // Global weights are untouched by purpose
        assert_eq!(weights.global, BlendWeights::balanced());
        assert!((weights.components[&Articulator::Head].grammar - 0.8).abs() < 1e-9);
        assert_eq!(weights.components[&Articulator::Eyes].grammar, 0.5);
    }

    #[test]
    fn test_weights_clamped() {
        let g = grammatical(GrammaticalType::Question, &[Articulator::Eyebrows]);
        let calm = EmotionState::neutral();

        let weights = compute_weights(
            &context(Priority::Grammar, 0.9, Purpose::Teaching),
            &g,
            &calm,
            &[Articulator::Eyebrows],
        );

        let brows = weights.components[&Articulator::Eyebrows];
        assert_eq!(brows.grammar, 1.0);
        assert_eq!(brows.emotion, 0.0);
    }

    #[test]
    fn test_blend_mode_margin() {
        assert_eq!(blend_mode(BlendWeights { grammar: 0.6, emotion: 0.4 }), BlendMode::Weighted);
        assert_eq!(blend_mode(BlendWeights { grammar: 0.3, emotion: 0.7 }), BlendMode::PrioritizeEmotion);
    }
}
