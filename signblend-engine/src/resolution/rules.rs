// Resolution Rule Table
//
// Concept: Expert rules mapping (grammatical type, articulator, emotion) to a
// preferred strategy and blend ratio
//
// The table is authored nested (grammatical type → articulator → emotion) and
// flattened once into a composite-key map. The built-in table is immutable and
// shared; configuration overrides produce a new table layered on top of it.

use crate::error::{IntegrationError, IntegrationResult};
use crate::types::{Articulator, EmotionType, GrammaticalType, StrategyKind};
use once_cell::sync::Lazy;
use signblend_common::config::RuleOverride;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use Articulator::*;
use EmotionType::*;
use StrategyKind::*;

/// Composite rule key
pub type RuleKey = (GrammaticalType, Articulator, EmotionType);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule {
    pub strategy: StrategyKind,
    pub blend_ratio: f64,
}

type EmotionRules = &'static [(EmotionType, StrategyKind, f64)];
type ArticulatorRules = &'static [(Articulator, EmotionRules)];

const QUESTION_RULES: ArticulatorRules = &[
    (
        Eyebrows,
        &[
            (Joy, GrammarPriority, 0.7),
            (Sadness, GrammarPriority, 0.75),
            (Anger, ComponentSplit, 0.7),
            (Surprise, MutualReinforcement, 0.6),
            (Fear, MutualReinforcement, 0.6),
        ],
    ),
    (Mouth, &[(Joy, EmotionPriority, 0.7), (Sadness, EmotionPriority, 0.6)]),
    (Head, &[(Sadness, WeightedBlend, 0.6)]),
];

const WH_QUESTION_RULES: ArticulatorRules = &[
    (
        Eyebrows,
        &[
            (Anger, MutualReinforcement, 0.7),
            (Joy, TemporalAlternation, 0.6),
            (Surprise, ComponentSplit, 0.65),
        ],
    ),
    (Head, &[(Joy, WeightedBlend, 0.6)]),
];

const NEGATION_RULES: ArticulatorRules = &[
    (
        Head,
        &[
            (Joy, GrammarPriority, 0.85),
            (Sadness, GrammarPriority, 0.8),
            (Anger, MutualReinforcement, 0.7),
        ],
    ),
    (
        Eyebrows,
        &[(Sadness, WeightedBlend, 0.5), (Anger, MutualReinforcement, 0.65)],
    ),
    (Mouth, &[(Joy, TemporalAlternation, 0.6)]),
];

const CONDITIONAL_RULES: ArticulatorRules = &[
    (Eyebrows, &[(Fear, TemporalAlternation, 0.65)]),
    (Head, &[(Joy, WeightedBlend, 0.6)]),
];

const TOPIC_RULES: ArticulatorRules = &[
    (Eyebrows, &[(Joy, ComponentSplit, 0.6)]),
    (Eyes, &[(Sadness, EmotionPriority, 0.7)]),
];

const NESTED_RULES: &[(GrammaticalType, ArticulatorRules)] = &[
    (GrammaticalType::Question, QUESTION_RULES),
    (GrammaticalType::WhQuestion, WH_QUESTION_RULES),
    (GrammaticalType::Negation, NEGATION_RULES),
    (GrammaticalType::Conditional, CONDITIONAL_RULES),
    (GrammaticalType::Topic, TOPIC_RULES),
];

static BUILTIN: Lazy<Arc<RuleTable>> = Lazy::new(|| {
    let mut rules = HashMap::new();
    for (grammatical_type, articulators) in NESTED_RULES {
        for (articulator, emotions) in *articulators {
            for (emotion, strategy, blend_ratio) in *emotions {
                rules.insert(
                    (*grammatical_type, *articulator, *emotion),
                    Rule {
                        strategy: *strategy,
                        blend_ratio: *blend_ratio,
                    },
                );
            }
        }
    }
    Arc::new(RuleTable { rules })
});

/// Flattened, read-only rule table
#[derive(Debug, Clone, PartialEq)]
pub struct RuleTable {
    rules: HashMap<RuleKey, Rule>,
}

impl RuleTable {
    /// Shared built-in table (built on first use)
    pub fn builtin() -> Arc<RuleTable> {
        Arc::clone(&BUILTIN)
    }

    /// Built-in table with configuration overrides layered on top
    pub fn with_overrides(overrides: &[RuleOverride]) -> IntegrationResult<Arc<RuleTable>> {
        if overrides.is_empty() {
            return Ok(Self::builtin());
        }

        let mut rules = BUILTIN.rules.clone();
        for entry in overrides {
            let (key, rule) = parse_override(entry)?;
            debug!(
                "Rule override {}/{}/{} → {} ({:.2})",
                key.0, key.1, key.2, rule.strategy, rule.blend_ratio
            );
            rules.insert(key, rule);
        }
        Ok(Arc::new(RuleTable { rules }))
    }

    pub fn lookup(
        &self,
        grammatical_type: GrammaticalType,
        articulator: Articulator,
        emotion: EmotionType,
    ) -> Option<Rule> {
        self.rules.get(&(grammatical_type, articulator, emotion)).copied()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn parse_override(entry: &RuleOverride) -> IntegrationResult<(RuleKey, Rule)> {
    let invalid = |what: &str, value: &str| {
        IntegrationError::Config(signblend_common::Error::InvalidInput(format!(
            "Unknown {} in rule override: {}",
            what, value
        )))
    };

    let grammatical_type = GrammaticalType::parse(&entry.grammatical_type)
        .ok_or_else(|| invalid("grammatical type", &entry.grammatical_type))?;
    let articulator = Articulator::parse(&entry.articulator)
        .ok_or_else(|| invalid("articulator", &entry.articulator))?;
    let emotion =
        EmotionType::parse(&entry.emotion).ok_or_else(|| invalid("emotion", &entry.emotion))?;
    let strategy = StrategyKind::parse(&entry.strategy)
        .ok_or_else(|| IntegrationError::UnknownStrategy(entry.strategy.clone()))?;

    Ok((
        (grammatical_type, articulator, emotion),
        Rule {
            strategy,
            blend_ratio: entry.blend_ratio.clamp(0.0, 1.0),
        },
    ))
}
