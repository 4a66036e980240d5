// Strategy Appliers
//
// Each resolution strategy has one pure transform in its own module. The
// transforms take the grammatical and emotional components by reference and
// return a new resolved component with raw quality scores. StrategyApplier
// dispatches on the strategy tag and packages the result into a
// ConflictResolution (applying the optional score jitter).
//
// Contract for every transform: no property key present on either side is
// dropped from the resolved component.

pub mod component_split;
pub mod emotion_priority;
pub mod grammar_priority;
pub mod mutual_reinforcement;
pub mod temporal_alternation;
pub mod weighted_blend;

use crate::resolution::jitter::ScoreJitter;
use crate::scoring::clamp_unit;
use crate::types::{
    BlendWeights, ConflictResolution, ExpressionComponent, ResolutionMetadata, ResolutionStrategy,
    Transition,
};
use std::collections::BTreeSet;
use tracing::debug;

/// Raw output of a strategy transform
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyOutcome {
    pub resolved: ExpressionComponent,
    pub effectiveness: f64,
    pub comprehensibility: f64,
    pub naturalness: f64,
    pub transition: Option<Transition>,
}

/// Dispatches resolution strategies to their transforms
#[derive(Debug, Clone, Copy, Default)]
pub struct StrategyApplier {
    jitter: ScoreJitter,
}

impl StrategyApplier {
    pub fn new(jitter: ScoreJitter) -> Self {
        Self { jitter }
    }

    /// Apply `strategy` to a conflicting pair
    ///
    /// `weights` are the articulator's integration weights; only the
    /// weighted blend consults them for keys without a point weight.
    pub fn apply(
        &self,
        strategy: &ResolutionStrategy,
        grammatical: &ExpressionComponent,
        emotional: &ExpressionComponent,
        weights: BlendWeights,
    ) -> ConflictResolution {
        let outcome = match strategy {
            ResolutionStrategy::GrammarPriority {
                blend_ratio,
                transition,
            } => grammar_priority::apply(grammatical, emotional, *blend_ratio, *transition),
            ResolutionStrategy::EmotionPriority {
                intensity_factor,
                spatial_offset,
                preserved_features,
                ..
            } => emotion_priority::apply(
                grammatical,
                emotional,
                *intensity_factor,
                *spatial_offset,
                preserved_features,
            ),
            ResolutionStrategy::WeightedBlend {
                point_weights,
                smoothing,
                ..
            } => weighted_blend::apply(grammatical, emotional, point_weights, *smoothing, weights),
            ResolutionStrategy::MutualReinforcement {
                amplification,
                sync_mode,
                ..
            } => mutual_reinforcement::apply(grammatical, emotional, *amplification, *sync_mode),
            ResolutionStrategy::TemporalAlternation {
                blend_ratio,
                order,
                cycles,
            } => temporal_alternation::apply(grammatical, emotional, *blend_ratio, *order, *cycles),
            ResolutionStrategy::ComponentSplit {
                assignments,
                separation_strength,
                ..
            } => component_split::apply(grammatical, emotional, assignments, *separation_strength),
        };

        let kind = strategy.kind();
        let signature = format!("{}:{:.4}:{:.4}", kind, outcome.resolved.position, outcome.resolved.intensity);
        let metadata = ResolutionMetadata {
            strategy: kind,
            effectiveness: self
                .jitter
                .perturb(&format!("{}:effectiveness", signature), clamp_unit(outcome.effectiveness)),
            comprehensibility: clamp_unit(outcome.comprehensibility),
            naturalness: self
                .jitter
                .perturb(&format!("{}:naturalness", signature), clamp_unit(outcome.naturalness)),
        };

        debug!(
            strategy = %kind,
            intensity = outcome.resolved.intensity,
            effectiveness = metadata.effectiveness,
            comprehensibility = metadata.comprehensibility,
            naturalness = metadata.naturalness,
            "Strategy applied"
        );

        ConflictResolution {
            resolved: outcome.resolved,
            metadata,
            transition: outcome.transition,
        }
    }
}

/// Every property key defined on either side
pub(crate) fn union_keys<'a>(
    grammatical: &'a ExpressionComponent,
    emotional: &'a ExpressionComponent,
) -> BTreeSet<&'a str> {
    grammatical
        .properties
        .keys()
        .chain(emotional.properties.keys())
        .map(String::as_str)
        .collect()
}
