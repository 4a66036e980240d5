// Strategy Selector
//
// Concept: Choose one of six resolution strategies for a conflict
// Synchronization: Accepts ConflictAnalysis + SelectionContext, returns ResolutionStrategy
//
// Selection precedence:
// 1. Rule table entry for (grammatical type, articulator, emotion)
// 2. Caller priority (grammar → grammar-priority 0.8, emotion → emotion-priority 0.8,
//    balanced → weighted-blend 0.5)
// 3. Severity-driven default (impact > 0.7 → grammar-priority 0.7,
//    resolvability < 0.4 → component-split, else weighted-blend 0.6)

use crate::resolution::rules::RuleTable;
use crate::scoring::clamp_unit;
use crate::types::{
    AlternationOrder, Articulator, ConflictAnalysis, EmotionType, GrammaticalType, Priority,
    ResolutionStrategy, Side, Smoothing, SplitAssignment, StrategyKind, SyncMode, Transition,
};
use signblend_common::EasingCurve;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Points above this impact are treated as grammatically critical
const CRITICAL_IMPACT: f64 = 0.6;

/// Inputs to strategy selection besides the analysis itself
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionContext {
    pub grammatical_type: GrammaticalType,
    pub articulator: Articulator,
    pub emotion: EmotionType,
    pub priority: Option<Priority>,
}

/// Strategy selector backed by a shared rule table
#[derive(Debug, Clone)]
pub struct StrategySelector {
    rules: Arc<RuleTable>,
}

impl Default for StrategySelector {
    fn default() -> Self {
        Self {
            rules: RuleTable::builtin(),
        }
    }
}

impl StrategySelector {
    pub fn new(rules: Arc<RuleTable>) -> Self {
        Self { rules }
    }

    pub fn select(&self, analysis: &ConflictAnalysis, context: &SelectionContext) -> ResolutionStrategy {
        let (kind, blend_ratio, source) = if let Some(rule) =
            self.rules
                .lookup(context.grammatical_type, context.articulator, context.emotion)
        {
            (rule.strategy, rule.blend_ratio, "rule")
        } else if let Some(priority) = context.priority {
            match priority {
                Priority::Grammar => (StrategyKind::GrammarPriority, 0.8, "priority"),
                Priority::Emotion => (StrategyKind::EmotionPriority, 0.8, "priority"),
                Priority::Balanced => (StrategyKind::WeightedBlend, 0.5, "priority"),
            }
        } else if analysis.comprehension_impact > 0.7 {
            (StrategyKind::GrammarPriority, 0.7, "severity")
        } else if analysis.resolvability < 0.4 {
            (StrategyKind::ComponentSplit, 0.5, "severity")
        } else {
            (StrategyKind::WeightedBlend, 0.6, "severity")
        };

        debug!(
            "Selected {} ({:.2}) for {} via {}",
            kind, blend_ratio, context.articulator, source
        );

        build_strategy(kind, blend_ratio, analysis)
    }
}

/// Derive the variant-specific parameters of a strategy from the analysis
pub fn build_strategy(kind: StrategyKind, blend_ratio: f64, analysis: &ConflictAnalysis) -> ResolutionStrategy {
    let blend_ratio = clamp_unit(blend_ratio);
    let severity = analysis.severity;
    let impact = analysis.comprehension_impact;
    let resolvability = analysis.resolvability;

    match kind {
        StrategyKind::GrammarPriority => ResolutionStrategy::GrammarPriority {
            blend_ratio,
            transition: Transition {
                duration_secs: 0.3 + 0.4 * severity,
                easing: if blend_ratio > 0.7 {
                    EasingCurve::EaseOut
                } else {
                    EasingCurve::EaseInOut
                },
            },
        },
        StrategyKind::EmotionPriority => ResolutionStrategy::EmotionPriority {
            blend_ratio,
            intensity_factor: blend_ratio,
            spatial_offset: 0.1 + 0.2 * (1.0 - resolvability),
            preserved_features: analysis
                .points
                .iter()
                .filter(|p| p.comprehension_impact > CRITICAL_IMPACT)
                .map(|p| p.key.clone())
                .collect(),
        },
        StrategyKind::WeightedBlend => ResolutionStrategy::WeightedBlend {
            blend_ratio,
            point_weights: analysis
                .points
                .iter()
                .map(|p| {
                    (
                        p.key.clone(),
                        clamp_unit(blend_ratio * (1.0 + 0.5 * p.comprehension_impact)),
                    )
                })
                .collect::<BTreeMap<_, _>>(),
            smoothing: Smoothing {
                temporal: 0.3 + 0.4 * severity,
                spatial: 0.2 + 0.5 * impact,
                intensity: 0.4 + 0.3 * (1.0 - resolvability),
            },
        },
        StrategyKind::MutualReinforcement => ResolutionStrategy::MutualReinforcement {
            blend_ratio,
            amplification: blend_ratio * (0.8 + 0.4 * resolvability),
            sync_mode: if resolvability > 0.7 {
                SyncMode::Parallel
            } else if resolvability < 0.4 {
                SyncMode::Sequential
            } else {
                SyncMode::Adaptive
            },
        },
        StrategyKind::TemporalAlternation => ResolutionStrategy::TemporalAlternation {
            blend_ratio,
            order: if impact > CRITICAL_IMPACT {
                AlternationOrder::GrammarFirst
            } else {
                AlternationOrder::EmotionFirst
            },
            cycles: (2.0 + 2.0 * (1.0 - resolvability)).ceil() as u32,
        },
        StrategyKind::ComponentSplit => {
            let mut assignments: Vec<SplitAssignment> = analysis
                .points
                .iter()
                .map(|p| SplitAssignment {
                    key: p.key.clone(),
                    side: if p.comprehension_impact > CRITICAL_IMPACT {
                        Side::Grammatical
                    } else {
                        Side::Emotional
                    },
                    impact: p.comprehension_impact,
                })
                .collect();
            assignments.sort_by(|a, b| {
                b.impact
                    .partial_cmp(&a.impact)
                    .unwrap_or(Ordering::Equal)
                    .then_with(|| a.key.cmp(&b.key))
            });

            ResolutionStrategy::ComponentSplit {
                blend_ratio,
                assignments,
                separation_strength: blend_ratio,
            }
        }
    }
}
