// Expression Integrator
//
// Coordinates analysis → selection → application → validation for every
// articulator of a grammatical/emotional expression pair, then synchronizes
// timing and runs the holistic gates.
//
// Workflow Phases:
// 1. Derive grammatical context (dominant function, constraints, intensity)
// 2. Compute integration weights from the caller context
// 3. Resolve each articulator (copy when only one side defines it)
// 4. Synchronize timing of markers and high-intensity components
// 5. Holistic validation (structural, emotional, composite)
// 6. Emit summary metadata
//
// Per-articulator resolution is independent and runs on the rayon pool when
// enabled. Results are gathered into an ordered map, so output does not
// depend on scheduling.

use crate::error::{IntegrationError, IntegrationResult};
use crate::integration::context::derive_grammatical_context;
use crate::integration::holistic::HolisticValidator;
use crate::integration::synchronizer::synchronize;
use crate::integration::weights::{blend_mode, compute_weights};
use crate::resolution::{
    ConflictAnalyzer, ResolutionValidator, RuleTable, ScoreJitter, SelectionContext,
    StrategyApplier, StrategySelector,
};
use crate::services::{
    BaselineCulturalFit, CulturalFit, DefaultEmotionModel, DefaultGrammarRules, EmotionService,
    GrammarRuleService,
};
use crate::types::{
    Articulator, ConflictResolutionSummary, EmotionState, Expression, ExpressionComponent,
    GrammaticalContext, IntegratedExpression, IntegrationContext, IntegrationWeights,
    ResolutionMetadata, StrategyKind, ValidationScores,
};
use rayon::prelude::*;
use signblend_common::config::{EngineConfig, HolisticThresholds};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::{debug, info};

/// Result of reconciling one articulator
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentOutcome {
    pub articulator: Articulator,
    pub component: ExpressionComponent,
    /// Conflict points detected (0 when only one side defines the articulator)
    pub conflicts: usize,
    /// Strategy applied (None when the component was copied)
    pub strategy: Option<StrategyKind>,
    /// Applier quality metadata (None when the component was copied)
    pub metadata: Option<ResolutionMetadata>,
    pub scores: Option<ValidationScores>,
}

/// Whole-expression inputs shared by every articulator's resolution
#[derive(Debug, Clone, Copy)]
pub struct ComponentContext<'a> {
    pub grammatical_context: &'a GrammaticalContext,
    /// Processed emotion of the emotional expression
    pub emotion: EmotionState,
    pub weights: &'a IntegrationWeights,
    pub cultural_context: Option<&'a str>,
}

pub struct ExpressionIntegrator {
    analyzer: ConflictAnalyzer,
    selector: StrategySelector,
    applier: StrategyApplier,
    validator: ResolutionValidator,
    holistic_thresholds: HolisticThresholds,

    // Collaborators
    grammar: Arc<dyn GrammarRuleService>,
    emotion: Arc<dyn EmotionService>,
    cultural: Arc<dyn CulturalFit>,

    parallel: bool,
}

impl Default for ExpressionIntegrator {
    fn default() -> Self {
        let cultural: Arc<dyn CulturalFit> = Arc::new(BaselineCulturalFit::default());
        Self {
            analyzer: ConflictAnalyzer::default(),
            selector: StrategySelector::default(),
            applier: StrategyApplier::default(),
            validator: ResolutionValidator::new(Default::default(), Arc::clone(&cultural)),
            holistic_thresholds: HolisticThresholds::default(),
            grammar: Arc::new(DefaultGrammarRules),
            emotion: Arc::new(DefaultEmotionModel),
            cultural,
            parallel: true,
        }
    }
}

impl ExpressionIntegrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an integrator from engine configuration
    ///
    /// Fails with `UnknownStrategy` when a rule override names a strategy
    /// that does not exist.
    pub fn from_config(config: &EngineConfig) -> IntegrationResult<Self> {
        config.validate()?;

        let rules = RuleTable::with_overrides(&config.rules)?;
        let jitter = ScoreJitter::from_config(config.jitter);
        let cultural: Arc<dyn CulturalFit> = Arc::new(BaselineCulturalFit::new(config.cultural_baseline));

        info!(
            "Integrator configured: {} rules ({} overrides), parallel={}, jitter={}",
            rules.len(),
            config.rules.len(),
            config.parallel,
            jitter.is_enabled()
        );

        Ok(Self {
            analyzer: ConflictAnalyzer::new(config.analysis.conflict_threshold),
            selector: StrategySelector::new(rules),
            applier: StrategyApplier::new(jitter),
            validator: ResolutionValidator::new(config.thresholds, Arc::clone(&cultural)),
            holistic_thresholds: config.holistic,
            grammar: Arc::new(DefaultGrammarRules),
            emotion: Arc::new(DefaultEmotionModel),
            cultural,
            parallel: config.parallel,
        })
    }

    pub fn with_grammar_service(mut self, grammar: Arc<dyn GrammarRuleService>) -> Self {
        self.grammar = grammar;
        self
    }

    pub fn with_emotion_service(mut self, emotion: Arc<dyn EmotionService>) -> Self {
        self.emotion = emotion;
        self
    }

    pub fn with_cultural_fit(mut self, cultural: Arc<dyn CulturalFit>) -> Self {
        self.validator = ResolutionValidator::new(*self.validator.thresholds(), Arc::clone(&cultural));
        self.cultural = cultural;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Integrate a grammatical and an emotional expression into one
    pub fn integrate(
        &self,
        grammatical: &Expression,
        emotional: &Expression,
        context: &IntegrationContext,
    ) -> IntegrationResult<IntegratedExpression> {
        // Phase 1: grammatical context
        let grammatical_context = derive_grammatical_context(self.grammar.as_ref(), grammatical);
        let emotion = self
            .emotion
            .process(&emotional.emotion.unwrap_or_else(EmotionState::neutral));

        // Phase 2: weights
        let articulators: Vec<Articulator> = grammatical
            .components
            .keys()
            .chain(emotional.components.keys())
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let weights = compute_weights(context, &grammatical_context, &emotion, &articulators);

        debug!(
            "Integrating {} articulators: function={}, emotion={} ({:.2})",
            articulators.len(),
            grammatical_context.dominant_function,
            emotion.emotion,
            emotion.intensity
        );

        // Phase 3: per-articulator resolution
        let shared = ComponentContext {
            grammatical_context: &grammatical_context,
            emotion,
            weights: &weights,
            cultural_context: context.cultural_context.as_deref(),
        };
        let resolve = |articulator: &Articulator| {
            self.resolve_articulator(
                *articulator,
                grammatical.get(*articulator),
                emotional.get(*articulator),
                &shared,
            )
        };
        let results: Vec<IntegrationResult<Option<ComponentOutcome>>> = if self.parallel {
            articulators.par_iter().map(resolve).collect()
        } else {
            articulators.iter().map(resolve).collect()
        };

        let mut components = BTreeMap::new();
        let mut strategies = BTreeMap::new();
        let mut metadata = BTreeMap::new();
        let mut conflicts = 0;
        for result in results {
            let Some(outcome) = result? else {
                continue;
            };
            conflicts += outcome.conflicts;
            if let Some(strategy) = outcome.strategy {
                strategies.insert(outcome.articulator, strategy);
            }
            if let Some(quality) = outcome.metadata {
                metadata.insert(outcome.articulator, quality);
            }
            components.insert(outcome.articulator, outcome.component);
        }

        // Phase 4: timing
        let timing = synchronize(&mut components, weights.global.emotion);

        // Phase 5: holistic validation
        let holistic = HolisticValidator::new(
            self.holistic_thresholds,
            self.grammar.as_ref(),
            self.emotion.as_ref(),
            self.cultural.as_ref(),
        )
        .validate(
            grammatical,
            emotional,
            &components,
            &grammatical_context.constraints,
            context.cultural_context.as_deref(),
        )?;

        // Phase 6: summary
        let summary = ConflictResolutionSummary {
            conflicts,
            resolutions: strategies.len(),
            strategies,
            metadata,
        };

        info!(
            "Integration complete: {} components, {} conflicts, {} resolutions, \
             grammar={:.3}, emotion={:.3}, naturalness={:.3}",
            components.len(),
            summary.conflicts,
            summary.resolutions,
            holistic.structural,
            holistic.emotional,
            holistic.naturalness
        );

        Ok(IntegratedExpression {
            components,
            grammatical_preservation: holistic.structural,
            emotional_authenticity: holistic.emotional,
            naturalness: holistic.naturalness,
            conflict_resolution: summary,
            timing,
            weights,
            grammatical_context,
        })
    }

    /// Run analysis → selection → application → validation for one articulator
    pub fn resolve_component(
        &self,
        articulator: Articulator,
        grammatical: &ExpressionComponent,
        emotional: &ExpressionComponent,
        shared: &ComponentContext<'_>,
    ) -> IntegrationResult<ComponentOutcome> {
        let function = shared.grammatical_context.dominant_function;
        let weights = shared.weights;
        let analysis = self.analyzer.analyze(grammatical, emotional, function);

        let mode = weights
            .components
            .get(&articulator)
            .map(|w| w.blend_mode)
            .unwrap_or_else(|| blend_mode(weights.global));
        let selection = SelectionContext {
            grammatical_type: function,
            articulator,
            emotion: shared.emotion.emotion,
            priority: Some(mode.selection_priority()),
        };
        let strategy = self.selector.select(&analysis, &selection);

        let resolution = self
            .applier
            .apply(&strategy, grammatical, emotional, weights.for_component(articulator));

        let scores = self
            .validator
            .validate(&resolution, grammatical, emotional, shared.cultural_context)
            .map_err(|source| IntegrationError::ResolutionRejected {
                articulator,
                source: source.for_articulator(articulator),
            })?;

        debug!(
            "{}: {} conflicts resolved by {} ({})",
            articulator,
            analysis.points.len(),
            strategy.kind(),
            scores
        );

        Ok(ComponentOutcome {
            articulator,
            component: resolution.resolved,
            conflicts: analysis.points.len(),
            strategy: Some(strategy.kind()),
            metadata: Some(resolution.metadata),
            scores: Some(scores),
        })
    }

    fn resolve_articulator(
        &self,
        articulator: Articulator,
        grammatical: Option<&ExpressionComponent>,
        emotional: Option<&ExpressionComponent>,
        shared: &ComponentContext<'_>,
    ) -> IntegrationResult<Option<ComponentOutcome>> {
        let copied = |component: &ExpressionComponent| ComponentOutcome {
            articulator,
            component: component.clone(),
            conflicts: 0,
            strategy: None,
            metadata: None,
            scores: None,
        };

        match (grammatical, emotional) {
            (Some(g), Some(e)) => self.resolve_component(articulator, g, e, shared).map(Some),
            (Some(only), None) | (None, Some(only)) => {
                debug!("{}: defined on one side only, copied", articulator);
                Ok(Some(copied(only)))
            }
            (None, None) => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EmotionType, GrammaticalType, Priority};

    fn context() -> IntegrationContext {
        IntegrationContext::default()
    }

    #[test]
    fn test_one_sided_articulators_copied() {
        let grammatical = Expression::new().with_component(
            Articulator::Head,
            ExpressionComponent::new(0.4, 0.5).with_duration(300),
        );
        let emotional = Expression::new()
            .with_emotion(EmotionType::Joy, 0.5)
            .with_component(
                Articulator::Mouth,
                ExpressionComponent::new(0.5, 0.6).with_property("smile", true),
            );

        let result = ExpressionIntegrator::new()
            .integrate(&grammatical, &emotional, &context())
            .unwrap();

        assert_eq!(result.components.len(), 2);
        assert_eq!(result.components[&Articulator::Head], grammatical.components[&Articulator::Head]);
        assert_eq!(result.components[&Articulator::Mouth], emotional.components[&Articulator::Mouth]);
        assert_eq!(result.conflict_resolution.conflicts, 0);
        assert_eq!(result.conflict_resolution.resolutions, 0);
        assert!(result.conflict_resolution.metadata.is_empty());
    }

    #[test]
    fn test_empty_expressions() {
        let result = ExpressionIntegrator::new()
            .integrate(&Expression::new(), &Expression::new(), &context())
            .unwrap();

        assert!(result.components.is_empty());
        assert_eq!(result.grammatical_preservation, 1.0);
        assert_eq!(result.emotional_authenticity, 1.0);
        assert_eq!(result.timing.max_duration_ms, 0);
    }

    #[test]
    fn test_rejected_resolution_names_articulator() {
        // Point weights lean the blend toward grammar, losing the emotional signal
        let g = ExpressionComponent::new(1.0, 1.0)
            .with_property("raised", true)
            .with_property("tension", 1.0);
        let e = ExpressionComponent::new(0.0, 0.0)
            .with_property("raised", false)
            .with_property("tension", 0.0);
        let weights = IntegrationWeights {
            global: crate::types::BlendWeights::balanced(),
            components: BTreeMap::new(),
        };
        let grammatical_context = GrammaticalContext {
            dominant_function: GrammaticalType::Statement,
            markers: Vec::new(),
            constraints: Vec::new(),
            intensity: 0.0,
        };

        let shared = ComponentContext {
            grammatical_context: &grammatical_context,
            emotion: EmotionState::new(EmotionType::Disgust, 0.5),
            weights: &weights,
            cultural_context: None,
        };

        let err = ExpressionIntegrator::new()
            .resolve_component(Articulator::Hands, &g, &e, &shared)
            .unwrap_err();

        match err {
            IntegrationError::ResolutionRejected { articulator, source } => {
                assert_eq!(articulator, Articulator::Hands);
                assert_eq!(source.articulator, Some(Articulator::Hands));
                assert_eq!(source.failed_axes, vec!["emotionality"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_from_config_rejects_unknown_strategy() {
        let config = EngineConfig::from_toml_str(
            r#"
            [[rules]]
            grammatical_type = "negation"
            articulator = "head"
            emotion = "joy"
            strategy = "shrug"
            blend_ratio = 0.5
            "#,
        )
        .unwrap();

        let result = ExpressionIntegrator::from_config(&config);
        assert!(matches!(result, Err(IntegrationError::UnknownStrategy(name)) if name == "shrug"));
    }

    #[test]
    fn test_sequential_matches_parallel() {
        let grammatical = Expression::new()
            .with_grammatical_function(GrammaticalType::Question)
            .with_component(
                Articulator::Eyebrows,
                ExpressionComponent::new(0.5, 0.75).marker().with_property("raised", true),
            );
        let emotional = Expression::new()
            .with_emotion(EmotionType::Joy, 0.6)
            .with_component(
                Articulator::Eyebrows,
                ExpressionComponent::new(0.5, 0.6).with_property("raised", true),
            );
        let ctx = IntegrationContext {
            priority: Priority::Balanced,
            ..context()
        };

        let parallel = ExpressionIntegrator::new()
            .integrate(&grammatical, &emotional, &ctx)
            .unwrap();
        let sequential = ExpressionIntegrator::new()
            .with_parallel(false)
            .integrate(&grammatical, &emotional, &ctx)
            .unwrap();

        assert_eq!(parallel.components, sequential.components);
        assert_eq!(parallel.conflict_resolution, sequential.conflict_resolution);
    }
}
