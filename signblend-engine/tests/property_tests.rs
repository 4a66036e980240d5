//! Property tests: analyzer bounds, resolvability monotonicity and
//! key preservation across strategies

use proptest::prelude::*;
use signblend_engine::integration::weights::compute_weights;
use signblend_engine::resolution::appliers::component_split::resolve_assignments;
use signblend_engine::resolution::selector::build_strategy;
use signblend_engine::resolution::{ConflictAnalyzer, StrategyApplier};
use signblend_engine::types::{
    Articulator, BlendWeights, EmotionState, EmotionType, ExpressionComponent, GrammaticalContext,
    GrammaticalType, IntegrationContext, Priority, PropertyValue, Purpose, ResolutionStrategy,
    StrategyKind,
};
use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// Helpers / Strategies
// ---------------------------------------------------------------------------

const KEYS: &[&str] = &["raised", "furrowed", "tension", "smile", "squint", "tilt"];

fn arb_value() -> impl Strategy<Value = PropertyValue> {
    prop_oneof![
        any::<bool>().prop_map(PropertyValue::Flag),
        (0.0f64..=1.0).prop_map(PropertyValue::Number),
    ]
}

fn arb_component() -> impl Strategy<Value = ExpressionComponent> {
    (
        0.0f64..=1.0,
        0.0f64..=1.0,
        1u64..2000,
        any::<bool>(),
        prop::collection::btree_map(prop::sample::select(KEYS), arb_value(), 0..5),
    )
        .prop_map(|(position, intensity, duration, marker, properties)| {
            let mut component = ExpressionComponent::new(position, intensity).with_duration(duration);
            component.is_grammatical_marker = marker;
            for (key, value) in properties {
                component = component.with_property(key, value);
            }
            component
        })
}

fn arb_grammatical_type() -> impl Strategy<Value = GrammaticalType> {
    prop_oneof![
        Just(GrammaticalType::Question),
        Just(GrammaticalType::WhQuestion),
        Just(GrammaticalType::Negation),
        Just(GrammaticalType::Conditional),
        Just(GrammaticalType::Topic),
        Just(GrammaticalType::Statement),
    ]
}

fn arb_strategy_kind() -> impl Strategy<Value = StrategyKind> {
    prop_oneof![
        Just(StrategyKind::GrammarPriority),
        Just(StrategyKind::EmotionPriority),
        Just(StrategyKind::WeightedBlend),
        Just(StrategyKind::MutualReinforcement),
        Just(StrategyKind::TemporalAlternation),
        Just(StrategyKind::ComponentSplit),
    ]
}

fn all_keys(g: &ExpressionComponent, e: &ExpressionComponent) -> BTreeSet<String> {
    g.properties.keys().chain(e.properties.keys()).cloned().collect()
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    /// Every analysis score stays in [0, 1]
    #[test]
    fn analysis_scores_bounded(
        g in arb_component(),
        e in arb_component(),
        function in arb_grammatical_type(),
    ) {
        let analysis = ConflictAnalyzer::default().analyze(&g, &e, function);

        prop_assert!((0.0..=1.0).contains(&analysis.severity));
        prop_assert!((0.0..=1.0).contains(&analysis.comprehension_impact));
        prop_assert!((0.0..=1.0).contains(&analysis.resolvability));
        for point in &analysis.points {
            prop_assert!((0.0..=1.0).contains(&point.conflict_degree));
            prop_assert!((0.0..=1.0).contains(&point.comprehension_impact));
        }
        if analysis.points.is_empty() {
            prop_assert_eq!(analysis.comprehension_impact, 0.0);
        }
    }

    /// Resolvability never rises when severity or impact rise
    #[test]
    fn resolvability_non_increasing(
        a in 0.0f64..=1.0,
        b in 0.0f64..=1.0,
        fixed in 0.0f64..=1.0,
    ) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };

        prop_assert!(ConflictAnalyzer::resolvability(low, fixed) >= ConflictAnalyzer::resolvability(high, fixed));
        prop_assert!(ConflictAnalyzer::resolvability(fixed, low) >= ConflictAnalyzer::resolvability(fixed, high));
    }

    /// A component compared with itself never conflicts
    #[test]
    fn identical_components_fully_resolvable(c in arb_component(), function in arb_grammatical_type()) {
        let analysis = ConflictAnalyzer::default().analyze(&c, &c, function);

        prop_assert!(analysis.points.is_empty());
        prop_assert_eq!(analysis.resolvability, 1.0);
    }

    /// Component split assigns every key to exactly one side
    #[test]
    fn split_assigns_every_key(g in arb_component(), e in arb_component()) {
        let analysis = ConflictAnalyzer::default().analyze(&g, &e, GrammaticalType::Question);
        let ResolutionStrategy::ComponentSplit { assignments, .. } =
            build_strategy(StrategyKind::ComponentSplit, 0.6, &analysis)
        else {
            panic!("expected component split");
        };

        let sides = resolve_assignments(&g, &e, &assignments);

        let mut expected = all_keys(&g, &e);
        expected.insert("position".to_string());
        expected.insert("intensity".to_string());
        let assigned: BTreeSet<String> = sides.keys().cloned().collect();
        prop_assert_eq!(assigned, expected);
    }

    /// No strategy drops a property key; all outputs stay normalized
    #[test]
    fn strategies_preserve_keys_and_bounds(
        g in arb_component(),
        e in arb_component(),
        kind in arb_strategy_kind(),
        ratio in 0.0f64..=1.0,
    ) {
        let analysis = ConflictAnalyzer::default().analyze(&g, &e, GrammaticalType::Statement);
        let strategy = build_strategy(kind, ratio, &analysis);
        let resolution = StrategyApplier::default().apply(&strategy, &g, &e, BlendWeights::balanced());

        let resolved_keys: BTreeSet<String> = resolution.resolved.properties.keys().cloned().collect();
        prop_assert_eq!(resolved_keys, all_keys(&g, &e));
        prop_assert!((0.0..=1.0).contains(&resolution.resolved.position));
        prop_assert!((0.0..=1.0).contains(&resolution.resolved.intensity));
        prop_assert!((0.0..=1.0).contains(&resolution.metadata.effectiveness));
        prop_assert!((0.0..=1.0).contains(&resolution.metadata.comprehensibility));
        prop_assert!((0.0..=1.0).contains(&resolution.metadata.naturalness));
    }

    /// Integration weights stay clamped for any context
    #[test]
    fn weights_clamped(
        formality in 0.0f64..=1.0,
        intensity in 0.0f64..=1.0,
        priority in prop_oneof![Just(Priority::Grammar), Just(Priority::Emotion), Just(Priority::Balanced)],
        teaching in any::<bool>(),
        function in arb_grammatical_type(),
    ) {
        let context = IntegrationContext {
            purpose: if teaching { Purpose::Teaching } else { Purpose::Conversation },
            formality_level: formality,
            priority,
            cultural_context: None,
        };
        let grammatical = GrammaticalContext {
            dominant_function: function,
            markers: Vec::new(),
            constraints: Vec::new(),
            intensity: 0.0,
        };

        let weights = compute_weights(
            &context,
            &grammatical,
            &EmotionState::new(EmotionType::Joy, intensity),
            Articulator::all(),
        );

        for w in std::iter::once(weights.global).chain(weights.components.values().map(|c| c.as_blend())) {
            prop_assert!((0.0..=1.0).contains(&w.grammar));
            prop_assert!((0.0..=1.0).contains(&w.emotion));
        }
    }
}
