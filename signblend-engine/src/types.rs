// Shared Types and Data Contracts
//
// This module defines the data contracts exchanged between the pipeline
// stages (analysis → selection → application → validation → integration)
// and with the external grammar/emotion collaborators.
//
// Every contract is an owned, immutable-by-convention value: stages consume
// references and produce new instances.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use signblend_common::EasingCurve;
use std::collections::BTreeMap;

/// Synthetic property key for a component's spatial position
pub const POSITION_KEY: &str = "position";

/// Synthetic property key for a component's intensity
pub const INTENSITY_KEY: &str = "intensity";

/// Duration given to components built without an explicit duration
pub const DEFAULT_DURATION_MS: u64 = 500;

// ============================================================================
// Vocabulary
// ============================================================================

/// Facial or manual feature of the avatar
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Articulator {
    Eyebrows,
    Eyes,
    Mouth,
    Head,
    Body,
    Hands,
}

impl Articulator {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "eyebrows" | "brows" => Some(Self::Eyebrows),
            "eyes" | "eye_gaze" => Some(Self::Eyes),
            "mouth" => Some(Self::Mouth),
            "head" => Some(Self::Head),
            "body" | "shoulders" => Some(Self::Body),
            "hands" => Some(Self::Hands),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eyebrows => "eyebrows",
            Self::Eyes => "eyes",
            Self::Mouth => "mouth",
            Self::Head => "head",
            Self::Body => "body",
            Self::Hands => "hands",
        }
    }

    /// How strongly this articulator carries grammatical information
    pub fn grammatical_importance(&self) -> f64 {
        match self {
            Self::Eyebrows => 1.0,
            Self::Head => 0.9,
            Self::Hands => 0.8,
            Self::Eyes => 0.7,
            Self::Mouth => 0.6,
            Self::Body => 0.5,
        }
    }

    pub fn all() -> &'static [Articulator] {
        &[
            Self::Eyebrows,
            Self::Eyes,
            Self::Mouth,
            Self::Head,
            Self::Body,
            Self::Hands,
        ]
    }
}

impl std::fmt::Display for Articulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Grammatical function carried by non-manual markers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrammaticalType {
    /// Yes/no question
    Question,
    WhQuestion,
    Negation,
    Conditional,
    Topic,
    Statement,
}

impl GrammaticalType {
    /// Multiplier applied to aggregate comprehension impact
    pub fn type_factor(&self) -> f64 {
        match self {
            Self::Negation => 1.3,
            Self::Question | Self::WhQuestion => 1.2,
            Self::Conditional => 1.1,
            Self::Topic | Self::Statement => 1.0,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "question" | "yes_no_question" | "yn_question" => Some(Self::Question),
            "wh_question" | "whquestion" => Some(Self::WhQuestion),
            "negation" => Some(Self::Negation),
            "conditional" => Some(Self::Conditional),
            "topic" | "topicalization" => Some(Self::Topic),
            "statement" | "declarative" => Some(Self::Statement),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Question => "question",
            Self::WhQuestion => "wh_question",
            Self::Negation => "negation",
            Self::Conditional => "conditional",
            Self::Topic => "topic",
            Self::Statement => "statement",
        }
    }
}

impl std::fmt::Display for GrammaticalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Basic emotion rendered by the emotional signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmotionType {
    Joy,
    Sadness,
    Anger,
    Fear,
    Surprise,
    Disgust,
    Neutral,
}

impl EmotionType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "joy" | "happiness" => Some(Self::Joy),
            "sadness" => Some(Self::Sadness),
            "anger" => Some(Self::Anger),
            "fear" => Some(Self::Fear),
            "surprise" => Some(Self::Surprise),
            "disgust" => Some(Self::Disgust),
            "neutral" => Some(Self::Neutral),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Joy => "joy",
            Self::Sadness => "sadness",
            Self::Anger => "anger",
            Self::Fear => "fear",
            Self::Surprise => "surprise",
            Self::Disgust => "disgust",
            Self::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for EmotionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which signal the caller wants favored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Grammar,
    Emotion,
    Balanced,
}

/// What the generated signing is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Purpose {
    Translation,
    Teaching,
    Conversation,
}

// ============================================================================
// Expression Inputs
// ============================================================================

/// Typed sub-property of a component (e.g. `raised: true`, `tension: 0.4`)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Flag(bool),
    Number(f64),
}

impl PropertyValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Flag(_) => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(b) => Some(*b),
            Self::Number(_) => None,
        }
    }

    /// Numeric view used for feature extraction (flags map to 0/1)
    pub fn as_feature(&self) -> f64 {
        match self {
            Self::Number(n) => *n,
            Self::Flag(true) => 1.0,
            Self::Flag(false) => 0.0,
        }
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl std::fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flag(b) => write!(f, "{}", b),
            Self::Number(n) => write!(f, "{:.3}", n),
        }
    }
}

/// One articulator's instantaneous state
///
/// Contract: position and intensity are normalized to [0.0, 1.0]; numeric
/// properties are expected to be normalized as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionComponent {
    pub position: f64,
    pub intensity: f64,
    pub duration_ms: u64,
    #[serde(default)]
    pub is_grammatical_marker: bool,
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyValue>,
}

impl ExpressionComponent {
    /// Create a component with clamped position/intensity and default duration
    pub fn new(position: f64, intensity: f64) -> Self {
        Self {
            position: position.clamp(0.0, 1.0),
            intensity: intensity.clamp(0.0, 1.0),
            duration_ms: DEFAULT_DURATION_MS,
            is_grammatical_marker: false,
            properties: BTreeMap::new(),
        }
    }

    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn marker(mut self) -> Self {
        self.is_grammatical_marker = true;
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.properties.get(key).and_then(PropertyValue::as_number)
    }

    pub fn flag(&self, key: &str) -> Option<bool> {
        self.properties.get(key).and_then(PropertyValue::as_flag)
    }

    /// Value lookup that also understands the synthetic position/intensity keys
    pub fn value_of(&self, key: &str) -> Option<PropertyValue> {
        match key {
            POSITION_KEY => Some(PropertyValue::Number(self.position)),
            INTENSITY_KEY => Some(PropertyValue::Number(self.intensity)),
            _ => self.properties.get(key).copied(),
        }
    }

    /// Write a value, routing synthetic keys to the dedicated fields
    pub fn set_value(&mut self, key: &str, value: PropertyValue) {
        match (key, value) {
            (POSITION_KEY, PropertyValue::Number(n)) => self.position = n.clamp(0.0, 1.0),
            (INTENSITY_KEY, PropertyValue::Number(n)) => self.intensity = n.clamp(0.0, 1.0),
            (POSITION_KEY, _) | (INTENSITY_KEY, _) => {}
            _ => {
                self.properties.insert(key.to_string(), value);
            }
        }
    }
}

/// Emotion carried by the emotional expression
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmotionState {
    pub emotion: EmotionType,
    pub intensity: f64,
}

impl EmotionState {
    pub fn new(emotion: EmotionType, intensity: f64) -> Self {
        Self {
            emotion,
            intensity: intensity.clamp(0.0, 1.0),
        }
    }

    pub fn neutral() -> Self {
        Self::new(EmotionType::Neutral, 0.0)
    }
}

/// Multi-articulator expression produced by one collaborator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Expression {
    pub components: BTreeMap<Articulator, ExpressionComponent>,
    /// Sentence-level function hint supplied by the grammar collaborator
    #[serde(default)]
    pub grammatical_function: Option<GrammaticalType>,
    /// Emotion supplied by the emotion collaborator
    #[serde(default)]
    pub emotion: Option<EmotionState>,
}

impl Expression {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_component(mut self, articulator: Articulator, component: ExpressionComponent) -> Self {
        self.components.insert(articulator, component);
        self
    }

    pub fn with_grammatical_function(mut self, function: GrammaticalType) -> Self {
        self.grammatical_function = Some(function);
        self
    }

    pub fn with_emotion(mut self, emotion: EmotionType, intensity: f64) -> Self {
        self.emotion = Some(EmotionState::new(emotion, intensity));
        self
    }

    pub fn get(&self, articulator: Articulator) -> Option<&ExpressionComponent> {
        self.components.get(&articulator)
    }
}

/// Caller-supplied integration context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationContext {
    pub purpose: Purpose,
    /// [0.0, 1.0]
    pub formality_level: f64,
    pub priority: Priority,
    #[serde(default)]
    pub cultural_context: Option<String>,
}

impl Default for IntegrationContext {
    fn default() -> Self {
        Self {
            purpose: Purpose::Translation,
            formality_level: 0.5,
            priority: Priority::Balanced,
            cultural_context: None,
        }
    }
}

// ============================================================================
// Conflict Analysis (ConflictAnalyzer output)
// ============================================================================

/// A single detected disagreement between the two signals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictPoint {
    /// Property key (or synthetic `position`/`intensity`)
    pub key: String,
    pub grammatical_value: Option<PropertyValue>,
    pub emotional_value: Option<PropertyValue>,
    /// [0.0, 1.0]
    pub conflict_degree: f64,
    /// [0.0, 1.0]
    pub comprehension_impact: f64,
}

/// Aggregate conflict assessment for one articulator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictAnalysis {
    pub severity: f64,
    pub points: Vec<ConflictPoint>,
    pub comprehension_impact: f64,
    pub resolvability: f64,
}

// ============================================================================
// Resolution Strategies (StrategySelector output)
// ============================================================================

/// Tag of a resolution strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    GrammarPriority,
    EmotionPriority,
    WeightedBlend,
    MutualReinforcement,
    TemporalAlternation,
    ComponentSplit,
}

impl StrategyKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "grammar_priority" | "grammar" => Some(Self::GrammarPriority),
            "emotion_priority" | "emotion" => Some(Self::EmotionPriority),
            "weighted_blend" | "blend" | "balanced" => Some(Self::WeightedBlend),
            "mutual_reinforcement" | "reinforce" => Some(Self::MutualReinforcement),
            "temporal_alternation" | "alternate" => Some(Self::TemporalAlternation),
            "component_split" | "split" => Some(Self::ComponentSplit),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GrammarPriority => "grammar_priority",
            Self::EmotionPriority => "emotion_priority",
            Self::WeightedBlend => "weighted_blend",
            Self::MutualReinforcement => "mutual_reinforcement",
            Self::TemporalAlternation => "temporal_alternation",
            Self::ComponentSplit => "component_split",
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Transition envelope handed to the animator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub duration_secs: f64,
    pub easing: EasingCurve,
}

impl Transition {
    /// Progress of the transition `elapsed_secs` after its start
    pub fn progress_at(&self, elapsed_secs: f64) -> f64 {
        if self.duration_secs <= 0.0 {
            return 1.0;
        }
        self.easing.apply(elapsed_secs / self.duration_secs)
    }
}

/// Smoothing factors used by the weighted blend
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Smoothing {
    pub temporal: f64,
    pub spatial: f64,
    pub intensity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncMode {
    Parallel,
    Adaptive,
    Sequential,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlternationOrder {
    GrammarFirst,
    EmotionFirst,
}

/// Which signal a property is taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Grammatical,
    Emotional,
}

/// Component-split assignment of one conflicting key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitAssignment {
    pub key: String,
    pub side: Side,
    pub impact: f64,
}

/// Resolution strategy with its derived parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum ResolutionStrategy {
    GrammarPriority {
        blend_ratio: f64,
        transition: Transition,
    },
    EmotionPriority {
        blend_ratio: f64,
        intensity_factor: f64,
        spatial_offset: f64,
        preserved_features: Vec<String>,
    },
    WeightedBlend {
        blend_ratio: f64,
        /// Grammar weight per conflicting key
        point_weights: BTreeMap<String, f64>,
        smoothing: Smoothing,
    },
    MutualReinforcement {
        blend_ratio: f64,
        amplification: f64,
        sync_mode: SyncMode,
    },
    TemporalAlternation {
        blend_ratio: f64,
        order: AlternationOrder,
        cycles: u32,
    },
    ComponentSplit {
        blend_ratio: f64,
        /// Sorted by impact, highest first
        assignments: Vec<SplitAssignment>,
        separation_strength: f64,
    },
}

impl ResolutionStrategy {
    pub fn kind(&self) -> StrategyKind {
        match self {
            Self::GrammarPriority { .. } => StrategyKind::GrammarPriority,
            Self::EmotionPriority { .. } => StrategyKind::EmotionPriority,
            Self::WeightedBlend { .. } => StrategyKind::WeightedBlend,
            Self::MutualReinforcement { .. } => StrategyKind::MutualReinforcement,
            Self::TemporalAlternation { .. } => StrategyKind::TemporalAlternation,
            Self::ComponentSplit { .. } => StrategyKind::ComponentSplit,
        }
    }

    pub fn blend_ratio(&self) -> f64 {
        match self {
            Self::GrammarPriority { blend_ratio, .. }
            | Self::EmotionPriority { blend_ratio, .. }
            | Self::WeightedBlend { blend_ratio, .. }
            | Self::MutualReinforcement { blend_ratio, .. }
            | Self::TemporalAlternation { blend_ratio, .. }
            | Self::ComponentSplit { blend_ratio, .. } => *blend_ratio,
        }
    }
}

// ============================================================================
// Resolution Output (StrategyApplier output)
// ============================================================================

/// Quality metadata attached by the applier; all scores in [0.0, 1.0]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolutionMetadata {
    pub strategy: StrategyKind,
    pub effectiveness: f64,
    pub comprehensibility: f64,
    pub naturalness: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictResolution {
    pub resolved: ExpressionComponent,
    pub metadata: ResolutionMetadata,
    /// Present for strategies that prescribe an onset envelope
    pub transition: Option<Transition>,
}

// ============================================================================
// Validation (ResolutionValidator output)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidationScores {
    pub grammaticality: f64,
    pub emotionality: f64,
    pub naturalness: f64,
    pub cultural: f64,
}

impl std::fmt::Display for ValidationScores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "grammaticality={:.3}, emotionality={:.3}, naturalness={:.3}, cultural={:.3}",
            self.grammaticality, self.emotionality, self.naturalness, self.cultural
        )
    }
}

// ============================================================================
// Integration Weights
// ============================================================================

/// Coarse per-component blend mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    Weighted,
    PrioritizeEmotion,
    PrioritizeGrammar,
}

impl BlendMode {
    /// Priority handed to the strategy selector for this component
    pub fn selection_priority(&self) -> Priority {
        match self {
            Self::Weighted => Priority::Balanced,
            Self::PrioritizeEmotion => Priority::Emotion,
            Self::PrioritizeGrammar => Priority::Grammar,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlendWeights {
    pub grammar: f64,
    pub emotion: f64,
}

impl BlendWeights {
    pub fn balanced() -> Self {
        Self {
            grammar: 0.5,
            emotion: 0.5,
        }
    }

    /// Grammar share of the total weight (0.5 when both are zero)
    pub fn grammar_share(&self) -> f64 {
        let total = self.grammar + self.emotion;
        if total > 0.0 {
            self.grammar / total
        } else {
            0.5
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentWeights {
    pub grammar: f64,
    pub emotion: f64,
    pub blend_mode: BlendMode,
}

impl ComponentWeights {
    pub fn as_blend(&self) -> BlendWeights {
        BlendWeights {
            grammar: self.grammar,
            emotion: self.emotion,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationWeights {
    pub global: BlendWeights,
    pub components: BTreeMap<Articulator, ComponentWeights>,
}

impl IntegrationWeights {
    /// Component weights, falling back to the global split
    pub fn for_component(&self, articulator: Articulator) -> BlendWeights {
        self.components
            .get(&articulator)
            .map(ComponentWeights::as_blend)
            .unwrap_or(self.global)
    }
}

// ============================================================================
// Grammatical Context (grammar collaborator contracts)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrammaticalMarker {
    pub articulator: Articulator,
    pub function: GrammaticalType,
    pub importance: f64,
    pub intensity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConstraintKind {
    RequiresFlag { key: String, value: bool },
    MinIntensity { value: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrammaticalConstraint {
    pub articulator: Articulator,
    pub kind: ConstraintKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintViolation {
    pub articulator: Articulator,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrammaticalContext {
    pub dominant_function: GrammaticalType,
    pub markers: Vec<GrammaticalMarker>,
    pub constraints: Vec<GrammaticalConstraint>,
    /// Importance-weighted average marker intensity
    pub intensity: f64,
}

// ============================================================================
// Integrated Output (ExpressionIntegrator output)
// ============================================================================

/// Timing synchronization record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingSync {
    pub max_duration_ms: u64,
    pub global_emotion_weight: f64,
    pub timestamp: DateTime<Utc>,
    /// Components stretched to `max_duration_ms`
    pub synchronized: Vec<Articulator>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictResolutionSummary {
    /// Total conflict points detected across all articulators
    pub conflicts: usize,
    /// Number of articulators reconciled through the pipeline
    pub resolutions: usize,
    pub strategies: BTreeMap<Articulator, StrategyKind>,
    /// Applier quality metadata of each reconciled articulator
    pub metadata: BTreeMap<Articulator, ResolutionMetadata>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegratedExpression {
    pub components: BTreeMap<Articulator, ExpressionComponent>,
    pub grammatical_preservation: f64,
    pub emotional_authenticity: f64,
    pub naturalness: f64,
    pub conflict_resolution: ConflictResolutionSummary,
    pub timing: TimingSync,
    pub weights: IntegrationWeights,
    pub grammatical_context: GrammaticalContext,
}
