// Per-articulator conflict resolution
//
// Pipeline for one articulator:
//   ConflictAnalyzer → StrategySelector → StrategyApplier → ResolutionValidator
//
// Each stage is an independent, side-effect-free module with an explicit
// input/output contract (see types.rs). The integrator drives the pipeline.

pub mod analyzer;
pub mod appliers;
pub mod jitter;
pub mod rules;
pub mod selector;
pub mod validator;

pub use analyzer::ConflictAnalyzer;
pub use appliers::StrategyApplier;
pub use jitter::ScoreJitter;
pub use rules::{Rule, RuleTable};
pub use selector::{SelectionContext, StrategySelector};
pub use validator::ResolutionValidator;
