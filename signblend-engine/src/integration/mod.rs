// Whole-expression integration
//
// context:      grammatical context derivation (dominant function, constraints)
// weights:      grammar/emotion balance from the caller context
// synchronizer: timing alignment of markers and high-intensity components
// holistic:     whole-expression quality gates
// integrator:   orchestration of the per-articulator pipeline

pub mod context;
pub mod holistic;
pub mod integrator;
pub mod synchronizer;
pub mod weights;

pub use holistic::{HolisticScores, HolisticValidator};
pub use integrator::{ComponentContext, ComponentOutcome, ExpressionIntegrator};
