// Error Types
//
// Two failure kinds leave the engine:
// - ResolutionValidationError: a single articulator's resolution failed the quality gate
// - IntegrationError: the whole-expression integration failed (wraps the cause)
//
// Both are fatal for the call that raised them. Retrying is caller policy.

use crate::types::{Articulator, ValidationScores};

/// A resolved component failed the four-axis quality gate
#[derive(Debug, Clone, thiserror::Error)]
#[error("Resolution rejected{}: failed [{}] ({})", articulator_suffix(.articulator), .failed_axes.join(", "), .scores)]
pub struct ResolutionValidationError {
    /// Articulator being resolved, filled in by the integrator
    pub articulator: Option<Articulator>,
    /// Full score vector, including passing axes
    pub scores: ValidationScores,
    /// Names of the axes that fell below their threshold
    pub failed_axes: Vec<&'static str>,
}

impl ResolutionValidationError {
    pub fn for_articulator(mut self, articulator: Articulator) -> Self {
        self.articulator = Some(articulator);
        self
    }
}

fn articulator_suffix(articulator: &Option<Articulator>) -> String {
    match articulator {
        Some(a) => format!(" on {}", a),
        None => String::new(),
    }
}

/// A whole-expression quality gate failed
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HolisticValidationError {
    #[error("Structural preservation {score:.3} below threshold {threshold:.3}")]
    StructuralPreservation { score: f64, threshold: f64 },

    #[error("Critical marker on {articulator} drifted {drift:.3} (max {threshold:.3})")]
    CriticalMarkerDrift {
        articulator: Articulator,
        drift: f64,
        threshold: f64,
    },

    #[error("Emotional feature preservation {score:.3} below threshold {threshold:.3}")]
    EmotionalPreservation { score: f64, threshold: f64 },

    #[error("Composite naturalness/feasibility/cultural score {score:.3} below threshold {threshold:.3}")]
    Composite { score: f64, threshold: f64 },
}

#[derive(Debug, thiserror::Error)]
pub enum IntegrationError {
    #[error("Resolution for {articulator} rejected: {source}")]
    ResolutionRejected {
        articulator: Articulator,
        #[source]
        source: ResolutionValidationError,
    },

    #[error("Integrated expression failed validation: {0}")]
    Validation(#[from] HolisticValidationError),

    #[error("Unknown resolution strategy: {0}")]
    UnknownStrategy(String),

    #[error("Configuration error: {0}")]
    Config(#[from] signblend_common::Error),
}

pub type IntegrationResult<T> = Result<T, IntegrationError>;
