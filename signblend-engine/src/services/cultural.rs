// Cultural-fit extension point

use crate::types::ExpressionComponent;

/// Scores how well a resolved component suits a cultural context
pub trait CulturalFit: Send + Sync {
    /// Score in [0.0, 1.0]
    fn score(&self, component: &ExpressionComponent, cultural_context: Option<&str>) -> f64;
}

/// Context-independent cultural model returning a fixed baseline
#[derive(Debug, Clone, Copy)]
pub struct BaselineCulturalFit {
    baseline: f64,
}

impl BaselineCulturalFit {
    pub fn new(baseline: f64) -> Self {
        Self {
            baseline: baseline.clamp(0.0, 1.0),
        }
    }
}

impl Default for BaselineCulturalFit {
    fn default() -> Self {
        Self { baseline: 0.85 }
    }
}

impl CulturalFit for BaselineCulturalFit {
    fn score(&self, _component: &ExpressionComponent, _cultural_context: Option<&str>) -> f64 {
        self.baseline
    }
}
