//! Easing curves for expression transitions
//!
//! Articulator changes (eyebrows rising, head turning into a shake) are
//! rendered as transitions between two states. An easing curve maps the
//! normalized transition time to normalized progress.

use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};

/// Easing curve types for articulator transitions
///
/// - Linear: Constant rate of change
/// - EaseIn: Slow start, fast finish
/// - EaseOut: Fast start, slow finish (crisp onset, used for grammatical markers)
/// - EaseInOut: Smooth acceleration and deceleration
/// - Sine: Quarter-sine onset, between linear and ease-out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingCurve {
    /// v(t) = t
    Linear,

    /// v(t) = t²
    EaseIn,

    /// v(t) = 1 - (1-t)²
    EaseOut,

    /// v(t) = 0.5 × (1 - cos(π × t))
    EaseInOut,

    /// v(t) = sin(t × π/2)
    Sine,
}

impl EasingCurve {
    /// Progress at normalized time
    ///
    /// # Arguments
    /// * `t` - Normalized position through the transition (0.0 to 1.0, clamped)
    ///
    /// # Returns
    /// Progress from 0.0 (start state) to 1.0 (end state)
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);

        match self {
            EasingCurve::Linear => t,
            EasingCurve::EaseIn => t * t,
            EasingCurve::EaseOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv
            }
            EasingCurve::EaseInOut => 0.5 * (1.0 - (PI * t).cos()),
            EasingCurve::Sine => (t * FRAC_PI_2).sin(),
        }
    }

    /// Canonical configuration name
    pub fn as_str(&self) -> &'static str {
        match self {
            EasingCurve::Linear => "linear",
            EasingCurve::EaseIn => "ease_in",
            EasingCurve::EaseOut => "ease_out",
            EasingCurve::EaseInOut => "ease_in_out",
            EasingCurve::Sine => "sine",
        }
    }
}

impl Default for EasingCurve {
    fn default() -> Self {
        EasingCurve::EaseInOut
    }
}

impl std::fmt::Display for EasingCurve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    const ALL: [EasingCurve; 5] = [
        EasingCurve::Linear,
        EasingCurve::EaseIn,
        EasingCurve::EaseOut,
        EasingCurve::EaseInOut,
        EasingCurve::Sine,
    ];

    #[test]
    fn test_endpoints() {
        for curve in ALL {
            assert!(curve.apply(0.0).abs() < EPSILON, "{} should start at 0", curve);
            assert!((curve.apply(1.0) - 1.0).abs() < EPSILON, "{} should end at 1", curve);
        }
    }

    #[test]
    fn test_midpoints() {
        assert!((EasingCurve::Linear.apply(0.5) - 0.5).abs() < EPSILON);
        assert!((EasingCurve::EaseIn.apply(0.5) - 0.25).abs() < EPSILON);
        assert!((EasingCurve::EaseOut.apply(0.5) - 0.75).abs() < EPSILON);
        assert!((EasingCurve::EaseInOut.apply(0.5) - 0.5).abs() < EPSILON);
        assert!((EasingCurve::Sine.apply(0.5) - 0.7071).abs() < 1e-4);
    }

    #[test]
    fn test_out_of_range_clamped() {
        assert_eq!(EasingCurve::EaseOut.apply(-0.5), 0.0);
        assert!((EasingCurve::EaseOut.apply(1.5) - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_monotonic() {
        for curve in ALL {
            let samples: Vec<f64> = (0..=50).map(|i| curve.apply(i as f64 / 50.0)).collect();
            for pair in samples.windows(2) {
                assert!(pair[1] >= pair[0] - EPSILON, "{} not monotonic", curve);
            }
        }
    }

    #[test]
    fn test_serde_names_match_display() {
        for curve in ALL {
            let name = toml::Value::try_from(curve).unwrap();
            assert_eq!(name.as_str(), Some(curve.as_str()));
        }
    }
}
