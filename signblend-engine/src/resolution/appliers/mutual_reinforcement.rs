// Mutual-reinforcement transform
//
// Used where both signals push the articulator the same way (e.g. anger and a
// wh-question both furrow the brows). The stronger value is amplified;
// categorical disagreements fall back to the grammatical value.

use super::{union_keys, StrategyOutcome};
use crate::scoring::clamp_unit;
use crate::types::{ExpressionComponent, PropertyValue, SyncMode};

pub fn apply(
    grammatical: &ExpressionComponent,
    emotional: &ExpressionComponent,
    amplification: f64,
    sync_mode: SyncMode,
) -> StrategyOutcome {
    let mut resolved = grammatical.clone();
    resolved.intensity = clamp_unit(grammatical.intensity.max(emotional.intensity) * amplification);
    resolved.duration_ms = synchronized_duration(grammatical.duration_ms, emotional.duration_ms, sync_mode);

    for key in union_keys(grammatical, emotional) {
        let value = match (grammatical.properties.get(key), emotional.properties.get(key)) {
            (Some(PropertyValue::Number(g)), Some(PropertyValue::Number(e))) => {
                PropertyValue::Number(clamp_unit(g.max(*e) * amplification))
            }
            (Some(g), _) => *g,
            (None, Some(e)) => *e,
            (None, None) => continue,
        };
        resolved.properties.insert(key.to_string(), value);
    }

    StrategyOutcome {
        resolved,
        effectiveness: 0.5 + 0.4 * amplification,
        comprehensibility: 0.85,
        naturalness: match sync_mode {
            SyncMode::Parallel => 0.9,
            SyncMode::Adaptive => 0.8,
            SyncMode::Sequential => 0.7,
        },
        transition: None,
    }
}

/// Duration of the combined gesture under each synchronization mode
pub fn synchronized_duration(grammatical_ms: u64, emotional_ms: u64, sync_mode: SyncMode) -> u64 {
    let longest = grammatical_ms.max(emotional_ms);
    let sequential = grammatical_ms.saturating_add(emotional_ms);
    match sync_mode {
        SyncMode::Parallel => longest,
        SyncMode::Sequential => sequential,
        SyncMode::Adaptive => longest / 2 + sequential / 2,
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[test]
    fn test_amplifies_stronger_signal() {
        let g = ExpressionComponent::new(0.5, 0.6).with_property("furrowed", true);
        let e = ExpressionComponent::new(0.5, 0.7).with_property("furrowed", true);

        let outcome = apply(&g, &e, 1.2, SyncMode::Parallel);

        assert!((outcome.resolved.intensity - 0.84).abs() < 1e-9);
        assert_eq!(outcome.resolved.flag("furrowed"), Some(true));
        assert_eq!(outcome.naturalness, 0.9);
    }

    #[test]
    fn test_amplified_values_clamped() {
        let outcome = apply(&grammatical(), &emotional(), 1.6, SyncMode::Adaptive);

        assert_eq!(outcome.resolved.intensity, 1.0);
        // max(0.6, 0.2) × 1.6
        assert!((outcome.resolved.number("tension").unwrap() - 0.96).abs() < 1e-9);
        assert_eq!(outcome.resolved.flag("raised"), Some(true));
        assert_no_key_dropped(&outcome.resolved);
        assert_eq!(outcome.effectiveness, 0.5 + 0.4 * 1.6);
    }

    #[test]
    fn test_sync_mode_durations() {
        assert_eq!(synchronized_duration(600, 400, SyncMode::Parallel), 600);
        assert_eq!(synchronized_duration(600, 400, SyncMode::Sequential), 1000);
        assert_eq!(synchronized_duration(600, 400, SyncMode::Adaptive), 800);
    }
}
