// Timing synchronization
//
// Components that carry grammar (markers) or strong affect (intensity > 0.7)
// are stretched to the longest duration among them so they peak together.
// Other components keep their own timing.

use crate::types::{Articulator, ExpressionComponent, TimingSync};
use chrono::Utc;
use std::collections::BTreeMap;

/// Intensity above which a component is synchronized even if not a marker
const SYNC_INTENSITY: f64 = 0.7;

pub fn synchronize(
    components: &mut BTreeMap<Articulator, ExpressionComponent>,
    global_emotion_weight: f64,
) -> TimingSync {
    let qualifies = |c: &ExpressionComponent| c.is_grammatical_marker || c.intensity > SYNC_INTENSITY;

    let max_duration_ms = components
        .values()
        .filter(|c| qualifies(c))
        .map(|c| c.duration_ms)
        .max()
        .unwrap_or(0);

    let mut synchronized = Vec::new();
    for (articulator, component) in components.iter_mut() {
        if qualifies(component) {
            component.duration_ms = max_duration_ms;
            synchronized.push(*articulator);
        }
    }

    TimingSync {
        max_duration_ms,
        global_emotion_weight,
        timestamp: Utc::now(),
        synchronized,
    }
}
