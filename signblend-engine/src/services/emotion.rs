// Emotion-generation collaborator
//
// process: normalizes an incoming emotion state
// extract_features: flattens components into named numeric features
// ("<articulator>.intensity", "<articulator>.<property>") used by the
// emotional-preservation check

use crate::types::{Articulator, EmotionState, EmotionType, ExpressionComponent};
use std::collections::BTreeMap;

pub trait EmotionService: Send + Sync {
    fn process(&self, state: &EmotionState) -> EmotionState;

    fn extract_features(
        &self,
        components: &BTreeMap<Articulator, ExpressionComponent>,
    ) -> BTreeMap<String, f64>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultEmotionModel;

impl EmotionService for DefaultEmotionModel {
    fn process(&self, state: &EmotionState) -> EmotionState {
        match state.emotion {
            EmotionType::Neutral => EmotionState::neutral(),
            emotion => EmotionState::new(emotion, state.intensity),
        }
    }

    fn extract_features(
        &self,
        components: &BTreeMap<Articulator, ExpressionComponent>,
    ) -> BTreeMap<String, f64> {
        let mut features = BTreeMap::new();
        for (articulator, component) in components {
            features.insert(format!("{}.intensity", articulator), component.intensity);
            for (key, value) in &component.properties {
                features.insert(format!("{}.{}", articulator, key), value.as_feature());
            }
        }
        features
    }
}
