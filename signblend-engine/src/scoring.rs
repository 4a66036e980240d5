// Shared scoring arithmetic
//
// All scores are clamped to [0.0, 1.0]. Property values are assumed to be
// normalized by the producing collaborator.

use crate::types::{ExpressionComponent, PropertyValue};

pub(crate) fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// Normalized absolute difference, clamped to 1
pub(crate) fn difference(a: f64, b: f64) -> f64 {
    clamp_unit((a - b).abs())
}

/// 1 − |Δ| for numbers, equality for anything else
pub fn value_preservation(reference: &PropertyValue, candidate: Option<&PropertyValue>) -> f64 {
    match (reference, candidate) {
        (PropertyValue::Number(a), Some(PropertyValue::Number(b))) => 1.0 - difference(*a, *b),
        (reference, Some(candidate)) if reference == candidate => 1.0,
        _ => 0.0,
    }
}

/// Mean preservation of the reference component's properties in the candidate
///
/// A reference with no properties is fully preserved.
pub fn property_preservation(reference: &ExpressionComponent, candidate: &ExpressionComponent) -> f64 {
    if reference.properties.is_empty() {
        return 1.0;
    }

    let total: f64 = reference
        .properties
        .iter()
        .map(|(key, value)| value_preservation(value, candidate.properties.get(key)))
        .sum();
    total / reference.properties.len() as f64
}

/// 0.5 × properties + 0.3 × position + 0.2 × intensity, against the grammatical reference
pub fn grammatical_preservation(reference: &ExpressionComponent, candidate: &ExpressionComponent) -> f64 {
    clamp_unit(
        0.5 * property_preservation(reference, candidate)
            + 0.3 * (1.0 - difference(reference.position, candidate.position))
            + 0.2 * (1.0 - difference(reference.intensity, candidate.intensity)),
    )
}

/// 0.6 × properties + 0.4 × intensity, against the emotional reference
pub fn emotional_preservation(reference: &ExpressionComponent, candidate: &ExpressionComponent) -> f64 {
    clamp_unit(
        0.6 * property_preservation(reference, candidate)
            + 0.4 * (1.0 - difference(reference.intensity, candidate.intensity)),
    )
}

/// Linear interpolation weighted toward `a` by `weight_a`
pub(crate) fn blend(a: f64, b: f64, weight_a: f64) -> f64 {
    a * weight_a + b * (1.0 - weight_a)
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_preservation() {
        let a = PropertyValue::Number(0.8);
        assert!((value_preservation(&a, Some(&PropertyValue::Number(0.5))) - 0.7).abs() < 1e-9);
        assert_eq!(value_preservation(&a, None), 0.0);
        assert_eq!(value_preservation(&PropertyValue::Flag(true), Some(&PropertyValue::Flag(true))), 1.0);
        assert_eq!(value_preservation(&PropertyValue::Flag(true), Some(&PropertyValue::Number(1.0))), 0.0);
    }

    #[test]
    fn test_property_preservation_empty_reference() {
        let reference = ExpressionComponent::new(0.5, 0.5);
        let candidate = ExpressionComponent::new(0.1, 0.9).with_property("raised", true);
        assert_eq!(property_preservation(&reference, &candidate), 1.0);
    }

    #[test]
    fn test_weighted_preservation() {
        let reference = ExpressionComponent::new(0.5, 0.8).with_property("raised", true);
        let candidate = ExpressionComponent::new(0.5, 0.6).with_property("raised", true);

        // 0.5 + 0.3 + 0.2 × 0.8
        assert!((grammatical_preservation(&reference, &candidate) - 0.96).abs() < 1e-9);
        // 0.6 + 0.4 × 0.8
        assert!((emotional_preservation(&reference, &candidate) - 0.92).abs() < 1e-9);
    }

    #[test]
    fn test_clamp_unit_handles_nan() {
        assert_eq!(clamp_unit(f64::NAN), 0.0);
        assert_eq!(clamp_unit(1.7), 1.0);
        assert_eq!(clamp_unit(-0.3), 0.0);
    }
}
