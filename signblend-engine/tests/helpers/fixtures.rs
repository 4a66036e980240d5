//! Expression fixtures for pipeline tests

use signblend_engine::types::{
    Articulator, EmotionType, Expression, ExpressionComponent, GrammaticalType, Priority, Purpose,
};
use signblend_engine::IntegrationContext;

/// Yes/no question: raised-eyebrow marker plus an unmarked head tilt
pub fn question_grammar() -> Expression {
    Expression::new()
        .with_grammatical_function(GrammaticalType::Question)
        .with_component(
            Articulator::Eyebrows,
            ExpressionComponent::new(0.5, 0.9)
                .with_duration(600)
                .marker()
                .with_property("raised", true),
        )
        .with_component(
            Articulator::Head,
            ExpressionComponent::new(0.45, 0.4).with_duration(400),
        )
}

/// Joyful rendering that keeps the brows raised, so it agrees with the
/// question marker on the `raised` flag and only differs in intensity
pub fn joyful_raised_brows() -> Expression {
    Expression::new()
        .with_emotion(EmotionType::Joy, 0.6)
        .with_component(
            Articulator::Eyebrows,
            ExpressionComponent::new(0.5, 0.3)
                .with_duration(500)
                .with_property("raised", true),
        )
        .with_component(
            Articulator::Mouth,
            ExpressionComponent::new(0.5, 0.6)
                .with_duration(800)
                .with_property("smile", true),
        )
}

pub fn context(priority: Priority, formality_level: f64) -> IntegrationContext {
    IntegrationContext {
        purpose: Purpose::Translation,
        formality_level,
        priority,
        cultural_context: None,
    }
}

pub fn balanced() -> IntegrationContext {
    context(Priority::Balanced, 0.5)
}
