//! # SignBlend Engine
//!
//! Reconciles the grammatical and emotional renderings of a signing avatar's
//! non-manual articulators (eyebrows, eyes, mouth, head, body, hands) into
//! one coherent expression.
//!
//! For every articulator rendered by both signals the engine:
//! 1. analyzes the conflict ([`resolution::ConflictAnalyzer`])
//! 2. selects a resolution strategy ([`resolution::StrategySelector`])
//! 3. applies it ([`resolution::StrategyApplier`])
//! 4. validates the result ([`resolution::ResolutionValidator`])
//!
//! [`ExpressionIntegrator`] drives this per articulator, synchronizes timing
//! and runs whole-expression quality gates.
//!
//! ```no_run
//! use signblend_engine::types::{Articulator, EmotionType, Expression, ExpressionComponent, GrammaticalType};
//! use signblend_engine::{ExpressionIntegrator, IntegrationContext, IntegrationError};
//!
//! let grammatical = Expression::new()
//!     .with_grammatical_function(GrammaticalType::Question)
//!     .with_component(
//!         Articulator::Eyebrows,
//!         ExpressionComponent::new(0.5, 0.9).marker().with_property("raised", true),
//!     );
//! let emotional = Expression::new()
//!     .with_emotion(EmotionType::Joy, 0.6)
//!     .with_component(
//!         Articulator::Eyebrows,
//!         ExpressionComponent::new(0.5, 0.3).with_property("raised", false),
//!     );
//!
//! match ExpressionIntegrator::new().integrate(&grammatical, &emotional, &IntegrationContext::default()) {
//!     Ok(integrated) => println!("{:.2}", integrated.components[&Articulator::Eyebrows].intensity),
//!     // Recovery (for example a grammar-only retry) is up to the caller
//!     Err(IntegrationError::ResolutionRejected { articulator, source }) => {
//!         eprintln!("{} rejected: {}", articulator, source)
//!     }
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```

pub mod error;
pub mod integration;
pub mod resolution;
pub mod scoring;
pub mod services;
pub mod types;

pub use error::{HolisticValidationError, IntegrationError, IntegrationResult, ResolutionValidationError};
pub use integration::ExpressionIntegrator;
pub use types::{IntegratedExpression, IntegrationContext};
