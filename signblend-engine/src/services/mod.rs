// External collaborator contracts
//
// The engine consults a grammar-rule service, an emotion service and a
// cultural-fit model. Each is a trait object so callers can plug in their own
// models; the default implementations are rule-based and make the engine
// usable stand-alone.

pub mod cultural;
pub mod emotion;
pub mod grammar;

pub use cultural::{BaselineCulturalFit, CulturalFit};
pub use emotion::{DefaultEmotionModel, EmotionService};
pub use grammar::{DefaultGrammarRules, GrammarRuleService};
