//! # SignBlend Common Library
//!
//! Shared code for the SignBlend workspace:
//! - Error type and result alias
//! - Engine configuration (TOML) with graceful fallback to defaults
//! - Easing curves for expression transitions
//! - Logging bootstrap

pub mod config;
pub mod easing;
pub mod error;
pub mod logging;

pub use easing::EasingCurve;
pub use error::{Error, Result};
