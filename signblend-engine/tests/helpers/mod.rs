//! Test Helper Utilities
//!
//! Shared fixtures and log capture for signblend-engine integration tests

#![allow(dead_code)]

pub mod fixtures;
pub mod log_capture;

pub use fixtures::*;
pub use log_capture::{with_log_capture, LogCapture};
