// Deterministic score jitter
//
// Optional small perturbation of applier quality metadata. Each perturbation
// seeds its own StdRng from (configured seed, scoring key), so identical
// inputs always produce identical scores and no generator state is shared
// between calls or threads.

use crate::scoring::clamp_unit;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use signblend_common::config::JitterConfig;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreJitter {
    config: Option<JitterConfig>,
}

impl ScoreJitter {
    pub fn disabled() -> Self {
        Self { config: None }
    }

    pub fn seeded(seed: u64, amplitude: f64) -> Self {
        Self {
            config: Some(JitterConfig {
                seed,
                amplitude: amplitude.abs(),
            }),
        }
    }

    pub fn from_config(config: Option<JitterConfig>) -> Self {
        Self { config }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self.config, Some(c) if c.amplitude > 0.0)
    }

    /// Perturb `value` by at most the configured amplitude, clamped to [0, 1]
    pub fn perturb(&self, key: &str, value: f64) -> f64 {
        let Some(config) = self.config else {
            return value;
        };
        if config.amplitude <= 0.0 {
            return value;
        }

        let mut rng = StdRng::seed_from_u64(config.seed ^ key_hash(key));
        let delta = rng.gen_range(-config.amplitude..=config.amplitude);
        clamp_unit(value + delta)
    }
}

/// FNV-1a; stable across runs and platforms
fn key_hash(key: &str) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    key.bytes().fold(OFFSET, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(PRIME)
    })
}
