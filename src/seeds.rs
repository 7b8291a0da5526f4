//! Seed management for cave generation
//!
//! Caves are seeded from a string. The string is hashed into the 64-bit value
//! that seeds the fill RNG, so the same string always reproduces the same cave.
//! A random seed is a time-derived string and cannot be replayed unless the
//! resolved string is kept.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use chrono::Local;

/// Where the seed string of a run comes from.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum SeedSource {
    /// A caller-supplied string. Reproducible.
    Fixed(String),
    /// A fresh time-derived string on every resolution. Not reproducible.
    #[default]
    Random,
}

impl SeedSource {
    /// Resolve to the concrete seed string used for a run.
    pub fn resolve(&self) -> String {
        match self {
            SeedSource::Fixed(seed) => seed.clone(),
            SeedSource::Random => time_seed(),
        }
    }

    pub fn is_reproducible(&self) -> bool {
        matches!(self, SeedSource::Fixed(_))
    }
}

impl std::fmt::Display for SeedSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeedSource::Fixed(seed) => write!(f, "\"{}\"", seed),
            SeedSource::Random => write!(f, "random"),
        }
    }
}

/// Hash a seed string into the value used to seed the fill RNG.
pub fn seed_value(seed: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    seed.hash(&mut hasher);
    hasher.finish()
}

/// Current local time with nanosecond precision, e.g. `2024-05-01T12:00:00.123456789+02:00`.
fn time_seed() -> String {
    Local::now().to_rfc3339_opts(chrono::SecondsFormat::Nanos, false)
}
