//! Experience to level progression.
//!
//! A player reaches level `k` once their experience hits `50 * k * (k + 1)`,
//! which is the inverse of
//!
//! ```text
//! level = floor((sqrt(2500 + 200 * experience) - 50) / 100)
//! ```
//!
//! The square root is taken with exact integer arithmetic so players sitting
//! exactly on a level boundary are never rounded down by floating point error.

use serde::{Deserialize, Serialize};

/// Derived progression fields for a given amount of experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    pub level: i32,
    pub until_next_level: i32,
}

impl Progression {
    /// Compute level and remaining experience to the next level.
    ///
    /// Negative experience is treated as zero; validation rejects it before
    /// this is ever called on a persisted player.
    pub fn from_experience(experience: i32) -> Self {
        let experience = i64::from(experience.max(0));
        let root = isqrt((2_500 + 200 * experience) as u64) as i64;
        let level = (root - 50) / 100;
        let until_next_level = experience_for_level(level + 1) - experience;

        Self {
            level: level as i32,
            until_next_level: until_next_level as i32,
        }
    }
}

/// Total experience needed to reach `level`.
pub fn experience_for_level(level: i64) -> i64 {
    50 * level * (level + 1)
}

/// Floor of the square root of `n`.
fn isqrt(n: u64) -> u64 {
    if n < 2 {
        return n;
    }
    // Newton iteration from an upper bound converges monotonically downwards.
    let mut x = n;
    let mut y = (x + 1) / 2;
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }
    x
}
