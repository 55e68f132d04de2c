//! Level-up resolution shared by the seniority and stat tracks.

use serde::{Deserialize, Serialize};

/// Result of folding an XP gain into a level/xp pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub level: u32,
    pub xp: i64,
    pub levels_gained: u32,
}

/// Add `gain` to the pool, then consume the cost of each next level while it
/// is affordable.
///
/// `threshold` gives the cost of entering a level and must stay strictly
/// positive; a non-positive cost stops the loop rather than spinning.
/// Negative gains are folded as zero. The returned remainder is always
/// non-negative and below the cost of the level after the new one, so a pool
/// can gain zero, one, or many levels in a single call.
#[must_use]
pub fn resolve(level: u32, xp: i64, gain: i64, threshold: impl Fn(u32) -> i64) -> Resolution {
    let mut level = level;
    let mut xp = xp.saturating_add(gain.max(0));
    let mut levels_gained = 0u32;
    loop {
        let next_cost = threshold(level.saturating_add(1));
        if next_cost <= 0 || xp < next_cost {
            break;
        }
        xp -= next_cost;
        level = level.saturating_add(1);
        levels_gained = levels_gained.saturating_add(1);
    }
    Resolution {
        level,
        xp,
        levels_gained,
    }
}
