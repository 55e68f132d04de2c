//! XP cost curves for the seniority and stat tracks.
//!
//! Both curves answer the same question: how much XP does it cost to enter a
//! given level from the one below it. The seniority curve grows
//! geometrically with the fractional part dropped at every step; the stat
//! curve grows by a widening arithmetic step. The exact truncation behavior
//! of the seniority curve is load-bearing: the community's historical level
//! thresholds (200, 280, 392, 548, ...) came out of per-step integer
//! truncation, and a closed-form power would drift from them.

use std::sync::OnceLock;

use crate::constants::{
    ACCOUNT_BASE_COST, ACCOUNT_COST_GROWTH, ACCOUNT_CURVE_MEMO, STAT_BASE_COST, STAT_COST_STEP,
    STAT_CURVE_MEMO,
};
use crate::numbers::{i64_to_f64, trunc_f64_to_i64};

/// XP cost of entering `level` on the seniority curve.
///
/// Level 1 costs 200; every later level costs the previous amount times 1.4,
/// truncated to a whole number before the next multiplication. Levels below
/// 1 degenerate to the base cost.
#[must_use]
pub fn account_threshold(level: u32) -> i64 {
    let idx = usize::try_from(level).unwrap_or(usize::MAX);
    let table = account_table();
    if let Some(&cost) = table.get(idx) {
        return cost;
    }
    // continue the multiply-truncate walk past the memo window
    let mut cost = table[ACCOUNT_CURVE_MEMO - 1];
    for _ in ACCOUNT_CURVE_MEMO..=idx {
        if cost == i64::MAX {
            break;
        }
        cost = trunc_f64_to_i64(i64_to_f64(cost) * ACCOUNT_COST_GROWTH);
    }
    cost
}

/// XP cost of entering `level` on the stat curve.
///
/// Level 1 costs 5000; every later level adds `120 * level` on top of the
/// previous cost, so the sequence runs 5000, 5240, 5600, 6080, ...
#[must_use]
pub fn stat_threshold(level: u32) -> i64 {
    let idx = usize::try_from(level).unwrap_or(usize::MAX);
    let table = stat_table();
    if let Some(&cost) = table.get(idx) {
        return cost;
    }
    stat_cost_closed_form(level)
}

fn account_table() -> &'static [i64; ACCOUNT_CURVE_MEMO] {
    static TABLE: OnceLock<[i64; ACCOUNT_CURVE_MEMO]> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = [ACCOUNT_BASE_COST; ACCOUNT_CURVE_MEMO];
        for level in 2..ACCOUNT_CURVE_MEMO {
            table[level] = trunc_f64_to_i64(i64_to_f64(table[level - 1]) * ACCOUNT_COST_GROWTH);
        }
        table
    })
}

fn stat_table() -> &'static [i64; STAT_CURVE_MEMO] {
    static TABLE: OnceLock<[i64; STAT_CURVE_MEMO]> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = [STAT_BASE_COST; STAT_CURVE_MEMO];
        for level in 2..STAT_CURVE_MEMO {
            let step = STAT_COST_STEP.saturating_mul(i64::try_from(level).unwrap_or(i64::MAX));
            table[level] = table[level - 1].saturating_add(step);
        }
        table
    })
}

// 5000 + 120 * (2 + 3 + ... + level); agrees with the accumulation exactly
fn stat_cost_closed_form(level: u32) -> i64 {
    if level <= 1 {
        return STAT_BASE_COST;
    }
    let l = i128::from(level);
    let sum = l * (l + 1) / 2 - 1;
    let cost = i128::from(STAT_BASE_COST) + i128::from(STAT_COST_STEP) * sum;
    i64::try_from(cost).unwrap_or(i64::MAX)
}
