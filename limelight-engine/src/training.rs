//! Stat training mechanic.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::account::AccountId;
use crate::character::CharacterRecord;
use crate::constants::{TRAINING_XP_MAX, TRAINING_XP_MIN};
use crate::curve;
use crate::events::{EventList, ProgressionEvent};
use crate::ledger;
use crate::numbers::{i64_to_f64, trunc_f64_to_i64};
use crate::specialty;
use crate::stats::StatKey;

/// What one training session did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingOutcome {
    pub owner: AccountId,
    pub name: String,
    pub stat: StatKey,
    /// Raw draw before the specialty multiplier.
    pub base_xp: i64,
    pub multiplier: f64,
    /// Credited experience, truncated after the multiplier.
    pub reward: i64,
    pub level: u32,
    pub levels_gained: u32,
}

impl TrainingOutcome {
    /// Announcement events. Training always announces its session.
    #[must_use]
    pub fn events(&self) -> EventList {
        let mut events = EventList::new();
        events.push(ProgressionEvent::CharacterTrained {
            owner: self.owner,
            name: self.name.clone(),
            stat: self.stat,
            reward: self.reward,
            levels_gained: self.levels_gained,
        });
        events
    }
}

/// Run one training session against `stat` on `character`.
///
/// Draws the session's base reward, scales it by the specialty label's
/// multiplier with the result truncated to whole experience, and settles
/// level-ups against the stat curve. No other stat and no reputation moves.
pub fn resolve_training_with_rng(
    character: &mut CharacterRecord,
    stat: StatKey,
    rng: &mut impl Rng,
) -> TrainingOutcome {
    let base_xp = rng.gen_range(TRAINING_XP_MIN..=TRAINING_XP_MAX);
    let multiplier = specialty::training_multiplier(character.specialty.label(), stat);
    let reward = trunc_f64_to_i64(i64_to_f64(base_xp) * multiplier);
    let track = character.stats.track_mut(stat);
    let resolution = ledger::resolve(track.level, track.xp, reward, curve::stat_threshold);
    track.level = resolution.level;
    track.xp = resolution.xp;
    TrainingOutcome {
        owner: character.owner,
        name: character.name.clone(),
        stat,
        base_xp,
        multiplier,
        reward,
        level: resolution.level,
        levels_gained: resolution.levels_gained,
    }
}
