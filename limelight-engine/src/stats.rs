//! Trainable character stats.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The six trainable dimensions every character carries.
///
/// A closed enumeration on purpose: stat selection arrives from the platform
/// layer as structured input, never as a free-text column name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatKey {
    Chant,
    Dance,
    Eloquence,
    Acting,
    Fitness,
    Aesthetics,
}

impl StatKey {
    pub const ALL: [Self; 6] = [
        Self::Chant,
        Self::Dance,
        Self::Eloquence,
        Self::Acting,
        Self::Fitness,
        Self::Aesthetics,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chant => "chant",
            Self::Dance => "dance",
            Self::Eloquence => "eloquence",
            Self::Acting => "acting",
            Self::Fitness => "fitness",
            Self::Aesthetics => "aesthetics",
        }
    }
}

impl fmt::Display for StatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chant" => Ok(Self::Chant),
            "dance" => Ok(Self::Dance),
            "eloquence" => Ok(Self::Eloquence),
            "acting" => Ok(Self::Acting),
            "fitness" => Ok(Self::Fitness),
            "aesthetics" => Ok(Self::Aesthetics),
            _ => Err(()),
        }
    }
}

/// One trainable track: current level plus XP banked toward the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatTrack {
    pub level: u32,
    pub xp: i64,
}

impl StatTrack {
    /// Track opened at `level` with an empty pool.
    #[must_use]
    pub const fn at_level(level: u32) -> Self {
        Self { level, xp: 0 }
    }
}

impl Default for StatTrack {
    fn default() -> Self {
        Self::at_level(1)
    }
}

/// The full six-track block of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StatBlock {
    #[serde(default)]
    pub chant: StatTrack,
    #[serde(default)]
    pub dance: StatTrack,
    #[serde(default)]
    pub eloquence: StatTrack,
    #[serde(default)]
    pub acting: StatTrack,
    #[serde(default)]
    pub fitness: StatTrack,
    #[serde(default)]
    pub aesthetics: StatTrack,
}

impl StatBlock {
    #[must_use]
    pub const fn track(&self, key: StatKey) -> StatTrack {
        match key {
            StatKey::Chant => self.chant,
            StatKey::Dance => self.dance,
            StatKey::Eloquence => self.eloquence,
            StatKey::Acting => self.acting,
            StatKey::Fitness => self.fitness,
            StatKey::Aesthetics => self.aesthetics,
        }
    }

    pub const fn track_mut(&mut self, key: StatKey) -> &mut StatTrack {
        match key {
            StatKey::Chant => &mut self.chant,
            StatKey::Dance => &mut self.dance,
            StatKey::Eloquence => &mut self.eloquence,
            StatKey::Acting => &mut self.acting,
            StatKey::Fitness => &mut self.fitness,
            StatKey::Aesthetics => &mut self.aesthetics,
        }
    }

    /// Sum of the six track levels; reputation is not part of it.
    #[must_use]
    pub fn total_level(&self) -> u32 {
        StatKey::ALL
            .iter()
            .fold(0u32, |sum, key| sum.saturating_add(self.track(*key).level))
    }
}
