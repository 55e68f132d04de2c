//! Specialty catalog and the label-driven bonus rules.
//!
//! Every bonus rule runs against a specialty's display label rather than its
//! variant: archetype labels match exactly, teaching labels match as
//! case-insensitive substrings. Custom labels can therefore earn the same
//! bonuses when their wording overlaps the catalog, long-standing behavior
//! that is pinned by tests rather than tidied up.

use serde::{Deserialize, Serialize};

use crate::account::AccountId;
use crate::constants::{
    NEUTRAL_MULTIPLIER, REPUTATION_DEFAULT, REPUTATION_INFLUENCER, SIGNATURE_STAT_LEVEL,
    STUDY_MULTIPLIER, TEACHING_MULTIPLIER, TEACHING_STAT_LEVEL,
};
use crate::stats::StatKey;

/// Marker every teaching label carries except the physical educator, whose
/// historical role name lacks it and who therefore never earns the teaching
/// training bonus.
const TEACHING_MARKER: &str = "teacher";

/// Label of the study specialty; the training-bonus rule compares against it
/// verbatim.
const STUDY_LABEL: &str = "Student";

/// A character's chosen archetype, fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Specialty {
    Singer,
    Dancer,
    Actor,
    Reporter,
    Coach,
    Model,
    Influencer,
    Student,
    /// Teaching specialty for one stat; the label comes from
    /// [`teaching_label`].
    Teacher(StatKey),
    /// Free-text specialty. Subject to the same label rules as everything
    /// else, overlaps included.
    Custom(String),
}

impl Specialty {
    /// Display label; all bonus and multiplier rules run against this string.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Singer => "Singer",
            Self::Dancer => "Dancer",
            Self::Actor => "Actor",
            Self::Reporter => "Reporter",
            Self::Coach => "Coach",
            Self::Model => "Model",
            Self::Influencer => "Influencer",
            Self::Student => STUDY_LABEL,
            Self::Teacher(stat) => teaching_label(*stat),
            Self::Custom(label) => label,
        }
    }

    /// The fixed catalog as presented by a specialty picker, teaching
    /// entries included. `Custom` is the free-text escape hatch and not
    /// listed.
    #[must_use]
    pub fn catalog() -> Vec<Self> {
        let mut entries = vec![
            Self::Singer,
            Self::Dancer,
            Self::Actor,
            Self::Reporter,
            Self::Coach,
            Self::Model,
            Self::Influencer,
            Self::Student,
        ];
        entries.extend(StatKey::ALL.into_iter().map(Self::Teacher));
        entries
    }
}

/// Label of the teaching specialty attached to a stat.
#[must_use]
pub const fn teaching_label(stat: StatKey) -> &'static str {
    match stat {
        StatKey::Chant => "Singing Teacher",
        StatKey::Dance => "Dance Teacher",
        StatKey::Eloquence => "Journalism Teacher",
        StatKey::Acting => "Drama Teacher",
        StatKey::Fitness => "Physical Educator",
        StatKey::Aesthetics => "Art Teacher",
    }
}

/// Subject keyword the training-bonus rule searches for per stat, lowercase.
const fn stat_keyword(stat: StatKey) -> &'static str {
    match stat {
        StatKey::Chant => "sing",
        StatKey::Dance => "dance",
        StatKey::Eloquence => "journalism",
        StatKey::Acting => "drama",
        StatKey::Fitness => "physical",
        StatKey::Aesthetics => "art",
    }
}

/// Starting package a specialty grants a fresh character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreationBonus {
    /// Stat opened above level 1, if any.
    pub stat: Option<(StatKey, u32)>,
    pub reputation: i32,
}

impl CreationBonus {
    #[must_use]
    pub const fn none() -> Self {
        Self {
            stat: None,
            reputation: REPUTATION_DEFAULT,
        }
    }
}

/// Resolve the starting package for a specialty label.
///
/// Archetypes match their label exactly and open their signature stat at
/// level 3. The influencer starts with doubled reputation instead. Teaching
/// labels match as substrings and open their subject stat at level 2; that
/// check is deliberately the fragile one, so a custom label wrapping a
/// teaching phrase earns the package too. First match wins.
#[must_use]
pub fn creation_bonus(label: &str) -> CreationBonus {
    let signature = [
        ("Singer", StatKey::Chant),
        ("Dancer", StatKey::Dance),
        ("Actor", StatKey::Acting),
        ("Reporter", StatKey::Eloquence),
        ("Coach", StatKey::Fitness),
        ("Model", StatKey::Aesthetics),
    ];
    for (archetype, stat) in signature {
        if label == archetype {
            return CreationBonus {
                stat: Some((stat, SIGNATURE_STAT_LEVEL)),
                reputation: REPUTATION_DEFAULT,
            };
        }
    }
    if label == "Influencer" {
        return CreationBonus {
            stat: None,
            reputation: REPUTATION_INFLUENCER,
        };
    }
    let folded = label.to_lowercase();
    for stat in StatKey::ALL {
        if folded.contains(&teaching_label(stat).to_lowercase()) {
            return CreationBonus {
                stat: Some((stat, TEACHING_STAT_LEVEL)),
                reputation: REPUTATION_DEFAULT,
            };
        }
    }
    CreationBonus::none()
}

/// Training multiplier a specialty label earns on a stat.
///
/// The study label takes 1.10 on every stat. A label carrying the teaching
/// marker takes 1.05 on the stat whose subject keyword it contains, both
/// checks case-insensitive. Everything else trains at face value.
#[must_use]
pub fn training_multiplier(label: &str, stat: StatKey) -> f64 {
    if label == STUDY_LABEL {
        return STUDY_MULTIPLIER;
    }
    let folded = label.to_lowercase();
    if folded.contains(TEACHING_MARKER) && folded.contains(stat_keyword(stat)) {
        return TEACHING_MULTIPLIER;
    }
    NEUTRAL_MULTIPLIER
}

/// Interactive specialty selection boundary.
///
/// The platform layer owns the picker UI; the engine only ever consumes the
/// chosen specialty. Implementations surface their own error for an
/// abandoned or undeliverable selection.
pub trait SpecialtyChooser {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Ask the owner to choose a specialty for the character being created.
    ///
    /// # Errors
    ///
    /// Returns an error when the selection is abandoned or cannot be
    /// collected.
    fn choose(&self, owner: AccountId, name: &str) -> Result<Specialty, Self::Error>;
}
