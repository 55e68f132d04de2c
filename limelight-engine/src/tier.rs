//! Seniority tiers, the character quota each grants, and display labels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{
    NEWCOMER_QUOTA, RISING_MIN_LEVEL, RISING_QUOTA, VETERAN_MIN_LEVEL, YAPPER_MIN_LEVEL,
    YAPPER_QUOTA,
};

/// Named band of seniority levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Newcomer,
    Rising,
    Yapper,
    Veteran,
}

impl Tier {
    /// Tier containing `level`. Levels start at 1; 0 falls into the first band.
    #[must_use]
    pub const fn for_level(level: u32) -> Self {
        if level >= VETERAN_MIN_LEVEL {
            Self::Veteran
        } else if level >= YAPPER_MIN_LEVEL {
            Self::Yapper
        } else if level >= RISING_MIN_LEVEL {
            Self::Rising
        } else {
            Self::Newcomer
        }
    }

    /// How many live characters this tier allows an account to hold.
    #[must_use]
    pub const fn quota(self) -> CharacterQuota {
        match self {
            Self::Newcomer => CharacterQuota::Limited(NEWCOMER_QUOTA),
            Self::Rising => CharacterQuota::Limited(RISING_QUOTA),
            Self::Yapper => CharacterQuota::Limited(YAPPER_QUOTA),
            Self::Veteran => CharacterQuota::Unlimited,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newcomer => "newcomer",
            Self::Rising => "rising",
            Self::Yapper => "yapper",
            Self::Veteran => "veteran",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newcomer" => Ok(Self::Newcomer),
            "rising" => Ok(Self::Rising),
            "yapper" => Ok(Self::Yapper),
            "veteran" => Ok(Self::Veteran),
            _ => Err(()),
        }
    }
}

/// Character allowance granted by a tier.
///
/// The top tier is genuinely unbounded; it is a sentinel variant, never some
/// large finite number an account could reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterQuota {
    Limited(u32),
    Unlimited,
}

impl CharacterQuota {
    /// Whether `live_count` existing characters leave room for one more.
    #[must_use]
    pub const fn allows(self, live_count: u32) -> bool {
        match self {
            Self::Limited(limit) => live_count < limit,
            Self::Unlimited => true,
        }
    }

    /// The finite limit, if there is one.
    #[must_use]
    pub const fn limit(self) -> Option<u32> {
        match self {
            Self::Limited(limit) => Some(limit),
            Self::Unlimited => None,
        }
    }
}

/// Display labels for the four tiers.
///
/// Labels are presentation data; no rule in the engine branches on them.
/// The defaults reproduce the community's historical role names, including
/// the informal top-tier phrase, which is why the veteran label is free text
/// rather than a hard-coded word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierLabels {
    #[serde(default = "TierLabels::default_newcomer")]
    pub newcomer: String,
    #[serde(default = "TierLabels::default_rising")]
    pub rising: String,
    #[serde(default = "TierLabels::default_yapper")]
    pub yapper: String,
    #[serde(default = "TierLabels::default_veteran")]
    pub veteran: String,
}

impl TierLabels {
    /// Label shown for `tier`.
    #[must_use]
    pub fn label(&self, tier: Tier) -> &str {
        match tier {
            Tier::Newcomer => &self.newcomer,
            Tier::Rising => &self.rising,
            Tier::Yapper => &self.yapper,
            Tier::Veteran => &self.veteran,
        }
    }

    /// Parse labels from a JSON object; absent fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error when `raw` is not a valid JSON object.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    fn default_newcomer() -> String {
        "newcomer".to_string()
    }

    fn default_rising() -> String {
        "rising".to_string()
    }

    fn default_yapper() -> String {
        "yapper".to_string()
    }

    fn default_veteran() -> String {
        "go outside touch some grass".to_string()
    }
}

impl Default for TierLabels {
    fn default() -> Self {
        Self {
            newcomer: Self::default_newcomer(),
            rising: Self::default_rising(),
            yapper: Self::default_yapper(),
            veteran: Self::default_veteran(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_partition_into_four_bands() {
        assert_eq!(Tier::for_level(1), Tier::Newcomer);
        assert_eq!(Tier::for_level(9), Tier::Newcomer);
        assert_eq!(Tier::for_level(10), Tier::Rising);
        assert_eq!(Tier::for_level(19), Tier::Rising);
        assert_eq!(Tier::for_level(20), Tier::Yapper);
        assert_eq!(Tier::for_level(29), Tier::Yapper);
        assert_eq!(Tier::for_level(30), Tier::Veteran);
        assert_eq!(Tier::for_level(u32::MAX), Tier::Veteran);
    }

    #[test]
    fn level_zero_counts_as_newcomer() {
        assert_eq!(Tier::for_level(0), Tier::Newcomer);
    }

    #[test]
    fn quotas_grow_with_tier_and_top_out_unbounded() {
        assert_eq!(Tier::Newcomer.quota(), CharacterQuota::Limited(3));
        assert_eq!(Tier::Rising.quota(), CharacterQuota::Limited(4));
        assert_eq!(Tier::Yapper.quota(), CharacterQuota::Limited(5));
        assert_eq!(Tier::Veteran.quota(), CharacterQuota::Unlimited);
    }

    #[test]
    fn quota_allows_up_to_the_limit() {
        let quota = Tier::Newcomer.quota();
        assert!(quota.allows(0));
        assert!(quota.allows(2));
        assert!(!quota.allows(3));
        assert!(!quota.allows(10));
        assert!(CharacterQuota::Unlimited.allows(u32::MAX));
    }

    #[test]
    fn tier_strings_round_trip() {
        for tier in [Tier::Newcomer, Tier::Rising, Tier::Yapper, Tier::Veteran] {
            assert_eq!(tier.as_str().parse::<Tier>(), Ok(tier));
        }
        assert!("elder".parse::<Tier>().is_err());
    }

    #[test]
    fn default_labels_keep_the_historical_names() {
        let labels = TierLabels::default();
        assert_eq!(labels.label(Tier::Newcomer), "newcomer");
        assert_eq!(labels.label(Tier::Veteran), "go outside touch some grass");
    }

    #[test]
    fn labels_parse_with_partial_overrides() {
        let labels = TierLabels::from_json(r#"{"veteran": "ancient one"}"#).unwrap();
        assert_eq!(labels.label(Tier::Veteran), "ancient one");
        assert_eq!(labels.label(Tier::Rising), "rising");
        let defaults = TierLabels::from_json("{}").unwrap();
        assert_eq!(defaults, TierLabels::default());
    }
}
