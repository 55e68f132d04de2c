//! Centralized balance and tuning constants for the Limelight progression math.
//!
//! These values define the deterministic arithmetic of both progression
//! tracks. Keeping them together ensures the curves and rewards can only be
//! adjusted via code changes reviewed in version control.

// Seniority curve ----------------------------------------------------------
pub(crate) const ACCOUNT_BASE_COST: i64 = 200;
pub(crate) const ACCOUNT_COST_GROWTH: f64 = 1.4;
pub(crate) const ACCOUNT_CURVE_MEMO: usize = 64;

// Stat curve ---------------------------------------------------------------
pub(crate) const STAT_BASE_COST: i64 = 5_000;
pub(crate) const STAT_COST_STEP: i64 = 120;
pub(crate) const STAT_CURVE_MEMO: usize = 128;

// Activity rewards ---------------------------------------------------------
pub(crate) const MESSAGE_XP_MIN: i64 = 3;
pub(crate) const MESSAGE_XP_MAX: i64 = 5;

// Training rewards ---------------------------------------------------------
pub(crate) const TRAINING_XP_MIN: i64 = 750;
pub(crate) const TRAINING_XP_MAX: i64 = 1_250;
pub(crate) const STUDY_MULTIPLIER: f64 = 1.10;
pub(crate) const TEACHING_MULTIPLIER: f64 = 1.05;
pub(crate) const NEUTRAL_MULTIPLIER: f64 = 1.0;

// Creation bonuses ---------------------------------------------------------
pub(crate) const SIGNATURE_STAT_LEVEL: u32 = 3;
pub(crate) const TEACHING_STAT_LEVEL: u32 = 2;
pub(crate) const REPUTATION_DEFAULT: i32 = 500;
pub(crate) const REPUTATION_INFLUENCER: i32 = 1_000;

// Tier boundaries ----------------------------------------------------------
pub(crate) const RISING_MIN_LEVEL: u32 = 10;
pub(crate) const YAPPER_MIN_LEVEL: u32 = 20;
pub(crate) const VETERAN_MIN_LEVEL: u32 = 30;

// Tier character quotas ----------------------------------------------------
pub(crate) const NEWCOMER_QUOTA: u32 = 3;
pub(crate) const RISING_QUOTA: u32 = 4;
pub(crate) const YAPPER_QUOTA: u32 = 5;

// Engine internals ---------------------------------------------------------
pub(crate) const LOCK_STRIPES: usize = 64;
