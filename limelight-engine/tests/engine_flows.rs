use limelight_engine::{
    AccountId, AccountRecord, EngineError, MemoryStore, ProgressStore, ProgressionEngine,
    Specialty, StatKey, Tier, TierLabels,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;

fn engine() -> ProgressionEngine<MemoryStore> {
    ProgressionEngine::new(MemoryStore::new())
}

/// Engine whose store already holds an account at the given level.
fn engine_with_member(level: u32) -> (ProgressionEngine<MemoryStore>, AccountId) {
    let engine = engine();
    let account = AccountId(1);
    let mut record = AccountRecord::new(account, "Astra");
    record.level = level;
    engine.store().put_account(&record).unwrap();
    (engine, account)
}

#[test]
fn a_member_season_is_deterministic() {
    let run = || {
        let engine = engine();
        let mut rng = SmallRng::seed_from_u64(0x5EA50);
        for _ in 0..500 {
            engine.record_activity(AccountId(1), "Astra", &mut rng).unwrap();
        }
        engine.create_character(AccountId(1), "Nova", Specialty::Singer).unwrap();
        for _ in 0..12 {
            engine.train(AccountId(1), "Nova", StatKey::Chant, &mut rng).unwrap();
        }
        let summary = engine.account_summary(AccountId(1)).unwrap().unwrap();
        let sheet = engine.character_sheet(AccountId(1), "Nova").unwrap();
        (summary, sheet)
    };

    let (first_summary, first_sheet) = run();
    let (second_summary, second_sheet) = run();
    assert_eq!(first_summary, second_summary);
    assert_eq!(first_sheet, second_sheet);
    assert_eq!(first_summary.messages, 500);
    assert!(first_summary.xp < first_summary.next_level_cost);
    assert_eq!(Tier::for_level(first_summary.level), first_summary.tier);
}

#[test]
fn quotas_expand_with_seniority() {
    let (engine, owner) = engine_with_member(12);
    for name in ["Ash", "Briar", "Cleo", "Dot"] {
        engine.create_character(owner, name, Specialty::Student).unwrap();
    }
    let err = engine
        .create_character(owner, "Elm", Specialty::Student)
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::QuotaExceeded { tier: Tier::Rising, limit: 4 }
    ));

    let (engine, owner) = engine_with_member(25);
    for name in ["Ash", "Briar", "Cleo", "Dot", "Elm"] {
        engine.create_character(owner, name, Specialty::Student).unwrap();
    }
    let err = engine
        .create_character(owner, "Fern", Specialty::Student)
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::QuotaExceeded { tier: Tier::Yapper, limit: 5 }
    ));
}

#[test]
fn veterans_create_without_limit() {
    let (engine, owner) = engine_with_member(30);
    for index in 0..12 {
        engine
            .create_character(owner, &format!("extra-{index}"), Specialty::Student)
            .unwrap();
    }
    assert_eq!(engine.characters_overview(owner).unwrap().len(), 12);
}

#[test]
fn training_grind_levels_the_stat() {
    let (engine, owner) = engine_with_member(1);
    engine.create_character(owner, "Sam", Specialty::Student).unwrap();
    let mut rng = SmallRng::seed_from_u64(0x6A17);
    let mut levels_gained = 0;
    for _ in 0..30 {
        let outcome = engine.train(owner, "Sam", StatKey::Chant, &mut rng).unwrap();
        assert_eq!(outcome.events().len(), 1);
        levels_gained += outcome.levels_gained;
    }
    assert!(levels_gained >= 2, "thirty boosted sessions clear two thresholds");
    let sheet = engine.character_sheet(owner, "Sam").unwrap();
    let chant = &sheet.stats[0];
    assert_eq!(chant.stat, StatKey::Chant);
    assert_eq!(chant.level, 1 + levels_gained);
    assert!(chant.xp < chant.next_level_cost);
    assert_eq!(sheet.total_level, 5 + chant.level);
}

#[test]
fn reset_frees_names_for_reuse() {
    let (engine, owner) = engine_with_member(1);
    engine.create_character(owner, "Nova", Specialty::Singer).unwrap();
    let outcome = engine.reset_account(owner).unwrap();
    assert!(outcome.account_deleted);
    assert_eq!(outcome.characters_deleted, 1);

    let mut rng = SmallRng::seed_from_u64(1);
    engine.record_activity(owner, "Astra", &mut rng).unwrap();
    engine.create_character(owner, "Nova", Specialty::Dancer).unwrap();
    let sheet = engine.character_sheet(owner, "Nova").unwrap();
    assert_eq!(sheet.specialty_label, "Dancer");
}

#[test]
fn configured_labels_flow_into_reports() {
    let labels = TierLabels::from_json(r#"{"veteran":"hall of fame"}"#).unwrap();
    let engine = ProgressionEngine::with_labels(MemoryStore::new(), labels);
    let mut record = AccountRecord::new(AccountId(1), "Astra");
    record.level = 31;
    engine.store().put_account(&record).unwrap();

    let summary = engine.account_summary(AccountId(1)).unwrap().unwrap();
    assert_eq!(summary.tier, Tier::Veteran);
    assert_eq!(summary.tier_label, "hall of fame");
    let rows = engine.leaderboard(5).unwrap();
    assert_eq!(rows[0].tier_label, "hall of fame");
}

#[test]
fn custom_specialties_ride_the_label_rules() {
    let (engine, owner) = engine_with_member(1);
    engine
        .create_character(
            owner,
            "Iris",
            Specialty::Custom("Dance Teacher on weekends".to_string()),
        )
        .unwrap();
    let sheet = engine.character_sheet(owner, "Iris").unwrap();
    assert_eq!(sheet.stats[1].stat, StatKey::Dance);
    assert_eq!(sheet.stats[1].level, 2);

    let mut rng = SmallRng::seed_from_u64(9);
    let outcome = engine.train(owner, "Iris", StatKey::Dance, &mut rng).unwrap();
    assert!((outcome.multiplier - 1.05).abs() < f64::EPSILON);
    let outcome = engine.train(owner, "Iris", StatKey::Chant, &mut rng).unwrap();
    assert!((outcome.multiplier - 1.0).abs() < f64::EPSILON);
}
