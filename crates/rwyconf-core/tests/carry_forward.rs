//! Carry-forward matching against the correction stores.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use rwyconf_core::{
    match_carry_forward, Correction, CorrectionHistory, CorrectionSource, Designator,
    MemoryCorrectionStore, PatternCorrection, PatternCorrectionStore, PhraseSignature,
    RunwayParser, SignatureDigest, StoreError, StoreResult,
};

fn set(items: &[&str]) -> BTreeSet<Designator> {
    items.iter().map(|s| s.parse().unwrap()).collect()
}

fn reviewed_correction(
    airport: &str,
    parsed: (&[&str], &[&str]),
    corrected: (&[&str], &[&str]),
    reviewed_at: DateTime<Utc>,
) -> Correction {
    Correction {
        id: Uuid::new_v4(),
        airport_code: airport.into(),
        parsed_arrivals: set(parsed.0),
        parsed_departures: set(parsed.1),
        corrected_arrivals: set(corrected.0),
        corrected_departures: set(corrected.1),
        reviewed_at,
        note: Some("swapped operations".into()),
    }
}

// ── Method 1: recent reviews with an identical parse ──

#[test]
fn one_review_fixes_every_identical_future_parse() {
    let store = MemoryCorrectionStore::new();
    let parser = RunwayParser::new();
    let now = Utc::now();

    // A reviewer decided {5, 23}/{} really meant arrivals 23, departures 5.
    store
        .record_correction(reviewed_correction(
            "KXYZ",
            (&["5", "23"], &[]),
            (&["23"], &["5"]),
            now - Duration::hours(2),
        ))
        .unwrap();

    // A new broadcast reduces to the same ambiguous parse.
    let config = parser.parse_at("KXYZ", "SIMUL VISUAL APCH TO RWYS, 5, 23", None, now);
    assert_eq!(config.arrivals, set(&["5", "23"]));
    assert!(config.departures.is_empty());

    let hit = match_carry_forward(
        &store,
        &store,
        &config.airport_code,
        &config.arrivals,
        &config.departures,
        Some(&config.raw_text),
        now,
    )
    .expect("carry-forward match");

    assert!(matches!(hit.source, CorrectionSource::Review(_)));
    assert_eq!(hit.arrivals, set(&["23"]));
    assert_eq!(hit.departures, set(&["5"]));
}

#[test]
fn set_comparison_ignores_order_and_duplicates() {
    let store = MemoryCorrectionStore::new();
    let now = Utc::now();
    store
        .record_correction(reviewed_correction(
            "KXYZ",
            (&["23", "5"], &["16L", "16R"]),
            (&["23"], &["5"]),
            now - Duration::hours(1),
        ))
        .unwrap();

    let hit = match_carry_forward(
        &store,
        &store,
        "KXYZ",
        &set(&["5", "23", "5"]),
        &set(&["16R", "16L"]),
        None,
        now,
    );
    assert!(hit.is_some());
}

#[test]
fn reviews_older_than_a_day_do_not_apply() {
    let store = MemoryCorrectionStore::new();
    let now = Utc::now();
    store
        .record_correction(reviewed_correction(
            "KXYZ",
            (&["5"], &[]),
            (&["23"], &[]),
            now - Duration::hours(30),
        ))
        .unwrap();

    assert!(match_carry_forward(&store, &store, "KXYZ", &set(&["5"]), &set(&[]), None, now)
        .is_none());
}

#[test]
fn corrections_are_scoped_per_airport() {
    let store = MemoryCorrectionStore::new();
    let now = Utc::now();
    store
        .record_correction(reviewed_correction(
            "KXYZ",
            (&["5"], &[]),
            (&["23"], &[]),
            now - Duration::hours(1),
        ))
        .unwrap();

    assert!(match_carry_forward(&store, &store, "KABC", &set(&["5"]), &set(&[]), None, now)
        .is_none());
}

// ── Method 2: learned phrase patterns ──

#[test]
fn learned_pattern_applies_across_wording_variants() {
    let store = MemoryCorrectionStore::new();
    let text_reviewed = "ILS RWY 16 IN USE. LANDING AND DEPARTING RWY 16.";
    let sig = PhraseSignature::from_text(text_reviewed);
    store
        .upsert_pattern(PatternCorrection {
            id: Uuid::new_v4(),
            airport_code: "KXYZ".into(),
            signature: sig.digest(),
            phrase_key: sig.key(),
            expected_arrivals: set(&["16"]),
            expected_departures: set(&["16"]),
            success_rate: 0.95,
            times_applied: 3,
        })
        .unwrap();

    // Different runway, same phrase structure → same signature.
    let text_new = "ILS RWY 9 IN USE. LANDING AND DEPARTING RWY 9.";
    assert_eq!(PhraseSignature::from_text(text_new).digest(), sig.digest());

    let hit = match_carry_forward(
        &store,
        &store,
        "KXYZ",
        &set(&["9"]),
        &set(&[]),
        Some(text_new),
        Utc::now(),
    )
    .expect("pattern match");
    assert!(matches!(hit.source, CorrectionSource::LearnedPattern(_)));

    let stored = store.lookup("KXYZ", &sig.digest()).unwrap().unwrap();
    assert_eq!(stored.times_applied, 4);
}

#[test]
fn method_two_runs_only_after_method_one_misses() {
    let store = MemoryCorrectionStore::new();
    let now = Utc::now();
    let text = "ILS RWY 16 IN USE";
    let sig = PhraseSignature::from_text(text);

    store
        .record_correction(reviewed_correction(
            "KXYZ",
            (&["16"], &[]),
            (&["16L"], &[]),
            now - Duration::hours(1),
        ))
        .unwrap();
    store
        .upsert_pattern(PatternCorrection {
            id: Uuid::new_v4(),
            airport_code: "KXYZ".into(),
            signature: sig.digest(),
            phrase_key: sig.key(),
            expected_arrivals: set(&["16R"]),
            expected_departures: set(&[]),
            success_rate: 1.0,
            times_applied: 0,
        })
        .unwrap();

    // Method 1 matches first; the pattern counter must stay untouched.
    let hit = match_carry_forward(
        &store,
        &store,
        "KXYZ",
        &set(&["16"]),
        &set(&[]),
        Some(text),
        now,
    )
    .expect("review match");
    assert!(matches!(hit.source, CorrectionSource::Review(_)));
    assert_eq!(hit.arrivals, set(&["16L"]));

    let stored = store.lookup("KXYZ", &sig.digest()).unwrap().unwrap();
    assert_eq!(stored.times_applied, 0);
}

#[test]
fn low_success_patterns_are_not_applied() {
    let store = MemoryCorrectionStore::new();
    let text = "ILS RWY 16 IN USE";
    let sig = PhraseSignature::from_text(text);
    store
        .upsert_pattern(PatternCorrection {
            id: Uuid::new_v4(),
            airport_code: "KXYZ".into(),
            signature: sig.digest(),
            phrase_key: sig.key(),
            expected_arrivals: set(&["16"]),
            expected_departures: set(&[]),
            success_rate: 0.79,
            times_applied: 0,
        })
        .unwrap();

    assert!(match_carry_forward(
        &store,
        &store,
        "KXYZ",
        &set(&["16"]),
        &set(&[]),
        Some(text),
        Utc::now()
    )
    .is_none());
}

// ── Degradation ──

struct BrokenStore;

impl CorrectionHistory for BrokenStore {
    fn reviewed_since(&self, _: &str, _: DateTime<Utc>) -> StoreResult<Vec<Correction>> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
}

impl PatternCorrectionStore for BrokenStore {
    fn lookup(&self, _: &str, _: &SignatureDigest) -> StoreResult<Option<PatternCorrection>> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    fn record_application(&self, _: Uuid) -> StoreResult<()> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
}

#[test]
fn unreachable_stores_degrade_to_no_correction() {
    let broken = BrokenStore;
    let hit = match_carry_forward(
        &broken,
        &broken,
        "KXYZ",
        &set(&["16"]),
        &set(&[]),
        Some("ILS RWY 16 IN USE"),
        Utc::now(),
    );
    assert!(hit.is_none());
}

#[test]
fn empty_stores_degrade_to_no_correction() {
    let store = MemoryCorrectionStore::new();
    assert!(match_carry_forward(
        &store,
        &store,
        "KXYZ",
        &set(&["16"]),
        &set(&[]),
        Some("ILS RWY 16 IN USE"),
        Utc::now()
    )
    .is_none());
}
