//! End-to-end parse pipeline tests.

use std::collections::BTreeSet;

use chrono::Utc;
use regex::Regex;

use rwyconf_core::{Designator, Issue, RunwayParser, TrafficFlow};

fn names(set: &BTreeSet<Designator>) -> Vec<String> {
    set.iter().map(|d| d.to_string()).collect()
}

const KSEA_BROADCAST: &str = "SEA ATIS INFO C 0053Z. 11010KT 10SM FEW015 BKN250 11/07 A3012 \
(THREE ZERO ONE TWO) RMK AO2 SLP202. ILS APPROACHES IN USE. LANDING RWY 16L 16C AND 16R. \
DEPARTING RWY 16L 16C AND 16R. NOTAMS: RWY 16L CLSD BTN 0600 AND 1400Z DAILY.";

// ── Full-broadcast extraction ──

#[test]
fn full_broadcast_yields_both_operations() {
    let parser = RunwayParser::new();
    let config = parser.parse("KSEA", KSEA_BROADCAST, Some('C'));

    assert_eq!(names(&config.arrivals), ["16L", "16C", "16R"]);
    assert_eq!(names(&config.departures), ["16L", "16C", "16R"]);
    assert_eq!(config.traffic_flow, TrafficFlow::South);
    assert_eq!(config.confidence, 1.0);
    assert_eq!(config.configuration_name.as_deref(), Some("South Flow"));
    assert!(parser.validate(&config).is_empty());
}

#[test]
fn closed_runway_notam_does_not_leak_into_extraction() {
    let parser = RunwayParser::new();
    let config = parser.parse("KSEA", KSEA_BROADCAST, Some('C'));
    // The NOTAM section mentions 16L CLSD; the closure context and span
    // isolation keep the reciprocal-free set intact.
    assert!(!parser.validate(&config).contains(&Issue::ReciprocalRunways));
    assert_eq!(config.raw_text, KSEA_BROADCAST);
}

// ── Split arrival half ──

#[test]
fn arrival_half_forces_departures_empty_and_full_confidence() {
    let parser = RunwayParser::new();
    let config = parser.parse("KXXX", "KXXX ARR INFO P 2353Z ... LANDING RWY 9L ...", Some('P'));

    assert_eq!(names(&config.arrivals), ["9L"]);
    assert!(config.departures.is_empty());
    assert_eq!(config.confidence, 1.0);
    assert!(parser.validate(&config).is_empty());
}

#[test]
fn departure_half_forces_arrivals_empty() {
    let parser = RunwayParser::new();
    let config = parser.parse(
        "KXXX",
        "KXXX DEP INFO R 2353Z ... LANDING RWY 9L. DEPG RWY 8 ...",
        Some('R'),
    );

    assert!(config.arrivals.is_empty());
    assert_eq!(names(&config.departures), ["8"]);
    assert_eq!(config.confidence, 1.0);
}

#[test]
fn arrival_half_falls_back_to_combined_rules() {
    let parser = RunwayParser::new();
    let config = parser.parse("KXXX", "KXXX ARR INFO Q ... RWYS 17L, 17R IN USE ...", None);
    assert_eq!(names(&config.arrivals), ["17L", "17R"]);
    assert!(config.departures.is_empty());
}

// ── Unrecognized text ──

#[test]
fn no_runway_phrase_yields_empty_zero_confidence() {
    let parser = RunwayParser::new();
    let config = parser.parse("KXXX", "... WIND CALM VISIBILITY 10 ...", None);

    assert!(config.arrivals.is_empty());
    assert!(config.departures.is_empty());
    assert_eq!(config.confidence, 0.0);
    assert_eq!(config.traffic_flow, TrafficFlow::Unknown);

    let issues = parser.validate(&config);
    assert!(issues.contains(&Issue::MissingArrivals));
    assert!(issues.contains(&Issue::MissingDepartures));
    assert!(issues.contains(&Issue::LowConfidence));
}

#[test]
fn engine_never_panics_on_hostile_input() {
    let parser = RunwayParser::new();
    for text in ["", ".", "((((", "RWY", "A0000 ()", "日本語のテキスト RWY 16L", "\u{0}\u{1}"] {
        let config = parser.parse("KXXX", text, None);
        assert!(config.confidence >= 0.0 && config.confidence <= 1.0);
        parser.validate(&config);
    }
}

// ── Reciprocal detection through validate ──

#[test]
fn reciprocal_extraction_is_reported_not_corrected() {
    let parser = RunwayParser::new();
    let config = parser.parse("KXXX", "LANDING RWY 16L. DEPARTING RWY 34L.", None);

    assert_eq!(names(&config.arrivals), ["16L"]);
    assert_eq!(names(&config.departures), ["34L"]);
    assert!(parser.validate(&config).contains(&Issue::ReciprocalRunways));
}

// ── Properties ──

#[test]
fn extracted_designators_always_match_the_grammar() {
    let grammar = Regex::new(r"^([1-9]|[12][0-9]|3[0-6])[LCR]?$").unwrap();
    let parser = RunwayParser::new();
    let texts = [
        KSEA_BROADCAST,
        "ILS RWY 27, DEP 33L",
        "LNDG/DEPG RWYS 4/8",
        "SIMUL DEPS IN USE RY 18R 18C 18L",
        "EXPECT VISUAL APCH RWYS 36C 36L 36R",
        "17L, 17R & 13 IN USE",
        "RWY 37 AND RWY 0 IN USE", // out-of-range numbers must vanish
    ];
    for text in texts {
        let config = parser.parse("KXXX", text, None);
        for d in config.all_runways() {
            assert!(grammar.is_match(&d.to_string()), "bad designator {d}");
        }
    }
}

#[test]
fn parse_is_pure_apart_from_the_timestamp() {
    let parser = RunwayParser::new();
    let now = Utc::now();
    let a = parser.parse_at("KSEA", KSEA_BROADCAST, Some('C'), now);
    let b = parser.parse_at("KSEA", KSEA_BROADCAST, Some('C'), now);
    assert_eq!(a, b);

    let later = parser.parse_at("KSEA", KSEA_BROADCAST, Some('C'), now + chrono::Duration::seconds(30));
    assert_eq!(a.arrivals, later.arrivals);
    assert_eq!(a.departures, later.departures);
    assert_eq!(a.traffic_flow, later.traffic_flow);
    assert_eq!(a.confidence, later.confidence);
    assert_ne!(a.timestamp, later.timestamp);
}

// ── Ambiguous dual-operation phrasing ──

#[test]
fn explicit_dual_operation_statement_overrides_both_sets() {
    let parser = RunwayParser::new();
    let config = parser.parse("KXXX", "ILS, RWY 16 IN USE. LANDING AND DEPARTING 16.", None);
    assert_eq!(names(&config.arrivals), ["16"]);
    assert_eq!(names(&config.departures), ["16"]);
}

#[test]
fn dual_operation_slash_lists_feed_both_sets() {
    let parser = RunwayParser::new();
    let config = parser.parse("KXXX", "LNDG/DEPG RWYS 4/8", None);
    assert_eq!(names(&config.arrivals), ["4", "8"]);
    assert_eq!(names(&config.departures), ["4", "8"]);
}
