//! Engine assembly: normalization, extraction, classification, and scoring
//! behind one parse call.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::confidence::{ConfidenceScorer, ScoringRules};
use crate::domain::configuration::{Broadcast, MergeMeta, RunwayConfiguration};
use crate::domain::designator::Designator;
use crate::domain::flow::determine_traffic_flow;
use crate::domain::issue::Issue;
use crate::extract::Extractor;
use crate::normalize::Normalizer;
use crate::obs;
use crate::split::{classify, BroadcastScope};
use crate::validate::validate_configuration;

/// A named runway layout for one airport (e.g. KSEA's south flow).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunwayLayout {
    pub label: String,
    pub runways: Vec<Designator>,
}

/// Immutable engine configuration, injected at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Airports known to publish arrival-only broadcasts; an empty
    /// departure set there is expected, not an extraction gap.
    pub arrival_only_airports: BTreeSet<String>,
    /// Named configurations per airport, checked in order.
    pub airport_layouts: BTreeMap<String, Vec<RunwayLayout>>,
    pub scoring: ScoringRules,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let airports = |codes: &[&str]| codes.iter().map(|c| c.to_string()).collect();
        let layout = |label: &str, runways: &[&str]| RunwayLayout {
            label: label.to_string(),
            runways: runways
                .iter()
                .map(|r| r.parse().expect("static layout designator"))
                .collect(),
        };

        let mut airport_layouts = BTreeMap::new();
        airport_layouts.insert(
            "KSEA".to_string(),
            vec![
                layout("South", &["16L", "16C", "16R"]),
                layout("North", &["34L", "34C", "34R"]),
            ],
        );
        airport_layouts.insert(
            "KSFO".to_string(),
            vec![
                layout("West", &["28L", "28R"]),
                layout("East", &["10L", "10R"]),
                layout("Southeast", &["19L", "19R"]),
                layout("Northwest", &["1L", "1R"]),
            ],
        );
        airport_layouts.insert(
            "KLAX".to_string(),
            vec![
                layout("West", &["24L", "24R", "25L", "25R"]),
                layout("East", &["6L", "6R", "7L", "7R"]),
            ],
        );

        Self {
            arrival_only_airports: airports(&[
                "KADW", "KALB", "KRSW", "KPVD", "KOAK", "KPDX", "KDAL", "KCMH", "KAUS", "KFLL",
                "KIND", "KTPA", "KTUL", "KBWI", "KJFK", "KBOS", "KORD", "KGSO", "KLIT", "KMCI",
                "KCHS", "KMDW", "KPHL", "KPIT", "KPBI", "KIAH", "KHOU", "KRDU", "KMIA", "KSNA",
                "KSLC", "KOKC", "KSDF", "KSMF",
            ]),
            airport_layouts,
            scoring: ScoringRules::default(),
        }
    }
}

/// The runway-configuration extraction engine.
///
/// Pure and synchronous: every entry point is a deterministic function of
/// its inputs, so parsers can be shared across threads and broadcasts
/// processed in parallel.
pub struct RunwayParser {
    normalizer: Normalizer,
    extractor: Extractor,
    scorer: ConfidenceScorer,
    config: EngineConfig,
}

impl Default for RunwayParser {
    fn default() -> Self {
        Self::new()
    }
}

impl RunwayParser {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            normalizer: Normalizer::new(),
            extractor: Extractor::new(),
            scorer: ConfidenceScorer::new(&config.scoring),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Parse a broadcast, stamping the configuration with the current time.
    pub fn parse(
        &self,
        airport_code: &str,
        raw_text: &str,
        information_letter: Option<char>,
    ) -> RunwayConfiguration {
        self.parse_at(airport_code, raw_text, information_letter, Utc::now())
    }

    /// Parse a captured [`Broadcast`], keeping its capture time and source id.
    pub fn parse_broadcast(&self, broadcast: &Broadcast) -> RunwayConfiguration {
        let mut config = self.parse_at(
            &broadcast.airport_code,
            &broadcast.raw_text,
            broadcast.information_letter,
            broadcast.captured_at,
        );
        config.source = Some(broadcast.id);
        config
    }

    /// Parse with an explicit timestamp. Deterministic: identical inputs
    /// produce identical configurations.
    pub fn parse_at(
        &self,
        airport_code: &str,
        raw_text: &str,
        information_letter: Option<char>,
        now: DateTime<Utc>,
    ) -> RunwayConfiguration {
        let _span = obs::ParseSpan::enter(airport_code);

        let normalized = self.normalizer.normalize(raw_text);
        let upper = normalized.to_ascii_uppercase();

        // Header detection uses the original text; the normalizer may have
        // stripped the header region.
        let scope = classify(raw_text);

        let explicit_both = upper.contains("LANDING AND DEPARTING")
            || upper.contains("LNDG AND DEPG")
            || upper.contains("LNDG/DEPG");

        let mut arrivals = self.extractor.extract_arrivals(&normalized);
        let mut departures = self.extractor.extract_departures(&normalized);

        // An explicit dual-operation statement names one runway set for
        // both flows; it overrides whatever the per-operation rules found.
        if explicit_both {
            let combined = self.extractor.extract_combined(&normalized);
            if !combined.is_empty() {
                arrivals = combined.clone();
                departures = combined;
            }
        }

        match scope {
            BroadcastScope::ArrivalHalf => {
                if arrivals.is_empty() {
                    let combined = self.extractor.extract_combined(&normalized);
                    if !combined.is_empty() {
                        arrivals = combined;
                    }
                }
                // Any departure match in an arrival half is a false
                // positive; the real departures come from the counterpart.
                departures.clear();
            }
            BroadcastScope::DepartureHalf => {
                arrivals.clear();
            }
            BroadcastScope::Unsplit => {}
        }

        // Last-resort fallback: combined rules only when nothing at all was
        // found and no special handling claimed the broadcast.
        if arrivals.is_empty()
            && departures.is_empty()
            && scope == BroadcastScope::Unsplit
            && !explicit_both
        {
            let combined = self.extractor.extract_combined(&normalized);
            arrivals = combined.clone();
            departures = combined;
        }

        let traffic_flow = determine_traffic_flow(&arrivals, &departures);
        let configuration_name = self.configuration_name(airport_code, &arrivals, &departures);

        let mut confidence = self.scorer.score(&arrivals, &departures, &normalized);

        // A well-formed half is complete on its own terms.
        if scope.is_split() {
            if scope == BroadcastScope::ArrivalHalf
                && !arrivals.is_empty()
                && departures.is_empty()
            {
                confidence = 1.0;
            } else if scope == BroadcastScope::DepartureHalf
                && !departures.is_empty()
                && arrivals.is_empty()
            {
                confidence = 1.0;
            } else if !arrivals.is_empty() && !departures.is_empty() {
                confidence = 1.0;
            }
        }

        if self.config.arrival_only_airports.contains(airport_code)
            && !arrivals.is_empty()
            && departures.is_empty()
        {
            confidence = 1.0;
        }

        obs::emit_parse_completed(
            airport_code,
            arrivals.len(),
            departures.len(),
            traffic_flow,
            confidence,
        );

        RunwayConfiguration {
            airport_code: airport_code.to_string(),
            timestamp: now,
            information_letter,
            arrivals,
            departures,
            traffic_flow,
            configuration_name,
            confidence,
            raw_text: raw_text.to_string(),
            merge: MergeMeta::default(),
            source: None,
        }
    }

    /// Check a configuration for structural anomalies.
    pub fn validate(&self, config: &RunwayConfiguration) -> Vec<Issue> {
        let issues = validate_configuration(config, &self.config.arrival_only_airports);
        if !issues.is_empty() {
            obs::emit_issues_found(&config.airport_code, issues.len());
        }
        issues
    }

    /// Airport-specific configuration label, when the active set overlaps a
    /// known layout.
    pub fn configuration_name(
        &self,
        airport_code: &str,
        arrivals: &BTreeSet<Designator>,
        departures: &BTreeSet<Designator>,
    ) -> Option<String> {
        let layouts = self.config.airport_layouts.get(airport_code)?;
        let all: BTreeSet<&Designator> = arrivals.iter().chain(departures.iter()).collect();
        layouts
            .iter()
            .find(|layout| layout.runways.iter().any(|r| all.contains(r)))
            .map(|layout| format!("{} Flow", layout.label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<Designator> {
        items.iter().map(|s| s.parse().unwrap()).collect()
    }

    fn names(set: &BTreeSet<Designator>) -> Vec<String> {
        set.iter().map(|d| d.to_string()).collect()
    }

    #[test]
    fn test_configuration_name_lookup() {
        let parser = RunwayParser::new();
        assert_eq!(
            parser.configuration_name("KSEA", &set(&["16L"]), &set(&[])),
            Some("South Flow".into())
        );
        assert_eq!(
            parser.configuration_name("KSEA", &set(&[]), &set(&["34C"])),
            Some("North Flow".into())
        );
        assert_eq!(parser.configuration_name("KSEA", &set(&["9"]), &set(&[])), None);
        assert_eq!(parser.configuration_name("KDEN", &set(&["16L"]), &set(&[])), None);
    }

    #[test]
    fn test_explicit_both_overrides_per_operation_matches() {
        let parser = RunwayParser::new();
        // The arrival rule sees "ILS, RWY 16 IN USE" but the explicit
        // dual-operation statement owns the final word.
        let config = parser.parse("KXXX", "ILS, RWY 16 IN USE. LANDING AND DEPARTING 16.", None);
        assert_eq!(names(&config.arrivals), ["16"]);
        assert_eq!(names(&config.departures), ["16"]);
    }

    #[test]
    fn test_combined_fallback_only_when_both_empty() {
        let parser = RunwayParser::new();
        // Arrivals found explicitly: the generic "RWYS IN USE" combined
        // rule must not fill departures.
        let config = parser.parse("KADW", "ILS RWY 19R APPROACH IN USE", None);
        assert_eq!(names(&config.arrivals), ["19R"]);
        assert!(config.departures.is_empty());
    }

    #[test]
    fn test_arrival_only_airport_confidence_boost() {
        let parser = RunwayParser::new();
        let config = parser.parse("KPDX", "LANDING RWY 28L", None);
        assert_eq!(names(&config.arrivals), ["28L"]);
        assert!(config.departures.is_empty());
        assert_eq!(config.confidence, 1.0);
        assert!(parser.validate(&config).is_empty());
    }

    #[test]
    fn test_same_text_different_airport_not_boosted() {
        let parser = RunwayParser::new();
        let config = parser.parse("KXXX", "LANDING RWY 28L", None);
        assert_eq!(config.confidence, 0.8);
    }

    #[test]
    fn test_parse_broadcast_keeps_capture_time_and_source() {
        use uuid::Uuid;
        let parser = RunwayParser::new();
        let broadcast = Broadcast {
            id: Uuid::new_v4(),
            airport_code: "KSEA".into(),
            captured_at: "2025-11-04T12:00:00Z".parse().unwrap(),
            information_letter: Some('C'),
            raw_text: "LANDING RWY 16L DEPARTING RWY 16R".into(),
        };
        let config = parser.parse_broadcast(&broadcast);
        assert_eq!(config.timestamp, broadcast.captured_at);
        assert_eq!(config.source, Some(broadcast.id));
        assert_eq!(config.information_letter, Some('C'));
    }

    #[test]
    fn test_custom_allow_list_is_injected() {
        let mut config = EngineConfig::default();
        config.arrival_only_airports = set_of(&["KTST"]);
        let parser = RunwayParser::with_config(config);
        let parsed = parser.parse("KTST", "LANDING RWY 9", None);
        assert_eq!(parsed.confidence, 1.0);
        assert!(parser.validate(&parsed).is_empty());
    }

    fn set_of(codes: &[&str]) -> BTreeSet<String> {
        codes.iter().map(|c| c.to_string()).collect()
    }
}
