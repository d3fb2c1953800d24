//! Layered confidence scoring for extracted runway sets.

use std::collections::BTreeSet;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::designator::Designator;

/// Phrase data the scorer is built from.
///
/// Injected at engine construction so tests can substitute alternate
/// lists; the defaults are calibrated against human-review outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringRules {
    /// Textbook phrasings that are reliably parsed — terminal 1.0.
    pub textbook_phrasings: Vec<String>,
    /// Phrasings known to produce incomplete parses — cap the score at 0.7.
    pub ambiguous_phrasings: Vec<String>,
    /// Substrings marking arrival context.
    pub arrival_keywords: Vec<String>,
    /// Substrings marking departure context.
    pub departure_keywords: Vec<String>,
}

impl Default for ScoringRules {
    fn default() -> Self {
        let strs = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        Self {
            textbook_phrasings: strs(&[
                r"ILS\s+(?:RWYS?|RYS|RY)\s+[0-9]{1,2}[LCR]?\s+(?:APCH|APPROACH)\s+IN\s+USE",
                r"VISUAL\s+(?:APCH|APPROACH)\s+(?:RWYS?|RYS|RY)\s+[0-9]{1,2}[LCR]?\s+IN\s+USE",
                r"(?:SIMUL|SIMULTANEOUS)\s+VISUAL\s+APPROACHES\s+(?:RWYS?|RYS|RY)",
                r"PARL\s+ILS\s+(?:RWYS?|RYS|RY)",
            ]),
            ambiguous_phrasings: strs(&[
                r"LANDING\s+AND\s+DEPARTING",
                r"SIMUL.*(?:APCH|APPROACH).*TO\s+(?:RWYS?|RYS|RY)\s*,",
            ]),
            arrival_keywords: strs(&[
                "LANDING", "APPROACH", "APCH", "ARRIVALS", "ARVNG", "ILS", "VISUAL", "RNAV",
            ]),
            // Trailing space on "DEP " keeps DEPICTED/DEPTH-style words from
            // counting as departure context.
            departure_keywords: strs(&["DEPG", "DEP ", "DEPARTURE", "DEPARTING", "TAKEOFF"]),
        }
    }
}

/// Compiled confidence scorer.
pub struct ConfidenceScorer {
    textbook: Vec<Regex>,
    ambiguous: Vec<Regex>,
    arrival_keywords: Vec<String>,
    departure_keywords: Vec<String>,
}

impl Default for ConfidenceScorer {
    fn default() -> Self {
        Self::new(&ScoringRules::default())
    }
}

impl ConfidenceScorer {
    /// Compile the scorer from phrase data. Patterns that fail to compile
    /// are skipped rather than taking the scorer down.
    pub fn new(rules: &ScoringRules) -> Self {
        let compile = |sources: &[String]| {
            sources
                .iter()
                .filter_map(|source| Regex::new(source).ok())
                .collect()
        };
        Self {
            textbook: compile(&rules.textbook_phrasings),
            ambiguous: compile(&rules.ambiguous_phrasings),
            arrival_keywords: rules.arrival_keywords.clone(),
            departure_keywords: rules.departure_keywords.clone(),
        }
    }

    /// Score an extraction in `[0.0, 1.0]`.
    ///
    /// Evaluation order: empty extraction is terminal 0.0; a textbook
    /// phrasing is terminal 1.0; both sets with both keyword classes is
    /// terminal 1.0; remaining cases start from 0.9 / 0.8 / 0.6 and a
    /// known-ambiguous phrasing caps the result at 0.7. Split-half and
    /// allow-list overrides are the parser's responsibility, applied after
    /// this score.
    pub fn score(
        &self,
        arrivals: &BTreeSet<Designator>,
        departures: &BTreeSet<Designator>,
        text: &str,
    ) -> f64 {
        if arrivals.is_empty() && departures.is_empty() {
            return 0.0;
        }

        let upper = text.to_ascii_uppercase();

        if self.textbook.iter().any(|p| p.is_match(&upper)) {
            return 1.0;
        }

        let has_arrival_kw = self.arrival_keywords.iter().any(|k| upper.contains(k));
        let has_departure_kw = self.departure_keywords.iter().any(|k| upper.contains(k));

        let mut confidence: f64 = if !arrivals.is_empty() && !departures.is_empty() {
            if has_arrival_kw && has_departure_kw {
                return 1.0;
            }
            0.9
        } else if (!arrivals.is_empty() && has_arrival_kw)
            || (!departures.is_empty() && has_departure_kw)
        {
            0.8
        } else {
            0.6
        };

        if self.ambiguous.iter().any(|p| p.is_match(&upper)) {
            confidence = confidence.min(0.7);
        }

        confidence
    }
}
