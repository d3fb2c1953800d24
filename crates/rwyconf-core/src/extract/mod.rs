//! Candidate runway extraction from normalized broadcast text.
//!
//! Three independent rule collections recover arrival, departure, and
//! ambiguous/combined designators. Before the arrival rules run, text that
//! structurally belongs to a departure statement is stripped so a phrase
//! like `ARRIVALS RWY 3, 8. DEPG RWY 8` cannot contaminate the arrival
//! set; departure extraction strips arrival statements symmetrically.
//! Combined rules always see the unmodified text — the caller decides when
//! their result applies.

pub mod rules;

use std::collections::BTreeSet;

use regex::Regex;

use crate::domain::designator::Designator;
use rules::{preceded_by_any, ExtractionRule, RuleOutcome, RuleSet};

fn rx(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static extraction pattern")
}

/// A statement-removal pattern with the same context guards the extraction
/// rules use: a guarded occurrence is part of a combined statement and must
/// survive the strip.
struct Stripper {
    pattern: Regex,
    keep_after: &'static [&'static str],
}

impl Stripper {
    fn new(pattern: &str) -> Self {
        Self {
            pattern: rx(pattern),
            keep_after: &[],
        }
    }

    fn guarded(pattern: &str, keep_after: &'static [&'static str]) -> Self {
        Self {
            pattern: rx(pattern),
            keep_after,
        }
    }

    fn strip(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut copied_to = 0;
        for m in self.pattern.find_iter(text) {
            if preceded_by_any(text, m.start(), self.keep_after) {
                continue;
            }
            out.push_str(&text[copied_to..m.start()]);
            copied_to = m.end();
        }
        out.push_str(&text[copied_to..]);
        out
    }
}

// Fragments marking a departure keyword as part of a combined or arrival
// statement rather than a standalone departure one.
const ARRIVAL_CONTEXT: &[&str] = &[
    "LNDG ",
    "LANDING ",
    "ARVNG ",
    "LAND ",
    "LDG ",
    "AND ",
    "LNDG/",
    "LANDING/",
];

/// Pattern extractor over normalized broadcast text.
pub struct Extractor {
    arrival: RuleSet,
    departure: RuleSet,
    combined: RuleSet,
    /// Runs against the unstripped text: an elliptical approach phrase
    /// immediately followed by a departure clause loses its departure
    /// keyword during stripping, so it must be captured first.
    elliptical_arrival: ExtractionRule,
    departure_strippers: Vec<Stripper>,
    arrival_strippers: Vec<Stripper>,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor {
    pub fn new() -> Self {
        let designator_list =
            r"[0-9]{1,2}[LCR]?\b(?:(?:\s*,\s*|\s+AND\s+|\s+OR\s+|\s+)(?:(?:RWYS?|RYS|RY)\s+)?[0-9]{1,2}[LCR]?\b)*";

        let departure_strippers = vec![
            Stripper::guarded(
                &format!(
                    r"(?i)(?:DEPG|DEP|DEPARTURE|DEPARTING|DERARTING|DEPS|DEPARTURES)\s+(?:RWYS?|RYS|RY)\s+{designator_list}"
                ),
                ARRIVAL_CONTEXT,
            ),
            Stripper::new(&format!(
                r"(?i)(?:TAKEOFF|TKOF|TAKE\s+OFF)\s+(?:RWYS?|RYS|RY)\s+{designator_list}"
            )),
            Stripper::guarded(
                r"(?i)(?:DEPG|DEP)\s+[0-9]{1,2}[LCR]?\b(?:\s*,\s*[0-9]{1,2}[LCR]?\b)*",
                ARRIVAL_CONTEXT,
            ),
        ];

        let arrival_strippers = vec![
            Stripper::new(&format!(
                r"(?i)(?:ARRIVALS?|LANDING|LNDG|LDG|LAND)\s+(?:EXPECT\s+)?(?:VISUAL\s+)?(?:APCH|APPROACH|APCHS|APPROACHES)?\s*(?:RWYS?|RYS|RY)?\s*{designator_list}"
            )),
            Stripper::new(&format!(
                r"(?i)(?:ARVNG|ARRIVING)\s+(?:RWYS?|RYS|RY)\s+{designator_list}"
            )),
            Stripper::new(&format!(
                r"(?i)(?:ILS|VISUAL|RNAV|VOR|GPS|LOC)\s+(?:OR\s+(?:ILS|VISUAL|RNAV|VOR|GPS|LOC)\s+)?(?:APCH|APPROACH|APCHS|APPROACHES)\s+(?:IN\s+USE\s+)?(?:RWYS?|RYS|RY)\s+{designator_list}"
            )),
            Stripper::new(&format!(
                r"(?i)(?:APCH|APPROACH|APCHS|APPROACHES)\s+IN\s+USE\s+(?:RWYS?|RYS|RY)\s+{designator_list}"
            )),
        ];

        Self {
            arrival: RuleSet::arrival(),
            departure: RuleSet::departure(),
            combined: RuleSet::combined(),
            elliptical_arrival: ExtractionRule::new(
                "elliptical-before-dep",
                r"(?i)(?:ILS|RNAV|VOR|GPS|LOC)\s+(?:(?:RWYS?|RYS|RY)\s+)?([0-9]{1,2}[LCR]?)\s*[,.]\s*DEP\b",
            ),
            departure_strippers,
            arrival_strippers,
        }
    }

    /// Candidate arrival designators.
    pub fn extract_arrivals(&self, text: &str) -> BTreeSet<Designator> {
        let mut out = BTreeSet::new();
        if let RuleOutcome::Extracted(found) = self.elliptical_arrival.apply(text) {
            out.extend(found);
        }
        let stripped = self.strip_departure_statements(text);
        out.extend(self.arrival.extract(&stripped));
        out
    }

    /// Candidate departure designators.
    pub fn extract_departures(&self, text: &str) -> BTreeSet<Designator> {
        let stripped = self.strip_arrival_statements(text);
        self.departure.extract(&stripped)
    }

    /// Candidate designators from ambiguous phrasings, over unmodified text.
    pub fn extract_combined(&self, text: &str) -> BTreeSet<Designator> {
        self.combined.extract(text)
    }

    /// Remove standalone departure statements ahead of arrival extraction.
    pub fn strip_departure_statements(&self, text: &str) -> String {
        let mut out = text.to_string();
        for stripper in &self.departure_strippers {
            out = stripper.strip(&out);
        }
        out
    }

    /// Remove standalone arrival statements ahead of departure extraction.
    pub fn strip_arrival_statements(&self, text: &str) -> String {
        let mut out = text.to_string();
        for stripper in &self.arrival_strippers {
            out = stripper.strip(&out);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(set: &BTreeSet<Designator>) -> Vec<String> {
        set.iter().map(|d| d.to_string()).collect()
    }

    #[test]
    fn test_departure_statement_does_not_contaminate_arrivals() {
        let ex = Extractor::new();
        let arrivals = ex.extract_arrivals("ARRIVALS RWY 3 DEPG RWY 8");
        assert_eq!(names(&arrivals), ["3"]);
    }

    #[test]
    fn test_arrival_statement_does_not_contaminate_departures() {
        let ex = Extractor::new();
        let departures = ex.extract_departures("LANDING RWY 16L DEPARTING RWY 16C");
        assert_eq!(names(&departures), ["16C"]);
    }

    #[test]
    fn test_combined_statement_survives_stripping() {
        let ex = Extractor::new();
        // "LNDG AND DEPG" is one combined statement; the departure stripper
        // must not cut the DEPG clause out of it.
        let stripped = ex.strip_departure_statements("LNDG AND DEPG RWY 4 AND RWY 8");
        assert!(stripped.contains("DEPG"));
    }

    #[test]
    fn test_elliptical_arrival_survives_departure_strip() {
        let ex = Extractor::new();
        let arrivals = ex.extract_arrivals("ILS RWY 27, DEP 33L");
        assert_eq!(names(&arrivals), ["27"]);
        let departures = ex.extract_departures("ILS RWY 27, DEP 33L");
        assert_eq!(names(&departures), ["33L"]);
    }

    #[test]
    fn test_space_separated_lists_both_operations() {
        let ex = Extractor::new();
        let text = "ILS APPROACHES IN USE LANDING RWY 16L 16C AND 16R DEPARTING RWY 16L 16C AND 16R";
        assert_eq!(names(&ex.extract_arrivals(text)), ["16L", "16C", "16R"]);
        assert_eq!(names(&ex.extract_departures(text)), ["16L", "16C", "16R"]);
    }

    #[test]
    fn test_combined_runs_on_unmodified_text() {
        let ex = Extractor::new();
        let combined = ex.extract_combined("RWYS 17L, 17R IN USE");
        assert_eq!(names(&combined), ["17L", "17R"]);
    }

    #[test]
    fn test_no_runway_phrase_extracts_nothing() {
        let ex = Extractor::new();
        let text = "WIND CALM VISIBILITY 10";
        assert!(ex.extract_arrivals(text).is_empty());
        assert!(ex.extract_departures(text).is_empty());
        assert!(ex.extract_combined(text).is_empty());
    }
}
