//! Pattern rules that recognize runway phrasings and capture designators.
//!
//! Each rule is an independent matcher: it either recognizes one phrasing
//! and yields the designators it mentions, or reports no match. Rules
//! within a collection are unordered — results are set-unioned, never
//! first-match — so the inventories below can grow without coupling.
//!
//! The `regex` crate has no lookaround, so phrasings the source material
//! distinguishes by surrounding context (`DEPG` standing alone vs. inside
//! `LNDG AND DEPG`) carry an explicit context guard: a list of forbidden
//! immediately-preceding fragments checked against the match position.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::domain::designator::Designator;

fn rx(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static extraction pattern")
}

fn token_pattern() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| rx(r"(?i)\b([0-9]{1,2})([LCR])?\b"))
}

/// Collect every valid designator token inside `matched`.
///
/// Tokens outside the 1–36 heading range are dropped here, so a rule can
/// never leak an impossible designator into a result set.
pub(crate) fn harvest_designators(matched: &str, out: &mut BTreeSet<Designator>) {
    for m in token_pattern().find_iter(matched) {
        if let Ok(designator) = m.as_str().parse::<Designator>() {
            out.insert(designator);
        }
    }
}

/// Whether the text leading up to `start` ends with any forbidden fragment.
pub(crate) fn preceded_by_any(text: &str, start: usize, fragments: &[&str]) -> bool {
    let head = &text.as_bytes()[..start];
    fragments.iter().any(|fragment| {
        let fb = fragment.as_bytes();
        head.len() >= fb.len() && head[head.len() - fb.len()..].eq_ignore_ascii_case(fb)
    })
}

/// Outcome of applying one extraction rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    NoMatch,
    Extracted(BTreeSet<Designator>),
}

/// One text-pattern matcher capturing runway designators.
pub struct ExtractionRule {
    name: &'static str,
    pattern: Regex,
    not_preceded_by: &'static [&'static str],
}

impl ExtractionRule {
    pub(crate) fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            pattern: rx(pattern),
            not_preceded_by: &[],
        }
    }

    pub(crate) fn guarded(
        name: &'static str,
        pattern: &str,
        not_preceded_by: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            pattern: rx(pattern),
            not_preceded_by,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Apply this rule to `text`.
    pub fn apply(&self, text: &str) -> RuleOutcome {
        let mut found = BTreeSet::new();
        for m in self.pattern.find_iter(text) {
            if preceded_by_any(text, m.start(), self.not_preceded_by) {
                continue;
            }
            harvest_designators(m.as_str(), &mut found);
        }
        if found.is_empty() {
            RuleOutcome::NoMatch
        } else {
            RuleOutcome::Extracted(found)
        }
    }
}

impl std::fmt::Debug for ExtractionRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ExtractionRule({})", self.name)
    }
}

/// An unordered collection of extraction rules evaluated by set union.
pub struct RuleSet {
    rules: Vec<ExtractionRule>,
}

impl RuleSet {
    /// Union of all rule outcomes over `text`.
    pub fn extract(&self, text: &str) -> BTreeSet<Designator> {
        let mut out = BTreeSet::new();
        for rule in &self.rules {
            if let RuleOutcome::Extracted(found) = rule.apply(text) {
                out.extend(found);
            }
        }
        out
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules recognizing arrival phrasings.
    pub fn arrival() -> Self {
        let rules = vec![
            // "APPROACH IN USE ILS 22L, ILS 22R" — typed approaches, RWY
            // keyword optional.
            ExtractionRule::new(
                "approach-in-use-typed",
                r"(?i)(?:APCH|APPROACH|APCHS|APPROACHES)\s+(?:IN\s+USE\s+)?(?:ILS|RNAV|VISUAL|VOR|GPS|LOC)\s+(?:(?:RWYS?|RYS|RY)\s+)?([0-9]{1,2}[LCR]?)(?:\s*,\s*(?:ILS|RNAV|VISUAL|VOR|GPS|LOC)\s+(?:(?:RWYS?|RYS|RY)\s+)?([0-9]{1,2}[LCR]?))+",
            ),
            // "EXPECT ILS 27, ILS 22L APCH" — APCH trails the list.
            ExtractionRule::new(
                "typed-comma-then-apch",
                r"(?i)(?:EXPECT\s+)?(?:ILS|RNAV|VISUAL|VOR|GPS|LOC)\s+([0-9]{1,2}[LCR]?)(?:\s*,\s*(?:ILS|RNAV|VISUAL|VOR|GPS|LOC)\s+([0-9]{1,2}[LCR]?))+\s+(?:APCH|APPROACH)",
            ),
            // "SIMULTANEOUS APCHS IN USE VIS 26R, ILS 27L, VIS 28" — mixed
            // approach types.
            ExtractionRule::new(
                "simul-mixed-types",
                r"(?i)(?:SIMUL|SIMULTANEOUS)\s+(?:APCH|APPROACH|APCHS|APPROACHES)\s+IN\s+USE\s+(?:(?:VIS|VISUAL|ILS|RNAV|VOR|GPS|LOC)\s+([0-9]{1,2}[LCR]?)(?:\s*,\s*)?)+",
            ),
            // "SIMULTANEOUS APPCHS, ILS RWY 17L, 18R"
            ExtractionRule::new(
                "simul-comma-typed",
                r"(?i)(?:SIMUL|SIMULTANEOUS)\s+(?:APCH|APPROACH|APCHS|APPROACHES)\s*,\s*(?:ILS|RNAV|VISUAL|VOR|GPS|LOC)\s+(?:RWYS?|RYS|RY)\s+([0-9]{1,2}[LCR]?)(?:\s*,\s*([0-9]{1,2}[LCR]?))+",
            ),
            // "RNAV Y RWY 10L, SIMUL, ILS, RWY 10R"
            ExtractionRule::new(
                "typed-variant-lists",
                r"(?i)(?:ILS|RNAV|VISUAL|VOR|GPS|LOC)\s+(?:[YZ]\s+)?(?:RWYS?|RYS|RY)\s+([0-9]{1,2}[LCR]?)(?:\s*,\s*(?:SIMUL|SIMULTANEOUS)?\s*,?\s*(?:ILS|RNAV|VISUAL|VOR|GPS|LOC)\s*,?\s*(?:RWYS?|RYS|RY)\s+([0-9]{1,2}[LCR]?))+",
            ),
            // "ILS, RWY 28L, AND, RWY 28R"
            ExtractionRule::new(
                "typed-comma-and-rwy",
                r"(?i)(?:ILS|VISUAL|RNAV|VOR|GPS|LOC)\s*,\s*(?:RWYS?|RYS|RY)\s+([0-9]{1,2}[LCR]?)(?:\s*,\s*(?:AND\s*,\s*)?(?:RWYS?|RYS|RY)\s+([0-9]{1,2}[LCR]?))+",
            ),
            // "ILS RWY 27, DEP 33L" — a single sentence encodes the arrival
            // and the upcoming departure clause; the match stops at the
            // departure keyword so only the arrival designator is captured.
            ExtractionRule::new(
                "elliptical-before-dep",
                r"(?i)(?:ILS|RNAV|VOR|GPS|LOC)\s+(?:(?:RWYS?|RYS|RY)\s+)?([0-9]{1,2}[LCR]?)\s*[,.]\s*DEP\b",
            ),
            // "SIMUL VISUAL APCH TO RWYS, 36L, 35C, 35R"
            ExtractionRule::new(
                "apch-to-rwys-comma-list",
                r"(?i)(?:SIMUL|SIMULTANEOUS)?\s*(?:VISUAL|ILS|RNAV)?\s*(?:APCH|APPROACH|APCHS|APPROACHES)\s+(?:TO\s+)?(?:RWYS?|RYS|RY)\s*,\s*([0-9]{1,2}[LCR]?)(?:\s*,\s*([0-9]{1,2}[LCR]?))*",
            ),
            // "EXPECT VISUAL APCH RWYS 36C 36L 36R" — space-separated list.
            ExtractionRule::new(
                "expect-apch-rwys-space-list",
                r"(?i)(?:EXPECT\s+)?(?:SIMUL|SIMULTANEOUS)?\s*(?:VISUAL|ILS|RNAV)?\s*(?:APCH|APPROACH|APCHS|APPROACHES)\s+(?:TO\s+)?(?:RWYS?|RYS|RY)\s+([0-9]{1,2}[LCR]?)\b(?:\s+([0-9]{1,2}[LCR]?)\b)*",
            ),
            // "ILS, AND VA, RWYS 30 AND 28R"
            ExtractionRule::new(
                "typed-va-and-lists",
                r"(?i)(?:ILS|VISUAL|RNAV|VOR|GPS|LOC|VA)\s*,\s*(?:AND\s+)?(?:ILS|VISUAL|RNAV|VOR|GPS|LOC|VA)?\s*,?\s*(?:RWYS?|RYS|RY)\s+([0-9]{1,2}[LCR]?)(?:(?:\s*,\s*|\s+(?:AND|OR)\s+)(?:(?:RWYS?|RYS|RY)\s+)?([0-9]{1,2}[LCR]?))*",
            ),
            // "ILS, RYS 16R AND 16L, APCH IN USE"
            ExtractionRule::new(
                "typed-rys-then-apch",
                r"(?i)(?:ILS|VISUAL|RNAV|VOR|GPS|LOC)\s*,\s*(?:RWYS?|RYS|RY)\s+([0-9]{1,2}[LCR]?)(?:(?:\s*,\s*|\s+(?:AND|OR)\s+)(?:(?:RWYS?|RYS|RY)\s+)?([0-9]{1,2}[LCR]?))*(?:\s*,\s*)?(?:APCH|APPROACH|APCHS|APPROACHES)",
            ),
            // "ARRIVALS RWY 3, 8" — bare arrival statement, no approach type.
            ExtractionRule::new(
                "arrivals-rwy-list",
                r"(?i)(?:ARRIVALS?|ARVNG|ARRIVING)\s+(?:EXPECT\s+)?(?:RWYS?|RYS|RY)\s+([0-9]{1,2}[LCR]?)(?:(?:\s*,\s*|\s+(?:AND|OR)\s+)(?:(?:RWYS?|RYS|RY)\s+)?([0-9]{1,2}[LCR]?))*",
            ),
            // "ARRIVALS EXPECT ILS RWY 8R, RWY 9, RWY 12"
            ExtractionRule::new(
                "arrivals-expect-rwy-list",
                r"(?i)(?:ARRIVALS?)\s+(?:EXPECT\s+)?(?:ILS|VISUAL|RNAV|VOR|GPS|LOC)\s+(?:RWYS?|RYS|RY)\s+([0-9]{1,2}[LCR]?)(?:\s*,\s*(?:RWYS?|RYS|RY)\s+([0-9]{1,2}[LCR]?))*",
            ),
            // "ARRIVALS EXPECT ILS OR RNAV Y RY 26R, ILS OR RNAV Y RY 26L"
            ExtractionRule::new(
                "arrivals-expect-typed-list",
                r"(?i)(?:ARRIVALS?)\s+(?:EXPECT\s+)?(?:(?:ILS|VISUAL|RNAV|VOR|GPS|LOC)\s+(?:OR\s+)?(?:ILS|VISUAL|RNAV|VOR|GPS|LOC)?\s*(?:[YZ]\s+)?(?:RWYS?|RYS|RY)\s+[0-9]{1,2}[LCR]?(?:\s*,\s*)?)+",
            ),
            // "EXPECT VISUAL APPROACH RWY 22, RWY 27"
            ExtractionRule::new(
                "expect-typed-apch-rwy-list",
                r"(?i)(?:EXPECT\s+)?(?:ILS|VISUAL|RNAV|VOR|GPS|LOC)\s+(?:OR\s+)?(?:ILS|VISUAL|RNAV|VOR|GPS|LOC)?\s*(?:APCH|APPROACH|APCHS|APPROACHES)\s+(?:RWYS?|RYS|RY)\s+([0-9]{1,2}[LCR]?)(?:(?:\s*,\s*|\s+(?:AND|OR)\s+)(?:(?:RWYS?|RYS|RY)\s+)?([0-9]{1,2}[LCR]?))*",
            ),
            // "EXPECT VISUAL APPROACH TO RWY 18C, RWY 18R"
            ExtractionRule::new(
                "expect-apch-to-rwy",
                r"(?i)(?:EXPECT\s+)?(?:ILS|VISUAL|RNAV|VOR|GPS|LOC)\s+(?:OR\s+)?(?:ILS|VISUAL|RNAV|VOR|GPS|LOC)?\s*(?:APCH|APPROACH|APCHS|APPROACHES)\s+TO\s+(?:RWYS?|RYS|RY)\s+([0-9]{1,2}[LCR]?)(?:(?:\s*,\s*|\s+(?:AND|OR)\s+)(?:(?:RWYS?|RYS|RY)\s+)?([0-9]{1,2}[LCR]?))*",
            ),
            // "APCH IN USE RWY 22L AND 22R"
            ExtractionRule::new(
                "apch-in-use-rwy-list",
                r"(?i)(?:APCH|APPROACH|APCHS|APPROACHES)\s+(?:IN\s+USE\s+)?(?:RWYS?|RYS|RY)\s+([0-9]{1,2}[LCR]?)(?:(?:\s*,\s*|\s+(?:AND|OR)\s+)(?:(?:RWYS?|RYS|RY)\s+)?([0-9]{1,2}[LCR]?))*",
            ),
            // "SIMULTANEOUS ARRIVAL AND, DEPARTURE OPERATIONS ARE IN USE, ON
            // RY 22R AND RY 22L" — feeds both collections.
            ExtractionRule::new(
                "simul-arr-dep-operations",
                r"(?i)(?:SIMUL|SIMULTANEOUS)\s+(?:ARRIVAL\s+AND\s*,?\s*DEPARTURE\s+OPERATIONS|DEPENDENT)\s+(?:ARE\s+)?(?:IN\s+USE\s*)?,?\s*(?:ON\s+)?(?:RWYS?|RYS|RY)\s+([0-9]{1,2}[LCR]?)(?:\s+(?:AND|OR)\s+(?:RWYS?|RYS|RY)\s+([0-9]{1,2}[LCR]?))+",
            ),
            // "LNDG/DEPG RWYS 4/8" — slash lists feed both collections.
            ExtractionRule::new(
                "lndg-slash-depg",
                r"(?i)(?:LNDG|LANDING)/(?:DEPG|DEPARTING)\s+(?:RWYS?|RYS|RY)\s+([0-9]{1,2}[LCR]?)/([0-9]{1,2}[LCR]?)(?:/([0-9]{1,2}[LCR]?))*",
            ),
            // "LNDG RWYS 35L AND 35R", "LNDG AND DEPG RWY 28L, 28R"
            ExtractionRule::new(
                "lndg-rwy-list",
                r"(?i)(?:LNDG|LDG|LAND|ARVNG)\s+(?:AND\s+(?:DEPG|DEPARTING)\s+)?(?:RWYS?|RYS|RY)\s+([0-9]{1,2}[LCR]?)(?:(?:\s*,\s*|\s+(?:AND|OR)\s+)(?:(?:RWYS?|RYS|RY)\s+)?([0-9]{1,2}[LCR]?))*",
            ),
            // Standalone "LANDING RWY 9L, 9R".
            ExtractionRule::new(
                "landing-rwy-list",
                r"(?i)LANDING\s+(?:RWYS?|RYS|RY)\s+([0-9]{1,2}[LCR]?)(?:(?:\s*,\s*|\s+(?:AND|OR)\s+)(?:(?:RWYS?|RYS|RY)\s+)?([0-9]{1,2}[LCR]?))*",
            ),
            // "LANDING RWY 16L 16C AND 16R" — space-separated callout; the
            // word boundary keeps partial numbers (wind groups etc.) out.
            ExtractionRule::new(
                "landing-rwy-space-list",
                r"(?i)(?:LANDING|LNDG|LDG)\s+(?:RWYS?|RYS|RY)\s+([0-9]{1,2}[LCR]?)\b(?:\s+(?:AND\s+|OR\s+)?([0-9]{1,2}[LCR]?)\b)+",
            ),
            // "RWY 22, 27 FOR APPROACH"
            ExtractionRule::new(
                "rwy-list-for-apch",
                r"(?i)(?:RWYS?|RYS|RY)\s+([0-9]{1,2}[LCR]?)(?:(?:\s*,\s*|\s+(?:AND|OR)\s+)(?:(?:RWYS?|RYS|RY)\s+)?([0-9]{1,2}[LCR]?))*\s+(?:FOR\s+)?(?:APCH|APPROACH|LANDING|ARRIVAL)",
            ),
            // "RNAV 27", "RNAV Y 27, RNAV Z 28"
            ExtractionRule::new(
                "rnav-shorthand",
                r"(?i)RNAV\s+(?:[YZ]\s+)?([0-9]{1,2}[LCR]?)(?:(?:\s*,\s*|\s+(?:AND|OR)\s+)(?:RNAV\s+)?(?:[YZ]\s+)?([0-9]{1,2}[LCR]?))*",
            ),
            // "ILS RY 34R RNAV Y RY 35 RNAV Z RY 34L"
            ExtractionRule::new(
                "typed-ry-sequence",
                r"(?i)(?:ILS|RNAV|VOR|GPS|LOC)\s+(?:[YZ]\s+)?(?:RWYS?|RYS|RY)\s+([0-9]{1,2}[LCR]?)(?:\s+(?:ILS|RNAV|VOR|GPS|LOC)\s+(?:[YZ]\s+)?(?:RWYS?|RYS|RY)\s+([0-9]{1,2}[LCR]?))+",
            ),
            // Named visual approaches: "FMS BRIDGE RY 28R AND TIPP TOE RY
            // 28L APP IN USE".
            ExtractionRule::new(
                "named-visual-app-in-use",
                r"(?i)(?:[A-Z]+(?:\s+[A-Z]+)*\s+)?RY\s+([0-9]{1,2}[LCR]?)(?:\s+AND\s+(?:[A-Z]+(?:\s+[A-Z]+)*\s+)?RY\s+([0-9]{1,2}[LCR]?))*\s+APP\s+IN\s+USE",
            ),
            // "ILS RWY 23 IN USE"
            ExtractionRule::new(
                "typed-rwy-in-use",
                r"(?i)(?:ILS|VISUAL|RNAV|VOR|GPS|LOC)\s+(?:RWYS?|RYS|RY)\s+([0-9]{1,2}[LCR]?)\s+IN\s+USE",
            ),
            // "LAND RY 31"
            ExtractionRule::new(
                "land-ry",
                r"(?i)LAND\s+(?:RWYS?|RYS|RY)\s+([0-9]{1,2}[LCR]?)(?:(?:\s*,\s*|\s+(?:AND|OR)\s+)(?:(?:RWYS?|RYS|RY)\s+)?([0-9]{1,2}[LCR]?))*",
            ),
            // "EXPECT ILS RWY 23L, 23R"
            ExtractionRule::new(
                "expect-typed-rwy-commas",
                r"(?i)(?:EXPECT\s+)?(?:ILS|RNAV|VOR|GPS|LOC)\s+(?:RWYS?|RYS|RY)\s+([0-9]{1,2}[LCR]?)(?:\s*,\s*([0-9]{1,2}[LCR]?))*",
            ),
            // "ILS RWY 35L AND 35R"
            ExtractionRule::new(
                "typed-rwy-and-list",
                r"(?i)(?:ILS|RNAV|VOR|GPS|LOC)\s+(?:RWYS?|RYS|RY)\s+([0-9]{1,2}[LCR]?)(?:\s+(?:AND|OR)\s+([0-9]{1,2}[LCR]?))+",
            ),
        ];
        Self { rules }
    }

    /// Rules recognizing departure phrasings.
    pub fn departure() -> Self {
        // Context guards replace the source material's lookbehinds: a bare
        // departure keyword inside "LNDG/DEPG" or "LANDING AND DEPARTING"
        // belongs to a combined statement, not a departure one.
        const COMBINED_PREFIXES: &[&str] = &[
            "LNDG/",
            "LANDING/",
            "LANDING AND ",
            "LNDG AND ",
            "ARVNG AND ",
            "ARRIVING AND ",
        ];
        const COMBINED_OR_ARRIVAL_PREFIXES: &[&str] = &[
            "LNDG/",
            "LANDING/",
            "LANDING ",
            "LNDG ",
            "LANDING AND ",
            "LNDG AND ",
            "ARVNG AND ",
            "ARRIVING AND ",
        ];

        let rules = vec![
            ExtractionRule::new(
                "simul-arr-dep-operations",
                r"(?i)(?:SIMUL|SIMULTANEOUS)\s+(?:ARRIVAL\s+AND\s*,?\s*DEPARTURE\s+OPERATIONS|DEPENDENT)\s+(?:ARE\s+)?(?:IN\s+USE\s*)?,?\s*(?:ON\s+)?(?:RWYS?|RYS|RY)\s+([0-9]{1,2}[LCR]?)(?:\s+(?:AND|OR)\s+(?:RWYS?|RYS|RY)\s+([0-9]{1,2}[LCR]?))+",
            ),
            // "SIMUL DEPS IN USE, EXPECT RY 18L, RY 18C"
            ExtractionRule::new(
                "simul-deps-comma",
                r"(?i)(?:SIMUL|SIMULTANEOUS)\s+(?:DEPS?|DEPARTURES?)\s+IN\s+USE\s*,?\s*(?:EXPECT\s+)?(?:RWYS?|RYS|RY)\s+([0-9]{1,2}[LCR]?)(?:\s*,\s*(?:RWYS?|RYS|RY)\s+([0-9]{1,2}[LCR]?))+",
            ),
            // "SIMUL DEPS IN USE RY 18R 18C 18L"
            ExtractionRule::new(
                "simul-deps-space",
                r"(?i)(?:SIMUL|SIMULTANEOUS)\s+(?:DEPS?|DEPARTURES?)\s+IN\s+USE\s+(?:RWYS?|RYS|RY)\s+([0-9]{1,2}[LCR]?)\b(?:\s+([0-9]{1,2}[LCR]?)\b)+",
            ),
            // "DEPG RWYS RWY 10L AND 10R" — doubled keyword.
            ExtractionRule::guarded(
                "depg-double-rwy",
                r"(?i)(?:DEPG|DEP|DEPARTURE|DEPARTING|DERARTING|DEPS|DEPARTURES)\s+(?:RWYS?|RYS|RY)\s+(?:RWYS?|RYS|RY)\s+([0-9]{1,2}[LCR]?)(?:\s+(?:AND|OR)\s+([0-9]{1,2}[LCR]?))*",
                COMBINED_PREFIXES,
            ),
            // "DEPG RWYS, 26L, 27R" or "DEPG RWYS 36C, 36L, 36R"
            ExtractionRule::guarded(
                "depg-comma-rwys",
                r"(?i)(?:DEPG|DEP|DEPARTURE|DEPARTING|DERARTING|DEPS|DEPARTURES)\s+(?:RWYS?|RYS|RY)\s*,?\s*([0-9]{1,2}[LCR]?)(?:\s*,\s*([0-9]{1,2}[LCR]?))*",
                COMBINED_PREFIXES,
            ),
            // "DEPG RWYS 1L, 1R" with AND/OR separators.
            ExtractionRule::guarded(
                "depg-rwy-list",
                r"(?i)(?:DEPG|DEP|DEPARTURE|DEPARTING|DERARTING|DEPS|DEPARTURES)\s+(?:RWYS?|RYS|RY)\s+([0-9]{1,2}[LCR]?)(?:(?:\s*,\s*|\s+(?:AND|OR)\s+)(?:(?:RWYS?|RYS|RY)\s+)?([0-9]{1,2}[LCR]?))*",
                COMBINED_OR_ARRIVAL_PREFIXES,
            ),
            // "DEPARTING RWY 16L 16C AND 16R" — space-separated callout.
            ExtractionRule::guarded(
                "departing-rwy-space-list",
                r"(?i)(?:DEPG|DEPARTURE|DEPARTING|DERARTING|DEPS|DEPARTURES|DEP)\s+(?:RWYS?|RYS|RY)\s+([0-9]{1,2}[LCR]?)\b(?:\s+(?:AND\s+|OR\s+)?([0-9]{1,2}[LCR]?)\b)+",
                COMBINED_OR_ARRIVAL_PREFIXES,
            ),
            ExtractionRule::new(
                "takeoff-rwy",
                r"(?i)(?:TAKEOFF|TKOF|TAKE\s+OFF)\s+(?:RWYS?|RYS|RY)\s+([0-9]{1,2}[LCR]?)(?:(?:\s*,\s*|\s+(?:AND|OR)\s+)(?:(?:RWYS?|RYS|RY)\s+)?([0-9]{1,2}[LCR]?))*",
            ),
            // "RWY 33L FOR DEPARTURE"
            ExtractionRule::new(
                "rwy-list-for-dep",
                r"(?i)(?:RWYS?|RYS|RY)\s+([0-9]{1,2}[LCR]?)(?:(?:\s*,\s*|\s+(?:AND|OR)\s+)([0-9]{1,2}[LCR]?))*\s+(?:FOR\s+)?(?:DEPG|DEP|DEPARTURE|TAKEOFF)",
            ),
            // "DEP 33L", "DEPG 16R" — no RWY keyword.
            ExtractionRule::guarded(
                "dep-shorthand",
                r"(?i)(?:DEPG|DEP)\s+([0-9]{1,2}[LCR]?)\b(?:(?:\s*,\s*|\s+(?:AND|OR)\s+)(?:(?:DEPG|DEP)\s+)?([0-9]{1,2}[LCR]?)\b)*",
                COMBINED_OR_ARRIVAL_PREFIXES,
            ),
            // "DEPART RY 31"
            ExtractionRule::new(
                "depart-ry",
                r"(?i)DEPART\s+(?:RWYS?|RYS|RY)\s+([0-9]{1,2}[LCR]?)(?:(?:\s*,\s*|\s+(?:AND|OR)\s+)(?:(?:RWYS?|RYS|RY)\s+)?([0-9]{1,2}[LCR]?))*",
            ),
            // "SIMUL INSTR DEPARTURES IN PROG RWYS 24 AND 25"
            ExtractionRule::new(
                "deps-in-prog",
                r"(?i)(?:SIMUL\s+)?(?:INSTR\s+)?(?:DEPARTURES?|DEPS?)\s+IN\s+PROG(?:RESS)?\s+(?:RWYS?|RYS|RY)\s+([0-9]{1,2}[LCR]?)(?:(?:\s*,\s*|\s+(?:AND|OR)\s+)(?:(?:RWYS?|RYS|RY)\s+)?([0-9]{1,2}[LCR]?))*",
            ),
            // "FOR BOTH RWYS 24 AND 25"
            ExtractionRule::new(
                "both-rwys",
                r"(?i)(?:FOR\s+)?BOTH\s+(?:RWYS?|RYS|RY)\s+([0-9]{1,2}[LCR]?)\s+AND\s+(?:(?:RWYS?|RYS|RY)\s+)?([0-9]{1,2}[LCR]?)",
            ),
            // "DEPS EXP RWYS 22L 28R"
            ExtractionRule::new(
                "deps-exp",
                r"(?i)(?:DEPS?)\s+(?:EXP(?:ECT)?)\s+(?:RWYS?|RYS|RY)\s+([0-9]{1,2}[LCR]?)\b(?:(?:\s+|\s*,\s*)([0-9]{1,2}[LCR]?)\b)*",
            ),
        ];
        Self { rules }
    }

    /// Rules recognizing ambiguous phrasings that bind to both operations.
    pub fn combined() -> Self {
        let rules = vec![
            // "LNDG/DEPG RWYS 4/8", "LNDG AND DEPG RWY 28L, 28R"
            ExtractionRule::new(
                "lndg-and-depg",
                r"(?i)(?:LNDG|LANDING)\s*(?:/|AND)\s*(?:DEPG|DEP|DEPARTING)\s+(?:RWYS?|RYS|RY)\s*([0-9]{1,2}[LCR]?)(?:(?:\s*/\s*|\s*,\s*|\s+(?:AND|OR)\s+)(?:(?:RWYS?|RYS|RY)\s*)?([0-9]{1,2}[LCR]?))*",
            ),
            // "ILS APCH 14R, 14L, 18 IN USE" — IN USE required to avoid
            // swallowing arrival-only approach statements.
            ExtractionRule::new(
                "typed-apch-in-use",
                r"(?i)(?:ILS|VISUAL|RNAV|VOR|GPS|LOC)\s+(?:APCH|APPROACH|APCHS|APPROACHES)\s+([0-9]{1,2}[LCR]?)(?:\s*,\s*([0-9]{1,2}[LCR]?))*\s+IN\s+USE",
            ),
            // "VISUAL APCH 5R, 5L"
            ExtractionRule::new(
                "visual-apch-commas",
                r"(?i)VISUAL\s+(?:APCH|APPROACH|APCHS|APPROACHES)\s+([0-9]{1,2}[LCR]?)(?:\s*,\s*([0-9]{1,2}[LCR]?))+",
            ),
            // "LANDING AND DEPARTING 34, 29" — explicit dual-operation
            // statement, single runway included.
            ExtractionRule::new(
                "landing-and-departing",
                r"(?i)LANDING\s+AND\s+DEPARTING\s+(?:(?:RWYS?|RYS|RY)\s+)?([0-9]{1,2}[LCR]?)(?:(?:\s*,\s*|\s+(?:AND|OR)\s+)(?:(?:RWYS?|RYS|RY)\s+)?([0-9]{1,2}[LCR]?))*",
            ),
            // "ARVNG AND DEPG RWY 8 AND RWY 15"
            ExtractionRule::new(
                "arvng-and-depg",
                r"(?i)(?:ARVNG|ARRIVING)\s+AND\s+(?:DEPG|DEP|DEPARTING)\s+(?:RWYS?|RYS|RY)\s+([0-9]{1,2}[LCR]?)(?:(?:\s*,\s*|\s+(?:AND|OR)\s+)(?:(?:RWYS?|RYS|RY)\s+)?([0-9]{1,2}[LCR]?))*",
            ),
            // Generic "RWYS 17L, 17R IN USE" without operation context.
            ExtractionRule::new(
                "rwys-in-use-generic",
                r"(?i)(?:RWYS?|RYS|RY)\s+(?:IN\s+USE\s+)?([0-9]{1,2}[LCR]?)(?:(?:\s*,\s*|\s+(?:AND|OR)\s+)(?:(?:RWYS?|RYS|RY)\s+)?([0-9]{1,2}[LCR]?))*",
            ),
            ExtractionRule::new(
                "simul-apchs",
                r"(?i)(?:SIMUL|SIMULTANEOUS)\s+(?:APCHS|APPROACHES)\s+(?:IN\s+USE\s*,?\s*)?(?:TO\s+)?(?:RWYS?|RYS|RY)\s+([0-9]{1,2}[LCR]?)(?:(?:\s*,\s*|\s+(?:AND|OR)\s+)(?:(?:RWYS?|RYS|RY)\s+)?([0-9]{1,2}[LCR]?))*",
            ),
            // "17L, 17R & 13 IN USE" — bare numbers with no RWY prefix.
            ExtractionRule::new(
                "bare-numbers-in-use",
                r"(?i)([0-9]{1,2}[LCR]?)(?:\s*[,&]\s*|\s+(?:AND|OR)\s+)([0-9]{1,2}[LCR]?)(?:(?:\s*[,&]\s*|\s+(?:AND|OR)\s+)([0-9]{1,2}[LCR]?))*\s+IN\s+USE",
            ),
        ];
        Self { rules }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(set: &BTreeSet<Designator>) -> Vec<String> {
        set.iter().map(|d| d.to_string()).collect()
    }

    #[test]
    fn test_rule_outcome_is_tagged() {
        let rule = ExtractionRule::new("land-ry", r"(?i)LAND\s+RY\s+([0-9]{1,2}[LCR]?)");
        assert_eq!(rule.apply("WIND CALM"), RuleOutcome::NoMatch);
        match rule.apply("LAND RY 31") {
            RuleOutcome::Extracted(set) => assert_eq!(names(&set), ["31"]),
            RuleOutcome::NoMatch => panic!("expected a match"),
        }
    }

    #[test]
    fn test_out_of_range_tokens_dropped() {
        let rule = ExtractionRule::new("rwy", r"(?i)RWY\s+([0-9]{1,2}[LCR]?)");
        // 37 has no physical heading; harvest drops it and the rule
        // reports no match.
        assert_eq!(rule.apply("RWY 37"), RuleOutcome::NoMatch);
    }

    #[test]
    fn test_context_guard_rejects_combined_statement() {
        let set = RuleSet::departure();
        // DEPG inside "LNDG AND DEPG" is a combined statement.
        let out = set.extract("LNDG AND DEPG RWY 28L");
        assert!(out.is_empty(), "got {:?}", out);
        // Standalone DEPG still matches.
        let out = set.extract("DEPG RWY 28L");
        assert_eq!(names(&out), ["28L"]);
    }

    #[test]
    fn test_arrival_union_across_rules() {
        let set = RuleSet::arrival();
        let out = set.extract("ILS RWY 23 IN USE LANDING RWY 9L, 9R");
        assert_eq!(names(&out), ["9L", "9R", "23"]);
    }

    #[test]
    fn test_space_separated_landing_list() {
        let set = RuleSet::arrival();
        let out = set.extract("LANDING RWY 16L 16C AND 16R");
        assert_eq!(names(&out), ["16L", "16C", "16R"]);
    }

    #[test]
    fn test_space_list_stops_at_non_designator() {
        let set = RuleSet::arrival();
        // "250" is not a designator token; the space list must not absorb a
        // partial "25" from it.
        let out = set.extract("LANDING RWY 16L 250 AT 10");
        assert_eq!(names(&out), ["16L"]);
    }

    #[test]
    fn test_elliptical_before_dep_captures_arrival_only() {
        let set = RuleSet::arrival();
        let out = set.extract("ILS RWY 27, DEP 33L");
        assert!(out.iter().any(|d| d.to_string() == "27"));
        assert!(!out.iter().any(|d| d.to_string() == "33L"));
    }

    #[test]
    fn test_departure_shorthand() {
        let set = RuleSet::departure();
        let out = set.extract("ILS RWY 27, DEP 33L");
        assert_eq!(names(&out), ["33L"]);
    }

    #[test]
    fn test_simul_deps_space_list() {
        let set = RuleSet::departure();
        let out = set.extract("SIMUL DEPS IN USE RY 18R 18C 18L");
        assert_eq!(names(&out), ["18L", "18C", "18R"]);
    }

    #[test]
    fn test_combined_slash_list() {
        let set = RuleSet::combined();
        let out = set.extract("LNDG/DEPG RWYS 4/8");
        assert_eq!(names(&out), ["4", "8"]);
    }

    #[test]
    fn test_combined_landing_and_departing_single_runway() {
        let set = RuleSet::combined();
        let out = set.extract("LANDING AND DEPARTING 16");
        assert_eq!(names(&out), ["16"]);
    }

    #[test]
    fn test_combined_bare_numbers_require_in_use() {
        let set = RuleSet::combined();
        let out = set.extract("17L, 17R & 13 IN USE");
        assert_eq!(names(&out), ["13", "17L", "17R"]);
        assert!(set.extract("17L, 17R & 13").is_empty());
    }

    #[test]
    fn test_rule_collections_populated() {
        assert!(RuleSet::arrival().len() > 20);
        assert!(RuleSet::departure().len() > 10);
        assert!(!RuleSet::combined().is_empty());
    }
}
