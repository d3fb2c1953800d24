//! Broadcast text normalizer.
//!
//! Isolates the operationally relevant span of a broadcast and rewrites
//! noisy notation into a canonical form the pattern extractor can match:
//!
//! - span isolation between the altimeter reading and the first boilerplate
//!   opener (NOTAM / readback / advisory / bird activity)
//! - suppression of runway mentions that are advisories, closures, or
//!   equipment status rather than active-use statements
//! - consolidation of digit-by-digit and spelled-out callouts
//!   (`RWY 3 4 LEFT` → `RWY 34L`, `RUNWAY 16 LEFT` → `RUNWAY 16L`)
//! - expansion of elliptical `… AND RIGHT/LEFT` into fully-qualified
//!   designators
//! - runway-keyword standardization and punctuation stripping
//!
//! Normalization is deterministic, side-effect-free, and never fails:
//! unmatched input passes through unchanged apart from whitespace.

use regex::{Captures, Regex};

fn rx(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static normalizer pattern")
}

/// Compiled rewrite rules for broadcast text.
pub struct Normalizer {
    altimeter: Regex,
    end_markers: Vec<Regex>,
    advisory: Vec<Regex>,
    spaced_ry: Regex,
    spaced_rwy: Regex,
    spaced_rwys: Regex,
    digit_pair: Regex,
    spelled_suffix: Regex,
    closures: Vec<Regex>,
    equipment: Vec<Regex>,
    and_right_left: Regex,
    runway_word: Regex,
    missing_space: Regex,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self {
            // Altimeter reading with its parenthesized spoken form, e.g.
            // "A3018 (THREE ZERO ONE EIGHT)".
            altimeter: rx(r"(?i)A\d{4}\s*\([A-Z\s]+\)"),
            end_markers: vec![
                rx(r"(?i)\bNOTICE\s+TO\s+AIR\w*\b"),
                rx(r"(?i)\bNOTAMS?\b\.{0,3}"),
                rx(r"(?i)\bREADBACK\s+ALL\s+RWY\b"),
                rx(r"(?i)\bADVISE\s+ON\s+INITIAL\b"),
                rx(r"(?i)\bPILOTS?\s+(?:ARE\s+)?(?:ADVISED|CAUTIONED)\b"),
                rx(r"(?i)\bBIRD\s+ACT(?:IVITY|VTY)\b"),
                rx(r"(?i)\.{3}ADVS\s+YOU\s+HAVE\b"),
            ],
            advisory: vec![
                // "RWY 30 DEPARTURES ARE ADVISED TO AVOID ..."
                rx(r"(?i)RWY?\s+[0-9]{1,2}[LCR]?\s+(?:DEPARTURES?|ARRIVALS?)\s+(?:ARE\s+)?(?:ADVISED|CAUTIONED|WARNED)[^.]*?\.?"),
                // "LOW CLOSE IN OBSTACLES FOR RWY 30 DEPARTURES"
                rx(r"(?i)(?:OBSTACLES?|HAZARDS?)[^.]{0,50}?FOR\s+RWY?\s+[0-9]{1,2}[LCR]?\s+(?:DEPARTURES?|ARRIVALS?)[^.]*?\.?"),
                // "RWY 16L AVOID TURNING LEFT"
                rx(r"(?i)RWY?\s+[0-9]{1,2}[LCR]?\s+[^.]{0,50}?(?:AVOID|WARNING)[^.]*?\.?"),
            ],
            spaced_ry: rx(r"(?i)R\s+Y\s+([0-9]{1,2}[LCR]?)"),
            spaced_rwy: rx(r"(?i)R\s+W\s+Y\s+([0-9]{1,2}[LCR]?)"),
            spaced_rwys: rx(r"(?i)R\s+W\s+Y\s+S\s+([0-9]{1,2}[LCR]?)"),
            digit_pair: rx(
                r"(?i)(RUNWAY|RUNWAYS|RWY?S?|RY)\s+([0-9])\s+([0-9])\s*(LEFT|RIGHT|CENTER|L|R|C)?",
            ),
            spelled_suffix: rx(r"(?i)(RUNWAY|RUNWAYS|RWY?S?|RY)\s+([0-9]{1,2})\s+(LEFT|RIGHT|CENTER)\b"),
            closures: vec![
                rx(r"(?i)RWY?\s+[0-9]{1,2}[LCR]?\s+(?:CLSD|CLOSED)"),
                rx(r"(?i)RWY?\s+[0-9]\s+[0-9]\s+(?:LEFT|RIGHT|CENTER|L|R|C)?\s+(?:CLSD|CLOSED)"),
            ],
            equipment: vec![
                // Procedure notes: "GPS YANKEE RWY 36C DISREGARD NOTE"
                rx(r"(?i)(?:GPS|RNAV|ILS|VOR|LOC)\s+[A-Z]+\s+RWY?\s+[0-9]{1,2}[LCR]?\s+(?:DISREGARD|NOT\s+AVAILABLE|UNAVAILABLE)"),
                rx(r"(?i)RWY?\s+[0-9]{1,2}[LCR]?\s+(?:INNER|OUTER|MIDDLE)\s+MARKER\s+(?:OTS|OUT\s+OF\s+SERVICE|INOP|U/S)"),
                rx(r"(?i)RWY?\s+[0-9]{1,2}[LCR]?\s+(?:REIL|ALS|PAPI|VASI|ILS|LOC|GS|GLIDESLOPE|ALSF|MALSR|MALS|SSALR|SSALS)\s+(?:OTS|OUT\s+OF\s+SERVICE|INOP|U/S)"),
                rx(r"(?i)RWY?\s+[0-9]{1,2}[LCR]?\s+(?:OTS|OUT\s+OF\s+SERVICE|INOP|U/S)"),
                // Comma-separated runways with equipment status:
                // "RY 18R, 36C ALS OTS"
                rx(r"(?i)RY?\s+[0-9]{1,2}[LCR]?\s*,\s*[0-9]{1,2}[LCR]?\s+(?:REIL|ALS|PAPI|VASI|ILS|LOC|GS|GLIDESLOPE|ALSF|MALSR|MALS|SSALR|SSALS|ERGL)\s+(?:OTS|OUT\s+OF\s+SERVICE|INOP|U/S)"),
                // "RWY 36C, 36L, AND 18R OUTER MARKER OUT OF SERVICE"
                rx(r"(?i)RWY?\s+[0-9]{1,2}[LCR]?(?:\s*,\s*[0-9]{1,2}[LCR]?)*(?:,?\s+AND\s+[0-9]{1,2}[LCR]?)?\s+(?:INNER|OUTER|MIDDLE)\s+MARKER\s+(?:OTS|OUT\s+OF\s+SERVICE|INOP|U/S)"),
                rx(r"(?i)RWY?\s+[0-9]{1,2}[LCR]?\s+(?:APCH|APPROACH)\s+END\b"),
                rx(r"(?i)RWY?\s+[0-9]{1,2}[LCR]?\s+(?:DEP|DEPARTURE)\s+END\b"),
                // Taxiway status that happens to mention a runway:
                // "TWY Y2 CLSD OFF RWY 1C"
                rx(r"(?i)(?:TWY\s+)?[A-Z0-9]+\s+(?:CLSD|CLOSED)\s+(?:OFF|BTN|BETWEEN)\s+(?:RUNWAY|RWY)\s+[0-9]{1,2}[LCR]?"),
                rx(r"(?i)TWY?\s+[A-Z0-9]+\s+(?:CLSD|CLOSED)\s+BTN\s+(?:RUNWAY|RWY)\s*,\s*[0-9]{1,2}[LCR]?\s+AND\s+TWY"),
                // Exit instructions, not an active-runway statement.
                rx(r"(?i)(?:PLAN\s+TO\s+EXIT|EXIT)\s+[A-Z0-9]+\s+(?:OR\s+[A-Z0-9]+\s+)?(?:WHEN\s+)?LANDING\s+(?:RUNWAY|RWY)\s+[0-9]{1,2}[LCR]?"),
                rx(r"(?i)RWY?\s+[0-9]{1,2}[LCR]?\s+(?:DEP|DEPARTURE|APCH|APPROACH)\s+END\s+[A-Z0-9\-]+\s+(?:OTS|OUT\s+OF\s+SERVICE|INOP|U/S)"),
                rx(r"(?i)(?:ERGL|REIL|ALS|PAPI|VASI)\s+RWY?\s+[0-9]{1,2}[LCR]?\s+(?:OTS|OUT\s+OF\s+SERVICE|INOP|U/S)"),
            ],
            and_right_left: rx(r"(?i)(?:(RWY?S?|RY)\s+)?([0-9]{1,2}[LCR]?)\s+AND\s+(RIGHT|LEFT)\b"),
            // "RUNWAY" is a prefix of "RUNWAYS", so one rewrite covers both.
            runway_word: rx(r"(?i)RUNWAY"),
            missing_space: rx(r"(?i)(RWY?S?|RY)([0-9]{1,2}[LCR]?)"),
        }
    }

    /// Rewrite raw broadcast text into canonical form.
    pub fn normalize(&self, raw: &str) -> String {
        let span = self.operational_span(raw);

        let mut text = span.split_whitespace().collect::<Vec<_>>().join(" ");

        for pattern in &self.advisory {
            text = pattern.replace_all(&text, "").into_owned();
        }

        text = self.spaced_ry.replace_all(&text, "RY $1").into_owned();
        text = self.spaced_rwy.replace_all(&text, "RWY $1").into_owned();
        text = self.spaced_rwys.replace_all(&text, "RWYS $1").into_owned();

        text = self
            .digit_pair
            .replace_all(&text, |caps: &Captures| {
                let suffix = caps.get(4).map(|m| suffix_letter(m.as_str())).unwrap_or_default();
                format!("{} {}{}{}", &caps[1], &caps[2], &caps[3], suffix)
            })
            .into_owned();

        text = self
            .spelled_suffix
            .replace_all(&text, |caps: &Captures| {
                format!("{} {}{}", &caps[1], &caps[2], suffix_letter(&caps[3]))
            })
            .into_owned();

        for pattern in &self.closures {
            text = pattern.replace_all(&text, "").into_owned();
        }
        for pattern in &self.equipment {
            text = pattern.replace_all(&text, "").into_owned();
        }

        text = self.expand_elliptical_suffix(&text);

        text = self.runway_word.replace_all(&text, "RWY").into_owned();
        text = self.missing_space.replace_all(&text, "$1 $2").into_owned();
        text = text.replace('.', " ");

        text
    }

    /// Slice out the span between the altimeter reading and the first
    /// boilerplate opener that follows it.
    fn operational_span<'a>(&self, text: &'a str) -> &'a str {
        let start = self.altimeter.find(text);
        let span_start = start.map(|m| m.end()).unwrap_or(0);

        let mut end = text.len();
        for marker in &self.end_markers {
            if let Some(m) = marker.find(text) {
                // An end marker only counts when it follows the start marker.
                if m.start() < end && (start.is_none() || m.start() > span_start) {
                    end = m.start();
                }
            }
        }

        &text[span_start..end]
    }

    /// Expand `RWY 35L AND RIGHT` into `RWY 35L AND RWY 35R`.
    fn expand_elliptical_suffix(&self, text: &str) -> String {
        self.and_right_left
            .replace_all(text, |caps: &Captures| {
                let keyword = caps.get(1).map(|m| m.as_str());
                let runway = &caps[2];
                let direction = caps[3].to_ascii_uppercase();

                let base: String = runway.chars().take_while(|c| c.is_ascii_digit()).collect();
                if base.is_empty() {
                    return caps[0].to_string();
                }
                let new_suffix = if direction == "RIGHT" { "R" } else { "L" };

                match keyword {
                    Some(kw) => format!("{kw} {runway} AND {kw} {base}{new_suffix}"),
                    None => format!("{runway} AND {base}{new_suffix}"),
                }
            })
            .into_owned()
    }
}

fn suffix_letter(word: &str) -> String {
    match word.to_ascii_uppercase().as_str() {
        "LEFT" => "L".into(),
        "RIGHT" => "R".into(),
        "CENTER" => "C".into(),
        other => other.to_string(),
    }
}
