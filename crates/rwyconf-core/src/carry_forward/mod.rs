//! Carry-forward correction matching.
//!
//! One human review silently fixes every subsequent broadcast that reduces
//! to the same ambiguous parse, without any rule-set change:
//!
//! 1. **Recent-review match** — a correction reviewed for the airport in
//!    the last 24 hours whose *originally parsed* sets equal the current
//!    parse (as unordered sets).
//! 2. **Learned-pattern match** — a stored phrase-pattern correction for
//!    the airport whose signature matches the current broadcast and whose
//!    success rate clears the bar; applying it bumps its counter.
//!
//! Store failures degrade to "no correction found" with a warning — a
//! missing correction is never an error.

pub mod memory;
pub mod signature;
pub mod store;

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::designator::Designator;
use signature::PhraseSignature;
use store::{CorrectionHistory, PatternCorrectionStore};

/// How far back reviewed corrections remain eligible for Method 1.
pub const REVIEW_RECENCY_HOURS: i64 = 24;

/// Method 1 scans at most this many recent reviews per airport.
pub const REVIEW_SCAN_LIMIT: usize = 10;

/// Minimum success rate for a learned pattern to auto-apply.
pub const MIN_PATTERN_SUCCESS_RATE: f64 = 0.8;

/// Where an applied correction came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum CorrectionSource {
    /// A recent human review with an identical parse.
    Review(Uuid),
    /// A learned phrase-pattern correction.
    LearnedPattern(Uuid),
}

/// A correction to apply in place of the current parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarryForward {
    pub source: CorrectionSource,
    pub arrivals: BTreeSet<Designator>,
    pub departures: BTreeSet<Designator>,
}

/// Find a prior correction whose parse matches the current one.
///
/// `raw_text` enables the learned-pattern method; without it only the
/// recent-review method runs. Returns `None` when nothing matches — the
/// caller proceeds with the unmodified parse.
pub fn match_carry_forward(
    history: &dyn CorrectionHistory,
    patterns: &dyn PatternCorrectionStore,
    airport: &str,
    arrivals: &BTreeSet<Designator>,
    departures: &BTreeSet<Designator>,
    raw_text: Option<&str>,
    now: DateTime<Utc>,
) -> Option<CarryForward> {
    let since = now - Duration::hours(REVIEW_RECENCY_HOURS);
    match history.reviewed_since(airport, since) {
        Ok(rows) => {
            for correction in rows.iter().take(REVIEW_SCAN_LIMIT) {
                if &correction.parsed_arrivals == arrivals
                    && &correction.parsed_departures == departures
                {
                    crate::obs::emit_carry_forward_applied(
                        airport,
                        &format!("review:{}", correction.id),
                    );
                    return Some(CarryForward {
                        source: CorrectionSource::Review(correction.id),
                        arrivals: correction.corrected_arrivals.clone(),
                        departures: correction.corrected_departures.clone(),
                    });
                }
            }
        }
        Err(err) => {
            warn!(airport = %airport, error = %err, "review history unavailable, skipping carry-forward");
        }
    }

    let text = raw_text?;
    let sig = PhraseSignature::from_text(text);
    if sig.is_empty() {
        return None;
    }

    match patterns.lookup(airport, &sig.digest()) {
        Ok(Some(pattern)) if pattern.success_rate >= MIN_PATTERN_SUCCESS_RATE => {
            if let Err(err) = patterns.record_application(pattern.id) {
                warn!(airport = %airport, error = %err, "failed to bump pattern application counter");
            }
            debug!(airport = %airport, signature = %sig, "signature matched learned pattern");
            crate::obs::emit_carry_forward_applied(airport, &format!("pattern:{}", pattern.id));
            Some(CarryForward {
                source: CorrectionSource::LearnedPattern(pattern.id),
                arrivals: pattern.expected_arrivals,
                departures: pattern.expected_departures,
            })
        }
        Ok(_) => None,
        Err(err) => {
            warn!(airport = %airport, error = %err, "pattern store unavailable, skipping carry-forward");
            None
        }
    }
}
