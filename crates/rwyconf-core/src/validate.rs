//! Structural validation of an assembled configuration.

use std::collections::BTreeSet;

use crate::domain::configuration::RunwayConfiguration;
use crate::domain::issue::Issue;
use crate::split::{has_arrival_marker, has_departure_marker};

/// Confidence below this threshold warrants human review.
pub const REVIEW_CONFIDENCE_THRESHOLD: f64 = 0.9;

/// Active runway sets larger than this are suspicious.
pub const MAX_PLAUSIBLE_RUNWAYS: usize = 6;

/// Check a configuration for structural anomalies.
///
/// Order-independent; several issues may be reported at once. The split
/// markers are checked independently here (not via a single
/// classification) because merged raw text legitimately carries both.
pub fn validate_configuration(
    config: &RunwayConfiguration,
    arrival_only_airports: &BTreeSet<String>,
) -> Vec<Issue> {
    let mut issues = Vec::new();

    let is_arrival_half = has_arrival_marker(&config.raw_text);
    let is_departure_half = has_departure_marker(&config.raw_text);
    let is_split = is_arrival_half || is_departure_half;

    if config.confidence < REVIEW_CONFIDENCE_THRESHOLD {
        issues.push(Issue::LowConfidence);
    }

    if is_split {
        // A half only owes its home field.
        if is_departure_half && config.departures.is_empty() {
            issues.push(Issue::MissingDepartures);
        }
        if is_arrival_half && config.arrivals.is_empty() {
            issues.push(Issue::MissingArrivals);
        }
    } else {
        if config.arrivals.is_empty() {
            issues.push(Issue::MissingArrivals);
        }
        if config.departures.is_empty() && !arrival_only_airports.contains(&config.airport_code) {
            issues.push(Issue::MissingDepartures);
        }
    }

    let all = config.all_runways();
    if all.iter().any(|d| all.contains(&d.reciprocal())) {
        issues.push(Issue::ReciprocalRunways);
    }

    if all.len() > MAX_PLAUSIBLE_RUNWAYS {
        issues.push(Issue::TooManyRunways);
    }

    issues
}
