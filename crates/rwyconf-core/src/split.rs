//! Split-broadcast classification and pairwise merging.
//!
//! Some airports publish separate arrival-only and departure-only
//! broadcasts. Classification reads fixed header phrases from the
//! *original* text (the normalizer may strip the header region), and the
//! merger folds an eligible pair back into one configuration. Per-airport
//! chronological ordering of the halves is the caller's responsibility —
//! the merger checks the capture-time window but cannot detect reordered
//! input.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::configuration::{HalfConfidence, MergeMeta, RunwayConfiguration};
use crate::domain::flow::determine_traffic_flow;

const ARRIVAL_MARKERS: [&str; 2] = ["ARR INFO", "ARR ATIS"];
const DEPARTURE_MARKERS: [&str; 2] = ["DEP INFO", "DEP ATIS"];

/// Which operations a broadcast covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BroadcastScope {
    Unsplit,
    ArrivalHalf,
    DepartureHalf,
}

impl BroadcastScope {
    pub fn is_split(&self) -> bool {
        !matches!(self, Self::Unsplit)
    }
}

/// Whether the text carries an arrival-half header.
pub fn has_arrival_marker(text: &str) -> bool {
    let upper = text.to_ascii_uppercase();
    ARRIVAL_MARKERS.iter().any(|m| upper.contains(m))
}

/// Whether the text carries a departure-half header.
pub fn has_departure_marker(text: &str) -> bool {
    let upper = text.to_ascii_uppercase();
    DEPARTURE_MARKERS.iter().any(|m| upper.contains(m))
}

/// Classify a broadcast from its original, pre-normalization text.
///
/// When both marker families appear (e.g. in combined raw text of a merged
/// pair), the marker occurring earliest in the text wins.
pub fn classify(original_text: &str) -> BroadcastScope {
    let upper = original_text.to_ascii_uppercase();
    let arrival = ARRIVAL_MARKERS.iter().filter_map(|m| upper.find(m)).min();
    let departure = DEPARTURE_MARKERS.iter().filter_map(|m| upper.find(m)).min();

    match (arrival, departure) {
        (None, None) => BroadcastScope::Unsplit,
        (Some(_), None) => BroadcastScope::ArrivalHalf,
        (None, Some(_)) => BroadcastScope::DepartureHalf,
        (Some(a), Some(d)) => {
            if a <= d {
                BroadcastScope::ArrivalHalf
            } else {
                BroadcastScope::DepartureHalf
            }
        }
    }
}

/// Bounded capture-time window for pairing two halves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeWindow {
    /// Current-status queries pair tightly.
    CurrentStatus,
    /// Error-report pairing tolerates a wider gap.
    ErrorReport,
}

impl MergeWindow {
    pub fn duration(&self) -> Duration {
        match self {
            Self::CurrentStatus => Duration::minutes(15),
            Self::ErrorReport => Duration::minutes(30),
        }
    }
}

/// Why a pair of halves could not be merged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeError {
    #[error("airport mismatch: arrival half {arrival}, departure half {departure}")]
    AirportMismatch { arrival: String, departure: String },

    #[error("{role} half lacks its header marker")]
    NotAHalf { role: &'static str },

    #[error("halves captured {gap_minutes} min apart, window is {window_minutes} min")]
    OutsideWindow {
        gap_minutes: i64,
        window_minutes: i64,
    },
}

/// Merge an arrival half and a departure half into one configuration.
///
/// Each half's home field wins; designators accidentally present in the
/// opposite field fold in rather than being discarded. Merged confidence
/// is 1.0 when both halves score ≥ 0.9, otherwise their mean. The merged
/// record keeps both halves' confidences and source identifiers, and its
/// timestamp is the later of the two capture times, so merging the same
/// pair twice is idempotent.
pub fn merge_halves(
    arrival_half: &RunwayConfiguration,
    departure_half: &RunwayConfiguration,
    window: MergeWindow,
) -> Result<RunwayConfiguration, MergeError> {
    if arrival_half.airport_code != departure_half.airport_code {
        return Err(MergeError::AirportMismatch {
            arrival: arrival_half.airport_code.clone(),
            departure: departure_half.airport_code.clone(),
        });
    }
    if classify(&arrival_half.raw_text) != BroadcastScope::ArrivalHalf {
        return Err(MergeError::NotAHalf { role: "arrival" });
    }
    if classify(&departure_half.raw_text) != BroadcastScope::DepartureHalf {
        return Err(MergeError::NotAHalf { role: "departure" });
    }

    let gap = (arrival_half.timestamp - departure_half.timestamp).abs();
    let window_duration = window.duration();
    if gap > window_duration {
        return Err(MergeError::OutsideWindow {
            gap_minutes: gap.num_minutes(),
            window_minutes: window_duration.num_minutes(),
        });
    }

    let arrivals = arrival_half
        .arrivals
        .union(&departure_half.arrivals)
        .copied()
        .collect();
    let departures = departure_half
        .departures
        .union(&arrival_half.departures)
        .copied()
        .collect();

    let arr_conf = arrival_half.confidence;
    let dep_conf = departure_half.confidence;
    let confidence = if arr_conf >= 0.9 && dep_conf >= 0.9 {
        1.0
    } else {
        (arr_conf + dep_conf) / 2.0
    };

    let traffic_flow = determine_traffic_flow(&arrivals, &departures);
    crate::obs::emit_pair_merged(&arrival_half.airport_code, gap.num_minutes(), confidence);

    let letter = |c: Option<char>| c.map(String::from).unwrap_or_else(|| "?".into());
    let configuration_name = Some(format!(
        "Merged: ARR {} + DEP {}",
        letter(arrival_half.information_letter),
        letter(departure_half.information_letter),
    ));

    Ok(RunwayConfiguration {
        airport_code: arrival_half.airport_code.clone(),
        timestamp: arrival_half.timestamp.max(departure_half.timestamp),
        information_letter: arrival_half.information_letter,
        arrivals,
        departures,
        traffic_flow,
        configuration_name,
        confidence,
        raw_text: format!("{}\n---\n{}", arrival_half.raw_text, departure_half.raw_text),
        merge: MergeMeta {
            merged_from_pair: true,
            half_confidence: Some(HalfConfidence {
                arrivals: arr_conf,
                departures: dep_conf,
            }),
            arrival_source: arrival_half.source,
            departure_source: departure_half.source,
        },
        source: arrival_half.source,
    })
}
