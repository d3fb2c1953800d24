//! Broadcast input and runway-configuration output records.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::designator::Designator;
use super::flow::TrafficFlow;

/// One captured advisory broadcast — the engine's read-only input.
///
/// Assigned an identifier by the collection layer; immutable once captured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Broadcast {
    pub id: Uuid,
    pub airport_code: String,
    pub captured_at: DateTime<Utc>,
    pub information_letter: Option<char>,
    pub raw_text: String,
}

/// Per-half confidence breakdown retained on a merged configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HalfConfidence {
    pub arrivals: f64,
    pub departures: f64,
}

/// Provenance of a configuration assembled from a split-broadcast pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MergeMeta {
    /// Whether this configuration was derived from an arrival/departure pair.
    pub merged_from_pair: bool,
    /// Individual half confidences, present only on merged records.
    pub half_confidence: Option<HalfConfidence>,
    /// Source broadcast of the arrival half, when known.
    pub arrival_source: Option<Uuid>,
    /// Source broadcast of the departure half, when known.
    pub departure_source: Option<Uuid>,
}

/// The engine's output: which runways a broadcast states are in use.
///
/// # Invariants
///
/// Designator sets are ordered and deduplicated by construction
/// (`BTreeSet`). Arrival and departure sets may overlap, but a reciprocal
/// pair inside their union is always a validation anomaly — the engine
/// reports it and never silently corrects it. A configuration is created
/// once per parse and never mutated; a changed broadcast produces a new
/// configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunwayConfiguration {
    pub airport_code: String,
    /// Capture time when parsed from a [`Broadcast`], parse time otherwise.
    pub timestamp: DateTime<Utc>,
    pub information_letter: Option<char>,
    pub arrivals: BTreeSet<Designator>,
    pub departures: BTreeSet<Designator>,
    pub traffic_flow: TrafficFlow,
    /// Airport-specific configuration label (e.g. "South Flow"), when known.
    pub configuration_name: Option<String>,
    /// Extraction confidence in `[0.0, 1.0]`.
    pub confidence: f64,
    pub raw_text: String,
    #[serde(default)]
    pub merge: MergeMeta,
    /// Source broadcast, when parsed from a [`Broadcast`].
    pub source: Option<Uuid>,
}

impl RunwayConfiguration {
    /// Union of arrival and departure designators.
    pub fn all_runways(&self) -> BTreeSet<Designator> {
        self.arrivals.union(&self.departures).copied().collect()
    }

    /// Whether extraction found nothing at all.
    pub fn is_empty(&self) -> bool {
        self.arrivals.is_empty() && self.departures.is_empty()
    }
}
