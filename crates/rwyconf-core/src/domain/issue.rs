//! Structural-anomaly tags reported by the configuration validator.

use serde::{Deserialize, Serialize};

/// An anomaly detected in an extracted runway configuration.
///
/// Issues are findings, not failures — the validator returns them for
/// automated error reporting; nothing in the engine throws them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Issue {
    /// Confidence score below the review threshold.
    LowConfidence,
    /// No arrival runways where some were expected.
    MissingArrivals,
    /// No departure runways where some were expected.
    MissingDepartures,
    /// Opposite ends of the same strip both marked active.
    ReciprocalRunways,
    /// Implausibly large active runway set.
    TooManyRunways,
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LowConfidence => write!(f, "low_confidence"),
            Self::MissingArrivals => write!(f, "missing_arrivals"),
            Self::MissingDepartures => write!(f, "missing_departures"),
            Self::ReciprocalRunways => write!(f, "reciprocal_runways"),
            Self::TooManyRunways => write!(f, "too_many_runways"),
        }
    }
}
