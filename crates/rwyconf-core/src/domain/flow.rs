//! Traffic-flow classification from the active runway set.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::designator::Designator;

/// Overall traffic-flow direction for an airport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrafficFlow {
    North,
    Northeast,
    East,
    Southeast,
    South,
    Southwest,
    West,
    Northwest,
    /// Reserved for configurations spanning opposing flows.
    Mixed,
    Unknown,
}

impl std::fmt::Display for TrafficFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::North => write!(f, "north"),
            Self::Northeast => write!(f, "northeast"),
            Self::East => write!(f, "east"),
            Self::Southeast => write!(f, "southeast"),
            Self::South => write!(f, "south"),
            Self::Southwest => write!(f, "southwest"),
            Self::West => write!(f, "west"),
            Self::Northwest => write!(f, "northwest"),
            Self::Mixed => write!(f, "mixed"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Classify the overall traffic flow from the active arrival and departure
/// sets.
///
/// Each designator contributes its heading (number × 10°); the arithmetic
/// mean is bucketed into one of eight 45°-wide compass octants, with the
/// north octant wrapping across 0°/360°. An empty union yields
/// [`TrafficFlow::Unknown`].
pub fn determine_traffic_flow(
    arrivals: &BTreeSet<Designator>,
    departures: &BTreeSet<Designator>,
) -> TrafficFlow {
    let all: BTreeSet<&Designator> = arrivals.iter().chain(departures.iter()).collect();
    if all.is_empty() {
        return TrafficFlow::Unknown;
    }

    let sum: f64 = all.iter().map(|d| d.heading_degrees()).sum();
    let avg = sum / all.len() as f64;

    if !(22.5..337.5).contains(&avg) {
        TrafficFlow::North
    } else if avg < 67.5 {
        TrafficFlow::Northeast
    } else if avg < 112.5 {
        TrafficFlow::East
    } else if avg < 157.5 {
        TrafficFlow::Southeast
    } else if avg < 202.5 {
        TrafficFlow::South
    } else if avg < 247.5 {
        TrafficFlow::Southwest
    } else if avg < 292.5 {
        TrafficFlow::West
    } else {
        TrafficFlow::Northwest
    }
}
