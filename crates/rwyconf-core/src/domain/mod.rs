//! Domain model: designators, flows, configurations, and validation issues.

pub mod configuration;
pub mod designator;
pub mod flow;
pub mod issue;

pub use configuration::{Broadcast, HalfConfidence, MergeMeta, RunwayConfiguration};
pub use designator::{Designator, DesignatorError, ParallelSuffix};
pub use flow::{determine_traffic_flow, TrafficFlow};
pub use issue::Issue;
