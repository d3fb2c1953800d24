//! rwyconf Core Library
//!
//! Recovers a structured "which runways are currently used for
//! arrivals/departures" fact from free-text airport advisory broadcasts:
//! text normalization, rule-based extraction under genuine linguistic
//! ambiguity, split-broadcast reconciliation, confidence scoring,
//! structural validation, and carry-forward of human corrections.

pub mod carry_forward;
pub mod confidence;
pub mod domain;
pub mod extract;
pub mod normalize;
pub mod obs;
pub mod parser;
pub mod split;
pub mod telemetry;
pub mod validate;

pub use domain::{
    determine_traffic_flow, Broadcast, Designator, DesignatorError, HalfConfidence, Issue,
    MergeMeta, ParallelSuffix, RunwayConfiguration, TrafficFlow,
};

pub use carry_forward::memory::MemoryCorrectionStore;
pub use carry_forward::signature::{PhraseSignature, SignatureDigest};
pub use carry_forward::store::{
    Correction, CorrectionHistory, PatternCorrection, PatternCorrectionStore, StoreError,
    StoreResult,
};
pub use carry_forward::{
    match_carry_forward, CarryForward, CorrectionSource, MIN_PATTERN_SUCCESS_RATE,
    REVIEW_RECENCY_HOURS, REVIEW_SCAN_LIMIT,
};

pub use confidence::{ConfidenceScorer, ScoringRules};
pub use extract::rules::{ExtractionRule, RuleOutcome, RuleSet};
pub use extract::Extractor;
pub use normalize::Normalizer;
pub use parser::{EngineConfig, RunwayLayout, RunwayParser};
pub use split::{
    classify, has_arrival_marker, has_departure_marker, merge_halves, BroadcastScope, MergeError,
    MergeWindow,
};
pub use validate::{validate_configuration, MAX_PLAUSIBLE_RUNWAYS, REVIEW_CONFIDENCE_THRESHOLD};

pub use obs::{
    emit_carry_forward_applied, emit_issues_found, emit_pair_merged, emit_parse_completed,
    ParseSpan,
};
pub use telemetry::{init_tracing, LogFormat};

/// rwyconf version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
