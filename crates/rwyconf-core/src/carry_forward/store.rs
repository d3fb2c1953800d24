//! Store seams for the human-review history and learned pattern corrections.
//!
//! Persistence lives outside the engine; these traits describe exactly the
//! reads (and the one counter write) the carry-forward matcher needs. Read
//! freshness and write atomicity are the store's responsibility.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::signature::SignatureDigest;
use crate::domain::designator::Designator;

/// A human-reviewed correction of one parsed configuration. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Correction {
    pub id: Uuid,
    pub airport_code: String,
    /// The sets the engine originally parsed.
    pub parsed_arrivals: BTreeSet<Designator>,
    pub parsed_departures: BTreeSet<Designator>,
    /// The sets the reviewer confirmed.
    pub corrected_arrivals: BTreeSet<Designator>,
    pub corrected_departures: BTreeSet<Designator>,
    pub reviewed_at: DateTime<Utc>,
    pub note: Option<String>,
}

/// A learned phrase-pattern correction, keyed by airport and signature.
///
/// Updated in place on reuse: `times_applied` counts automatic
/// applications, `success_rate` is maintained by the review workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternCorrection {
    pub id: Uuid,
    pub airport_code: String,
    pub signature: SignatureDigest,
    /// The phrase key the signature was derived from, kept for review display.
    pub phrase_key: String,
    pub expected_arrivals: BTreeSet<Designator>,
    pub expected_departures: BTreeSet<Designator>,
    pub success_rate: f64,
    pub times_applied: u64,
}

/// Errors surfaced by correction stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("record not found: {0}")]
    NotFound(Uuid),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Read access to the append-only review history.
pub trait CorrectionHistory: Send + Sync {
    /// Corrections for `airport` reviewed at or after `since`, newest first.
    fn reviewed_since(&self, airport: &str, since: DateTime<Utc>) -> StoreResult<Vec<Correction>>;
}

/// Read/update access to learned pattern corrections.
pub trait PatternCorrectionStore: Send + Sync {
    /// Look up the correction stored for `(airport, signature)`.
    fn lookup(
        &self,
        airport: &str,
        signature: &SignatureDigest,
    ) -> StoreResult<Option<PatternCorrection>>;

    /// Atomically bump the application counter for `id`.
    ///
    /// Concurrent parses may race here; the increment must be a single
    /// store operation, not read-modify-write in the caller.
    fn record_application(&self, id: Uuid) -> StoreResult<()>;
}
