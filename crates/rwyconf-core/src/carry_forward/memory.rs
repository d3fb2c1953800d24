//! In-memory correction store for hosts without a database and for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::signature::SignatureDigest;
use super::store::{
    Correction, CorrectionHistory, PatternCorrection, PatternCorrectionStore, StoreError,
    StoreResult,
};

#[derive(Default)]
struct Inner {
    corrections: Vec<Correction>,
    patterns: HashMap<(String, SignatureDigest), PatternCorrection>,
}

/// HashMap-backed implementation of both store traits.
///
/// Interior mutability keeps the trait methods `&self`, so the application
/// counter increments under the same lock as the lookup — the in-memory
/// equivalent of the store-side atomic update.
#[derive(Default)]
pub struct MemoryCorrectionStore {
    inner: Mutex<Inner>,
}

impl MemoryCorrectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a reviewed correction.
    pub fn record_correction(&self, correction: Correction) -> StoreResult<()> {
        let mut inner = self.lock()?;
        inner.corrections.push(correction);
        Ok(())
    }

    /// Insert or replace the pattern correction for its (airport, signature).
    pub fn upsert_pattern(&self, pattern: PatternCorrection) -> StoreResult<()> {
        let mut inner = self.lock()?;
        inner.patterns.insert(
            (pattern.airport_code.clone(), pattern.signature.clone()),
            pattern,
        );
        Ok(())
    }

    /// Number of stored reviewed corrections.
    pub fn correction_count(&self) -> usize {
        self.lock().map(|inner| inner.corrections.len()).unwrap_or(0)
    }

    fn lock(&self) -> StoreResult<std::sync::MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Unavailable("poisoned lock".into()))
    }
}

impl CorrectionHistory for MemoryCorrectionStore {
    fn reviewed_since(&self, airport: &str, since: DateTime<Utc>) -> StoreResult<Vec<Correction>> {
        let inner = self.lock()?;
        let mut rows: Vec<Correction> = inner
            .corrections
            .iter()
            .filter(|c| c.airport_code == airport && c.reviewed_at >= since)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.reviewed_at.cmp(&a.reviewed_at));
        Ok(rows)
    }
}

impl PatternCorrectionStore for MemoryCorrectionStore {
    fn lookup(
        &self,
        airport: &str,
        signature: &SignatureDigest,
    ) -> StoreResult<Option<PatternCorrection>> {
        let inner = self.lock()?;
        Ok(inner
            .patterns
            .get(&(airport.to_string(), signature.clone()))
            .cloned())
    }

    fn record_application(&self, id: Uuid) -> StoreResult<()> {
        let mut inner = self.lock()?;
        let pattern = inner
            .patterns
            .values_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound(id))?;
        pattern.times_applied += 1;
        Ok(())
    }
}
