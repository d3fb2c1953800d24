//! Structured observability hooks for the extraction pipeline.
//!
//! This module provides:
//! - Airport-scoped tracing spans via the `ParseSpan` RAII guard
//! - Emission functions for key pipeline events: parse completion, pair
//!   merges, carry-forward applications, validation findings
//!
//! Events are emitted at `info!` level; configure verbosity through the
//! `RUST_LOG` environment variable (see [`crate::telemetry::init_tracing`]).

use tracing::info;

use crate::domain::flow::TrafficFlow;

/// RAII guard that enters an airport-scoped tracing span for the duration
/// of one parse.
pub struct ParseSpan {
    _span: tracing::span::EnteredSpan,
}

impl ParseSpan {
    /// Create and enter a span tagged with the airport code.
    pub fn enter(airport: &str) -> Self {
        let span = tracing::info_span!("rwyconf.parse", airport = %airport);
        Self {
            _span: span.entered(),
        }
    }
}

/// Emit event: one broadcast parsed into a configuration.
pub fn emit_parse_completed(
    airport: &str,
    arrivals: usize,
    departures: usize,
    flow: TrafficFlow,
    confidence: f64,
) {
    info!(
        event = "parse.completed",
        airport = %airport,
        arrivals = arrivals,
        departures = departures,
        flow = %flow,
        confidence = confidence,
    );
}

/// Emit event: an arrival/departure pair merged into one configuration.
pub fn emit_pair_merged(airport: &str, gap_minutes: i64, confidence: f64) {
    info!(
        event = "pair.merged",
        airport = %airport,
        gap_minutes = gap_minutes,
        confidence = confidence,
    );
}

/// Emit event: a carried-forward correction replaced the current parse.
pub fn emit_carry_forward_applied(airport: &str, source: &str) {
    info!(event = "carry_forward.applied", airport = %airport, source = %source);
}

/// Emit event: validation reported anomalies on a configuration.
pub fn emit_issues_found(airport: &str, count: usize) {
    info!(event = "validation.issues", airport = %airport, count = count);
}
