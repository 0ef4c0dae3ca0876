//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Puzzle selection (search attempts, outcomes)
//! - Guesses
//! - External services (TMDB, translation)

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Puzzle Selection Metrics
// =============================================================================

/// Popular pages sampled while looking for a puzzle.
pub static SEARCH_ATTEMPTS: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "panned_search_attempts_total",
        "Total popular pages sampled while selecting puzzles",
    )
    .unwrap()
});

/// Puzzle selections by result.
pub static PUZZLES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("panned_puzzles_total", "Total puzzle selections"),
        &["result"], // "found", "not_found"
    )
    .unwrap()
});

/// Time spent selecting a puzzle.
pub static PUZZLE_SELECTION_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "panned_puzzle_selection_duration_seconds",
            "Duration of puzzle selection",
        )
        .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]),
        &["result"],
    )
    .unwrap()
});

/// Reviews that fell back to their original language.
pub static TRANSLATION_FALLBACKS: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "panned_translation_fallbacks_total",
        "Total reviews delivered untranslated after a translation failure",
    )
    .unwrap()
});

// =============================================================================
// Guess Metrics
// =============================================================================

/// Guesses by result.
pub static GUESSES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("panned_guesses_total", "Total guesses submitted"),
        &["result"], // "correct", "wrong", "rejected"
    )
    .unwrap()
});

// =============================================================================
// External Service Metrics
// =============================================================================

/// External service request duration.
pub static EXTERNAL_SERVICE_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "panned_external_service_duration_seconds",
            "Duration of external service calls",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["service", "operation"],
    )
    .unwrap()
});

/// External service requests total.
pub static EXTERNAL_SERVICE_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "panned_external_service_requests_total",
            "Total external service requests",
        ),
        &["service", "operation", "status"], // status: "success", "error"
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        // Selection
        Box::new(SEARCH_ATTEMPTS.clone()),
        Box::new(PUZZLES_TOTAL.clone()),
        Box::new(PUZZLE_SELECTION_DURATION.clone()),
        Box::new(TRANSLATION_FALLBACKS.clone()),
        // Guesses
        Box::new(GUESSES_TOTAL.clone()),
        // External services
        Box::new(EXTERNAL_SERVICE_DURATION.clone()),
        Box::new(EXTERNAL_SERVICE_REQUESTS.clone()),
    ]
}
