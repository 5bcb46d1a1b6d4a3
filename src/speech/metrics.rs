//! Speech playback counters.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters for one playback adapter.
#[derive(Debug, Default)]
pub struct SpeechMetrics {
    /// Utterances requested by callers (fallbacks not included)
    requested: AtomicUsize,

    /// Utterances cut off by a newer request
    preempted: AtomicUsize,

    /// Fallback utterances issued (voiceless announcement or error retry)
    fallbacks: AtomicUsize,

    /// Utterances that ended in an error without a retry
    failures: AtomicUsize,
}

impl SpeechMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_request(&self) {
        self.requested.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_preemption(&self) {
        self.preempted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fallback(&self) {
        self.fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn requested(&self) -> usize {
        self.requested.load(Ordering::Relaxed)
    }

    pub fn preempted(&self) -> usize {
        self.preempted.load(Ordering::Relaxed)
    }

    pub fn fallbacks(&self) -> usize {
        self.fallbacks.load(Ordering::Relaxed)
    }

    pub fn failures(&self) -> usize {
        self.failures.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let requested = self.requested();
        let fallbacks = self.fallbacks();
        let fallback_rate = if requested > 0 {
            (fallbacks as f64 / requested as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            requested,
            preempted: self.preempted(),
            fallbacks,
            failures: self.failures(),
            fallback_rate,
        }
    }
}

/// Snapshot of playback statistics.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub requested: usize,
    pub preempted: usize,
    pub fallbacks: usize,
    pub failures: usize,

    /// Fallbacks per requested utterance as a percentage (0-100)
    pub fallback_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_metrics_are_zero() {
        let report = SpeechMetrics::new().report();
        assert_eq!(report.requested, 0);
        assert_eq!(report.preempted, 0);
        assert_eq!(report.fallbacks, 0);
        assert_eq!(report.failures, 0);
        assert_eq!(report.fallback_rate, 0.0);
    }

    #[test]
    fn test_fallback_rate() {
        let metrics = SpeechMetrics::new();
        for _ in 0..4 {
            metrics.record_request();
        }
        metrics.record_fallback();

        let report = metrics.report();
        assert_eq!(report.requested, 4);
        assert_eq!(report.fallbacks, 1);
        assert!((report.fallback_rate - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_report_serializes() {
        let metrics = SpeechMetrics::new();
        metrics.record_request();
        metrics.record_preemption();
        metrics.record_failure();

        let json = serde_json::to_value(metrics.report()).unwrap();
        assert_eq!(json["requested"], 1);
        assert_eq!(json["preempted"], 1);
        assert_eq!(json["failures"], 1);
    }
}
