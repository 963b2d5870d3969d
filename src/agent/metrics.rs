//! Turn metrics for the dialogue loop
//!
//! Metrics are emitted through the `metrics` facade and are no-ops unless a
//! recorder is installed (see [`init_metrics_exporter`]).
//!
//! # Metrics
//!
//! - `fitbot_turns_total`: Counter of handled turns by `source` and `outcome`
//! - `fitbot_completion_duration_seconds`: Histogram of completion latency by `outcome`
//! - `fitbot_history_evictions_total`: Counter of history entries evicted
//!
//! # Examples
//!
//! ```
//! use fitbot::agent::metrics::CompletionTimer;
//! use fitbot::providers::CompletionOutcome;
//!
//! let timer = CompletionTimer::start();
//! timer.finish(&CompletionOutcome::Unconfigured);
//! ```

use crate::providers::CompletionOutcome;
use metrics::{counter, histogram, increment_counter};
use std::time::{Duration, Instant};

/// Records a turn answered from the FAQ table
pub fn record_faq_turn() {
    increment_counter!("fitbot_turns_total", "source" => "faq", "outcome" => "faq");
}

/// Records evicted history entries
pub fn record_evictions(count: usize) {
    if count > 0 {
        counter!("fitbot_history_evictions_total", count as u64);
    }
}

/// Measures a single completion call
#[derive(Debug)]
pub struct CompletionTimer {
    start: Instant,
}

impl CompletionTimer {
    /// Starts timing a completion call
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Returns elapsed time since the call started
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Records latency and the turn counter for the given outcome
    ///
    /// # Returns
    ///
    /// The measured duration
    pub fn finish(self, outcome: &CompletionOutcome) -> Duration {
        let elapsed = self.start.elapsed();
        let label = outcome.label();
        histogram!(
            "fitbot_completion_duration_seconds",
            elapsed.as_secs_f64(),
            "outcome" => label
        );
        increment_counter!("fitbot_turns_total", "source" => "completion", "outcome" => label);
        elapsed
    }
}

/// Initializes the metrics exporter for Prometheus
///
/// Only has an effect when compiled with the `prometheus` feature; otherwise
/// it does nothing but is still safe to call.
pub fn init_metrics_exporter() {
    #[cfg(feature = "prometheus")]
    {
        use metrics_exporter_prometheus::PrometheusBuilder;
        let _ = PrometheusBuilder::new().install().map_err(|e| {
            tracing::warn!("Failed to install Prometheus exporter: {}", e);
        });
    }
}
