//! Logging and metrics for App Toolkit
//!
//! This crate provides:
//! - A `tracing` subscriber writing to stderr, as compact text or JSON lines
//! - In-process counters, gauges and duration summaries for pipeline stages

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

static METRICS: Lazy<MetricsRegistry> = Lazy::new(MetricsRegistry::new);

/// Correlates log lines and exported metrics of one run
static SESSION_ID: Lazy<String> = Lazy::new(|| Uuid::new_v4().to_string());

/// Install the global tracing subscriber
///
/// `RUST_LOG` takes precedence over `config.log_level`. Logs go to stderr so
/// command output on stdout stays machine-readable.
pub fn init_with_config(config: TelemetryConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.json {
        let layer = fmt::layer().json().with_writer(std::io::stderr).with_target(false);
        tracing::subscriber::set_global_default(registry.with(layer))
    } else {
        let layer = fmt::layer().with_writer(std::io::stderr).with_target(false).compact();
        tracing::subscriber::set_global_default(registry.with(layer))
    };

    result.map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

    tracing::debug!(
        session_id = %session_id(),
        version = env!("CARGO_PKG_VERSION"),
        "Telemetry initialized"
    );

    Ok(())
}

/// Identifier of this process run
pub fn session_id() -> &'static str {
    &SESSION_ID
}

/// Log output settings
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Default level filter, in `EnvFilter` syntax
    pub log_level: String,
    /// Emit JSON lines instead of compact text
    pub json: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            json: false,
        }
    }
}

impl TelemetryConfig {
    /// Set the default level filter
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Emit JSON log lines
    #[must_use]
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }
}

/// In-process metrics for the catalog pipeline
///
/// Values live for the lifetime of the process and are printed by the CLI
/// on request. Durations keep a running summary instead of every sample.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    metrics: Mutex<BTreeMap<&'static str, Metric>>,
}

#[derive(Debug, Clone, Copy)]
enum Metric {
    Counter(u64),
    Gauge(u64),
    Durations(DurationSummary),
}

impl MetricsRegistry {
    /// Empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_metrics<R>(&self, f: impl FnOnce(&mut BTreeMap<&'static str, Metric>) -> R) -> R {
        let mut metrics = self.metrics.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut metrics)
    }

    /// Add one to the counter `name`
    pub fn increment(&self, name: &'static str) {
        self.with_metrics(|metrics| match metrics.entry(name).or_insert(Metric::Counter(0)) {
            Metric::Counter(count) => *count += 1,
            other => tracing::warn!(metric = name, kind = ?other, "Metric is not a counter"),
        });
    }

    /// Current value of the counter `name` (0 when never incremented)
    pub fn counter(&self, name: &'static str) -> u64 {
        self.with_metrics(|metrics| match metrics.get(name) {
            Some(Metric::Counter(count)) => *count,
            _ => 0,
        })
    }

    /// Set the gauge `name`
    pub fn gauge(&self, name: &'static str, value: u64) {
        self.with_metrics(|metrics| {
            metrics.insert(name, Metric::Gauge(value));
        });
    }

    /// Add `duration` to the summary kept under `name`
    pub fn record_duration(&self, name: &'static str, duration: Duration) {
        let millis = duration.as_secs_f64() * 1000.0;
        self.with_metrics(|metrics| {
            match metrics
                .entry(name)
                .or_insert(Metric::Durations(DurationSummary::default()))
            {
                Metric::Durations(summary) => summary.add(millis),
                other => tracing::warn!(metric = name, kind = ?other, "Metric is not a duration"),
            }
        });
        tracing::debug!(metric = name, duration_ms = duration.as_millis(), "Duration recorded");
    }

    /// Copy of every recorded value
    pub fn snapshot(&self) -> MetricsSnapshot {
        let mut snapshot = MetricsSnapshot {
            session_id: session_id(),
            counters: BTreeMap::new(),
            gauges: BTreeMap::new(),
            durations: BTreeMap::new(),
        };

        self.with_metrics(|metrics| {
            for (&name, metric) in metrics.iter() {
                match *metric {
                    Metric::Counter(count) => {
                        snapshot.counters.insert(name, count);
                    }
                    Metric::Gauge(value) => {
                        snapshot.gauges.insert(name, value);
                    }
                    Metric::Durations(summary) => {
                        snapshot.durations.insert(name, summary);
                    }
                }
            }
        });

        snapshot
    }

    /// Snapshot as a JSON value
    pub fn export_json(&self) -> serde_json::Value {
        serde_json::to_value(self.snapshot()).unwrap_or(serde_json::Value::Null)
    }
}

/// Point-in-time copy of a [`MetricsRegistry`]
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    /// Session the values belong to
    pub session_id: &'static str,
    /// Counter values by name
    pub counters: BTreeMap<&'static str, u64>,
    /// Gauge values by name
    pub gauges: BTreeMap<&'static str, u64>,
    /// Duration summaries by name, in milliseconds
    pub durations: BTreeMap<&'static str, DurationSummary>,
}

/// Running summary of recorded durations, in milliseconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DurationSummary {
    /// Number of samples
    pub count: u64,
    /// Sum of all samples
    pub total_ms: f64,
    /// Shortest sample
    pub min_ms: f64,
    /// Longest sample
    pub max_ms: f64,
}

impl DurationSummary {
    fn add(&mut self, millis: f64) {
        if self.count == 0 {
            self.min_ms = millis;
            self.max_ms = millis;
        } else {
            self.min_ms = self.min_ms.min(millis);
            self.max_ms = self.max_ms.max(millis);
        }
        self.count += 1;
        self.total_ms += millis;
    }

    /// Average sample, 0 when empty
    #[must_use]
    pub fn mean_ms(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total_ms / self.count as f64
        }
    }
}

/// Process-wide registry
pub fn metrics() -> &'static MetricsRegistry {
    &METRICS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_starts_at_zero() {
        let registry = MetricsRegistry::new();
        assert_eq!(registry.counter("catalog.fetch.failures"), 0);

        registry.increment("catalog.fetch.failures");
        registry.increment("catalog.fetch.failures");
        assert_eq!(registry.counter("catalog.fetch.failures"), 2);
    }

    #[test]
    fn test_gauge_keeps_last_value() {
        let registry = MetricsRegistry::new();
        registry.gauge("catalog.apps", 12);
        registry.gauge("catalog.apps", 9);

        assert_eq!(registry.snapshot().gauges["catalog.apps"], 9);
    }

    #[test]
    fn test_duration_summary() {
        let registry = MetricsRegistry::new();
        registry.record_duration("catalog.fetch_ms", Duration::from_millis(250));
        registry.record_duration("catalog.fetch_ms", Duration::from_millis(750));
        registry.record_duration("catalog.fetch_ms", Duration::from_millis(500));

        let summary = registry.snapshot().durations["catalog.fetch_ms"];
        assert_eq!(summary.count, 3);
        assert_eq!(summary.min_ms, 250.0);
        assert_eq!(summary.max_ms, 750.0);
        assert_eq!(summary.mean_ms(), 500.0);
    }

    #[test]
    fn test_kind_mismatch_leaves_metric_alone() {
        let registry = MetricsRegistry::new();
        registry.gauge("catalog.apps", 3);
        registry.increment("catalog.apps");

        assert_eq!(registry.counter("catalog.apps"), 0);
        assert_eq!(registry.snapshot().gauges["catalog.apps"], 3);
    }

    #[test]
    fn test_export_shape() {
        let registry = MetricsRegistry::new();
        registry.increment("catalog.fetch.failures");
        registry.record_duration("catalog.fetch_ms", Duration::from_millis(40));

        let exported = registry.export_json();
        assert_eq!(exported["session_id"], session_id());
        assert_eq!(exported["counters"]["catalog.fetch.failures"], 1);
        assert_eq!(exported["durations"]["catalog.fetch_ms"]["count"], 1);
        assert!(exported["gauges"].as_object().is_some_and(serde_json::Map::is_empty));
    }

    #[test]
    fn test_session_id_is_a_uuid() {
        assert!(Uuid::parse_str(session_id()).is_ok());
        assert_eq!(session_id(), session_id());
    }
}
