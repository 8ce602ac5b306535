//! Logging and timing for Parfum catalog tools
//!
//! - Structured logging with tracing, written to stderr
//! - Named operation timers with per-run statistics
//! - A session id for correlating one run's log lines

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

/// Global timing registry
static TIMINGS: Lazy<Timings> = Lazy::new(Timings::new);

/// Global session ID for correlating logs
static SESSION_ID: Lazy<String> = Lazy::new(|| Uuid::new_v4().to_string());

/// Initialize logging.
///
/// `RUST_LOG` takes precedence over `config.log_level`.
pub fn init_with_config(config: TelemetryConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| anyhow::anyhow!("Invalid log level {:?}: {}", config.log_level, e))?;

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(config.show_target);

    let result = if config.json {
        tracing::subscriber::set_global_default(
            tracing_subscriber::registry().with(filter).with(layer.json()),
        )
    } else {
        tracing::subscriber::set_global_default(
            tracing_subscriber::registry().with(filter).with(layer.compact()),
        )
    };
    result.map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

    tracing::debug!(
        session_id = %session_id(),
        version = env!("CARGO_PKG_VERSION"),
        "Telemetry initialized"
    );

    Ok(())
}

/// Get the current session ID
pub fn session_id() -> &'static str {
    &SESSION_ID
}

/// Telemetry configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub show_target: bool,
    pub json: bool,
}

impl TelemetryConfig {
    /// Configuration at the given level filter
    pub fn with_level(level: impl Into<String>) -> Self {
        Self {
            log_level: level.into(),
            ..Self::default()
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            show_target: false,
            json: false,
        }
    }
}

/// Durations recorded by [`Timer`], keyed by operation name
pub struct Timings {
    samples: Mutex<BTreeMap<String, Vec<f64>>>,
}

impl Timings {
    fn new() -> Self {
        Self {
            samples: Mutex::new(BTreeMap::new()),
        }
    }

    /// Record one duration in milliseconds
    pub fn record(&self, name: &str, millis: f64) {
        if let Ok(mut samples) = self.samples.lock() {
            samples.entry(name.to_string()).or_default().push(millis);
        }
    }

    /// Statistics per operation, ordered by name
    pub fn summary(&self) -> Vec<(String, TimingStats)> {
        match self.samples.lock() {
            Ok(samples) => samples
                .iter()
                .map(|(name, values)| (name.clone(), TimingStats::from_values(values)))
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Emit one debug event per recorded operation
    pub fn log_summary(&self) {
        for (name, stats) in self.summary() {
            tracing::debug!(
                operation = %name,
                count = stats.count,
                total_ms = stats.total,
                min_ms = stats.min,
                mean_ms = stats.mean,
                max_ms = stats.max,
                "Timing summary"
            );
        }
    }
}

/// Duration statistics in milliseconds
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimingStats {
    pub count: usize,
    pub total: f64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl TimingStats {
    fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self {
                count: 0,
                total: 0.0,
                min: 0.0,
                max: 0.0,
                mean: 0.0,
            };
        }

        let count = values.len();
        let total: f64 = values.iter().sum();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Self {
            count,
            total,
            min,
            max,
            mean: total / count as f64,
        }
    }
}

/// Get the global timing registry
pub fn timings() -> &'static Timings {
    &TIMINGS
}

/// Timer for measuring operation duration
///
/// Records into [`timings()`] once, either on [`Timer::stop`] or on drop.
pub struct Timer {
    name: String,
    start: Instant,
    recorded: bool,
}

impl Timer {
    /// Start a new timer
    pub fn start(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start: Instant::now(),
            recorded: false,
        }
    }

    /// Stop the timer and record the duration
    pub fn stop(mut self) -> Duration {
        let duration = self.record();
        tracing::debug!(
            operation = %self.name,
            duration_ms = duration.as_millis(),
            "Timer completed"
        );
        duration
    }

    fn record(&mut self) -> Duration {
        let duration = self.start.elapsed();
        if !self.recorded {
            timings().record(&self.name, duration.as_secs_f64() * 1000.0);
            self.recorded = true;
        }
        duration
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        self.record();
    }
}

/// Time the rest of the enclosing scope inside an info span
#[macro_export]
macro_rules! timed_span {
    ($name:expr) => {
        let _timer = $crate::Timer::start($name);
        let _span = tracing::info_span!($name).entered();
    };
    ($name:expr, $($field:tt)*) => {
        let _timer = $crate::Timer::start($name);
        let _span = tracing::info_span!($name, $($field)*).entered();
    };
}
