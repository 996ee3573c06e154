//! Telemetry instruments recorded by the request handler.
//!
//! The handler only sees the [`Telemetry`] trait. A single implementation is
//! built at process start by [`from_config`] and shared by reference for the
//! lifetime of the process.

pub mod log;
pub mod registry;

use std::future::{Ready, ready};
use std::sync::Arc;

use tracing::info;

use crate::core::config::{AppConfig, TelemetryExporter};
use crate::core::models::Outcome;
use crate::errors::HelloError;

pub use self::log::LogTelemetry;
pub use self::registry::PrometheusTelemetry;

pub const INVOCATIONS_TOTAL: &str = "lambda_invocations_total";
pub const HELLO_WORLD_REQUESTS_TOTAL: &str = "hello_world_requests_total";
pub const STATUS_TOTAL: &str = "lambda_status_total";
pub const DURATION_SECONDS: &str = "lambda_duration_seconds";

/// One measurement emitted by the handler.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricEvent {
    Invocation {
        runtime: String,
        function_name: String,
        function_version: String,
    },
    BusinessEvent {
        runtime: String,
    },
    Status {
        runtime: String,
        function_name: String,
        outcome: Outcome,
    },
    Duration {
        runtime: String,
        function_name: String,
        outcome: Outcome,
        seconds: f64,
    },
}

impl MetricEvent {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            MetricEvent::Invocation { .. } => INVOCATIONS_TOTAL,
            MetricEvent::BusinessEvent { .. } => HELLO_WORLD_REQUESTS_TOTAL,
            MetricEvent::Status { .. } => STATUS_TOTAL,
            MetricEvent::Duration { .. } => DURATION_SECONDS,
        }
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        match self {
            MetricEvent::Duration { seconds, .. } => *seconds,
            _ => 1.0,
        }
    }

    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            MetricEvent::Status { outcome, .. } | MetricEvent::Duration { outcome, .. } => {
                Some(*outcome)
            }
            _ => None,
        }
    }

    /// Label pairs in the order the instruments declare them.
    #[must_use]
    pub fn labels(&self) -> Vec<(&'static str, &str)> {
        match self {
            MetricEvent::Invocation {
                runtime,
                function_name,
                function_version,
            } => vec![
                ("runtime", runtime.as_str()),
                ("function_name", function_name.as_str()),
                ("function_version", function_version.as_str()),
            ],
            MetricEvent::BusinessEvent { runtime } => vec![("runtime", runtime.as_str())],
            MetricEvent::Status {
                runtime,
                function_name,
                outcome,
            }
            | MetricEvent::Duration {
                runtime,
                function_name,
                outcome,
                ..
            } => vec![
                ("runtime", runtime.as_str()),
                ("function_name", function_name.as_str()),
                ("status", outcome.as_str()),
            ],
        }
    }
}

/// Sink for metric events.
///
/// Recording is fire-and-forget from the handler's point of view: an `Err`
/// is logged and never changes the response.
pub trait Telemetry: Send + Sync {
    fn record(&self, event: &MetricEvent) -> Result<(), HelloError>;

    /// Called once when the process is shutting down.
    fn shutdown(&self) {}
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetry;

impl Telemetry for NoopTelemetry {
    fn record(&self, _event: &MetricEvent) -> Result<(), HelloError> {
        Ok(())
    }
}

/// Builds the process-wide telemetry client selected by `config`.
///
/// # Errors
///
/// Returns an error if the Prometheus instruments cannot be registered.
pub fn from_config(config: &AppConfig) -> Result<Arc<dyn Telemetry>, HelloError> {
    let telemetry: Arc<dyn Telemetry> = match config.exporter {
        TelemetryExporter::Prometheus => Arc::new(PrometheusTelemetry::new(&config.service_name)?),
        TelemetryExporter::Log => Arc::new(LogTelemetry),
        TelemetryExporter::None => Arc::new(NoopTelemetry),
    };
    Ok(telemetry)
}

/// Builds the hook passed to `lambda_runtime::spawn_graceful_shutdown_handler`.
///
/// Lambda stops the process with SIGTERM rather than by ending the runtime
/// loop, so this is where the final telemetry flush happens.
pub fn shutdown_hook(telemetry: Arc<dyn Telemetry>) -> impl FnOnce() -> Ready<()> + Send + 'static {
    move || {
        info!("Shutting down telemetry");
        telemetry.shutdown();
        ready(())
    }
}
