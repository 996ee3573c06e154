use std::collections::HashMap;

use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};
use tracing::{info, warn};

use super::{
    DURATION_SECONDS, HELLO_WORLD_REQUESTS_TOTAL, INVOCATIONS_TOTAL, MetricEvent, STATUS_TOTAL,
    Telemetry,
};
use crate::errors::HelloError;

/// Holds the four handler instruments in a private Prometheus registry.
///
/// The registry is created once per process and every instrument carries a
/// constant `service` label.
#[derive(Clone)]
pub struct PrometheusTelemetry {
    registry: Registry,
    pub invocations: IntCounterVec,
    pub hello_world_requests: IntCounterVec,
    pub status: IntCounterVec,
    pub duration: HistogramVec,
}

impl PrometheusTelemetry {
    /// # Errors
    ///
    /// Returns an error if any instrument fails validation or registration.
    pub fn new(service_name: &str) -> Result<Self, HelloError> {
        let mut const_labels = HashMap::new();
        const_labels.insert("service".to_string(), service_name.to_string());
        let registry = Registry::new_custom(None, Some(const_labels))?;

        let invocations = IntCounterVec::new(
            Opts::new(
                INVOCATIONS_TOTAL,
                "Total number of Lambda function invocations",
            ),
            &["runtime", "function_name", "function_version"],
        )?;
        let hello_world_requests = IntCounterVec::new(
            Opts::new(
                HELLO_WORLD_REQUESTS_TOTAL,
                "Total number of hello world requests",
            ),
            &["runtime"],
        )?;
        let status = IntCounterVec::new(
            Opts::new(STATUS_TOTAL, "Total number of Lambda responses by status"),
            &["runtime", "function_name", "status"],
        )?;
        let duration = HistogramVec::new(
            HistogramOpts::new(
                DURATION_SECONDS,
                "Lambda function execution duration in seconds",
            ),
            &["runtime", "function_name", "status"],
        )?;

        registry.register(Box::new(invocations.clone()))?;
        registry.register(Box::new(hello_world_requests.clone()))?;
        registry.register(Box::new(status.clone()))?;
        registry.register(Box::new(duration.clone()))?;

        Ok(Self {
            registry,
            invocations,
            hello_world_requests,
            status,
            duration,
        })
    }

    /// Renders every instrument in the Prometheus text exposition format.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    pub fn render(&self) -> Result<String, HelloError> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| HelloError::Telemetry(e.to_string()))
    }
}

impl Telemetry for PrometheusTelemetry {
    fn record(&self, event: &MetricEvent) -> Result<(), HelloError> {
        let values: Vec<&str> = event.labels().into_iter().map(|(_, v)| v).collect();
        match event {
            MetricEvent::Invocation { .. } => {
                self.invocations.get_metric_with_label_values(values.as_slice())?.inc();
            }
            MetricEvent::BusinessEvent { .. } => {
                self.hello_world_requests
                    .get_metric_with_label_values(values.as_slice())?
                    .inc();
            }
            MetricEvent::Status { .. } => {
                self.status.get_metric_with_label_values(values.as_slice())?.inc();
            }
            MetricEvent::Duration { seconds, .. } => {
                if !seconds.is_finite() || *seconds < 0.0 {
                    return Err(HelloError::Telemetry(format!(
                        "{DURATION_SECONDS}: rejected sample {seconds}"
                    )));
                }
                self.duration
                    .get_metric_with_label_values(values.as_slice())?
                    .observe(*seconds);
            }
        }
        Ok(())
    }

    fn shutdown(&self) {
        match self.render() {
            Ok(snapshot) => info!("Final metrics snapshot:\n{}", snapshot),
            Err(e) => warn!("Failed to render metrics on shutdown: {}", e),
        }
    }
}
