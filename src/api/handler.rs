//! Hello world request handler and its Lambda runtime adapter.
//!
//! Every invocation goes through [`RequestHandler::handle`], which:
//! - records the invocation and business-event counters
//! - builds and encodes the success body
//! - maps any failure while doing so to a 500 envelope
//! - records exactly one duration and one status measurement labeled with the
//!   outcome of the returned envelope

use std::sync::Arc;
use std::time::Instant;

use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info, warn};

use super::helpers;
use crate::core::config::AppConfig;
use crate::core::models::{InvocationContext, ResponseEnvelope, SuccessBody, utc_timestamp};
use crate::errors::HelloError;
use crate::telemetry::{MetricEvent, Telemetry};

/// Serializes the success body into the envelope's `body` string.
pub trait BodyEncoder: Send + Sync {
    fn encode(&self, body: &SuccessBody) -> Result<String, HelloError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct JsonEncoder;

impl BodyEncoder for JsonEncoder {
    fn encode(&self, body: &SuccessBody) -> Result<String, HelloError> {
        Ok(serde_json::to_string(body)?)
    }
}

pub struct RequestHandler {
    config: AppConfig,
    telemetry: Arc<dyn Telemetry>,
    encoder: Arc<dyn BodyEncoder>,
}

impl RequestHandler {
    #[must_use]
    pub fn new(config: AppConfig, telemetry: Arc<dyn Telemetry>) -> Self {
        Self {
            config,
            telemetry,
            encoder: Arc::new(JsonEncoder),
        }
    }

    #[must_use]
    pub fn with_encoder(mut self, encoder: Arc<dyn BodyEncoder>) -> Self {
        self.encoder = encoder;
        self
    }

    /// Handles one invocation. Always returns an envelope, with status 200 on
    /// success and 500 otherwise.
    #[tracing::instrument(level = "info", skip_all, fields(request_id = %ctx.request_id))]
    pub fn handle(&self, event: &Value, ctx: &InvocationContext) -> ResponseEnvelope {
        let start = Instant::now();
        let runtime = self.config.runtime.as_str();

        info!("Event: {}", event);
        info!("Context: {:?}", ctx);

        self.emit(&MetricEvent::Invocation {
            runtime: runtime.to_string(),
            function_name: ctx.function_name.clone(),
            function_version: ctx.function_version.clone(),
        });
        self.emit(&MetricEvent::BusinessEvent {
            runtime: runtime.to_string(),
        });

        let response = match self.build_success(ctx) {
            Ok(response) => response,
            Err(e) => {
                error!("Error processing request: {}", e);
                helpers::internal_error(runtime, &ctx.request_id)
            }
        };

        let outcome = response.outcome();
        self.emit(&MetricEvent::Duration {
            runtime: runtime.to_string(),
            function_name: ctx.function_name.clone(),
            outcome,
            seconds: start.elapsed().as_secs_f64(),
        });
        self.emit(&MetricEvent::Status {
            runtime: runtime.to_string(),
            function_name: ctx.function_name.clone(),
            outcome,
        });

        info!(
            status_code = response.status_code,
            "Response: {}", response.body
        );
        response
    }

    fn build_success(&self, ctx: &InvocationContext) -> Result<ResponseEnvelope, HelloError> {
        let body = SuccessBody {
            message: self.config.greeting(),
            runtime: self.config.runtime.clone(),
            timestamp: utc_timestamp(),
            request_id: ctx.request_id.clone(),
            function_name: ctx.function_name.clone(),
            function_version: ctx.function_version.clone(),
            memory_limit_in_mb: ctx.memory_limit_in_mb,
            remaining_time_in_millis: ctx.remaining_time_in_millis(),
            otel_enabled: self.config.otel_enabled().then_some(true),
        };
        let encoded = self.encoder.encode(&body)?;
        Ok(helpers::ok_json(encoded))
    }

    fn emit(&self, event: &MetricEvent) {
        if let Err(e) = self.telemetry.record(event) {
            warn!(metric = event.name(), "Failed to record metric: {}", e);
        }
    }
}

/// Lambda adapter: converts the runtime context and delegates to `handler`.
///
/// # Errors
///
/// Never returns an error; failures are reported as a 500 envelope.
pub async fn function_handler(
    handler: Arc<RequestHandler>,
    event: LambdaEvent<Value>,
) -> Result<ResponseEnvelope, Error> {
    let ctx = InvocationContext::from(&event.context);
    Ok(handler.handle(&event.payload, &ctx))
}
