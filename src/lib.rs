//! Hello Lambda - a minimal serverless request handler with telemetry.
//!
//! Every invocation returns a fixed JSON greeting wrapped in an API Gateway
//! style envelope, and records four measurements through an injected
//! telemetry client:
//! 1. `lambda_invocations_total` - one per invocation
//! 2. `hello_world_requests_total` - one per hello world request
//! 3. `lambda_duration_seconds` - handler duration, labeled by outcome
//! 4. `lambda_status_total` - one per response, labeled by outcome
//!
//! Any failure while building the success response becomes a well-formed 500
//! envelope; the handler never surfaces an error to the Lambda runtime.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use hello_lambda::api::RequestHandler;
//! use hello_lambda::core::config::AppConfig;
//! use hello_lambda::core::models::InvocationContext;
//! use hello_lambda::telemetry::NoopTelemetry;
//!
//! let handler = RequestHandler::new(AppConfig::default(), Arc::new(NoopTelemetry));
//! let ctx = InvocationContext::new("req-123", "hello-fn", "$LATEST", 128)
//!     .with_remaining_time(std::time::Duration::from_millis(3000));
//!
//! let response = handler.handle(&serde_json::json!({}), &ctx);
//! assert_eq!(response.status_code, 200);
//! ```

// Module declarations
pub mod api;
pub mod core;
pub mod errors;
pub mod telemetry;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// This function sets up tracing-subscriber with a JSON formatter suitable for
/// `CloudWatch` Logs integration. The level is taken from `RUST_LOG` and
/// defaults to `info`. It should be called once at process start; later calls
/// leave the installed subscriber in place.
///
/// # Example
///
/// ```
/// // Initialize structured logging before starting the runtime loop
/// hello_lambda::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
