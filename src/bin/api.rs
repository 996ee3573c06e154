use std::sync::Arc;

use hello_lambda::api::{RequestHandler, function_handler};
use hello_lambda::core::config::AppConfig;
use hello_lambda::telemetry;
use lambda_runtime::{Error, run, service_fn};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Error> {
    hello_lambda::setup_logging();

    let config = AppConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        Error::from(e)
    })?;
    let telemetry = telemetry::from_config(&config).map_err(|e| {
        error!("Telemetry setup error: {}", e);
        Error::from(e)
    })?;
    info!(
        runtime = %config.runtime,
        exporter = ?config.exporter,
        otel_enabled = config.otel_enabled(),
        "Starting hello world handler"
    );

    // Lambda ends the process with SIGTERM, so the flush must hang off the signal.
    lambda_runtime::spawn_graceful_shutdown_handler(telemetry::shutdown_hook(Arc::clone(
        &telemetry,
    )))
    .await;

    let handler = Arc::new(RequestHandler::new(config, Arc::clone(&telemetry)));
    let result = run(service_fn(move |event| {
        function_handler(Arc::clone(&handler), event)
    }))
    .await;

    // Only reached when the runtime loop fails.
    telemetry.shutdown();
    result
}
