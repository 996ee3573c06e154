use hello_lambda::errors::HelloError;
use std::error::Error;

#[test]
fn test_hello_error_implements_error_trait() {
    // Verify HelloError implements the Error trait
    fn assert_error<T: Error>(_: &T) {}

    let error = HelloError::InternalProcessing("test error".to_string());
    assert_error(&error);
}

#[test]
fn test_hello_error_display() {
    let error = HelloError::InternalProcessing("encoder failed".to_string());
    assert_eq!(format!("{error}"), "Failed to build response: encoder failed");

    let error = HelloError::Telemetry("registry closed".to_string());
    assert_eq!(
        format!("{error}"),
        "Failed to record telemetry: registry closed"
    );

    let error = HelloError::Config("OTEL_ENABLED: invalid flag 'x'".to_string());
    assert_eq!(
        format!("{error}"),
        "Invalid configuration: OTEL_ENABLED: invalid flag 'x'"
    );
}

#[test]
fn test_hello_error_from_conversions() {
    // serde_json errors are response construction failures
    let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    match HelloError::from(json_err) {
        HelloError::InternalProcessing(msg) => assert!(msg.contains("Failed to serialize body")),
        other => panic!("Unexpected error type: {other:?}"),
    }

    // prometheus errors are telemetry failures
    let prom_err = prometheus::Error::Msg("duplicate metric".to_string());
    match HelloError::from(prom_err) {
        HelloError::Telemetry(msg) => assert!(msg.contains("duplicate metric")),
        other => panic!("Unexpected error type: {other:?}"),
    }
}

#[test]
fn test_hello_error_converts_to_lambda_error() {
    let error: lambda_runtime::Error = HelloError::Config("bad".to_string()).into();
    assert_eq!(error.to_string(), "Invalid configuration: bad");
}
