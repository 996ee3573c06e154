use hello_lambda::core::config::{AppConfig, TelemetryExporter};
use hello_lambda::core::models::Outcome;
use hello_lambda::telemetry::log::format_metric_line;
use hello_lambda::telemetry::{
    self, LogTelemetry, MetricEvent, NoopTelemetry, PrometheusTelemetry, Telemetry,
};

fn status(outcome: Outcome) -> MetricEvent {
    MetricEvent::Status {
        runtime: "python".to_string(),
        function_name: "hello-fn".to_string(),
        outcome,
    }
}

fn duration(outcome: Outcome, seconds: f64) -> MetricEvent {
    MetricEvent::Duration {
        runtime: "python".to_string(),
        function_name: "hello-fn".to_string(),
        outcome,
        seconds,
    }
}

#[test]
fn test_prometheus_counts_events() {
    let telemetry = PrometheusTelemetry::new("hello-world-python").unwrap();

    telemetry
        .record(&MetricEvent::Invocation {
            runtime: "python".to_string(),
            function_name: "hello-fn".to_string(),
            function_version: "$LATEST".to_string(),
        })
        .unwrap();
    telemetry
        .record(&MetricEvent::BusinessEvent {
            runtime: "python".to_string(),
        })
        .unwrap();
    telemetry.record(&status(Outcome::Success)).unwrap();
    telemetry.record(&status(Outcome::Success)).unwrap();
    telemetry.record(&status(Outcome::Error)).unwrap();
    telemetry.record(&duration(Outcome::Success, 0.25)).unwrap();

    assert_eq!(
        telemetry
            .invocations
            .with_label_values(&["python", "hello-fn", "$LATEST"])
            .get(),
        1
    );
    assert_eq!(
        telemetry
            .hello_world_requests
            .with_label_values(&["python"])
            .get(),
        1
    );
    assert_eq!(
        telemetry
            .status
            .with_label_values(&["python", "hello-fn", "success"])
            .get(),
        2
    );
    assert_eq!(
        telemetry
            .status
            .with_label_values(&["python", "hello-fn", "error"])
            .get(),
        1
    );

    let histogram = telemetry
        .duration
        .with_label_values(&["python", "hello-fn", "success"]);
    assert_eq!(histogram.get_sample_count(), 1);
    assert!((histogram.get_sample_sum() - 0.25).abs() < f64::EPSILON);
}

#[test]
fn test_prometheus_rejects_invalid_duration() {
    let telemetry = PrometheusTelemetry::new("svc").unwrap();

    assert!(telemetry.record(&duration(Outcome::Success, -1.0)).is_err());
    assert!(
        telemetry
            .record(&duration(Outcome::Success, f64::NAN))
            .is_err()
    );
    let histogram = telemetry
        .duration
        .with_label_values(&["python", "hello-fn", "success"]);
    assert_eq!(histogram.get_sample_count(), 0);
}

#[test]
fn test_prometheus_render_contains_instruments() {
    let telemetry = PrometheusTelemetry::new("hello-world-python").unwrap();
    telemetry.record(&status(Outcome::Success)).unwrap();
    telemetry.record(&duration(Outcome::Success, 0.01)).unwrap();

    let text = telemetry.render().unwrap();

    assert!(text.contains("lambda_status_total"));
    assert!(text.contains("lambda_duration_seconds_bucket"));
    assert!(text.contains("service=\"hello-world-python\""));
    assert!(text.contains("status=\"success\""));
}

#[test]
fn test_prometheus_instances_are_independent() {
    let first = PrometheusTelemetry::new("a").unwrap();
    let second = PrometheusTelemetry::new("b").unwrap();

    first.record(&status(Outcome::Success)).unwrap();

    assert_eq!(
        second
            .status
            .with_label_values(&["python", "hello-fn", "success"])
            .get(),
        0
    );
}

#[test]
fn test_metric_line_format() {
    let line = format_metric_line(&status(Outcome::Error));
    assert_eq!(
        line,
        "METRIC lambda_status_total{runtime=\"python\",function_name=\"hello-fn\",status=\"error\"} 1"
    );

    let line = format_metric_line(&duration(Outcome::Success, 0.5));
    assert!(line.starts_with("METRIC lambda_duration_seconds{"));
    assert!(line.ends_with(" 0.5"));
}

#[test]
fn test_log_and_noop_never_fail() {
    assert!(LogTelemetry.record(&status(Outcome::Success)).is_ok());
    assert!(NoopTelemetry.record(&status(Outcome::Success)).is_ok());
}

#[test]
fn test_from_config_builds_each_exporter() {
    for exporter in [
        TelemetryExporter::Prometheus,
        TelemetryExporter::Log,
        TelemetryExporter::None,
    ] {
        let config = AppConfig {
            exporter,
            ..AppConfig::default()
        };
        let client = telemetry::from_config(&config).unwrap();
        assert!(client.record(&status(Outcome::Success)).is_ok());
        client.shutdown();
    }
}

#[test]
fn test_event_labels_and_values() {
    let event = MetricEvent::BusinessEvent {
        runtime: "go".to_string(),
    };
    assert_eq!(event.name(), "hello_world_requests_total");
    assert_eq!(event.labels(), vec![("runtime", "go")]);
    assert!((event.value() - 1.0).abs() < f64::EPSILON);
    assert_eq!(event.outcome(), None);

    let event = duration(Outcome::Error, 1.5);
    assert_eq!(event.outcome(), Some(Outcome::Error));
    assert!((event.value() - 1.5).abs() < f64::EPSILON);
}
