use tracing::info;

use super::{MetricEvent, Telemetry};
use crate::errors::HelloError;

/// Writes each event as a `METRIC name{labels} value` log line for collectors
/// that scrape function logs.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTelemetry;

impl Telemetry for LogTelemetry {
    fn record(&self, event: &MetricEvent) -> Result<(), HelloError> {
        let line = format_metric_line(event);
        info!(metric = event.name(), value = event.value(), "{}", line);
        Ok(())
    }
}

/// Renders an event the same way the Prometheus text format does.
#[must_use]
pub fn format_metric_line(event: &MetricEvent) -> String {
    let labels = event
        .labels()
        .iter()
        .map(|(key, value)| format!("{}=\"{}\"", key, escape_label(value)))
        .collect::<Vec<_>>()
        .join(",");
    format!("METRIC {}{{{}}} {}", event.name(), labels, event.value())
}

fn escape_label(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_quotes_and_newlines() {
        assert_eq!(escape_label("a\"b\nc\\"), "a\\\"b\\nc\\\\");
    }
}
