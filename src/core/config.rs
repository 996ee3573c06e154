use std::env;
use std::str::FromStr;

use crate::errors::HelloError;

pub const DEFAULT_RUNTIME: &str = "python";

/// Where metric events are sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelemetryExporter {
    Prometheus,
    Log,
    None,
}

impl FromStr for TelemetryExporter {
    type Err = HelloError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prometheus" => Ok(Self::Prometheus),
            "log" => Ok(Self::Log),
            "none" => Ok(Self::None),
            other => Err(HelloError::Config(format!(
                "TELEMETRY_EXPORTER: unknown exporter '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub runtime: String,
    pub exporter: TelemetryExporter,
    pub service_name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            runtime: DEFAULT_RUNTIME.to_string(),
            exporter: TelemetryExporter::Log,
            service_name: format!("hello-world-{DEFAULT_RUNTIME}"),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, HelloError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup, applying defaults for
    /// anything missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, HelloError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let runtime = lookup("HELLO_RUNTIME")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_RUNTIME.to_string());

        let otel_flag = match lookup("OTEL_ENABLED") {
            Some(v) => Some(
                parse_flag(&v)
                    .ok_or_else(|| HelloError::Config(format!("OTEL_ENABLED: invalid flag '{v}'")))?,
            ),
            None => None,
        };
        let exporter = match lookup("TELEMETRY_EXPORTER") {
            Some(v) => Some(v.parse::<TelemetryExporter>()?),
            None => None,
        };

        // OTEL_ENABLED switches telemetry as a whole; an explicit exporter must agree with it.
        let exporter = match (otel_flag, exporter) {
            (Some(true), Some(TelemetryExporter::None)) => {
                return Err(HelloError::Config(
                    "OTEL_ENABLED=true conflicts with TELEMETRY_EXPORTER=none".to_string(),
                ));
            }
            (Some(false), Some(exporter)) if exporter != TelemetryExporter::None => {
                return Err(HelloError::Config(format!(
                    "OTEL_ENABLED=false conflicts with TELEMETRY_EXPORTER={exporter:?}"
                )));
            }
            (_, Some(exporter)) => exporter,
            (Some(false), None) => TelemetryExporter::None,
            (_, None) => TelemetryExporter::Log,
        };

        let service_name = lookup("OTEL_SERVICE_NAME")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| format!("hello-world-{runtime}"));

        Ok(Self {
            runtime,
            exporter,
            service_name,
        })
    }

    /// True when metric events reach a real sink.
    #[must_use]
    pub fn otel_enabled(&self) -> bool {
        self.exporter != TelemetryExporter::None
    }

    /// Greeting returned in every success body.
    #[must_use]
    pub fn greeting(&self) -> String {
        format!("Hello World from {} Lambda!", display_name(&self.runtime))
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

fn display_name(runtime: &str) -> String {
    match runtime {
        "python" => "Python".to_string(),
        "nodejs" => "NodeJS".to_string(),
        "go" => "Go".to_string(),
        "dotnet" => ".NET".to_string(),
        "java" => "Java".to_string(),
        "rust" => "Rust".to_string(),
        other => {
            let mut chars = other.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_flag_accepts_common_spellings() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" on "), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag(""), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn display_name_capitalizes_unknown_runtimes() {
        assert_eq!(display_name("dotnet"), ".NET");
        assert_eq!(display_name("ruby"), "Ruby");
        assert_eq!(display_name(""), "");
    }
}
