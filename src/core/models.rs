use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Read-only facts about a single invocation, supplied by the runtime adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationContext {
    pub request_id: String,
    pub function_name: String,
    pub function_version: String,
    pub memory_limit_in_mb: i32,
    /// Absolute deadline in milliseconds since the Unix epoch.
    pub deadline_ms: u64,
}

impl InvocationContext {
    #[must_use]
    pub fn new(
        request_id: impl Into<String>,
        function_name: impl Into<String>,
        function_version: impl Into<String>,
        memory_limit_in_mb: i32,
    ) -> Self {
        Self {
            request_id: request_id.into(),
            function_name: function_name.into(),
            function_version: function_version.into(),
            memory_limit_in_mb,
            deadline_ms: now_millis(),
        }
    }

    #[must_use]
    pub fn with_deadline_ms(mut self, deadline_ms: u64) -> Self {
        self.deadline_ms = deadline_ms;
        self
    }

    /// Sets the deadline relative to now.
    #[must_use]
    pub fn with_remaining_time(self, remaining: Duration) -> Self {
        let remaining_ms = u64::try_from(remaining.as_millis()).unwrap_or(u64::MAX);
        self.with_deadline_ms(now_millis().saturating_add(remaining_ms))
    }

    /// Milliseconds left before the deadline, evaluated at call time.
    #[must_use]
    pub fn remaining_time_in_millis(&self) -> u64 {
        self.deadline_ms.saturating_sub(now_millis())
    }
}

fn now_millis() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
}

/// Current UTC time as ISO-8601 with millisecond precision and a trailing `Z`.
#[must_use]
pub fn utc_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Outcome label shared by the response and its status/duration metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Error,
}

impl Outcome {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::Error => "error",
        }
    }

    #[must_use]
    pub fn from_status(status_code: u16) -> Self {
        if (200..300).contains(&status_code) {
            Outcome::Success
        } else {
            Outcome::Error
        }
    }
}

/// API Gateway proxy style response returned to the runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl ResponseEnvelope {
    #[must_use]
    pub fn json(status_code: u16, body: String) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), CONTENT_TYPE_JSON.to_string());
        Self {
            status_code,
            headers,
            body,
        }
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        Outcome::from_status(self.status_code)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessBody {
    pub message: String,
    pub runtime: String,
    pub timestamp: String,
    pub request_id: String,
    pub function_name: String,
    pub function_version: String,
    #[serde(rename = "memoryLimitInMB")]
    pub memory_limit_in_mb: i32,
    pub remaining_time_in_millis: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub otel_enabled: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error: String,
    pub runtime: String,
    pub timestamp: String,
    pub request_id: String,
}
