//! Test builders — envelope constructors for both export shapes.
//!
//! These builders are designed for readability in test assertions, not for
//! production use.

use serde_json::{json, Value};

// ---------------------------------------------------------------------------
// Flat (CloudWatch / Fluent Bit) lines
// ---------------------------------------------------------------------------

/// Fluent builder for a flat envelope line.
///
/// ```rust
/// let line = FlatLine::new(ORDER_CREATED).pod("orders-api-7f9b4d").to_line();
/// ```
pub struct FlatLine {
    message: String,
    date: String,
    pod: String,
    request_id: String,
}

impl FlatLine {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            date: "2024-01-15T10:00:00.123Z".to_string(),
            pod: "orders-api-7f9b4d".to_string(),
            request_id: "req-abc123".to_string(),
        }
    }

    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    pub fn pod(mut self, pod: impl Into<String>) -> Self {
        self.pod = pod.into();
        self
    }

    pub fn request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = id.into();
        self
    }

    pub fn to_line(&self) -> String {
        json!({
            "date": self.date,
            "kubernetes.pod_name": self.pod,
            "log_obj": {
                "log": self.message,
                "X-Request-ID": self.request_id,
                "stream": "stdout"
            }
        })
        .to_string()
    }
}

// ---------------------------------------------------------------------------
// Nested (Coralogix) sub-results
// ---------------------------------------------------------------------------

/// Fluent builder for one sub-result of a nested envelope.
pub struct SubResult {
    user_data: String,
    timestamp: String,
    logid: String,
}

impl SubResult {
    pub fn new(message: &str) -> Self {
        Self::new_on_pod(message, "payments-5c2a")
    }

    pub fn new_on_pod(message: &str, pod: &str) -> Self {
        let user_data = json!({
            "log": message,
            "stream": "stdout",
            "kubernetes": {"pod_name": pod, "namespace_name": "prod"}
        });
        Self::raw_user_data(user_data.to_string())
    }

    /// Use `text` verbatim as the `userData` string, valid JSON or not.
    pub fn raw_user_data(text: impl Into<String>) -> Self {
        Self {
            user_data: text.into(),
            timestamp: "2024-01-15T10:00:01.000Z".to_string(),
            logid: "c0ffee-01".to_string(),
        }
    }

    pub fn timestamp(mut self, ts: impl Into<String>) -> Self {
        self.timestamp = ts.into();
        self
    }

    pub fn logid(mut self, id: impl Into<String>) -> Self {
        self.logid = id.into();
        self
    }

    pub fn build(self) -> Value {
        json!({
            "metadata": [
                {"key": "timestamp", "value": self.timestamp},
                {"key": "severity", "value": "Info"},
                {"key": "logid", "value": self.logid}
            ],
            "labels": [
                {"key": "applicationname", "value": "prod"},
                {"key": "subsystemname", "value": "payments"}
            ],
            "userData": self.user_data
        })
    }
}

/// Wrap sub-results in a nested envelope line.
pub fn nested_line(results: Vec<Value>) -> String {
    json!({"result": {"results": results}}).to_string()
}

/// Feed `lines` through a default extractor, numbering from 1.
pub fn extract_all(lines: &[String]) -> (Vec<apilog_core::ExtractedRecord>, apilog_core::Stats) {
    let mut extractor = apilog_core::Extractor::default();
    for (i, line) in lines.iter().enumerate() {
        extractor.process_line(i + 1, line);
    }
    extractor.finish()
}
