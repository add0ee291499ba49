//! The response type every agent's `process` call returns.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result of one `process` call, whether from a specialist or the orchestrator.
///
/// Failures are carried as `success = false` with an error message; a
/// well-formed `AgentResponse` is always returned, never an unwound error.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentResponse {
    /// Caller-facing answer text.
    pub content: String,
    /// Whether the request was handled successfully.
    pub success: bool,
    /// Optional structured payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Error description when `success` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Arbitrary response metadata.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub metadata: serde_json::Map<String, Value>,
    /// RFC 3339 creation time.
    pub timestamp: String,
    /// Name of the agent that produced the response.
    pub agent_name: String,
    /// Self-reported confidence in `[0.0, 1.0]`.
    pub confidence: f64,
}

impl AgentResponse {
    /// Successful response with full confidence.
    #[must_use]
    pub fn ok(agent_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            success: true,
            data: None,
            error: None,
            metadata: serde_json::Map::new(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            agent_name: agent_name.into(),
            confidence: 1.0,
        }
    }

    /// Failed response; the error text doubles as the content.
    #[must_use]
    pub fn failure(agent_name: impl Into<String>, error: impl Into<String>) -> Self {
        let error = error.into();
        Self {
            content: error.clone(),
            success: false,
            data: None,
            error: Some(error),
            metadata: serde_json::Map::new(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            agent_name: agent_name.into(),
            confidence: 0.0,
        }
    }

    /// Attach a structured payload.
    #[must_use]
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Insert one metadata entry.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        let _ = self.metadata.insert(key.into(), value);
        self
    }

    /// Set the confidence, clamped to `[0.0, 1.0]`.
    #[must_use]
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence.clamp(0.0, 1.0);
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ok_sets_success_and_confidence() {
        let resp = AgentResponse::ok("data", "42 orders");
        assert!(resp.success);
        assert_eq!(resp.agent_name, "data");
        assert!((resp.confidence - 1.0).abs() < f64::EPSILON);
        assert!(resp.error.is_none());
    }

    #[test]
    fn failure_mirrors_error_into_content() {
        let resp = AgentResponse::failure("quality", "upstream unavailable");
        assert!(!resp.success);
        assert_eq!(resp.content, "upstream unavailable");
        assert_eq!(resp.error.as_deref(), Some("upstream unavailable"));
        assert!((resp.confidence - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn with_data_and_metadata() {
        let resp = AgentResponse::ok("data", "done")
            .with_data(json!({"count": 3}))
            .with_metadata("execution_time_ms", json!(12));
        assert_eq!(resp.data, Some(json!({"count": 3})));
        assert_eq!(resp.metadata["execution_time_ms"], json!(12));
    }

    #[test]
    fn confidence_is_clamped() {
        let high = AgentResponse::ok("a", "x").with_confidence(3.0);
        let low = AgentResponse::ok("a", "x").with_confidence(-1.0);
        assert!((high.confidence - 1.0).abs() < f64::EPSILON);
        assert!((low.confidence - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn serde_roundtrip() {
        let resp = AgentResponse::ok("forecast", "sunny").with_data(json!({"demand": 120}));
        let json = serde_json::to_string(&resp).unwrap();
        let back: AgentResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(resp, back);
    }

    #[test]
    fn optional_fields_skipped_when_absent() {
        let json = serde_json::to_value(AgentResponse::ok("a", "x")).unwrap();
        assert!(json.get("data").is_none());
        assert!(json.get("error").is_none());
        assert!(json.get("metadata").is_none());
    }
}
