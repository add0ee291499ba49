//! Intent classification.
//!
//! Keyword matching runs first and is authoritative when it hits; the LLM is
//! only consulted for requests the keyword pass cannot place, so the common
//! path stays deterministic and free of network latency.

use serde::{Deserialize, Serialize};

/// Category a request is routed under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentType {
    /// Retrieval of metrics, counts, or raw figures.
    DataQuery,
    /// Explanation of causes behind an observation.
    InsightRequest,
    /// Production of an artifact or outbound communication.
    ActionRequest,
    /// Projection of future values.
    ForecastRequest,
    /// Inspection of current problems or anomalies.
    AlertCheck,
    /// Change to system settings.
    Configuration,
    /// Anything the other categories do not cover.
    General,
}

impl IntentType {
    /// Every intent, in classification priority order.
    pub const ALL: [IntentType; 7] = [
        IntentType::DataQuery,
        IntentType::InsightRequest,
        IntentType::ForecastRequest,
        IntentType::ActionRequest,
        IntentType::AlertCheck,
        IntentType::Configuration,
        IntentType::General,
    ];

    /// Stable snake_case identifier.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            IntentType::DataQuery => "data_query",
            IntentType::InsightRequest => "insight_request",
            IntentType::ActionRequest => "action_request",
            IntentType::ForecastRequest => "forecast_request",
            IntentType::AlertCheck => "alert_check",
            IntentType::Configuration => "configuration",
            IntentType::General => "general",
        }
    }

    /// Parse the snake_case identifier back into an intent.
    #[must_use]
    pub fn parse(s: &str) -> Option<IntentType> {
        IntentType::ALL
            .into_iter()
            .find(|intent| intent.as_str() == s.trim())
    }
}

impl std::fmt::Display for IntentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyword rules, checked in order. First rule with a hit wins.
const RULES: [(IntentType, &[&str]); 6] = [
    (
        IntentType::DataQuery,
        &["rate", "percentage", "count", "total", "average", "what"],
    ),
    (
        IntentType::InsightRequest,
        &["why", "reason", "cause", "explain", "insight"],
    ),
    (
        IntentType::ForecastRequest,
        &["predict", "forecast", "next", "future", "expect"],
    ),
    (
        IntentType::ActionRequest,
        &["generate", "create", "send", "report", "email"],
    ),
    (
        IntentType::AlertCheck,
        &["alert", "issue", "problem", "warning", "check"],
    ),
    (
        IntentType::Configuration,
        &["set", "change", "configure", "update"],
    ),
];

/// Classify a request by keyword match.
///
/// Matching is case-insensitive substring search; a request no rule matches
/// is [`IntentType::General`].
#[must_use]
pub fn classify(request: &str) -> IntentType {
    let lowered = request.to_lowercase();
    for (intent, keywords) in RULES {
        if keywords.iter().any(|kw| lowered.contains(kw)) {
            return intent;
        }
    }
    IntentType::General
}

/// Prompt asking an LLM to place an unclassified request into a category.
#[must_use]
pub fn classification_prompt(request: &str) -> String {
    let categories: Vec<&str> = IntentType::ALL.iter().map(|i| i.as_str()).collect();
    format!(
        "Classify the following request into exactly one of these categories:\n\
         {categories}\n\n\
         Request: {request}\n\n\
         Respond with the category identifier only.",
        categories = categories.join(", "),
    )
}
