use serde::{Deserialize, Serialize};

/// Request sent to the analysis service for one link.
///
/// `channel` names the one-shot reply route so concurrent analyses of
/// different links never see each other's answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub url: String,
    pub channel: String,
}

/// How a link should be painted once its verdict arrives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkStyle {
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_probability: Option<String>,
}
