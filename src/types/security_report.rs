use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Report returned by the local analysis service for one URL.
///
/// Every field is optional; the service omits whatever it could not compute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecurityReport {
    #[serde(default)]
    pub model: Option<ModelOutput>,
    #[serde(default)]
    pub combined: Option<CombinedVerdict>,
    #[serde(default)]
    pub natural_language_summary: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelOutput {
    #[serde(default)]
    pub prediction: Vec<Map<String, Value>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombinedVerdict {
    #[serde(default)]
    pub model_risk_level: Option<String>,
    #[serde(default)]
    pub heuristic_summary: Option<String>,
}

/// Display strings for the security report panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityReportView {
    pub url: String,
    pub status: String,
    pub summary: String,
    pub model_details: String,
}
