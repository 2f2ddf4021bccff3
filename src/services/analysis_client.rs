//! HTTP client for the local analysis service.
//!
//! The service scores links, produces security reports and explains
//! permissions in plain language. Every call is a single JSON POST; callers
//! degrade to static text when it fails.

use std::time::Duration;

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::types::errors::AnalysisError;
use crate::types::permission::PermissionKind;
use crate::types::security_report::SecurityReport;
use crate::types::settings::ChromeSettings;

#[derive(Debug, Deserialize)]
struct ExplanationResponse {
    explanation: String,
}

/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    http: reqwest::Client,
    endpoint: String,
}

impl AnalysisClient {
    pub fn new(settings: &ChromeSettings) -> Result<Self, AnalysisError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.security_report.request_timeout_secs))
            .build()
            .map_err(|e| AnalysisError::Network(e.to_string()))?;
        Ok(Self {
            http,
            endpoint: settings.link_highlighter.analysis_endpoint.trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post(&self, path: &str, body: Value) -> Result<reqwest::Response, AnalysisError> {
        let target = format!("{}/{}", self.endpoint, path);
        debug!(%target, "analysis request");
        let response = self.http.post(&target).json(&body).send().await?.error_for_status()?;
        Ok(response)
    }

    /// Raw verdict for one link; see `link_highlighter::style_for_verdict`.
    pub async fn analyze_url(&self, url: &str) -> Result<Value, AnalysisError> {
        Ok(self.post("analyze", json!({ "url": url })).await?.json().await?)
    }

    pub async fn fetch_security_report(&self, url: &str) -> Result<SecurityReport, AnalysisError> {
        Ok(self.post("security-report", json!({ "url": url })).await?.json().await?)
    }

    pub async fn explain_permission(&self, kind: &PermissionKind, url: Option<&str>) -> Result<String, AnalysisError> {
        let body = json!({ "permission": kind.as_str(), "url": url });
        let response: ExplanationResponse = self.post("explain-permission", body).await?.json().await?;
        Ok(response.explanation)
    }
}
