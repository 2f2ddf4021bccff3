//! Security Report panel model.
//!
//! Converts the analysis service's report into the strings the panel shows,
//! with a fixed error view when the service cannot be reached. Only one
//! report is fetched at a time.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde_json::Value;
use tracing::warn;

use crate::services::analysis_client::AnalysisClient;
use crate::types::errors::AnalysisError;
use crate::types::security_report::{SecurityReport, SecurityReportView};

pub const ERROR_STATUS: &str = "Unable to load security report";
pub const ERROR_SUMMARY: &str = "Ensure the local analysis service is running on port 8009 and try again.";

/// Builds the panel strings for a successfully fetched report.
pub fn render(url: &str, report: &SecurityReport) -> SecurityReportView {
    let prediction = report
        .model
        .as_ref()
        .and_then(|m| m.prediction.first())
        .filter(|p| !p.is_empty());
    let combined = report.combined.as_ref();

    let status = prediction
        .and_then(|p| p.get("risk_level"))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .or_else(|| combined.and_then(|c| c.model_risk_level.clone()).filter(|s| !s.is_empty()))
        .unwrap_or_else(|| "Unknown".to_string());

    let summary = report
        .natural_language_summary
        .clone()
        .filter(|s| !s.is_empty())
        .or_else(|| combined.and_then(|c| c.heuristic_summary.clone()).filter(|s| !s.is_empty()))
        .unwrap_or_else(|| "No summary available.".to_string());

    let model_details = prediction
        .and_then(|p| serde_json::to_string_pretty(p).ok())
        .unwrap_or_else(|| "No model data returned.".to_string());

    SecurityReportView {
        url: url.to_string(),
        status: status.replace('_', " "),
        summary,
        model_details,
    }
}

/// The panel shown when the report could not be fetched.
pub fn error_view(url: &str) -> SecurityReportView {
    SecurityReportView {
        url: url.to_string(),
        status: ERROR_STATUS.to_string(),
        summary: ERROR_SUMMARY.to_string(),
        model_details: String::new(),
    }
}

/// Fetches reports one at a time for the security report panel.
#[derive(Debug, Clone)]
pub struct SecurityReportPanel {
    client: AnalysisClient,
    in_flight: Arc<AtomicBool>,
}

/// Clears the in-flight flag when the fetch ends, however it ends.
struct InFlight(Arc<AtomicBool>);

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl SecurityReportPanel {
    pub fn new(client: AnalysisClient) -> Self {
        Self {
            client,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Fetches and renders a report. Network or parse failures give the error
    /// view; a second call while one is running fails with `Busy`.
    pub async fn render_report(&self, url: &str) -> Result<SecurityReportView, AnalysisError> {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            return Err(AnalysisError::Busy);
        }
        let _guard = InFlight(Arc::clone(&self.in_flight));

        match self.client.fetch_security_report(url).await {
            Ok(report) => Ok(render(url, &report)),
            Err(e) => {
                warn!(url, error = %e, "failed to fetch security report");
                Ok(error_view(url))
            }
        }
    }
}
