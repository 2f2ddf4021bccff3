//! Link Highlighter: paints anchors by the danger score the analysis service
//! computed for their target, plus the toolbar toggle that turns it on and off.

use std::collections::HashSet;

use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::types::link_risk::{AnalyzeRequest, LinkStyle};

const PROBABILITY_FIELDS: [&str; 3] = ["probability_unsafe", "probability", "p"];

/// First numeric probability field of a verdict, in preference order.
pub fn extract_probability(verdict: &Value) -> Option<f64> {
    PROBABILITY_FIELDS
        .iter()
        .find_map(|field| verdict.get(*field).and_then(Value::as_f64))
}

/// Gradient color for a probability, clamped to `[0, 1]`.
pub fn probability_to_color(probability: f64) -> &'static str {
    let p = probability.clamp(0.0, 1.0);
    if p < 0.3 {
        "#006400"
    } else if p < 0.6 {
        "#32cd32"
    } else if p < 0.999 {
        "#ffa500"
    } else {
        "#ff0000"
    }
}

/// Color for a coarse classifier label (0 safe … 3 dangerous).
pub fn label_to_color(label: Option<i64>) -> &'static str {
    match label {
        Some(0) => "lightgreen",
        Some(1) => "yellow",
        Some(2) => "orange",
        Some(3) => "red",
        _ => "grey",
    }
}

/// Style for a verdict: probability gradient if present, else label color.
pub fn style_for_verdict(verdict: &Value) -> LinkStyle {
    match extract_probability(verdict) {
        // NaN cannot be ordered; treat it like a missing probability.
        Some(p) if !p.is_nan() => LinkStyle {
            color: probability_to_color(p).to_string(),
            risk_probability: Some(format!("{:.2}", p)),
        },
        _ => LinkStyle {
            color: label_to_color(verdict.get("label").and_then(Value::as_i64)).to_string(),
            risk_probability: None,
        },
    }
}

/// Tracks which links of a page were already sent for analysis.
#[derive(Debug, Default)]
pub struct LinkHighlighter {
    processed: HashSet<String>,
}

impl LinkHighlighter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the analysis request for a link, or `None` when the link is not
    /// web content or was analyzed before. `link_key` identifies the anchor.
    pub fn analyze(&mut self, link_key: &str, href: &str) -> Option<AnalyzeRequest> {
        if !(href.starts_with("http:") || href.starts_with("https:")) {
            return None;
        }
        if !self.processed.insert(link_key.to_string()) {
            return None;
        }
        let channel = format!("response-{}", Uuid::new_v4().simple());
        debug!(url = href, %channel, "sending URL for analysis");
        Some(AnalyzeRequest {
            url: href.to_string(),
            channel,
        })
    }

    pub fn processed_count(&self) -> usize {
        self.processed.len()
    }

    /// Forgets all processed links, e.g. after navigation.
    pub fn reset(&mut self) {
        self.processed.clear();
    }
}

/// On/off state of link coloring, mirrored to every open tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlighterToggle {
    enabled: bool,
}

impl HighlighterToggle {
    /// A missing stored value means enabled.
    pub fn from_setting(stored: Option<bool>) -> Self {
        Self {
            enabled: stored.unwrap_or(true),
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Flips the state and returns the new value to persist and broadcast.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }

    /// Applies an externally changed setting. Returns the new state if it changed.
    pub fn apply_setting(&mut self, stored: Option<bool>) -> Option<bool> {
        let next = stored.unwrap_or(true);
        if next == self.enabled {
            return None;
        }
        self.enabled = next;
        Some(next)
    }

    pub fn title(&self) -> &'static str {
        if self.enabled {
            "Disable link safety colors"
        } else {
            "Enable link safety colors"
        }
    }
}
