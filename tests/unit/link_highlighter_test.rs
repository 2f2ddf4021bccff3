//! Unit tests for link risk coloring and the highlighter toggle.

use rstest::rstest;
use serde_json::json;

use chromeguard::services::link_highlighter::{
    extract_probability, label_to_color, probability_to_color, style_for_verdict, HighlighterToggle,
    LinkHighlighter,
};

#[rstest]
#[case(0.0, "#006400")]
#[case(0.29, "#006400")]
#[case(0.3, "#32cd32")]
#[case(0.59, "#32cd32")]
#[case(0.6, "#ffa500")]
#[case(0.998, "#ffa500")]
#[case(0.999, "#ff0000")]
#[case(1.0, "#ff0000")]
#[case(-4.0, "#006400")]
#[case(7.5, "#ff0000")]
fn probability_gradient(#[case] p: f64, #[case] color: &str) {
    assert_eq!(probability_to_color(p), color);
}

#[rstest]
#[case(Some(0), "lightgreen")]
#[case(Some(1), "yellow")]
#[case(Some(2), "orange")]
#[case(Some(3), "red")]
#[case(Some(9), "grey")]
#[case(None, "grey")]
fn label_colors(#[case] label: Option<i64>, #[case] color: &str) {
    assert_eq!(label_to_color(label), color);
}

#[test]
fn probability_fields_in_preference_order() {
    assert_eq!(extract_probability(&json!({"p": 0.1, "probability_unsafe": 0.9})), Some(0.9));
    assert_eq!(extract_probability(&json!({"p": 0.1, "probability": 0.4})), Some(0.4));
    assert_eq!(extract_probability(&json!({"p": 0.1})), Some(0.1));
    assert_eq!(extract_probability(&json!({"probability": "high", "p": 0.2})), Some(0.2));
    assert_eq!(extract_probability(&json!({"label": 2})), None);
    assert_eq!(extract_probability(&json!(null)), None);
}

#[test]
fn verdict_with_probability_records_it() {
    let style = style_for_verdict(&json!({"probability_unsafe": 0.456}));
    assert_eq!(style.color, "#32cd32");
    assert_eq!(style.risk_probability.as_deref(), Some("0.46"));
}

#[test]
fn verdict_without_probability_uses_label() {
    let style = style_for_verdict(&json!({"label": 3}));
    assert_eq!(style.color, "red");
    assert!(style.risk_probability.is_none());
    assert_eq!(style_for_verdict(&json!({})).color, "grey");
}

#[test]
fn only_web_links_are_analyzed_once() {
    let mut hl = LinkHighlighter::new();
    assert!(hl.analyze("a1", "mailto:x@example.com").is_none());
    assert!(hl.analyze("a2", "javascript:void(0)").is_none());

    let first = hl.analyze("a3", "https://example.com").expect("web link");
    assert_eq!(first.url, "https://example.com");
    assert!(first.channel.starts_with("response-"));
    assert!(hl.analyze("a3", "https://example.com").is_none());

    let second = hl.analyze("a4", "http://example.com").expect("web link");
    assert_ne!(first.channel, second.channel);
    assert_eq!(hl.processed_count(), 2);

    hl.reset();
    assert!(hl.analyze("a3", "https://example.com").is_some());
}

#[test]
fn toggle_defaults_to_enabled() {
    let toggle = HighlighterToggle::from_setting(None);
    assert!(toggle.enabled());
    assert_eq!(toggle.title(), "Disable link safety colors");
}

#[test]
fn toggle_flips_and_reports() {
    let mut toggle = HighlighterToggle::from_setting(Some(true));
    assert!(!toggle.toggle());
    assert_eq!(toggle.title(), "Enable link safety colors");
    assert!(toggle.toggle());
}

#[test]
fn external_setting_change_only_reported_when_different() {
    let mut toggle = HighlighterToggle::from_setting(Some(false));
    assert_eq!(toggle.apply_setting(Some(false)), None);
    assert_eq!(toggle.apply_setting(None), Some(true));
    assert_eq!(toggle.apply_setting(Some(false)), Some(false));
}
