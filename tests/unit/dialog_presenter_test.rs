//! Unit tests for dialog text and icon selection.

use rstest::rstest;

use chromeguard::services::dialog_presenter::{
    describe, explanation_text, icons, DialogAction, EXPLANATION_FALLBACK,
};
use chromeguard::types::errors::AnalysisError;
use chromeguard::types::permission::{
    GrantState, MediaType, PermissionDetails, PermissionId, PermissionKind, PermissionRequest,
};

fn request(kind: PermissionKind, media: Vec<MediaType>, origin: Option<&str>) -> PermissionRequest {
    PermissionRequest {
        permission_id: PermissionId(7),
        tab_id: "t1".to_string(),
        permission: kind,
        origin: origin.map(str::to_string),
        url: None,
        details: PermissionDetails { media_types: media },
        granted: GrantState::Pending,
    }
}

#[rstest]
#[case(PermissionKind::Notifications, vec![], "Show Notifications", "https://x.test wants to show you notifications.", false)]
#[case(PermissionKind::PointerLock, vec![], "Lock Your Mouse", "https://x.test wants to lock your mouse cursor.", false)]
#[case(PermissionKind::Media, vec![MediaType::Video], "Use Your Camera", "https://x.test wants to use your camera.", true)]
#[case(PermissionKind::Media, vec![MediaType::Audio], "Use Your Microphone", "https://x.test wants to use your microphone.", true)]
#[case(PermissionKind::Media, vec![], "Permission Request", "This site is asking for a permission.", false)]
#[case(PermissionKind::from("geolocation"), vec![], "Permission Request", "This site is asking for a permission.", false)]
fn describe_by_kind(
    #[case] kind: PermissionKind,
    #[case] media: Vec<MediaType>,
    #[case] title: &str,
    #[case] explanation: &str,
    #[case] high_risk: bool,
) {
    let content = describe(&request(kind, media, Some("https://x.test")));
    assert_eq!(content.title, title);
    assert_eq!(content.explanation, explanation);
    assert_eq!(content.high_risk, high_risk);
    assert!(!content.icons.is_empty());
}

#[test]
fn missing_origin_reads_this_site() {
    let content = describe(&request(PermissionKind::Notifications, vec![], None));
    assert_eq!(content.explanation, "This site wants to show you notifications.");
}

#[test]
fn high_risk_suggestion_mentions_it() {
    let content = describe(&request(PermissionKind::Media, vec![MediaType::Video], None));
    assert!(content.suggestion.contains("high-risk"));
    assert_eq!(content.purpose, "This is used for video calls, photo booths, or virtual meetings.");
}

#[rstest]
#[case(PermissionKind::Notifications, vec![], vec!["carbon:chat"])]
#[case(PermissionKind::PointerLock, vec![], vec!["carbon:cursor-1"])]
#[case(PermissionKind::Media, vec![MediaType::Audio, MediaType::Video], vec!["carbon:microphone", "carbon:video"])]
#[case(PermissionKind::Media, vec![MediaType::Other("screen".into())], vec![])]
#[case(PermissionKind::Media, vec![], vec!["carbon:settings"])]
#[case(PermissionKind::from("clipboard-read"), vec![], vec!["carbon:settings"])]
fn icon_table(#[case] kind: PermissionKind, #[case] media: Vec<MediaType>, #[case] expected: Vec<&str>) {
    assert_eq!(icons(&request(kind, media, None)), expected);
}

#[test]
fn dialog_for_iconless_media_still_has_generic_icon() {
    let content = describe(&request(PermissionKind::Media, vec![], None));
    assert_eq!(content.icons, vec!["carbon:settings"]);
}

#[test]
fn only_accept_grants() {
    assert!(DialogAction::Accept.grants());
    assert!(!DialogAction::Deny.grants());
    assert!(!DialogAction::Dismiss.grants());
}

#[test]
fn explanation_falls_back_on_error_or_blank() {
    assert_eq!(explanation_text::<AnalysisError>(Ok("Lets the site ping you.".to_string())), "Lets the site ping you.");
    assert_eq!(explanation_text::<AnalysisError>(Ok("   ".to_string())), EXPLANATION_FALLBACK);
    assert_eq!(explanation_text(Err(AnalysisError::Network("refused".to_string()))), EXPLANATION_FALLBACK);
}
