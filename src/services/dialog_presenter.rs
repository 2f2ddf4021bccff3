//! Dialog Presenter for permission reviews.
//!
//! Turns a [`PermissionRequest`] into the text and icons of a review dialog.
//! Rendering itself goes through the [`DialogSurface`] trait so the queue can
//! be driven without any UI toolkit.

use std::fmt::Display;

use serde::Serialize;
use tracing::warn;

use crate::types::permission::{MediaType, PermissionKind, PermissionRequest};

/// Shown when the analysis service cannot explain a permission.
pub const EXPLANATION_FALLBACK: &str = "Unable to retrieve security analysis at this time.";

const GENERIC_ICON: &str = "carbon:settings";

/// Everything a surface needs to draw one review dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogContent {
    pub title: String,
    pub explanation: String,
    pub purpose: String,
    pub suggestion: String,
    pub icons: Vec<&'static str>,
    pub high_risk: bool,
}

/// The ways a user can close a dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAction {
    Accept,
    Deny,
    /// Close button. Same outcome as `Deny`.
    Dismiss,
}

impl DialogAction {
    pub fn grants(self) -> bool {
        matches!(self, DialogAction::Accept)
    }
}

/// Something that can put a review dialog on screen and take it down again.
pub trait DialogSurface {
    fn show(&mut self, content: &DialogContent);
    fn hide(&mut self);
}

/// Icon names for a request's indicator and dialog header.
///
/// Media requests get one icon per recognised media type, so a media request
/// listing only unrecognised types has no icons at all. Without any media
/// types it gets the generic icon.
pub fn icons(request: &PermissionRequest) -> Vec<&'static str> {
    match &request.permission {
        PermissionKind::Notifications => vec!["carbon:chat"],
        PermissionKind::PointerLock => vec!["carbon:cursor-1"],
        PermissionKind::Media if request.details.media_types.is_empty() => vec![GENERIC_ICON],
        PermissionKind::Media => request
            .details
            .media_types
            .iter()
            .filter_map(|media| match media {
                MediaType::Video => Some("carbon:video"),
                MediaType::Audio => Some("carbon:microphone"),
                MediaType::Other(_) => None,
            })
            .collect(),
        PermissionKind::Other(_) => vec![GENERIC_ICON],
    }
}

/// Builds the dialog text for a request, falling back to a generic prompt.
pub fn describe(request: &PermissionRequest) -> DialogContent {
    let origin = request.origin.as_deref().unwrap_or("This site");

    let (title, explanation, purpose, suggestion) = match &request.permission {
        PermissionKind::Notifications => (
            "Show Notifications".to_string(),
            format!("{} wants to show you notifications.", origin),
            "This is used for alerts, new messages, or updates.",
            "Only allow this if you trust the site and want updates.",
        ),
        PermissionKind::PointerLock => (
            "Lock Your Mouse".to_string(),
            format!("{} wants to lock your mouse cursor.", origin),
            "This is typically used by games or 3D viewers to let you look around without the cursor leaving the window.",
            "This is generally safe and required for many full-screen games.",
        ),
        // The store splits media requests, so only the first type matters here.
        PermissionKind::Media => match request.details.media_types.first() {
            Some(MediaType::Video) => (
                "Use Your Camera".to_string(),
                format!("{} wants to use your camera.", origin),
                "This is used for video calls, photo booths, or virtual meetings.",
                "Only allow this on sites you trust, like a video chat service. This is a high-risk permission.",
            ),
            Some(MediaType::Audio) => (
                "Use Your Microphone".to_string(),
                format!("{} wants to use your microphone.", origin),
                "This is used for video calls, voice chats, or audio recording.",
                "Only allow this on sites you trust, like a video chat service. This is a high-risk permission.",
            ),
            _ => generic(request),
        },
        PermissionKind::Other(_) => generic(request),
    };

    let mut icon_set = icons(request);
    if icon_set.is_empty() {
        icon_set.push(GENERIC_ICON);
    }

    DialogContent {
        title,
        explanation,
        purpose: purpose.to_string(),
        high_risk: suggestion.contains("high-risk"),
        suggestion: suggestion.to_string(),
        icons: icon_set,
    }
}

fn generic(request: &PermissionRequest) -> (String, String, &'static str, &'static str) {
    warn!(
        permission = %request.permission,
        permission_id = %request.permission_id,
        "no dedicated dialog for permission kind, using generic prompt"
    );
    (
        "Permission Request".to_string(),
        "This site is asking for a permission.".to_string(),
        "This allows the site to function correctly.",
        "Allowing this is usually safe.",
    )
}

/// Explanation text for the dialog body, or the static fallback when the
/// lookup failed.
pub fn explanation_text<E: Display>(result: Result<String, E>) -> String {
    match result {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => EXPLANATION_FALLBACK.to_string(),
        Err(e) => {
            warn!(error = %e, "permission explanation failed");
            EXPLANATION_FALLBACK.to_string()
        }
    }
}
