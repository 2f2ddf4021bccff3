use std::fmt;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// Opaque identifier assigned by the permission store to exactly one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionId(pub u64);

impl fmt::Display for PermissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of permission a page asks for.
///
/// Kinds the browser has no dedicated handling for are kept verbatim in
/// `Other` and rendered with the generic fallback.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PermissionKind {
    Notifications,
    PointerLock,
    Media,
    Other(String),
}

impl PermissionKind {
    pub fn as_str(&self) -> &str {
        match self {
            PermissionKind::Notifications => "notifications",
            PermissionKind::PointerLock => "pointerLock",
            PermissionKind::Media => "media",
            PermissionKind::Other(name) => name,
        }
    }
}

impl From<String> for PermissionKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "notifications" => PermissionKind::Notifications,
            "pointerLock" => PermissionKind::PointerLock,
            "media" => PermissionKind::Media,
            _ => PermissionKind::Other(s),
        }
    }
}

impl From<&str> for PermissionKind {
    fn from(s: &str) -> Self {
        PermissionKind::from(s.to_string())
    }
}

impl From<PermissionKind> for String {
    fn from(kind: PermissionKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for PermissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Media sub-type of a `media` permission request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MediaType {
    Video,
    Audio,
    Other(String),
}

impl MediaType {
    pub fn as_str(&self) -> &str {
        match self {
            MediaType::Video => "video",
            MediaType::Audio => "audio",
            MediaType::Other(name) => name,
        }
    }
}

impl From<String> for MediaType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "video" => MediaType::Video,
            "audio" => MediaType::Audio,
            _ => MediaType::Other(s),
        }
    }
}

impl From<MediaType> for String {
    fn from(media: MediaType) -> Self {
        media.as_str().to_string()
    }
}

/// Kind-specific payload of a request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionDetails {
    #[serde(default)]
    pub media_types: Vec<MediaType>,
}

/// Outcome of a request. Written only by the permission store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GrantState {
    #[default]
    Pending,
    Granted,
    Denied,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum GrantWire {
    Flag(bool),
    Named(String),
}

// Older hosts send `granted: true|false`; `false` there means "not decided yet".
impl<'de> Deserialize<'de> for GrantState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Option::<GrantWire>::deserialize(deserializer)? {
            None | Some(GrantWire::Flag(false)) => Ok(GrantState::Pending),
            Some(GrantWire::Flag(true)) => Ok(GrantState::Granted),
            Some(GrantWire::Named(name)) => match name.as_str() {
                "pending" => Ok(GrantState::Pending),
                "granted" => Ok(GrantState::Granted),
                "denied" => Ok(GrantState::Denied),
                other => Err(de::Error::unknown_variant(other, &["pending", "granted", "denied"])),
            },
        }
    }
}

/// One ask from a page to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionRequest {
    pub permission_id: PermissionId,
    pub tab_id: String,
    pub permission: PermissionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub details: PermissionDetails,
    #[serde(default)]
    pub granted: GrantState,
}

impl PermissionRequest {
    pub fn is_pending(&self) -> bool {
        self.granted == GrantState::Pending
    }

    pub fn is_granted(&self) -> bool {
        self.granted == GrantState::Granted
    }

    pub fn site_key(&self) -> String {
        site_key(&self.permission, &self.details)
    }
}

/// Key a per-site decision is remembered under. A single-device media
/// request is keyed by its device, so camera and microphone stay separate.
pub fn site_key(kind: &PermissionKind, details: &PermissionDetails) -> String {
    match (kind, details.media_types.as_slice()) {
        (PermissionKind::Media, [media]) => format!("{}:{}", kind.as_str(), media.as_str()),
        _ => kind.as_str().to_string(),
    }
}

/// The user's answer to one request, sent UI → store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    pub permission_id: PermissionId,
    pub grant: bool,
}

/// A remembered per-site decision stored by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SitePermission {
    pub origin: String,
    pub permission: PermissionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<MediaType>,
    pub granted: bool,
    pub updated_at: i64,
}

impl SitePermission {
    /// Splits a stored [`site_key`] back into kind and device.
    pub fn parse_key(key: &str) -> (PermissionKind, Option<MediaType>) {
        match key.split_once(':') {
            Some(("media", media)) => (PermissionKind::Media, Some(MediaType::from(media.to_string()))),
            _ => (PermissionKind::from(key), None),
        }
    }
}
