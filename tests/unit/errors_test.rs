use chromeguard::types::errors::*;
use chromeguard::types::permission::PermissionId;

// === PermissionError Tests ===

#[test]
fn permission_error_display_variants() {
    assert_eq!(
        PermissionError::UnknownRequest(PermissionId(12)).to_string(),
        "Permission request not found: 12"
    );
    assert_eq!(PermissionError::NoActiveDialog.to_string(), "No permission dialog is active");
    assert_eq!(
        PermissionError::DatabaseError("locked".to_string()).to_string(),
        "Permission database error: locked"
    );
}

#[test]
fn permission_error_implements_error_trait() {
    let err: Box<dyn std::error::Error> = Box::new(PermissionError::NoActiveDialog);
    assert!(err.source().is_none());
}

// === ChannelError Tests ===

#[test]
fn channel_error_display_variants() {
    assert_eq!(ChannelError::Closed.to_string(), "Channel closed");
    assert_eq!(
        ChannelError::Transport("pipe broken".to_string()).to_string(),
        "Channel transport error: pipe broken"
    );
}

// === CookieError Tests ===

#[test]
fn cookie_error_display_variants() {
    assert_eq!(CookieError::InvalidUrl("x".to_string()).to_string(), "Invalid cookie URL: x");
    assert_eq!(
        CookieError::StoreError("gone".to_string()).to_string(),
        "Cookie store error: gone"
    );
}

// === AnalysisError Tests ===

#[test]
fn analysis_error_display_variants() {
    assert_eq!(
        AnalysisError::Network("refused".to_string()).to_string(),
        "Analysis service network error: refused"
    );
    assert_eq!(AnalysisError::Status(503).to_string(), "Analysis service returned status 503");
    assert_eq!(
        AnalysisError::Parse("eof".to_string()).to_string(),
        "Analysis response parse error: eof"
    );
    assert_eq!(
        AnalysisError::Busy.to_string(),
        "A security report request is already in flight"
    );
}

// === SettingsError Tests ===

#[test]
fn settings_error_display_variants() {
    assert_eq!(SettingsError::IoError("disk".to_string()).to_string(), "Settings I/O error: disk");
    assert_eq!(
        SettingsError::SerializationError("bad".to_string()).to_string(),
        "Settings serialization error: bad"
    );
    assert_eq!(SettingsError::InvalidKey("k".to_string()).to_string(), "Invalid settings key: k");
    assert_eq!(SettingsError::InvalidValue("v".to_string()).to_string(), "Invalid settings value: v");
}
