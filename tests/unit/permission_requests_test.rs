//! Unit tests for the UI-side snapshot tracker: reconciliation, change
//! listeners and tab indicator buttons.

use std::cell::RefCell;
use std::rc::Rc;

use chromeguard::managers::permission_requests::{ButtonAction, PermissionRequests};
use chromeguard::types::permission::{
    GrantState, MediaType, PermissionDetails, PermissionId, PermissionKind, PermissionRequest,
};

fn request(id: u64, tab: &str, kind: PermissionKind, granted: GrantState) -> PermissionRequest {
    PermissionRequest {
        permission_id: PermissionId(id),
        tab_id: tab.to_string(),
        permission: kind,
        origin: None,
        url: None,
        details: PermissionDetails::default(),
        granted,
    }
}

fn media(id: u64, tab: &str, types: Vec<MediaType>) -> PermissionRequest {
    let mut r = request(id, tab, PermissionKind::Media, GrantState::Pending);
    r.details.media_types = types;
    r
}

#[test]
fn update_returns_only_new_pending_requests() {
    let mut tracker = PermissionRequests::new();
    let fresh = tracker.update(vec![request(1, "t1", PermissionKind::Notifications, GrantState::Pending)]);
    assert_eq!(fresh.len(), 1);

    let fresh = tracker.update(vec![
        request(1, "t1", PermissionKind::Notifications, GrantState::Granted),
        media(2, "t1", vec![MediaType::Video]),
        request(3, "t2", PermissionKind::PointerLock, GrantState::Granted),
    ]);
    let ids: Vec<_> = fresh.iter().map(|r| r.permission_id).collect();
    assert_eq!(ids, vec![PermissionId(2)]);
}

#[test]
fn replaying_snapshot_yields_nothing() {
    let mut tracker = PermissionRequests::new();
    let snapshot = vec![
        request(1, "t1", PermissionKind::Notifications, GrantState::Pending),
        request(2, "t1", PermissionKind::PointerLock, GrantState::Pending),
    ];
    assert_eq!(tracker.update(snapshot.clone()).len(), 2);
    assert!(tracker.update(snapshot).is_empty());
}

#[test]
fn listeners_fire_once_per_affected_tab() {
    let mut tracker = PermissionRequests::new();
    let calls = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&calls);
    tracker.on_change(move |tab| sink.borrow_mut().push(tab.to_string()));

    tracker.update(vec![
        request(1, "a", PermissionKind::Notifications, GrantState::Pending),
        request(2, "a", PermissionKind::PointerLock, GrantState::Pending),
    ]);
    assert_eq!(*calls.borrow(), vec!["a"]);

    calls.borrow_mut().clear();
    tracker.update(vec![request(3, "b", PermissionKind::Notifications, GrantState::Pending)]);
    assert_eq!(*calls.borrow(), vec!["a", "b"]);
}

#[test]
fn every_listener_is_notified() {
    let mut tracker = PermissionRequests::new();
    let count = Rc::new(RefCell::new(0));
    for _ in 0..3 {
        let c = Rc::clone(&count);
        tracker.on_change(move |_| *c.borrow_mut() += 1);
    }
    tracker.update(vec![request(1, "a", PermissionKind::Notifications, GrantState::Pending)]);
    assert_eq!(*count.borrow(), 3);
}

#[test]
fn buttons_are_filtered_by_tab() {
    let mut tracker = PermissionRequests::new();
    tracker.update(vec![
        request(1, "t1", PermissionKind::Notifications, GrantState::Pending),
        request(2, "t2", PermissionKind::PointerLock, GrantState::Pending),
    ]);
    let buttons = tracker.get_buttons("t1");
    assert_eq!(buttons.len(), 1);
    assert_eq!(buttons[0].permission_id, PermissionId(1));
    assert_eq!(buttons[0].icons, vec!["carbon:chat"]);
    assert!(tracker.get_buttons("t3").is_empty());
}

#[test]
fn buttons_skip_requests_with_empty_icon_set() {
    let mut tracker = PermissionRequests::new();
    tracker.update(vec![
        media(1, "t1", vec![]),
        media(2, "t1", vec![MediaType::Other("screen".to_string())]),
        media(3, "t1", vec![MediaType::Video, MediaType::Audio]),
    ]);
    let buttons = tracker.get_buttons("t1");
    assert_eq!(buttons.len(), 2);
    assert_eq!(buttons[0].permission_id, PermissionId(1));
    assert_eq!(buttons[0].icons, vec!["carbon:settings"]);
    assert_eq!(buttons[1].icons, vec!["carbon:video", "carbon:microphone"]);
}

#[test]
fn unknown_kind_gets_generic_button() {
    let mut tracker = PermissionRequests::new();
    tracker.update(vec![request(1, "t1", PermissionKind::from("midi"), GrantState::Pending)]);
    assert_eq!(tracker.get_buttons("t1")[0].icons, vec!["carbon:settings"]);
}

#[test]
fn granted_button_is_active_and_reloads() {
    let mut tracker = PermissionRequests::new();
    tracker.update(vec![
        request(1, "t1", PermissionKind::Notifications, GrantState::Granted),
        request(2, "t1", PermissionKind::PointerLock, GrantState::Pending),
    ]);
    let buttons = tracker.get_buttons("t1");
    assert!(buttons[0].active);
    assert_eq!(buttons[0].action, ButtonAction::Reload);
    assert!(!buttons[1].active);
    assert_eq!(buttons[1].action, ButtonAction::Review);
}
