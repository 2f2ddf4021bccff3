//! Unit tests for the permission review queue state machine.

use chromeguard::managers::permission_queue::{PermissionQueue, QueueState};
use chromeguard::types::errors::PermissionError;
use chromeguard::types::permission::{
    GrantState, PermissionDetails, PermissionId, PermissionKind, PermissionRequest,
};

fn request(id: u64) -> PermissionRequest {
    PermissionRequest {
        permission_id: PermissionId(id),
        tab_id: "t1".to_string(),
        permission: PermissionKind::Notifications,
        origin: Some("https://example.com".to_string()),
        url: None,
        details: PermissionDetails::default(),
        granted: GrantState::Pending,
    }
}

#[test]
fn starts_idle() {
    let queue = PermissionQueue::new();
    assert_eq!(queue.state(), &QueueState::Idle);
    assert!(queue.current_request().is_none());
    assert_eq!(queue.waiting_len(), 0);
}

#[test]
fn first_enqueue_shows_immediately() {
    let mut queue = PermissionQueue::new();
    assert!(queue.enqueue(request(1)));
    assert!(queue.is_showing());
    assert_eq!(queue.current_request().unwrap().permission_id, PermissionId(1));
    assert_eq!(queue.waiting_len(), 0);
}

#[test]
fn enqueue_while_showing_does_not_interrupt() {
    let mut queue = PermissionQueue::new();
    queue.enqueue(request(1));
    assert!(!queue.enqueue(request(2)));
    assert!(!queue.enqueue(request(3)));
    assert_eq!(queue.current_request().unwrap().permission_id, PermissionId(1));
    assert_eq!(queue.waiting_len(), 2);
}

#[test]
fn advance_returns_decision_and_promotes_in_fifo_order() {
    let mut queue = PermissionQueue::new();
    queue.enqueue(request(1));
    queue.enqueue(request(2));
    queue.enqueue(request(3));

    let d = queue.advance(true).unwrap();
    assert_eq!(d.permission_id, PermissionId(1));
    assert!(d.grant);
    assert_eq!(queue.current_request().unwrap().permission_id, PermissionId(2));

    let d = queue.advance(false).unwrap();
    assert_eq!(d.permission_id, PermissionId(2));
    assert!(!d.grant);
    assert_eq!(queue.current_request().unwrap().permission_id, PermissionId(3));

    queue.advance(true).unwrap();
    assert_eq!(queue.state(), &QueueState::Idle);
}

#[test]
fn advance_while_idle_fails() {
    let mut queue = PermissionQueue::new();
    assert!(matches!(queue.advance(true), Err(PermissionError::NoActiveDialog)));
}

#[test]
fn contains_covers_shown_and_waiting() {
    let mut queue = PermissionQueue::new();
    queue.enqueue(request(1));
    queue.enqueue(request(2));
    assert!(queue.contains(PermissionId(1)));
    assert!(queue.contains(PermissionId(2)));
    assert!(!queue.contains(PermissionId(3)));
}

#[test]
fn unanswered_request_stays_shown() {
    let mut queue = PermissionQueue::new();
    queue.enqueue(request(1));
    for id in 2..10 {
        queue.enqueue(request(id));
    }
    assert_eq!(queue.current_request().unwrap().permission_id, PermissionId(1));
    assert_eq!(queue.waiting_len(), 8);
}
