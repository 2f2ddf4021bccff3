//! Single-dialog permission review queue.
//!
//! A pure state machine: it decides which request is on screen and which are
//! waiting, but never renders or sends anything itself. The owning controller
//! turns its transitions into surface calls and outbound decisions.

use std::collections::VecDeque;

use tracing::debug;

use crate::types::errors::PermissionError;
use crate::types::permission::{Decision, PermissionId, PermissionRequest};

/// Whether a dialog is currently on screen.
#[derive(Debug, Clone, PartialEq)]
pub enum QueueState {
    Idle,
    Showing(PermissionRequest),
}

/// FIFO queue of permission requests with at most one shown at a time.
#[derive(Debug)]
pub struct PermissionQueue {
    state: QueueState,
    waiting: VecDeque<PermissionRequest>,
}

impl PermissionQueue {
    pub fn new() -> Self {
        Self {
            state: QueueState::Idle,
            waiting: VecDeque::new(),
        }
    }

    /// Adds a request. Returns `true` when it became the shown request.
    pub fn enqueue(&mut self, request: PermissionRequest) -> bool {
        debug!(
            permission_id = %request.permission_id,
            permission = %request.permission,
            "queueing permission request"
        );
        self.waiting.push_back(request);
        self.promote()
    }

    /// The request currently on screen.
    pub fn current_request(&self) -> Option<&PermissionRequest> {
        match &self.state {
            QueueState::Showing(request) => Some(request),
            QueueState::Idle => None,
        }
    }

    /// Resolves the shown request and moves the next waiting one on screen.
    ///
    /// The returned decision must be sent before the new head is presented.
    pub fn advance(&mut self, grant: bool) -> Result<Decision, PermissionError> {
        let resolved = match std::mem::replace(&mut self.state, QueueState::Idle) {
            QueueState::Showing(request) => request,
            QueueState::Idle => return Err(PermissionError::NoActiveDialog),
        };
        debug!(permission_id = %resolved.permission_id, grant, "permission dialog resolved");
        self.promote();
        Ok(Decision {
            permission_id: resolved.permission_id,
            grant,
        })
    }

    /// Whether the request is on screen or waiting.
    pub fn contains(&self, permission_id: PermissionId) -> bool {
        self.current_request().map(|r| r.permission_id) == Some(permission_id)
            || self.waiting.iter().any(|r| r.permission_id == permission_id)
    }

    pub fn state(&self) -> &QueueState {
        &self.state
    }

    pub fn is_showing(&self) -> bool {
        matches!(self.state, QueueState::Showing(_))
    }

    /// Number of requests waiting behind the shown one.
    pub fn waiting_len(&self) -> usize {
        self.waiting.len()
    }

    fn promote(&mut self) -> bool {
        if self.is_showing() {
            return false;
        }
        match self.waiting.pop_front() {
            Some(next) => {
                self.state = QueueState::Showing(next);
                true
            }
            None => false,
        }
    }
}

impl Default for PermissionQueue {
    fn default() -> Self {
        Self::new()
    }
}
