//! Permission Controller: the one owner of the review queue.
//!
//! Receives snapshots pushed by the host, feeds new pending requests into the
//! [`PermissionQueue`], renders the head through a [`DialogSurface`] and sends
//! one [`Decision`](crate::types::permission::Decision) per resolved dialog.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::channel::DecisionSink;
use crate::managers::permission_queue::PermissionQueue;
use crate::managers::permission_requests::{IndicatorButton, PermissionRequests};
use crate::services::dialog_presenter::{describe, DialogAction, DialogSurface};
use crate::types::errors::PermissionError;
use crate::types::permission::{PermissionId, PermissionRequest};
use crate::types::settings::PermissionSettings;

/// Input to [`PermissionController::run`].
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerEvent {
    /// Full snapshot from the host.
    Push(Vec<PermissionRequest>),
    /// The user closed the shown dialog.
    Action(DialogAction),
    /// The user clicked a pending request's tab indicator.
    Review(PermissionId),
}

pub struct PermissionController<S: DecisionSink> {
    requests: PermissionRequests,
    queue: PermissionQueue,
    sink: S,
    surface: Option<Box<dyn DialogSurface>>,
    dialog_delay: Duration,
}

impl<S: DecisionSink> PermissionController<S> {
    /// Without a surface the review dialogs are disabled; indicators still update.
    pub fn new(sink: S, surface: Option<Box<dyn DialogSurface>>, settings: &PermissionSettings) -> Self {
        if surface.is_none() {
            info!("no dialog surface available, permission review dialogs disabled");
        }
        Self {
            requests: PermissionRequests::new(),
            queue: PermissionQueue::new(),
            sink,
            surface,
            dialog_delay: settings.dialog_delay(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.surface.is_some()
    }

    /// Applies a host snapshot. Returns `true` when a new dialog must be presented.
    pub fn handle_push(&mut self, snapshot: Vec<PermissionRequest>) -> bool {
        let fresh = self.requests.update(snapshot);
        if !self.is_enabled() {
            return false;
        }
        let mut head_changed = false;
        for request in fresh {
            head_changed |= self.queue.enqueue(request);
        }
        head_changed
    }

    /// Re-queues a pending request from its indicator unless it is already queued.
    pub fn review(&mut self, permission_id: PermissionId) -> bool {
        if !self.is_enabled() || self.queue.contains(permission_id) {
            return false;
        }
        match self.requests.get(permission_id) {
            Some(request) if request.is_pending() => self.queue.enqueue(request.clone()),
            _ => false,
        }
    }

    /// Puts the queue head on the surface.
    pub fn present_current(&mut self) {
        if let (Some(surface), Some(request)) = (self.surface.as_mut(), self.queue.current_request()) {
            debug!(permission_id = %request.permission_id, "showing permission dialog");
            surface.show(&describe(request));
        }
    }

    /// Resolves the shown dialog. Returns `true` when the next dialog must be presented.
    pub fn resolve(&mut self, action: DialogAction) -> Result<bool, PermissionError> {
        let decision = self.queue.advance(action.grants())?;
        if let Err(e) = self.sink.send_decision(decision) {
            warn!(permission_id = %decision.permission_id, error = %e, "failed to send permission decision");
        }
        if let Some(surface) = self.surface.as_mut() {
            surface.hide();
        }
        Ok(self.queue.is_showing())
    }

    /// Processes events until every sender is dropped.
    pub async fn run(&mut self, mut events: mpsc::UnboundedReceiver<ControllerEvent>) {
        while let Some(event) = events.recv().await {
            let present = match event {
                ControllerEvent::Push(snapshot) => self.handle_push(snapshot),
                ControllerEvent::Action(action) => self.resolve(action).unwrap_or_else(|e| {
                    debug!(error = %e, "ignoring dialog action");
                    false
                }),
                ControllerEvent::Review(permission_id) => self.review(permission_id),
            };
            if present {
                if !self.dialog_delay.is_zero() {
                    tokio::time::sleep(self.dialog_delay).await;
                }
                self.present_current();
            }
        }
    }

    pub fn current_request(&self) -> Option<&PermissionRequest> {
        self.queue.current_request()
    }

    pub fn queue(&self) -> &PermissionQueue {
        &self.queue
    }

    pub fn get_buttons(&self, tab_id: &str) -> Vec<IndicatorButton> {
        self.requests.get_buttons(tab_id)
    }

    pub fn on_change<F>(&mut self, listener: F)
    where
        F: FnMut(&str) + 'static,
    {
        self.requests.on_change(listener);
    }
}
