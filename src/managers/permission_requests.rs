//! UI-side view of the host's permission requests.
//!
//! Keeps the last snapshot pushed by the host, tells tab-bar listeners which
//! tabs changed, and builds the per-tab indicator buttons.

use serde::Serialize;

use crate::channel::{affected_tabs, reconcile};
use crate::services::dialog_presenter;
use crate::types::permission::{PermissionId, PermissionRequest};

type ChangeListener = Box<dyn FnMut(&str)>;

/// What clicking an indicator does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonAction {
    /// The permission is already granted; reload the tab so the page picks it up.
    Reload,
    /// Open the review dialog again.
    Review,
}

/// A tab-bar indicator for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorButton {
    pub permission_id: PermissionId,
    pub icons: Vec<&'static str>,
    pub active: bool,
    pub action: ButtonAction,
}

/// Last known snapshot plus change listeners.
pub struct PermissionRequests {
    requests: Vec<PermissionRequest>,
    listeners: Vec<ChangeListener>,
}

impl PermissionRequests {
    pub fn new() -> Self {
        Self {
            requests: Vec::new(),
            listeners: Vec::new(),
        }
    }

    /// Registers a listener called with each affected tab id after every update.
    pub fn on_change<F>(&mut self, listener: F)
    where
        F: FnMut(&str) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Replaces the snapshot and returns the requests that are new and pending.
    pub fn update(&mut self, snapshot: Vec<PermissionRequest>) -> Vec<PermissionRequest> {
        let previous = std::mem::replace(&mut self.requests, snapshot);
        for tab_id in affected_tabs(&previous, &self.requests) {
            for listener in self.listeners.iter_mut() {
                listener(&tab_id);
            }
        }
        reconcile(&previous, &self.requests)
    }

    /// Indicator buttons for a tab. Requests without icons get no button.
    pub fn get_buttons(&self, tab_id: &str) -> Vec<IndicatorButton> {
        self.requests
            .iter()
            .filter(|r| r.tab_id == tab_id)
            .filter_map(|r| {
                let icons = dialog_presenter::icons(r);
                if icons.is_empty() {
                    return None;
                }
                let active = r.is_granted();
                Some(IndicatorButton {
                    permission_id: r.permission_id,
                    icons,
                    active,
                    action: if active { ButtonAction::Reload } else { ButtonAction::Review },
                })
            })
            .collect()
    }

    pub fn get(&self, permission_id: PermissionId) -> Option<&PermissionRequest> {
        self.requests.iter().find(|r| r.permission_id == permission_id)
    }

    pub fn requests(&self) -> &[PermissionRequest] {
        &self.requests
    }
}

impl Default for PermissionRequests {
    fn default() -> Self {
        Self::new()
    }
}
