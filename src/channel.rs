//! Permission channel between the UI and the host-side permission store.
//!
//! The host pushes complete snapshots of every request it knows about; the UI
//! answers with one-way [`Decision`] messages. Nothing on the UI side waits
//! for the store to acknowledge a decision.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::types::errors::ChannelError;
use crate::types::permission::{Decision, PermissionId, PermissionRequest};

/// Unsolicited host → UI message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "params")]
pub enum Push {
    #[serde(rename = "updatePermissions")]
    UpdatePermissions(Vec<PermissionRequest>),
}

/// Outbound side of the channel carrying decisions to the store.
pub trait DecisionSink {
    fn send_decision(&self, decision: Decision) -> Result<(), ChannelError>;
}

/// [`DecisionSink`] backed by an unbounded tokio channel.
#[derive(Debug, Clone)]
pub struct ChannelSender {
    tx: mpsc::UnboundedSender<Decision>,
}

impl ChannelSender {
    pub fn new(tx: mpsc::UnboundedSender<Decision>) -> Self {
        Self { tx }
    }
}

impl DecisionSink for ChannelSender {
    fn send_decision(&self, decision: Decision) -> Result<(), ChannelError> {
        self.tx.send(decision).map_err(|_| ChannelError::Closed)
    }
}

/// Creates a connected decision sender and the receiver the host reads from.
pub fn decision_channel() -> (ChannelSender, mpsc::UnboundedReceiver<Decision>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ChannelSender::new(tx), rx)
}

/// Requests in `next` that are new since `previous` and still undecided, in `next` order.
///
/// Feeding the same snapshot twice returns nothing the second time.
pub fn reconcile(previous: &[PermissionRequest], next: &[PermissionRequest]) -> Vec<PermissionRequest> {
    let known: HashSet<PermissionId> = previous.iter().map(|r| r.permission_id).collect();
    next.iter()
        .filter(|r| r.is_pending() && !known.contains(&r.permission_id))
        .cloned()
        .collect()
}

/// Distinct tab ids touched by a snapshot change: old snapshot first, then new.
pub fn affected_tabs(previous: &[PermissionRequest], next: &[PermissionRequest]) -> Vec<String> {
    let mut seen = HashSet::new();
    previous
        .iter()
        .chain(next.iter())
        .filter(|r| seen.insert(r.tab_id.as_str()))
        .map(|r| r.tab_id.clone())
        .collect()
}
