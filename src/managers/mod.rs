// chromeguard state managers
// Managers own mutable state: the host-side request store, the UI-side
// snapshot tracker, the review queue and the controller driving it.

pub mod permission_controller;
pub mod permission_queue;
pub mod permission_requests;
pub mod permission_store;
