//! chromeguard: security-oriented browser chrome, without a UI toolkit.
//!
//! Permission review queue and its host protocol, per-tab cookie inspection,
//! link risk highlighting and security reports. This library crate exposes
//! all modules for use by the RPC binary and integration tests.

pub mod app;
pub mod channel;
pub mod database;
pub mod managers;
pub mod rpc_handler;
pub mod services;
pub mod types;
