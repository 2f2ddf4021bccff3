// chromeguard shared type definitions
// Each submodule defines types used across the crate and on the wire.

pub mod cookie;
pub mod errors;
pub mod link_risk;
pub mod permission;
pub mod security_report;
pub mod settings;
