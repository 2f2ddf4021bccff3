// chromeguard services
// Stateless or lightly stateful features: dialog text, cookies, link scoring,
// security reports, the analysis service client and settings.

pub mod analysis_client;
pub mod cookie_manager;
pub mod dialog_presenter;
pub mod link_highlighter;
pub mod security_report;
pub mod settings_engine;
