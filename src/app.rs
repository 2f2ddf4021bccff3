//! App Core for the chromeguard host process.
//!
//! Central struct holding the permission store, cookie manager, analysis
//! client and settings.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use crate::database::connection::Database;
use crate::managers::permission_store::PermissionStore;
use crate::services::analysis_client::AnalysisClient;
use crate::services::cookie_manager::{CookieManager, MemoryCookieStore};
use crate::services::link_highlighter::HighlighterToggle;
use crate::services::security_report::SecurityReportPanel;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};

pub struct App {
    pub db: Arc<Database>,
    pub permission_store: PermissionStore,
    pub cookie_manager: CookieManager<MemoryCookieStore>,
    pub analysis: AnalysisClient,
    pub link_toggle: HighlighterToggle,
    pub security_report: SecurityReportPanel,
    pub settings_engine: SettingsEngine,
}

impl App {
    /// Creates the app with its settings file and database inside `data_dir`.
    pub fn new(data_dir: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        fs::create_dir_all(data_dir)?;

        let mut settings_engine = SettingsEngine::new(Some(data_dir.join("settings.json")));
        if let Err(e) = settings_engine.load() {
            warn!(error = %e, "settings unreadable, using defaults");
        }
        let settings = settings_engine.get_settings().clone();

        let db = Arc::new(Database::open(data_dir.join("chromeguard.db"))?);
        let permission_store = PermissionStore::new(db.clone(), settings.permissions.remember_decisions);
        let analysis = AnalysisClient::new(&settings)?;
        let security_report = SecurityReportPanel::new(analysis.clone());
        let link_toggle = HighlighterToggle::from_setting(Some(settings.link_highlighter.enabled));

        Ok(Self {
            db,
            permission_store,
            cookie_manager: CookieManager::new(MemoryCookieStore::new()),
            analysis,
            link_toggle,
            security_report,
            settings_engine,
        })
    }

    /// Rebuilds the parts that depend on settings after a change.
    pub fn apply_settings(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let settings = self.settings_engine.get_settings().clone();
        self.permission_store.set_remember_decisions(settings.permissions.remember_decisions);
        if let Some(enabled) = self.link_toggle.apply_setting(Some(settings.link_highlighter.enabled)) {
            info!(enabled, "link highlighter state changed");
        }
        self.analysis = AnalysisClient::new(&settings)?;
        self.security_report = SecurityReportPanel::new(self.analysis.clone());
        Ok(())
    }
}
