//! Permission Store for the host process.
//!
//! Authoritative list of permission requests raised by pages. Assigns ids,
//! applies decisions sent by the UI and remembers per-site decisions in SQLite.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::{params, OptionalExtension};
use tracing::{debug, info};
use uuid::Uuid;

use crate::database::connection::Database;
use crate::types::errors::PermissionError;
use crate::types::permission::{
    site_key, Decision, GrantState, PermissionDetails, PermissionId, PermissionKind,
    PermissionRequest, SitePermission,
};

/// Trait defining permission store operations.
pub trait PermissionStoreTrait {
    fn request(
        &mut self,
        tab_id: &str,
        kind: PermissionKind,
        origin: Option<&str>,
        url: Option<&str>,
        details: PermissionDetails,
    ) -> Result<Vec<PermissionId>, PermissionError>;
    fn handle_decision(&mut self, decision: Decision) -> Result<(), PermissionError>;
    fn snapshot(&self) -> Vec<PermissionRequest>;
    fn get(&self, permission_id: PermissionId) -> Option<&PermissionRequest>;
    fn clear_tab(&mut self, tab_id: &str) -> usize;
    fn remembered(
        &self,
        origin: &str,
        kind: &PermissionKind,
        details: &PermissionDetails,
    ) -> Result<Option<bool>, PermissionError>;
    fn site_permissions(&self, origin: &str) -> Result<Vec<SitePermission>, PermissionError>;
    fn forget_site(&mut self, origin: &str) -> Result<(), PermissionError>;
}

/// In-memory request list backed by SQLite for remembered decisions.
pub struct PermissionStore {
    db: Arc<Database>,
    requests: Vec<PermissionRequest>,
    next_id: u64,
    remember_decisions: bool,
}

impl PermissionStore {
    pub fn new(db: Arc<Database>, remember_decisions: bool) -> Self {
        Self {
            db,
            requests: Vec::new(),
            next_id: 1,
            remember_decisions,
        }
    }

    pub fn set_remember_decisions(&mut self, remember: bool) {
        self.remember_decisions = remember;
    }

    fn now_ts() -> i64 {
        SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_secs() as i64
    }

    fn allocate_id(&mut self) -> PermissionId {
        let id = PermissionId(self.next_id);
        self.next_id += 1;
        id
    }

    fn remember(&self, origin: &str, key: &str, granted: bool) -> Result<(), PermissionError> {
        self.db.connection().execute(
            "INSERT INTO site_permissions (id, origin, permission, granted, updated_at) VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(origin, permission) DO UPDATE SET granted = excluded.granted, updated_at = excluded.updated_at",
            params![Uuid::new_v4().to_string(), origin, key, granted, Self::now_ts()],
        ).map_err(|e| PermissionError::DatabaseError(e.to_string()))?;
        Ok(())
    }
}

impl PermissionStoreTrait for PermissionStore {
    /// Records a page's request. A media request for several devices becomes
    /// one request per device so each gets its own dialog.
    fn request(
        &mut self,
        tab_id: &str,
        kind: PermissionKind,
        origin: Option<&str>,
        url: Option<&str>,
        details: PermissionDetails,
    ) -> Result<Vec<PermissionId>, PermissionError> {
        let parts = if kind == PermissionKind::Media && details.media_types.len() > 1 {
            details
                .media_types
                .into_iter()
                .map(|media| PermissionDetails { media_types: vec![media] })
                .collect()
        } else {
            vec![details]
        };

        let mut ids = Vec::with_capacity(parts.len());
        for details in parts {
            let granted = match origin {
                Some(o) => match self.remembered(o, &kind, &details)? {
                    Some(true) => GrantState::Granted,
                    Some(false) => GrantState::Denied,
                    None => GrantState::Pending,
                },
                None => GrantState::Pending,
            };
            let permission_id = self.allocate_id();
            debug!(%permission_id, tab_id, permission = %kind, ?granted, "permission requested");
            self.requests.push(PermissionRequest {
                permission_id,
                tab_id: tab_id.to_string(),
                permission: kind.clone(),
                origin: origin.map(str::to_string),
                url: url.map(str::to_string),
                details,
                granted,
            });
            ids.push(permission_id);
        }
        Ok(ids)
    }

    /// Applies a decision. Repeated decisions for a resolved request are ignored.
    ///
    /// The site decision is persisted first; on a database error the request
    /// stays pending so a retried decision is still applied.
    fn handle_decision(&mut self, decision: Decision) -> Result<(), PermissionError> {
        let index = self
            .requests
            .iter()
            .position(|r| r.permission_id == decision.permission_id)
            .ok_or(PermissionError::UnknownRequest(decision.permission_id))?;

        let request = &self.requests[index];
        if !request.is_pending() {
            debug!(permission_id = %decision.permission_id, "duplicate decision ignored");
            return Ok(());
        }

        if self.remember_decisions {
            if let Some(origin) = request.origin.as_deref() {
                self.remember(origin, &request.site_key(), decision.grant)?;
            }
        }

        let request = &mut self.requests[index];
        request.granted = if decision.grant { GrantState::Granted } else { GrantState::Denied };
        info!(
            permission_id = %decision.permission_id,
            permission = %request.permission,
            grant = decision.grant,
            "permission decided"
        );
        Ok(())
    }

    fn snapshot(&self) -> Vec<PermissionRequest> {
        self.requests.clone()
    }

    fn get(&self, permission_id: PermissionId) -> Option<&PermissionRequest> {
        self.requests.iter().find(|r| r.permission_id == permission_id)
    }

    /// Drops every request of a closed or navigated tab.
    fn clear_tab(&mut self, tab_id: &str) -> usize {
        let before = self.requests.len();
        self.requests.retain(|r| r.tab_id != tab_id);
        before - self.requests.len()
    }

    fn remembered(
        &self,
        origin: &str,
        kind: &PermissionKind,
        details: &PermissionDetails,
    ) -> Result<Option<bool>, PermissionError> {
        self.db.connection().query_row(
            "SELECT granted FROM site_permissions WHERE origin = ?1 AND permission = ?2",
            params![origin, site_key(kind, details)],
            |row| row.get::<_, bool>(0),
        ).optional().map_err(|e| PermissionError::DatabaseError(e.to_string()))
    }

    fn site_permissions(&self, origin: &str) -> Result<Vec<SitePermission>, PermissionError> {
        let conn = self.db.connection();
        let mut stmt = conn.prepare(
            "SELECT origin, permission, granted, updated_at FROM site_permissions WHERE origin = ?1 ORDER BY permission"
        ).map_err(|e| PermissionError::DatabaseError(e.to_string()))?;

        let rows = stmt.query_map(params![origin], |row| {
            let key: String = row.get(1)?;
            let (permission, media_type) = SitePermission::parse_key(&key);
            Ok(SitePermission {
                origin: row.get(0)?,
                permission,
                media_type,
                granted: row.get(2)?,
                updated_at: row.get(3)?,
            })
        }).map_err(|e| PermissionError::DatabaseError(e.to_string()))?;

        let mut result = Vec::new();
        for row in rows {
            result.push(row.map_err(|e| PermissionError::DatabaseError(e.to_string()))?);
        }
        Ok(result)
    }

    fn forget_site(&mut self, origin: &str) -> Result<(), PermissionError> {
        self.db.connection().execute(
            "DELETE FROM site_permissions WHERE origin = ?1",
            params![origin],
        ).map_err(|e| PermissionError::DatabaseError(e.to_string()))?;
        Ok(())
    }
}
