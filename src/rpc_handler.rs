//! RPC method handler for the chromeguard JSON-RPC protocol.
//!
//! Extracted from `rpc_server.rs` so it can be unit-tested independently.
//! `handle_method` dispatches a method call to the permission store, cookie
//! manager, analysis client or settings engine held by [`App`].

use std::sync::{Mutex, MutexGuard};

use serde_json::{json, Value};

use crate::app::App;
use crate::channel::Push;
use crate::managers::permission_store::PermissionStoreTrait;
use crate::services::dialog_presenter::explanation_text;
use crate::services::link_highlighter::style_for_verdict;
use crate::services::settings_engine::SettingsEngineTrait;
use crate::types::cookie::{CookieRemoval, RemoveCookiesResult};
use crate::types::permission::{Decision, PermissionDetails, PermissionKind};

fn lock(app: &Mutex<App>) -> Result<MutexGuard<'_, App>, String> {
    app.lock().map_err(|e| e.to_string())
}

fn str_param<'a>(params: &'a Value, name: &str) -> Result<&'a str, String> {
    params
        .get(name)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("missing {}", name))
}

fn opt_str_param<'a>(params: &'a Value, name: &str) -> Option<&'a str> {
    params.get(name).and_then(|v| v.as_str())
}

/// Whether a successful call to `method` changed the permission request set.
pub fn mutates_permissions(method: &str) -> bool {
    matches!(method, "permission.request" | "permission.decide" | "permission.clear_tab")
}

/// Whether `method` bypasses the server's rate limiter. Decisions are
/// one-way and never resent, so dropping one would strand its request.
pub fn is_rate_exempt(method: &str) -> bool {
    method == "permission.decide"
}

/// The `updatePermissions` push event carrying the store's full snapshot.
pub fn permission_push(app: &Mutex<App>) -> Result<Value, String> {
    let snapshot = lock(app)?.permission_store.snapshot();
    serde_json::to_value(Push::UpdatePermissions(snapshot)).map_err(|e| e.to_string())
}

/// Dispatch a JSON-RPC method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
/// The app lock is never held across a network call.
pub async fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Permissions ───
        "permission.request" => {
            let tab_id = str_param(params, "tabId")?;
            let kind = PermissionKind::from(str_param(params, "permission")?);
            let details: PermissionDetails = match params.get("details") {
                Some(d) if !d.is_null() => serde_json::from_value(d.clone()).map_err(|e| format!("invalid details: {}", e))?,
                _ => PermissionDetails::default(),
            };
            let mut a = lock(app)?;
            let ids = a.permission_store
                .request(tab_id, kind, opt_str_param(params, "origin"), opt_str_param(params, "url"), details)
                .map_err(|e| e.to_string())?;
            Ok(json!({"permissionIds": ids}))
        }
        "permission.list" => {
            let snapshot = lock(app)?.permission_store.snapshot();
            serde_json::to_value(snapshot).map_err(|e| e.to_string())
        }
        "permission.decide" => {
            let decision: Decision = serde_json::from_value(params.clone())
                .map_err(|e| format!("invalid decision: {}", e))?;
            lock(app)?.permission_store.handle_decision(decision).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "permission.clear_tab" => {
            let tab_id = str_param(params, "tabId")?;
            let removed = lock(app)?.permission_store.clear_tab(tab_id);
            Ok(json!({"removed": removed}))
        }
        "permission.site" => {
            let origin = str_param(params, "origin")?;
            let perms = lock(app)?.permission_store.site_permissions(origin).map_err(|e| e.to_string())?;
            serde_json::to_value(perms).map_err(|e| e.to_string())
        }
        "permission.forget_site" => {
            let origin = str_param(params, "origin")?;
            lock(app)?.permission_store.forget_site(origin).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "permission.explain" => {
            let kind = PermissionKind::from(str_param(params, "permission")?);
            let client = lock(app)?.analysis.clone();
            let result = client.explain_permission(&kind, opt_str_param(params, "url")).await;
            Ok(json!({"text": explanation_text(result)}))
        }

        // ─── Cookies ───
        "cookies.get" => {
            let url = opt_str_param(params, "url").unwrap_or("");
            let cookies = lock(app)?.cookie_manager.get_cookies_for_url(url, opt_str_param(params, "partition"));
            serde_json::to_value(cookies).map_err(|e| e.to_string())
        }
        "cookies.remove" => {
            let removals: Vec<CookieRemoval> = match params.get("cookies").and_then(|v| v.as_array()) {
                Some(arr) => arr.iter().filter_map(|c| serde_json::from_value(c.clone()).ok()).collect(),
                None => {
                    return serde_json::to_value(RemoveCookiesResult { success: false, count: 0 })
                        .map_err(|e| e.to_string());
                }
            };
            let result = lock(app)?.cookie_manager.remove_cookies(opt_str_param(params, "partition"), &removals);
            serde_json::to_value(result).map_err(|e| e.to_string())
        }
        "cookies.indicator" => {
            let url = str_param(params, "url")?;
            let visible = lock(app)?.cookie_manager.indicator_visible(url, opt_str_param(params, "partition"));
            Ok(json!({"visible": visible}))
        }
        "cookies.breakdown" => {
            let url = str_param(params, "url")?;
            let breakdown = lock(app)?.cookie_manager.breakdown(url, opt_str_param(params, "partition"));
            serde_json::to_value(breakdown).map_err(|e| e.to_string())
        }

        // ─── Analysis ───
        "security_report.fetch" => {
            let url = str_param(params, "url")?;
            let panel = lock(app)?.security_report.clone();
            let view = panel.render_report(url).await.map_err(|e| e.to_string())?;
            serde_json::to_value(view).map_err(|e| e.to_string())
        }
        "link.analyze" => {
            let url = str_param(params, "url")?;
            if !url.starts_with("http:") && !url.starts_with("https:") {
                return Err("invalid url: must start with http: or https:".to_string());
            }
            let client = {
                let a = lock(app)?;
                if !a.link_toggle.enabled() {
                    return Ok(json!({"disabled": true}));
                }
                a.analysis.clone()
            };
            let verdict = client.analyze_url(url).await.map_err(|e| e.to_string())?;
            serde_json::to_value(style_for_verdict(&verdict)).map_err(|e| e.to_string())
        }

        "link.toggle" => {
            let mut a = lock(app)?;
            let enabled = a.link_toggle.toggle();
            if let Err(e) = a.settings_engine.set_value("link_highlighter.enabled", json!(enabled)) {
                a.link_toggle.toggle();
                return Err(e.to_string());
            }
            Ok(json!({"enabled": enabled, "title": a.link_toggle.title()}))
        }

        // ─── Settings ───
        "settings.get" => {
            let a = lock(app)?;
            serde_json::to_value(a.settings_engine.get_settings()).map_err(|e| e.to_string())
        }
        "settings.set" => {
            let key = str_param(params, "key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            let mut a = lock(app)?;
            a.settings_engine.set_value(key, value).map_err(|e| e.to_string())?;
            a.apply_settings().map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
