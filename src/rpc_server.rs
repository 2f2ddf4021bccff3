//! chromeguard RPC Server: JSON-RPC over stdin/stdout for the browser shell.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"permission.decide", "params":{"permissionId":3,"grant":true}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}
//! Push:     {"event":"updatePermissions", "params":[...]} after every change
//!           to the permission request set.
//!
//! Logs go to stderr; stdout carries only protocol lines.

use std::io::Write;
use std::sync::Mutex;
use std::time::Instant;

use chromeguard::app::App;
use chromeguard::rpc_handler::{handle_method, is_rate_exempt, mutates_permissions, permission_push};
use chromeguard::services::settings_engine::data_dir;

use serde_json::{json, Value};
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Simple rate limiter: max requests per second.
struct RateLimiter {
    window_start: Instant,
    request_count: u32,
    max_per_second: u32,
}

impl RateLimiter {
    fn new(max_per_second: u32) -> Self {
        Self { window_start: Instant::now(), request_count: 0, max_per_second }
    }

    /// Returns true if the request is allowed, false if rate-limited.
    fn check(&mut self) -> bool {
        if self.window_start.elapsed().as_secs() >= 1 {
            self.window_start = Instant::now();
            self.request_count = 0;
        }
        self.request_count += 1;
        self.request_count <= self.max_per_second
    }
}

fn emit(line: &Value) {
    let mut stdout = std::io::stdout().lock();
    if writeln!(stdout, "{}", line).and_then(|_| stdout.flush()).is_err() {
        error!("stdout closed, dropping message");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let dir = data_dir();
    info!(data_dir = %dir.display(), "starting chromeguard host");
    let app = Mutex::new(App::new(&dir)?);

    emit(&json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")}));

    let mut rate_limiter = RateLimiter::new(200);
    let mut lines = BufReader::new(io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                emit(&json!({"id": null, "error": format!("parse error: {}", e)}));
                continue;
            }
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);
        let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");

        if !is_rate_exempt(method) && !rate_limiter.check() {
            warn!(method, "rate limit exceeded");
            emit(&json!({"id": id, "error": "rate limit exceeded"}));
            continue;
        }

        let params = req.get("params").cloned().unwrap_or(json!({}));

        let result = handle_method(&app, method, &params).await;
        let changed = result.is_ok() && mutates_permissions(method);

        emit(&match result {
            Ok(val) => json!({"id": id, "result": val}),
            Err(err) => json!({"id": id, "error": err}),
        });

        if changed {
            match permission_push(&app) {
                Ok(push) => emit(&push),
                Err(e) => error!(error = %e, "failed to build permission push"),
            }
        }
    }

    info!("stdin closed, shutting down");
    Ok(())
}
