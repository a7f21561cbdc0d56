//! Structured dispatch events

use serde_json::json;
use tracing::{error, info, warn};

/// Log one finished dispatch, at a level chosen by status class
pub fn log_dispatch(request_id: &str, method: &str, path: &str, status: u16, duration_ms: u128) {
    let entry = json!({
        "event": "dispatch",
        "request_id": request_id,
        "method": method,
        "path": path,
        "status": status,
        "duration_ms": duration_ms,
    });

    if status >= 500 {
        error!(target: "waymark::kernel", "{}", entry);
    } else if status >= 400 {
        warn!(target: "waymark::kernel", "{}", entry);
    } else {
        info!(target: "waymark::kernel", "{}", entry);
    }
}
