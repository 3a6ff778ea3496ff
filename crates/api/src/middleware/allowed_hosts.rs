//! `Host` header allow-list.
//!
//! Entries match exactly (case-insensitive, port ignored). An entry with a
//! leading dot (`.example.com`) also matches every subdomain, and `*`
//! matches anything. An empty list disables the check.

use axum::extract::{Request, State};
use axum::http::header::HOST;
use axum::middleware::Next;
use axum::response::Response;

use crate::error::AppError;
use crate::state::AppState;

pub async fn enforce_allowed_hosts(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let allowed = &state.config.allowed_hosts;
    if allowed.is_empty() {
        return Ok(next.run(request).await);
    }

    let host = request
        .headers()
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| request.uri().host())
        .unwrap_or("");

    if !host_is_allowed(host, allowed) {
        tracing::warn!(host, "Rejected request for disallowed host");
        return Err(AppError::BadRequest(format!("Invalid host header: '{host}'")));
    }
    Ok(next.run(request).await)
}

/// Match a `Host` value (optionally with port) against the allow-list.
pub fn host_is_allowed(host: &str, allowed: &[String]) -> bool {
    let host = strip_port(host).to_ascii_lowercase();
    if host.is_empty() {
        return false;
    }
    allowed.iter().any(|pattern| {
        let pattern = pattern.to_ascii_lowercase();
        if pattern == "*" {
            true
        } else if let Some(domain) = pattern.strip_prefix('.') {
            host == domain || host.ends_with(&pattern)
        } else {
            host == pattern
        }
    })
}

fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        // IPv6 literal: keep through the closing bracket.
        return match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        };
    }
    match host.rsplit_once(':') {
        Some((name, port)) if port.chars().all(|c| c.is_ascii_digit()) => name,
        _ => host,
    }
}
