//! Per-client rate limiting for the rewrite and batch routes

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{HeaderMap, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::api::state::AppState;
use crate::api::types::ApiError;

/// Key used when no client address can be determined
pub const ANONYMOUS_CLIENT: &str = "anonymous";

/// Admit or reject the request against the shared limiter.
///
/// Admitted responses carry `x-ratelimit-*` headers; rejections are 429
/// with `Retry-After`. Passes everything through when limiting is disabled.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(limiter) = state.rate_limiter.clone() else {
        return Ok(next.run(request).await);
    };

    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let client_key = client_key(request.headers(), peer);

    let (remaining, reset_in_seconds) = limiter
        .admit(&client_key, Instant::now())
        .await
        .into_result()
        .inspect_err(|err| {
            warn!(
                client = %client_key,
                path = %request.uri().path(),
                retry_after_seconds = err.retry_after_seconds(),
                "Rate limit exceeded"
            );
        })?;

    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert(
        "x-ratelimit-limit",
        HeaderValue::from(limiter.config().max_requests),
    );
    headers.insert("x-ratelimit-remaining", HeaderValue::from(remaining));
    headers.insert("x-ratelimit-reset", HeaderValue::from(reset_in_seconds));
    Ok(response)
}

/// Identify the client: first `X-Forwarded-For` hop, then `X-Real-IP`,
/// then the peer address.
pub fn client_key(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    let header_value = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    if let Some(first_hop) = header_value("x-forwarded-for")
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
    {
        return first_hop.to_string();
    }

    if let Some(real_ip) = header_value("x-real-ip") {
        return real_ip.to_string();
    }

    peer.map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| ANONYMOUS_CLIENT.to_string())
}
