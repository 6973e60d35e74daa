//! Fixed-window, per-client request limit for the direct-message routes, counted in Redis.
//!
//! Redis being unreachable never blocks traffic: the request is let through and
//! the failure logged.

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::errors::AppError;
use crate::state::AppState;

const WINDOW_SECS: u64 = 60;

pub fn window_key(client: &str, now_secs: u64) -> String {
    format!("ratelimit:{client}:{}", now_secs / WINDOW_SECS)
}

pub fn exceeds_limit(count: u64, limit: u32) -> bool {
    limit > 0 && count > u64::from(limit)
}

async fn hit(client: &redis::Client, key: &str) -> redis::RedisResult<u64> {
    let mut conn = client.get_multiplexed_async_connection().await?;
    let (count,): (u64,) = redis::pipe()
        .atomic()
        .incr(key, 1u64)
        .expire(key, WINDOW_SECS as i64)
        .ignore()
        .query_async(&mut conn)
        .await?;
    Ok(count)
}

pub async fn rate_limit(
    State(state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let limit = state.config.rate_limit_per_minute;
    if limit == 0 {
        return Ok(next.run(request).await);
    }

    let client = connect_info
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let now = chrono::Utc::now().timestamp().max(0) as u64;
    let key = window_key(&client, now);

    match hit(&state.redis, &key).await {
        Ok(count) if exceeds_limit(count, limit) => {
            warn!("Client {client} over rate limit ({count}/{limit})");
            Err(AppError::RateLimited)
        }
        Ok(_) => Ok(next.run(request).await),
        Err(e) => {
            warn!("Rate limiter unavailable, allowing request: {e}");
            Ok(next.run(request).await)
        }
    }
}
