//! Per-client request budget for the analyze route.
//!
//! Each client IP gets a token bucket holding up to `limit` requests that
//! refills continuously over the configured period. Requests without
//! connection info share a single bucket.

use std::{
    collections::HashMap,
    net::{IpAddr, SocketAddr},
    sync::{Arc, Mutex, PoisonError},
    time::{Duration, Instant},
};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{api::ApiError, middleware::RequestId};

const MAX_TRACKED_CLIENTS: usize = 10_000;

#[derive(Debug, Clone, Copy)]
struct Bucket {
    tokens: f64,
    refilled_at: Instant,
}

impl Bucket {
    fn level(&self, now: Instant, refill_per_sec: f64) -> f64 {
        let elapsed = now.saturating_duration_since(self.refilled_at).as_secs_f64();
        self.tokens + elapsed * refill_per_sec
    }
}

#[derive(Debug, Clone)]
pub struct ClientThrottle {
    capacity: f64,
    refill_per_sec: f64,
    max_clients: usize,
    buckets: Arc<Mutex<HashMap<Option<IpAddr>, Bucket>>>,
}

impl ClientThrottle {
    /// `limit` requests per `period` for each client. A zero limit is
    /// treated as one.
    #[must_use]
    pub fn new(limit: usize, period: Duration) -> Self {
        let capacity = f64::from(u32::try_from(limit.max(1)).unwrap_or(u32::MAX));
        let period_secs = period.as_secs_f64().max(f64::EPSILON);
        Self {
            capacity,
            refill_per_sec: capacity / period_secs,
            max_clients: MAX_TRACKED_CLIENTS,
            buckets: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    #[must_use]
    pub fn per_minute(limit: usize) -> Self {
        Self::new(limit, Duration::from_secs(60))
    }

    /// Take one token for `client`, or report how long until one is free.
    fn acquire(&self, client: Option<IpAddr>, now: Instant) -> Result<(), Duration> {
        let mut buckets = self.buckets.lock().unwrap_or_else(PoisonError::into_inner);

        if buckets.len() >= self.max_clients && !buckets.contains_key(&client) {
            let (capacity, rate) = (self.capacity, self.refill_per_sec);
            buckets.retain(|_, bucket| bucket.level(now, rate) < capacity);
        }

        let bucket = buckets.entry(client).or_insert(Bucket {
            tokens: self.capacity,
            refilled_at: now,
        });
        bucket.tokens = bucket.level(now, self.refill_per_sec).min(self.capacity);
        bucket.refilled_at = now;

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            Ok(())
        } else {
            let wait = (1.0 - bucket.tokens) / self.refill_per_sec;
            Err(Duration::try_from_secs_f64(wait).unwrap_or(Duration::MAX))
        }
    }

    #[cfg(test)]
    fn tracked_clients(&self) -> usize {
        self.buckets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Reject requests from clients that have spent their budget with `429` and
/// a `Retry-After` header in whole seconds.
pub async fn throttle_clients(
    State(throttle): State<ClientThrottle>,
    req: Request,
    next: Next,
) -> Response {
    let client = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());

    let Err(wait) = throttle.acquire(client, Instant::now()) else {
        return next.run(req).await;
    };

    let retry_after = wait.as_secs() + u64::from(wait.subsec_nanos() > 0);
    tracing::warn!(client = ?client, retry_after, "analyze rate limit exceeded");

    let request_id = req
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone())
        .unwrap_or_default();
    let mut response = ApiError::new(
        request_id,
        "rate_limited",
        "too many analyze requests, retry later",
    )
    .into_response();
    response
        .headers_mut()
        .insert(header::RETRY_AFTER, HeaderValue::from(retry_after));
    response
}
