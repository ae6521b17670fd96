//! Per-route, per-client rate limiting.
//!
//! Sliding-window limiter: each `(route, client)` pair keeps the timestamps
//! of its requests inside the window, and a request is rejected once that
//! count reaches `max_requests`. Routes never share a budget.
//!
//! Memory is bounded two ways: idle keys are swept every `cleanup_interval`
//! checks, and no more than `max_tracked_keys` pairs are tracked at once. A
//! new pair arriving at the cap evicts the pair whose latest request is
//! oldest when a sweep frees nothing, so a new client always gets its full
//! budget.

use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use axum::extract::{ConnectInfo, FromRequestParts};
use http::request::Parts;

use crate::error::ApiError;

/// Configuration for the rate limiter.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum number of requests allowed in the window.
    pub max_requests: u32,

    /// Size of the sliding window.
    pub window: Duration,

    /// How often to sweep idle keys (every N checks).
    pub cleanup_interval: u64,

    /// Maximum number of `(route, client)` pairs tracked at once.
    pub max_tracked_keys: usize,
}

impl RateLimitConfig {
    /// `max_requests` per minute with default housekeeping.
    pub fn per_minute(max_requests: u32) -> Self {
        Self {
            max_requests,
            ..Default::default()
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 5,
            window: Duration::from_secs(60),
            cleanup_interval: 100,
            max_tracked_keys: 10_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct RateKey {
    route: &'static str,
    client: String,
}

/// Sliding-window rate limiter keyed by route and client.
pub struct RateLimiter {
    config: RateLimitConfig,
    state: Mutex<HashMap<RateKey, Vec<Instant>>>,
    checks: AtomicU64,
}

impl RateLimiter {
    /// Creates a new rate limiter with the given configuration.
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            state: Mutex::new(HashMap::new()),
            checks: AtomicU64::new(0),
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Record a request from `client` on `route`, or reject it.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::RateLimited`] when the budget for this pair is
    /// spent.
    pub fn check(&self, route: &'static str, client: &ClientKey) -> Result<(), ApiError> {
        self.check_at(route, client, Instant::now())
    }

    /// [`check`](Self::check) with an explicit clock reading.
    pub fn check_at(
        &self,
        route: &'static str,
        client: &ClientKey,
        now: Instant,
    ) -> Result<(), ApiError> {
        let cutoff = now.checked_sub(self.config.window);

        let count = self.checks.fetch_add(1, Ordering::Relaxed);
        if count > 0 && count % self.config.cleanup_interval.max(1) == 0 {
            tracing::debug!(checks = count, "running periodic rate limiter cleanup");
            self.cleanup_at(now);
        }

        let key = RateKey {
            route,
            client: client.as_str().to_string(),
        };

        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        if !state.contains_key(&key) && state.len() >= self.config.max_tracked_keys {
            sweep(&mut state, cutoff);
            if state.len() >= self.config.max_tracked_keys {
                evict_stalest(&mut state);
                tracing::warn!(
                    route,
                    client = %client,
                    tracked = state.len(),
                    "tracking cap reached, evicted stalest client"
                );
            }
        }

        let timestamps = state.entry(key).or_default();
        if let Some(cutoff) = cutoff {
            timestamps.retain(|&t| t > cutoff);
        }

        if timestamps.len() >= self.config.max_requests as usize {
            let oldest = timestamps.first().copied().unwrap_or(now);
            let retry_after = (oldest + self.config.window).saturating_duration_since(now);
            tracing::warn!(
                route,
                client = %client,
                requests = timestamps.len(),
                max = self.config.max_requests,
                "rate limit exceeded"
            );
            return Err(ApiError::RateLimited {
                retry_after_secs: retry_after.as_secs().max(1),
            });
        }

        timestamps.push(now);
        Ok(())
    }

    /// Drop keys with no requests inside the window.
    pub fn cleanup(&self) {
        self.cleanup_at(Instant::now());
    }

    fn cleanup_at(&self, now: Instant) {
        let cutoff = now.checked_sub(self.config.window);
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        sweep(&mut state, cutoff);
    }

    /// Number of `(route, client)` pairs currently tracked.
    pub fn tracked_keys(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

fn sweep(state: &mut HashMap<RateKey, Vec<Instant>>, cutoff: Option<Instant>) {
    state.retain(|_, timestamps| {
        if let Some(cutoff) = cutoff {
            timestamps.retain(|&t| t > cutoff);
        }
        !timestamps.is_empty()
    });
}

fn evict_stalest(state: &mut HashMap<RateKey, Vec<Instant>>) {
    let stalest = state
        .iter()
        .min_by_key(|(_, timestamps)| timestamps.last().copied())
        .map(|(key, _)| key.clone());
    if let Some(key) = stalest {
        state.remove(&key);
    }
}

/// Identity a request is rate limited under.
///
/// The peer address when the server was started with connect info, else the
/// first `X-Forwarded-For` entry, else `"unknown"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientKey(String);

impl ClientKey {
    /// Key for an explicit client identity.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn from_parts(parts: &Parts) -> Self {
        if let Some(ConnectInfo(addr)) = parts.extensions.get::<ConnectInfo<SocketAddr>>() {
            return Self(addr.ip().to_string());
        }

        parts
            .headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| Self(v.to_string()))
            .unwrap_or_else(|| Self("unknown".to_string()))
    }
}

impl std::fmt::Display for ClientKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for ClientKey {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}
