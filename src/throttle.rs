//! Keyed request windows: the per-caller review throttles and the global per-address limit.

use std::{num::NonZeroU32, sync::Arc, time::Duration};

use governor::{
    Quota, RateLimiter,
    clock::{Clock, DefaultClock},
    state::keyed::DefaultKeyedStateStore,
};

use crate::{config::WindowConfig, errors::AppError};

pub type KeyedLimiter = RateLimiter<String, DefaultKeyedStateStore<String>, DefaultClock>;

/// Which review window a request counts against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    ReviewList,
    ReviewCreate,
}

impl Scope {
    fn as_str(self) -> &'static str {
        match self {
            Scope::ReviewList => "review-list",
            Scope::ReviewCreate => "review-create",
        }
    }
}

/// A keyed limiter that admits at most `requests` per `period` for every key.
///
/// The whole bound is available as a burst and one slot comes back per `period`, so no
/// rolling window of length `period` ever sees more than `requests` admissions.
#[derive(Clone)]
pub struct Window {
    limiter: Arc<KeyedLimiter>,
    clock: DefaultClock,
}

impl Window {
    pub fn new(config: WindowConfig) -> Self {
        Self::with_quota(quota(config))
    }

    pub fn with_quota(quota: Quota) -> Self {
        let clock = DefaultClock::default();
        Self {
            limiter: Arc::new(RateLimiter::dashmap_with_clock(quota, &clock)),
            clock,
        }
    }

    /// Counts one request for `key`, or reports how long until the next one is admitted.
    pub fn check(&self, key: &str) -> Result<(), Duration> {
        self.limiter
            .check_key(&key.to_string())
            .map_err(|not_until| not_until.wait_time_from(self.clock.now()))
    }

    /// Drops keys whose state is back to fresh.
    pub fn retain_recent(&self) {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
    }

    /// Number of keys currently tracked.
    pub fn len(&self) -> usize {
        self.limiter.len()
    }

    pub fn is_empty(&self) -> bool {
        self.limiter.is_empty()
    }
}

fn quota(config: WindowConfig) -> Quota {
    Quota::with_period(config.period)
        .unwrap_or_else(|| Quota::per_second(NonZeroU32::MAX))
        .allow_burst(config.requests)
}

#[derive(Clone)]
pub struct Throttles {
    pub review_list: Window,
    pub review_create: Window,
}

impl Throttles {
    pub fn new(review_list: WindowConfig, review_create: WindowConfig) -> Self {
        Self {
            review_list: Window::new(review_list),
            review_create: Window::new(review_create),
        }
    }

    pub fn retain_recent(&self) {
        self.review_list.retain_recent();
        self.review_create.retain_recent();
    }

    pub fn check(&self, scope: Scope, key: &str) -> Result<(), AppError> {
        let window = match scope {
            Scope::ReviewList => &self.review_list,
            Scope::ReviewCreate => &self.review_create,
        };

        window.check(key).map_err(|wait| {
            tracing::warn!("Throttled {} request for {}", scope.as_str(), key);
            AppError::RateLimited {
                retry_after_secs: retry_after_secs(wait),
            }
        })
    }
}

/// Whole seconds, rounded up, never zero.
pub fn retry_after_secs(wait: Duration) -> u64 {
    let secs = wait.as_secs() + u64::from(wait.subsec_nanos() > 0);
    secs.max(1)
}
