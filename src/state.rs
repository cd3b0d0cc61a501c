use std::sync::Arc;

use crate::{
    config::Config,
    db::Store,
    middleware::{IpRateLimiter, create_global_rate_limiter},
    throttle::Throttles,
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub config: Arc<Config>,
    pub throttles: Throttles,
    pub global_limiter: IpRateLimiter,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, config: Config) -> Self {
        let throttles = Throttles::new(config.review_list_window, config.review_create_window);
        let global_limiter = create_global_rate_limiter(config.global_rate_per_minute);
        Self {
            store,
            config: Arc::new(config),
            throttles,
            global_limiter,
        }
    }

    /// Forgets limiter keys that have fully recovered.
    pub fn prune_limiters(&self) {
        self.throttles.retain_recent();
        self.global_limiter.retain_recent();
    }
}
