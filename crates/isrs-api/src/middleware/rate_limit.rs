use std::sync::Arc;

use axum::Router;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor,
};

/// Seconds to replenish one generation request
const GENERATION_REPLENISH_SECS: u64 = 6;
const GENERATION_BURST: u32 = 5;

/// Rate limit routes that call the text service, keyed by client IP
///
/// A burst of 5 requests, then one more every 6 seconds. The client IP comes
/// from `X-Forwarded-For`, `X-Real-IP` or `Forwarded` before the peer address.
pub fn apply_generation_rate_limit<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(GENERATION_REPLENISH_SECS)
        .burst_size(GENERATION_BURST)
        .key_extractor(SmartIpKeyExtractor)
        .use_headers()
        .finish()
        .expect("Failed to build generation rate limiter configuration");

    router.layer(GovernorLayer::new(Arc::new(governor_conf)))
}
