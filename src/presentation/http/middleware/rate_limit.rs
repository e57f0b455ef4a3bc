// src/presentation/http/middleware/rate_limit.rs
use ::governor::middleware::NoOpMiddleware;
use axum::body::Body;
use std::time::Duration;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor,
};

/// Login attempts allowed per client IP before throttling.
pub const LOGIN_BURST: u32 = 5;
/// One attempt is replenished per period, so the steady rate is 5 per minute.
pub const LOGIN_REPLENISH_PERIOD: Duration = Duration::from_secs(12);

pub type LoginRateLimitLayer = GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware, Body>;

/// Per-IP limiter for the login route. The client IP comes from
/// `X-Forwarded-For`/`X-Real-IP` when a proxy sets them, otherwise from the
/// peer address, so the server must run with connect info.
pub fn login_rate_limit_layer() -> Option<LoginRateLimitLayer> {
    let mut builder = GovernorConfigBuilder::default();
    builder.period(LOGIN_REPLENISH_PERIOD);
    builder.burst_size(LOGIN_BURST);
    let config = builder.key_extractor(SmartIpKeyExtractor).finish()?;
    Some(GovernorLayer::new(config))
}
