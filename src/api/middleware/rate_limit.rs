//! Per-IP rate limiting (`ratelimit` decorator).

use anyhow::{Context, Result};
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

/// Token bucket settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    /// Seconds between token replenishments.
    pub per_second: u64,
    pub burst: u32,
}

impl Default for RateLimit {
    fn default() -> Self {
        Self {
            per_second: 1,
            burst: 50,
        }
    }
}

/// Creates a rate limiter keyed by peer IP.
///
/// Requests exceeding the limit receive `429 Too Many Requests`. The peer
/// address comes from connection info, so the server must be started with
/// `into_make_service_with_connect_info`.
///
/// # Errors
///
/// Returns an error if `per_second` or `burst` is zero.
pub fn layer(
    limit: RateLimit,
) -> Result<GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>> {
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(limit.per_second)
        .burst_size(limit.burst)
        .finish()
        .context("Invalid rate limit settings")?;

    Ok(GovernorLayer::new(Arc::new(governor_conf)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_burst_is_rejected() {
        let result = layer(RateLimit {
            per_second: 1,
            burst: 0,
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_default_limit_builds() {
        assert!(layer(RateLimit::default()).is_ok());
    }
}
