//! Per-client-IP rate limiting for login and engagement endpoints.

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{
    clock::{Clock, DefaultClock},
    DefaultKeyedRateLimiter, Quota, RateLimiter,
};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::NonZeroU32;

use crate::app::AppState;
use crate::error::ApiError;

/// Keyed limiter shared by all requests, one bucket per client IP.
pub struct RateLimiterState {
    limiter: DefaultKeyedRateLimiter<IpAddr>,
    clock: DefaultClock,
    rate_limit_per_minute: u32,
    trusted_proxies: Vec<IpAddr>,
}

impl RateLimiterState {
    /// Returns `None` when `rate_limit_per_minute` is 0 (limiting disabled).
    pub fn new(rate_limit_per_minute: u32) -> Option<Self> {
        let per_minute = NonZeroU32::new(rate_limit_per_minute)?;
        Some(Self {
            limiter: RateLimiter::keyed(Quota::per_minute(per_minute)),
            clock: DefaultClock::default(),
            rate_limit_per_minute,
            trusted_proxies: Vec::new(),
        })
    }

    /// Proxies allowed to report the client address in forwarding headers.
    pub fn with_trusted_proxies(mut self, proxies: Vec<IpAddr>) -> Self {
        self.trusted_proxies = proxies;
        self
    }

    /// `Err` carries the seconds until the client may retry (at least 1).
    pub fn check(&self, ip: IpAddr) -> Result<(), u64> {
        self.limiter.check_key(&ip).map_err(|not_until| {
            not_until
                .wait_time_from(self.clock.now())
                .as_secs()
                .max(1)
        })
    }

    /// Bucket key for a request from `peer`.
    pub fn client_ip(&self, headers: &HeaderMap, peer: Option<SocketAddr>) -> IpAddr {
        client_ip(headers, peer, &self.trusted_proxies)
    }

    /// Drops buckets that have fully refilled.
    pub fn retain_recent(&self) {
        self.limiter.retain_recent();
    }

    pub fn len(&self) -> usize {
        self.limiter.len()
    }

    pub fn is_empty(&self) -> bool {
        self.limiter.is_empty()
    }
}

impl std::fmt::Debug for RateLimiterState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiterState")
            .field("rate_limit_per_minute", &self.rate_limit_per_minute)
            .field("tracked_clients", &self.len())
            .finish()
    }
}

/// Client IP used as the limiter key.
///
/// The socket peer is authoritative. Forwarding headers are read only when
/// the peer is a trusted proxy: the right-most `X-Forwarded-For` hop that is
/// not itself trusted wins, then `X-Real-IP`. Without connection info every
/// request shares the unspecified address.
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>, trusted: &[IpAddr]) -> IpAddr {
    let peer_ip = peer
        .map(|p| p.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    if peer.is_none() || !trusted.contains(&peer_ip) {
        return peer_ip;
    }

    let forwarded = headers
        .get_all("x-forwarded-for")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .filter_map(|hop| hop.trim().parse::<IpAddr>().ok())
        .collect::<Vec<_>>();
    if let Some(hop) = forwarded.iter().rev().find(|hop| !trusted.contains(hop)) {
        return *hop;
    }

    headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(peer_ip)
}

/// Rejects over-limit clients with 429 and `Retry-After`.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let Some(limiter) = state.rate_limiter.as_ref() else {
        return next.run(req).await;
    };

    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|c| c.0);
    let ip = limiter.client_ip(req.headers(), peer);

    if let Err(retry_after_secs) = limiter.check(ip) {
        tracing::warn!(client_ip = %ip, path = %req.uri().path(), "Rate limit exceeded");
        return ApiError::RateLimited { retry_after_secs }.into_response();
    }

    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv6Addr;

    fn ip(last: u8) -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(10, 0, 0, last))
    }

    #[test]
    fn test_zero_disables_limiting() {
        assert!(RateLimiterState::new(0).is_none());
        assert!(RateLimiterState::new(60).is_some());
    }

    #[test]
    fn test_exhaustion_reports_retry_after() {
        let state = RateLimiterState::new(2).unwrap();

        assert!(state.check(ip(1)).is_ok());
        assert!(state.check(ip(1)).is_ok());
        let retry = state.check(ip(1)).unwrap_err();
        assert!(retry >= 1);
    }

    #[test]
    fn test_clients_are_independent() {
        let state = RateLimiterState::new(1).unwrap();

        assert!(state.check(ip(1)).is_ok());
        assert!(state.check(ip(1)).is_err());
        assert!(state.check(ip(2)).is_ok());
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn test_debug_output() {
        let state = RateLimiterState::new(30).unwrap();
        let debug = format!("{:?}", state);
        assert!(debug.contains("rate_limit_per_minute: 30"));
    }

    fn peer(addr: &str) -> Option<SocketAddr> {
        Some(addr.parse().unwrap())
    }

    fn forwarded(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", value.parse().unwrap());
        headers
    }

    #[test]
    fn test_untrusted_peer_ignores_forwarding_headers() {
        let mut headers = forwarded("203.0.113.7");
        headers.insert("x-real-ip", "198.51.100.1".parse().unwrap());

        assert_eq!(
            client_ip(&headers, peer("192.0.2.9:5555"), &[]),
            "192.0.2.9".parse::<IpAddr>().unwrap()
        );
    }

    #[test]
    fn test_rotating_forwarded_for_shares_one_bucket() {
        let state = RateLimiterState::new(1).unwrap();
        let client = peer("192.0.2.9:5555");

        let allowed = (0..20)
            .filter(|i| {
                let headers = forwarded(&format!("198.51.100.{}", i));
                state.check(state.client_ip(&headers, client)).is_ok()
            })
            .count();

        assert_eq!(allowed, 1);
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn test_trusted_proxy_uses_rightmost_untrusted_hop() {
        let proxy: IpAddr = "10.0.0.2".parse().unwrap();
        let inner: IpAddr = "10.0.0.3".parse().unwrap();
        let headers = forwarded("1.1.1.1, 203.0.113.7, 10.0.0.3");

        // a client-supplied left-most hop cannot pick its own key
        assert_eq!(
            client_ip(&headers, peer("10.0.0.2:443"), &[proxy, inner]),
            "203.0.113.7".parse::<IpAddr>().unwrap()
        );
    }

    #[test]
    fn test_trusted_proxy_fallbacks() {
        let proxy: IpAddr = "10.0.0.2".parse().unwrap();

        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", "::1".parse().unwrap());
        assert_eq!(
            client_ip(&headers, peer("10.0.0.2:443"), &[proxy]),
            IpAddr::V6(Ipv6Addr::LOCALHOST)
        );

        let headers = forwarded("not-an-ip");
        assert_eq!(client_ip(&headers, peer("10.0.0.2:443"), &[proxy]), proxy);
    }

    #[test]
    fn test_missing_peer_is_unspecified() {
        let headers = forwarded("203.0.113.7");
        assert_eq!(
            client_ip(&headers, None, &[]),
            IpAddr::V4(Ipv4Addr::UNSPECIFIED)
        );
    }
}
