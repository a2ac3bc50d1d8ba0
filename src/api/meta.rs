//! Request details the transfer layer needs: the public origin for media links and the
//! client address for contact messages.

use crate::api::error::ApiError;
use crate::api::server::AppState;
use crate::transfer::MediaLinks;
use async_trait::async_trait;
use axum::extract::{ConnectInfo, FromRequestParts, Host};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

const FORWARDED_PROTO: &str = "x-forwarded-proto";
const FORWARDED_FOR: &str = "x-forwarded-for";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestMeta {
    /// Scheme and host the client used, e.g. `https://me.dev`.
    pub origin: Option<String>,
    pub client_ip: Option<IpAddr>,
}

impl RequestMeta {
    /// `host` is the authority the client addressed: forwarded host, `Host` header or the
    /// request URI, whichever is present first.
    pub fn from_parts(
        headers: &HeaderMap,
        host: Option<&str>,
        peer: Option<SocketAddr>,
        default_scheme: &str,
    ) -> Self {
        let scheme = header_str(headers, FORWARDED_PROTO)
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(default_scheme);
        let origin = host
            .filter(|host| !host.is_empty())
            .map(|host| format!("{scheme}://{host}"));

        let forwarded = header_str(headers, FORWARDED_FOR)
            .and_then(|v| v.split(',').next())
            .and_then(|v| v.trim().parse::<IpAddr>().ok());
        let client_ip = forwarded.or(peer.map(|addr| addr.ip()));

        Self { origin, client_ip }
    }

    pub fn media_links(&self, media_url: &str) -> MediaLinks {
        MediaLinks::new(self.origin.clone(), media_url)
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for RequestMeta {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);
        let host = Host::from_request_parts(parts, state)
            .await
            .ok()
            .map(|Host(host)| host);
        Ok(Self::from_parts(
            &parts.headers,
            host.as_deref(),
            peer,
            &state.config.public_scheme,
        ))
    }
}
