use http::{HeaderMap, Method, Uri};
use std::{
    net::SocketAddr,
    time::Instant,
};

/// Per-request state the middleware chain can see. Handlers never read it;
/// they get a [`crate::info::RequestInfo`] instead.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: String,
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub peer_addr: SocketAddr,
    pub started_at: Instant,
}

impl RequestContext {
    pub fn new(
        request_id: String,
        method: Method,
        uri: Uri,
        headers: HeaderMap,
        peer_addr: SocketAddr,
    ) -> Self {
        Self {
            request_id,
            method,
            uri,
            headers,
            peer_addr,
            started_at: Instant::now(),
        }
    }
}
