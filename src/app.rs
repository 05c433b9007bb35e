use std::{
    net::SocketAddr,
    sync::Arc,
};

use axum::{
    Router,
    body::Body,
    extract::{
        ConnectInfo,
        State,
    },
    http::Request,
    response::Response,
    routing::any,
};

use crate::service::EchoService;

/// Every path and method goes through the same handler; the service does its
/// own routing once the caller address is known.
pub fn build_router(service: Arc<EchoService>) -> Router {
    Router::new().fallback(any(echo_handler)).with_state(service)
}

async fn echo_handler(
    State(service): State<Arc<EchoService>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request<Body>,
) -> Response {
    service.handle_http(request, addr).await
}
