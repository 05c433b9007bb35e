pub mod headers;
pub mod logging;

use async_trait::async_trait;
use axum::{
    body::Body,
    response::Response,
};

use crate::context::RequestContext;

/// Hook pair run around every request, including requests rejected by the
/// address resolver. Hooks observe and decorate; they never reject.
#[async_trait]
pub trait EchoMiddleware: Send + Sync {
    fn name(&self) -> &'static str;

    async fn on_request(&self, _ctx: &RequestContext) {}

    async fn on_response(&self, _ctx: &RequestContext, _response: &mut Response<Body>) {}
}
