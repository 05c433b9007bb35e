use async_trait::async_trait;

use crate::{
    context::RequestContext,
    middleware::EchoMiddleware,
};

pub struct RequestLoggingMiddleware;

#[async_trait]
impl EchoMiddleware for RequestLoggingMiddleware {
    fn name(&self) -> &'static str {
        "request-logging"
    }

    async fn on_request(&self, ctx: &RequestContext) {
        tracing::info!(
            request_id = %ctx.request_id,
            method = %ctx.method,
            path = %ctx.uri.path(),
            peer = %ctx.peer_addr,
            "incoming request"
        );
    }

    async fn on_response(&self, ctx: &RequestContext, response: &mut axum::response::Response) {
        let latency_ms = ctx.started_at.elapsed().as_millis();
        tracing::info!(
            request_id = %ctx.request_id,
            method = %ctx.method,
            path = %ctx.uri.path(),
            status = %response.status(),
            latency_ms = latency_ms,
            "request completed"
        );
    }
}
