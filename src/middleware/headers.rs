use async_trait::async_trait;
use axum::{
    body::Body,
    http::{HeaderName, HeaderValue},
    response::Response,
};

use crate::{
    context::RequestContext,
    middleware::EchoMiddleware,
};

/// Tags every response with the request id and `nosniff`.
pub struct ResponseHeadersMiddleware;

#[async_trait]
impl EchoMiddleware for ResponseHeadersMiddleware {
    fn name(&self) -> &'static str {
        "response-headers"
    }

    async fn on_response(&self, ctx: &RequestContext, response: &mut Response<Body>) {
        if let Ok(value) = HeaderValue::from_str(&ctx.request_id) {
            response
                .headers_mut()
                .insert(HeaderName::from_static("x-request-id"), value);
        }

        response.headers_mut().insert(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        );
    }
}
