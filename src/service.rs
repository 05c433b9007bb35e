use std::{
    net::SocketAddr,
    sync::Arc,
};

use anyhow::Result;
use axum::{
    body::Body,
    http::Request,
    response::{
        IntoResponse,
        Response,
    },
};
use uuid::Uuid;

use crate::{
    config::EchoConfig,
    context::RequestContext,
    info::RequestInfo,
    middleware::{
        EchoMiddleware,
        headers::ResponseHeadersMiddleware,
        logging::RequestLoggingMiddleware,
    },
    resolver::AddressResolver,
    router::{
        Route,
        not_found,
        trailing_slash_redirect,
    },
    template::HtmlTemplate,
};

pub struct EchoService {
    middlewares: Vec<Arc<dyn EchoMiddleware>>,
    resolver: AddressResolver,
    template: HtmlTemplate,
}

impl EchoService {
    pub fn from_config(config: &EchoConfig) -> Result<Self> {
        let template = HtmlTemplate::load(config.template_path.as_deref())?;
        Ok(Self::new(AddressResolver::new(config.trust_proxy.clone()), template))
    }

    pub fn new(resolver: AddressResolver, template: HtmlTemplate) -> Self {
        let middlewares: Vec<Arc<dyn EchoMiddleware>> = vec![
            Arc::new(RequestLoggingMiddleware),
            Arc::new(ResponseHeadersMiddleware),
        ];

        Self {
            middlewares,
            resolver,
            template,
        }
    }

    pub fn resolver(&self) -> &AddressResolver {
        &self.resolver
    }

    pub async fn handle_http(
        &self,
        request: Request<Body>,
        peer_addr: SocketAddr,
    ) -> Response<Body> {
        let (parts, _body) = request.into_parts();

        let request_id = parts
            .headers
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(ToString::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let ctx = RequestContext::new(
            request_id,
            parts.method,
            parts.uri,
            parts.headers,
            peer_addr,
        );

        for middleware in &self.middlewares {
            tracing::trace!(middleware = middleware.name(), "on_request");
            middleware.on_request(&ctx).await;
        }

        let mut response = self.dispatch(&ctx);

        for middleware in self.middlewares.iter().rev() {
            tracing::trace!(middleware = middleware.name(), "on_response");
            middleware.on_response(&ctx, &mut response).await;
        }

        response
    }

    /// Resolves the caller before routing, so a rejected peer never reaches
    /// a handler, not even the not-found one. Trailing-slash redirects are
    /// answered before the caller is resolved.
    fn dispatch(&self, ctx: &RequestContext) -> Response<Body> {
        if let Some(redirect) = trailing_slash_redirect(&ctx.method, &ctx.uri) {
            return redirect;
        }

        let resolved = match self
            .resolver
            .resolve(&ctx.peer_addr.to_string(), &ctx.headers)
        {
            Ok(resolved) => resolved,
            Err(err) => {
                tracing::warn!(
                    request_id = %ctx.request_id,
                    code = err.code(),
                    error = %err,
                    "failed to resolve caller address"
                );
                return err.into_response();
            }
        };

        let info = RequestInfo::new(&resolved, &ctx.method, &ctx.headers);

        match Route::from_path(ctx.uri.path()) {
            Some(route) => route.respond(&info, &self.template),
            None => not_found(),
        }
    }
}
