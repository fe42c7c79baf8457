//! HTTP host: mounts module routes behind the shared middleware stack and
//! serves them until shutdown.

use std::future::Future;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit, middleware::from_fn, response::Json, routing::get, Router,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
};

mod config;
pub mod error;
pub mod openapi;
pub mod request_id;
pub mod web;

pub use config::ApiIngressConfig;

/// Owns the host configuration and assembles the final router.
#[derive(Debug, Clone, Default)]
pub struct ApiIngress {
    config: ApiIngressConfig,
}

impl ApiIngress {
    pub fn new(config: ApiIngressConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ApiIngressConfig {
        &self.config
    }

    /// Mount `routes` next to the host endpoints and wrap everything in the
    /// middleware stack. `docs` are merged into `/openapi.json` when enabled.
    pub fn build_router(
        &self,
        routes: Router,
        docs: impl IntoIterator<Item = utoipa::openapi::OpenApi>,
    ) -> Result<Router> {
        let mut router = Router::new()
            .route("/", get(web::home))
            .route("/health", get(web::health_check));

        if self.config.enable_docs {
            let doc = serde_json::to_value(openapi::document(docs))
                .context("Failed to render OpenAPI document")?;
            let doc = Arc::new(doc);
            router = router.route(
                "/openapi.json",
                get(move || {
                    let doc = doc.clone();
                    async move { Json((*doc).clone()) }
                }),
            );
        }

        let mut router = router.merge(routes).fallback(web::not_found);

        // Layers added later wrap the earlier ones. Outermost to innermost:
        // SetRequestId -> PropagateRequestId -> Trace -> push_req_id -> CORS -> BodyLimit
        // body_limit_bytes is the only cap; extractors would otherwise stop at 2 MB.
        router = router.layer(DefaultBodyLimit::disable());
        router = router.layer(RequestBodyLimitLayer::new(self.config.body_limit_bytes));

        if self.config.cors_enabled {
            router = router.layer(CorsLayer::permissive());
        }

        router = router.layer(from_fn(request_id::push_req_id_to_extensions));
        router = router.layer(request_id::create_trace_layer());

        let x_request_id = request_id::header();
        router = router.layer(PropagateRequestIdLayer::new(x_request_id.clone()));
        router = router.layer(SetRequestIdLayer::new(x_request_id, request_id::MakeReqId));

        Ok(router)
    }

    /// Bind the configured address.
    pub async fn bind(&self) -> Result<TcpListener> {
        TcpListener::bind(&self.config.bind_addr)
            .await
            .with_context(|| format!("Failed to bind {}", self.config.bind_addr))
    }
}

/// Serve `router` on `listener` until `shutdown` resolves, then drain in-flight requests.
pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    tracing::info!("HTTP server bound on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            shutdown.await;
            tracing::info!("HTTP server shutting down gracefully");
        })
        .await
        .map_err(|e| anyhow::anyhow!(e))
}
