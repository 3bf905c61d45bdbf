//! HTTP host: router assembly, middleware stack and serving.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, HeaderValue, Request, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use calculator::CalculatorModule;
use calculator_bootstrap::ServerConfig;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::field::Empty;

use crate::web;

/// Header carrying the per-request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Generates a UUID v4 request id for requests that do not carry one.
#[derive(Clone, Copy, Default)]
struct MakeReqId;

impl MakeRequestId for MakeReqId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&uuid::Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Builds the full application router: health probes, optional docs, the
/// calculator routes and the middleware stack.
#[must_use]
pub fn build_router(cfg: &ServerConfig, module: &CalculatorModule) -> Router {
    let mut router = Router::new()
        .route("/health", get(web::health_check))
        .route("/healthz", get(|| async { "ok" }));

    if cfg.enable_docs {
        router = add_openapi_routes(router);
    }

    router = module.register_rest(router);
    apply_middleware_stack(router, cfg)
}

fn add_openapi_routes(router: Router) -> Router {
    let doc = Arc::new(CalculatorModule::openapi());

    router
        .route(
            "/openapi.json",
            get(move || async move {
                ([(header::CACHE_CONTROL, "no-store")], Json(doc.as_ref())).into_response()
            }),
        )
        .route("/docs", get(web::serve_docs))
}

/// Applies middleware in reverse order of execution. At runtime requests flow
/// `SetRequestId` → `PropagateRequestId` → Trace → Timeout → `BodyLimit` → CORS → Router.
fn apply_middleware_stack(mut router: Router, cfg: &ServerConfig) -> Router {
    // 6) CORS
    if cfg.cors_enabled {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    // 5) Body limit
    router = router.layer(RequestBodyLimitLayer::new(cfg.body_limit_bytes));
    router = router.layer(DefaultBodyLimit::max(cfg.body_limit_bytes));

    // 4) Timeout
    router = router.layer(TimeoutLayer::with_status_code(
        StatusCode::GATEWAY_TIMEOUT,
        cfg.request_timeout,
    ));

    // 3) Trace
    router = apply_trace_layer(router);

    // 2) PropagateRequestId
    let x_request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    router = router.layer(PropagateRequestIdLayer::new(x_request_id.clone()));

    // 1) SetRequestId (registered last, runs first)
    router.layer(SetRequestIdLayer::new(x_request_id, MakeReqId))
}

fn apply_trace_layer(router: Router) -> Router {
    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(|req: &Request<axum::body::Body>| {
                let rid = req
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("n/a");

                tracing::info_span!(
                    "http_request",
                    method = %req.method(),
                    uri = %req.uri().path(),
                    version = ?req.version(),
                    request_id = %rid,
                    status = Empty,
                    latency_ms = Empty
                )
            })
            .on_response(
                |res: &axum::http::Response<axum::body::Body>,
                 latency: std::time::Duration,
                 span: &tracing::Span| {
                    span.record("status", res.status().as_u16());
                    span.record("latency_ms", latency.as_millis());
                    tracing::debug!("request finished");
                },
            ),
    )
}

/// Binds the listener and serves `router` until `cancel` fires.
///
/// # Errors
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(cfg: &ServerConfig, router: Router, cancel: CancellationToken) -> Result<()> {
    let listener = tokio::net::TcpListener::bind((cfg.host.as_str(), cfg.port))
        .await
        .with_context(|| {
            format!(
                "failed to bind HTTP listener address {}:{}",
                cfg.host, cfg.port
            )
        })?;
    let addr = listener.local_addr()?;
    tracing::info!(%addr, "HTTP server bound");

    let shutdown = async move {
        cancel.cancelled().await;
        tracing::info!("HTTP server shutting down gracefully (cancellation)");
    };

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server failed")
}
