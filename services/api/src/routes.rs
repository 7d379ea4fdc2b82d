use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use yuvasetu::workflows::matching::{
    matching_router, AllocationRepository, MatchService, PostingRepository,
};

pub(crate) fn with_matching_routes<P, A>(service: Arc<MatchService<P, A>>) -> axum::Router
where
    P: PostingRepository + 'static,
    A: AllocationRepository + 'static,
{
    matching_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/api/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{InMemoryAllocationRepository, InMemoryPostingRepository};
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tower::ServiceExt;
    use yuvasetu::config::MatchingConfig;
    use yuvasetu::workflows::matching::MatchEngine;

    fn app(ready: bool) -> axum::Router {
        let service = Arc::new(MatchService::new(
            Arc::new(InMemoryPostingRepository::default()),
            Arc::new(InMemoryAllocationRepository::default()),
            MatchEngine::default(),
            MatchingConfig::default(),
        ));
        let readiness = Arc::new(AtomicBool::new(false));
        readiness.store(ready, Ordering::Release);
        let state = AppState {
            readiness,
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        with_matching_routes(service).layer(Extension(state))
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn health_is_served_under_api_prefix_too() {
        for path in ["/health", "/api/health"] {
            let response = app(false)
                .oneshot(Request::get(path).body(Body::empty()).expect("request"))
                .await
                .expect("route executes");
            assert_eq!(response.status(), StatusCode::OK, "{path}");
        }
    }

    #[tokio::test]
    async fn readiness_tracks_flag() {
        let response = app(false)
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request"))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = app(true)
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request"))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn match_route_is_mounted_alongside_health_routes() {
        let response = app(true)
            .oneshot(
                Request::post("/api/match")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"studentProfile":{"skills":["React"]}}"#))
                    .expect("request"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), 4096)
            .await
            .expect("read body");
        let payload: serde_json::Value = serde_json::from_slice(&body).expect("json payload");
        assert_eq!(payload, json!({ "matches": [] }));
    }
}
