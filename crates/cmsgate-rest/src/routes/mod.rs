mod node;
mod ont;
mod xdsl;

use axum::routing::{delete, get, patch};
use axum::{Json, Router};
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(ping))
        // ── ONT ─────────────────────────────────────────────────────
        .route("/v1/cms/ont/:node/:ont", get(ont::general))
        .route("/v1/cms/ont/:node/:ont/status", get(ont::status))
        .route("/v1/cms/ont/:node/:ont/performance", get(ont::performance))
        .route(
            "/v1/cms/ont/:node/:ont/errors",
            get(ont::errors).delete(ont::clear_errors),
        )
        .route("/v1/cms/ont/:node/:ont/port/:port", get(ont::port))
        .route(
            "/v1/cms/ont/:node/:ont/port/:port/service",
            get(ont::port_service),
        )
        .route(
            "/v1/cms/ont/:node/:ont/port/:port/voice",
            get(ont::voice_service),
        )
        .route("/v1/cms/ont/:node/:ont/reset", patch(ont::reset))
        .route("/v1/cms/ont/:node/:ont/quarantine", patch(ont::quarantine))
        .route("/v1/cms/ont/:node/:ont/release", patch(ont::release))
        .route("/v1/cms/ont/:node/:ont/enable", patch(ont::enable))
        .route("/v1/cms/ont/:node/:ont/disable", patch(ont::disable))
        .route(
            "/v1/cms/ont/:node/:ont/port/:port/enable",
            patch(ont::enable_port),
        )
        .route(
            "/v1/cms/ont/:node/:ont/port/:port/disable",
            patch(ont::disable_port),
        )
        .route(
            "/v1/cms/gpon/:node/:shelf/:card/:gpon/ont",
            get(ont::list_on_gpon),
        )
        // ── xDSL ────────────────────────────────────────────────────
        .route("/v1/cms/xdsl/:node/:shelf/:card/:intf", get(xdsl::overview))
        .route(
            "/v1/cms/xdsl/:node/:shelf/:card/:intf/status",
            get(xdsl::status),
        )
        .route(
            "/v1/cms/xdsl/:node/:shelf/:card/:intf/performance",
            get(xdsl::performance),
        )
        .route(
            "/v1/cms/xdsl/:node/:shelf/:card/:intf/line_test",
            get(xdsl::line_test),
        )
        .route(
            "/v1/cms/xdsl/:node/:shelf/:card/:intf/enable",
            patch(xdsl::enable),
        )
        .route(
            "/v1/cms/xdsl/:node/:shelf/:card/:intf/disable",
            patch(xdsl::disable),
        )
        .route(
            "/v1/cms/xdsl/:node/:shelf/:card/:intf/bonding/enable",
            patch(xdsl::enable_bonding),
        )
        .route(
            "/v1/cms/xdsl/:node/:shelf/:card/:intf/bonding/disable",
            patch(xdsl::disable_bonding),
        )
        // ── Node ────────────────────────────────────────────────────
        .route("/v1/cms/node/:node/alarms", get(node::alarms))
        .route("/v1/cms/node/:node/leases", get(node::leases))
        .route("/v1/cms/node/:node/lease/:mac", delete(node::clear_lease))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness probe.
async fn ping() -> Json<Value> {
    Json(json!({ "ping": "pong!" }))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use secrecy::SecretString;
    use tower::ServiceExt;

    use cmsgate_api::CmsClient;

    use super::{AppState, Router, router};

    // TEST-NET-1 address; validation-only tests never send a request.
    fn app() -> Router {
        let cms = CmsClient::new(
            "192.0.2.1",
            "ops",
            SecretString::from("secret".to_owned()),
            Duration::from_secs(1),
        )
        .unwrap();
        router(AppState { cms: Arc::new(cms) })
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn ping_pongs() {
        let response = app()
            .oneshot(Request::get("/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, serde_json::json!({"ping": "pong!"}));
    }

    #[tokio::test]
    async fn oversized_count_is_rejected_up_front() {
        let response = app()
            .oneshot(
                Request::get("/v1/cms/ont/rsvt-pon-1/1/errors?interval=1-day&count=9")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["success"], serde_json::json!(false));
        assert!(body["info"].as_str().unwrap().contains("count"));
    }

    #[tokio::test]
    async fn unknown_interval_is_rejected() {
        let response = app()
            .oneshot(
                Request::get("/v1/cms/ont/rsvt-pon-1/1/errors?interval=1-week")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["success"], serde_json::json!(false));
        assert!(body["info"].as_str().unwrap().contains("interval"));
    }
}
