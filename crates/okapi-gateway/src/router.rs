//! Axum router wiring.
//!
//! Method calls live under `/okapi/services/`; anything unrouted gets the 404 view.

use axum::{routing::get, Router};

use crate::{app_state::AppState, ops, transport, views};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/okapi/services/*method",
            get(transport::http::okapi_get).post(transport::http::okapi_post),
        )
        .route("/healthz", get(ops::healthz))
        .route("/metrics", get(ops::metrics))
        .fallback(views::not_found::handler)
        .with_state(state)
}
