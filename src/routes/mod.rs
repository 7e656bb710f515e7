// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP route handlers.

pub mod api;
pub mod map;

use crate::error::Result;
use crate::middleware::add_security_headers;
use crate::services::{RenderCommand, WorkoutTracker};
use crate::AppState;
use axum::http::{header, request::Parts, HeaderValue, Method};
use axum::{routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct HealthResponse {
    pub status: String,
    pub build_id: String,
}

/// Health check response
async fn health_check() -> Json<HealthResponse> {
    let build_id = option_env!("BUILD_ID").unwrap_or("unknown").to_string();
    Json(HealthResponse {
        status: "ok".to_string(),
        build_id,
    })
}

/// Response envelope: operation result plus the render commands it produced.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub commands: Vec<RenderCommand>,
}

/// Run one tracker operation to completion and collect its render commands.
///
/// The queue is drained even when the operation fails so that stale
/// commands never leak into a later response.
pub(crate) async fn with_tracker<T, F>(state: &AppState, op: F) -> Result<Json<ApiResponse<T>>>
where
    F: FnOnce(&mut WorkoutTracker) -> Result<T>,
{
    let mut tracker = state.tracker.lock().await;
    let result = op(&mut tracker);
    let commands = state.render_queue.drain();
    drop(tracker);

    let data = result?;
    Ok(Json(ApiResponse { data, commands }))
}

/// Allow the configured front-end plus local development origins.
fn cors_layer(frontend_url: String) -> CorsLayer {
    let is_allowed = move |origin: &HeaderValue, _: &Parts| match origin.to_str() {
        Ok(origin) => {
            origin == frontend_url
                || origin.starts_with("http://localhost")
                || origin.starts_with("http://127.0.0.1")
        }
        Err(_) => false,
    };

    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(is_allowed))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(map::routes())
        .merge(api::routes())
        .layer(axum::middleware::from_fn(add_security_headers))
        .layer(cors_layer(state.config.frontend_url.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
