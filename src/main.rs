// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout-Map API Server
//!
//! Hosts the workout tracker for the browser map widget: the front-end
//! forwards geolocation, map clicks and form submissions here and applies
//! the render commands that come back.

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use workout_map::{
    config::Config,
    services::{RenderQueue, TrackerSettings, WorkoutTracker},
    storage::{FileStore, WorkoutRepository},
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Workout-Map API");

    // Storage: one JSON file per key
    let store = FileStore::new(&config.storage_dir);
    tracing::info!(
        dir = %store.dir().display(),
        key = %config.storage_key,
        "Using file storage"
    );
    let repository = WorkoutRepository::new(Box::new(store), config.storage_key.clone());

    // The render queue is both the map and the list collaborator
    let render_queue = RenderQueue::new();
    let mut tracker = WorkoutTracker::new(
        TrackerSettings::from(&config),
        repository,
        Box::new(render_queue.clone()),
        Box::new(render_queue.clone()),
    );
    tracker.load_persisted();

    // Entries rendered during start-up are re-sent via GET /api/workouts
    render_queue.drain();

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        tracker: Mutex::new(tracker),
        render_queue,
    });

    // Build router
    let app = workout_map::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("workout_map=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
