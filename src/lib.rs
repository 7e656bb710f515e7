// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Workout-Map: log runs and rides by clicking on a map
//!
//! This crate provides the workout model, its persistence, and the
//! controller that drives the map and list widgets, plus a small JSON API
//! the browser front-end talks to.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod storage;
pub mod time_utils;

use config::Config;
use services::{RenderQueue, WorkoutTracker};
use tokio::sync::Mutex;

/// Shared application state.
///
/// The tracker is behind a mutex so that browser events are handled one at
/// a time, each running to completion.
pub struct AppState {
    pub config: Config,
    pub tracker: Mutex<WorkoutTracker>,
    /// Same queue the tracker renders into; drained into each response.
    pub render_queue: RenderQueue,
}
