// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! One-shot geolocation outcome.

use serde::{Deserialize, Serialize};

use crate::models::Coordinates;

/// The single result of asking the browser for the current position.
pub type PositionFix = Result<Coordinates, GeolocationError>;

/// Why no position could be obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum GeolocationError {
    #[error("permission denied")]
    PermissionDenied,

    #[error("position unavailable")]
    PositionUnavailable,

    #[error("timed out")]
    Timeout,

    #[error("geolocation not supported")]
    Unsupported,
}
