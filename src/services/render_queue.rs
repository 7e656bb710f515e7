// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Map and list collaborator that records render commands.
//!
//! The HTTP host drains the queue after each tracker operation and returns
//! the commands to the browser, which applies them to Leaflet and the DOM.

use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::{Coordinates, MarkerPopup, Recenter, WorkoutEntry};
use crate::services::list::WorkoutList;
use crate::services::map::MapView;

/// One instruction for the front-end.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum RenderCommand {
    InitializeMap { center: [f64; 2], zoom: u8 },
    PlaceMarker(MarkerPopup),
    Recenter(Recenter),
    RenderEntry(WorkoutEntry),
    ClearList,
}

/// Shared command buffer. Clones append to the same queue.
#[derive(Debug, Clone, Default)]
pub struct RenderQueue {
    commands: Arc<Mutex<Vec<RenderCommand>>>,
}

impl RenderQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<RenderCommand>> {
        // A panic while holding the lock cannot leave the Vec half-written.
        self.commands.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn push(&self, command: RenderCommand) {
        self.lock().push(command);
    }

    /// Take all pending commands in order.
    pub fn drain(&self) -> Vec<RenderCommand> {
        std::mem::take(&mut *self.lock())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl MapView for RenderQueue {
    fn initialize(&mut self, center: Coordinates, zoom: u8) {
        self.push(RenderCommand::InitializeMap {
            center: center.as_array(),
            zoom,
        });
    }

    fn place_marker(&mut self, marker: &MarkerPopup) {
        self.push(RenderCommand::PlaceMarker(marker.clone()));
    }

    fn recenter(&mut self, request: &Recenter) {
        self.push(RenderCommand::Recenter(request.clone()));
    }
}

impl WorkoutList for RenderQueue {
    fn render_entry(&mut self, entry: &WorkoutEntry) {
        self.push(RenderCommand::RenderEntry(entry.clone()));
    }

    fn clear(&mut self) {
        self.push(RenderCommand::ClearList);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_queue_and_drain_in_order() {
        let queue = RenderQueue::new();
        let mut map = queue.clone();
        let mut list = queue.clone();

        map.initialize(Coordinates::new(1.0, 2.0), 15);
        list.clear();

        assert_eq!(queue.len(), 2);
        let drained = queue.drain();
        assert_eq!(
            drained,
            vec![
                RenderCommand::InitializeMap {
                    center: [1.0, 2.0],
                    zoom: 15
                },
                RenderCommand::ClearList,
            ]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_command_wire_format() {
        let command = RenderCommand::InitializeMap {
            center: [40.0, -75.0],
            zoom: 15,
        };
        let json = serde_json::to_value(&command).unwrap();
        assert_eq!(json["type"], "initialize_map");
        assert_eq!(json["zoom"], 15);

        let recenter = RenderCommand::Recenter(Recenter::new(Coordinates::new(1.0, 2.0), 13, 1.0));
        let json = serde_json::to_value(&recenter).unwrap();
        assert_eq!(json["type"], "recenter");
        assert_eq!(json["animate"], true);
    }
}
