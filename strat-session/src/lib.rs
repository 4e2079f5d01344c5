//! strat-session: per-map undo/redo history plus the drawing session
//! controller for StratBoard.
//!
//! Design rules:
//! - Commits are full snapshots, never deltas: undo/redo is an O(1) move
//!   to an already-materialized, already-valid state.
//! - Every map has an independent timeline; operations on one map never
//!   touch another map's snapshots.
//! - Committing while redo states exist drops them (standard "new edit
//!   clears redo" rule).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strat_core::{CanvasItem, CanvasState, MapId};
use tracing::{debug, trace};

/// One map's timeline: undo stack and redo stack, most recent last.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct MapHistory {
    past: Vec<CanvasState>,
    future: Vec<CanvasState>,
}

/// Per-map snapshot history.
///
/// Owns every timeline exclusively. A timeline is created lazily on the
/// first commit to its map and lives for the rest of the session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryStore {
    maps: HashMap<MapId, MapHistory>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `state` as the new current snapshot for `map` and drop the
    /// map's redo states. Always succeeds; this is the single path by
    /// which any edit enters history.
    pub fn commit(&mut self, map: &MapId, state: CanvasState) {
        let history = self.maps.entry(map.clone()).or_default();
        history.future.clear();
        history.past.push(state);
        debug!(map = %map, depth = history.past.len(), "committed snapshot");
    }

    /// Step the map back one snapshot. No-op when there is nothing to
    /// undo; returns whether anything changed.
    pub fn undo(&mut self, map: &MapId) -> bool {
        let Some(history) = self.maps.get_mut(map) else {
            trace!(map = %map, "undo on untouched map ignored");
            return false;
        };
        match history.past.pop() {
            Some(state) => {
                history.future.push(state);
                debug!(map = %map, depth = history.past.len(), "snapshot undone");
                true
            }
            None => {
                trace!(map = %map, "undo with empty past ignored");
                false
            }
        }
    }

    /// Step the map forward one snapshot. No-op when there is nothing to
    /// redo; returns whether anything changed.
    pub fn redo(&mut self, map: &MapId) -> bool {
        let Some(history) = self.maps.get_mut(map) else {
            trace!(map = %map, "redo on untouched map ignored");
            return false;
        };
        match history.future.pop() {
            Some(state) => {
                history.past.push(state);
                debug!(map = %map, depth = history.past.len(), "snapshot redone");
                true
            }
            None => {
                trace!(map = %map, "redo with empty future ignored");
                false
            }
        }
    }

    /// Record an empty snapshot. A normal commit, so it is undoable.
    pub fn clear(&mut self, map: &MapId) {
        self.commit(map, CanvasState::default());
    }

    /// Items of the current snapshot for `map`; empty when the map has no
    /// commits. Pure read: never creates a timeline.
    pub fn current_items(&self, map: &MapId) -> &[CanvasItem] {
        self.maps
            .get(map)
            .and_then(|history| history.past.last())
            .map(CanvasState::items)
            .unwrap_or(&[])
    }

    /// Owned copy of the current snapshot, the base for deriving the next
    /// commit.
    pub fn current_state(&self, map: &MapId) -> CanvasState {
        self.maps
            .get(map)
            .and_then(|history| history.past.last())
            .cloned()
            .unwrap_or_default()
    }

    pub fn can_undo(&self, map: &MapId) -> bool {
        self.undo_depth(map) > 0
    }

    pub fn can_redo(&self, map: &MapId) -> bool {
        self.redo_depth(map) > 0
    }

    /// Number of snapshots the map can step back through.
    pub fn undo_depth(&self, map: &MapId) -> usize {
        self.maps.get(map).map_or(0, |history| history.past.len())
    }

    /// Number of snapshots available to redo.
    pub fn redo_depth(&self, map: &MapId) -> usize {
        self.maps.get(map).map_or(0, |history| history.future.len())
    }
}

pub mod session;

pub use session::DrawingSession;
