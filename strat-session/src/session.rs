//! Drawing session controller: turns pointer input into committed board
//! edits.
//!
//! A continuous pencil gesture becomes exactly one commit on pointer-up;
//! marker placement and relocation are single-event commits. The
//! in-progress stroke is controller-local state and is never part of a
//! committed snapshot.

use strat_core::{CanvasItem, ItemId, MapId, Marker, Point, Stroke, Tool};
use tracing::{debug, trace};

use crate::HistoryStore;

/// Pointer-driven editing session over the history store.
///
/// Holds the store as an explicit owned object; the UI layer feeds it
/// logical-space pointer events and reads back the current snapshot plus
/// the in-progress stroke for local rendering.
#[derive(Debug)]
pub struct DrawingSession {
    store: HistoryStore,
    active_map: MapId,
    active_tool: Tool,
    in_progress: Option<Stroke>,
}

impl DrawingSession {
    pub fn new(initial_map: MapId) -> Self {
        Self {
            store: HistoryStore::new(),
            active_map: initial_map,
            active_tool: Tool::Cursor,
            in_progress: None,
        }
    }

    pub fn store(&self) -> &HistoryStore {
        &self.store
    }

    pub fn active_map(&self) -> &MapId {
        &self.active_map
    }

    pub fn active_tool(&self) -> Tool {
        self.active_tool
    }

    /// The stroke currently being drawn, if any.
    pub fn in_progress_stroke(&self) -> Option<&Stroke> {
        self.in_progress.as_ref()
    }

    /// Items of the active map's current snapshot.
    pub fn current_items(&self) -> &[CanvasItem] {
        self.store.current_items(&self.active_map)
    }

    /// Switch the active map. A stroke in progress is discarded without
    /// committing; other maps' timelines are untouched.
    pub fn select_map(&mut self, map: MapId) {
        if map == self.active_map {
            return;
        }
        self.abandon_stroke("map switch");
        trace!(from = %self.active_map, to = %map, "active map changed");
        self.active_map = map;
    }

    /// Switch the active tool, discarding any stroke in progress.
    pub fn select_tool(&mut self, tool: Tool) {
        if tool == self.active_tool {
            return;
        }
        self.abandon_stroke("tool switch");
        self.active_tool = tool;
    }

    /// Pointer pressed at `pos` (logical space).
    ///
    /// Pencil starts a gesture; marker tools commit a placement
    /// immediately; the cursor tool places nothing (marker dragging is
    /// reported separately via [`DrawingSession::move_marker`]).
    pub fn pointer_down(&mut self, pos: Point) {
        match self.active_tool {
            Tool::Pencil => {
                let stroke = Stroke::pencil(pos);
                trace!(map = %self.active_map, id = %stroke.id, "stroke started");
                self.in_progress = Some(stroke);
            }
            Tool::Marker(kind) => {
                let marker = Marker::new(kind, pos);
                debug!(map = %self.active_map, id = %marker.id, kind = ?kind, "marker placed");
                let next = self
                    .store
                    .current_state(&self.active_map)
                    .with_item(CanvasItem::Marker(marker));
                self.store.commit(&self.active_map, next);
            }
            Tool::Cursor => {}
        }
    }

    /// Pointer moved to `pos` while pressed. Extends the in-progress
    /// stroke; ignored outside a pencil gesture.
    pub fn pointer_move(&mut self, pos: Point) {
        if let Some(stroke) = self.in_progress.as_mut() {
            stroke.push_point(pos);
        }
    }

    /// Pointer released, or the gesture was cancelled by the platform.
    /// Commits the in-progress stroke; a release with no gesture active is
    /// a no-op.
    pub fn pointer_up(&mut self) {
        let Some(stroke) = self.in_progress.take() else {
            return;
        };
        debug!(
            map = %self.active_map,
            id = %stroke.id,
            points = stroke.points.len(),
            "stroke committed"
        );
        let next = self
            .store
            .current_state(&self.active_map)
            .with_item(CanvasItem::Stroke(stroke));
        self.store.commit(&self.active_map, next);
    }

    /// Drag-end on marker `id`: commit the snapshot with exactly that
    /// marker's position replaced. An unknown id is ignored, not an error.
    pub fn move_marker(&mut self, id: ItemId, pos: Point) {
        match self
            .store
            .current_state(&self.active_map)
            .with_marker_moved(id, pos)
        {
            Ok(next) => {
                debug!(map = %self.active_map, id = %id, "marker moved");
                self.store.commit(&self.active_map, next);
            }
            Err(err) => debug!(map = %self.active_map, %err, "marker move ignored"),
        }
    }

    /// Undo on the active map. An in-progress stroke is left alone: it is
    /// not yet part of history and commits on its own pointer-up.
    pub fn undo(&mut self) -> bool {
        self.store.undo(&self.active_map)
    }

    /// Redo on the active map.
    pub fn redo(&mut self) -> bool {
        self.store.redo(&self.active_map)
    }

    /// Commit an empty snapshot for the active map. Undoable like any
    /// other commit; confirmation is the caller's concern.
    pub fn clear(&mut self) {
        self.store.clear(&self.active_map);
    }

    pub fn can_undo(&self) -> bool {
        self.store.can_undo(&self.active_map)
    }

    pub fn can_redo(&self) -> bool {
        self.store.can_redo(&self.active_map)
    }

    fn abandon_stroke(&mut self, cause: &str) {
        if let Some(stroke) = self.in_progress.take() {
            trace!(map = %self.active_map, id = %stroke.id, cause, "in-progress stroke discarded");
        }
    }
}
