//! strat-core: data model for the StratBoard tactical drawing tool.
//!
//! Design rules:
//! - All stored positions live in the fixed logical board square
//!   ([`BOARD_SIZE`]); screen/pixel mapping happens at the UI boundary.
//! - [`CanvasState`] is a value type: every edit builds a new state, the
//!   two construction primitives on it are the only way to do so.
//! - [`CanvasItem`] is a closed sum; rendering and transforms match it
//!   exhaustively.
//! - All model structs are serializable.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Side length of the logical board square. Stored coordinates are
/// expressed in this space, independent of on-screen pixel size.
pub const BOARD_SIZE: f32 = 800.0;

/// Pencil stroke color (amber).
pub const PENCIL_COLOR: Rgba8 = Rgba8::rgb(0xfb, 0xbf, 0x24);

/// Pencil stroke width, in logical units.
pub const PENCIL_WIDTH: f32 = 2.0;

/// Board background behind the map image.
pub const BOARD_BACKGROUND: Rgba8 = Rgba8::rgb(0x18, 0x18, 0x1b);

/// Marker disc radius, in logical units.
pub const MARKER_RADIUS: f32 = 12.0;

/// Width of the black ring around a marker disc, in logical units.
pub const MARKER_RING_WIDTH: f32 = 2.0;

/// Unique identifier for a committed canvas item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Mint a fresh identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Opaque key identifying one map's independent history timeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MapId(String);

impl MapId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MapId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl std::fmt::Display for MapId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A position in the logical board space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    /// Opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }
}

/// Utility marker kinds. Closed set: adding a kind is a compile-time
/// decision point everywhere markers are rendered or transformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    Smoke,
    Flash,
    Molotov,
    He,
}

impl MarkerKind {
    /// All marker kinds, in toolbar order.
    pub const ALL: [MarkerKind; 4] = [
        MarkerKind::Smoke,
        MarkerKind::Flash,
        MarkerKind::Molotov,
        MarkerKind::He,
    ];

    /// Fill color of the marker disc.
    pub fn color(&self) -> Rgba8 {
        match self {
            MarkerKind::Smoke => Rgba8::rgb(0x9c, 0xa3, 0xaf),
            MarkerKind::Flash => Rgba8::rgb(0xfa, 0xcc, 0x15),
            MarkerKind::Molotov => Rgba8::rgb(0xef, 0x44, 0x44),
            MarkerKind::He => Rgba8::rgb(0x10, 0xb9, 0x81),
        }
    }

    /// Single-letter label drawn on the disc.
    pub fn label(&self) -> &'static str {
        match self {
            MarkerKind::Smoke => "S",
            MarkerKind::Flash => "F",
            MarkerKind::Molotov => "M",
            MarkerKind::He => "H",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MarkerKind::Smoke => "Smoke",
            MarkerKind::Flash => "Flash",
            MarkerKind::Molotov => "Molotov",
            MarkerKind::He => "HE",
        }
    }
}

/// The active editor tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    /// Select and drag existing markers.
    Cursor,
    /// Freehand stroke drawing.
    Pencil,
    /// Place a utility marker of the given kind.
    Marker(MarkerKind),
}

impl Tool {
    /// All tools, in toolbar order.
    pub const ALL: [Tool; 6] = [
        Tool::Cursor,
        Tool::Pencil,
        Tool::Marker(MarkerKind::Smoke),
        Tool::Marker(MarkerKind::Flash),
        Tool::Marker(MarkerKind::Molotov),
        Tool::Marker(MarkerKind::He),
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Tool::Cursor => "Move",
            Tool::Pencil => "Draw",
            Tool::Marker(kind) => kind.display_name(),
        }
    }
}

/// A committed freehand line: ordered points plus styling. Immutable once
/// committed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub id: ItemId,
    pub points: Vec<Point>,
    pub color: Rgba8,
    pub width: f32,
}

impl Stroke {
    /// Start a new stroke at `origin` with the default pencil styling and
    /// a fresh identifier.
    pub fn pencil(origin: Point) -> Self {
        Self {
            id: ItemId::new(),
            points: vec![origin],
            color: PENCIL_COLOR,
            width: PENCIL_WIDTH,
        }
    }

    /// Append the next sampled pointer position.
    pub fn push_point(&mut self, point: Point) {
        self.points.push(point);
    }
}

/// A committed utility marker at a board position. Mutable only via full
/// replacement through [`CanvasState::with_marker_moved`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub id: ItemId,
    pub kind: MarkerKind,
    pub pos: Point,
}

impl Marker {
    /// New marker with a fresh identifier.
    pub fn new(kind: MarkerKind, pos: Point) -> Self {
        Self {
            id: ItemId::new(),
            kind,
            pos,
        }
    }
}

/// One drawable item on the board. Insertion order is paint order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanvasItem {
    Stroke(Stroke),
    Marker(Marker),
}

impl CanvasItem {
    pub fn id(&self) -> ItemId {
        match self {
            CanvasItem::Stroke(stroke) => stroke.id,
            CanvasItem::Marker(marker) => marker.id,
        }
    }
}

/// A full board snapshot: the ordered items visible on one map.
///
/// Value type: the construction primitives below never mutate in place,
/// they build the next snapshot for the history store to record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanvasState {
    items: Vec<CanvasItem>,
}

impl CanvasState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CanvasItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Next snapshot with `item` appended at the top of the paint order.
    pub fn with_item(&self, item: CanvasItem) -> CanvasState {
        let mut items = self.items.clone();
        items.push(item);
        CanvasState { items }
    }

    /// Next snapshot with the position of marker `id` replaced. Every
    /// other item keeps its value and place in the sequence.
    pub fn with_marker_moved(&self, id: ItemId, pos: Point) -> Result<CanvasState, StateError> {
        let mut items = self.items.clone();
        let marker = items.iter_mut().find_map(|item| match item {
            CanvasItem::Marker(marker) if marker.id == id => Some(marker),
            _ => None,
        });
        match marker {
            Some(marker) => {
                marker.pos = pos;
                Ok(CanvasState { items })
            }
            None => Err(StateError::UnknownMarker { id }),
        }
    }

    /// Look up a marker by id (hit-testing support for the UI layer).
    pub fn marker(&self, id: ItemId) -> Option<&Marker> {
        self.items.iter().find_map(|item| match item {
            CanvasItem::Marker(marker) if marker.id == id => Some(marker),
            _ => None,
        })
    }
}

impl From<Vec<CanvasItem>> for CanvasState {
    fn from(items: Vec<CanvasItem>) -> Self {
        Self { items }
    }
}

/// Board-state errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("no marker with id {id} on the board")]
    UnknownMarker { id: ItemId },
}

pub mod maps;

pub use maps::{MapDescriptor, DEFAULT_MAPS};
