//! Fixed map catalog.
//!
//! The editor treats this list as read-only; only `id` is used to key
//! history timelines.

use crate::MapId;

/// One selectable map: identifier, display name, board image reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    pub image_path: &'static str,
}

impl MapDescriptor {
    pub fn map_id(&self) -> MapId {
        MapId::new(self.id)
    }
}

/// The playable map pool, in sidebar order.
pub const DEFAULT_MAPS: [MapDescriptor; 4] = [
    MapDescriptor {
        id: "dust2",
        name: "Dust II",
        image_path: "maps/dust2.png",
    },
    MapDescriptor {
        id: "mirage",
        name: "Mirage",
        image_path: "maps/mirage.png",
    },
    MapDescriptor {
        id: "inferno",
        name: "Inferno",
        image_path: "maps/inferno.png",
    },
    MapDescriptor {
        id: "nuke",
        name: "Nuke",
        image_path: "maps/nuke.png",
    },
];
