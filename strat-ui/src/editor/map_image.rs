//! Map image loading and texture caching.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context as _;
use strat_core::MapDescriptor;
use tracing::warn;

/// Per-map board textures, loaded lazily. A map whose image cannot be
/// read is cached as absent so the failure is logged once, not per frame.
#[derive(Default)]
pub struct MapTextures {
    textures: HashMap<&'static str, Option<egui::TextureHandle>>,
}

impl MapTextures {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texture for `map`, loading it on first use.
    pub fn get(
        &mut self,
        ctx: &egui::Context,
        map: &MapDescriptor,
    ) -> Option<&egui::TextureHandle> {
        if !self.textures.contains_key(map.id) {
            let loaded = match load_texture(ctx, map) {
                Ok(texture) => Some(texture),
                Err(err) => {
                    warn!(map = map.id, error = %format!("{err:#}"), "map image unavailable");
                    None
                }
            };
            self.textures.insert(map.id, loaded);
        }
        self.textures.get(map.id).and_then(|texture| texture.as_ref())
    }
}

fn load_texture(ctx: &egui::Context, map: &MapDescriptor) -> anyhow::Result<egui::TextureHandle> {
    let rgba = load_rgba(map.image_path)?;
    let size = [rgba.width() as usize, rgba.height() as usize];
    let pixels = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
    Ok(ctx.load_texture(map.id, pixels, egui::TextureOptions::LINEAR))
}

/// Decode a board image from disk. Shared with the PNG export path.
pub fn load_rgba(path: impl AsRef<Path>) -> anyhow::Result<image::RgbaImage> {
    let path = path.as_ref();
    let decoded =
        image::open(path).with_context(|| format!("read map image: {}", path.display()))?;
    Ok(decoded.to_rgba8())
}
