//! strat-export: raster export boundary for StratBoard.
//!
//! Renders a committed board snapshot (map image plus items, in stored
//! paint order) into an RGBA raster and writes PNG files. Only committed
//! items are drawn; an in-progress stroke never reaches an export.

use std::path::Path;

use anyhow::Context;
use image::{imageops, Rgba, RgbaImage};
use strat_core::{
    CanvasItem, Marker, Rgba8, Stroke, BOARD_BACKGROUND, BOARD_SIZE, MARKER_RADIUS,
    MARKER_RING_WIDTH,
};
use thiserror::Error;
use tracing::debug;

/// Marker ring color.
const RING_COLOR: Rgba8 = Rgba8::rgb(0x00, 0x00, 0x00);

/// Renders board snapshots at a fixed output resolution.
#[derive(Debug, Clone)]
pub struct BoardRenderer {
    pixel_ratio: u32,
    background: Rgba8,
}

impl Default for BoardRenderer {
    fn default() -> Self {
        Self {
            // 2x the logical board, matching the on-screen export.
            pixel_ratio: 2,
            background: BOARD_BACKGROUND,
        }
    }
}

impl BoardRenderer {
    pub fn new(pixel_ratio: u32) -> Result<Self, RenderError> {
        if pixel_ratio == 0 {
            return Err(RenderError::InvalidPixelRatio);
        }
        Ok(Self {
            pixel_ratio,
            background: BOARD_BACKGROUND,
        })
    }

    /// Output side length in pixels.
    pub fn output_size(&self) -> u32 {
        BOARD_SIZE as u32 * self.pixel_ratio
    }

    /// Render `items` over `map_image` in stored sequence order.
    pub fn render(&self, items: &[CanvasItem], map_image: Option<&RgbaImage>) -> RgbaImage {
        let size = self.output_size();
        let mut canvas = RgbaImage::from_pixel(size, size, to_pixel(self.background));

        if let Some(map) = map_image {
            self.blit_map(&mut canvas, map);
        }

        for item in items {
            match item {
                CanvasItem::Stroke(stroke) => self.draw_stroke(&mut canvas, stroke),
                CanvasItem::Marker(marker) => self.draw_marker(&mut canvas, marker),
            }
        }

        debug!(items = items.len(), size, "board rendered");
        canvas
    }

    /// Fit the map image inside the board square and center it.
    fn blit_map(&self, canvas: &mut RgbaImage, map: &RgbaImage) {
        if map.width() == 0 || map.height() == 0 {
            return;
        }
        let size = self.output_size() as f32;
        let scale = (size / map.width() as f32).min(size / map.height() as f32);
        let width = ((map.width() as f32 * scale).round() as u32).max(1);
        let height = ((map.height() as f32 * scale).round() as u32).max(1);
        let scaled = imageops::resize(map, width, height, imageops::FilterType::Triangle);

        let x = ((size - width as f32) / 2.0) as i64;
        let y = ((size - height as f32) / 2.0) as i64;
        imageops::overlay(canvas, &scaled, x, y);
    }

    fn draw_stroke(&self, canvas: &mut RgbaImage, stroke: &Stroke) {
        let ratio = self.pixel_ratio as f32;
        let radius = (stroke.width * ratio / 2.0).max(1.0);
        let color = to_pixel(stroke.color);

        match stroke.points.as_slice() {
            [] => {}
            [only] => stamp_disc(canvas, only.x * ratio, only.y * ratio, radius, color),
            points => {
                for pair in points.windows(2) {
                    let (a, b) = (pair[0], pair[1]);
                    let (ax, ay) = (a.x * ratio, a.y * ratio);
                    let (bx, by) = (b.x * ratio, b.y * ratio);
                    let length = (bx - ax).hypot(by - ay);
                    let steps = ((length / radius.max(0.5)).ceil() as u32).max(1);
                    for i in 0..=steps {
                        let t = i as f32 / steps as f32;
                        let x = ax + (bx - ax) * t;
                        let y = ay + (by - ay) * t;
                        stamp_disc(canvas, x, y, radius, color);
                    }
                }
            }
        }
    }

    fn draw_marker(&self, canvas: &mut RgbaImage, marker: &Marker) {
        let ratio = self.pixel_ratio as f32;
        let cx = marker.pos.x * ratio;
        let cy = marker.pos.y * ratio;
        let radius = MARKER_RADIUS * ratio;
        let half_ring = MARKER_RING_WIDTH * ratio / 2.0;
        let fill = to_pixel(marker.kind.color());
        let ring = to_pixel(RING_COLOR);

        let reach = radius + half_ring;
        let (min_x, max_x) = pixel_span(cx, reach, canvas.width());
        let (min_y, max_y) = pixel_span(cy, reach, canvas.height());
        for py in min_y..max_y {
            for px in min_x..max_x {
                let d = (px as f32 - cx).hypot(py as f32 - cy);
                if d <= radius - half_ring {
                    canvas.put_pixel(px, py, fill);
                } else if d <= radius + half_ring {
                    canvas.put_pixel(px, py, ring);
                }
            }
        }
    }
}

/// Filled disc, clipped to the canvas.
fn stamp_disc(canvas: &mut RgbaImage, cx: f32, cy: f32, radius: f32, color: Rgba<u8>) {
    let (min_x, max_x) = pixel_span(cx, radius, canvas.width());
    let (min_y, max_y) = pixel_span(cy, radius, canvas.height());
    for py in min_y..max_y {
        for px in min_x..max_x {
            let d = (px as f32 - cx).hypot(py as f32 - cy);
            if d <= radius {
                canvas.put_pixel(px, py, color);
            }
        }
    }
}

/// Clamped pixel range covering `center ± reach`.
fn pixel_span(center: f32, reach: f32, limit: u32) -> (u32, u32) {
    let min = (center - reach).floor().max(0.0) as u32;
    let max = ((center + reach).ceil() as i64 + 1).clamp(0, limit as i64) as u32;
    (min.min(limit), max)
}

fn to_pixel(color: Rgba8) -> Rgba<u8> {
    Rgba([color.r, color.g, color.b, color.a])
}

/// File name for an exported board: `strat-<lowercased map name>.png`.
pub fn export_filename(map_name: &str) -> String {
    format!("strat-{}.png", map_name.to_lowercase())
}

/// Write `image` to `path` as PNG, creating parent directories.
pub fn export_png(path: impl AsRef<Path>, image: &RgbaImage) -> anyhow::Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create parent dir: {}", parent.display()))?;
    }

    image
        .save(path)
        .with_context(|| format!("write board image: {}", path.display()))?;
    debug!(path = %path.display(), "board exported");
    Ok(())
}

/// Renderer configuration errors.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("pixel ratio must be at least 1")]
    InvalidPixelRatio,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strat_core::{ItemId, MarkerKind, Point, PENCIL_COLOR};

    fn pixel(canvas: &RgbaImage, x: u32, y: u32) -> Rgba<u8> {
        *canvas.get_pixel(x, y)
    }

    #[test]
    fn test_default_renderer_doubles_the_board() {
        let renderer = BoardRenderer::default();
        assert_eq!(renderer.output_size(), 1600);
        let canvas = renderer.render(&[], None);
        assert_eq!(canvas.dimensions(), (1600, 1600));
    }

    #[test]
    fn test_zero_pixel_ratio_is_rejected() {
        assert!(matches!(
            BoardRenderer::new(0),
            Err(RenderError::InvalidPixelRatio)
        ));
    }

    #[test]
    fn test_empty_board_is_background_only() {
        let renderer = BoardRenderer::new(1).unwrap();
        let canvas = renderer.render(&[], None);
        assert_eq!(pixel(&canvas, 0, 0), to_pixel(BOARD_BACKGROUND));
        assert_eq!(pixel(&canvas, 799, 799), to_pixel(BOARD_BACKGROUND));
    }

    #[test]
    fn test_stroke_segment_is_painted() {
        let renderer = BoardRenderer::new(1).unwrap();
        let stroke = Stroke {
            id: ItemId::new(),
            points: vec![Point::new(100.0, 100.0), Point::new(200.0, 100.0)],
            color: PENCIL_COLOR,
            width: 2.0,
        };
        let canvas = renderer.render(&[CanvasItem::Stroke(stroke)], None);

        assert_eq!(pixel(&canvas, 150, 100), to_pixel(PENCIL_COLOR));
        assert_eq!(pixel(&canvas, 100, 100), to_pixel(PENCIL_COLOR));
        assert_eq!(pixel(&canvas, 200, 100), to_pixel(PENCIL_COLOR));
        // Well off the segment stays background.
        assert_eq!(pixel(&canvas, 150, 150), to_pixel(BOARD_BACKGROUND));
    }

    #[test]
    fn test_marker_disc_and_ring() {
        let renderer = BoardRenderer::new(1).unwrap();
        let marker = Marker::new(MarkerKind::Molotov, Point::new(400.0, 400.0));
        let canvas = renderer.render(&[CanvasItem::Marker(marker)], None);

        assert_eq!(pixel(&canvas, 400, 400), to_pixel(MarkerKind::Molotov.color()));
        // On the ring circle.
        assert_eq!(pixel(&canvas, 412, 400), to_pixel(RING_COLOR));
        // Outside the marker entirely.
        assert_eq!(pixel(&canvas, 420, 400), to_pixel(BOARD_BACKGROUND));
    }

    #[test]
    fn test_items_paint_in_sequence_order() {
        let renderer = BoardRenderer::new(1).unwrap();
        let stroke = Stroke {
            id: ItemId::new(),
            points: vec![Point::new(380.0, 400.0), Point::new(420.0, 400.0)],
            color: PENCIL_COLOR,
            width: 2.0,
        };
        let marker = Marker::new(MarkerKind::Smoke, Point::new(400.0, 400.0));
        let canvas = renderer.render(
            &[
                CanvasItem::Stroke(stroke),
                CanvasItem::Marker(marker),
            ],
            None,
        );

        // The later marker covers the stroke at its center.
        assert_eq!(pixel(&canvas, 400, 400), to_pixel(MarkerKind::Smoke.color()));
    }

    #[test]
    fn test_marker_near_the_edge_is_clipped_not_panicking() {
        let renderer = BoardRenderer::new(1).unwrap();
        let marker = Marker::new(MarkerKind::He, Point::new(2.0, 2.0));
        let canvas = renderer.render(&[CanvasItem::Marker(marker)], None);
        assert_eq!(pixel(&canvas, 2, 2), to_pixel(MarkerKind::He.color()));
    }

    #[test]
    fn test_map_image_is_centered_and_fitted() {
        let renderer = BoardRenderer::new(1).unwrap();
        // A wide white map: 400x200 scales to 800x400, centered vertically.
        let map = RgbaImage::from_pixel(400, 200, Rgba([0xff, 0xff, 0xff, 0xff]));
        let canvas = renderer.render(&[], Some(&map));

        assert_eq!(pixel(&canvas, 400, 400), Rgba([0xff, 0xff, 0xff, 0xff]));
        assert_eq!(pixel(&canvas, 400, 100), to_pixel(BOARD_BACKGROUND));
        assert_eq!(pixel(&canvas, 400, 700), to_pixel(BOARD_BACKGROUND));
    }

    #[test]
    fn test_export_filename_convention() {
        assert_eq!(export_filename("Dust II"), "strat-dust ii.png");
        assert_eq!(export_filename("Mirage"), "strat-mirage.png");
    }

    #[test]
    fn test_export_png_writes_a_file() {
        let renderer = BoardRenderer::new(1).unwrap();
        let canvas = renderer.render(&[], None);

        let path = std::path::Path::new("target/test_board_export.png");
        export_png(path, &canvas).unwrap();
        assert!(path.exists());

        let loaded = image::open(path).unwrap().to_rgba8();
        assert_eq!(loaded.dimensions(), canvas.dimensions());
    }
}
