//! Interactive board canvas: pointer handling and painting.
//!
//! The widget converts device coordinates into the logical board space
//! before anything reaches the drawing session, and back again when
//! painting, so stored strokes stay resolution-independent.

use strat_core::{
    CanvasItem, ItemId, Marker, Point, Rgba8, Stroke, Tool, BOARD_BACKGROUND, BOARD_SIZE,
    MARKER_RADIUS, MARKER_RING_WIDTH,
};
use strat_session::DrawingSession;

/// A marker being dragged with the cursor tool. The relocation only
/// commits on drag-end; until then this is view-local preview state.
struct MarkerDrag {
    id: ItemId,
    pos: Point,
}

/// The interactive board. Holds only transient drag state; every edit
/// goes through the drawing session.
#[derive(Default)]
pub struct BoardCanvas {
    drag: Option<MarkerDrag>,
}

impl BoardCanvas {
    /// Lay out a square board no wider than the logical size, route
    /// pointer input, and paint the current snapshot.
    pub fn ui(
        &mut self,
        ui: &mut egui::Ui,
        session: &mut DrawingSession,
        map_texture: Option<&egui::TextureHandle>,
    ) {
        let side = ui.available_width().min(BOARD_SIZE);
        let (rect, response) = ui.allocate_exact_size(egui::vec2(side, side), egui::Sense::drag());
        let response = response.on_hover_cursor(tool_cursor(session.active_tool()));

        self.handle_pointer(&rect, &response, session);
        self.paint(ui, rect, session, map_texture);
    }

    fn handle_pointer(
        &mut self,
        rect: &egui::Rect,
        response: &egui::Response,
        session: &mut DrawingSession,
    ) {
        if response.drag_started() {
            if let Some(pos) = response.interact_pointer_pos() {
                let logical = to_logical(rect, pos);
                match session.active_tool() {
                    Tool::Cursor => {
                        if let Some(id) = hit_marker(session.current_items(), logical) {
                            self.drag = Some(MarkerDrag { id, pos: logical });
                        }
                    }
                    Tool::Pencil | Tool::Marker(_) => session.pointer_down(logical),
                }
            }
        } else if response.dragged() {
            if let Some(pos) = response.interact_pointer_pos() {
                let logical = to_logical(rect, pos);
                match self.drag.as_mut() {
                    Some(drag) => drag.pos = logical,
                    None => session.pointer_move(logical),
                }
            }
        }

        if response.drag_stopped() {
            match self.drag.take() {
                Some(drag) => session.move_marker(drag.id, drag.pos),
                None => session.pointer_up(),
            }
        }
    }

    fn paint(
        &self,
        ui: &egui::Ui,
        rect: egui::Rect,
        session: &DrawingSession,
        map_texture: Option<&egui::TextureHandle>,
    ) {
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, color32(BOARD_BACKGROUND));

        if let Some(texture) = map_texture {
            let fitted = fit_rect(rect, texture.size_vec2());
            painter.image(
                texture.id(),
                fitted,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        }

        for item in session.current_items() {
            match item {
                CanvasItem::Stroke(stroke) => paint_stroke(&painter, &rect, stroke),
                CanvasItem::Marker(marker) => {
                    // A marker mid-drag paints at its preview position.
                    let pos = match &self.drag {
                        Some(drag) if drag.id == marker.id => drag.pos,
                        _ => marker.pos,
                    };
                    paint_marker(&painter, &rect, marker, pos);
                }
            }
        }

        if let Some(stroke) = session.in_progress_stroke() {
            paint_stroke(&painter, &rect, stroke);
        }
    }
}

fn paint_stroke(painter: &egui::Painter, rect: &egui::Rect, stroke: &Stroke) {
    let scale = rect.width() / BOARD_SIZE;
    let width = (stroke.width * scale).max(1.0);
    let color = color32(stroke.color);
    let points: Vec<egui::Pos2> = stroke.points.iter().map(|p| to_screen(rect, *p)).collect();

    if points.len() == 1 {
        painter.circle_filled(points[0], width / 2.0, color);
    } else if !points.is_empty() {
        painter.add(egui::Shape::line(points, egui::Stroke::new(width, color)));
    }
}

fn paint_marker(painter: &egui::Painter, rect: &egui::Rect, marker: &Marker, pos: Point) {
    let scale = rect.width() / BOARD_SIZE;
    let center = to_screen(rect, pos);
    let radius = MARKER_RADIUS * scale;

    painter.circle_filled(center, radius, color32(marker.kind.color()));
    painter.circle_stroke(
        center,
        radius,
        egui::Stroke::new(MARKER_RING_WIDTH * scale, egui::Color32::BLACK),
    );
    painter.text(
        center,
        egui::Align2::CENTER_CENTER,
        marker.kind.label(),
        egui::FontId::proportional(14.0 * scale),
        egui::Color32::BLACK,
    );
}

/// Topmost marker under `pos`, if any.
fn hit_marker(items: &[CanvasItem], pos: Point) -> Option<ItemId> {
    items.iter().rev().find_map(|item| match item {
        CanvasItem::Marker(marker) => {
            let d = (marker.pos.x - pos.x).hypot(marker.pos.y - pos.y);
            (d <= MARKER_RADIUS).then_some(marker.id)
        }
        _ => None,
    })
}

/// Device position -> logical board space.
fn to_logical(rect: &egui::Rect, pos: egui::Pos2) -> Point {
    let scale = rect.width() / BOARD_SIZE;
    Point::new((pos.x - rect.min.x) / scale, (pos.y - rect.min.y) / scale)
}

/// Logical board space -> device position.
fn to_screen(rect: &egui::Rect, point: Point) -> egui::Pos2 {
    let scale = rect.width() / BOARD_SIZE;
    egui::pos2(rect.min.x + point.x * scale, rect.min.y + point.y * scale)
}

/// Fit `size` inside `rect`, centered, keeping the aspect ratio.
fn fit_rect(rect: egui::Rect, size: egui::Vec2) -> egui::Rect {
    if size.x <= 0.0 || size.y <= 0.0 {
        return rect;
    }
    let scale = (rect.width() / size.x).min(rect.height() / size.y);
    egui::Rect::from_center_size(rect.center(), size * scale)
}

fn tool_cursor(tool: Tool) -> egui::CursorIcon {
    match tool {
        Tool::Cursor => egui::CursorIcon::Default,
        Tool::Pencil => egui::CursorIcon::Crosshair,
        Tool::Marker(_) => egui::CursorIcon::Copy,
    }
}

pub(crate) fn color32(color: Rgba8) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}
