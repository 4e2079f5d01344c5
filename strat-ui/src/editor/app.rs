//! Top-level editor shell: sidebar, header actions, toolbar, board.

use strat_core::{MapDescriptor, MapId, DEFAULT_MAPS};
use strat_export::BoardRenderer;
use strat_session::DrawingSession;
use tracing::{error, info};

use crate::editor::canvas::BoardCanvas;
use crate::editor::map_image::{self, MapTextures};
use crate::editor::toolbar;

const INDICATOR_GREEN: egui::Color32 = egui::Color32::from_rgb(0x10, 0xb9, 0x81);

/// The whole StratBoard editor. Owns the drawing session; call
/// [`StratBoardApp::show`] once per frame.
pub struct StratBoardApp {
    session: DrawingSession,
    canvas: BoardCanvas,
    textures: MapTextures,
    confirm_clear: bool,
}

impl Default for StratBoardApp {
    fn default() -> Self {
        Self::new()
    }
}

impl StratBoardApp {
    pub fn new() -> Self {
        Self {
            session: DrawingSession::new(DEFAULT_MAPS[0].map_id()),
            canvas: BoardCanvas::default(),
            textures: MapTextures::new(),
            confirm_clear: false,
        }
    }

    pub fn session(&self) -> &DrawingSession {
        &self.session
    }

    /// Draw the editor into `ctx`.
    pub fn show(&mut self, ctx: &egui::Context) {
        self.handle_shortcuts(ctx);

        egui::TopBottomPanel::top("actions").show(ctx, |ui| self.header(ui));
        egui::SidePanel::left("maps").show(ctx, |ui| self.map_sidebar(ui));
        let descriptor = self.active_descriptor();
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal_top(|ui| {
                let texture = self.textures.get(ctx, &descriptor).cloned();
                self.canvas.ui(ui, &mut self.session, texture.as_ref());
                ui.vertical(|ui| {
                    if let Some(tool) = toolbar::toolbar_ui(ui, self.session.active_tool()) {
                        self.session.select_tool(tool);
                    }
                });
            });
        });

        self.confirm_clear_dialog(ctx);
    }

    fn header(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("StratBoard");
            ui.separator();

            let can_undo = self.session.can_undo();
            if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                self.session.undo();
            }

            let can_redo = self.session.can_redo();
            if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                self.session.redo();
            }

            let has_items = !self.session.current_items().is_empty();
            if ui.add_enabled(has_items, egui::Button::new("Clear")).clicked() {
                self.confirm_clear = true;
            }

            if ui.button("Export PNG").clicked() {
                self.export_board();
            }
        });
    }

    fn map_sidebar(&mut self, ui: &mut egui::Ui) {
        for descriptor in DEFAULT_MAPS {
            let map_id = descriptor.map_id();
            let active = map_id == *self.session.active_map();
            let has_items = !self.session.store().current_items(&map_id).is_empty();

            ui.horizontal(|ui| {
                if ui.selectable_label(active, descriptor.name).clicked() {
                    self.session.select_map(map_id);
                }
                if has_items {
                    ui.colored_label(INDICATOR_GREEN, "●");
                }
            });
        }
    }

    fn confirm_clear_dialog(&mut self, ctx: &egui::Context) {
        if !self.confirm_clear {
            return;
        }
        egui::Window::new("Clear board")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(format!(
                    "Remove everything drawn on {}? This can be undone.",
                    self.active_descriptor().name
                ));
                ui.horizontal(|ui| {
                    if ui.button("Clear").clicked() {
                        self.session.clear();
                        self.confirm_clear = false;
                    }
                    if ui.button("Cancel").clicked() {
                        self.confirm_clear = false;
                    }
                });
            });
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let (undo, redo) = ctx.input(|i| {
            let cmd = i.modifiers.command;
            (
                cmd && !i.modifiers.shift && i.key_pressed(egui::Key::Z),
                cmd && (i.key_pressed(egui::Key::Y)
                    || (i.modifiers.shift && i.key_pressed(egui::Key::Z))),
            )
        });
        if undo {
            self.session.undo();
        }
        if redo {
            self.session.redo();
        }
    }

    /// Render the committed snapshot (map image included when available)
    /// and write `strat-<map>.png` next to the working directory.
    fn export_board(&mut self) {
        let descriptor = self.active_descriptor();
        let renderer = BoardRenderer::default();
        // The board still exports without a readable map image.
        let map_image = map_image::load_rgba(descriptor.image_path).ok();
        let rendered = renderer.render(self.session.current_items(), map_image.as_ref());

        let path = std::path::PathBuf::from(strat_export::export_filename(descriptor.name));
        match strat_export::export_png(&path, &rendered) {
            Ok(()) => info!(path = %path.display(), "strategy exported"),
            Err(err) => error!(error = %format!("{err:#}"), "export failed"),
        }
    }

    fn active_descriptor(&self) -> MapDescriptor {
        let active: &MapId = self.session.active_map();
        DEFAULT_MAPS
            .iter()
            .find(|descriptor| descriptor.id == active.as_str())
            .copied()
            .unwrap_or(DEFAULT_MAPS[0])
    }
}
