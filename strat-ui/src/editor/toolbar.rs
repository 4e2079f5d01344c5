//! Tool palette.

use strat_core::Tool;

use crate::editor::canvas::color32;

/// Draw the palette; returns the tool the user picked, if any.
pub fn toolbar_ui(ui: &mut egui::Ui, active: Tool) -> Option<Tool> {
    let mut picked = None;

    for tool in Tool::ALL {
        let selected = tool == active;
        let response = ui
            .selectable_label(selected, tool_text(tool))
            .on_hover_text(tool.display_name());
        if response.clicked() {
            picked = Some(tool);
        }
    }

    picked
}

fn tool_text(tool: Tool) -> egui::RichText {
    let text = egui::RichText::new(tool.display_name());
    match tool {
        Tool::Cursor | Tool::Pencil => text,
        Tool::Marker(kind) => text.color(color32(kind.color())),
    }
}
