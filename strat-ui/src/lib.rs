//! strat-ui: egui editor shell for StratBoard.
//!
//! Hosts the drawing session behind an immediate-mode UI: map sidebar,
//! tool palette, board canvas, and the undo/redo/clear/export actions.

pub mod editor;

pub use editor::StratBoardApp;

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. Call once at startup; the
/// filter comes from `RUST_LOG`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
}
