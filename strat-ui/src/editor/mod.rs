// Editor module for the StratBoard UI.

pub mod app;
pub mod canvas;
pub mod map_image;
pub mod toolbar;

pub use app::StratBoardApp;
pub use canvas::BoardCanvas;
pub use map_image::MapTextures;
