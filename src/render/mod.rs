pub mod font;
mod renderer;
mod ui;

pub use font::PixelFont;
pub use renderer::{Renderer, TILE_SIZE};
