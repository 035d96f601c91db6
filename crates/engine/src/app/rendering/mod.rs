mod raster;
mod renderer;
mod text;
mod transform;

pub use renderer::Renderer;
pub use text::{glyph_advance, line_advance, text_width_px, GLYPH_HEIGHT, GLYPH_WIDTH};
pub use transform::{world_extent_to_screen, world_to_screen, Viewport};
