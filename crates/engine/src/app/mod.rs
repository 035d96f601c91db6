mod frame;
mod input;
mod loop_runner;
mod metrics;
mod rendering;
mod scene;

pub use frame::{DrawCommand, RenderFrame, Rgba, TextAnchor};
pub use input::{InputAction, MOVEMENT_ACTIONS};
pub use loop_runner::{run_app, AppError, LoopConfig};
pub use metrics::LoopMetricsSnapshot;
pub use rendering::{
    glyph_advance, line_advance, text_width_px, world_extent_to_screen, world_to_screen, Renderer,
    Viewport, GLYPH_HEIGHT, GLYPH_WIDTH,
};
pub use scene::{
    Camera2D, InputSnapshot, Scene, SceneCommand, Tilemap, TilemapError, Vec2, CAMERA_ZOOM_MAX,
    CAMERA_ZOOM_MIN,
};
