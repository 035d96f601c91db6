pub mod app;

pub use app::{
    glyph_advance, line_advance, run_app, text_width_px, world_extent_to_screen, world_to_screen,
    AppError, Camera2D, DrawCommand, InputAction, InputSnapshot, LoopConfig, LoopMetricsSnapshot,
    RenderFrame, Renderer, Rgba, Scene, SceneCommand, TextAnchor, Tilemap, TilemapError, Vec2,
    Viewport, CAMERA_ZOOM_MAX, CAMERA_ZOOM_MIN, GLYPH_HEIGHT, GLYPH_WIDTH, MOVEMENT_ACTIONS,
};
