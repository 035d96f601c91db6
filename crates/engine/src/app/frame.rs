use super::scene::{Camera2D, Vec2};

pub type Rgba = [u8; 4];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    TopLeft,
    TopCenter,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        origin: Vec2,
        size: Vec2,
        color: Rgba,
    },
    OutlineRect {
        origin: Vec2,
        size: Vec2,
        color: Rgba,
    },
    Text {
        anchor_point: Vec2,
        anchor: TextAnchor,
        text: String,
        color: Rgba,
        scale: i32,
    },
}

/// Draw list a scene fills once per rendered frame.
///
/// World commands are transformed by the camera (position and zoom); text in
/// the world layer keeps its pixel size and only its anchor moves. HUD
/// commands are in window pixels.
#[derive(Debug, Clone)]
pub struct RenderFrame {
    camera: Camera2D,
    clear_color: Rgba,
    world: Vec<DrawCommand>,
    hud: Vec<DrawCommand>,
    window_size: (u32, u32),
}

impl RenderFrame {
    pub fn new(window_size: (u32, u32)) -> Self {
        Self {
            camera: Camera2D::default(),
            clear_color: [0, 0, 0, 255],
            world: Vec::new(),
            hud: Vec::new(),
            window_size,
        }
    }

    pub(crate) fn reset(&mut self, window_size: (u32, u32)) {
        self.world.clear();
        self.hud.clear();
        self.window_size = window_size;
    }

    pub fn window_size(&self) -> (u32, u32) {
        self.window_size
    }

    pub fn camera(&self) -> &Camera2D {
        &self.camera
    }

    pub fn set_camera(&mut self, camera: Camera2D) {
        self.camera = camera;
    }

    pub fn clear_color(&self) -> Rgba {
        self.clear_color
    }

    pub fn set_clear_color(&mut self, color: Rgba) {
        self.clear_color = color;
    }

    pub fn world_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba) {
        self.world.push(DrawCommand::FillRect {
            origin,
            size,
            color,
        });
    }

    pub fn world_outline(&mut self, origin: Vec2, size: Vec2, color: Rgba) {
        self.world.push(DrawCommand::OutlineRect {
            origin,
            size,
            color,
        });
    }

    pub fn world_text(&mut self, anchor_point: Vec2, text: &str, color: Rgba, scale: i32) {
        self.world.push(DrawCommand::Text {
            anchor_point,
            anchor: TextAnchor::TopCenter,
            text: text.to_string(),
            color,
            scale,
        });
    }

    pub fn hud_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba) {
        self.hud.push(DrawCommand::FillRect {
            origin,
            size,
            color,
        });
    }

    pub fn hud_outline(&mut self, origin: Vec2, size: Vec2, color: Rgba) {
        self.hud.push(DrawCommand::OutlineRect {
            origin,
            size,
            color,
        });
    }

    pub fn hud_text(&mut self, anchor_point: Vec2, anchor: TextAnchor, text: &str, color: Rgba, scale: i32) {
        self.hud.push(DrawCommand::Text {
            anchor_point,
            anchor,
            text: text.to_string(),
            color,
            scale,
        });
    }

    pub fn world_commands(&self) -> &[DrawCommand] {
        &self.world
    }

    pub fn hud_commands(&self) -> &[DrawCommand] {
        &self.hud
    }
}
