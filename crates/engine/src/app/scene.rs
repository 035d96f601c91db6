use std::ops::{Add, Mul, Sub};

use super::frame::RenderFrame;
use super::input::{ActionStates, InputAction};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneCommand {
    None,
    Quit,
}

/// Per-tick view of the input devices.
///
/// `is_down` reports keys held at the time of the tick; `was_pressed` reports
/// press edges collected since the previous tick, so a single key press is
/// observed by exactly one tick.
#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    held: ActionStates,
    pressed: ActionStates,
    typed_text: String,
}

impl InputSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn new(held: ActionStates, pressed: ActionStates, typed_text: String) -> Self {
        Self {
            held,
            pressed,
            typed_text,
        }
    }

    pub fn is_down(&self, action: InputAction) -> bool {
        self.held.is_down(action)
    }

    pub fn was_pressed(&self, action: InputAction) -> bool {
        self.pressed.is_down(action)
    }

    pub fn any_pressed(&self, actions: &[InputAction]) -> bool {
        self.pressed.any_down(actions)
    }

    pub fn typed_text(&self) -> &str {
        &self.typed_text
    }

    pub fn with_action_down(mut self, action: InputAction, is_down: bool) -> Self {
        self.held.set(action, is_down);
        self
    }

    /// Records a press edge; the key is also reported as held.
    pub fn with_action_pressed(mut self, action: InputAction) -> Self {
        self.held.set(action, true);
        self.pressed.set(action, true);
        self
    }

    pub fn with_typed_text(mut self, text: &str) -> Self {
        self.typed_text.push_str(text);
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance(self, other: Vec2) -> f32 {
        (self - other).length()
    }

    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Unit vector in the same direction, or zero for the zero vector.
    pub fn normalized(self) -> Vec2 {
        let length = self.length();
        if length <= f32::EPSILON {
            return Vec2::ZERO;
        }
        Vec2 {
            x: self.x / length,
            y: self.y / length,
        }
    }

    pub fn lerp(self, to: Vec2, t: f32) -> Vec2 {
        let t = t.clamp(0.0, 1.0);
        Vec2 {
            x: self.x + (to.x - self.x) * t,
            y: self.y + (to.y - self.y) * t,
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2 {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2 {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2 {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

pub const CAMERA_ZOOM_DEFAULT: f32 = 1.0;
pub const CAMERA_ZOOM_MIN: f32 = 0.25;
pub const CAMERA_ZOOM_MAX: f32 = 4.0;

/// World coordinates are pixels with y growing downward; `position` is the
/// world point drawn at the viewport center.
#[derive(Debug, Clone, Copy)]
pub struct Camera2D {
    pub position: Vec2,
    pub zoom: f32,
}

impl Default for Camera2D {
    fn default() -> Self {
        Self {
            position: Vec2::default(),
            zoom: CAMERA_ZOOM_DEFAULT,
        }
    }
}

impl Camera2D {
    pub fn effective_zoom(&self) -> f32 {
        clamp_camera_zoom(self.zoom)
    }

    pub fn set_zoom_clamped(&mut self, zoom: f32) {
        self.zoom = clamp_camera_zoom(zoom);
    }
}

fn clamp_camera_zoom(zoom: f32) -> f32 {
    if !zoom.is_finite() {
        return CAMERA_ZOOM_DEFAULT;
    }
    zoom.clamp(CAMERA_ZOOM_MIN, CAMERA_ZOOM_MAX)
}

/// Tilemap origin convention:
/// - tile (0,0) has its top-left corner at world (0,0).
/// - tile (x,y) covers `[x*size, (x+1)*size) x [y*size, (y+1)*size)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Tilemap {
    width: u32,
    height: u32,
    tile_size: f32,
    tiles: Vec<u16>,
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TilemapError {
    #[error("tile count mismatch: expected {expected}, got {actual}")]
    TileCountMismatch { expected: usize, actual: usize },
    #[error("tile size must be positive and finite, got {0}")]
    InvalidTileSize(f32),
}

impl Tilemap {
    pub fn new(
        width: u32,
        height: u32,
        tile_size: f32,
        tiles: Vec<u16>,
    ) -> Result<Self, TilemapError> {
        if !tile_size.is_finite() || tile_size <= 0.0 {
            return Err(TilemapError::InvalidTileSize(tile_size));
        }
        let expected = width as usize * height as usize;
        let actual = tiles.len();
        if expected != actual {
            return Err(TilemapError::TileCountMismatch { expected, actual });
        }
        Ok(Self {
            width,
            height,
            tile_size,
            tiles,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn index_of(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn tile_at(&self, x: u32, y: u32) -> Option<u16> {
        self.index_of(x, y)
            .and_then(|index| self.tiles.get(index).copied())
    }

    /// Grid cell containing a world point, `None` outside the map.
    pub fn cell_at_world(&self, point: Vec2) -> Option<(u32, u32)> {
        let cell_x = (point.x / self.tile_size).floor();
        let cell_y = (point.y / self.tile_size).floor();
        if !cell_x.is_finite() || !cell_y.is_finite() || cell_x < 0.0 || cell_y < 0.0 {
            return None;
        }
        let (x, y) = (cell_x as u32, cell_y as u32);
        self.index_of(x, y).map(|_| (x, y))
    }
}

pub trait Scene {
    fn load(&mut self);
    fn update(&mut self, fixed_dt_seconds: f32, input: &InputSnapshot) -> SceneCommand;
    fn render(&mut self, frame: &mut RenderFrame);
    /// Runs once when the loop exits; must cancel anything still scheduled.
    fn unload(&mut self);
    fn debug_title(&self) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_tilemap(width: u32, height: u32, fill: u16) -> Tilemap {
        Tilemap::new(width, height, 48.0, vec![fill; width as usize * height as usize])
            .expect("tilemap")
    }

    #[test]
    fn tilemap_rejects_shape_mismatch() {
        let error = Tilemap::new(2, 2, 48.0, vec![0; 3]).expect_err("mismatch");
        assert_eq!(
            error,
            TilemapError::TileCountMismatch {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn tilemap_rejects_non_positive_tile_size() {
        assert!(matches!(
            Tilemap::new(1, 1, 0.0, vec![0]),
            Err(TilemapError::InvalidTileSize(_))
        ));
    }

    #[test]
    fn cell_lookup_floors_and_rejects_outside_points() {
        let map = make_tilemap(4, 3, 0);
        assert_eq!(map.cell_at_world(Vec2::new(0.0, 0.0)), Some((0, 0)));
        assert_eq!(map.cell_at_world(Vec2::new(47.9, 95.9)), Some((0, 1)));
        assert_eq!(map.cell_at_world(Vec2::new(48.0, 96.0)), Some((1, 2)));
        assert_eq!(map.cell_at_world(Vec2::new(-0.1, 10.0)), None);
        assert_eq!(map.cell_at_world(Vec2::new(192.0, 10.0)), None);
        assert_eq!(map.cell_at_world(Vec2::new(10.0, 144.0)), None);
    }

    #[test]
    fn normalized_diagonal_has_unit_length() {
        let v = Vec2::new(1.0, -1.0).normalized();
        assert!((v.length() - 1.0).abs() < 1e-6);
        assert_eq!(Vec2::ZERO.normalized(), Vec2::ZERO);
    }

    #[test]
    fn pressed_edge_implies_held() {
        let input = InputSnapshot::empty().with_action_pressed(InputAction::Interact);
        assert!(input.was_pressed(InputAction::Interact));
        assert!(input.is_down(InputAction::Interact));
        assert!(!input.was_pressed(InputAction::Cancel));
    }

    #[test]
    fn camera_zoom_is_clamped_and_sanitized() {
        let mut camera = Camera2D::default();
        camera.set_zoom_clamped(100.0);
        assert_eq!(camera.effective_zoom(), CAMERA_ZOOM_MAX);
        camera.zoom = f32::NAN;
        assert_eq!(camera.effective_zoom(), CAMERA_ZOOM_DEFAULT);
    }
}
