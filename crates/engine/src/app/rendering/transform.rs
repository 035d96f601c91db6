use crate::app::{Camera2D, Vec2};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

pub fn world_to_screen(world: Vec2, camera: &Camera2D, viewport: Viewport) -> (i32, i32) {
    let zoom = camera.effective_zoom();
    let x = (world.x - camera.position.x) * zoom + viewport.width as f32 * 0.5;
    let y = (world.y - camera.position.y) * zoom + viewport.height as f32 * 0.5;
    (x.round() as i32, y.round() as i32)
}

pub fn world_extent_to_screen(extent: f32, camera: &Camera2D) -> i32 {
    (extent * camera.effective_zoom()).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_position_maps_to_viewport_center() {
        let viewport = Viewport {
            width: 800,
            height: 600,
        };
        let camera = Camera2D {
            position: Vec2 { x: 100.0, y: 50.0 },
            zoom: 1.0,
        };
        assert_eq!(world_to_screen(Vec2::new(100.0, 50.0), &camera, viewport), (400, 300));
    }

    #[test]
    fn zoom_scales_offsets_from_the_camera() {
        let viewport = Viewport {
            width: 800,
            height: 600,
        };
        let camera = Camera2D {
            position: Vec2 { x: 10.0, y: -5.0 },
            zoom: 2.0,
        };
        let (x, y) = world_to_screen(Vec2 { x: 12.0, y: -4.0 }, &camera, viewport);
        assert_eq!(x, 404);
        assert_eq!(y, 302);
        assert_eq!(world_extent_to_screen(48.0, &camera), 96);
    }
}
