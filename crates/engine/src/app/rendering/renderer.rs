use std::sync::Arc;

use pixels::{Error, Pixels, SurfaceTexture};
use winit::window::Window;

use crate::app::frame::{DrawCommand, RenderFrame, TextAnchor};
use crate::app::{Camera2D, Vec2};

use super::raster::{fill_rect, outline_rect};
use super::text::{draw_text, text_width_px};
use super::transform::{world_extent_to_screen, world_to_screen, Viewport};

pub struct Renderer {
    window: Arc<Window>,
    pixels: Pixels<'static>,
    viewport: Viewport,
}

impl Renderer {
    pub fn new(window: Arc<Window>) -> Result<Self, Error> {
        let size = window.inner_size();
        let pixels = Self::build_pixels(Arc::clone(&window), size.width.max(1), size.height.max(1))?;
        Ok(Self {
            window,
            pixels,
            viewport: Viewport {
                width: size.width,
                height: size.height,
            },
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), Error> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels = Self::build_pixels(Arc::clone(&self.window), width, height)?;
        self.viewport = Viewport { width, height };
        Ok(())
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn build_pixels(
        window: Arc<Window>,
        width: u32,
        height: u32,
    ) -> Result<Pixels<'static>, Error> {
        let surface = SurfaceTexture::new(width, height, window);
        Pixels::new(width, height, surface)
    }

    pub(crate) fn render_frame(&mut self, frame: &RenderFrame) -> Result<(), Error> {
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Ok(());
        }
        rasterize(self.pixels.frame_mut(), self.viewport, frame);
        self.pixels.render()
    }
}

pub(crate) fn rasterize(buffer: &mut [u8], viewport: Viewport, frame: &RenderFrame) {
    let clear_color = frame.clear_color();
    for chunk in buffer.chunks_exact_mut(4) {
        chunk.copy_from_slice(&clear_color);
    }
    let camera = frame.camera();
    for command in frame.world_commands() {
        draw_command(buffer, viewport, Some(camera), command);
    }
    for command in frame.hud_commands() {
        draw_command(buffer, viewport, None, command);
    }
}

fn draw_command(
    buffer: &mut [u8],
    viewport: Viewport,
    camera: Option<&Camera2D>,
    command: &DrawCommand,
) {
    let Viewport { width, height } = viewport;
    match command {
        DrawCommand::FillRect {
            origin,
            size,
            color,
        } => {
            let (x, y, w, h) = screen_rect(viewport, camera, *origin, *size);
            fill_rect(buffer, width, height, x, y, w, h, *color);
        }
        DrawCommand::OutlineRect {
            origin,
            size,
            color,
        } => {
            let (x, y, w, h) = screen_rect(viewport, camera, *origin, *size);
            outline_rect(buffer, width, height, x, y, w, h, *color);
        }
        DrawCommand::Text {
            anchor_point,
            anchor,
            text,
            color,
            scale,
        } => {
            let (mut x, y) = match camera {
                Some(camera) => world_to_screen(*anchor_point, camera, viewport),
                None => (anchor_point.x.round() as i32, anchor_point.y.round() as i32),
            };
            if *anchor == TextAnchor::TopCenter {
                x -= text_width_px(text, *scale) / 2;
            }
            draw_text(buffer, width, height, x, y, text, *color, *scale);
        }
    }
}

fn screen_rect(
    viewport: Viewport,
    camera: Option<&Camera2D>,
    origin: Vec2,
    size: Vec2,
) -> (i32, i32, i32, i32) {
    match camera {
        Some(camera) => {
            let (x, y) = world_to_screen(origin, camera, viewport);
            (
                x,
                y,
                world_extent_to_screen(size.x, camera),
                world_extent_to_screen(size.y, camera),
            )
        }
        None => (
            origin.x.round() as i32,
            origin.y.round() as i32,
            size.x.round() as i32,
            size.y.round() as i32,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(buffer: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
        let offset = ((y * width + x) * 4) as usize;
        [
            buffer[offset],
            buffer[offset + 1],
            buffer[offset + 2],
            buffer[offset + 3],
        ]
    }

    #[test]
    fn world_rects_follow_the_camera_and_hud_rects_do_not() {
        let viewport = Viewport {
            width: 20,
            height: 20,
        };
        let mut frame = RenderFrame::new((20, 20));
        frame.set_clear_color([1, 1, 1, 255]);
        frame.set_camera(Camera2D {
            position: Vec2::new(100.0, 100.0),
            zoom: 1.0,
        });
        frame.world_rect(Vec2::new(100.0, 100.0), Vec2::new(2.0, 2.0), [200, 0, 0, 255]);
        frame.hud_rect(Vec2::new(0.0, 0.0), Vec2::new(2.0, 2.0), [0, 200, 0, 255]);

        let mut buffer = vec![0u8; 20 * 20 * 4];
        rasterize(&mut buffer, viewport, &frame);

        assert_eq!(pixel(&buffer, 20, 10, 10), [200, 0, 0, 255]);
        assert_eq!(pixel(&buffer, 20, 0, 0), [0, 200, 0, 255]);
        assert_eq!(pixel(&buffer, 20, 5, 15), [1, 1, 1, 255]);
    }

    #[test]
    fn hud_draws_over_world() {
        let viewport = Viewport {
            width: 4,
            height: 4,
        };
        let mut frame = RenderFrame::new((4, 4));
        frame.hud_rect(Vec2::new(0.0, 0.0), Vec2::new(4.0, 4.0), [0, 0, 9, 255]);
        frame.world_rect(Vec2::new(-100.0, -100.0), Vec2::new(400.0, 400.0), [9, 0, 0, 255]);

        let mut buffer = vec![0u8; 4 * 4 * 4];
        rasterize(&mut buffer, viewport, &frame);
        assert_eq!(pixel(&buffer, 4, 1, 1), [0, 0, 9, 255]);
    }
}
