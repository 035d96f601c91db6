use crate::app::frame::Rgba;

pub(crate) fn write_pixel_rgba_clipped(
    frame: &mut [u8],
    width: u32,
    height: u32,
    x: i32,
    y: i32,
    color: Rgba,
) {
    if x < 0 || y < 0 || x >= width as i32 || y >= height as i32 {
        return;
    }
    let Some(pixel_offset) = (y as usize)
        .checked_mul(width as usize)
        .and_then(|row| row.checked_add(x as usize))
    else {
        return;
    };
    let Some(byte_offset) = pixel_offset.checked_mul(4) else {
        return;
    };
    let Some(end) = byte_offset.checked_add(4) else {
        return;
    };
    if end > frame.len() {
        return;
    }
    blend_into(&mut frame[byte_offset..end], color);
}

fn blend_into(dst: &mut [u8], color: Rgba) {
    let alpha = color[3] as u32;
    if alpha == 255 {
        dst.copy_from_slice(&color);
        return;
    }
    if alpha == 0 {
        return;
    }
    let inverse = 255 - alpha;
    for channel in 0..3 {
        let mixed = (color[channel] as u32 * alpha + dst[channel] as u32 * inverse) / 255;
        dst[channel] = mixed as u8;
    }
    dst[3] = 255;
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn fill_rect(
    frame: &mut [u8],
    width: u32,
    height: u32,
    x: i32,
    y: i32,
    rect_width: i32,
    rect_height: i32,
    color: Rgba,
) {
    let start_x = x.max(0);
    let start_y = y.max(0);
    let end_x = x.saturating_add(rect_width).min(width as i32);
    let end_y = y.saturating_add(rect_height).min(height as i32);
    if end_x <= start_x || end_y <= start_y {
        return;
    }
    for py in start_y..end_y {
        for px in start_x..end_x {
            write_pixel_rgba_clipped(frame, width, height, px, py, color);
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn outline_rect(
    frame: &mut [u8],
    width: u32,
    height: u32,
    x: i32,
    y: i32,
    rect_width: i32,
    rect_height: i32,
    color: Rgba,
) {
    if rect_width <= 1 || rect_height <= 1 {
        return;
    }
    fill_rect(frame, width, height, x, y, rect_width, 1, color);
    fill_rect(frame, width, height, x, y + rect_height - 1, rect_width, 1, color);
    fill_rect(frame, width, height, x, y, 1, rect_height, color);
    fill_rect(frame, width, height, x + rect_width - 1, y, 1, rect_height, color);
}
