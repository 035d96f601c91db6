use super::raster::write_pixel_rgba_clipped;
use crate::app::frame::Rgba;

pub const GLYPH_WIDTH: i32 = 3;
pub const GLYPH_HEIGHT: i32 = 5;

/// Printable ASCII (`' '..='~'`), five 3-bit rows per glyph packed top row
/// first into the low 15 bits.
const GLYPHS: [u16; 95] = [
    0x0000, 0x2482, 0x5A00, 0x5F7D, 0x7DDF, 0x52A5, 0x2AAB, 0x2400,
    0x1491, 0x4494, 0x0AA8, 0x05D0, 0x0014, 0x01C0, 0x0002, 0x12A4,
    0x7B6F, 0x2C97, 0x73E7, 0x73CF, 0x5BC9, 0x79CF, 0x79EF, 0x7292,
    0x7BEF, 0x7BCF, 0x0410, 0x0414, 0x1511, 0x0E38, 0x4454, 0x72C2,
    0x7BE7, 0x2BED, 0x6BAE, 0x7927, 0x6B6E, 0x79A7, 0x79A4, 0x796F,
    0x5BED, 0x7497, 0x726F, 0x5BAD, 0x4927, 0x5FED, 0x5FFD, 0x7B6F,
    0x6BA4, 0x7B79, 0x6BAD, 0x79CF, 0x7492, 0x5B6F, 0x5B6A, 0x5BFD,
    0x5AAD, 0x5A92, 0x72A7, 0x6926, 0x4889, 0x324B, 0x2A00, 0x0007,
    0x4400, 0x0E7F, 0x49AE, 0x0F27, 0x13EF, 0x0FA7, 0x39A4, 0x0F79,
    0x49AD, 0x2092, 0x106A, 0x4BAD, 0x4927, 0x0DED, 0x0D6D, 0x0F6F,
    0x0D74, 0x0F79, 0x0D64, 0x0F8F, 0x2E93, 0x0B6F, 0x0B6A, 0x0B7A,
    0x0A95, 0x0B79, 0x0E57, 0x3593, 0x2492, 0x64D6, 0x0780,];

const FALLBACK_CHAR: char = '?';

pub fn glyph_advance(scale: i32) -> i32 {
    (GLYPH_WIDTH + 1) * scale.max(1)
}

pub fn line_advance(scale: i32) -> i32 {
    (GLYPH_HEIGHT + 2) * scale.max(1)
}

pub fn text_width_px(text: &str, scale: i32) -> i32 {
    text.chars().count() as i32 * glyph_advance(scale)
}

fn glyph_bits(ch: char) -> u16 {
    let code = match ch {
        ' '..='~' => ch as usize,
        _ => FALLBACK_CHAR as usize,
    };
    GLYPHS[code - ' ' as usize]
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn draw_text(
    frame: &mut [u8],
    width: u32,
    height: u32,
    mut x: i32,
    y: i32,
    text: &str,
    color: Rgba,
    scale: i32,
) {
    let scale = scale.max(1);
    for ch in text.chars() {
        draw_glyph(frame, width, height, x, y, glyph_bits(ch), color, scale);
        x += glyph_advance(scale);
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_glyph(
    frame: &mut [u8],
    width: u32,
    height: u32,
    x: i32,
    y: i32,
    bits: u16,
    color: Rgba,
    scale: i32,
) {
    if bits == 0 || width == 0 || height == 0 {
        return;
    }
    for row in 0..GLYPH_HEIGHT {
        let shift = (GLYPH_HEIGHT - 1 - row) * GLYPH_WIDTH;
        let row_bits = (bits >> shift) & 0b111;
        for col in 0..GLYPH_WIDTH {
            if row_bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                continue;
            }
            for sy in 0..scale {
                for sx in 0..scale {
                    write_pixel_rgba_clipped(
                        frame,
                        width,
                        height,
                        x + col * scale + sx,
                        y + row * scale + sy,
                        color,
                    );
                }
            }
        }
    }
}
