//! A 3×5 bitmap font covering what numeric labels need.

use image::{Rgba, RgbaImage};

pub(crate) const FONT_WIDTH: u32 = 3;
pub(crate) const FONT_HEIGHT: u32 = 5;
/// Blank columns between two glyphs.
const SPACING: u32 = 1;

/// Rows of a glyph, top first; bit 2 is the leftmost column.
fn glyph(c: char) -> [u8; 5] {
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b010, 0b010, 0b010],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        'e' | 'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        _ => [0; 5],
    }
}

/// Width in pixels of `text` drawn at `scale`.
pub(crate) fn text_width(text: &str, scale: u32) -> u32 {
    let n = text.chars().count() as u32;
    if n == 0 { 0 } else { (n * (FONT_WIDTH + SPACING) - SPACING) * scale }
}

/// Draw `text` with its top left corner at `(x, y)`, each font pixel
/// being a `scale × scale` square.  Pixels outside `img` are dropped.
pub(crate) fn draw_text(img: &mut RgbaImage, x: i64, y: i64, text: &str,
                        color: Rgba<u8>, scale: u32) {
    let (w, h) = img.dimensions();
    let s = scale as i64;
    for (k, c) in text.chars().enumerate() {
        let gx = x + k as i64 * (FONT_WIDTH + SPACING) as i64 * s;
        for (row, bits) in glyph(c).iter().enumerate() {
            for col in 0 .. FONT_WIDTH {
                if bits & (0b100 >> col) == 0 { continue }
                let px = gx + col as i64 * s;
                let py = y + row as i64 * s;
                for dy in 0 .. s {
                    for dx in 0 .. s {
                        let (i, j) = (px + dx, py + dy);
                        if i >= 0 && j >= 0 && i < w as i64 && j < h as i64 {
                            img.put_pixel(i as u32, j as u32, color);
                        }
                    }
                }
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width() {
        assert_eq!(text_width("", 1), 0);
        assert_eq!(text_width("1", 1), 3);
        assert_eq!(text_width("10", 2), 14);
    }

    #[test]
    fn draws_inside_only() {
        let ink = Rgba([255, 255, 255, 255]);
        let mut img = RgbaImage::new(7, 5);
        draw_text(&mut img, 0, 0, "-1", ink, 1);
        // Middle bar of "-".
        assert_eq!(*img.get_pixel(0, 2), ink);
        assert_eq!(*img.get_pixel(0, 0), Rgba([0, 0, 0, 0]));
        // Bottom of "1".
        assert_eq!(*img.get_pixel(6, 4), ink);
        // Off-canvas text is clipped, not a panic.
        draw_text(&mut img, -2, 3, "88", ink, 3);
    }
}
