//! Rasterization of 2D primitives into a [`Frame`]

use super::frame::{Frame, Rgba};
use crate::sim::Rect;

/// 3x5 bitmap digits, one row per byte, bit 2 is the leftmost column
const DIGITS: [[u8; 5]; 10] = [
    [0b111, 0b101, 0b101, 0b101, 0b111], // 0
    [0b010, 0b110, 0b010, 0b010, 0b111], // 1
    [0b111, 0b001, 0b111, 0b100, 0b111], // 2
    [0b111, 0b001, 0b111, 0b001, 0b111], // 3
    [0b101, 0b101, 0b111, 0b001, 0b001], // 4
    [0b111, 0b100, 0b111, 0b001, 0b111], // 5
    [0b111, 0b100, 0b111, 0b101, 0b111], // 6
    [0b111, 0b001, 0b010, 0b010, 0b010], // 7
    [0b111, 0b101, 0b111, 0b101, 0b111], // 8
    [0b111, 0b101, 0b111, 0b001, 0b111], // 9
];

/// Fill a rectangle, clipped to the frame. Covers pixels whose index lies in
/// `[floor(left), floor(right))` on each axis.
pub fn fill_rect(frame: &mut Frame, rect: &Rect, color: Rgba) {
    let x0 = (rect.left().floor() as i64).max(0);
    let x1 = (rect.right().floor() as i64).min(frame.width as i64);
    let y0 = (rect.top().floor() as i64).max(0);
    let y1 = (rect.bottom().floor() as i64).min(frame.height as i64);

    for y in y0..y1 {
        for x in x0..x1 {
            frame.put(x, y, color);
        }
    }
}

/// Horizontal line `thickness` pixels tall whose lower edge sits on `y`
pub fn hline(frame: &mut Frame, y: f32, thickness: u32, color: Rgba) {
    let rect = Rect::new(
        0.0,
        y - thickness as f32 + 1.0,
        frame.width as f32,
        thickness as f32,
    );
    fill_rect(frame, &rect, color);
}

/// Draw a non-negative integer with the bitmap font. Returns the drawn width.
pub fn number(frame: &mut Frame, value: u64, x: i64, y: i64, scale: u32, color: Rgba) -> i64 {
    let scale = scale.max(1) as i64;
    let advance = 4 * scale;
    let text = value.to_string();

    for (i, ch) in text.bytes().enumerate() {
        let glyph = &DIGITS[(ch - b'0') as usize];
        let origin_x = x + i as i64 * advance;
        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..3u32 {
                if *bits & (0b100u8 >> col) == 0 {
                    continue;
                }
                for dy in 0..scale {
                    for dx in 0..scale {
                        frame.put(
                            origin_x + col as i64 * scale + dx,
                            y + row as i64 * scale + dy,
                            color,
                        );
                    }
                }
            }
        }
    }

    text.len() as i64 * advance - scale
}
