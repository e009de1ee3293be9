//! Pixel and frame buffer types

use bytemuck::{Pod, Zeroable};

/// 8-bit RGBA pixel
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Pod, Zeroable)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Colors for game elements
pub mod colors {
    use super::Rgba;

    pub const BACKGROUND: Rgba = Rgba::rgb(0, 0, 255);
    pub const GROUND: Rgba = Rgba::rgb(0, 0, 0);
    pub const DINO: Rgba = Rgba::rgb(0, 0, 0);
    pub const OBSTACLE: Rgba = Rgba::rgb(0, 0, 0);
    pub const SCORE: Rgba = Rgba::rgb(0, 0, 0);
}

/// Row-major RGBA frame, origin top-left
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pixels: Vec<Rgba>,
}

impl Frame {
    pub fn new(width: u32, height: u32, fill: Rgba) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Set a pixel; out-of-bounds writes are dropped
    #[inline]
    pub fn put(&mut self, x: i64, y: i64, color: Rgba) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let index = y as usize * self.width as usize + x as usize;
        self.pixels[index] = color;
    }

    /// Raw RGBA bytes, 4 per pixel
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Packed RGB bytes, 3 per pixel (the layout most image encoders take)
    pub fn to_rgb(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| [p.r, p.g, p.b]).collect()
    }
}
