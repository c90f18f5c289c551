//! Render target holding one color per pixel.

use glint_core::Color;

/// A framebuffer of linear RGB colors, addressed by (row, col).
///
/// Colors follow the 0-255 intensity convention used by scene files and
/// light sources; values are only clamped when the frame is encoded to
/// 8-bit output.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Frame {
    /// Creates a black frame of `width` columns by `height` rows.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, row: u32, col: u32) -> usize {
        debug_assert!(row < self.height && col < self.width);
        row as usize * self.width as usize + col as usize
    }

    pub fn get(&self, row: u32, col: u32) -> Color {
        self.pixels[self.index(row, col)]
    }

    pub fn set(&mut self, row: u32, col: u32, color: Color) {
        let index = self.index(row, col);
        self.pixels[index] = color;
    }

    /// Encodes the frame as packed RGB bytes, row-major from the top-left.
    ///
    /// Each channel is clamped to [0, 255]; out-of-range energy from bright
    /// highlights saturates rather than wrapping.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.push(color.x.clamp(0.0, 255.0) as u8);
            bytes.push(color.y.clamp(0.0, 255.0) as u8);
            bytes.push(color.z.clamp(0.0, 255.0) as u8);
        }
        bytes
    }
}
