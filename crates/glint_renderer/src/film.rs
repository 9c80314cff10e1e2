//! Film: the finished, displayable image of a render.

use crate::shading::Color;
use glint_math::Interval;

/// Convert a linear colour to 8-bit RGB.
///
/// This is the only place colours are clamped: each channel is scaled by
/// `exposure`, clamped to [0, 1] and rounded.
pub fn color_to_rgb(color: Color, exposure: f32) -> [u8; 3] {
    let channel = |c: f32| (255.0 * Interval::UNIT.clamp(c * exposure)).round() as u8;
    [channel(color.x), channel(color.y), channel(color.z)]
}

/// A grid of 8-bit RGB pixels in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Film {
    pub width: u32,
    pub height: u32,
    pixels: Vec<[u8; 3]>,
}

impl Film {
    /// Create a new film filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 3]; width as usize * height as usize],
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> [u8; 3] {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        let index = self.index(x, y);
        self.pixels[index] = rgb;
    }

    /// All pixels, row by row.
    pub fn pixels(&self) -> &[[u8; 3]] {
        &self.pixels
    }

    /// Mutable access to one row.
    pub(crate) fn row_mut(&mut self, y: u32) -> &mut [[u8; 3]] {
        let start = self.index(0, y);
        let end = start + self.width as usize;
        &mut self.pixels[start..end]
    }

    /// Flatten to packed RGB bytes (for an image encoder).
    pub fn into_raw(self) -> Vec<u8> {
        self.pixels.into_iter().flatten().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_to_rgb_clamps() {
        assert_eq!(color_to_rgb(Color::ZERO, 1.0), [0, 0, 0]);
        assert_eq!(color_to_rgb(Color::ONE, 1.0), [255, 255, 255]);
        assert_eq!(color_to_rgb(Color::new(2.0, -1.0, 0.5), 1.0), [255, 0, 128]);
        assert_eq!(color_to_rgb(Color::splat(0.5), 0.5), [64, 64, 64]);
    }

    #[test]
    fn test_film_get_set() {
        let mut film = Film::new(4, 3);
        film.set(3, 2, [1, 2, 3]);

        assert_eq!(film.get(3, 2), [1, 2, 3]);
        assert_eq!(film.get(0, 0), [0, 0, 0]);
        assert_eq!(film.pixels().len(), 12);
    }

    #[test]
    fn test_row_mut() {
        let mut film = Film::new(3, 2);
        film.row_mut(1).copy_from_slice(&[[9; 3]; 3]);

        assert_eq!(film.get(0, 1), [9, 9, 9]);
        assert_eq!(film.get(2, 0), [0, 0, 0]);
    }

    #[test]
    fn test_into_raw() {
        let mut film = Film::new(2, 1);
        film.set(1, 0, [4, 5, 6]);

        assert_eq!(film.into_raw(), vec![0, 0, 0, 4, 5, 6]);
    }
}
