//! Software raster surface backed by an `image::RgbaImage`.
//!
//! Used for headless rendering and PNG export. Rectangles are clipped to the
//! image and blended source-over; lines are 1px DDA strokes.

use std::path::Path;

use glam::Vec2;
use image::{Rgba, RgbaImage};

use crate::color::Color;
use crate::surface::Surface;

pub struct RasterSurface {
    image: RgbaImage,
    background: Color,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        let mut surface = Self {
            image: RgbaImage::new(width.max(1), height.max(1)),
            background,
        };
        surface.clear();
        surface
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Pixel at integer coordinates, if inside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        (x < self.image.width() && y < self.image.height()).then(|| self.image.get_pixel(x, y).0)
    }

    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), image::ImageError> {
        self.image
            .save_with_format(path, image::ImageFormat::Png)
    }

    fn blend(&mut self, x: u32, y: u32, color: Color) {
        let src = color.to_rgba8();
        let dst = self.image.get_pixel_mut(x, y);
        if src[3] == 255 {
            *dst = Rgba(src);
            return;
        }
        let a = src[3] as f32 / 255.0;
        for i in 0..3 {
            dst.0[i] = (src[i] as f32 * a + dst.0[i] as f32 * (1.0 - a)).round() as u8;
        }
        dst.0[3] = (src[3] as f32 + dst.0[3] as f32 * (1.0 - a)).round().min(255.0) as u8;
    }
}

impl Surface for RasterSurface {
    fn width(&self) -> f32 {
        self.image.width() as f32
    }

    fn height(&self) -> f32 {
        self.image.height() as f32
    }

    fn clear(&mut self) {
        let bg = Rgba(self.background.to_rgba8());
        for pixel in self.image.pixels_mut() {
            *pixel = bg;
        }
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color) {
        let (w, h) = (self.image.width() as f32, self.image.height() as f32);
        let x0 = origin.x.max(0.0).round();
        let y0 = origin.y.max(0.0).round();
        let x1 = (origin.x + size.x).min(w).round();
        let y1 = (origin.y + size.y).min(h).round();
        if x1 <= x0 || y1 <= y0 {
            return;
        }

        for y in y0 as u32..y1 as u32 {
            for x in x0 as u32..x1 as u32 {
                self.blend(x, y, color);
            }
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Color) {
        let delta = to - from;
        let steps = delta.x.abs().max(delta.y.abs()).ceil().max(1.0) as u32;
        let (w, h) = (self.image.width() as f32, self.image.height() as f32);

        for i in 0..=steps {
            let p = from + delta * (i as f32 / steps as f32);
            if p.x < 0.0 || p.y < 0.0 || p.x >= w || p.y >= h {
                continue;
            }
            self.blend(p.x as u32, p.y as u32, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_surface_is_cleared() {
        let s = RasterSurface::new(4, 3, Color::WHITE);
        assert_eq!(s.width(), 4.0);
        assert_eq!(s.height(), 3.0);
        assert_eq!(s.pixel(3, 2), Some([255, 255, 255, 255]));
        assert_eq!(s.pixel(4, 0), None);
    }

    #[test]
    fn test_fill_rect_clips_to_image() {
        let mut s = RasterSurface::new(10, 10, Color::WHITE);
        s.fill_rect(Vec2::new(-5.0, 8.0), Vec2::new(20.0, 30.0), Color::BLACK);

        assert_eq!(s.pixel(0, 8), Some([0, 0, 0, 255]));
        assert_eq!(s.pixel(9, 9), Some([0, 0, 0, 255]));
        assert_eq!(s.pixel(0, 7), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_fill_rect_fully_outside_is_noop() {
        let mut s = RasterSurface::new(10, 10, Color::WHITE);
        s.fill_rect(Vec2::new(-50.0, -50.0), Vec2::new(20.0, 30.0), Color::BLACK);
        assert!(s.image().pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn test_stroke_line_diagonal() {
        let mut s = RasterSurface::new(10, 10, Color::WHITE);
        s.stroke_line(Vec2::new(0.5, 0.5), Vec2::new(8.5, 8.5), Color::BLACK);

        for i in 0..=8 {
            assert_eq!(s.pixel(i, i), Some([0, 0, 0, 255]), "pixel {}", i);
        }
        assert_eq!(s.pixel(9, 0), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_translucent_blend() {
        let mut s = RasterSurface::new(2, 2, Color::WHITE);
        s.fill_rect(Vec2::ZERO, Vec2::splat(2.0), Color::rgba(0.0, 0.0, 0.0, 0.5));
        let p = s.pixel(0, 0).unwrap();
        assert!(p[0] > 120 && p[0] < 135);
        assert_eq!(p[3], 255);
    }

    #[test]
    fn test_clear_restores_background() {
        let mut s = RasterSurface::new(3, 3, Color::WHITE);
        s.fill_rect(Vec2::ZERO, Vec2::splat(3.0), Color::BLACK);
        s.clear();
        assert_eq!(s.pixel(1, 1), Some([255, 255, 255, 255]));
    }
}
