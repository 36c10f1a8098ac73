//! A single kaleidoscope particle.

use glam::Vec2;

use crate::color::Color;
use crate::geometry::rotate;
use crate::surface::Surface;

/// Default rectangle painted for each particle, in surface units.
pub const DEFAULT_PARTICLE_SIZE: [f32; 2] = [20.0, 30.0];

/// Default downward step per frame.
pub const DEFAULT_FALL_SPEED: f32 = 1.0;

/// A colored rectangle that falls one step per frame.
///
/// Only `position` ever changes; rendering at rotated positions is a pure
/// projection and leaves it untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    position: Vec2,
    color: Color,
}

impl Particle {
    pub fn new(position: Vec2, color: Color) -> Self {
        Self { position, color }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Paint the particle at its own position.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, size: Vec2) {
        surface.fill_rect(self.position, size, self.color);
    }

    /// Paint the particle at its position rotated about `center` by `angle`.
    pub fn draw_at_rotated_position<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        size: Vec2,
        center: Vec2,
        angle: f32,
    ) {
        surface.fill_rect(rotate(self.position, center, angle), size, self.color);
    }

    /// Advance one frame: move down by `step`, x unchanged.
    #[inline]
    pub fn update_position(&mut self, step: f32) {
        self.position.y += step;
    }
}
