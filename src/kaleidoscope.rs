//! The kaleidoscope controller: symmetry geometry, particles and the frame step.

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::color::Color;
use crate::config::KaleidoscopeConfig;
use crate::error::ConfigError;
use crate::geometry::{rotate, SymmetryConfig, WedgeBounds};
use crate::particle::Particle;
use crate::surface::Surface;

/// Outcome of one [`Kaleidoscope::advance`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Particles dropped for leaving the wedge.
    pub culled: usize,
    /// Particles spawned to restore the target quantity.
    pub spawned: usize,
}

/// Outcome of one full [`Kaleidoscope::frame`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub step: StepStats,
    /// Live particles after the top-up.
    pub particles: usize,
    /// Rectangles painted, `particles * (corner + 1)`.
    pub paints: usize,
}

pub struct Kaleidoscope {
    config: KaleidoscopeConfig,
    symmetry: SymmetryConfig,
    wedge: WedgeBounds,
    palette: Vec<Color>,
    guide_color: Color,
    background: Color,
    particle_size: Vec2,
    particles: Vec<Particle>,
    rng: SmallRng,
}

impl Kaleidoscope {
    /// Validate `config` and derive the symmetry geometry.
    ///
    /// The particle collection starts empty; see [`populate`](Self::populate).
    pub fn new(config: KaleidoscopeConfig) -> Result<Self, ConfigError> {
        let colors = config.validate()?;
        let symmetry = config.symmetry();
        let wedge = symmetry.wedge();

        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };

        log::debug!(
            "kaleidoscope: {}x{} corner={} step={:.4} quantity={}",
            config.width,
            config.height,
            symmetry.corner_count,
            symmetry.rotation_step,
            config.quantity
        );

        Ok(Self {
            particle_size: Vec2::from(config.particle_size),
            palette: colors.palette,
            guide_color: colors.guide,
            background: colors.background,
            particles: Vec::with_capacity(config.quantity),
            symmetry,
            wedge,
            rng,
            config,
        })
    }

    pub fn config(&self) -> &KaleidoscopeConfig {
        &self.config
    }

    pub fn symmetry(&self) -> &SymmetryConfig {
        &self.symmetry
    }

    pub fn wedge(&self) -> &WedgeBounds {
        &self.wedge
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Target steady-state particle count.
    pub fn quantity(&self) -> usize {
        self.config.quantity
    }

    /// Strict containment test against the wedge.
    #[inline]
    pub fn is_in_range(&self, point: Vec2) -> bool {
        self.wedge.contains(point)
    }

    /// Random spawn position inside the wedge.
    ///
    /// `x` is uniform over `[0, center.x)` and `y` uniform between the wedge
    /// bounds at that `x`. A sample that lands exactly on a bound is culled on
    /// the next frame.
    pub fn spawn_position(&mut self) -> Vec2 {
        let x = self.rng.gen::<f32>() * self.wedge.spawn_width();
        let (min, max) = self.wedge.y_range(x);
        let y = min + self.rng.gen::<f32>() * (max - min).max(0.0);
        Vec2::new(x, y)
    }

    fn spawn(&mut self) -> Particle {
        let position = self.spawn_position();
        let color = self.palette[self.rng.gen_range(0..self.palette.len())];
        Particle::new(position, color)
    }

    /// Spawn particles until the collection reaches the target quantity.
    ///
    /// Returns how many were spawned.
    pub fn populate(&mut self) -> usize {
        let missing = self.config.quantity.saturating_sub(self.particles.len());
        for _ in 0..missing {
            let particle = self.spawn();
            self.particles.push(particle);
        }
        missing
    }

    /// Move every particle, drop the ones that left the wedge, and top up.
    pub fn advance(&mut self) -> StepStats {
        let step = self.config.fall_speed;
        for particle in &mut self.particles {
            particle.update_position(step);
        }

        let before = self.particles.len();
        let wedge = self.wedge;
        self.particles.retain(|p| wedge.contains(p.position()));
        let culled = before - self.particles.len();

        let spawned = self.populate();
        StepStats { culled, spawned }
    }

    /// Paint one guide ray per symmetry position, from the center outward.
    pub fn draw_guides<S: Surface + ?Sized>(&self, surface: &mut S) {
        let center = self.symmetry.center;
        for angle in self.symmetry.angles() {
            surface.stroke_line(center, rotate(Vec2::ZERO, center, angle), self.guide_color);
        }
    }

    /// Paint every particle directly and at each symmetry angle.
    ///
    /// Angle 0 repeats the direct draw, so each particle is painted
    /// `corner + 1` times.
    pub fn draw_particles<S: Surface + ?Sized>(&self, surface: &mut S) -> usize {
        let center = self.symmetry.center;
        let mut paints = 0;
        for particle in &self.particles {
            particle.draw(surface, self.particle_size);
            paints += 1;
            for angle in self.symmetry.angles() {
                particle.draw_at_rotated_position(surface, self.particle_size, center, angle);
                paints += 1;
            }
        }
        paints
    }

    /// Run one full frame: clear, guides, advance, draw.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) -> FrameStats {
        surface.clear();
        self.draw_guides(surface);
        let step = self.advance();
        let paints = self.draw_particles(surface);

        let stats = FrameStats {
            step,
            particles: self.particles.len(),
            paints,
        };
        log::trace!("frame: {:?}", stats);
        stats
    }
}
