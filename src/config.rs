//! Kaleidoscope configuration.
//!
//! Every field has a default, so a config file only needs to list what it
//! changes:
//!
//! ```json
//! { "corner": 8, "quantity": 40, "colors": ["#2E86AB", "rgb(242, 66, 54)"] }
//! ```
//!
//! The same settings can be built in code:
//!
//! ```ignore
//! let config = KaleidoscopeConfig::new()
//!     .with_corner(8)
//!     .with_size(800.0, 600.0)
//!     .with_quantity(40);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::{Color, DEFAULT_BACKGROUND, DEFAULT_GUIDE_COLOR, DEFAULT_PALETTE};
use crate::error::ConfigError;
use crate::geometry::SymmetryConfig;
use crate::particle::{DEFAULT_FALL_SPEED, DEFAULT_PARTICLE_SIZE};

/// Largest accepted steady-state particle count.
pub const MAX_QUANTITY: usize = 100_000;

/// Largest accepted surface width or height, in pixels.
pub const MAX_DIMENSION: f32 = 16_384.0;

/// Settings for one kaleidoscope.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct KaleidoscopeConfig {
    /// Particle colors; each particle picks one at random.
    pub colors: Vec<String>,
    /// Rotational symmetry order.
    pub corner: u32,
    pub width: f32,
    pub height: f32,
    /// Steady-state particle count.
    pub quantity: usize,
    /// Width and height of each particle rectangle.
    pub particle_size: [f32; 2],
    /// Downward step per frame.
    pub fall_speed: f32,
    pub guide_color: String,
    pub background: String,
    /// Fixed RNG seed for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for KaleidoscopeConfig {
    fn default() -> Self {
        Self {
            colors: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            corner: 6,
            width: 500.0,
            height: 500.0,
            quantity: 10,
            particle_size: DEFAULT_PARTICLE_SIZE,
            fall_speed: DEFAULT_FALL_SPEED,
            guide_color: DEFAULT_GUIDE_COLOR.to_string(),
            background: DEFAULT_BACKGROUND.to_string(),
            seed: None,
        }
    }
}

/// Parsed colors of a validated config.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedColors {
    pub palette: Vec<Color>,
    pub guide: Color,
    pub background: Color,
}

impl KaleidoscopeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.colors = colors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_corner(mut self, corner: u32) -> Self {
        self.corner = corner;
        self
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_quantity(mut self, quantity: usize) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_particle_size(mut self, width: f32, height: f32) -> Self {
        self.particle_size = [width, height];
        self
    }

    pub fn with_fall_speed(mut self, speed: f32) -> Self {
        self.fall_speed = speed;
        self
    }

    pub fn with_guide_color(mut self, color: impl Into<String>) -> Self {
        self.guide_color = color.into();
        self
    }

    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background = color.into();
        self
    }

    /// Seed the particle RNG so runs are reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every precondition and parse the colors.
    pub fn validate(&self) -> Result<ResolvedColors, ConfigError> {
        if self.corner < 3 {
            return Err(ConfigError::InvalidCorner(self.corner));
        }
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(self.width) || !positive(self.height) {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.width > MAX_DIMENSION || self.height > MAX_DIMENSION {
            return Err(ConfigError::DimensionsTooLarge {
                width: self.width,
                height: self.height,
            });
        }
        if self.quantity == 0 {
            return Err(ConfigError::ZeroQuantity);
        }
        if self.quantity > MAX_QUANTITY {
            return Err(ConfigError::QuantityTooLarge(self.quantity));
        }
        if !self.particle_size.iter().all(|&v| positive(v)) {
            return Err(ConfigError::InvalidParticleSize(self.particle_size));
        }
        if !positive(self.fall_speed) {
            return Err(ConfigError::InvalidFallSpeed(self.fall_speed));
        }
        if self.colors.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }

        let palette = self
            .colors
            .iter()
            .map(|c| Color::parse(c))
            .collect::<Result<Vec<_>, _>>()?;
        let guide = Color::parse(&self.guide_color)?;
        let background = Color::parse(&self.background)?;

        if !self.symmetry().wedge().has_area() {
            return Err(ConfigError::DegenerateWedge);
        }

        Ok(ResolvedColors {
            palette,
            guide,
            background,
        })
    }

    /// Symmetry derived from the surface size and corner count.
    ///
    /// Only meaningful once `corner` is non-zero.
    pub fn symmetry(&self) -> SymmetryConfig {
        SymmetryConfig::new(self.width, self.height, self.corner)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a config from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Save the config as pretty-printed JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        fs::write(path, self.to_json_string()?)?;
        Ok(())
    }
}
