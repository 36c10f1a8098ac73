//! # Kaleidoscope
//!
//! An animated kaleidoscope: colored rectangles fall through a wedge-shaped
//! region radiating from the center of a 2D surface, and every particle is
//! painted again at each of `corner` rotational symmetry positions.
//!
//! ## Quick Start
//!
//! ```ignore
//! use kaleidoscope::prelude::*;
//!
//! fn main() -> Result<(), RunError> {
//!     let config = KaleidoscopeConfig::new()
//!         .with_corner(8)
//!         .with_quantity(30);
//!     kaleidoscope::run(config)
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Geometry
//!
//! The rotation step is `TAU / corner`. The containment wedge is bounded by
//! three lines through the surface origin, the center, and the origin rotated
//! once by the step. See [`geometry`].
//!
//! ### Frames
//!
//! Each frame the [`Kaleidoscope`] clears the surface, draws the guide rays,
//! moves every particle down one step, drops the ones that left the wedge,
//! spawns replacements, and paints the survivors at every symmetry angle.
//!
//! ### Hosts
//!
//! Drawing goes through the [`Surface`] trait and frame pacing through the
//! [`FrameScheduler`] trait. An [`Animation`] ties them to a controller:
//!
//! | Host | Surface | Scheduler |
//! |------|---------|-----------|
//! | [`run`] (window) | [`DrawList`] presented by wgpu | [`WindowScheduler`] |
//! | [`export_frames`] (PNG) | [`RasterSurface`] | [`ManualScheduler`] |
//! | tests | [`DrawList`] | [`ManualScheduler`] |

pub mod animation;
pub mod color;
pub mod config;
pub mod error;
pub mod export;
pub mod geometry;
mod gpu;
pub mod kaleidoscope;
pub mod particle;
pub mod raster;
pub mod scheduler;
pub mod surface;
pub mod time;
mod window;

pub use animation::Animation;
pub use color::Color;
pub use config::KaleidoscopeConfig;
pub use error::{ColorError, ConfigError, ExportError, GpuError, RunError};
pub use export::export_frames;
pub use geometry::{rotate, SymmetryConfig, WedgeBounds, WedgeLayout};
pub use glam::Vec2;
pub use gpu::GpuRenderer;
pub use kaleidoscope::{FrameStats, Kaleidoscope, StepStats};
pub use particle::Particle;
pub use raster::RasterSurface;
pub use scheduler::{FrameHandle, FrameScheduler, ManualScheduler, WindowScheduler};
pub use surface::{DrawCommand, DrawList, Surface};
pub use time::FrameClock;
pub use window::run;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use kaleidoscope::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        export_frames, run, Animation, Color, ConfigError, DrawList, ExportError, FrameScheduler,
        Kaleidoscope, KaleidoscopeConfig, ManualScheduler, RasterSurface, RunError, Surface, Vec2,
    };
}
