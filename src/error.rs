//! Error types for the kaleidoscope.
//!
//! Configuration problems are rejected when a [`Kaleidoscope`](crate::Kaleidoscope)
//! is built, so the per-frame path never has to deal with them. The remaining
//! errors come from the window/GPU host and from PNG export.

use std::fmt;

/// A color string that could not be parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorError {
    /// The rejected input.
    pub input: String,
}

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid color '{}'. Expected #rgb, #rrggbb, #rrggbbaa, rgb(r, g, b), rgba(r, g, b, a) or a basic color name.",
            self.input
        )
    }
}

impl std::error::Error for ColorError {}

/// Errors raised while validating or loading a configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// Fewer than three corners; the wedge would be empty or degenerate.
    InvalidCorner(u32),
    /// Width or height is not a positive finite number.
    InvalidDimensions { width: f32, height: f32 },
    /// Width or height exceeds the largest supported surface.
    DimensionsTooLarge { width: f32, height: f32 },
    /// Target particle count is zero.
    ZeroQuantity,
    /// Target particle count exceeds the supported maximum.
    QuantityTooLarge(usize),
    /// The palette contains no colors.
    EmptyPalette,
    /// A palette, guide or background color failed to parse.
    InvalidColor(ColorError),
    /// Particle rectangle size is not positive and finite.
    InvalidParticleSize([f32; 2]),
    /// Per-frame fall step is not positive and finite.
    InvalidFallSpeed(f32),
    /// The derived containment wedge has no area.
    DegenerateWedge,
    /// Failed to read or write a config file.
    Io(std::io::Error),
    /// Config file is not valid JSON for this schema.
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidCorner(c) => {
                write!(f, "Corner count must be at least 3, got {}", c)
            }
            ConfigError::InvalidDimensions { width, height } => write!(
                f,
                "Surface dimensions must be positive, got {}x{}",
                width, height
            ),
            ConfigError::DimensionsTooLarge { width, height } => write!(
                f,
                "Surface dimensions must be at most {}, got {}x{}",
                crate::config::MAX_DIMENSION,
                width,
                height
            ),
            ConfigError::ZeroQuantity => write!(f, "Particle quantity must be at least 1"),
            ConfigError::QuantityTooLarge(q) => write!(
                f,
                "Particle quantity must be at most {}, got {}",
                crate::config::MAX_QUANTITY,
                q
            ),
            ConfigError::EmptyPalette => write!(f, "At least one particle color is required"),
            ConfigError::InvalidColor(e) => write!(f, "{}", e),
            ConfigError::InvalidParticleSize([w, h]) => {
                write!(f, "Particle size must be positive, got {}x{}", w, h)
            }
            ConfigError::InvalidFallSpeed(s) => {
                write!(f, "Fall speed must be positive, got {}", s)
            }
            ConfigError::DegenerateWedge => write!(
                f,
                "The containment wedge for this corner count and surface size has no area"
            ),
            ConfigError::Io(e) => write!(f, "Failed to access config file: {}", e),
            ConfigError::Parse(e) => write!(f, "Failed to parse config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidColor(e) => Some(e),
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ColorError> for ConfigError {
    fn from(e: ColorError) -> Self {
        ConfigError::InvalidColor(e)
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Errors raised while setting up the window renderer.
#[derive(Debug)]
pub enum GpuError {
    /// The window could not be turned into a presentable surface.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No adapter can present to the window surface.
    NoAdapter,
    /// The adapter refused to open a device.
    DeviceCreation(wgpu::RequestDeviceError),
    /// The surface reports no usable texture format.
    NoSurfaceFormat,
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => {
                write!(f, "Cannot present the kaleidoscope window: {}", e)
            }
            GpuError::NoAdapter => write!(
                f,
                "No graphics adapter can draw to the kaleidoscope window"
            ),
            GpuError::DeviceCreation(e) => {
                write!(f, "Graphics adapter refused the renderer device: {}", e)
            }
            GpuError::NoSurfaceFormat => {
                write!(f, "Window surface offers no texture format to draw into")
            }
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}

/// Errors that can occur when running the windowed animation.
#[derive(Debug)]
pub enum RunError {
    /// Invalid configuration.
    Config(ConfigError),
    /// Failed to create event loop.
    EventLoop(winit::error::EventLoopError),
    /// Failed to create window.
    Window(winit::error::OsError),
    /// GPU initialization failed.
    Gpu(GpuError),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::Config(e) => write!(f, "Configuration error: {}", e),
            RunError::EventLoop(e) => write!(f, "Failed to create event loop: {}", e),
            RunError::Window(e) => write!(f, "Failed to create window: {}", e),
            RunError::Gpu(e) => write!(f, "GPU error: {}", e),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RunError::Config(e) => Some(e),
            RunError::EventLoop(e) => Some(e),
            RunError::Window(e) => Some(e),
            RunError::Gpu(e) => Some(e),
        }
    }
}

impl From<ConfigError> for RunError {
    fn from(e: ConfigError) -> Self {
        RunError::Config(e)
    }
}

impl From<winit::error::EventLoopError> for RunError {
    fn from(e: winit::error::EventLoopError) -> Self {
        RunError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for RunError {
    fn from(e: winit::error::OsError) -> Self {
        RunError::Window(e)
    }
}

impl From<GpuError> for RunError {
    fn from(e: GpuError) -> Self {
        RunError::Gpu(e)
    }
}

/// Errors that can occur while exporting frames to PNG.
#[derive(Debug)]
pub enum ExportError {
    /// Invalid configuration.
    Config(ConfigError),
    /// Failed to encode an image.
    Image(image::ImageError),
    /// Failed to create the output directory.
    Io(std::io::Error),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Config(e) => write!(f, "Configuration error: {}", e),
            ExportError::Image(e) => write!(f, "Failed to write image: {}", e),
            ExportError::Io(e) => write!(f, "Failed to prepare output directory: {}", e),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Config(e) => Some(e),
            ExportError::Image(e) => Some(e),
            ExportError::Io(e) => Some(e),
        }
    }
}

impl From<ConfigError> for ExportError {
    fn from(e: ConfigError) -> Self {
        ExportError::Config(e)
    }
}

impl From<image::ImageError> for ExportError {
    fn from(e: image::ImageError) -> Self {
        ExportError::Image(e)
    }
}

impl From<std::io::Error> for ExportError {
    fn from(e: std::io::Error) -> Self {
        ExportError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gpu_messages_name_the_window() {
        let msg = GpuError::NoAdapter.to_string();
        assert!(msg.contains("kaleidoscope window"), "{}", msg);
        assert!(GpuError::NoSurfaceFormat.to_string().contains("texture format"));
    }

    #[test]
    fn test_limit_messages_report_the_bound() {
        let msg = ConfigError::QuantityTooLarge(1 << 40).to_string();
        assert!(msg.contains("100000"), "{}", msg);

        let msg = ConfigError::DimensionsTooLarge {
            width: 1e9,
            height: 10.0,
        }
        .to_string();
        assert!(msg.contains("16384"), "{}", msg);
    }
}
