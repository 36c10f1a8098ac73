//! Headless rendering to a PNG frame sequence.
//!
//! ```ignore
//! let paths = export_frames(KaleidoscopeConfig::default(), 120, "frames")?;
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::animation::Animation;
use crate::config::KaleidoscopeConfig;
use crate::error::ExportError;
use crate::raster::RasterSurface;
use crate::scheduler::ManualScheduler;

/// Render `frames` frames and write them as `frame_0000.png`, ... into `dir`.
///
/// The directory is created if missing. Returns the written paths in order.
pub fn export_frames<P: AsRef<Path>>(
    config: KaleidoscopeConfig,
    frames: u32,
    dir: P,
) -> Result<Vec<PathBuf>, ExportError> {
    let dir = dir.as_ref();
    let (width, height) = (config.width.ceil() as u32, config.height.ceil() as u32);
    let mut animation = Animation::from_config(config, ManualScheduler::new())?;
    let mut surface = RasterSurface::new(width, height, animation.kaleidoscope().background());

    fs::create_dir_all(dir)?;
    let mut paths = Vec::with_capacity(frames as usize);

    for i in 0..frames {
        if i == 0 {
            animation.start(&mut surface);
        } else {
            animation.tick(&mut surface);
        }
        let path = dir.join(format!("frame_{:04}.png", i));
        surface.save_png(&path)?;
        paths.push(path);
    }
    animation.stop();

    log::info!("exported {} frames to {}", paths.len(), dir.display());
    Ok(paths)
}
