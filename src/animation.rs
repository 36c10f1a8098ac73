//! Frame-driven lifecycle around a [`Kaleidoscope`].
//!
//! An [`Animation`] owns the controller, a [`FrameScheduler`] and at most one
//! pending [`FrameHandle`]. The host calls [`start`](Animation::start) when the
//! surface becomes available, [`tick`](Animation::tick) whenever its scheduler
//! signals a repaint, and [`stop`](Animation::stop) (or simply drops the
//! animation) on teardown.

use crate::config::KaleidoscopeConfig;
use crate::error::ConfigError;
use crate::kaleidoscope::{FrameStats, Kaleidoscope};
use crate::scheduler::{FrameHandle, FrameScheduler};
use crate::surface::Surface;

pub struct Animation<Sch: FrameScheduler> {
    kaleidoscope: Kaleidoscope,
    scheduler: Sch,
    pending: Option<FrameHandle>,
    frames: u64,
    last_stats: FrameStats,
}

impl<Sch: FrameScheduler> Animation<Sch> {
    pub fn new(kaleidoscope: Kaleidoscope, scheduler: Sch) -> Self {
        Self {
            kaleidoscope,
            scheduler,
            pending: None,
            frames: 0,
            last_stats: FrameStats::default(),
        }
    }

    /// Build the controller from `config` and wrap it.
    pub fn from_config(config: KaleidoscopeConfig, scheduler: Sch) -> Result<Self, ConfigError> {
        Ok(Self::new(Kaleidoscope::new(config)?, scheduler))
    }

    pub fn kaleidoscope(&self) -> &Kaleidoscope {
        &self.kaleidoscope
    }

    pub fn scheduler(&self) -> &Sch {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut Sch {
        &mut self.scheduler
    }

    /// A frame is scheduled and has not fired yet.
    pub fn is_running(&self) -> bool {
        self.pending.as_ref().is_some_and(FrameHandle::is_pending)
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    pub fn last_stats(&self) -> FrameStats {
        self.last_stats
    }

    /// Mount: cancel any outstanding frame, populate, render and schedule.
    pub fn start<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.stop();
        let spawned = self.kaleidoscope.populate();
        log::info!(
            "animation started: {} particles, corner {}",
            spawned,
            self.kaleidoscope.symmetry().corner_count
        );
        self.render(surface);
    }

    /// Run one frame if our scheduled frame fired on this host tick.
    ///
    /// Returns whether a frame was rendered.
    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S) -> bool {
        self.scheduler.fire_due();
        match self.pending.take() {
            Some(handle) if handle.has_fired() => {
                self.render(surface);
                true
            }
            other => {
                self.pending = other;
                false
            }
        }
    }

    /// Unmount: cancel the outstanding frame, if any.
    pub fn stop(&mut self) {
        if let Some(handle) = self.pending.take() {
            if handle.is_pending() {
                log::info!("animation stopped after {} frames", self.frames);
            }
            self.scheduler.cancel(handle);
        }
    }

    /// Replace the configuration and restart from an empty particle set.
    ///
    /// On error the current animation keeps running unchanged.
    pub fn reconfigure<S: Surface + ?Sized>(
        &mut self,
        config: KaleidoscopeConfig,
        surface: &mut S,
    ) -> Result<(), ConfigError> {
        let kaleidoscope = Kaleidoscope::new(config)?;
        self.stop();
        self.kaleidoscope = kaleidoscope;
        self.start(surface);
        Ok(())
    }

    fn render<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.last_stats = self.kaleidoscope.frame(surface);
        self.frames += 1;
        self.pending = Some(self.scheduler.request_frame());
    }
}
