//! Per-frame callback scheduling.
//!
//! A host grants at most one frame per request. [`FrameScheduler::request_frame`]
//! returns an owned [`FrameHandle`]; the requester keeps it until the frame
//! fires. Dropping a handle that has not fired cancels the request, so a torn
//! down animation can never be called back onto a disposed surface.
//!
//! ```ignore
//! let mut scheduler = ManualScheduler::new();
//! let handle = scheduler.request_frame();
//! assert_eq!(scheduler.fire_due(), 1);
//! assert!(handle.has_fired());
//! ```

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use winit::window::Window;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotState {
    Pending,
    Fired,
    Cancelled,
}

/// Owned handle to one requested frame.
#[derive(Debug)]
pub struct FrameHandle {
    slot: Rc<Cell<SlotState>>,
}

impl FrameHandle {
    /// Still waiting for the host to fire it.
    pub fn is_pending(&self) -> bool {
        self.slot.get() == SlotState::Pending
    }

    pub fn has_fired(&self) -> bool {
        self.slot.get() == SlotState::Fired
    }

    /// Cancel the request. No-op if it already fired.
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for FrameHandle {
    fn drop(&mut self) {
        if self.slot.get() == SlotState::Pending {
            self.slot.set(SlotState::Cancelled);
        }
    }
}

/// Outstanding requests shared by the scheduler implementations.
#[derive(Debug, Default)]
pub struct FrameQueue {
    slots: Vec<Rc<Cell<SlotState>>>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a new request, forgetting slots that were already cancelled.
    pub fn push(&mut self) -> FrameHandle {
        self.slots.retain(|s| s.get() == SlotState::Pending);
        let slot = Rc::new(Cell::new(SlotState::Pending));
        self.slots.push(Rc::clone(&slot));
        FrameHandle { slot }
    }

    /// Fire every live request and forget all outstanding slots.
    pub fn fire_all(&mut self) -> usize {
        let mut fired = 0;
        for slot in self.slots.drain(..) {
            if slot.get() == SlotState::Pending {
                slot.set(SlotState::Fired);
                fired += 1;
            }
        }
        fired
    }

    /// Requests that are still pending.
    pub fn pending(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| s.get() == SlotState::Pending)
            .count()
    }
}

/// A host that invokes callbacks before the next repaint.
pub trait FrameScheduler {
    /// Ask for one callback on the next tick.
    fn request_frame(&mut self) -> FrameHandle;

    /// The host tick: fire every live request. Returns how many fired.
    fn fire_due(&mut self) -> usize;

    /// Number of requests still waiting to fire.
    fn pending(&self) -> usize;

    /// Cancel a request before it fires.
    fn cancel(&mut self, handle: FrameHandle) {
        handle.cancel();
    }
}

/// Scheduler driven explicitly by the caller; used headless and in tests.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    queue: FrameQueue,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.queue.push()
    }

    fn fire_due(&mut self) -> usize {
        self.queue.fire_all()
    }

    fn pending(&self) -> usize {
        self.queue.pending()
    }
}

/// Scheduler that maps frame requests onto winit redraw requests.
pub struct WindowScheduler {
    window: Arc<Window>,
    queue: FrameQueue,
}

impl WindowScheduler {
    pub fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            queue: FrameQueue::new(),
        }
    }

    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }
}

impl FrameScheduler for WindowScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.window.request_redraw();
        self.queue.push()
    }

    fn fire_due(&mut self) -> usize {
        self.queue.fire_all()
    }

    fn pending(&self) -> usize {
        self.queue.pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_then_fire() {
        let mut s = ManualScheduler::new();
        let handle = s.request_frame();
        assert!(handle.is_pending());
        assert_eq!(s.pending(), 1);

        assert_eq!(s.fire_due(), 1);
        assert!(handle.has_fired());
        assert_eq!(s.pending(), 0);
    }

    #[test]
    fn test_cancel_prevents_firing() {
        let mut s = ManualScheduler::new();
        let handle = s.request_frame();
        s.cancel(handle);

        assert_eq!(s.pending(), 0);
        assert_eq!(s.fire_due(), 0);
    }

    #[test]
    fn test_drop_cancels() {
        let mut s = ManualScheduler::new();
        {
            let _handle = s.request_frame();
        }
        assert_eq!(s.fire_due(), 0);
    }

    #[test]
    fn test_dropping_fired_handle_is_harmless() {
        let mut s = ManualScheduler::new();
        let handle = s.request_frame();
        s.fire_due();
        drop(handle);
        assert_eq!(s.fire_due(), 0);
    }

    #[test]
    fn test_cancelled_slots_are_pruned() {
        let mut queue = FrameQueue::new();
        for _ in 0..1000 {
            let handle = queue.push();
            handle.cancel();
        }
        assert!(queue.slots.len() <= 1);

        let live = queue.push();
        assert_eq!(queue.slots.len(), 1);
        assert_eq!(queue.fire_all(), 1);
        assert!(live.has_fired());
    }

    #[test]
    fn test_fire_only_once() {
        let mut s = ManualScheduler::new();
        let handle = s.request_frame();
        assert_eq!(s.fire_due(), 1);
        assert_eq!(s.fire_due(), 0);
        assert!(handle.has_fired());
    }
}
