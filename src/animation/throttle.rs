use super::animator::Viewport;

/// Coalesces scroll events into at most one update per animation frame.
///
/// The first event of a frame window asks the host to schedule a frame;
/// later events only replace the stored viewport. When the frame runs it
/// takes the latest viewport and reopens the window.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameThrottle {
    scheduled: bool,
    latest: Option<Viewport>,
    // Host handle of the requested frame, for cancelling it on teardown.
    pending: Option<i32>,
}

impl FrameThrottle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the caller has to request an animation frame.
    pub fn on_scroll(&mut self, viewport: Viewport) -> bool {
        self.latest = Some(viewport);
        if self.scheduled {
            return false;
        }
        self.scheduled = true;
        true
    }

    pub fn set_pending(&mut self, handle: i32) {
        self.pending = Some(handle);
    }

    /// Called from the frame callback.
    pub fn take_frame(&mut self) -> Option<Viewport> {
        self.scheduled = false;
        self.pending = None;
        self.latest.take()
    }

    /// Drops any scheduled frame. Returns the handle the host still has to
    /// cancel, if a frame was requested and has not run.
    pub fn cancel(&mut self) -> Option<i32> {
        self.scheduled = false;
        self.latest = None;
        self.pending.take()
    }
}
