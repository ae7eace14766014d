use log::Level;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Verbose section tracking when running locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

/// Timing knobs for the services showcase. All durations in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimatorConfig {
    /// How long a section change blocks the next transition.
    pub transition_lock_ms: u32,
    /// Quiet time after the last scroll event before `scrolling` is removed from the body.
    pub scroll_idle_ms: u32,
    /// Quiet time after the last resize event before sections are measured again.
    pub resize_settle_ms: u32,
    /// Delay between mount and the first measurement, so layout can settle.
    pub startup_delay_ms: u32,
    pub smooth_scroll: bool,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            transition_lock_ms: 800,
            scroll_idle_ms: 150,
            resize_settle_ms: 100,
            startup_delay_ms: 100,
            smooth_scroll: true,
        }
    }
}
