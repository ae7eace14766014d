//! Scroll-driven section animation, independent of the DOM.
//!
//! The browser side lives in [`crate::dom`] and
//! [`crate::components::showcase`]; everything here is driven by explicit
//! viewport values and timestamps.

pub mod animator;
pub mod hero;
pub mod mapping;
pub mod throttle;

pub use animator::{
    FrameReport, Section, SectionGeometry, SectionProgressAnimator, StyleSink, Viewport,
};
pub use mapping::Phase;
pub use throttle::FrameThrottle;
