//! Scroll progress to content style mapping.
//!
//! A section's content panel goes through three phases while the viewport
//! scrolls across the section:
//!
//! - `0.0..=0.3` slides up from below, fading in and sharpening
//! - `0.3..=0.7` stays vertically centered, fully visible
//! - `0.7..=1.0` slides further up, fading out and blurring slightly
//!
//! Entering ends at -50px while settled pins the panel at `translateY(-50%)`,
//! so the vertical offset jumps at 0.3. Opacity and blur are continuous there.

const ENTER_END: f64 = 0.3;
const SETTLE_END: f64 = 0.7;
const EXIT_SPAN: f64 = 1.0 - SETTLE_END;

/// `animate-in` is only added once the entering slide passed this fraction.
const REVEAL_AT: f64 = 0.1;

pub const ANIMATE_IN: &str = "animate-in";
pub const ANIMATE_OUT: &str = "animate-out";

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Offset {
    /// Absolute vertical translation in pixels.
    Px(f64),
    /// Centered on the panel's own height (`translateY(-50%)`).
    Centered,
}

impl Offset {
    pub fn to_css(self) -> String {
        match self {
            Offset::Px(px) => format!("translateY({}px)", px),
            Offset::Centered => "translateY(-50%)".to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Entering,
    Settled,
    Exiting,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Entering => "entering",
            Phase::Settled => "settled",
            Phase::Exiting => "exiting",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContentStyle {
    pub offset: Offset,
    pub opacity: f64,
    pub blur_px: f64,
}

impl ContentStyle {
    pub fn transform(&self) -> String {
        self.offset.to_css()
    }

    pub fn filter(&self) -> String {
        format!("blur({}px)", self.blur_px)
    }
}

/// Style of a content panel whose section is not in view.
pub const PRE_ENTRY: ContentStyle = ContentStyle {
    offset: Offset::Px(100.0),
    opacity: 0.0,
    blur_px: 10.0,
};

/// Output of [`content_frame`] for a single progress value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContentFrame {
    pub style: ContentStyle,
    pub phase: Phase,
    /// Whether `animate-in` should be present after this frame. While
    /// entering, `false` means "leave as is" rather than "remove".
    pub animate_in: bool,
}

impl ContentFrame {
    /// Class changes for this frame. `None` leaves the class untouched.
    pub fn class_changes(&self) -> [(&'static str, Option<bool>); 2] {
        match self.phase {
            Phase::Entering => [
                (ANIMATE_IN, self.animate_in.then_some(true)),
                (ANIMATE_OUT, Some(false)),
            ],
            Phase::Settled => [(ANIMATE_IN, Some(true)), (ANIMATE_OUT, Some(false))],
            Phase::Exiting => [(ANIMATE_IN, Some(false)), (ANIMATE_OUT, Some(true))],
        }
    }
}

/// Maps progress through a section to the content panel's frame.
///
/// `progress` is clamped to `[0, 1]` (NaN counts as 0). The boundaries 0.3
/// and 0.7 belong to the earlier phase.
pub fn content_frame(progress: f64) -> ContentFrame {
    let progress = clamp_unit(progress);

    if progress <= ENTER_END {
        let t = clamp_unit(progress / ENTER_END);
        ContentFrame {
            style: ContentStyle {
                offset: Offset::Px(100.0 - t * 150.0),
                opacity: t,
                blur_px: 10.0 - t * 10.0,
            },
            phase: Phase::Entering,
            animate_in: t > REVEAL_AT,
        }
    } else if progress <= SETTLE_END {
        ContentFrame {
            style: ContentStyle {
                offset: Offset::Centered,
                opacity: 1.0,
                blur_px: 0.0,
            },
            phase: Phase::Settled,
            animate_in: true,
        }
    } else {
        // 1.0 - 0.7 is not exactly 0.3 in binary; keep t inside [0, 1].
        let t = clamp_unit((progress - SETTLE_END) / EXIT_SPAN);
        ContentFrame {
            style: ContentStyle {
                offset: Offset::Px(-50.0 - t * 100.0),
                opacity: 1.0 - t,
                blur_px: t * 5.0,
            },
            phase: Phase::Exiting,
            animate_in: false,
        }
    }
}

pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn px(frame: &ContentFrame) -> f64 {
        match frame.style.offset {
            Offset::Px(px) => px,
            Offset::Centered => panic!("expected pixel offset, got centered"),
        }
    }

    #[test]
    fn start_of_section_is_pre_entry_look() {
        let frame = content_frame(0.0);
        assert_eq!(frame.phase, Phase::Entering);
        assert_eq!(frame.style.offset, Offset::Px(100.0));
        assert_eq!(frame.style.opacity, 0.0);
        assert_eq!(frame.style.blur_px, 10.0);
        assert!(!frame.animate_in);
    }

    #[test]
    fn end_of_section_is_faded_out() {
        let frame = content_frame(1.0);
        assert_eq!(frame.phase, Phase::Exiting);
        assert!((px(&frame) + 150.0).abs() < EPS);
        assert!(frame.style.opacity.abs() < EPS);
        assert!((frame.style.blur_px - 5.0).abs() < EPS);
    }

    #[test]
    fn middle_is_settled_and_centered() {
        let frame = content_frame(0.5);
        assert_eq!(frame.phase, Phase::Settled);
        assert_eq!(frame.style.offset, Offset::Centered);
        assert_eq!(frame.style.opacity, 1.0);
        assert_eq!(frame.style.blur_px, 0.0);
    }

    #[test]
    fn boundaries_belong_to_earlier_phase() {
        let at_enter_end = content_frame(0.3);
        assert_eq!(at_enter_end.phase, Phase::Entering);
        assert!((px(&at_enter_end) + 50.0).abs() < EPS);
        assert!((at_enter_end.style.opacity - 1.0).abs() < EPS);
        assert!(at_enter_end.style.blur_px.abs() < EPS);

        assert_eq!(content_frame(0.7).phase, Phase::Settled);
        assert_eq!(content_frame(0.7000001).phase, Phase::Exiting);
        assert_eq!(content_frame(0.3000001).phase, Phase::Settled);
    }

    #[test]
    fn opacity_and_blur_stay_in_range() {
        for step in 0..=1000 {
            let frame = content_frame(step as f64 / 1000.0);
            assert!((0.0..=1.0).contains(&frame.style.opacity), "step {step}");
            assert!(frame.style.blur_px >= 0.0, "step {step}");
        }
    }

    #[test]
    fn out_of_range_progress_is_clamped() {
        assert_eq!(content_frame(-3.0), content_frame(0.0));
        assert_eq!(content_frame(7.5), content_frame(1.0));
        assert_eq!(content_frame(f64::NAN), content_frame(0.0));
    }

    #[test]
    fn animate_in_waits_for_a_tenth_of_the_slide() {
        assert!(!content_frame(0.02).animate_in);
        assert!(content_frame(0.05).animate_in);

        let early = content_frame(0.01).class_changes();
        assert_eq!(early, [(ANIMATE_IN, None), (ANIMATE_OUT, Some(false))]);

        let exiting = content_frame(0.9).class_changes();
        assert_eq!(exiting, [(ANIMATE_IN, Some(false)), (ANIMATE_OUT, Some(true))]);
    }

    #[test]
    fn css_rendering() {
        assert_eq!(PRE_ENTRY.transform(), "translateY(100px)");
        assert_eq!(PRE_ENTRY.filter(), "blur(10px)");
        assert_eq!(content_frame(0.5).style.transform(), "translateY(-50%)");
        assert_eq!(Offset::Px(-12.5).to_css(), "translateY(-12.5px)");
    }
}
