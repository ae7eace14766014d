use log::debug;

use super::mapping::{clamp_unit, content_frame, ContentStyle, Phase, PRE_ENTRY};

/// Something the animator can style. In the browser this is an `HtmlElement`.
pub trait StyleSink {
    fn set_opacity(&self, opacity: f64);
    fn set_transform(&self, transform: &str);
    fn set_filter(&self, filter: &str);
    fn set_class(&self, class: &str, present: bool);
    /// `None` clears the phase marker.
    fn set_phase(&self, phase: Option<Phase>);
}

/// Vertical extent of a section in document coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionGeometry {
    pub top: f64,
    pub height: f64,
}

impl SectionGeometry {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    /// Converts a viewport-relative box (`getBoundingClientRect`) into
    /// document coordinates. Collapsed boxes count as unmeasured.
    pub fn from_client_rect(rect_top: f64, rect_height: f64, scroll_y: f64) -> Option<Self> {
        (rect_height > 0.0).then(|| Self::new(rect_top + scroll_y, rect_height))
    }

    pub fn contains(&self, y: f64) -> bool {
        self.height > 0.0 && y >= self.top && y < self.top + self.height
    }

    pub fn progress_at(&self, y: f64) -> f64 {
        clamp_unit((y - self.top) / self.height)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub scroll_y: f64,
    pub width: f64,
    pub height: f64,
}

pub struct Section<N> {
    /// `None` until the host could measure the section.
    pub geometry: Option<SectionGeometry>,
    pub content: N,
    pub image: Option<N>,
}

impl<N: StyleSink> Section<N> {
    pub fn new(geometry: Option<SectionGeometry>, content: N, image: Option<N>) -> Self {
        Self { geometry, content, image }
    }

    fn active_at(&self, y: f64) -> Option<f64> {
        self.geometry
            .filter(|geometry| geometry.contains(y))
            .map(|geometry| geometry.progress_at(y))
    }

    fn set_image_visible(&self, visible: bool) {
        if let Some(image) = &self.image {
            image.set_opacity(if visible { 1.0 } else { 0.0 });
        }
    }

    fn apply_style(&self, style: &ContentStyle) {
        self.content.set_transform(&style.transform());
        self.content.set_opacity(style.opacity);
        self.content.set_filter(&style.filter());
    }

    fn reset(&self) {
        self.apply_style(&PRE_ENTRY);
        self.content.set_phase(None);
    }

    fn animate(&self, progress: f64) {
        let frame = content_frame(progress);
        self.apply_style(&frame.style);
        for (class, present) in frame.class_changes() {
            if let Some(present) = present {
                self.content.set_class(class, present);
            }
        }
        self.content.set_phase(Some(frame.phase));
    }
}

/// Suppresses repeated transition handling for a while after a section
/// becomes active.
#[derive(Clone, Copy, Debug, Default)]
pub struct TransitionLock {
    duration_ms: f64,
    locked_until: Option<f64>,
}

impl TransitionLock {
    pub fn new(duration_ms: f64) -> Self {
        Self { duration_ms, locked_until: None }
    }

    pub fn is_engaged(&self, now_ms: f64) -> bool {
        matches!(self.locked_until, Some(until) if now_ms < until)
    }

    /// Engages the lock unless it already is. Returns whether it was engaged
    /// by this call.
    pub fn try_engage(&mut self, now_ms: f64) -> bool {
        if self.is_engaged(now_ms) {
            return false;
        }
        self.locked_until = Some(now_ms + self.duration_ms);
        true
    }
}

/// What a single tick did.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameReport {
    pub active: Option<usize>,
    pub progress: Option<f64>,
    /// A new section became active and the transition lock was free.
    pub transition_started: bool,
}

pub struct SectionProgressAnimator<N> {
    sections: Vec<Section<N>>,
    current: Option<usize>,
    lock: TransitionLock,
}

impl<N: StyleSink> SectionProgressAnimator<N> {
    /// Puts every section into its starting look: first image shown, the
    /// rest hidden, all content panels in the pre-entry style.
    pub fn new(sections: Vec<Section<N>>, transition_lock_ms: f64) -> Self {
        for (index, section) in sections.iter().enumerate() {
            section.set_image_visible(index == 0);
            section.reset();
        }
        debug!("Section animator tracking {} sections", sections.len());

        Self {
            sections,
            current: None,
            lock: TransitionLock::new(transition_lock_ms),
        }
    }

    /// Index of the last section that was active, if any.
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Index of the section whose bounds contain `scroll_y`. Sections are
    /// scanned in order, so with overlapping bounds the first one wins.
    pub fn active_index(&self, scroll_y: f64) -> Option<usize> {
        self.sections
            .iter()
            .position(|section| section.active_at(scroll_y).is_some())
    }

    /// Recomputes every section's style for the given viewport.
    pub fn tick(&mut self, viewport: Viewport, now_ms: f64) -> FrameReport {
        let y = viewport.scroll_y;
        let active = self.active_index(y);
        let mut progress = None;

        for (index, section) in self.sections.iter().enumerate() {
            if Some(index) == active {
                let p = section.active_at(y).unwrap_or_default();
                section.set_image_visible(true);
                section.animate(p);
                progress = Some(p);
            } else {
                // With nothing active the images keep whatever was last shown.
                if active.is_some() {
                    section.set_image_visible(false);
                }
                section.reset();
            }
        }

        let mut transition_started = false;
        if let Some(index) = active {
            if self.current != Some(index) {
                transition_started = self.lock.try_engage(now_ms);
                if !transition_started {
                    debug!("Section {} active while transition lock is held", index);
                }
            }
            self.current = Some(index);
        }

        FrameReport {
            active,
            progress,
            transition_started,
        }
    }

    /// Replaces the stored geometry. Extra values are ignored, missing ones
    /// leave the section unmeasured.
    pub fn relayout<I>(&mut self, geometries: I)
    where
        I: IntoIterator<Item = Option<SectionGeometry>>,
    {
        let mut geometries = geometries.into_iter();
        for section in &mut self.sections {
            section.geometry = geometries.next().flatten();
        }
    }

    /// Relayout followed by an immediate tick so styles never lag the layout.
    pub fn resize<I>(&mut self, geometries: I, viewport: Viewport, now_ms: f64) -> FrameReport
    where
        I: IntoIterator<Item = Option<SectionGeometry>>,
    {
        self.relayout(geometries);
        self.tick(viewport, now_ms)
    }
}
