use log::warn;
use thiserror::Error;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{js_sys, EventTarget, HtmlElement, HtmlImageElement, Window};

use crate::animation::hero::hero_height;
use crate::animation::{Phase, SectionGeometry, StyleSink, Viewport};

#[derive(Debug, Error)]
pub enum DomError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("document has no body")]
    NoBody,
    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        DomError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

pub fn window() -> Result<Window, DomError> {
    web_sys::window().ok_or(DomError::NoWindow)
}

pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

pub fn read_viewport(window: &Window) -> Result<Viewport, DomError> {
    Ok(Viewport {
        scroll_y: window.scroll_y()?,
        width: window.inner_width()?.as_f64().unwrap_or_default(),
        height: window.inner_height()?.as_f64().unwrap_or_default(),
    })
}

/// Layout box of a section in document coordinates, comparable with
/// `scroll_y`. Collapsed elements count as unmeasured.
pub fn measure(element: &HtmlElement, scroll_y: f64) -> Option<SectionGeometry> {
    let rect = element.get_bounding_client_rect();
    SectionGeometry::from_client_rect(rect.top(), rect.height(), scroll_y)
}

pub fn set_body_class(window: &Window, class: &str, present: bool) -> Result<(), DomError> {
    let body = window
        .document()
        .ok_or(DomError::NoDocument)?
        .body()
        .ok_or(DomError::NoBody)?;
    let classes = body.class_list();
    if present {
        classes.add_1(class)?;
    } else {
        classes.remove_1(class)?;
    }
    Ok(())
}

pub fn enable_smooth_scroll(window: &Window) -> Result<(), DomError> {
    let root = window
        .document()
        .ok_or(DomError::NoDocument)?
        .document_element()
        .ok_or(DomError::NoDocument)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| DomError::Js("document element is not an HTML element".to_string()))?;
    root.style().set_property("scroll-behavior", "smooth")?;
    Ok(())
}

/// Sizes the hero wrapper to the image's aspect ratio. Returns `false` when
/// the image has not loaded yet.
pub fn fit_hero_image(
    window: &Window,
    image: &HtmlImageElement,
    wrapper: &HtmlElement,
) -> Result<bool, DomError> {
    if !image.complete() {
        return Ok(false);
    }
    let viewport = read_viewport(window)?;
    let Some(height) = hero_height(
        image.natural_width() as f64,
        image.natural_height() as f64,
        wrapper.offset_width() as f64,
        viewport.width,
    ) else {
        return Ok(false);
    };

    wrapper.style().set_property("height", &format!("{}px", height))?;
    let style = image.style();
    style.set_property("width", "100%")?;
    style.set_property("height", "100%")?;
    style.set_property("object-fit", "contain")?;
    Ok(true)
}

fn set_style(element: &HtmlElement, property: &str, value: &str) {
    if let Err(err) = element.style().set_property(property, value) {
        warn!("Failed to set {} on element: {:?}", property, err);
    }
}

impl StyleSink for HtmlElement {
    fn set_opacity(&self, opacity: f64) {
        set_style(self, "opacity", &opacity.to_string());
    }

    fn set_transform(&self, transform: &str) {
        set_style(self, "transform", transform);
    }

    fn set_filter(&self, filter: &str) {
        set_style(self, "filter", filter);
    }

    fn set_class(&self, class: &str, present: bool) {
        let classes = self.class_list();
        let result = if present {
            classes.add_1(class)
        } else {
            classes.remove_1(class)
        };
        if let Err(err) = result {
            warn!("Failed to toggle class {}: {:?}", class, err);
        }
    }

    fn set_phase(&self, phase: Option<Phase>) {
        let result = match phase {
            Some(phase) => self.set_attribute("data-phase", phase.as_str()),
            None => self.remove_attribute("data-phase"),
        };
        if let Err(err) = result {
            warn!("Failed to update data-phase: {:?}", err);
        }
    }
}

/// An event listener that is removed again when dropped.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut()>,
}

impl Listener {
    pub fn new<F>(target: &EventTarget, event: &'static str, callback: F) -> Result<Self, DomError>
    where
        F: FnMut() + 'static,
    {
        let callback = Closure::wrap(Box::new(callback) as Box<dyn FnMut()>);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Err(err) = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref())
        {
            warn!("Failed to remove {} listener: {:?}", self.event, err);
        }
    }
}
