use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::{debug, info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, Window};
use yew::prelude::*;

use crate::animation::{
    FrameReport, FrameThrottle, Section, SectionGeometry, SectionProgressAnimator, Viewport,
};
use crate::config::AnimatorConfig;
use crate::content::Service;
use crate::dom::{self, DomError, Listener};

#[derive(Clone, Default, PartialEq)]
struct SectionRefs {
    root: NodeRef,
    content: NodeRef,
    image: NodeRef,
}

#[derive(Properties, PartialEq)]
pub struct ShowcaseProps {
    pub services: Vec<Service>,
    #[prop_or_default]
    pub config: AnimatorConfig,
}

struct Driver {
    window: Window,
    animator: SectionProgressAnimator<HtmlElement>,
    // Parallel to the animator's sections, used for measuring.
    roots: Vec<HtmlElement>,
    throttle: FrameThrottle,
    scroll_idle: Option<Timeout>,
    resize_settle: Option<Timeout>,
}

impl Driver {
    /// Section boxes move whenever content above them changes size, so they
    /// are measured again on every update rather than only on resize.
    fn measure_all(&self, scroll_y: f64) -> Vec<Option<SectionGeometry>> {
        self.roots.iter().map(|root| dom::measure(root, scroll_y)).collect()
    }

    fn update(&mut self, viewport: Viewport) -> FrameReport {
        let geometries = self.measure_all(viewport.scroll_y);
        self.animator.resize(geometries, viewport, dom::now_ms())
    }

    fn tick(&mut self) {
        match dom::read_viewport(&self.window) {
            Ok(viewport) => {
                self.update(viewport);
            }
            Err(err) => warn!("Skipping showcase frame: {}", err),
        }
    }

    fn run_frame(&mut self) {
        let Some(latest) = self.throttle.take_frame() else {
            return;
        };
        // Layout is read now, so scroll offset has to be read now as well.
        let viewport = dom::read_viewport(&self.window).unwrap_or(latest);
        let report = self.update(viewport);
        if report.transition_started {
            debug!(
                "Service transition to {:?} at progress {:?}",
                report.active, report.progress
            );
        }
    }

    fn relayout(&mut self) {
        match dom::read_viewport(&self.window) {
            Ok(viewport) => {
                let report = self.update(viewport);
                debug!(
                    "Showcase relayout, active section {:?} (last {:?})",
                    report.active,
                    self.animator.current()
                );
            }
            Err(err) => warn!("Showcase relayout skipped: {}", err),
        }
    }
}

/// Everything that has to stay alive while the showcase is animated.
struct Installed {
    driver: Rc<RefCell<Driver>>,
    _scroll: Listener,
    _resize: Listener,
    _frame: Rc<Closure<dyn FnMut()>>,
}

impl Drop for Installed {
    fn drop(&mut self) {
        // The pending timers hold the driver; drop them to break the cycle.
        let mut driver = self.driver.borrow_mut();
        driver.scroll_idle = None;
        driver.resize_settle = None;
        // The frame closure is freed with us; a frame still queued would call into it.
        if let Some(handle) = driver.throttle.cancel() {
            if let Err(err) = driver.window.cancel_animation_frame(handle) {
                warn!("Failed to cancel animation frame: {:?}", err);
            }
        }
        if let Err(err) = dom::set_body_class(&driver.window, "scrolling", false) {
            warn!("Failed to clear scrolling class: {}", err);
        }
    }
}

fn install(refs: &[SectionRefs], config: AnimatorConfig) -> Result<Installed, DomError> {
    let window = dom::window()?;
    if config.smooth_scroll {
        dom::enable_smooth_scroll(&window)?;
    }

    let scroll_y = dom::read_viewport(&window)?.scroll_y;
    let mut roots = Vec::with_capacity(refs.len());
    let mut sections = Vec::with_capacity(refs.len());
    for section_refs in refs {
        let (Some(root), Some(content)) = (
            section_refs.root.cast::<HtmlElement>(),
            section_refs.content.cast::<HtmlElement>(),
        ) else {
            continue;
        };
        let image = section_refs.image.cast::<HtmlElement>();
        sections.push(Section::new(dom::measure(&root, scroll_y), content, image));
        roots.push(root);
    }
    info!("Animating {} of {} service sections", sections.len(), refs.len());

    let driver = Rc::new(RefCell::new(Driver {
        window: window.clone(),
        animator: SectionProgressAnimator::new(sections, config.transition_lock_ms as f64),
        roots,
        throttle: FrameThrottle::new(),
        scroll_idle: None,
        resize_settle: None,
    }));
    driver.borrow_mut().tick();

    let frame = {
        let driver = driver.clone();
        Rc::new(Closure::wrap(Box::new(move || {
            driver.borrow_mut().run_frame();
        }) as Box<dyn FnMut()>))
    };

    let scroll = {
        let driver = driver.clone();
        let frame = frame.clone();
        let window = window.clone();
        let target = window.clone();
        Listener::new(&target, "scroll", move || {
            if let Err(err) = dom::set_body_class(&window, "scrolling", true) {
                warn!("Failed to mark body as scrolling: {}", err);
            }
            let idle = {
                let window = window.clone();
                Timeout::new(config.scroll_idle_ms, move || {
                    if let Err(err) = dom::set_body_class(&window, "scrolling", false) {
                        warn!("Failed to clear scrolling class: {}", err);
                    }
                })
            };

            let mut driver = driver.borrow_mut();
            // Replacing the timeout cancels the previous one.
            driver.scroll_idle = Some(idle);

            let viewport = match dom::read_viewport(&window) {
                Ok(viewport) => viewport,
                Err(err) => {
                    warn!("Ignoring scroll event: {}", err);
                    return;
                }
            };
            if driver.throttle.on_scroll(viewport) {
                match window.request_animation_frame((*frame).as_ref().unchecked_ref()) {
                    Ok(handle) => driver.throttle.set_pending(handle),
                    Err(err) => {
                        warn!("Failed to request animation frame: {:?}", err);
                        driver.throttle.take_frame();
                    }
                }
            }
        })?
    };

    let resize = {
        let driver = driver.clone();
        Listener::new(&window, "resize", move || {
            let settle = {
                let driver = driver.clone();
                Timeout::new(config.resize_settle_ms, move || {
                    driver.borrow_mut().relayout();
                })
            };
            driver.borrow_mut().resize_settle = Some(settle);
        })?
    };

    Ok(Installed {
        driver,
        _scroll: scroll,
        _resize: resize,
        _frame: frame,
    })
}

#[function_component(ServicesShowcase)]
pub fn services_showcase(props: &ShowcaseProps) -> Html {
    let refs = use_memo(
        |count| (0..*count).map(|_| SectionRefs::default()).collect::<Vec<_>>(),
        props.services.len(),
    );

    {
        let refs = refs.clone();
        use_effect_with_deps(
            move |(_, config)| {
                let config = *config;
                let installed: Rc<RefCell<Option<Installed>>> = Rc::default();
                let startup = {
                    let installed = installed.clone();
                    Timeout::new(config.startup_delay_ms, move || match install(&refs, config) {
                        Ok(done) => *installed.borrow_mut() = Some(done),
                        Err(err) => warn!("Services showcase left static: {}", err),
                    })
                };

                move || {
                    drop(startup);
                    installed.borrow_mut().take();
                }
            },
            (props.services.clone(), props.config),
        );
    }

    let sections = props
        .services
        .iter()
        .zip(refs.iter())
        .enumerate()
        .map(|(index, (service, section_refs))| {
            html! {
                <section class="services-section" ref={section_refs.root.clone()} data-service-index={index.to_string()}>
                    <div class="service-content" ref={section_refs.content.clone()}>
                        <span class="service-number">{format!("{:02}", index + 1)}</span>
                        <h2>{service.title.clone()}</h2>
                        <p>{service.body.clone()}</p>
                        <ul class="service-points">
                            { for service.points.iter().map(|point| html! { <li>{point.clone()}</li> }) }
                        </ul>
                    </div>
                    <div class="services-image" ref={section_refs.image.clone()}>
                        <img src={service.image.clone()} alt={service.image_alt.clone()} loading="lazy" />
                    </div>
                </section>
            }
        })
        .collect::<Html>();

    html! {
        <div class="services-showcase">
            { sections }
            <style>
                {r#"
                .services-showcase {
                    position: relative;
                }

                .services-section {
                    position: relative;
                    min-height: 150vh;
                    display: flex;
                    align-items: flex-start;
                    gap: 4rem;
                    padding: 0 6vw;
                }

                .service-content {
                    position: sticky;
                    top: 50vh;
                    flex: 1;
                    max-width: 520px;
                    opacity: 0;
                    transform: translateY(100px);
                    filter: blur(10px);
                    transition: transform 0.1s linear, opacity 0.1s linear, filter 0.1s linear;
                    will-change: transform, opacity, filter;
                }

                .service-content.animate-in h2 {
                    letter-spacing: 0;
                }

                .service-content.animate-out h2 {
                    letter-spacing: 0.02em;
                }

                .service-number {
                    color: #7EB2FF;
                    font-size: 0.9rem;
                    font-weight: 600;
                }

                .service-content h2 {
                    font-size: 3rem;
                    margin: 0.5rem 0 1rem;
                    transition: letter-spacing 0.4s ease;
                }

                .service-points {
                    list-style: none;
                    padding: 0;
                    color: #b3b3b3;
                }

                .services-image {
                    position: sticky;
                    top: 15vh;
                    flex: 1;
                    height: 70vh;
                    opacity: 0;
                    transition: opacity 0.5s ease;
                }

                .services-image img {
                    width: 100%;
                    height: 100%;
                    object-fit: cover;
                    border-radius: 24px;
                }

                body.scrolling .services-image {
                    pointer-events: none;
                }

                @media (max-width: 768px) {
                    .services-section {
                        flex-direction: column;
                        gap: 2rem;
                    }

                    .service-content h2 {
                        font-size: 2rem;
                    }

                    .services-image {
                        height: 40vh;
                    }
                }
                "#}
            </style>
        </div>
    }
}
