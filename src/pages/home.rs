use log::{error, warn};
use web_sys::{HtmlElement, HtmlImageElement};
use yew::prelude::*;

use crate::components::showcase::ServicesShowcase;
use crate::content;
use crate::dom::{self, DomError, Listener};

fn fit_hero(image_ref: &NodeRef, wrapper_ref: &NodeRef) {
    let (Some(image), Some(wrapper)) = (
        image_ref.cast::<HtmlImageElement>(),
        wrapper_ref.cast::<HtmlElement>(),
    ) else {
        return;
    };
    let result = dom::window().and_then(|window| dom::fit_hero_image(&window, &image, &wrapper));
    if let Err(err) = result {
        warn!("Failed to size hero image: {}", err);
    }
}

/// Keeps the hero wrapper sized to the image on load, on `src` changes and on resize.
fn install_hero_sizing(image_ref: NodeRef, wrapper_ref: NodeRef) -> Result<Vec<Listener>, DomError> {
    let window = dom::window()?;
    let mut listeners = Vec::with_capacity(2);

    if let Some(image) = image_ref.cast::<HtmlImageElement>() {
        // `load` fires again whenever `src` changes.
        let (image_ref, wrapper_ref) = (image_ref.clone(), wrapper_ref.clone());
        listeners.push(Listener::new(&image, "load", move || fit_hero(&image_ref, &wrapper_ref))?);
    }

    {
        let (image_ref, wrapper_ref) = (image_ref.clone(), wrapper_ref.clone());
        listeners.push(Listener::new(&window, "resize", move || fit_hero(&image_ref, &wrapper_ref))?);
    }

    fit_hero(&image_ref, &wrapper_ref);
    Ok(listeners)
}

#[function_component(Hero)]
fn hero() -> Html {
    let image_ref = use_node_ref();
    let wrapper_ref = use_node_ref();
    let revealed = use_state(|| false);

    {
        let image_ref = image_ref.clone();
        let wrapper_ref = wrapper_ref.clone();
        use_effect_with_deps(
            move |_| {
                let listeners = match install_hero_sizing(image_ref, wrapper_ref) {
                    Ok(listeners) => listeners,
                    Err(err) => {
                        warn!("Hero image sizing disabled: {}", err);
                        Vec::new()
                    }
                };
                move || drop(listeners)
            },
            (),
        );
    }

    // Staggered entrance once mounted.
    {
        let revealed = revealed.clone();
        use_effect_with_deps(
            move |_| {
                let timeout = gloo_timers::callback::Timeout::new(300, move || revealed.set(true));
                move || drop(timeout)
            },
            (),
        );
    }

    html! {
        <header class={classes!("hero", (*revealed).then(|| "revealed"))}>
            <div class="hero-text">
                <h1 id="heroTitle">{"We build digital products people enjoy using"}</h1>
                <p id="heroSubtitle">{"Design, web and mobile development for ambitious teams."}</p>
            </div>
            <div class="hero-image-wrapper" ref={wrapper_ref}>
                <img id="heroImage" ref={image_ref} src="/assets/hero.webp" alt="Selection of recent projects on different devices" />
            </div>
        </header>
    }
}

#[function_component(Home)]
pub fn home() -> Html {
    let services = use_state(|| match content::services() {
        Ok(services) => services,
        Err(err) => {
            error!("Failed to load services: {}", err);
            Vec::new()
        }
    });

    {
        use_effect_with_deps(
            move |_| {
                if let Some(window) = web_sys::window() {
                    window.scroll_to_with_x_and_y(0.0, 0.0);
                }
                || ()
            },
            (),
        );
    }

    html! {
        <div class="home-page">
            <Hero />
            <ServicesShowcase services={(*services).clone()} />
            <style>
                {r#"
                .home-page {
                    min-height: 100vh;
                    background: #1a1a1a;
                    color: #ffffff;
                    overflow-x: hidden;
                }

                .hero {
                    display: flex;
                    flex-direction: column;
                    align-items: center;
                    gap: 3rem;
                    padding: 8rem 2rem 6rem;
                    text-align: center;
                }

                .hero-text h1 {
                    font-size: 4rem;
                    max-width: 900px;
                    background: linear-gradient(45deg, #fff, #7EB2FF);
                    -webkit-background-clip: text;
                    -webkit-text-fill-color: transparent;
                }

                .hero-text p {
                    color: #b3b3b3;
                    font-size: 1.25rem;
                }

                .hero-text h1,
                .hero-text p,
                .hero-image-wrapper {
                    opacity: 0;
                    transform: translateY(20px);
                    transition: opacity 0.6s ease, transform 0.6s ease;
                }

                .hero.revealed .hero-text h1,
                .hero.revealed .hero-text p,
                .hero.revealed .hero-image-wrapper {
                    opacity: 1;
                    transform: translateY(0);
                }

                .hero.revealed .hero-text p { transition-delay: 0.3s; }
                .hero.revealed .hero-image-wrapper { transition-delay: 0.6s; }

                .hero-image-wrapper {
                    width: 100%;
                    max-width: 1100px;
                    height: 500px;
                }

                @media (max-width: 768px) {
                    .hero-text h1 {
                        font-size: 2.5rem;
                    }

                    .hero-image-wrapper {
                        height: 300px;
                    }
                }
                "#}
            </style>
        </div>
    }
}
