//! Hero image wrapper sizing.

const MOBILE_MAX_WIDTH: f64 = 768.0;

/// Height bounds for the hero image wrapper at a given viewport width.
pub fn height_bounds(viewport_width: f64) -> (f64, f64) {
    if viewport_width <= MOBILE_MAX_WIDTH {
        (200.0, 400.0)
    } else {
        (300.0, 600.0)
    }
}

/// Wrapper height that keeps the image's aspect ratio at the container's
/// width, within [`height_bounds`]. `None` while the image has no natural
/// size yet.
pub fn hero_height(
    natural_width: f64,
    natural_height: f64,
    container_width: f64,
    viewport_width: f64,
) -> Option<f64> {
    if natural_width <= 0.0 || natural_height <= 0.0 {
        return None;
    }
    let aspect_ratio = natural_width / natural_height;
    let dynamic = container_width / aspect_ratio;
    let (min, max) = height_bounds(viewport_width);
    Some(dynamic.min(max).max(min))
}
