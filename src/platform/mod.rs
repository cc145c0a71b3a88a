//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Wall-clock time (RNG seeds, frame timing)
//! - Viewport size

use crate::sim::Viewport;

/// Milliseconds since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Milliseconds since the Unix epoch
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

/// Seed for a new session's RNG
pub fn session_seed() -> u64 {
    now_ms() as u64
}

/// Inner size of the browser window
#[cfg(target_arch = "wasm32")]
pub fn window_viewport() -> Viewport {
    let size = web_sys::window().map(|w| {
        let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        (width as f32, height as f32)
    });
    let (width, height) = size.unwrap_or((0.0, 0.0));
    Viewport::new(width, height)
}

/// Native runs have no window; use a phone-ish portrait layout
#[cfg(not(target_arch = "wasm32"))]
pub fn window_viewport() -> Viewport {
    Viewport::new(390.0, 844.0)
}
