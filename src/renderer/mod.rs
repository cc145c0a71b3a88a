//! DOM rendering
//!
//! Each bubble is an absolutely positioned `div` keyed by bubble ID. The
//! simulation never touches the DOM; `sync` mirrors the current state onto
//! the elements once per frame.

use std::collections::HashMap;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement};

use crate::consts::{SPARKLE_COUNT, SPARKLE_JITTER, SPARKLE_LIFETIME_MS};
use crate::sim::{Bubble, BubbleId, GameState};

/// Attribute carrying the bubble ID, read back by the pointer handler
pub const BUBBLE_ID_ATTR: &str = "data-bubble-id";

pub struct DomRenderer {
    document: Document,
    container: HtmlElement,
    elements: HashMap<BubbleId, HtmlElement>,
}

impl DomRenderer {
    /// Render into the element with `container_id`, or the page body
    pub fn new(container_id: &str) -> Option<Self> {
        let document = web_sys::window()?.document()?;
        let container = document
            .get_element_by_id(container_id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            .or_else(|| document.body())?;
        Some(Self {
            document,
            container,
            elements: HashMap::new(),
        })
    }

    pub fn container(&self) -> &HtmlElement {
        &self.container
    }

    /// Mirror the bubble collection onto the DOM
    pub fn sync(&mut self, state: &GameState) {
        // Drop elements whose bubble is gone
        self.elements.retain(|id, el| {
            let alive = state.bubble(*id).is_some();
            if !alive {
                el.remove();
            }
            alive
        });

        for bubble in &state.bubbles {
            if !self.elements.contains_key(&bubble.id) {
                match self.create(bubble) {
                    Some(el) => {
                        self.elements.insert(bubble.id, el);
                    }
                    None => {
                        log::warn!("Failed to create element for bubble {}", bubble.id);
                        continue;
                    }
                }
            }
            if let Some(el) = self.elements.get(&bubble.id) {
                let style = el.style();
                let _ = style.set_property("left", &format!("{}px", bubble.pos.x));
                let _ = style.set_property("bottom", &format!("{}px", bubble.pos.y));
                if bubble.popped {
                    let _ = el.class_list().add_1("popped");
                }
            }
        }
    }

    fn create(&self, bubble: &Bubble) -> Option<HtmlElement> {
        let el: HtmlElement = self.document.create_element("div").ok()?.dyn_into().ok()?;
        el.set_class_name(if bubble.is_bomb() { "bubble bomb" } else { "bubble" });
        el.set_attribute(BUBBLE_ID_ATTR, &bubble.id.to_string()).ok()?;
        el.set_inner_text(bubble.glyph());
        let style = el.style();
        let size = format!("{}px", bubble.size);
        let _ = style.set_property("width", &size);
        let _ = style.set_property("height", &size);
        let _ = style.set_property("font-size", &format!("{}px", bubble.size * 0.6));
        self.container.append_child(&el).ok()?;
        Some(el)
    }

    /// Remove every bubble element
    pub fn clear(&mut self) {
        for (_, el) in self.elements.drain() {
            el.remove();
        }
    }

    /// Short-lived sparkle burst at page coordinates
    pub fn spawn_sparkles(&self, x: f32, y: f32) {
        let Some(window) = web_sys::window() else {
            return;
        };
        for _ in 0..SPARKLE_COUNT {
            let Some(sparkle) = self
                .document
                .create_element("div")
                .ok()
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            else {
                continue;
            };
            sparkle.set_class_name("sparkle");
            let jx = x + (js_sys::Math::random() as f32 * 2.0 - 1.0) * SPARKLE_JITTER;
            let jy = y + (js_sys::Math::random() as f32 * 2.0 - 1.0) * SPARKLE_JITTER;
            let style = sparkle.style();
            let _ = style.set_property("left", &format!("{jx}px"));
            let _ = style.set_property("top", &format!("{jy}px"));
            if self.container.append_child(&sparkle).is_err() {
                continue;
            }

            let cleanup = Closure::once_into_js(move || sparkle.remove());
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                cleanup.unchecked_ref(),
                SPARKLE_LIFETIME_MS,
            );
        }
    }
}

/// Bubble ID stored on a rendered element, if any
pub fn bubble_id_of(el: &web_sys::Element) -> Option<BubbleId> {
    el.closest(".bubble")
        .ok()
        .flatten()?
        .get_attribute(BUBBLE_ID_ATTR)?
        .parse()
        .ok()
}
