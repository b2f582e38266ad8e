//! Browser implementations: requestAnimationFrame and DOM layout probing

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement, Window};

use super::frames::{FrameHandle, TickSource};
use crate::sim::{Answer, Bounds, LayoutProbe};

/// `requestAnimationFrame` with a fixed callback
pub struct RafTicks {
    window: Window,
    callback: Closure<dyn FnMut(f64)>,
}

impl RafTicks {
    pub fn new(window: Window, callback: Closure<dyn FnMut(f64)>) -> Self {
        Self { window, callback }
    }
}

impl TickSource for RafTicks {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        match self
            .window
            .request_animation_frame(self.callback.as_ref().unchecked_ref())
        {
            Ok(id) => Some(FrameHandle(id)),
            Err(e) => {
                log::error!("requestAnimationFrame failed: {:?}", e);
                None
            }
        }
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Err(e) = self.window.cancel_animation_frame(handle.0) {
            log::warn!("cancelAnimationFrame failed: {:?}", e);
        }
    }
}

/// Reads the card content box and actor buttons from the live DOM
pub struct DomLayout {
    container: HtmlElement,
}

impl DomLayout {
    pub fn new(container: HtmlElement) -> Self {
        Self { container }
    }

    pub fn container_element(&self) -> &HtmlElement {
        &self.container
    }

    /// The `[data-actor=<id>]` button inside the container
    pub fn actor_element(&self, id: Answer) -> Option<Element> {
        self.container
            .query_selector(&format!("[data-actor=\"{}\"]", id.id()))
            .ok()
            .flatten()
    }
}

impl LayoutProbe for DomLayout {
    fn container(&self) -> Option<Bounds> {
        let w = self.container.client_width();
        let h = self.container.client_height();
        if w <= 0 || h <= 0 {
            return None;
        }
        Some(Bounds::new(w as f32, h as f32))
    }

    fn actor_offset(&self, id: Answer) -> Option<Vec2> {
        let element = self.actor_element(id)?;
        let outer = self.container.get_bounding_client_rect();
        let inner = element.get_bounding_client_rect();
        Some(Vec2::new(
            (inner.left() - outer.left()) as f32,
            (inner.top() - outer.top()) as f32,
        ))
    }
}
