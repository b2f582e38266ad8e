//! Bunny Card entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_card {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlElement, HtmlImageElement, MouseEvent, Window};

    use bunny_card::CardContent;
    use bunny_card::platform::FrameLoop;
    use bunny_card::platform::web::{DomLayout, RafTicks};
    use bunny_card::sim::{Answer, CardEvent, CardState};
    use bunny_card::ui::{ActorView, CardView};

    /// Page instance holding all state
    struct Card {
        state: CardState,
        content: CardContent,
        layout: DomLayout,
        frames: FrameLoop,
        ticks: Option<RafTicks>,
        document: Document,
    }

    impl Card {
        fn new(seed: u64, content: CardContent, layout: DomLayout, document: Document) -> Self {
            Self {
                state: CardState::new(seed),
                content,
                layout,
                frames: FrameLoop::new(),
                ticks: None,
                document,
            }
        }

        fn toggle(&mut self) {
            let event = self.state.toggle();
            self.after_event(Some(event));
        }

        fn press_actor(&mut self, id: Answer) {
            let event = self.state.press_actor(id, &self.layout);
            self.after_event(event);
        }

        fn after_event(&mut self, event: Option<CardEvent>) {
            match event {
                Some(CardEvent::GameStarted(id)) => log::info!("Game started by {}", id.id()),
                Some(CardEvent::GameEnded(id)) => log::info!("Answer: {}", id.label()),
                Some(_) | None => {}
            }
            self.render();
            self.sync_frames();
        }

        fn on_frame(&mut self) {
            self.frames.fired();
            self.state.tick(&self.layout);
            self.render();
            self.sync_frames();
        }

        fn sync_frames(&mut self) {
            let wants = self.state.wants_frame();
            if let Some(ticks) = self.ticks.as_mut() {
                self.frames.sync(ticks, wants);
            }
        }

        /// Apply the current view to the DOM
        fn render(&self) {
            let view = CardView::of(&self.state, &self.content);
            let doc = &self.document;

            if let Some(el) = doc.get_element_by_id("card") {
                let _ = el.set_attribute("class", if view.open { "card open" } else { "card" });
            }

            let _ = self
                .layout
                .container_element()
                .class_list()
                .toggle_with_force("won", !view.decorations_visible);

            if let Some(footer) = doc.get_element_by_id("footer") {
                footer.set_inner_html("");
                for segment in &view.footer {
                    if let Ok(span) = doc.create_element("span") {
                        if segment.cursive {
                            let _ = span.set_attribute("class", "cursive");
                        }
                        span.set_text_content(Some(segment.text));
                        let _ = footer.append_child(&span);
                    }
                }
                let _ = footer.set_attribute("class", view.footer_style.css_class());
            }

            if let Some(hint) = doc.get_element_by_id("hint") {
                match view.hint {
                    Some(text) => {
                        hint.set_text_content(Some(text));
                        let _ = hint.set_attribute("class", "hint");
                    }
                    None => {
                        let _ = hint.set_attribute("class", "hint hidden");
                    }
                }
            }

            if let Some(frame) = doc.get_element_by_id("result") {
                let class = match view.result {
                    None => "result hidden".to_string(),
                    Some(result) => {
                        if let Some(img) = doc
                            .get_element_by_id("result-image")
                            .and_then(|el| el.dyn_into::<HtmlImageElement>().ok())
                        {
                            if img.src() != result.image {
                                img.set_src(result.image);
                            }
                        }
                        let mut class = String::from("result");
                        if result.large {
                            class.push_str(" large");
                        }
                        if result.anchor_bottom {
                            class.push_str(" anchor-bottom");
                        }
                        class
                    }
                };
                let _ = frame.set_attribute("class", &class);
            }

            for (id, actor) in &view.actors {
                if let Some(button) = self.layout.actor_element(*id) {
                    render_actor(&button, actor);
                }
            }
        }
    }

    fn render_actor(button: &Element, view: &ActorView) {
        let _ = button.set_attribute("style", &view.button_style());
        let _ = button.set_attribute("data-mode", view.mode.as_str());

        let classes = button.class_list();
        let _ = classes.toggle_with_force("floating", view.floating);
        let _ = classes.toggle_with_force("box-visible", view.box_visible);
        let _ = classes.toggle_with_force("bunny-visible", view.bunny_visible);
        let _ = classes.toggle_with_force("checked", view.checkmark);

        if let Some(bunny) = button.query_selector(".bunny").ok().flatten() {
            let _ = bunny.set_attribute("style", &format!("transform:{}", view.bunny_transform()));
        }
        if let Some(label) = button.query_selector(".label").ok().flatten() {
            let _ = label.set_attribute("style", &format!("transform:{}", view.label_transform()));
        }
    }

    fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
        document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))?
            .dyn_into::<T>()
            .map_err(|_| JsValue::from_str(&format!("#{id} has the wrong element type")))
    }

    /// Fill in the configurable copy and images
    fn apply_content(document: &Document, content: &CardContent) {
        let texts = [("question", content.question.clone()), ("poem", content.poem.join("\n"))];
        for (id, text) in texts {
            if let Some(el) = document.get_element_by_id(id) {
                el.set_text_content(Some(&text));
            }
        }

        let images = [
            ("front-cover", &content.images.front_cover),
            ("tree-fox", &content.images.tree_fox),
            ("fox", &content.images.fox),
            ("him", &content.images.him),
            ("her", &content.images.her),
        ];
        for (id, src) in images {
            if let Some(img) = document
                .get_element_by_id(id)
                .and_then(|el| el.dyn_into::<HtmlImageElement>().ok())
            {
                img.set_src(src);
            }
        }

        if let Ok(list) = document.query_selector_all(".side-pattern") {
            for i in 0..list.length() {
                if let Some(el) = list.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) {
                    let _ = el
                        .style()
                        .set_property("background-image", &format!("url('{}')", content.images.side_pattern));
                }
            }
        }

        for answer in Answer::ALL {
            if let Some(label) = document
                .query_selector(&format!("[data-actor=\"{}\"] .label", answer.id()))
                .ok()
                .flatten()
            {
                label.set_text_content(Some(answer.label()));
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Bunny Card starting...");

        let window: Window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let content = CardContent::load();
        apply_content(&document, &content);

        let container: HtmlElement = element_by_id(&document, "card-content")?;
        let layout = DomLayout::new(container);

        let seed = js_sys::Date::now() as u64;
        let card = Rc::new(RefCell::new(Card::new(seed, content, layout, document.clone())));
        log::info!("Card initialized with seed: {}", seed);

        // Frame callback; lives as long as the page
        {
            let frame_card = card.clone();
            let callback = Closure::<dyn FnMut(f64)>::new(move |_time: f64| {
                frame_card.borrow_mut().on_frame();
            });
            card.borrow_mut().ticks = Some(RafTicks::new(window.clone(), callback));
        }

        setup_cover(&document, card.clone())?;
        setup_actors(&document, card.clone());

        card.borrow().render();

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        log::info!("Bunny Card ready!");
        Ok(())
    }

    /// Front cover / inside-left leaf toggles the card
    fn setup_cover(document: &Document, card: Rc<RefCell<Card>>) -> Result<(), JsValue> {
        let cover: Element = element_by_id(document, "cover")?;
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            card.borrow_mut().toggle();
        });
        cover.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_actors(document: &Document, card: Rc<RefCell<Card>>) {
        for answer in Answer::ALL {
            let selector = format!("[data-actor=\"{}\"]", answer.id());
            let Some(button) = document.query_selector(&selector).ok().flatten() else {
                log::warn!("No element for actor {}", answer.id());
                continue;
            };

            let card = card.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                // Keep the press from reaching the card leaf
                event.stop_propagation();
                card.borrow_mut().press_actor(answer);
            });
            if let Err(e) = button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref()) {
                log::error!("Failed to bind actor {}: {:?}", answer.id(), e);
            }
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_card::run() {
        log::error!("Card setup failed, staying static: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Bunny Card (native) starting...");
    log::info!("Native mode plays one headless round - run with `trunk serve` for the card itself");

    let answer = std::env::args()
        .nth(1)
        .and_then(|arg| bunny_card::sim::Answer::from_id(&arg))
        .unwrap_or(bunny_card::sim::Answer::Yes);
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    headless_round(answer, seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Open the card, chase `answer` for a bit, catch it and let the round settle
#[cfg(not(target_arch = "wasm32"))]
fn headless_round(answer: bunny_card::sim::Answer, seed: u64) {
    use bunny_card::CardContent;
    use bunny_card::platform::{FrameLoop, ManualTicks};
    use bunny_card::sim::{Bounds, CardState, FixedLayout, Mode};

    const CHASE_FRAMES: u32 = 90;
    const MAX_FRAMES: u32 = 1000;

    let content = CardContent::load();
    let layout = FixedLayout::card_grid(Bounds::new(420.0, 600.0));
    let mut card = CardState::new(seed);
    let mut ticks = ManualTicks::new();
    let mut frames = FrameLoop::new();

    log::info!("Seed: {}", seed);
    card.open();
    println!("{}", card.footer(&content));

    card.press_actor(answer, &layout);
    println!("{}", card.footer(&content));
    let chased = run_frames(&mut card, &layout, &mut ticks, &mut frames, CHASE_FRAMES, |_: &CardState| false);
    log::info!("Chased {} for {} frames", answer.id(), chased);

    card.press_actor(answer, &layout);
    let settled = run_frames(&mut card, &layout, &mut ticks, &mut frames, MAX_FRAMES, |c: &CardState| {
        c.round.actor(answer).map(|a| a.mode) == Some(Mode::Centered)
    });
    log::info!("Winner settled after {} frames", settled);

    println!("{}", card.footer(&content));
    let actors: Vec<_> = card.round.actors().collect();
    match serde_json::to_string_pretty(&actors) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize actors: {}", e),
    }
}

/// Fire frames until `stop` holds, the loop goes idle, or `limit` is hit
#[cfg(not(target_arch = "wasm32"))]
fn run_frames(
    card: &mut bunny_card::sim::CardState,
    layout: &bunny_card::sim::FixedLayout,
    ticks: &mut bunny_card::platform::ManualTicks,
    frames: &mut bunny_card::platform::FrameLoop,
    limit: u32,
    stop: impl Fn(&bunny_card::sim::CardState) -> bool,
) -> u32 {
    let mut count = 0;
    frames.sync(ticks, card.wants_frame());
    while count < limit && !stop(card) && ticks.fire().is_some() {
        frames.fired();
        card.tick(layout);
        frames.sync(ticks, card.wants_frame());
        count += 1;
    }
    count
}
