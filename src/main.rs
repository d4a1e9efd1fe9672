//! Drop Catch entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlElement, HtmlSelectElement, MouseEvent, TouchEvent};

    use drop_catch::{FieldGeometry, GameConfig, RenderCommand, RenderSink, Session};

    /// Applies render commands to the page
    struct DomSink {
        document: Document,
        container: HtmlElement,
    }

    impl DomSink {
        fn element(&self, id: &str) -> Option<HtmlElement> {
            self.document
                .get_element_by_id(id)
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_px(el: &HtmlElement, prop: &str, value: f32) {
            let _ = el.style().set_property(prop, &format!("{}px", value));
        }

        fn create_div(&self, id: &str, classes: &[&str]) -> Option<HtmlElement> {
            let el: HtmlElement = self.document.create_element("div").ok()?.dyn_into().ok()?;
            el.set_id(id);
            for class in classes {
                let _ = el.class_list().add_1(class);
            }
            Some(el)
        }

        fn remove(&self, id: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.remove();
            }
        }
    }

    impl RenderSink for DomSink {
        fn apply(&mut self, cmd: RenderCommand) {
            match cmd {
                RenderCommand::SpawnDrop { id, x, y, clean } => {
                    let class = if clean { "clean" } else { "dirty" };
                    if let Some(el) = self.create_div(&format!("drop-{}", id), &["drop", class]) {
                        Self::set_px(&el, "left", x);
                        Self::set_px(&el, "top", y);
                        let _ = self.container.append_child(&el);
                    }
                }
                RenderCommand::MoveDrop { id, y } => {
                    if let Some(el) = self.element(&format!("drop-{}", id)) {
                        Self::set_px(&el, "top", y);
                    }
                }
                RenderCommand::RemoveDrop { id } => self.remove(&format!("drop-{}", id)),
                RenderCommand::MoveBucket { x } => {
                    if let Some(el) = self.element("bucket") {
                        Self::set_px(&el, "left", x);
                    }
                }
                RenderCommand::SetScore { score } => self.set_text("score", &score.to_string()),
                RenderCommand::SetTimer { secs } => self.set_text("timer", &secs.to_string()),
                RenderCommand::SetGoal { goal } => self.set_text("goal", &goal.to_string()),
                RenderCommand::SetRunning { running } => {
                    if let Some(btn) = self.document.get_element_by_id("startBtn") {
                        btn.set_text_content(Some(if running {
                            "Game Running..."
                        } else {
                            "Start Game"
                        }));
                        if running {
                            let _ = btn.set_attribute("disabled", "");
                        } else {
                            let _ = btn.remove_attribute("disabled");
                        }
                    }
                }
                RenderCommand::ShowBanner(banner) => {
                    let id = if banner.won { "celebration" } else { "gameOver" };
                    if let Some(el) = self.document.get_element_by_id(id) {
                        let _ = el.class_list().add_1("active");
                        if let Ok(Some(title)) = el.query_selector("h2, h3") {
                            title.set_text_content(Some(&banner.title));
                        }
                        if let Ok(Some(msg)) = el.query_selector("p") {
                            msg.set_text_content(Some(&banner.message));
                        }
                    }
                }
                RenderCommand::HideBanners => {
                    for id in ["celebration", "gameOver"] {
                        if let Some(el) = self.document.get_element_by_id(id) {
                            let _ = el.class_list().remove_1("active");
                        }
                    }
                }
                RenderCommand::SpawnConfetti {
                    id,
                    x,
                    y,
                    size,
                    color,
                } => {
                    let Some(layer) = self.element("celebration") else {
                        return;
                    };
                    if let Some(el) = self.create_div(&format!("confetti-{}", id), &["confetti"]) {
                        Self::set_px(&el, "left", x);
                        Self::set_px(&el, "top", y);
                        Self::set_px(&el, "width", size);
                        Self::set_px(&el, "height", size);
                        let _ = el.style().set_property("background", &color);
                        let _ = layer.append_child(&el);
                    }
                }
                RenderCommand::MoveConfetti { id, y } => {
                    if let Some(el) = self.element(&format!("confetti-{}", id)) {
                        Self::set_px(&el, "top", y);
                    }
                }
                RenderCommand::RemoveConfetti { id } => self.remove(&format!("confetti-{}", id)),
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        session: Session,
        sink: DomSink,
        last_time: f64,
    }

    impl Game {
        /// Measure the field from the DOM; None while it has no layout yet
        fn measure(&self) -> Option<FieldGeometry> {
            let bucket = self.sink.element("bucket")?;
            let geometry = FieldGeometry {
                width: self.sink.container.offset_width() as f32,
                height: self.sink.container.offset_height() as f32,
                bucket_width: bucket.offset_width() as f32,
                bucket_height: bucket.offset_height() as f32,
                ..*self.session.geometry()
            };
            geometry.validate().ok().map(|_| geometry)
        }

        fn resize(&mut self) {
            match self.measure() {
                Some(geometry) => {
                    if let Err(e) = self.session.resize(geometry) {
                        log::warn!("Resize rejected: {}", e);
                    }
                }
                None => log::debug!("Field not laid out yet, keeping previous geometry"),
            }
        }

        fn field_left(&self) -> f32 {
            self.sink.container.get_bounding_client_rect().left() as f32
        }

        fn flush(&mut self) {
            self.session.flush(&mut self.sink);
        }
    }

    /// Optional JSON overrides from <script id="game-config" type="application/json">
    fn load_config(document: &Document) -> GameConfig {
        let json = document
            .get_element_by_id("game-config")
            .and_then(|el| el.text_content());
        match json {
            Some(json) => match GameConfig::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded game config");
                    config
                }
                Err(e) => {
                    log::warn!("Ignoring game config: {}", e);
                    GameConfig::default()
                }
            },
            None => GameConfig::default(),
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {}", e).into());
        }

        log::info!("Drop Catch starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Some(container) = document
            .get_element_by_id("gameContainer")
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            log::error!("#gameContainer not found");
            return;
        };

        let seed = js_sys::Date::now() as u64;
        let session = match Session::new(load_config(&document), seed) {
            Ok(session) => session,
            Err(e) => {
                log::error!("Cannot create session: {}", e);
                return;
            }
        };

        let game = Rc::new(RefCell::new(Game {
            session,
            sink: DomSink {
                document: document.clone(),
                container: container.clone(),
            },
            last_time: 0.0,
        }));
        {
            let mut g = game.borrow_mut();
            g.resize();
            g.session.reset();
            g.flush();
        }

        setup_input_handlers(&container, game.clone());
        setup_buttons(&document, game.clone());
        setup_difficulty_select(&document, game.clone());
        setup_resize(game.clone());

        request_animation_frame(game);

        log::info!("Drop Catch running (seed {})", seed);
    }

    fn setup_input_handlers(container: &HtmlElement, game: Rc<RefCell<Game>>) {
        // Mouse move
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let left = g.field_left();
                g.session.on_input_position(event.client_x() as f32, left);
            });
            let _ = container
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                let mut g = game.borrow_mut();
                if !g.session.state.active {
                    return;
                }
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let left = g.field_left();
                    g.session.on_input_position(touch.client_x() as f32, left);
                }
            });
            let _ = container
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("startBtn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.resize();
                g.session.start();
                g.flush();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("resetBtn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.session.reset();
                g.flush();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Clicking the win overlay dismisses it early
        if let Some(el) = document.get_element_by_id("celebration") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().sink.apply(drop_catch::RenderCommand::HideBanners);
            });
            let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_difficulty_select(document: &Document, game: Rc<RefCell<Game>>) {
        let Some(select) = document
            .get_element_by_id("difficulty")
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        else {
            return;
        };
        select.set_value(game.borrow().session.profile().name());

        let select_clone = select.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut g = game.borrow_mut();
            let name = select_clone.value();
            match g.session.set_difficulty(&name) {
                Ok(()) => log::info!("Difficulty set to {}", name),
                Err(e) => {
                    log::warn!("{}", e);
                    select_clone.set_value(g.session.profile().name());
                }
            }
            g.flush();
        });
        let _ = select.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut g = game.borrow_mut();
            g.resize();
            g.flush();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                drop_catch::consts::SIM_DT
            };
            g.last_time = time;

            g.session.advance(dt);
            g.flush();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Drop Catch (native) starting...");
    log::info!("Native mode is headless - serve the wasm build for the playable version");

    println!("\nRunning demo rounds...");
    for difficulty in drop_catch::Difficulty::ALL {
        demo_round(difficulty);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play one round with a bot that chases the lowest clean drop
#[cfg(not(target_arch = "wasm32"))]
fn demo_round(difficulty: drop_catch::Difficulty) {
    use drop_catch::{GameConfig, GamePhase, RenderCommand, Session};

    let config = GameConfig {
        difficulty,
        ..Default::default()
    };
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut session = match Session::new(config, seed) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Cannot create session: {}", e);
            return;
        }
    };

    session.start();
    let mut caught = 0;
    while session.phase() == GamePhase::Running {
        let entity_width = session.geometry().entity_width;
        let target = session
            .state
            .entities
            .iter()
            .filter(|e| e.clean)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|e| e.pos.x + entity_width / 2.0);
        if let Some(x) = target {
            session.on_input_position(x, 0.0);
        }
        session.tick();
        caught += session
            .drain_commands()
            .iter()
            .filter(|c| matches!(c, RenderCommand::SetScore { .. }))
            .count();
    }

    let outcome = if session.phase() == GamePhase::Won {
        "won"
    } else {
        "lost"
    };
    println!(
        "✓ {:>6}: {} with {} points (goal {}, {} catches)",
        session.profile().name(),
        outcome,
        session.state.score,
        session.state.goal,
        caught
    );
}
