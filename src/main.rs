//! Powder Run entry point
//!
//! Platform wiring only: canvas, keyboard, and timers on the web; a headless
//! demo run natively. All gameplay lives in `powder_run::sim`.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, KeyboardEvent};

    use powder_run::highscores::{LocalScoreStore, ScoreStore};
    use powder_run::sim::{
        GameEvent, GameState, SpriteId, SpriteSheet, SpriteSize, SteerCommand, TickInput,
        Viewport, advance_jump, compose_frame, tick,
    };
    use powder_run::tuning::Tuning;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: TickInput,
        sprites: SpriteSheet,
        images: HashMap<SpriteId, HtmlImageElement>,
        store: LocalScoreStore,
        ctx: CanvasRenderingContext2d,
        /// Handle of the live jump-frame interval, if any.
        jump_timer: Option<i32>,
    }

    impl Game {
        fn new(seed: u64, viewport: Viewport, ctx: CanvasRenderingContext2d) -> Self {
            let store = LocalScoreStore::new();
            let all_time = store.load().unwrap_or(0);
            Self {
                state: GameState::new(seed, viewport, Tuning::default(), all_time),
                input: TickInput::default(),
                sprites: SpriteSheet::new(),
                images: HashMap::new(),
                store,
                ctx,
                jump_timer: None,
            }
        }

        /// Run one simulation tick and hand back the events for the shell.
        fn update(&mut self) -> Vec<GameEvent> {
            let input = self.input;
            let events = tick(&mut self.state, &input, &self.sprites, &mut self.store);

            // Clear one-shot inputs after processing
            self.input.command = None;
            self.input.pause = false;

            events
        }

        /// Render the current frame with canvas 2d.
        fn render(&self) {
            let viewport = self.state.viewport;
            let dpr = viewport.pixel_ratio as f64;

            self.ctx.save();
            let _ = self.ctx.scale(dpr, dpr);
            self.ctx
                .clear_rect(0.0, 0.0, viewport.width as f64, viewport.height as f64);

            // Skier first, obstacles over it.
            let frame = compose_frame(&self.state, &self.sprites);
            for instance in frame.skier.into_iter().chain(frame.obstacles) {
                let Some(image) = self.images.get(&instance.id) else {
                    continue;
                };
                let Some(size) = self.sprites.size(instance.id) else {
                    continue;
                };
                let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                    image,
                    instance.pos.x as f64,
                    instance.pos.y as f64,
                    size.width as f64,
                    size.height as f64,
                );
            }

            self.ctx.restore();
        }

        /// Update the points counter in the DOM.
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let score = &self.state.score;

            if let Some(el) = document.query_selector("#current-points").ok().flatten() {
                el.set_text_content(Some(&format!("Points: {}", score.points)));
            }
            if let Some(el) = document.query_selector("#high-score").ok().flatten() {
                el.set_text_content(Some(&format!("High Score: {}", score.high_score)));
            }
            if let Some(el) = document.query_selector("#all-time").ok().flatten() {
                el.set_text_content(Some(&format!(
                    "All Time High Score: {}",
                    score.all_time_high_score
                )));
            }
        }

        /// Reset the run; the all-time high score survives.
        fn restart(&mut self, seed: u64) {
            self.state.reset(seed);
            self.input = TickInput::default();
            log::info!("Run restarted with seed: {}", seed);
        }
    }

    fn stop_jump_timer(game: &mut Game) {
        if let Some(handle) = game.jump_timer.take() {
            if let Some(window) = web_sys::window() {
                window.clear_interval_with_handle(handle);
            }
        }
    }

    /// Start the fixed-cadence jump-frame timer. Any previous timer is
    /// cancelled first, so at most one ever runs.
    fn start_jump_timer(game: Rc<RefCell<Game>>) {
        let interval_ms = {
            let mut g = game.borrow_mut();
            stop_jump_timer(&mut g);
            g.state.tuning.jump_frame_interval_ms as i32
        };

        let window = web_sys::window().expect("no window");
        let callback = Closure::<dyn FnMut()>::new({
            let game = game.clone();
            move || {
                let mut g = game.borrow_mut();
                if advance_jump(&mut g.state) {
                    stop_jump_timer(&mut g);
                }
            }
        });

        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            interval_ms,
        ) {
            Ok(handle) => game.borrow_mut().jump_timer = Some(handle),
            Err(err) => log::warn!("Failed to schedule jump timer: {:?}", err),
        }
        callback.forget();
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Powder Run starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0);
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(600.0);
        let dpr = window.device_pixel_ratio();

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_width((width * dpr) as u32);
        canvas.set_height((height * dpr) as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let seed = js_sys::Date::now() as u64;
        let viewport = Viewport::new(width as f32, height as f32, dpr as f32);
        let game = Rc::new(RefCell::new(Game::new(seed, viewport, ctx)));

        log::info!("Game initialized with seed: {}", seed);

        load_sprites(game.clone());
        setup_key_handler(game.clone());
        setup_reset_button(game.clone());
        setup_auto_pause(game.clone());

        request_animation_frame(game);

        log::info!("Powder Run running!");
    }

    /// Kick off image loads; each records its drawn size (half the natural
    /// pixel size) as it arrives. The simulation treats entities without a
    /// size as not yet visible, so the loop can start right away.
    fn load_sprites(game: Rc<RefCell<Game>>) {
        for id in SpriteId::ALL {
            let Ok(image) = HtmlImageElement::new() else {
                log::warn!("Could not create image element for {:?}", id);
                continue;
            };

            let onload = Closure::<dyn FnMut()>::new({
                let game = game.clone();
                move || {
                    let mut g = game.borrow_mut();
                    let Some(image) = g.images.get(&id) else {
                        return;
                    };
                    let size = SpriteSize::new(
                        image.natural_width() as f32 / 2.0,
                        image.natural_height() as f32 / 2.0,
                    );
                    g.sprites.set_size(id, size);
                }
            });
            image.set_onload(Some(onload.as_ref().unchecked_ref()));
            onload.forget();

            image.set_src(id.asset_path());
            game.borrow_mut().images.insert(id, image);
        }
    }

    fn setup_key_handler(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let command = match event.key().as_str() {
                "ArrowLeft" => Some(SteerCommand::Left),
                "ArrowRight" => Some(SteerCommand::Right),
                "ArrowUp" => Some(SteerCommand::Up),
                "ArrowDown" => Some(SteerCommand::Down),
                _ => None,
            };

            let mut g = game.borrow_mut();
            if let Some(command) = command {
                g.input.command = Some(command);
                event.prevent_default();
            } else if event.key() == "Escape" {
                g.input.pause = true;
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_reset_button(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("reset") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let seed = js_sys::Date::now() as u64;
                let mut g = game.borrow_mut();
                stop_jump_timer(&mut g);
                g.restart(seed);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if !g.state.paused {
                        g.input.pause = true;
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if !g.state.paused {
                    g.input.pause = true;
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let events = {
            let mut g = game.borrow_mut();
            let events = g.update();
            g.render();
            g.update_hud();
            events
        };

        // The jump timer runs on its own wall-clock cadence, outside ticks.
        if events.contains(&GameEvent::JumpStarted) {
            start_jump_timer(game.clone());
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
    log::info!("Powder Run (native) starting...");

    // Headless demo: ski straight downhill for ten seconds of frames.
    use powder_run::highscores::MemoryScoreStore;
    use powder_run::sim::{
        GameState, SpriteSheet, SpriteSize, SteerCommand, TickInput, Viewport, tick,
    };
    use powder_run::tuning::Tuning;

    let viewport = Viewport::new(1280.0, 720.0, 1.0);
    let sprites = SpriteSheet::uniform(SpriteSize::new(32.0, 32.0));
    let mut store = MemoryScoreStore::new();
    let mut state = GameState::new(0x5109, viewport, Tuning::default(), 0);

    let mut input = TickInput {
        command: Some(SteerCommand::Down),
        ..Default::default()
    };
    for _ in 0..600 {
        tick(&mut state, &input, &sprites, &mut store);
        input.command = None;
    }

    println!(
        "600 ticks: points={} direction={:?} obstacles={}",
        state.score.points,
        state.skier.direction,
        state.obstacles.len()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
