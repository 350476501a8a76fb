//! Flappy entry point
//!
//! The browser build wires the canvas, keyboard and touch input and a
//! `requestAnimationFrame` loop. The native build runs a headless demo in
//! which the autopilot plays for a fixed number of frames.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{AddEventListenerOptions, HtmlCanvasElement, KeyboardEvent, TouchEvent};

    use flappy::persistence::LocalStorageStore;
    use flappy::platform::{ActivateLatch, FixedStep, InputQueue, queue_autopilot};
    use flappy::renderer::{CanvasRenderer, Renderer};
    use flappy::Settings;
    use flappy::sim::{GameEvent, Simulation, tick};

    /// Game instance holding all state
    struct Game {
        sim: Simulation,
        renderer: Option<CanvasRenderer>,
        step: FixedStep,
        input: InputQueue,
        key_latch: ActivateLatch,
        idle_mode: bool,
        last_time: f64,
    }

    impl Game {
        fn new(settings: &Settings, seed: u64) -> Self {
            Self {
                sim: Simulation::new(settings, Box::new(LocalStorageStore::default()), seed),
                renderer: None,
                step: FixedStep::new(settings.tick_rate),
                input: InputQueue::new(),
                key_latch: ActivateLatch::new(),
                idle_mode: false,
                last_time: 0.0,
            }
        }

        /// Run simulation ticks for one display frame
        fn update(&mut self, dt: f32) {
            let ticks = self.step.advance(dt);
            for _ in 0..ticks {
                if self.idle_mode {
                    queue_autopilot(&self.sim, &mut self.input);
                }

                // Input lands between ticks, never inside one
                self.input.apply(&mut self.sim);
                tick(&mut self.sim);
            }

            for event in self.sim.drain_events() {
                if let GameEvent::NewHighScore { score } = event {
                    log::info!("New high score: {}", score);
                }
            }
        }

        fn render(&mut self) {
            if let Some(renderer) = self.renderer.as_mut() {
                renderer.render(&self.sim);
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Flappy starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .or_else(|| document.get_element_by_id("canvas"))
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let settings = Settings::load();
        canvas.set_width(settings.playfield.width as u32);
        canvas.set_height(settings.playfield.height as u32);

        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let game = Rc::new(RefCell::new(Game::new(&settings, seed)));
        log::info!("Game initialized with seed: {}", seed);

        match CanvasRenderer::new(&canvas) {
            Ok(renderer) => game.borrow_mut().renderer = Some(renderer),
            Err(e) => log::error!("Could not create canvas renderer: {:?}", e),
        }

        setup_input_handlers(&canvas, game.clone());

        request_animation_frame(game);

        log::info!("Flappy running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Keyboard: Space activates, I toggles idle mode
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.code().as_str() {
                    "Space" => {
                        event.prevent_default();
                        if !event.repeat() && g.key_latch.press() {
                            g.input.push();
                        }
                    }
                    "KeyI" => {
                        g.idle_mode = !g.idle_mode;
                        log::info!("Idle mode: {}", g.idle_mode);
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.code() == "Space" {
                    game.borrow_mut().key_latch.release();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch: one activation per touchstart. Non-passive so the page
        // does not scroll or zoom.
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().input.push();
            });
            let options = AddEventListenerOptions::new();
            options.set_passive(false);
            let _ = canvas.add_event_listener_with_callback_and_add_event_listener_options(
                "touchstart",
                closure.as_ref().unchecked_ref(),
                &options,
            );
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
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
                g.step.step()
            };
            g.last_time = time;

            g.update(dt);
            g.render();
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
    log::info!("Flappy (native) starting headless demo...");
    native::run_demo(&flappy::Settings::load());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::time::{SystemTime, UNIX_EPOCH};

    use flappy::Settings;
    use flappy::persistence::JsonFileStore;
    use flappy::platform::{FrameLimiter, InputQueue, queue_autopilot};
    use flappy::renderer::{Renderer, TextRenderer};
    use flappy::sim::{GameEvent, Simulation, tick};

    const TEXT_COLS: usize = 48;
    const TEXT_ROWS: usize = 32;

    fn clock_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    }

    /// Autopilot plays `settings.demo_frames` frames at the configured rate
    pub fn run_demo(settings: &Settings) {
        let seed = settings.seed.unwrap_or_else(clock_seed);
        let store = JsonFileStore::new(&settings.high_score_file);
        log::info!("High score file: {}", store.path().display());
        let mut sim = Simulation::new(settings, Box::new(store), seed);

        let mut input = InputQueue::new();
        let mut renderer = TextRenderer::new(TEXT_COLS, TEXT_ROWS);
        let mut limiter = FrameLimiter::new(settings.tick_rate);
        let mut rounds = 0u32;

        for frame in 0..settings.demo_frames {
            queue_autopilot(&sim, &mut input);
            input.apply(&mut sim);
            tick(&mut sim);

            for event in sim.drain_events() {
                match event {
                    GameEvent::Started => rounds += 1,
                    GameEvent::NewHighScore { score } => log::info!("New high score: {}", score),
                    GameEvent::Scored { score } => log::debug!("Frame {}: score {}", frame, score),
                    GameEvent::Spawned { id } => log::trace!("Frame {}: obstacle {}", frame, id),
                    _ => {}
                }
            }

            renderer.render(&sim);
            log::trace!("\n{}", renderer.frame());
            limiter.wait();
        }

        println!("{}", renderer.frame());
        log::info!(
            "Demo finished: {} rounds, last score {}, high score {}",
            rounds,
            sim.score,
            sim.high_score
        );
    }
}
